use crate::{
    model::{beatmap::Beatmap, mods::GameMods},
    osu::OsuPerformance,
    taiko::TaikoPerformance,
    util::map_or_attrs::MapOrAttrs,
};

use super::{
    attributes::{DifficultyAttributes, PerformanceAttributes},
    difficulty::Difficulty,
    error::CalculateError,
    score_state::ScoreState,
};

pub mod gradual;

/// Performance calculator on maps of any mode.
///
/// Settings are passed to [`Performance::calculate`] as a whole through
/// [`PerformanceSettings`].
///
/// # Example
///
/// ```
/// use strain_pp::{Beatmap, GameMods, Performance, PerformanceSettings};
///
/// let map = Beatmap::default();
///
/// let settings = PerformanceSettings::new()
///     .mods(GameMods::HD | GameMods::HR)
///     .accuracy(98.5)
///     .misses(1);
///
/// let attrs = Performance::new(&map).calculate(&settings).unwrap();
///
/// assert!(attrs.pp().abs() < f64::EPSILON);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Performance<'map> {
    map_or_attrs: MapOrAttrs<'map>,
}

impl<'map> Performance<'map> {
    /// Create a new performance calculator for the given map.
    ///
    /// Difficulty attributes will need to be calculated internally on every
    /// call which is a costly operation. If attributes are available already,
    /// use [`Performance::from_attributes`] instead.
    pub const fn new(map: &'map Beatmap) -> Self {
        Self {
            map_or_attrs: MapOrAttrs::Map(map),
        }
    }

    /// Create a new performance calculator from previously calculated
    /// attributes.
    ///
    /// Make sure the attributes were calculated for the same map and
    /// [`Difficulty`] settings that will be passed to
    /// [`Performance::calculate`]. Otherwise, the final attributes will be
    /// incorrect.
    pub fn from_attributes(attrs: impl Into<DifficultyAttributes>) -> Self {
        Self {
            map_or_attrs: MapOrAttrs::Attrs(attrs.into()),
        }
    }

    /// Calculate performance attributes for the given settings.
    pub fn calculate(
        &self,
        settings: &PerformanceSettings,
    ) -> Result<PerformanceAttributes, CalculateError> {
        let attrs = match self.map_or_attrs.difficulty_attributes(&settings.difficulty)? {
            DifficultyAttributes::Osu(attrs) => {
                PerformanceAttributes::Osu(OsuPerformance::new(attrs).calculate(settings))
            }
            DifficultyAttributes::Taiko(attrs) => {
                PerformanceAttributes::Taiko(TaikoPerformance::new(attrs).calculate(settings))
            }
        };

        tracing::trace!(pp = attrs.pp(), stars = attrs.stars(), "performance");

        Ok(attrs)
    }

    /// Create the [`ScoreState`] that [`Performance::calculate`] would use
    /// for the given settings.
    pub fn generate_state(
        &self,
        settings: &PerformanceSettings,
    ) -> Result<ScoreState, CalculateError> {
        let state = match self.map_or_attrs.difficulty_attributes(&settings.difficulty)? {
            DifficultyAttributes::Osu(attrs) => OsuPerformance::new(attrs).generate_state(settings),
            DifficultyAttributes::Taiko(attrs) => {
                TaikoPerformance::new(attrs).generate_state(settings)
            }
        };

        Ok(state)
    }
}

impl<'map> From<&'map Beatmap> for Performance<'map> {
    fn from(map: &'map Beatmap) -> Self {
        Self::new(map)
    }
}

impl From<DifficultyAttributes> for Performance<'_> {
    fn from(attrs: DifficultyAttributes) -> Self {
        Self::from_attributes(attrs)
    }
}

impl From<PerformanceAttributes> for Performance<'_> {
    fn from(attrs: PerformanceAttributes) -> Self {
        Self::from_attributes(attrs)
    }
}

/// While generating remaining hitresults, decide how they should be distributed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitResultPriority {
    /// Prioritize good hitresults over bad ones
    #[default]
    BestCase,
    /// Prioritize bad hitresults over good ones
    WorstCase,
}

/// Description of a score for performance calculation.
///
/// Hitresults that are not specified are generated, either to match the
/// given accuracy or as the extreme case of the [`HitResultPriority`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct PerformanceSettings {
    /// Mods and other difficulty settings, including passed objects.
    pub difficulty: Difficulty,
    /// Accuracy between `0.0` and `100.0`.
    pub accuracy: Option<f64>,
    /// The maximum combo of the score.
    pub combo: Option<u32>,
    pub n300: Option<u32>,
    pub n100: Option<u32>,
    pub n50: Option<u32>,
    pub misses: Option<u32>,
    pub hitresult_priority: HitResultPriority,
}

impl PerformanceSettings {
    /// Create new settings for a full combo SS.
    pub const fn new() -> Self {
        Self {
            difficulty: Difficulty::new(),
            accuracy: None,
            combo: None,
            n300: None,
            n100: None,
            n50: None,
            misses: None,
            hitresult_priority: HitResultPriority::BestCase,
        }
    }

    /// Use the specified settings of the given [`Difficulty`].
    pub fn difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }

    /// Specify mods.
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.difficulty.mods = mods.into();

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.difficulty.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// See [`Difficulty::clock_rate`].
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.difficulty.clock_rate = Some(clock_rate);

        self
    }

    /// Specify the accuracy of a play between `0.0` and `100.0`.
    /// This will be used to generate matching hitresults.
    ///
    /// `NaN` is treated as if no accuracy was specified.
    pub const fn accuracy(mut self, acc: f64) -> Self {
        self.accuracy = Some(acc);

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of 300s of a play.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    ///
    /// For osu!taiko these are the 150s.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s of a play.
    ///
    /// Irrelevant for osu!taiko.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses of a play.
    pub const fn misses(mut self, misses: u32) -> Self {
        self.misses = Some(misses);

        self
    }

    /// Specify how hitresults should be generated.
    ///
    /// Defaults to [`HitResultPriority::BestCase`].
    pub const fn hitresult_priority(mut self, priority: HitResultPriority) -> Self {
        self.hitresult_priority = priority;

        self
    }

    /// Provide parameters through a [`ScoreState`].
    ///
    /// Explicit hitresults take precedence over a specified accuracy.
    pub const fn state(mut self, state: ScoreState) -> Self {
        let ScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.misses = Some(misses);

        self
    }
}

#[cfg(test)]
mod tests {
    use rosu_map::section::general::GameMode;

    use crate::model::hit_object::HitObject;

    use super::*;

    fn map(mode: GameMode, n: usize) -> Beatmap {
        let hit_objects = (0..n)
            .map(|i| {
                let x = if i % 2 == 0 { 100.0 } else { 400.0 };

                HitObject::circle(rosu_map::util::Pos::new(x, 192.0), 500.0 + i as f64 * 250.0)
            })
            .collect();

        Beatmap {
            mode,
            original_mode: mode,
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn attributes_equal_map() {
        let map = map(GameMode::Osu, 50);
        let settings = PerformanceSettings::new().mods(GameMods::HD).accuracy(97.0);

        let from_map = Performance::new(&map).calculate(&settings).unwrap();

        let attrs = settings.difficulty.calculate(&map).unwrap();
        let from_attrs = Performance::from_attributes(attrs).calculate(&settings).unwrap();

        assert_eq!(from_map, from_attrs);
    }

    #[test]
    fn state_takes_precedence() {
        let map = map(GameMode::Taiko, 40);

        let state = ScoreState {
            max_combo: 40,
            n300: 30,
            n100: 10,
            n50: 0,
            misses: 0,
        };

        let settings = PerformanceSettings::new().accuracy(50.0).state(state);
        let generated = Performance::new(&map).generate_state(&settings).unwrap();

        assert_eq!(generated, state);
    }

    #[test]
    fn invalid_clock_rate() {
        let map = map(GameMode::Osu, 10);
        let settings = PerformanceSettings::new().clock_rate(0.0);

        assert_eq!(
            Performance::new(&map).calculate(&settings),
            Err(CalculateError::InvalidClockRate(0.0))
        );
    }
}
