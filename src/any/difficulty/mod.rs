use rosu_map::section::general::GameMode;

use crate::{
    model::{beatmap::Beatmap, mods::GameMods},
    osu, taiko,
};

use self::gradual::GradualDifficulty;

use super::{
    attributes::DifficultyAttributes, error::CalculateError,
    performance::gradual::GradualPerformance, strains::Strains,
};

pub mod gradual;

/// Difficulty calculation settings for maps of any mode.
///
/// All fields are optional overrides; unset fields fall back to the map's
/// values and the clock rate implied by mods.
///
/// # Example
///
/// ```
/// use strain_pp::{Beatmap, Difficulty, GameMods};
///
/// let map = Beatmap::default();
///
/// let attrs = Difficulty::new()
///     .mods(GameMods::HD | GameMods::DT)
///     .ar(9.5, false)
///     .calculate(&map)
///     .unwrap();
///
/// assert!(attrs.stars().abs() < f64::EPSILON);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Difficulty {
    /// Specify mods.
    pub mods: GameMods,
    /// Amount of passed objects for partial plays, e.g. a fail.
    pub passed_objects: Option<u32>,
    /// Adjust the clock rate used in the calculation.
    pub clock_rate: Option<f64>,
    /// Override a beatmap's set AR.
    ///
    /// Only relevant for osu!standard.
    pub ar: Option<ModsDependent>,
    /// Override a beatmap's set CS.
    ///
    /// Only relevant for osu!standard.
    pub cs: Option<ModsDependent>,
    /// Override a beatmap's set HP.
    pub hp: Option<ModsDependent>,
    /// Override a beatmap's set OD.
    pub od: Option<ModsDependent>,
}

/// A difficulty setting that may or may not be adjusted by mods.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModsDependent {
    pub value: f32,
    /// On `true` the value is used as is, otherwise mods still adjust it.
    pub with_mods: bool,
}

impl ModsDependent {
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            with_mods: false,
        }
    }
}

impl Difficulty {
    /// Create a new difficulty calculator without any settings.
    pub const fn new() -> Self {
        Self {
            mods: GameMods::NM,
            passed_objects: None,
            clock_rate: None,
            ar: None,
            cs: None,
            hp: None,
            od: None,
        }
    }

    /// Specify mods.
    pub fn mods(self, mods: impl Into<GameMods>) -> Self {
        Self {
            mods: mods.into(),
            ..self
        }
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    ///
    /// The value must be finite and positive, otherwise the calculation
    /// fails with [`CalculateError::InvalidClockRate`].
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Override a beatmap's set AR.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn ar(mut self, ar: f32, with_mods: bool) -> Self {
        self.ar = Some(ModsDependent { value: ar, with_mods });

        self
    }

    /// Override a beatmap's set CS.
    ///
    /// See [`Difficulty::ar`] for `with_mods`.
    pub const fn cs(mut self, cs: f32, with_mods: bool) -> Self {
        self.cs = Some(ModsDependent { value: cs, with_mods });

        self
    }

    /// Override a beatmap's set HP.
    ///
    /// See [`Difficulty::ar`] for `with_mods`.
    pub const fn hp(mut self, hp: f32, with_mods: bool) -> Self {
        self.hp = Some(ModsDependent { value: hp, with_mods });

        self
    }

    /// Override a beatmap's set OD.
    ///
    /// See [`Difficulty::ar`] for `with_mods`.
    pub const fn od(mut self, od: f32, with_mods: bool) -> Self {
        self.od = Some(ModsDependent { value: od, with_mods });

        self
    }

    /// The clock rate, either the custom one or the one implied by mods.
    pub fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    /// The amount of objects to consider out of `n_objects`.
    pub(crate) fn get_passed_objects(&self, n_objects: usize) -> usize {
        let Some(passed_objects) = self.passed_objects else {
            return n_objects;
        };

        let passed_objects = passed_objects as usize;

        if passed_objects > n_objects {
            tracing::debug!(passed_objects, n_objects, "clamping passed objects");
        }

        passed_objects.min(n_objects)
    }

    /// Perform the difficulty calculation.
    ///
    /// The returned attributes depend on the map's mode.
    pub fn calculate(&self, map: &Beatmap) -> Result<DifficultyAttributes, CalculateError> {
        match map.mode {
            GameMode::Osu => osu::difficulty::difficulty(self, map).map(DifficultyAttributes::Osu),
            GameMode::Taiko => {
                taiko::difficulty::difficulty(self, map).map(DifficultyAttributes::Taiko)
            }
            mode => Err(CalculateError::UnsupportedMode(mode)),
        }
    }

    /// Perform the difficulty calculation but instead of evaluating the skill
    /// strains, return them as is.
    ///
    /// Suitable to plot the difficulty of a map over time.
    pub fn strains(&self, map: &Beatmap) -> Result<Strains, CalculateError> {
        match map.mode {
            GameMode::Osu => osu::strains::strains(self, map).map(Strains::Osu),
            GameMode::Taiko => taiko::strains::strains(self, map).map(Strains::Taiko),
            mode => Err(CalculateError::UnsupportedMode(mode)),
        }
    }

    /// Create a gradual difficulty calculator for the given map.
    pub fn gradual_difficulty(self, map: &Beatmap) -> Result<GradualDifficulty, CalculateError> {
        GradualDifficulty::new(self, map)
    }

    /// Create a gradual performance calculator for the given map.
    pub fn gradual_performance(self, map: &Beatmap) -> Result<GradualPerformance, CalculateError> {
        GradualPerformance::new(self, map)
    }
}
