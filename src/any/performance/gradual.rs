use rosu_map::section::general::GameMode;

use crate::{
    any::{CalculateError, PerformanceAttributes, ScoreState},
    osu::OsuGradualPerformance,
    taiko::TaikoGradualPerformance,
    Beatmap, Difficulty,
};

/// Gradually calculate the performance attributes on maps of any mode.
///
/// After each hit object you can call [`next`] and it will return the
/// resulting current [`PerformanceAttributes`]. To process multiple objects
/// at once, use [`nth`] instead.
///
/// Both methods require a [`ScoreState`] that contains the current
/// hitresults as well as the maximum combo so far. The calculator itself only
/// keeps track of the amount of processed objects.
///
/// If you only want to calculate difficulty attributes use
/// [`GradualDifficulty`] instead.
///
/// # Example
///
/// ```
/// use strain_pp::{Beatmap, Difficulty, GameMods, GradualPerformance, ScoreState};
/// use strain_pp::model::hit_object::{HitObject, Pos};
///
/// let map = Beatmap {
///     hit_objects: (0..20)
///         .map(|i| HitObject::circle(Pos::new(100.0, 100.0 + 10.0 * i as f32), 300.0 * f64::from(i)))
///         .collect(),
///     ..Default::default()
/// };
///
/// let difficulty = Difficulty::new().mods(GameMods::HD | GameMods::DT);
/// let mut gradual = GradualPerformance::new(difficulty, &map).unwrap();
/// let mut state = ScoreState::new();
///
/// // The first 10 hits are 300s
/// for _ in 0..10 {
///     state.n300 += 1;
///     state.max_combo += 1;
///
///     let attrs = gradual.next(state).unwrap();
///     println!("PP: {}", attrs.pp());
/// }
///
/// // Then comes a miss.
/// state.misses += 1;
/// let attrs = gradual.next(state).unwrap();
/// println!("PP: {}", attrs.pp());
///
/// // Skip to the end
/// state.n300 += 9;
/// let attrs = gradual.last(state).unwrap();
/// println!("PP: {}", attrs.pp());
///
/// // Once the final performance was calculated,
/// // attempting to process further objects will return `None`.
/// assert!(gradual.next(state).is_none());
/// ```
///
/// [`next`]: GradualPerformance::next
/// [`nth`]: GradualPerformance::nth
/// [`GradualDifficulty`]: crate::GradualDifficulty
#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum GradualPerformance {
    Osu(OsuGradualPerformance),
    Taiko(TaikoGradualPerformance),
}

impl GradualPerformance {
    /// Create a [`GradualPerformance`] for a map of any mode.
    ///
    /// Returns [`CalculateError::UnsupportedMode`] for modes without a
    /// difficulty model.
    pub fn new(difficulty: Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        match map.mode {
            GameMode::Osu => OsuGradualPerformance::new(difficulty, map).map(Self::Osu),
            GameMode::Taiko => TaikoGradualPerformance::new(difficulty, map).map(Self::Taiko),
            mode @ (GameMode::Catch | GameMode::Mania) => {
                Err(CalculateError::UnsupportedMode(mode))
            }
        }
    }

    /// Process the next hit object and calculate the performance attributes
    /// for the resulting score state.
    pub fn next(&mut self, state: ScoreState) -> Option<PerformanceAttributes> {
        self.nth(state, 0)
    }

    /// Process all remaining hit objects and calculate the final performance
    /// attributes.
    pub fn last(&mut self, state: ScoreState) -> Option<PerformanceAttributes> {
        match self {
            GradualPerformance::Osu(gradual) => gradual.last(state).map(PerformanceAttributes::Osu),
            GradualPerformance::Taiko(gradual) => {
                gradual.last(state).map(PerformanceAttributes::Taiko)
            }
        }
    }

    /// Process everything up to the next `n`th hit object and calculate the
    /// performance attributes for the resulting score state.
    ///
    /// Note that the count is zero-indexed, so `n=0` will process 1 object,
    /// `n=1` will process 2, and so on.
    pub fn nth(&mut self, state: ScoreState, n: usize) -> Option<PerformanceAttributes> {
        match self {
            GradualPerformance::Osu(gradual) => {
                gradual.nth(state, n).map(PerformanceAttributes::Osu)
            }
            GradualPerformance::Taiko(gradual) => {
                gradual.nth(state, n).map(PerformanceAttributes::Taiko)
            }
        }
    }

    /// Calculate the performance attributes after the object at the
    /// zero-based `index`.
    pub fn jump_to(&mut self, state: ScoreState, index: usize) -> Option<PerformanceAttributes> {
        match self {
            GradualPerformance::Osu(gradual) => {
                gradual.jump_to(state, index).map(PerformanceAttributes::Osu)
            }
            GradualPerformance::Taiko(gradual) => {
                gradual.jump_to(state, index).map(PerformanceAttributes::Taiko)
            }
        }
    }

    /// Calculate the performance attributes of the full map for each of the
    /// given accuracies.
    ///
    /// Returns [`CalculateError::MissingAttributes`] if the map has no
    /// objects.
    pub fn accuracies(
        &self,
        state: ScoreState,
        accuracies: &[f64],
    ) -> Result<Vec<PerformanceAttributes>, CalculateError> {
        match self {
            GradualPerformance::Osu(gradual) => gradual
                .accuracies(state, accuracies)
                .map(|attrs| attrs.into_iter().map(PerformanceAttributes::Osu).collect()),
            GradualPerformance::Taiko(gradual) => gradual
                .accuracies(state, accuracies)
                .map(|attrs| attrs.into_iter().map(PerformanceAttributes::Taiko).collect()),
        }
    }

    /// Returns the amount of remaining objects.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            GradualPerformance::Osu(gradual) => gradual.len(),
            GradualPerformance::Taiko(gradual) => gradual.len(),
        }
    }
}
