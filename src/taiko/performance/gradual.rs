use crate::{
    any::{CalculateError, PerformanceSettings, ScoreState},
    taiko::{TaikoDifficultyAttributes, TaikoGradualDifficulty},
    Beatmap, Difficulty,
};

use super::{TaikoPerformance, TaikoPerformanceAttributes};

/// Gradually calculate the performance attributes of an osu!taiko map.
///
/// After each hit object you can call [`next`] and it will return the
/// resulting current [`TaikoPerformanceAttributes`]. To process multiple
/// objects at once, use [`nth`] instead.
///
/// Both methods require a [`ScoreState`] that contains the current
/// hitresults as well as the maximum combo so far. Note that `n100` holds
/// the amount of 150s and `n50` is ignored.
///
/// If you only want to calculate difficulty attributes use
/// [`TaikoGradualDifficulty`] instead.
///
/// [`next`]: TaikoGradualPerformance::next
/// [`nth`]: TaikoGradualPerformance::nth
#[derive(Clone, Debug)]
pub struct TaikoGradualPerformance {
    difficulty: Difficulty,
    gradual: TaikoGradualDifficulty,
}

impl TaikoGradualPerformance {
    /// Create a new gradual performance calculator for osu!taiko maps.
    pub fn new(difficulty: Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        let gradual = TaikoGradualDifficulty::new(difficulty.clone(), map)?;

        Ok(Self {
            difficulty,
            gradual,
        })
    }

    /// Process the next hit object and calculate the performance attributes
    /// for the resulting score state.
    pub fn next(&mut self, state: ScoreState) -> Option<TaikoPerformanceAttributes> {
        self.nth(state, 0)
    }

    /// Process all remaining hit objects and calculate the final performance
    /// attributes.
    pub fn last(&mut self, state: ScoreState) -> Option<TaikoPerformanceAttributes> {
        let attrs = self.gradual.last_mut()?;

        Some(self.evaluate(attrs, state))
    }

    /// Process everything up to the next `n`th hitobject and calculate the
    /// performance attributes for the resulting score state.
    ///
    /// Note that the count is zero-indexed, so `n=0` will process 1 object,
    /// `n=1` will process 2, and so on.
    pub fn nth(&mut self, state: ScoreState, n: usize) -> Option<TaikoPerformanceAttributes> {
        let attrs = self.gradual.nth(n)?;

        Some(self.evaluate(attrs, state))
    }

    /// Calculate the performance attributes after the object at the
    /// zero-based `index`.
    pub fn jump_to(
        &mut self,
        state: ScoreState,
        index: usize,
    ) -> Option<TaikoPerformanceAttributes> {
        let attrs = self.gradual.jump_to(index)?;

        Some(self.evaluate(attrs, state))
    }

    /// Calculate the performance attributes of the full map for each of the
    /// given accuracies.
    ///
    /// Misses and combo are taken from `state`. The current position is not
    /// affected.
    pub fn accuracies(
        &self,
        state: ScoreState,
        accuracies: &[f64],
    ) -> Result<Vec<TaikoPerformanceAttributes>, CalculateError> {
        let attrs = self
            .gradual
            .n_objects()
            .checked_sub(1)
            .and_then(|idx| self.gradual.clone().jump_to(idx))
            .ok_or(CalculateError::MissingAttributes)?;

        let performance = TaikoPerformance::new(attrs);

        let attrs = accuracies
            .iter()
            .map(|&acc| {
                let settings = PerformanceSettings::new()
                    .difficulty(self.difficulty.clone())
                    .combo(state.max_combo)
                    .misses(state.misses)
                    .accuracy(acc);

                performance.calculate(&settings)
            })
            .collect();

        Ok(attrs)
    }

    /// Returns the amount of remaining objects.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.gradual.len()
    }

    fn evaluate(
        &self,
        attrs: TaikoDifficultyAttributes,
        state: ScoreState,
    ) -> TaikoPerformanceAttributes {
        let mut difficulty = self.difficulty.clone();
        difficulty.passed_objects = (self.gradual.len() > 0).then_some(self.gradual.idx as u32);

        let settings = PerformanceSettings::new()
            .difficulty(difficulty)
            .state(state);

        TaikoPerformance::new(attrs).calculate(&settings)
    }
}
