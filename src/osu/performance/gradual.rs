use crate::{
    any::{CalculateError, PerformanceSettings, ScoreState},
    osu::{OsuDifficultyAttributes, OsuGradualDifficulty},
    Beatmap, Difficulty,
};

use super::{OsuPerformance, OsuPerformanceAttributes};

/// Gradually calculate the performance attributes of an osu!standard map.
///
/// After each hit object you can call [`next`]
/// and it will return the resulting current [`OsuPerformanceAttributes`].
/// To process multiple objects at once, use [`nth`] instead.
///
/// Both methods require a [`ScoreState`] that contains the current
/// hitresults as well as the maximum combo so far. The calculator itself
/// only keeps track of the amount of processed objects.
///
/// If you only want to calculate difficulty attributes use
/// [`OsuGradualDifficulty`] instead.
///
/// # Example
///
/// ```
/// use strain_pp::{Beatmap, Difficulty, GameMods, ScoreState};
/// use strain_pp::model::hit_object::HitObject;
/// use strain_pp::osu::OsuGradualPerformance;
/// use rosu_map::util::Pos;
///
/// let map = Beatmap {
///     hit_objects: (0..30)
///         .map(|i| HitObject::circle(Pos::new(100.0, 100.0), 1000.0 + 300.0 * f64::from(i)))
///         .collect(),
///     ..Default::default()
/// };
///
/// let difficulty = Difficulty::new().mods(GameMods::DT);
/// let mut gradual = OsuGradualPerformance::new(difficulty, &map).unwrap();
/// let mut state = ScoreState::new(); // empty state, everything is on 0.
///
/// // The first 10 hits are 300s
/// for _ in 0..10 {
///     state.n300 += 1;
///     state.max_combo += 1;
///
///     let attrs = gradual.next(state).unwrap();
///     println!("PP: {}", attrs.pp);
/// }
///
/// // Then comes a miss. Note that state's max combo won't be incremented for
/// // the next few objects because the combo is reset.
/// state.misses += 1;
/// let attrs = gradual.next(state).unwrap();
/// println!("PP: {}", attrs.pp);
///
/// // The next 10 objects will be a mixture of 300s, 100s, and 50s.
/// // Notice how all 10 objects will be processed in one go.
/// state.n300 += 2;
/// state.n100 += 7;
/// state.n50 += 1;
/// // The `nth` method takes a zero-based value.
/// let attrs = gradual.nth(state, 9).unwrap();
/// println!("PP: {}", attrs.pp);
///
/// // Skip to the end
/// state.n300 += 9;
/// let attrs = gradual.last(state).unwrap();
/// println!("PP: {}", attrs.pp);
///
/// // Once the final performance has been calculated, attempting to process
/// // further objects will return `None`.
/// assert!(gradual.next(state).is_none());
/// ```
///
/// [`next`]: OsuGradualPerformance::next
/// [`nth`]: OsuGradualPerformance::nth
#[derive(Clone, Debug)]
pub struct OsuGradualPerformance {
    difficulty: Difficulty,
    gradual: OsuGradualDifficulty,
}

impl OsuGradualPerformance {
    /// Create a new gradual performance calculator for osu!standard maps.
    pub fn new(difficulty: Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        let gradual = OsuGradualDifficulty::new(difficulty.clone(), map)?;

        Ok(Self {
            difficulty,
            gradual,
        })
    }

    /// Process the next hit object and calculate the performance attributes
    /// for the resulting score state.
    pub fn next(&mut self, state: ScoreState) -> Option<OsuPerformanceAttributes> {
        self.nth(state, 0)
    }

    /// Process all remaining hit objects and calculate the final performance
    /// attributes.
    pub fn last(&mut self, state: ScoreState) -> Option<OsuPerformanceAttributes> {
        let attrs = self.gradual.last_mut()?;

        Some(self.evaluate(attrs, state))
    }

    /// Process everything up to the next `n`th hitobject and calculate the
    /// performance attributes for the resulting score state.
    ///
    /// Note that the count is zero-indexed, so `n=0` will process 1 object,
    /// `n=1` will process 2, and so on.
    pub fn nth(&mut self, state: ScoreState, n: usize) -> Option<OsuPerformanceAttributes> {
        let attrs = self.gradual.nth(n)?;

        Some(self.evaluate(attrs, state))
    }

    /// Calculate the performance attributes after the object at the
    /// zero-based `index`.
    ///
    /// Jumping behind the current position is supported but requires
    /// processing all objects up to `index` again.
    pub fn jump_to(&mut self, state: ScoreState, index: usize) -> Option<OsuPerformanceAttributes> {
        let attrs = self.gradual.jump_to(index)?;

        Some(self.evaluate(attrs, state))
    }

    /// Calculate the performance attributes of the full map for each of the
    /// given accuracies.
    ///
    /// Misses and combo are taken from `state`, its hitresults are generated
    /// from the accuracies. The current position is not affected.
    pub fn accuracies(
        &self,
        state: ScoreState,
        accuracies: &[f64],
    ) -> Result<Vec<OsuPerformanceAttributes>, CalculateError> {
        let last_idx = self.gradual.n_objects().checked_sub(1);
        let attrs = last_idx
            .and_then(|idx| self.gradual.clone().jump_to(idx))
            .ok_or(CalculateError::MissingAttributes)?;

        let performance = OsuPerformance::new(attrs);

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
        attrs: OsuDifficultyAttributes,
        state: ScoreState,
    ) -> OsuPerformanceAttributes {
        let mut difficulty = self.difficulty.clone();

        // Partial plays only until the last object was processed
        difficulty.passed_objects = (self.gradual.len() > 0).then_some(self.gradual.idx as u32);

        let settings = PerformanceSettings::new()
            .difficulty(difficulty)
            .state(state);

        OsuPerformance::new(attrs).calculate(&settings)
    }
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use crate::{
        model::{
            hit_object::{HitObject, Slider},
            mods::GameMods,
        },
        Performance, PerformanceAttributes,
    };

    use super::*;

    fn map() -> Beatmap {
        let hit_objects = (0..40)
            .map(|i| {
                let start_time = 700.0 + f64::from(i) * 210.0;
                let pos = Pos::new(80.0 + (i % 6) as f32 * 60.0, 100.0 + (i % 4) as f32 * 50.0);

                if i % 6 == 2 {
                    HitObject::slider(
                        pos,
                        start_time,
                        Slider {
                            pixel_len: 120.0,
                            repeats: 0,
                            end_pos: Pos::new(pos.x + 120.0, pos.y),
                            duration: 140.0,
                            velocity: 1.0,
                        },
                    )
                } else {
                    HitObject::circle(pos, start_time)
                }
            })
            .collect();

        Beatmap {
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn next_and_nth() {
        let map = map();
        let difficulty = Difficulty::new().mods(GameMods::HD | GameMods::HR | GameMods::DT);

        let mut gradual = OsuGradualPerformance::new(difficulty.clone(), &map).unwrap();
        let mut gradual_2nd = OsuGradualPerformance::new(difficulty.clone(), &map).unwrap();
        let mut gradual_3rd = OsuGradualPerformance::new(difficulty.clone(), &map).unwrap();

        let mut state = ScoreState::default();

        let hit_objects_len = map.hit_objects.len();

        for i in 1.. {
            state.misses += 1;

            let Some(next_gradual) = gradual.next(state) else {
                assert_eq!(i, hit_objects_len + 1);
                assert!(gradual_2nd.last(state).is_some() || hit_objects_len % 2 == 0);
                assert!(gradual_3rd.last(state).is_some() || hit_objects_len % 3 == 0);
                break;
            };

            if i % 2 == 0 {
                let next_gradual_2nd = gradual_2nd.nth(state, 1).unwrap();
                assert_eq!(next_gradual, next_gradual_2nd);
            }

            if i % 3 == 0 {
                let next_gradual_3rd = gradual_3rd.nth(state, 2).unwrap();
                assert_eq!(next_gradual, next_gradual_3rd);
            }

            let settings = PerformanceSettings::new()
                .difficulty(difficulty.clone().passed_objects(i as u32))
                .state(state);

            let regular = Performance::new(&map);
            assert_eq!(regular.generate_state(&settings).unwrap(), state);

            let expected = regular.calculate(&settings).unwrap();

            assert_eq!(PerformanceAttributes::Osu(next_gradual), expected);
        }
    }

    #[test]
    fn last_equals_regular() {
        let map = map();
        let difficulty = Difficulty::new().mods(GameMods::HD);
        let max_combo = map.difficulty(&difficulty).unwrap().max_combo();

        let state = ScoreState {
            max_combo,
            n300: map.hit_objects.len() as u32,
            ..Default::default()
        };

        let mut gradual = OsuGradualPerformance::new(difficulty.clone(), &map).unwrap();
        let last = gradual.last(state).unwrap();

        let settings = PerformanceSettings::new().difficulty(difficulty).state(state);
        let regular = Performance::new(&map).calculate(&settings).unwrap();

        assert_eq!(PerformanceAttributes::Osu(last), regular);
    }

    #[test]
    fn accuracies_use_full_map() {
        let map = map();
        let mut gradual = OsuGradualPerformance::new(Difficulty::new(), &map).unwrap();
        gradual.nth(ScoreState::new(), 4);

        let batch = gradual.accuracies(ScoreState::new(), &[95.0, 99.0]).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch[0].pp < batch[1].pp);

        let settings = PerformanceSettings::new().combo(0).misses(0).accuracy(99.0);
        let regular = Performance::new(&map).calculate(&settings).unwrap();

        assert_eq!(PerformanceAttributes::Osu(batch[1].clone()), regular);
        assert_eq!(gradual.len(), map.hit_objects.len() - 5);
    }

    #[test]
    fn jump_back() {
        let map = map();
        let mut gradual = OsuGradualPerformance::new(Difficulty::new(), &map).unwrap();

        let state = ScoreState {
            max_combo: 5,
            n300: 6,
            ..Default::default()
        };

        let first = gradual.jump_to(state, 5).unwrap();
        gradual.jump_to(state, 30).unwrap();
        let again = gradual.jump_to(state, 5).unwrap();

        assert_eq!(first, again);
        assert!(gradual.jump_to(state, map.hit_objects.len()).is_none());

        let empty = Beatmap::default();
        let gradual = OsuGradualPerformance::new(Difficulty::new(), &empty).unwrap();

        assert_eq!(
            gradual.accuracies(state, &[100.0]),
            Err(CalculateError::MissingAttributes)
        );
    }
}
