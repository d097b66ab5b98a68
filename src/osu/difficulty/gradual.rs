use crate::{
    any::{CalculateError, Difficulty},
    model::{beatmap::Beatmap, mods::GameMods},
    osu::{attributes::OsuDifficultyAttributes, object::OsuObject},
};

use super::{object::OsuDifficultyObject, skills::OsuSkills, DifficultyValues, OsuDifficultySetup};

/// Gradually calculate the difficulty attributes of an osu!standard map.
///
/// Note that this struct implements [`Iterator`].
/// On every call of [`Iterator::next`], the map's next hit object will
/// be processed and the [`OsuDifficultyAttributes`] will be updated and
/// returned.
///
/// The attributes after `n` objects are equal to the attributes of a regular
/// calculation with `n` passed objects.
///
/// If you want to calculate performance attributes, use
/// [`OsuGradualPerformance`] instead.
///
/// # Example
///
/// ```
/// use strain_pp::{Beatmap, Difficulty, GameMods};
/// use strain_pp::osu::OsuGradualDifficulty;
///
/// let map = Beatmap::default();
///
/// let difficulty = Difficulty::new().mods(GameMods::DT);
/// let mut iter = OsuGradualDifficulty::new(difficulty, &map).unwrap();
///
/// // the map is empty so there are no attributes
/// assert!(iter.next().is_none());
/// ```
///
/// [`OsuGradualPerformance`]: crate::osu::OsuGradualPerformance
#[derive(Clone, Debug)]
pub struct OsuGradualDifficulty {
    /// Amount of processed objects.
    pub(crate) idx: usize,
    mods: GameMods,
    initial_attrs: OsuDifficultyAttributes,
    attrs: OsuDifficultyAttributes,
    first_object_time: f64,
    skills: OsuSkills,
    objects: Box<[OsuObject]>,
    diff_objects: Box<[OsuDifficultyObject]>,
}

impl OsuGradualDifficulty {
    /// Create a new difficulty attributes iterator for osu!standard maps.
    ///
    /// The amount of passed objects of the [`Difficulty`] is ignored.
    pub fn new(difficulty: Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        let setup = OsuDifficultySetup::new(&difficulty, map)?;
        let objects = setup.convert_objects(&map.hit_objects);

        let diff_objects =
            OsuDifficultyObject::create(&objects, setup.clock_rate, &setup.scaling_factor)
                .into_boxed_slice();

        let first_object_time = setup.first_object_time(&objects);

        Ok(Self {
            idx: 0,
            mods: setup.mods,
            initial_attrs: setup.attrs.clone(),
            attrs: setup.attrs,
            first_object_time,
            skills: OsuSkills::new(first_object_time),
            objects,
            diff_objects,
        })
    }

    /// Process the next object without evaluating the skills.
    fn step(&mut self) -> bool {
        let Some(h) = self.objects.get(self.idx) else {
            return false;
        };

        // The first object has no difficulty object
        if let Some(diff_object) = self.idx.checked_sub(1).map(|i| &self.diff_objects[i]) {
            self.skills.process(diff_object);
        }

        self.attrs.add_object(h);
        self.idx += 1;

        true
    }

    fn evaluate(&self) -> OsuDifficultyAttributes {
        let mut attrs = self.attrs.clone();
        DifficultyValues::eval(&mut attrs, &self.skills, self.mods, &self.objects[..self.idx]);

        attrs
    }

    fn reset(&mut self) {
        self.idx = 0;
        self.attrs = self.initial_attrs.clone();
        self.skills = OsuSkills::new(self.first_object_time);
    }

    /// Return the attributes after the object at the zero-based `index`,
    /// i.e. after `index + 1` objects.
    ///
    /// Jumping behind the current position rebuilds the state from the
    /// start of the map.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn jump_to(&mut self, index: usize) -> Option<OsuDifficultyAttributes> {
        if index >= self.objects.len() {
            return None;
        }

        if index < self.idx {
            self.reset();
        }

        while self.idx <= index {
            self.step();
        }

        Some(self.evaluate())
    }

    /// Process all remaining objects and return the final attributes.
    ///
    /// Returns `None` if all objects were already processed.
    #[allow(clippy::should_implement_trait)]
    pub fn last(mut self) -> Option<OsuDifficultyAttributes> {
        self.last_mut()
    }

    pub(crate) fn last_mut(&mut self) -> Option<OsuDifficultyAttributes> {
        let remaining = self.len();

        if remaining == 0 {
            return None;
        }

        self.nth(remaining - 1)
    }

    /// The total amount of objects.
    pub fn n_objects(&self) -> usize {
        self.objects.len()
    }
}

impl Iterator for OsuGradualDifficulty {
    type Item = OsuDifficultyAttributes;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().then(|| self.evaluate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        for _ in 0..n {
            if !self.step() {
                return None;
            }
        }

        self.next()
    }
}

impl ExactSizeIterator for OsuGradualDifficulty {
    fn len(&self) -> usize {
        self.objects.len() - self.idx
    }
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use crate::{
        model::hit_object::{HitObject, Slider},
        osu::difficulty::difficulty,
    };

    use super::*;

    fn map() -> Beatmap {
        let hit_objects = (0..30)
            .map(|i| {
                let start_time = 500.0 + f64::from(i) * 180.0;
                let pos = Pos::new(100.0 + (i % 5) as f32 * 70.0, 80.0 + (i % 3) as f32 * 90.0);

                match i % 7 {
                    3 => HitObject::slider(
                        pos,
                        start_time,
                        Slider {
                            pixel_len: 160.0,
                            repeats: 1,
                            end_pos: Pos::new(pos.x, pos.y + 150.0),
                            duration: 170.0,
                            velocity: 1.0,
                        },
                    ),
                    6 => HitObject::spinner(Pos::new(256.0, 192.0), start_time, 100.0),
                    _ => HitObject::circle(pos, start_time),
                }
            })
            .collect();

        Beatmap {
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn empty() {
        let map = Beatmap::default();
        let mut gradual = OsuGradualDifficulty::new(Difficulty::new(), &map).unwrap();

        assert!(gradual.next().is_none());
        assert!(gradual.jump_to(0).is_none());
    }

    #[test]
    fn next_and_nth() {
        let map = map();
        let settings = Difficulty::new().mods(GameMods::HR | GameMods::DT);

        let mut gradual = OsuGradualDifficulty::new(settings.clone(), &map).unwrap();
        let mut gradual_2nd = OsuGradualDifficulty::new(settings.clone(), &map).unwrap();
        let mut gradual_3rd = OsuGradualDifficulty::new(settings.clone(), &map).unwrap();

        for i in 1.. {
            let Some(next_gradual) = gradual.next() else {
                assert_eq!(i, map.hit_objects.len() + 1);
                assert!(gradual_2nd.last_mut().is_some() || map.hit_objects.len() % 2 == 0);
                assert!(gradual_3rd.last_mut().is_some() || map.hit_objects.len() % 3 == 0);
                break;
            };

            if i % 2 == 0 {
                let next_gradual_2nd = gradual_2nd.nth(1).unwrap();
                assert_eq!(next_gradual, next_gradual_2nd, "i={i}");
            }

            if i % 3 == 0 {
                let next_gradual_3rd = gradual_3rd.nth(2).unwrap();
                assert_eq!(next_gradual, next_gradual_3rd, "i={i}");
            }

            let expected = difficulty(&settings.clone().passed_objects(i as u32), &map).unwrap();

            assert_eq!(next_gradual, expected, "i={i}");
        }
    }

    #[test]
    fn jump_forward_and_back() {
        let map = map();
        let mut gradual = OsuGradualDifficulty::new(Difficulty::new(), &map).unwrap();

        let at_20 = gradual.jump_to(20).unwrap();
        let at_5 = gradual.jump_to(5).unwrap();
        let at_20_again = gradual.jump_to(20).unwrap();

        assert_eq!(at_20, at_20_again);
        assert_eq!(
            at_5,
            difficulty(&Difficulty::new().passed_objects(6), &map).unwrap()
        );
        assert!(gradual.jump_to(map.hit_objects.len()).is_none());
    }

    #[test]
    fn last_equals_regular() {
        let map = map();
        let gradual = OsuGradualDifficulty::new(Difficulty::new(), &map).unwrap();
        let regular = difficulty(&Difficulty::new(), &map).unwrap();

        assert_eq!(gradual.last(), Some(regular));
    }
}
