use crate::{
    any::{CalculateError, Difficulty},
    model::beatmap::Beatmap,
    taiko::{attributes::TaikoDifficultyAttributes, object::TaikoObject},
};

use super::{
    object::TaikoDifficultyObject, skills::strain::TaikoStrainSkill, DifficultyValues,
    TaikoDifficultySetup,
};

/// Gradually calculate the difficulty attributes of an osu!taiko map.
///
/// Note that this struct implements [`Iterator`].
/// On every call of [`Iterator::next`], the map's next hit object will
/// be processed and the [`TaikoDifficultyAttributes`] will be updated and
/// returned.
///
/// If you want to calculate performance attributes, use
/// [`TaikoGradualPerformance`] instead.
///
/// [`TaikoGradualPerformance`]: crate::taiko::TaikoGradualPerformance
#[derive(Clone, Debug)]
pub struct TaikoGradualDifficulty {
    pub(crate) idx: usize,
    initial_attrs: TaikoDifficultyAttributes,
    attrs: TaikoDifficultyAttributes,
    first_object_time: f64,
    skill: TaikoStrainSkill,
    objects: Box<[TaikoObject]>,
    diff_objects: Box<[TaikoDifficultyObject]>,
}

impl TaikoGradualDifficulty {
    /// Create a new difficulty attributes iterator for osu!taiko maps.
    ///
    /// The amount of passed objects of the [`Difficulty`] is ignored.
    pub fn new(difficulty: Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        let setup = TaikoDifficultySetup::new(&difficulty, map)?;
        let objects = TaikoDifficultySetup::convert_objects(&map.hit_objects);

        let diff_objects =
            TaikoDifficultyObject::create(&objects, setup.clock_rate).into_boxed_slice();

        let first_object_time = setup.first_object_time(&objects);

        Ok(Self {
            idx: 0,
            initial_attrs: setup.attrs.clone(),
            attrs: setup.attrs,
            first_object_time,
            skill: TaikoStrainSkill::new(first_object_time),
            objects,
            diff_objects,
        })
    }

    fn step(&mut self) -> bool {
        let Some(h) = self.objects.get(self.idx) else {
            return false;
        };

        if let Some(diff_object) = self.idx.checked_sub(1).map(|i| &self.diff_objects[i]) {
            self.skill.process(diff_object);
        }

        self.attrs.add_object(h.is_hit());
        self.idx += 1;

        true
    }

    fn evaluate(&self) -> TaikoDifficultyAttributes {
        let mut attrs = self.attrs.clone();
        DifficultyValues::eval(&mut attrs, &self.skill, &self.objects[..self.idx]);

        attrs
    }

    fn reset(&mut self) {
        self.idx = 0;
        self.attrs = self.initial_attrs.clone();
        self.skill = TaikoStrainSkill::new(self.first_object_time);
    }

    /// Return the attributes after the object at the zero-based `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn jump_to(&mut self, index: usize) -> Option<TaikoDifficultyAttributes> {
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
    #[allow(clippy::should_implement_trait)]
    pub fn last(mut self) -> Option<TaikoDifficultyAttributes> {
        self.last_mut()
    }

    pub(crate) fn last_mut(&mut self) -> Option<TaikoDifficultyAttributes> {
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

impl Iterator for TaikoGradualDifficulty {
    type Item = TaikoDifficultyAttributes;

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

impl ExactSizeIterator for TaikoGradualDifficulty {
    fn len(&self) -> usize {
        self.objects.len() - self.idx
    }
}
