use rosu_map::section::general::GameMode;

use crate::{
    any::{CalculateError, DifficultyAttributes},
    osu::OsuGradualDifficulty,
    taiko::TaikoGradualDifficulty,
    Beatmap, Difficulty,
};

/// Gradually calculate the difficulty attributes on maps of any mode.
///
/// Note that this type implements [`Iterator`]. On every call of
/// [`Iterator::next`], the next object will be processed and the
/// [`DifficultyAttributes`] will be updated and returned.
///
/// If you want to calculate performance attributes, use [`GradualPerformance`] instead.
///
/// # Example
///
/// ```
/// use strain_pp::{Beatmap, Difficulty, GameMods, GradualDifficulty};
/// use strain_pp::model::hit_object::{HitObject, Pos};
///
/// let map = Beatmap {
///     hit_objects: (0..10)
///         .map(|i| HitObject::circle(Pos::new(64.0 * (i % 4) as f32, 192.0), 250.0 * f64::from(i)))
///         .collect(),
///     ..Default::default()
/// };
///
/// let difficulty = Difficulty::new().mods(GameMods::DT);
/// let mut iter = GradualDifficulty::new(difficulty, &map).unwrap();
///
/// // the difficulty of the map after the first object
/// let attrs1 = iter.next();
/// // ... after the second object
/// let attrs2 = iter.next();
///
/// // Remaining objects
/// for attrs in iter {
///     println!("{}", attrs.stars());
/// }
/// ```
///
/// [`GradualPerformance`]: crate::GradualPerformance
#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum GradualDifficulty {
    Osu(OsuGradualDifficulty),
    Taiko(TaikoGradualDifficulty),
}

impl GradualDifficulty {
    /// Create a [`GradualDifficulty`] for a map of any mode.
    ///
    /// Returns [`CalculateError::UnsupportedMode`] for modes without a
    /// difficulty model.
    pub fn new(difficulty: Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        match map.mode {
            GameMode::Osu => OsuGradualDifficulty::new(difficulty, map).map(Self::Osu),
            GameMode::Taiko => TaikoGradualDifficulty::new(difficulty, map).map(Self::Taiko),
            mode @ (GameMode::Catch | GameMode::Mania) => {
                Err(CalculateError::UnsupportedMode(mode))
            }
        }
    }

    /// Return the attributes after the object at the zero-based `index`.
    ///
    /// Jumping behind the current position rebuilds the state from the
    /// start of the map. Returns `None` if `index` is out of bounds.
    pub fn jump_to(&mut self, index: usize) -> Option<DifficultyAttributes> {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.jump_to(index).map(DifficultyAttributes::Osu),
            GradualDifficulty::Taiko(gradual) => {
                gradual.jump_to(index).map(DifficultyAttributes::Taiko)
            }
        }
    }

    /// The total amount of objects.
    pub fn n_objects(&self) -> usize {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.n_objects(),
            GradualDifficulty::Taiko(gradual) => gradual.n_objects(),
        }
    }
}

impl Iterator for GradualDifficulty {
    type Item = DifficultyAttributes;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.next().map(DifficultyAttributes::Osu),
            GradualDifficulty::Taiko(gradual) => gradual.next().map(DifficultyAttributes::Taiko),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.size_hint(),
            GradualDifficulty::Taiko(gradual) => gradual.size_hint(),
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.nth(n).map(DifficultyAttributes::Osu),
            GradualDifficulty::Taiko(gradual) => gradual.nth(n).map(DifficultyAttributes::Taiko),
        }
    }

    fn last(self) -> Option<Self::Item> {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.last().map(DifficultyAttributes::Osu),
            GradualDifficulty::Taiko(gradual) => gradual.last().map(DifficultyAttributes::Taiko),
        }
    }
}

impl ExactSizeIterator for GradualDifficulty {
    fn len(&self) -> usize {
        match self {
            GradualDifficulty::Osu(gradual) => gradual.len(),
            GradualDifficulty::Taiko(gradual) => gradual.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::{HitObject, Pos};

    use super::*;

    #[test]
    fn dispatches_on_mode() {
        let mut map = Beatmap {
            hit_objects: vec![
                HitObject::circle(Pos::default(), 0.0),
                HitObject::circle(Pos::default(), 300.0),
            ],
            ..Default::default()
        };

        let gradual = GradualDifficulty::new(Difficulty::new(), &map).unwrap();
        assert!(matches!(gradual, GradualDifficulty::Osu(_)));
        assert_eq!(gradual.len(), 2);

        map.mode = GameMode::Taiko;
        let mut gradual = GradualDifficulty::new(Difficulty::new(), &map).unwrap();
        assert!(matches!(gradual.next(), Some(DifficultyAttributes::Taiko(_))));
        assert_eq!(gradual.len(), 1);

        map.mode = GameMode::Mania;
        assert_eq!(
            GradualDifficulty::new(Difficulty::new(), &map).err(),
            Some(CalculateError::UnsupportedMode(GameMode::Mania))
        );
    }
}
