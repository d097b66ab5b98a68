use crate::{
    any::{CalculateError, Difficulty, DifficultyAttributes},
    model::beatmap::Beatmap,
};

/// Either a beatmap whose attributes still need to be calculated or
/// previously calculated attributes.
#[derive(Clone, Debug, PartialEq)]
pub enum MapOrAttrs<'map> {
    Map(&'map Beatmap),
    Attrs(DifficultyAttributes),
}

impl MapOrAttrs<'_> {
    /// Calculate the attributes if necessary.
    ///
    /// Stored attributes are returned as is; they are expected to match the
    /// given [`Difficulty`].
    pub fn difficulty_attributes(
        &self,
        difficulty: &Difficulty,
    ) -> Result<DifficultyAttributes, CalculateError> {
        match self {
            Self::Map(map) => difficulty.calculate(map),
            Self::Attrs(attrs) => Ok(attrs.clone()),
        }
    }
}

impl<'map> From<&'map Beatmap> for MapOrAttrs<'map> {
    fn from(map: &'map Beatmap) -> Self {
        Self::Map(map)
    }
}

impl From<DifficultyAttributes> for MapOrAttrs<'_> {
    fn from(attrs: DifficultyAttributes) -> Self {
        Self::Attrs(attrs)
    }
}
