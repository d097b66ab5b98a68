use rosu_map::section::general::GameMode;

use crate::{
    any::{
        difficulty::gradual::GradualDifficulty, performance::gradual::GradualPerformance,
        CalculateError, Difficulty,
    },
    Performance,
};

pub use self::attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows};

use super::{
    hit_object::{HitObject, HitObjectKind},
    mode::{ConvertError, ModeConverter},
};

mod attributes;

/// All beatmap data that is relevant for difficulty and performance
/// calculation.
///
/// Decoding `.osu` files is left to the caller, e.g. through [`rosu_map`].
/// Hitobjects are expected to be sorted by their start time.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub mode: GameMode,
    pub is_convert: bool,
    /// The mode the map was authored for; differs from `mode` for converts.
    pub original_mode: GameMode,

    // Difficulty
    /// Approach rate; falls back to the overall difficulty if unset.
    pub ar: Option<f32>,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,

    // HitObjects
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// The approach rate or the overall difficulty if none was specified.
    pub fn approach_rate(&self) -> f32 {
        self.ar.unwrap_or(self.od)
    }

    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Count the hitobjects by their kind.
    pub fn object_counts(&self) -> ObjectCounts {
        self.hit_objects
            .iter()
            .fold(ObjectCounts::default(), |mut counts, h| {
                match h.kind {
                    HitObjectKind::Circle => counts.circles += 1,
                    HitObjectKind::Slider(_) => counts.sliders += 1,
                    HitObjectKind::Spinner(_) => counts.spinners += 1,
                    HitObjectKind::Hold(_) => counts.holds += 1,
                }

                counts
            })
    }

    /// Perform a difficulty calculation with the given settings.
    pub fn difficulty(
        &self,
        difficulty: &Difficulty,
    ) -> Result<crate::DifficultyAttributes, CalculateError> {
        difficulty.calculate(self)
    }

    /// Create a performance calculator for this [`Beatmap`].
    pub const fn performance(&self) -> Performance<'_> {
        Performance::new(self)
    }

    /// Create a gradual difficulty calculator for this [`Beatmap`].
    pub fn gradual_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<GradualDifficulty, CalculateError> {
        GradualDifficulty::new(difficulty, self)
    }

    /// Create a gradual performance calculator for this [`Beatmap`].
    pub fn gradual_performance(
        &self,
        difficulty: Difficulty,
    ) -> Result<GradualPerformance, CalculateError> {
        GradualPerformance::new(difficulty, self)
    }

    /// Convert the map into another mode through the given
    /// [`ModeConverter`].
    ///
    /// The resulting map is flagged as convert and remembers its original
    /// mode. Converting into the map's own mode is a no-op.
    pub fn convert_with<C: ModeConverter + ?Sized>(
        &self,
        converter: &C,
        mode: GameMode,
    ) -> Result<Self, ConvertError> {
        if self.mode == mode {
            return Ok(self.clone());
        } else if self.is_convert {
            return Err(ConvertError::AlreadyConverted);
        }

        let mut converted = converter.convert(self, mode).ok_or(ConvertError::Convert {
            from: self.mode,
            to: mode,
        })?;

        converted.mode = mode;
        converted.is_convert = true;
        converted.original_mode = self.mode;

        Ok(converted)
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            mode: GameMode::Osu,
            is_convert: false,
            original_mode: GameMode::Osu,
            ar: None,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
            hit_objects: Vec::new(),
        }
    }
}

/// Amount of hitobjects per kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectCounts {
    pub circles: u32,
    pub sliders: u32,
    pub spinners: u32,
    pub holds: u32,
}

impl ObjectCounts {
    /// The total amount of hitobjects.
    pub const fn total(&self) -> u32 {
        self.circles + self.sliders + self.spinners + self.holds
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::Pos;

    use super::*;

    #[test]
    fn ar_falls_back_to_od() {
        let mut map = Beatmap {
            od: 7.0,
            ..Default::default()
        };

        assert!((map.approach_rate() - 7.0).abs() < f32::EPSILON);

        map.ar = Some(9.0);
        assert!((map.approach_rate() - 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn convert_tags_provenance() {
        let map = Beatmap {
            hit_objects: vec![HitObject::circle(Pos::new(0.0, 0.0), 0.0)],
            ..Default::default()
        };

        let to_taiko = |map: &Beatmap, mode: GameMode| {
            (mode == GameMode::Taiko).then(|| map.clone())
        };

        let converted = map.convert_with(&to_taiko, GameMode::Taiko).unwrap();

        assert_eq!(converted.mode, GameMode::Taiko);
        assert_eq!(converted.original_mode, GameMode::Osu);
        assert!(converted.is_convert);

        assert_eq!(
            map.convert_with(&to_taiko, GameMode::Catch),
            Err(ConvertError::Convert {
                from: GameMode::Osu,
                to: GameMode::Catch
            })
        );

        assert_eq!(
            converted.convert_with(&to_taiko, GameMode::Mania),
            Err(ConvertError::AlreadyConverted)
        );
    }
}
