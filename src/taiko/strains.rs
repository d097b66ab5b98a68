use crate::{any::CalculateError, model::beatmap::Beatmap, Difficulty};

use super::difficulty::{skills::strain::TaikoStrainSkill, DifficultyValues, TaikoDifficultySetup};

/// The result of calculating the strains on a osu!taiko map.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaikoStrains {
    /// Strain peaks of the strain skill.
    pub strain: Vec<f64>,
}

impl TaikoStrains {
    /// Time between two strains in ms.
    pub const SECTION_LEN: f64 = TaikoStrainSkill::SECTION_LEN;
}

pub fn strains(difficulty: &Difficulty, map: &Beatmap) -> Result<TaikoStrains, CalculateError> {
    let setup = TaikoDifficultySetup::new(difficulty, map)?;
    let take = difficulty.get_passed_objects(map.hit_objects.len());
    let values = DifficultyValues::calculate(&setup, &map.hit_objects[..take]);

    Ok(TaikoStrains {
        strain: values.skill.strain_peaks(),
    })
}

#[cfg(test)]
mod tests {
    use rosu_map::{section::general::GameMode, util::Pos};

    use crate::model::hit_object::HitObject;

    use super::*;

    #[test]
    fn one_peak_per_section() {
        let hit_objects = (0..20)
            .map(|i| HitObject::circle(Pos::default(), 200.0 * f64::from(i)))
            .collect();

        let map = Beatmap {
            mode: GameMode::Taiko,
            hit_objects,
            ..Default::default()
        };

        let full = strains(&Difficulty::new(), &map).unwrap();

        assert_eq!(full.strain.len(), 10);

        let halved = strains(&Difficulty::new().passed_objects(10), &map).unwrap();
        assert_eq!(halved.strain.len(), 5);
    }
}
