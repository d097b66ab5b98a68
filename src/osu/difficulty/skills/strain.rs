use crate::osu::difficulty::object::OsuDifficultyObject;

use super::kind::SkillKind;

/// A decaying strain that is sampled into sections of fixed length.
#[derive(Clone, Debug, PartialEq)]
pub struct StrainSkill {
    kind: SkillKind,
    curr_strain: f64,
    curr_section_peak: f64,
    curr_section_end: f64,
    prev_time: Option<f64>,
    strain_peaks: Vec<f64>,
    object_strains: Vec<f64>,
}

impl StrainSkill {
    /// Section length in milliseconds after applying the clock rate.
    pub const SECTION_LEN: f64 = 400.0;

    const DECAY_WEIGHT: f64 = 0.9;

    /// Create a new skill whose first section ends after the first object.
    pub fn new(kind: SkillKind, first_object_time: f64) -> Self {
        Self {
            kind,
            curr_strain: 1.0,
            curr_section_peak: 1.0,
            curr_section_end: section_end_after(first_object_time),
            prev_time: None,
            strain_peaks: Vec::with_capacity(128),
            object_strains: Vec::new(),
        }
    }

    pub fn process(&mut self, current: &OsuDifficultyObject) {
        self.advance_sections(current.start_time);

        self.curr_strain *= self.strain_decay(current.delta);
        self.curr_strain += self.kind.strain_value_of(current) * self.kind.skill_multiplier();

        self.object_strains.push(self.curr_strain);

        self.curr_section_peak = self.curr_section_peak.max(self.curr_strain);
        self.prev_time = Some(current.start_time);
    }

    /// Close all sections that end before `time`.
    fn advance_sections(&mut self, time: f64) {
        let Some(prev_time) = self.prev_time else {
            // No strain yet so there is nothing to record
            self.curr_section_end = self.curr_section_end.max(section_end_after(time));

            return;
        };

        while time > self.curr_section_end {
            self.strain_peaks.push(self.curr_section_peak);
            self.curr_section_peak = self.peak_strain(self.curr_section_end - prev_time);
            self.curr_section_end += Self::SECTION_LEN;

            // Fully decayed; remaining sections until `time` are empty
            if self.curr_section_peak <= 0.0 {
                self.curr_section_end = self.curr_section_end.max(section_end_after(time));
            }
        }
    }

    /// All section peaks including the currently open section.
    pub fn strain_peaks(&self) -> Vec<f64> {
        if self.prev_time.is_none() {
            return Vec::new();
        }

        let mut peaks = Vec::with_capacity(self.strain_peaks.len() + 1);
        peaks.extend_from_slice(&self.strain_peaks);
        peaks.push(self.curr_section_peak);

        peaks
    }

    /// Weighted sum of the section peaks, sorted descendingly.
    pub fn difficulty_value(&self) -> f64 {
        let mut peaks = self.strain_peaks();
        peaks.sort_unstable_by(|a, b| b.total_cmp(a));

        let mut difficulty = 0.0;
        let mut weight = 1.0;

        for strain in peaks {
            difficulty += strain * weight;
            weight *= Self::DECAY_WEIGHT;
        }

        difficulty
    }

    /// The amount of objects weighted by their strain relative to the
    /// hardest one.
    pub fn relevant_note_count(&self) -> f64 {
        self.object_strains
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .filter(|&n| n > 0.0)
            .map_or(0.0, |max_strain| {
                self.object_strains.iter().fold(0.0, |sum, strain| {
                    sum + (1.0 + f64::exp(-(strain / max_strain * 12.0 - 6.0))).recip()
                })
            })
    }

    fn peak_strain(&self, delta_time: f64) -> f64 {
        self.curr_strain * self.strain_decay(delta_time)
    }

    fn strain_decay(&self, ms: f64) -> f64 {
        self.kind.strain_decay_base().powf(ms / 1000.0)
    }
}

fn section_end_after(time: f64) -> f64 {
    (time / StrainSkill::SECTION_LEN).ceil() * StrainSkill::SECTION_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_at(start_time: f64, delta: f64) -> OsuDifficultyObject {
        OsuDifficultyObject {
            start_time,
            delta,
            strain_time: delta.max(OsuDifficultyObject::MIN_DELTA_TIME),
            jump_dist: 120.0,
            travel_dist: 0.0,
            angle: None,
            prev: None,
            is_spinner: false,
        }
    }

    #[test]
    fn nothing_processed() {
        let skill = StrainSkill::new(SkillKind::Speed, 0.0);

        assert!(skill.strain_peaks().is_empty());
        assert!(skill.difficulty_value().abs() < f64::EPSILON);
    }

    #[test]
    fn sections_are_recorded() {
        let mut skill = StrainSkill::new(SkillKind::Speed, 0.0);

        for i in 1..=10 {
            skill.process(&circle_at(f64::from(i) * 200.0, 200.0));
        }

        // objects at 200..=2000 span the sections ending at 400..=2000
        assert_eq!(skill.strain_peaks().len(), 5);
    }

    #[test]
    fn long_breaks_terminate() {
        let mut skill = StrainSkill::new(SkillKind::Aim { with_sliders: true }, 0.0);

        skill.process(&circle_at(100.0, 100.0));
        skill.process(&circle_at(1e12, 1e12));

        assert!(skill.difficulty_value().is_finite());
        assert!(skill.strain_peaks().len() < 10_000);
    }

    #[test]
    fn peaks_weighted_descending() {
        let mut skill = StrainSkill::new(SkillKind::Speed, 0.0);

        for i in 1..=20 {
            skill.process(&circle_at(f64::from(i) * 100.0, 100.0));
        }

        let peaks = skill.strain_peaks();
        let max = peaks.iter().copied().fold(0.0, f64::max);
        let sum: f64 = peaks.iter().sum();

        let value = skill.difficulty_value();
        assert!(value >= max);
        assert!(value <= sum);
    }
}
