use crate::taiko::difficulty::object::TaikoDifficultyObject;

/// The single strain skill of osu!taiko, rewarding color and rhythm changes.
#[derive(Clone, Debug, PartialEq)]
pub struct TaikoStrainSkill {
    curr_strain: f64,
    curr_section_peak: f64,
    curr_section_end: f64,
    prev_time: Option<f64>,
    prev_delta: Option<f64>,
    same_color_count: usize,
    last_color_switch: ColorSwitch,
    strain_peaks: Vec<f64>,
}

impl TaikoStrainSkill {
    /// Section length in milliseconds after applying the clock rate.
    pub const SECTION_LEN: f64 = 400.0;

    const DECAY_WEIGHT: f64 = 0.9;
    const STRAIN_DECAY_BASE: f64 = 0.3;

    const RHYTHM_CHANGE_BASE_THRESHOLD: f64 = 0.2;
    const RHYTHM_CHANGE_BASE: f64 = 2.0;
    const MAX_RHYTHM_RATIO: f64 = 8.0;

    const COLOR_CHANGE_BONUS: f64 = 0.75;
    const RHYTHM_CHANGE_BONUS: f64 = 1.0;

    /// Pairs further apart than this get no bonuses.
    const BONUS_DELTA_LIMIT: f64 = 1000.0;
    /// Objects closer than this have their addition scaled down.
    const MIN_FULL_DELTA: f64 = 50.0;

    /// Create a new skill whose first section ends after the first object.
    pub fn new(first_object_time: f64) -> Self {
        Self {
            curr_strain: 1.0,
            curr_section_peak: 1.0,
            curr_section_end: section_end_after(first_object_time),
            prev_time: None,
            prev_delta: None,
            same_color_count: 1,
            last_color_switch: ColorSwitch::None,
            strain_peaks: Vec::with_capacity(128),
        }
    }

    pub fn process(&mut self, current: &TaikoDifficultyObject) {
        self.advance_sections(current.start_time);

        self.curr_strain *= strain_decay(current.delta);
        self.curr_strain += self.strain_value_of(current);

        self.curr_section_peak = self.curr_section_peak.max(self.curr_strain);
        self.prev_time = Some(current.start_time);
        self.prev_delta = Some(current.delta);
    }

    /// Close all sections that end before `time`.
    fn advance_sections(&mut self, time: f64) {
        let Some(prev_time) = self.prev_time else {
            self.curr_section_end = self.curr_section_end.max(section_end_after(time));

            return;
        };

        while time > self.curr_section_end {
            self.strain_peaks.push(self.curr_section_peak);
            self.curr_section_peak = self.curr_strain * strain_decay(self.curr_section_end - prev_time);
            self.curr_section_end += Self::SECTION_LEN;

            // Fully decayed; remaining sections until `time` are empty
            if self.curr_section_peak <= 0.0 {
                self.curr_section_end = self.curr_section_end.max(section_end_after(time));
            }
        }
    }

    fn strain_value_of(&mut self, current: &TaikoDifficultyObject) -> f64 {
        let mut addition = 1.0;

        if current.is_hit_pair && current.delta < Self::BONUS_DELTA_LIMIT {
            if self.has_color_change(current) {
                addition += Self::COLOR_CHANGE_BONUS;
            }

            if self.has_rhythm_change(current) {
                addition += Self::RHYTHM_CHANGE_BONUS;
            }
        } else {
            self.last_color_switch = ColorSwitch::None;
            self.same_color_count = 1;
        }

        let addition_factor = if current.delta < Self::MIN_FULL_DELTA {
            0.4 + 0.6 * current.delta / Self::MIN_FULL_DELTA
        } else {
            1.0
        };

        addition_factor * addition
    }

    fn has_rhythm_change(&self, current: &TaikoDifficultyObject) -> bool {
        let Some(prev_delta) = self.prev_delta else {
            return false;
        };

        if current.delta.abs() < f64::EPSILON || prev_delta.abs() < f64::EPSILON {
            return false;
        }

        let ratio = (prev_delta / current.delta).max(current.delta / prev_delta);

        if ratio >= Self::MAX_RHYTHM_RATIO {
            return false;
        }

        let difference = ratio.log(Self::RHYTHM_CHANGE_BASE) % 1.0;

        difference > Self::RHYTHM_CHANGE_BASE_THRESHOLD
            && difference < 1.0 - Self::RHYTHM_CHANGE_BASE_THRESHOLD
    }

    fn has_color_change(&mut self, current: &TaikoDifficultyObject) -> bool {
        if !current.has_type_change {
            self.same_color_count += 1;

            return false;
        }

        let prev_switch = self.last_color_switch;

        let new_switch = if self.same_color_count % 2 == 0 {
            ColorSwitch::Even
        } else {
            ColorSwitch::Odd
        };

        self.last_color_switch = new_switch;
        self.same_color_count = 1;

        prev_switch != ColorSwitch::None && prev_switch != new_switch
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
}

/// Parity of the amount of same-colored hits before the last color change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ColorSwitch {
    None,
    Even,
    Odd,
}

fn strain_decay(ms: f64) -> f64 {
    TaikoStrainSkill::STRAIN_DECAY_BASE.powf(ms / 1000.0)
}

fn section_end_after(time: f64) -> f64 {
    (time / TaikoStrainSkill::SECTION_LEN).ceil() * TaikoStrainSkill::SECTION_LEN
}
