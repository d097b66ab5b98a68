use std::cmp::Ordering;

pub use rosu_map::{section::hit_objects::hit_samples::HitSoundType, util::Pos};

/// All hitobject related data required for difficulty and performance
/// calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: HitObjectKind,
    /// Only relevant for osu!taiko to distinguish rims from centers.
    pub sound: HitSoundType,
}

impl HitObject {
    /// Create a new circle.
    pub fn circle(pos: Pos, start_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Circle,
            sound: HitSoundType::default(),
        }
    }

    /// Create a new slider.
    pub fn slider(pos: Pos, start_time: f64, slider: Slider) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Slider(slider),
            sound: HitSoundType::default(),
        }
    }

    /// Create a new spinner.
    pub fn spinner(pos: Pos, start_time: f64, duration: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Spinner(Spinner { duration }),
            sound: HitSoundType::default(),
        }
    }

    /// Create a new hold note.
    pub fn hold(pos: Pos, start_time: f64, duration: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Hold(HoldNote { duration }),
            sound: HitSoundType::default(),
        }
    }

    /// Replace the hitsound.
    #[must_use]
    pub fn with_sound(self, sound: HitSoundType) -> Self {
        Self { sound, ..self }
    }

    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// Whether the hitobject is a hold note.
    pub const fn is_hold_note(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Hold(_))
    }

    /// The end time of the object if it has a duration.
    pub fn end_time(&self) -> Option<f64> {
        match &self.kind {
            HitObjectKind::Circle => None,
            HitObjectKind::Slider(Slider { duration, .. })
            | HitObjectKind::Spinner(Spinner { duration })
            | HitObjectKind::Hold(HoldNote { duration }) => Some(self.start_time + *duration),
        }
    }
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Additional data for a [`HitObject`].
///
/// Note that each mode handles hit objects differently.
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
    Hold(HoldNote),
}

/// A slider.
///
/// The curve itself is resolved by the decoder; only its length and tail
/// position are required here.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    /// Length of the curve in osu!pixels.
    pub pixel_len: f64,
    /// Amount of repeats, `0` for a slider without reverse arrows.
    pub repeats: usize,
    /// Position at the end of the curve.
    pub end_pos: Pos,
    /// Total duration across all spans in milliseconds.
    pub duration: f64,
    /// Slider velocity multiplier of the active difficulty point.
    pub velocity: f64,
}

impl Slider {
    const MAX_TICKS_PER_SPAN: f64 = 32_768.0;

    /// Amount of times the curve is traversed.
    pub const fn span_count(&self) -> usize {
        self.repeats + 1
    }

    /// Amount of ticks on a single span given the distance between ticks.
    pub(crate) fn ticks_per_span(&self, tick_dist: f64) -> usize {
        let span_duration = self.duration / self.span_count() as f64;

        if !(tick_dist > 0.0) || !(self.pixel_len > 0.0) {
            return 0;
        }

        // Ticks too close to the span's end are dropped
        let min_dist_from_end = if span_duration > 0.0 {
            self.pixel_len / span_duration * 10.0
        } else {
            0.0
        };

        let limit = self.pixel_len - min_dist_from_end;

        if limit <= tick_dist {
            return 0;
        }

        ((limit / tick_dist).ceil() - 1.0).min(Self::MAX_TICKS_PER_SPAN) as usize
    }

    /// Slider head, ticks, repeats, and tail.
    pub(crate) fn combo(&self, tick_dist: f64) -> u32 {
        let spans = self.span_count();

        (2 + self.repeats + self.ticks_per_span(tick_dist) * spans) as u32
    }
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spinner {
    pub duration: f64,
}

/// A hold note.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoldNote {
    pub duration: f64,
}
