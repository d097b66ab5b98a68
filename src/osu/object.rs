use rosu_map::util::Pos;

use crate::model::hit_object::{HitObject, HitObjectKind, Slider};

use super::scaling_factor::ScalingFactor;

/// A [`HitObject`] prepared for osu!standard difficulty calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: OsuObjectKind,
    /// Position of the cursor after following the object as lazily as
    /// possible.
    pub lazy_end_pos: Pos,
    /// Distance the cursor travels while following the object, unscaled.
    pub lazy_travel_dist: f64,
    /// Combo awarded by the object.
    pub combo: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OsuObjectKind {
    Circle,
    Slider,
    Spinner,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;
    pub const PLAYFIELD_HEIGHT: f32 = 384.0;

    const FOLLOW_CIRCLE_MULTIPLIER: f64 = 3.0;
    const BASE_SCORING_DIST: f64 = 100.0;

    pub fn new(
        h: &HitObject,
        scaling_factor: &ScalingFactor,
        slider_multiplier: f64,
        tick_rate: f64,
        hr: bool,
    ) -> Self {
        let reflect = |pos: Pos| {
            if hr {
                Pos::new(pos.x, Self::PLAYFIELD_HEIGHT - pos.y)
            } else {
                pos
            }
        };

        let pos = reflect(h.pos);

        match h.kind {
            // Hold notes only appear in mania maps; treat them as circles
            HitObjectKind::Circle | HitObjectKind::Hold(_) => Self {
                pos,
                start_time: h.start_time,
                kind: OsuObjectKind::Circle,
                lazy_end_pos: pos,
                lazy_travel_dist: 0.0,
                combo: 1,
            },
            HitObjectKind::Slider(ref slider) => {
                let end_pos = reflect(slider.end_pos);
                let follow_radius = scaling_factor.radius * Self::FOLLOW_CIRCLE_MULTIPLIER;
                let (lazy_end_pos, lazy_travel_dist) =
                    lazy_slider_path(pos, end_pos, slider, follow_radius);

                let tick_dist = Self::BASE_SCORING_DIST * slider_multiplier * slider.velocity
                    / tick_rate;

                Self {
                    pos,
                    start_time: h.start_time,
                    kind: OsuObjectKind::Slider,
                    lazy_end_pos,
                    lazy_travel_dist,
                    combo: slider.combo(tick_dist),
                }
            }
            HitObjectKind::Spinner(_) => Self {
                pos,
                start_time: h.start_time,
                kind: OsuObjectKind::Spinner,
                lazy_end_pos: pos,
                lazy_travel_dist: 0.0,
                combo: 1,
            },
        }
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner)
    }
}

/// Approximates the cursor movement along a slider.
///
/// The cursor stays put until the ball leaves the follow circle and then
/// trails it by the follow circle's radius. The curve is approximated by the
/// chord between head and tail for the lazy end position.
fn lazy_slider_path(head: Pos, tail: Pos, slider: &Slider, follow_radius: f64) -> (Pos, f64) {
    let len = slider.pixel_len.max(0.0);
    let spans = slider.span_count();

    let travel_dist = if len > follow_radius {
        (len - follow_radius) + (spans - 1) as f64 * (len - 2.0 * follow_radius).max(0.0)
    } else {
        0.0
    };

    let chord = tail - head;
    let chord_len = f64::from(chord.length());

    let end_pos = if chord_len <= follow_radius {
        head
    } else if spans % 2 == 1 {
        head + chord * ((chord_len - follow_radius) / chord_len) as f32
    } else {
        head + chord * (follow_radius / chord_len) as f32
    };

    (end_pos, travel_dist)
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    fn slider(pixel_len: f64, repeats: usize) -> HitObject {
        HitObject::slider(
            Pos::new(0.0, 100.0),
            0.0,
            Slider {
                pixel_len,
                repeats,
                end_pos: Pos::new(pixel_len as f32, 100.0),
                duration: 500.0,
                velocity: 1.0,
            },
        )
    }

    #[test]
    fn hard_rock_reflects() {
        let scaling_factor = ScalingFactor::new(4.0);
        let h = HitObject::circle(Pos::new(50.0, 100.0), 0.0);
        let obj = OsuObject::new(&h, &scaling_factor, 1.4, 1.0, true);

        assert!(obj.pos.x.eq(50.0));
        assert!(obj.pos.y.eq(284.0));
    }

    #[test]
    fn short_slider_has_no_travel() {
        let scaling_factor = ScalingFactor::new(4.0);
        let obj = OsuObject::new(&slider(10.0, 0), &scaling_factor, 1.4, 1.0, false);

        assert!(obj.lazy_travel_dist.eq(0.0));
        assert_eq!(obj.lazy_end_pos, obj.pos);
    }

    #[test]
    fn long_slider_travels() {
        let scaling_factor = ScalingFactor::new(4.0);
        let follow_radius = scaling_factor.radius * 3.0;

        let single = OsuObject::new(&slider(400.0, 0), &scaling_factor, 1.4, 1.0, false);
        let repeated = OsuObject::new(&slider(400.0, 1), &scaling_factor, 1.4, 1.0, false);

        assert!((single.lazy_travel_dist - (400.0 - follow_radius)).abs() < 1e-9);
        assert!(repeated.lazy_travel_dist > single.lazy_travel_dist);

        // the repeat brings the cursor back towards the head
        assert!(repeated.lazy_end_pos.x < single.lazy_end_pos.x);
    }
}
