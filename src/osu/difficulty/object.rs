use crate::osu::{object::OsuObject, scaling_factor::ScalingFactor};

/// The movement from one [`OsuObject`] to the next as seen by the strain
/// skills.
///
/// Times are already divided by the clock rate.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuDifficultyObject {
    pub start_time: f64,
    pub delta: f64,
    pub strain_time: f64,
    pub jump_dist: f64,
    /// Cursor travel distance of the previous object if it was a slider.
    pub travel_dist: f64,
    pub angle: Option<f64>,
    /// `(jump_dist, strain_time)` of the previous difficulty object.
    pub prev: Option<(f64, f64)>,
    pub is_spinner: bool,
}

impl OsuDifficultyObject {
    pub const NORMALIZED_RADIUS: f64 = 52.0;
    pub const MIN_DELTA_TIME: f64 = 50.0;

    pub fn new(
        curr: &OsuObject,
        last: &OsuObject,
        last_last: Option<&OsuObject>,
        prev: Option<&Self>,
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) -> Self {
        let start_time = curr.start_time / clock_rate;
        let delta = (curr.start_time - last.start_time) / clock_rate;
        let strain_time = delta.max(Self::MIN_DELTA_TIME);

        let jump_dist = if curr.is_spinner() {
            0.0
        } else {
            f64::from((curr.pos - last.lazy_end_pos).length()) * scaling_factor.factor
        };

        let travel_dist = last.lazy_travel_dist * scaling_factor.factor;

        let angle = last_last.map(|last_last| {
            let v1 = last_last.lazy_end_pos - last.pos;
            let v2 = curr.pos - last.lazy_end_pos;

            let dot = f64::from(v1.dot(v2));
            let det = f64::from(v1.x * v2.y - v1.y * v2.x);

            det.atan2(dot).abs()
        });

        Self {
            start_time,
            delta,
            strain_time,
            jump_dist,
            travel_dist,
            angle,
            prev: prev.map(|prev| (prev.jump_dist, prev.strain_time)),
            is_spinner: curr.is_spinner(),
        }
    }

    /// Create the difficulty objects for all given objects.
    ///
    /// The first object has no predecessor and thus no difficulty object.
    pub fn create(
        objects: &[OsuObject],
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) -> Vec<Self> {
        let mut diff_objects: Vec<Self> = Vec::with_capacity(objects.len().saturating_sub(1));

        for (i, curr) in objects.iter().enumerate().skip(1) {
            let last_last = i.checked_sub(2).map(|j| &objects[j]);

            let diff_object = Self::new(
                curr,
                &objects[i - 1],
                last_last,
                diff_objects.last(),
                clock_rate,
                scaling_factor,
            );

            diff_objects.push(diff_object);
        }

        diff_objects
    }
}
