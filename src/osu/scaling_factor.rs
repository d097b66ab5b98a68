use super::{difficulty::object::OsuDifficultyObject, object::OsuObject};

const BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE: f32 = 1.00041;

/// Fields around the scaling of hit objects.
///
/// All objects share the same scaling so it is stored only once.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScalingFactor {
    /// `NORMALIZED_RADIUS / radius` and then adjusted if `radius < 30`
    pub factor: f64,
    pub radius: f64,
}

impl ScalingFactor {
    pub fn new(cs: f64) -> Self {
        let scale = (f64::from(1.0_f32) - f64::from(0.7_f32) * ((cs - 5.0) / 5.0)) as f32 / 2.0
            * BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE;

        let radius = f64::from(OsuObject::OBJECT_RADIUS * scale);
        let factor = OsuDifficultyObject::NORMALIZED_RADIUS / radius;

        let factor_with_small_circle_bonus = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius).min(5.0) / 50.0)
        } else {
            factor
        };

        Self {
            factor: factor_with_small_circle_bonus,
            radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_circles_get_bonus() {
        let regular = ScalingFactor::new(4.0);
        let tiny = ScalingFactor::new(7.0);

        assert!(regular.radius > 30.0);
        assert!(tiny.radius < 30.0);

        let tiny_without_bonus = OsuDifficultyObject::NORMALIZED_RADIUS / tiny.radius;
        assert!(tiny.factor > tiny_without_bonus);
    }
}
