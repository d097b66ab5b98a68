use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

use crate::osu::difficulty::object::OsuDifficultyObject;

const SINGLE_SPACING_THRESHOLD: f64 = 125.0;
const SPEED_ANGLE_BONUS_BEGIN: f64 = 5.0 * FRAC_PI_6;

const MIN_SPEED_BONUS: f64 = 75.0;
const MAX_SPEED_BONUS: f64 = 45.0;
const SPEED_BALANCING_FACTOR: f64 = 40.0;

const AIM_ANGLE_BONUS_BEGIN: f64 = 2.0 * FRAC_PI_3;
const AIM_ANGLE_BONUS_SCALE: f64 = 90.0;
const TIMING_THRESHOLD: f64 = 107.0;

/// The skills that are tracked through decaying strains.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkillKind {
    Aim { with_sliders: bool },
    Speed,
}

impl SkillKind {
    pub const fn skill_multiplier(self) -> f64 {
        match self {
            Self::Aim { .. } => 26.25,
            Self::Speed => 1400.0,
        }
    }

    pub const fn strain_decay_base(self) -> f64 {
        match self {
            Self::Aim { .. } => 0.15,
            Self::Speed => 0.3,
        }
    }

    pub fn strain_value_of(self, current: &OsuDifficultyObject) -> f64 {
        if current.is_spinner {
            return 0.0;
        }

        match self {
            Self::Aim { with_sliders } => aim_strain_of(current, with_sliders),
            Self::Speed => speed_strain_of(current),
        }
    }
}

fn aim_strain_of(current: &OsuDifficultyObject, with_sliders: bool) -> f64 {
    let mut result = 0.0;

    // Sharp reversals in movement direction are rewarded
    if let Some((prev_jump_dist, prev_strain_time)) = current.prev {
        if let Some(angle) = current.angle.filter(|a| *a < AIM_ANGLE_BONUS_BEGIN) {
            let sharpness = (AIM_ANGLE_BONUS_BEGIN - angle) / AIM_ANGLE_BONUS_BEGIN * FRAC_PI_2;

            let angle_bonus = (sharpness.sin().powi(2)
                * (prev_jump_dist - AIM_ANGLE_BONUS_SCALE).max(0.0)
                * (current.jump_dist - AIM_ANGLE_BONUS_SCALE).max(0.0))
            .sqrt();

            result = 1.5 * apply_diminishing_exp(angle_bonus.max(0.0))
                / TIMING_THRESHOLD.max(prev_strain_time);
        }
    }

    let travel_dist = if with_sliders {
        current.travel_dist
    } else {
        0.0
    };

    let jump_dist_exp = apply_diminishing_exp(current.jump_dist);
    let travel_dist_exp = apply_diminishing_exp(travel_dist);

    let dist_exp = jump_dist_exp + travel_dist_exp + (travel_dist_exp * jump_dist_exp).sqrt();

    (result + dist_exp / current.strain_time.max(TIMING_THRESHOLD))
        .max(dist_exp / current.strain_time)
}

fn speed_strain_of(current: &OsuDifficultyObject) -> f64 {
    let dist = SINGLE_SPACING_THRESHOLD.min(current.travel_dist + current.jump_dist);
    let delta_time = MAX_SPEED_BONUS.max(current.delta);

    let mut speed_bonus = 1.0;

    if delta_time < MIN_SPEED_BONUS {
        let exp_base = (MIN_SPEED_BONUS - delta_time) / SPEED_BALANCING_FACTOR;
        speed_bonus += exp_base * exp_base;
    }

    let mut angle_bonus = 1.0;

    if let Some(angle) = current.angle.filter(|a| *a < SPEED_ANGLE_BONUS_BEGIN) {
        let exp_base = (1.5 * (SPEED_ANGLE_BONUS_BEGIN - angle)).sin();
        angle_bonus = 1.0 + exp_base * exp_base / 3.57;

        if angle < FRAC_PI_2 {
            angle_bonus = 1.28;

            if dist < AIM_ANGLE_BONUS_SCALE && angle < FRAC_PI_4 {
                angle_bonus += (1.0 - angle_bonus)
                    * ((AIM_ANGLE_BONUS_SCALE - dist) / 10.0).min(1.0);
            } else if dist < AIM_ANGLE_BONUS_SCALE {
                angle_bonus += (1.0 - angle_bonus)
                    * ((AIM_ANGLE_BONUS_SCALE - dist) / 10.0).min(1.0)
                    * ((FRAC_PI_2 - angle) / FRAC_PI_4).sin();
            }
        }
    }

    // Stacked objects, i.e. small distances, dampen the strain
    (1.0 + (speed_bonus - 1.0) * 0.75)
        * angle_bonus
        * (0.95 + speed_bonus * (dist / SINGLE_SPACING_THRESHOLD).powf(3.5))
        / current.strain_time
}

fn apply_diminishing_exp(val: f64) -> f64 {
    val.powf(0.99)
}
