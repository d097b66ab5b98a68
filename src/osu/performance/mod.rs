use rosu_map::section::general::GameMode;

use crate::{
    any::{CalculateError, DifficultyAttributes, PerformanceSettings, ScoreState},
    model::mods::GameMods,
    util::float_ext::FloatExt,
};

use super::attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes};

pub mod gradual;

pub const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.14;

/// Upper bound for the fallback performance value.
const FALLBACK_PP_CAP: f64 = 10_000.0;

/// Performance calculator on osu!standard maps.
///
/// Wraps difficulty attributes that were calculated for the same
/// [`Difficulty`] settings that will be passed through
/// [`PerformanceSettings`].
///
/// [`Difficulty`]: crate::Difficulty
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct OsuPerformance {
    attrs: OsuDifficultyAttributes,
}

impl OsuPerformance {
    /// Create a new performance calculator for osu!standard attributes.
    pub const fn new(attrs: OsuDifficultyAttributes) -> Self {
        Self { attrs }
    }

    /// Create a new performance calculator from attributes of any mode.
    ///
    /// Returns [`CalculateError::AttributesMismatch`] if the attributes don't
    /// belong to osu!standard.
    pub fn try_from_attributes(
        attrs: impl Into<DifficultyAttributes>,
    ) -> Result<Self, CalculateError> {
        OsuDifficultyAttributes::try_from(attrs.into()).map(Self::new)
    }

    /// The wrapped difficulty attributes.
    pub const fn attributes(&self) -> &OsuDifficultyAttributes {
        &self.attrs
    }

    /// Create the [`ScoreState`] that will be used for performance calculation.
    pub fn generate_state(&self, settings: &PerformanceSettings) -> ScoreState {
        ScoreState::generate(
            settings,
            GameMode::Osu,
            self.attrs.n_objects(),
            self.attrs.max_combo,
        )
    }

    /// Calculate all performance related values, including pp and stars.
    pub fn calculate(&self, settings: &PerformanceSettings) -> OsuPerformanceAttributes {
        let state = self.generate_state(settings);
        let effective_miss_count = calculate_effective_misses(&self.attrs, &state);

        let inner = OsuPerformanceInner {
            attrs: self.attrs.clone(),
            mods: settings.difficulty.mods,
            acc: state.accuracy(GameMode::Osu),
            state,
            effective_miss_count,
        };

        inner.calculate()
    }
}

impl From<OsuDifficultyAttributes> for OsuPerformance {
    fn from(attrs: OsuDifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl From<OsuPerformanceAttributes> for OsuPerformance {
    fn from(attrs: OsuPerformanceAttributes) -> Self {
        Self::new(attrs.difficulty)
    }
}

struct OsuPerformanceInner {
    attrs: OsuDifficultyAttributes,
    mods: GameMods,
    acc: f64,
    state: ScoreState,
    effective_miss_count: f64,
}

impl OsuPerformanceInner {
    fn calculate(self) -> OsuPerformanceAttributes {
        let total_hits = self.state.total_hits(GameMode::Osu);

        if total_hits == 0 {
            return OsuPerformanceAttributes {
                difficulty: self.attrs,
                ..Default::default()
            };
        }

        let total_hits = f64::from(total_hits);

        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.nf() {
            multiplier *= (1.0 - 0.02 * self.effective_miss_count).max(0.9);
        }

        if self.mods.so() {
            multiplier *= 1.0 - (f64::from(self.attrs.n_spinners) / total_hits).powf(0.85);
        }

        let aim_value = self.compute_aim_value();
        let speed_value = self.compute_speed_value();
        let acc_value = self.compute_accuracy_value();
        let flashlight_value = self.compute_flashlight_value();

        let mut pp = (aim_value.powf(1.1)
            + speed_value.powf(1.1)
            + acc_value.powf(1.1)
            + flashlight_value.powf(1.1))
        .powf(1.0 / 1.1)
            * multiplier;

        if !pp.is_finite() || pp < 0.0 {
            let fallback = self.fallback_pp();
            tracing::warn!(pp, fallback, "degenerate performance value, using estimate");
            pp = fallback;
        }

        OsuPerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_acc: acc_value.finite_or(0.0),
            pp_aim: aim_value.finite_or(0.0),
            pp_flashlight: flashlight_value.finite_or(0.0),
            pp_speed: speed_value.finite_or(0.0),
            effective_miss_count: self.effective_miss_count,
        }
    }

    fn compute_aim_value(&self) -> f64 {
        let mut aim_value = (5.0 * (self.attrs.aim / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0;

        let total_hits = self.total_hits();
        let len_bonus = length_bonus(total_hits);

        aim_value *= len_bonus;

        // Penalize misses relative to the total amount of objects,
        // with a flat 3% reduction for any amount of misses
        if self.effective_miss_count > 0.0 {
            aim_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count);
        }

        aim_value *= self.get_combo_scaling_factor();

        let mut ar_factor = if self.attrs.ar > 10.33 {
            0.3 * (self.attrs.ar - 10.33)
        } else if self.attrs.ar < 8.0 {
            0.05 * (8.0 - self.attrs.ar)
        } else {
            0.0
        };

        if self.mods.hd() {
            ar_factor *= 2.0;
        }

        // Buff for longer maps with extreme AR
        aim_value *= 1.0 + ar_factor * len_bonus;

        if self.mods.hd() {
            // More reward for lower AR when it comes to aim and HD
            aim_value *= 1.0 + 0.04 * (12.0 - self.attrs.ar);
        }

        if self.mods.hr() {
            aim_value *= 1.025;
        }

        if self.mods.fl() {
            aim_value *= flashlight_length_bonus(total_hits);
        }

        // 15% of sliders are assumed to be difficult since there is no way
        // to tell from the attributes
        let estimate_diff_sliders = f64::from(self.attrs.n_sliders) * 0.15;

        if self.attrs.n_sliders > 0 {
            let estimate_slider_ends_dropped = f64::from(
                (self.state.n100 + self.state.n50 + self.state.misses)
                    .min(self.attrs.max_combo.saturating_sub(self.state.max_combo)),
            )
            .clamp(0.0, estimate_diff_sliders);

            let slider_nerf_factor = (1.0 - self.attrs.slider_factor)
                * (1.0 - estimate_slider_ends_dropped / estimate_diff_sliders).powi(3)
                + self.attrs.slider_factor;

            aim_value *= slider_nerf_factor;
        }

        aim_value *= self.acc;
        // Accuracy difficulty matters when scaling with accuracy
        aim_value *= 0.98 + self.attrs.od.powi(2) / 2500.0;

        if self.mods.rx() {
            aim_value *= 0.9;
        }

        aim_value
    }

    fn compute_speed_value(&self) -> f64 {
        if self.mods.rx() {
            return 0.0;
        }

        let mut speed_value =
            (5.0 * (self.attrs.speed / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0;

        let total_hits = self.total_hits();
        let len_bonus = length_bonus(total_hits);

        speed_value *= len_bonus;

        if self.effective_miss_count > 0.0 {
            speed_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count.powf(0.875));
        }

        speed_value *= self.get_combo_scaling_factor();

        let ar_factor = if self.attrs.ar > 10.33 {
            0.3 * (self.attrs.ar - 10.33)
        } else {
            0.0
        };

        speed_value *= 1.0 + ar_factor * len_bonus;

        if self.mods.hd() {
            speed_value *= 1.0 + 0.04 * (12.0 - self.attrs.ar);
        }

        // Accuracy on the relevant notes, assuming the worst case
        let relevant_total_diff = total_hits - self.attrs.speed_note_count;
        let relevant_n300 = (f64::from(self.state.n300) - relevant_total_diff).max(0.0);
        let relevant_n100 = (f64::from(self.state.n100)
            - (relevant_total_diff - f64::from(self.state.n300)).max(0.0))
        .max(0.0);
        let relevant_n50 = (f64::from(self.state.n50)
            - (relevant_total_diff - f64::from(self.state.n300 + self.state.n100)).max(0.0))
        .max(0.0);

        let relevant_acc = if self.attrs.speed_note_count.eq(0.0) {
            0.0
        } else {
            (relevant_n300 * 6.0 + relevant_n100 * 2.0 + relevant_n50)
                / (self.attrs.speed_note_count * 6.0)
        };

        speed_value *= (0.95 + self.attrs.od * self.attrs.od / 750.0)
            * ((self.acc + relevant_acc) / 2.0).powf((14.5 - self.attrs.od.max(8.0)) / 2.0);

        // Punish doubletapping through the amount of 50s
        speed_value *= 0.99_f64.powf(
            f64::from(u8::from(f64::from(self.state.n50) >= total_hits / 500.0))
                * (f64::from(self.state.n50) - total_hits / 500.0),
        );

        speed_value
    }

    fn compute_accuracy_value(&self) -> f64 {
        if self.mods.rx() {
            return 0.0;
        }

        // Only circles are considered since they rely solely on timing
        let n_circles = self.attrs.n_circles;

        let better_acc_percentage = if n_circles > 0 {
            let sub = self.state.total_hits(GameMode::Osu).saturating_sub(n_circles);

            // Negative accuracy is capped to zero
            if self.state.n300 < sub {
                0.0
            } else {
                f64::from((self.state.n300 - sub) * 6 + self.state.n100 * 2 + self.state.n50)
                    / f64::from(n_circles * 6)
            }
        } else {
            0.0
        };

        let mut acc_value = 1.52163_f64.powf(self.attrs.od) * better_acc_percentage.powi(24) * 2.83;

        // Bonus for many hitcircles since accuracy is harder to keep up for longer
        acc_value *= (f64::from(n_circles) / 1000.0).powf(0.3).min(1.15);

        if self.mods.hd() {
            acc_value *= 1.08;
        }

        if self.mods.fl() {
            acc_value *= 1.02;
        }

        acc_value
    }

    fn compute_flashlight_value(&self) -> f64 {
        if !self.mods.fl() {
            return 0.0;
        }

        let mut flashlight_value = self.attrs.aim.powi(2) * 25.0;

        let total_hits = self.total_hits();

        if self.effective_miss_count > 0.0 {
            flashlight_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count.powf(0.875));
        }

        flashlight_value *= self.get_combo_scaling_factor();

        // Shorter maps have a higher ratio of small flashlight radius
        flashlight_value *= 0.7
            + 0.1 * (total_hits / 200.0).min(1.0)
            + f64::from(u8::from(total_hits > 200.0))
                * 0.2
                * ((total_hits - 200.0) / 200.0).min(1.0);

        flashlight_value *= 0.5 + self.acc / 2.0;
        flashlight_value *= 0.98 + self.attrs.od.powi(2) / 2500.0;

        if self.mods.rx() {
            flashlight_value *= 0.7;
        }

        flashlight_value
    }

    fn get_combo_scaling_factor(&self) -> f64 {
        if self.attrs.max_combo == 0 {
            1.0
        } else {
            (f64::from(self.state.max_combo).powf(0.8) / f64::from(self.attrs.max_combo).powf(0.8))
                .min(1.0)
        }
    }

    fn total_hits(&self) -> f64 {
        f64::from(self.state.total_hits(GameMode::Osu))
    }

    /// Coarse estimate based only on stars, accuracy, and misses.
    fn fallback_pp(&self) -> f64 {
        let stars = self.attrs.stars.finite_or(0.0).max(0.0);
        let acc = self.acc.finite_or(0.0).clamp(0.0, 1.0);
        let misses = f64::from(self.state.misses);

        (12.0 * stars.powf(2.2) * acc.powi(4) * 0.97_f64.powf(misses))
            .finite_or(0.0)
            .clamp(0.0, FALLBACK_PP_CAP)
    }
}

fn length_bonus(total_hits: f64) -> f64 {
    0.95 + 0.4 * (total_hits / 2000.0).min(1.0)
        + f64::from(u8::from(total_hits > 2000.0)) * (total_hits / 2000.0).log10() * 0.5
}

fn flashlight_length_bonus(total_hits: f64) -> f64 {
    1.0 + 0.3 * (total_hits / 200.0).min(1.0)
        + f64::from(u8::from(total_hits > 200.0)) * 0.25 * ((total_hits - 200.0) / 300.0).min(1.0)
        + f64::from(u8::from(total_hits > 500.0)) * (total_hits - 500.0) / 1600.0
}

fn calculate_effective_misses(attrs: &OsuDifficultyAttributes, state: &ScoreState) -> f64 {
    // Guess the amount of misses and slider breaks from combo
    let mut combo_based_miss_count = 0.0;

    if attrs.n_sliders > 0 {
        let full_combo_threshold = f64::from(attrs.max_combo) - 0.1 * f64::from(attrs.n_sliders);

        if f64::from(state.max_combo) < full_combo_threshold {
            combo_based_miss_count = full_combo_threshold / f64::from(state.max_combo).max(1.0);
        }
    }

    // Clamp to the maximum amount of possible breaks
    combo_based_miss_count =
        combo_based_miss_count.min(f64::from(state.n100 + state.n50 + state.misses));

    combo_based_miss_count.max(f64::from(state.misses))
}
