use rosu_map::section::general::GameMode;

use crate::{
    any::{CalculateError, DifficultyAttributes, PerformanceSettings, ScoreState},
    model::mods::GameMods,
    util::float_ext::FloatExt,
};

use super::attributes::{TaikoDifficultyAttributes, TaikoPerformanceAttributes};

pub mod gradual;

const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.13;

/// Upper bound for the fallback performance value.
const FALLBACK_PP_CAP: f64 = 10_000.0;

/// Performance calculator on osu!taiko maps.
///
/// Wraps difficulty attributes that were calculated for the same
/// [`Difficulty`] settings that will be passed through
/// [`PerformanceSettings`].
///
/// [`Difficulty`]: crate::Difficulty
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct TaikoPerformance {
    attrs: TaikoDifficultyAttributes,
}

impl TaikoPerformance {
    /// Create a new performance calculator for osu!taiko attributes.
    pub const fn new(attrs: TaikoDifficultyAttributes) -> Self {
        Self { attrs }
    }

    /// Create a new performance calculator from attributes of any mode.
    ///
    /// Returns [`CalculateError::AttributesMismatch`] if the attributes don't
    /// belong to osu!taiko.
    pub fn try_from_attributes(
        attrs: impl Into<DifficultyAttributes>,
    ) -> Result<Self, CalculateError> {
        TaikoDifficultyAttributes::try_from(attrs.into()).map(Self::new)
    }

    /// The wrapped difficulty attributes.
    pub const fn attributes(&self) -> &TaikoDifficultyAttributes {
        &self.attrs
    }

    /// Create the [`ScoreState`] that will be used for performance calculation.
    ///
    /// The `n100` field holds the amount of 150s.
    pub fn generate_state(&self, settings: &PerformanceSettings) -> ScoreState {
        ScoreState::generate(
            settings,
            GameMode::Taiko,
            self.attrs.n_objects(),
            self.attrs.max_combo,
        )
    }

    /// Calculate all performance related values, including pp and stars.
    pub fn calculate(&self, settings: &PerformanceSettings) -> TaikoPerformanceAttributes {
        let state = self.generate_state(settings);

        let inner = TaikoPerformanceInner {
            attrs: self.attrs.clone(),
            mods: settings.difficulty.mods,
            acc: state.accuracy(GameMode::Taiko),
            state,
        };

        inner.calculate()
    }
}

impl From<TaikoDifficultyAttributes> for TaikoPerformance {
    fn from(attrs: TaikoDifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl From<TaikoPerformanceAttributes> for TaikoPerformance {
    fn from(attrs: TaikoPerformanceAttributes) -> Self {
        Self::new(attrs.difficulty)
    }
}

struct TaikoPerformanceInner {
    attrs: TaikoDifficultyAttributes,
    mods: GameMods,
    acc: f64,
    state: ScoreState,
}

impl TaikoPerformanceInner {
    fn calculate(self) -> TaikoPerformanceAttributes {
        if self.total_hits() <= 0.0 {
            return TaikoPerformanceAttributes {
                difficulty: self.attrs,
                ..Default::default()
            };
        }

        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.hd() {
            multiplier *= 1.075;
        }

        if self.mods.ez() {
            multiplier *= 0.975;
        }

        let effective_miss_count = self.effective_miss_count();
        let diff_value = self.compute_difficulty_value(effective_miss_count);
        let acc_value = self.compute_accuracy_value();

        let mut pp = (diff_value.powf(1.1) + acc_value.powf(1.1)).powf(1.0 / 1.1) * multiplier;

        if !pp.is_finite() || pp < 0.0 {
            let fallback = self.fallback_pp();
            tracing::warn!(pp, fallback, "degenerate performance value, using estimate");
            pp = fallback;
        }

        TaikoPerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_acc: acc_value.finite_or(0.0),
            pp_difficulty: diff_value.finite_or(0.0),
            effective_miss_count,
        }
    }

    fn compute_difficulty_value(&self, effective_miss_count: f64) -> f64 {
        let mut diff_value =
            (5.0 * (self.attrs.stars / 0.115).max(1.0) - 4.0).powf(2.25) / 1150.0;

        let len_bonus = 1.0 + 0.1 * (self.total_hits() / 1500.0).min(1.0);
        diff_value *= len_bonus;

        diff_value *= 0.986_f64.powf(effective_miss_count);

        if self.mods.ez() {
            diff_value *= 0.985;
        }

        if self.mods.hd() {
            diff_value *= 1.025;
        }

        if self.mods.hr() {
            diff_value *= 1.05;
        }

        if self.mods.fl() {
            diff_value *= 1.05 * len_bonus;
        }

        diff_value * self.acc.powi(2)
    }

    fn compute_accuracy_value(&self) -> f64 {
        if self.attrs.hit_window <= 0.0 {
            return 0.0;
        }

        let mut acc_value = (60.0 / self.attrs.hit_window).powf(1.1)
            * self.acc.powi(8)
            * self.attrs.stars.powf(0.4)
            * 27.0;

        let len_bonus = (self.total_hits() / 1500.0).powf(0.3).min(1.15);
        acc_value *= len_bonus;

        // Slight HDFL bonus for accuracy
        if self.mods.hd() && self.mods.fl() {
            acc_value *= 1.075_f64.max(1.05 * len_bonus);
        }

        acc_value
    }

    /// Misses weigh more on maps with few successful hits.
    fn effective_miss_count(&self) -> f64 {
        let successful = f64::from(self.state.n300 + self.state.n100);

        (1000.0 / successful.max(1.0)).max(1.0) * f64::from(self.state.misses)
    }

    fn total_hits(&self) -> f64 {
        f64::from(self.state.total_hits(GameMode::Taiko))
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
