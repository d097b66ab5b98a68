use rosu_map::section::general::GameMode;

use super::performance::{HitResultPriority, PerformanceSettings};

/// Aggregation for a score's current state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreState {
    /// Maximum combo that the score has had so far. **Not** the maximum
    /// possible combo of the map so far.
    pub max_combo: u32,
    /// Amount of current 300s.
    pub n300: u32,
    /// Amount of current 100s (150s for osu!taiko).
    pub n100: u32,
    /// Amount of current 50s.
    ///
    /// Irrelevant for osu!taiko.
    pub n50: u32,
    /// Amount of current misses.
    pub misses: u32,
}

impl ScoreState {
    /// Create a new empty score state.
    pub const fn new() -> Self {
        Self {
            max_combo: 0,
            n300: 0,
            n100: 0,
            n50: 0,
            misses: 0,
        }
    }

    /// Return the total amount of hits by adding everything up based on the
    /// mode.
    pub const fn total_hits(&self, mode: GameMode) -> u32 {
        let amount = self.n300 + self.n100 + self.misses;

        match mode {
            GameMode::Taiko => amount,
            _ => amount + self.n50,
        }
    }

    /// Calculate the accuracy between `0.0` and `1.0` for this state.
    ///
    /// A state without any hits has an accuracy of `1.0`.
    pub fn accuracy(&self, mode: GameMode) -> f64 {
        let total_hits = self.total_hits(mode);

        if total_hits == 0 {
            return 1.0;
        }

        let (numerator, denominator) = match mode {
            GameMode::Taiko => (2 * self.n300 + self.n100, 2 * total_hits),
            _ => (6 * self.n300 + 2 * self.n100 + self.n50, 6 * total_hits),
        };

        f64::from(numerator) / f64::from(denominator)
    }

    /// Generate the state described by `settings`.
    ///
    /// Unspecified hitresults are distributed to meet the given accuracy.
    /// `n_objects` and `max_combo` bound the amount of hits and the combo.
    pub(crate) fn generate(
        settings: &PerformanceSettings,
        mode: GameMode,
        n_objects: u32,
        max_combo: u32,
    ) -> Self {
        let total_hits = settings
            .difficulty
            .passed_objects
            .map_or(n_objects, |passed| passed.min(n_objects));

        let misses = settings.misses.map_or(0, |n| n.min(total_hits));
        let remaining = total_hits - misses;

        let acc = settings.accuracy.filter(|acc| !acc.is_nan()).map(|acc| {
            if !(0.0..=100.0).contains(&acc) {
                tracing::debug!(acc, "clamping accuracy");
            }

            acc.clamp(0.0, 100.0)
        });

        let priority = settings.hitresult_priority;

        let (n300, n100, n50) = match mode {
            GameMode::Taiko => {
                let tiers = Tiers {
                    values: [300, 150],
                    fixed: [settings.n300, settings.n100],
                };

                let [n300, n100] = tiers.distribute(remaining, total_hits, acc, priority);

                (n300, n100, 0)
            }
            _ => {
                let tiers = Tiers {
                    values: [300, 100, 50],
                    fixed: [settings.n300, settings.n100, settings.n50],
                };

                let [n300, n100, n50] = tiers.distribute(remaining, total_hits, acc, priority);

                (n300, n100, n50)
            }
        };

        let max_possible_combo = max_combo.saturating_sub(misses);

        let max_combo = settings.combo.map_or(max_possible_combo, |combo| {
            if combo > max_possible_combo {
                tracing::debug!(combo, max_possible_combo, "clamping combo");
            }

            combo.min(max_possible_combo)
        });

        Self {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        }
    }
}

/// Hitresults of a mode ordered from highest to lowest value.
struct Tiers<const N: usize> {
    values: [u32; N],
    /// Counts specified by the caller.
    fixed: [Option<u32>; N],
}

impl<const N: usize> Tiers<N> {
    const EPSILON: f64 = 1e-6;

    /// Distribute `remaining` hits among the tiers.
    ///
    /// Specified counts are kept, clamped from the top tier downwards so they
    /// fit into `remaining`. All other hits go to the unspecified tiers; if
    /// an accuracy percentage is given, the result is the closest
    /// distribution that still reaches it.
    ///
    /// For [`HitResultPriority::BestCase`] hits cascade down one tier at a
    /// time so a tier only receives hits once all higher tiers are empty.
    fn distribute(
        &self,
        remaining: u32,
        total_hits: u32,
        acc: Option<f64>,
        priority: HitResultPriority,
    ) -> [u32; N] {
        let mut counts = [0; N];
        let mut budget = remaining;

        for (count, fixed) in counts.iter_mut().zip(self.fixed) {
            if let Some(fixed) = fixed {
                *count = fixed.min(budget);
                budget -= *count;
            }
        }

        let free: Vec<usize> = (0..N).filter(|&i| self.fixed[i].is_none()).collect();

        let (Some(&top), Some(&bottom)) = (free.first(), free.last()) else {
            // Everything was specified so the leftover goes to the extreme tier
            let idx = match priority {
                HitResultPriority::BestCase => 0,
                HitResultPriority::WorstCase => N - 1,
            };

            counts[idx] += budget;

            return counts;
        };

        let Some(acc) = acc else {
            match priority {
                HitResultPriority::BestCase => counts[top] = budget,
                HitResultPriority::WorstCase => counts[bottom] = budget,
            }

            return counts;
        };

        let target = acc / 100.0 * f64::from(self.values[0]) * f64::from(total_hits);

        match priority {
            HitResultPriority::BestCase => {
                counts[top] = budget;
                let mut score = self.score(&counts);

                for pair in free.windows(2) {
                    let (hi, lo) = (pair[0], pair[1]);
                    let diff = f64::from(self.values[hi] - self.values[lo]);

                    // Demote as many as possible while staying on target
                    let slack = (score - target + Self::EPSILON) / diff;
                    let n = slack.floor().clamp(0.0, f64::from(counts[hi])) as u32;

                    counts[hi] -= n;
                    counts[lo] += n;
                    score -= f64::from(n) * diff;

                    // Lower tiers are only touched once the upper one is used up
                    if counts[hi] > 0 {
                        break;
                    }
                }
            }
            HitResultPriority::WorstCase => {
                counts[bottom] = budget;
                let mut score = self.score(&counts);

                for pair in free.windows(2).rev() {
                    let (hi, lo) = (pair[0], pair[1]);
                    let diff = f64::from(self.values[hi] - self.values[lo]);

                    // Promote until the target is reached
                    let missing = (target - Self::EPSILON - score) / diff;
                    let n = missing.ceil().clamp(0.0, f64::from(counts[lo])) as u32;

                    counts[lo] -= n;
                    counts[hi] += n;
                    score += f64::from(n) * diff;
                }
            }
        }

        counts
    }

    fn score(&self, counts: &[u32; N]) -> f64 {
        counts
            .iter()
            .zip(self.values)
            .map(|(&count, value)| f64::from(count) * f64::from(value))
            .sum()
    }
}
