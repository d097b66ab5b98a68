use rosu_map::section::general::GameMode;

use crate::{
    any::{difficulty::ModsDependent, CalculateError},
    model::mods::GameMods,
    util::difficulty::difficulty_range,
    Difficulty,
};

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s attributes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatmapAttributes {
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt` in milliseconds.
    pub ar: f64,
    /// Hit window for overall difficulty i.e. time to hit a 300 ("Great") in milliseconds.
    pub od: f64,
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    mode: GameMode,
    ar: ModsDependent,
    od: ModsDependent,
    cs: ModsDependent,
    hp: ModsDependent,
    mods: GameMods,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const AR_MIN: f64 = 1800.0;
    const AR_AVG: f64 = 1200.0;
    const AR_MAX: f64 = 450.0;

    const OSU_MIN: f64 = 80.0;
    const OSU_AVG: f64 = 50.0;
    const OSU_MAX: f64 = 20.0;

    const TAIKO_MIN: f64 = 50.0;
    const TAIKO_AVG: f64 = 35.0;
    const TAIKO_MAX: f64 = 20.0;

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// The mode will be `GameMode::Osu` and attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            mode: GameMode::Osu,
            ar: ModsDependent::new(5.0),
            od: ModsDependent::new(5.0),
            cs: ModsDependent::new(5.0),
            hp: ModsDependent::new(5.0),
            mods: GameMods::NM,
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes and mode.
    pub fn map(self, map: &Beatmap) -> Self {
        Self {
            mode: map.mode,
            ar: ModsDependent::new(map.approach_rate()),
            od: ModsDependent::new(map.od),
            cs: ModsDependent::new(map.cs),
            hp: ModsDependent::new(map.hp),
            mods: GameMods::NM,
            clock_rate: None,
        }
    }

    /// Specify the approach rate.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn ar(self, ar: f32, with_mods: bool) -> Self {
        Self {
            ar: ModsDependent {
                value: ar,
                with_mods,
            },
            ..self
        }
    }

    /// Specify the overall difficulty.
    ///
    /// See [`BeatmapAttributesBuilder::ar`] for `with_mods`.
    pub const fn od(self, od: f32, with_mods: bool) -> Self {
        Self {
            od: ModsDependent {
                value: od,
                with_mods,
            },
            ..self
        }
    }

    /// Specify the circle size.
    ///
    /// See [`BeatmapAttributesBuilder::ar`] for `with_mods`.
    pub const fn cs(self, cs: f32, with_mods: bool) -> Self {
        Self {
            cs: ModsDependent {
                value: cs,
                with_mods,
            },
            ..self
        }
    }

    /// Specify the drain rate.
    ///
    /// See [`BeatmapAttributesBuilder::ar`] for `with_mods`.
    pub const fn hp(self, hp: f32, with_mods: bool) -> Self {
        Self {
            hp: ModsDependent {
                value: hp,
                with_mods,
            },
            ..self
        }
    }

    /// Specify the mods.
    pub const fn mods(self, mods: GameMods) -> Self {
        Self { mods, ..self }
    }

    /// Specify a custom clock rate.
    ///
    /// It takes precedence over the clock rate implied by mods.
    pub const fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    /// Specify a [`GameMode`].
    pub const fn mode(self, mode: GameMode) -> Self {
        Self { mode, ..self }
    }

    /// Specify all settings through [`Difficulty`].
    pub fn difficulty(self, difficulty: &Difficulty) -> Self {
        Self {
            mode: self.mode,
            ar: difficulty.ar.unwrap_or(self.ar),
            od: difficulty.od.unwrap_or(self.od),
            cs: difficulty.cs.unwrap_or(self.cs),
            hp: difficulty.hp.unwrap_or(self.hp),
            mods: difficulty.mods,
            clock_rate: difficulty.clock_rate,
        }
    }

    /// The clock rate, either the custom one or the one implied by mods.
    pub fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> Result<HitWindows, CalculateError> {
        let clock_rate = validate_clock_rate(self.get_clock_rate())?;

        Ok(self.hit_windows_unchecked(clock_rate))
    }

    fn hit_windows_unchecked(&self, clock_rate: f64) -> HitWindows {
        let mods = self.mods;

        let ar_clock_rate = if self.ar.with_mods { 1.0 } else { clock_rate };
        let od_clock_rate = if self.od.with_mods { 1.0 } else { clock_rate };

        let mod_mult = |val: f32| {
            if mods.hr() {
                (val * 1.4).min(10.0)
            } else if mods.ez() {
                val * 0.5
            } else {
                val
            }
        };

        let raw_ar = if self.ar.with_mods {
            self.ar.value
        } else {
            mod_mult(self.ar.value)
        };

        let preempt = difficulty_range(
            f64::from(raw_ar),
            Self::AR_MIN,
            Self::AR_AVG,
            Self::AR_MAX,
        ) / ar_clock_rate;

        let raw_od = if self.od.with_mods {
            self.od.value
        } else {
            mod_mult(self.od.value)
        };

        let (min, avg, max) = match self.mode {
            GameMode::Taiko => (Self::TAIKO_MIN, Self::TAIKO_AVG, Self::TAIKO_MAX),
            GameMode::Osu | GameMode::Catch | GameMode::Mania => {
                (Self::OSU_MIN, Self::OSU_AVG, Self::OSU_MAX)
            }
        };

        let hit_window = difficulty_range(f64::from(raw_od), min, avg, max) / od_clock_rate;

        HitWindows {
            ar: preempt,
            od: hit_window,
        }
    }

    /// Calculate the [`BeatmapAttributes`].
    ///
    /// Fails if the clock rate is not strictly positive.
    pub fn build(&self) -> Result<BeatmapAttributes, CalculateError> {
        let mods = self.mods;
        let clock_rate = validate_clock_rate(self.get_clock_rate())?;

        // HP
        let mut hp = self.hp.value;

        if !self.hp.with_mods {
            hp *= mods.od_ar_hp_multiplier() as f32;
        }

        hp = hp.min(10.0);

        // CS
        let mut cs = self.cs.value;

        if !self.cs.with_mods {
            if mods.hr() {
                cs = (cs * 1.3).min(10.0);
            } else if mods.ez() {
                cs *= 0.5;
            }
        }

        let hit_windows = self.hit_windows_unchecked(clock_rate);
        let HitWindows { ar, od } = hit_windows;

        // AR
        let ar = if ar > Self::AR_AVG {
            (Self::AR_MIN - ar) / 120.0
        } else {
            (Self::AR_AVG - ar) / 150.0 + 5.0
        };

        // OD
        let od = match self.mode {
            GameMode::Taiko => (Self::TAIKO_MIN - od) / (Self::TAIKO_MIN - Self::TAIKO_AVG) * 5.0,
            GameMode::Osu | GameMode::Catch | GameMode::Mania => (Self::OSU_MIN - od) / 6.0,
        };

        Ok(BeatmapAttributes {
            ar,
            od,
            cs: f64::from(cs),
            hp: f64::from(hp),
            clock_rate,
            hit_windows,
        })
    }
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_clock_rate(clock_rate: f64) -> Result<f64, CalculateError> {
    if clock_rate.is_finite() && clock_rate > 0.0 {
        Ok(clock_rate)
    } else {
        Err(CalculateError::InvalidClockRate(clock_rate))
    }
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn consider_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.5, false)
            .mods(GameMods::DT)
            .build()
            .unwrap();

        let expected = 10.0;

        assert!(attrs.ar.eq(expected), "{} != {expected}", attrs.ar);
    }

    #[test]
    fn skip_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.5, true)
            .mods(GameMods::DT)
            .build()
            .unwrap();

        let expected = 8.5;

        assert!(attrs.ar.eq(expected), "{} != {expected}", attrs.ar);
    }

    #[test]
    fn custom_clock_rate_overrides_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .od(8.0, false)
            .mods(GameMods::DT)
            .clock_rate(1.0)
            .build()
            .unwrap();

        assert!(attrs.od.eq(8.0), "{} != 8", attrs.od);
        assert!(attrs.clock_rate.eq(1.0));
    }

    #[test]
    fn hard_rock_and_easy() {
        let hr = BeatmapAttributesBuilder::new()
            .ar(9.0, false)
            .cs(4.0, false)
            .hp(8.0, false)
            .mods(GameMods::HR)
            .build()
            .unwrap();

        assert!(hr.ar.eq(10.0), "{} != 10", hr.ar);
        assert!((hr.cs - 5.2).abs() < 1e-5, "{} != 5.2", hr.cs);
        assert!(hr.hp.eq(10.0), "{} != 10", hr.hp);

        let ez = BeatmapAttributesBuilder::new()
            .cs(4.0, false)
            .mods(GameMods::EZ)
            .build()
            .unwrap();

        assert!(ez.cs.eq(2.0), "{} != 2", ez.cs);
    }

    #[test]
    fn half_time_windows() {
        let windows = BeatmapAttributesBuilder::new()
            .ar(5.0, false)
            .od(5.0, false)
            .mods(GameMods::HT)
            .hit_windows()
            .unwrap();

        assert!(windows.ar.eq(1600.0), "{} != 1600", windows.ar);
        assert!(windows.od.eq(50.0 / 0.75), "{} != {}", windows.od, 50.0 / 0.75);
    }

    #[test]
    fn taiko_od_roundtrip() {
        let attrs = BeatmapAttributesBuilder::new()
            .mode(GameMode::Taiko)
            .od(7.0, false)
            .build()
            .unwrap();

        assert!((attrs.od - 7.0).abs() < 1e-5, "{} != 7", attrs.od);
    }

    #[test]
    fn reject_invalid_clock_rate() {
        for clock_rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = BeatmapAttributesBuilder::new().clock_rate(clock_rate).build();

            assert!(matches!(res, Err(CalculateError::InvalidClockRate(_))));
        }
    }
}
