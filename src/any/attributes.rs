use rosu_map::section::general::GameMode;

use crate::{
    osu::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    taiko::{TaikoDifficultyAttributes, TaikoPerformanceAttributes},
};

use super::{error::CalculateError, performance::Performance};

/// The result of a difficulty calculation based on the mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifficultyAttributes {
    /// osu!standard difficulty calculation result.
    Osu(OsuDifficultyAttributes),
    /// osu!taiko difficulty calculation result.
    Taiko(TaikoDifficultyAttributes),
}

impl DifficultyAttributes {
    /// The star value.
    pub const fn stars(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.stars,
            Self::Taiko(attrs) => attrs.stars,
        }
    }

    /// The maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        match self {
            Self::Osu(attrs) => attrs.max_combo,
            Self::Taiko(attrs) => attrs.max_combo,
        }
    }

    /// The amount of hitobjects that were considered.
    pub const fn n_objects(&self) -> u32 {
        match self {
            Self::Osu(attrs) => attrs.n_objects(),
            Self::Taiko(attrs) => attrs.n_objects(),
        }
    }

    /// The mode of the attributes.
    pub const fn mode(&self) -> GameMode {
        match self {
            Self::Osu(_) => GameMode::Osu,
            Self::Taiko(_) => GameMode::Taiko,
        }
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        Performance::from_attributes(self)
    }
}

/// The result of a performance calculation based on the mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PerformanceAttributes {
    /// osu!standard performance calculation result.
    Osu(OsuPerformanceAttributes),
    /// osu!taiko performance calculation result.
    Taiko(TaikoPerformanceAttributes),
}

impl PerformanceAttributes {
    /// The pp value.
    pub const fn pp(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.pp,
            Self::Taiko(attrs) => attrs.pp,
        }
    }

    /// The star value.
    pub const fn stars(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.stars(),
            Self::Taiko(attrs) => attrs.stars(),
        }
    }

    /// The maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        match self {
            Self::Osu(attrs) => attrs.max_combo(),
            Self::Taiko(attrs) => attrs.max_combo(),
        }
    }

    /// The mode of the attributes.
    pub const fn mode(&self) -> GameMode {
        match self {
            Self::Osu(_) => GameMode::Osu,
            Self::Taiko(_) => GameMode::Taiko,
        }
    }

    /// Difficulty attributes that were used for the performance calculation.
    pub fn difficulty_attributes(&self) -> DifficultyAttributes {
        match self {
            Self::Osu(attrs) => DifficultyAttributes::Osu(attrs.difficulty.clone()),
            Self::Taiko(attrs) => DifficultyAttributes::Taiko(attrs.difficulty.clone()),
        }
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        Performance::from_attributes(self)
    }
}

impl From<PerformanceAttributes> for DifficultyAttributes {
    fn from(attrs: PerformanceAttributes) -> Self {
        match attrs {
            PerformanceAttributes::Osu(attrs) => Self::Osu(attrs.difficulty),
            PerformanceAttributes::Taiko(attrs) => Self::Taiko(attrs.difficulty),
        }
    }
}

macro_rules! impl_mode_conversions {
    ( $( $mode:ident: $diff:ident, $perf:ident; )* ) => {
        $(
            impl From<$diff> for DifficultyAttributes {
                fn from(attrs: $diff) -> Self {
                    Self::$mode(attrs)
                }
            }

            impl From<$perf> for DifficultyAttributes {
                fn from(attrs: $perf) -> Self {
                    Self::$mode(attrs.difficulty)
                }
            }

            impl From<$perf> for PerformanceAttributes {
                fn from(attrs: $perf) -> Self {
                    Self::$mode(attrs)
                }
            }

            impl TryFrom<DifficultyAttributes> for $diff {
                type Error = CalculateError;

                fn try_from(attrs: DifficultyAttributes) -> Result<Self, Self::Error> {
                    match attrs {
                        DifficultyAttributes::$mode(attrs) => Ok(attrs),
                        other => Err(CalculateError::AttributesMismatch {
                            expected: GameMode::$mode,
                            actual: other.mode(),
                        }),
                    }
                }
            }

            impl TryFrom<PerformanceAttributes> for $perf {
                type Error = CalculateError;

                fn try_from(attrs: PerformanceAttributes) -> Result<Self, Self::Error> {
                    match attrs {
                        PerformanceAttributes::$mode(attrs) => Ok(attrs),
                        other => Err(CalculateError::AttributesMismatch {
                            expected: GameMode::$mode,
                            actual: other.mode(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_mode_conversions! {
    Osu: OsuDifficultyAttributes, OsuPerformanceAttributes;
    Taiko: TaikoDifficultyAttributes, TaikoPerformanceAttributes;
}
