use std::ops::{BitOr, BitOrAssign};

/// Collection of game mods stored through their legacy bit values.
///
/// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
///
/// # Example
///
/// ```
/// use strain_pp::GameMods;
///
/// let mods = GameMods::HD | GameMods::HR;
///
/// assert!(mods.hd() && mods.hr());
/// assert_eq!(mods, GameMods::from(8 + 16));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameMods(u32);

macro_rules! impl_mods_fn {
    ( $( $fn_name:ident, $const_name:ident: $bits:expr; )* ) => {
        impl GameMods {
            $(
                #[doc = concat!("The `", stringify!($const_name), "` bit.")]
                pub const $const_name: Self = Self($bits);
            )*

            $(
                #[doc = concat!("Whether `", stringify!($const_name), "` is set.")]
                pub const fn $fn_name(self) -> bool {
                    self.0 & ($bits) != 0
                }
            )*
        }
    };
}

impl_mods_fn! {
    nf, NF: 1 << 0;
    ez, EZ: 1 << 1;
    td, TD: 1 << 2;
    hd, HD: 1 << 3;
    hr, HR: 1 << 4;
    dt, DT: 1 << 6;
    rx, RX: 1 << 7;
    ht, HT: 1 << 8;
    nc, NC: 1 << 9;
    fl, FL: 1 << 10;
    so, SO: 1 << 12;
}

impl GameMods {
    /// No mods.
    pub const NM: Self = Self(0);

    /// Create mods from their bit values.
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bit values.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no mod is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether all mods of `other` are contained in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The clock rate implied by speed changing mods.
    ///
    /// `DT` (or `NC`) takes precedence over `HT` since setting both is a
    /// caller error.
    pub const fn clock_rate(self) -> f64 {
        if self.dt() || self.nc() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    /// Multiplier for approach rate, overall difficulty, and drain rate.
    pub const fn od_ar_hp_multiplier(self) -> f64 {
        if self.hr() {
            1.4
        } else if self.ez() {
            0.5
        } else {
            1.0
        }
    }
}

impl From<u32> for GameMods {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<GameMods> for u32 {
    fn from(mods: GameMods) -> Self {
        mods.0
    }
}

impl BitOr for GameMods {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for GameMods {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
