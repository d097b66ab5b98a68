pub use rosu_map::section::general::GameMode;

use super::beatmap::Beatmap;

/// Conversion of a [`Beatmap`] from one mode into another.
///
/// The conversion itself is not part of this crate; implement this trait to
/// plug in a converter and apply it through [`Beatmap::convert_with`].
pub trait ModeConverter {
    /// Convert the map into the given mode.
    ///
    /// Return `None` if the map cannot be converted.
    fn convert(&self, map: &Beatmap, mode: GameMode) -> Option<Beatmap>;
}

impl<F> ModeConverter for F
where
    F: Fn(&Beatmap, GameMode) -> Option<Beatmap>,
{
    fn convert(&self, map: &Beatmap, mode: GameMode) -> Option<Beatmap> {
        self(map, mode)
    }
}

/// Error when failing to convert a [`Beatmap`] through a [`ModeConverter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Cannot convert an already converted map
    #[error("cannot convert already converted map")]
    AlreadyConverted,
    /// Cannot convert from [`GameMode`] `from` to `to`
    #[error("cannot convert from {from:?} to {to:?}")]
    Convert { from: GameMode, to: GameMode },
}
