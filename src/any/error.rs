use rosu_map::section::general::GameMode;

/// All the ways a calculation can fail.
///
/// Degenerate numeric values never surface here; they are replaced by
/// fallback estimates instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CalculateError {
    #[error("clock rate must be finite and positive, got {0}")]
    InvalidClockRate(f64),
    #[error("calculations for mode {0:?} are not supported")]
    UnsupportedMode(GameMode),
    #[error("expected attributes for mode {expected:?}, got {actual:?}")]
    AttributesMismatch {
        expected: GameMode,
        actual: GameMode,
    },
    #[error("no difficulty attributes available for the calculation")]
    MissingAttributes,
}
