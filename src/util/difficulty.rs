/// Maps a difficulty setting onto a time span in milliseconds.
///
/// Piecewise linear with its breakpoint at `5.0`, mapping `0.0`, `5.0`, and
/// `10.0` onto `min`, `mid`, and `max` respectively.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn range_breakpoints() {
        assert!(difficulty_range(0.0, 1800.0, 1200.0, 450.0).eq(1800.0));
        assert!(difficulty_range(5.0, 1800.0, 1200.0, 450.0).eq(1200.0));
        assert!(difficulty_range(10.0, 1800.0, 1200.0, 450.0).eq(450.0));

        // not affine across the breakpoint
        let below = difficulty_range(4.0, 1800.0, 1200.0, 450.0) - 1200.0;
        let above = 1200.0 - difficulty_range(6.0, 1800.0, 1200.0, 450.0);
        assert!(below.eq(120.0));
        assert!(above.eq(150.0));
    }
}
