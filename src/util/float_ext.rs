pub trait FloatExt: Sized {
    /// `self == other`
    fn eq(self, other: Self) -> bool;

    /// Replace non-finite values with `fallback`.
    fn finite_or(self, fallback: Self) -> Self;
}

macro_rules! impl_float_ext {
    ( $ty:ty ) => {
        impl FloatExt for $ty {
            fn eq(self, other: Self) -> bool {
                (self - other).abs() < <$ty>::EPSILON
            }

            fn finite_or(self, fallback: Self) -> Self {
                if self.is_finite() {
                    self
                } else {
                    fallback
                }
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);
