use num_traits::Float;

pub fn gauss<F: Float>(x: F, c: F) -> F {
    let two = F::one() + F::one();

    (-((x * x) / (two * c * c))).exp()
}

#[inline]
pub fn lerp<F: Float>(from: F, to: F, factor: F) -> F {
    from * (F::one() - factor) + to * factor
}

/// Clamps into `[lo, hi]`, mapping NaN to `lo`.
#[inline]
pub fn clamp_finite<F: Float>(x: F, lo: F, hi: F) -> F {
    if x.is_nan() {
        lo
    } else {
        x.max(lo).min(hi)
    }
}
