use crate::foundation::geometry::Size;

/// SplitMix64. Small, seedable, and good enough for ranged color picks;
/// callers thread an explicit seed so renders stay reproducible.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SplitMix64(u64);

impl SplitMix64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub(crate) fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Largest uniform factor by which `child` fits inside `target` on both axes.
///
/// Degenerate child extents contribute no constraint; a fully empty child
/// fits at its natural scale.
pub(crate) fn fit_scale(target: Size, child: Size) -> f64 {
    let mut k = f64::INFINITY;
    if child.w > 0.0 {
        k = k.min(target.w / child.w);
    }
    if child.h > 0.0 {
        k = k.min(target.h / child.h);
    }
    if k.is_finite() { k } else { 1.0 }
}
