use crate::landmark::{Handpose, LandmarkRecord, Side};
use crate::math::clamp_finite;

pub const FINGER_COUNT: usize = 5;

/// Upper bound of a curl distance.
pub const CURL_MAX: f32 = 120.0;
pub const CURL_MULTIPLIER: f32 = 1.3;

/// Landmark index pair (start, end) measured for finger `n`.
#[inline]
pub fn finger_span(n: usize) -> (usize, usize) {
    let start = if n == 0 { 2 } else { 4 * n + 1 };

    (start, 4 * n + 4)
}

/// Per-finger curl distances, interleaved: `2n` is left finger `n`,
/// `2n + 1` is right finger `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurlDistances {
    values: [f32; 2 * FINGER_COUNT],
    max: f32,
    multiplier: f32,
}

impl CurlDistances {
    pub fn new(max: f32, multiplier: f32) -> Self {
        Self {
            values: [0.0; 2 * FINGER_COUNT],
            max,
            multiplier,
        }
    }

    /// Recomputes the slots of every detected side. A side without a usable
    /// record keeps last frame's values.
    pub fn update(&mut self, hands: &Handpose) {
        for side in Side::BOTH {
            let record = hands.side(side);
            let parity = match side {
                Side::Left => 0,
                Side::Right => 1,
            };

            if let Some(curls) = self.measure(record) {
                for (n, d) in curls.iter().enumerate() {
                    self.values[2 * n + parity] = *d;
                }
            }
        }
    }

    fn measure(&self, record: &LandmarkRecord) -> Option<[f32; FINGER_COUNT]> {
        if !record.is_canonical() {
            return None;
        }

        let mut out = [0.0; FINGER_COUNT];
        for (n, d) in out.iter_mut().enumerate() {
            let (start, end) = finger_span(n);
            let (start, end) = (record.get(start)?, record.get(end)?);

            *d = clamp_finite((start.y - end.y) * self.multiplier, 0.0, self.max);
        }

        Some(out)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> f32 {
        self.values[idx]
    }

    /// (left, right) distances for finger `n`.
    #[inline]
    pub fn pair(&self, n: usize) -> (f32, f32) {
        (self.values[2 * n], self.values[2 * n + 1])
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

impl Default for CurlDistances {
    fn default() -> Self {
        Self::new(CURL_MAX, CURL_MULTIPLIER)
    }
}
