use crate::history::HandposeHistory;
use crate::landmark::{Handpose, Landmark, LandmarkRecord, Side, LANDMARK_COUNT};
use crate::math;
use nalgebra as na;

/// Jitter filter over the handpose history.
///
/// A detected side is the gaussian-weighted mean of the canonical records
/// among the newest `window` history entries, weighted by age in frames.
/// An undetected side holds the most recent detected record still in
/// history, and becomes empty once that record has been evicted.
#[derive(Debug, Clone)]
pub struct Smoother {
    window: usize,
    sigma: f32,
}

impl Smoother {
    pub fn new(window: usize, sigma: f32) -> Self {
        Self {
            window: window.max(1),
            sigma: sigma.max(f32::EPSILON),
        }
    }

    /// `history` is expected to already contain `raw` as its newest entry.
    pub fn smooth(&self, raw: &Handpose, history: &HandposeHistory) -> Handpose {
        let mut out = Handpose::default();

        for side in Side::BOTH {
            *out.side_mut(side) = self.smooth_side(raw.side(side), side, history);
        }

        out
    }

    fn smooth_side(
        &self,
        raw: &LandmarkRecord,
        side: Side,
        history: &HandposeHistory,
    ) -> LandmarkRecord {
        if raw.is_empty() {
            return history
                .latest_detected(side)
                .cloned()
                .unwrap_or_else(LandmarkRecord::empty);
        }

        let mut sum = [(na::Vector2::<f32>::zeros(), 0.0f32); LANDMARK_COUNT];
        let mut wsum = 0.0;

        for (age, record) in history.window(side, self.window) {
            if !record.is_canonical() {
                continue;
            }

            let w = math::gauss(age as f32, self.sigma);
            for (acc, lm) in sum.iter_mut().zip(record.iter()) {
                acc.0 += lm.point().coords * w;
                acc.1 += lm.score * w;
            }
            wsum += w;
        }

        if wsum <= 0.0 {
            // raw was never pushed into history
            return raw.clone();
        }

        let points = sum
            .iter()
            .map(|(pos, score)| Landmark {
                x: pos.x / wsum,
                y: pos.y / wsum,
                score: score / wsum,
            })
            .collect();

        LandmarkRecord::from_points(points).unwrap_or_else(|_| raw.clone())
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(4, 1.5)
    }
}
