use crate::circular_queue::CircularQueue;
use crate::landmark::{Handpose, LandmarkRecord, Side};

/// Bounded per-side lookback of normalized records, empty frames included.
#[derive(Debug, Clone)]
pub struct HandposeHistory {
    left: CircularQueue<LandmarkRecord>,
    right: CircularQueue<LandmarkRecord>,
}

impl HandposeHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            left: CircularQueue::with_capacity(capacity),
            right: CircularQueue::with_capacity(capacity),
        }
    }

    pub fn update(&mut self, raw: &Handpose) {
        self.left.push(raw.left.clone());
        self.right.push(raw.right.clone());
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.left.capacity()
    }

    #[inline]
    pub fn len(&self, side: Side) -> usize {
        self.queue(side).len()
    }

    #[inline]
    pub fn is_empty(&self, side: Side) -> bool {
        self.queue(side).is_empty()
    }

    /// Records of one side, newest first.
    #[inline]
    pub fn iter(&self, side: Side) -> impl Iterator<Item = &LandmarkRecord> {
        self.queue(side).iter()
    }

    /// The `n` newest records of one side with their age in frames.
    #[inline]
    pub fn window(&self, side: Side, n: usize) -> impl Iterator<Item = (usize, &LandmarkRecord)> {
        self.queue(side).window(n)
    }

    pub fn latest_detected(&self, side: Side) -> Option<&LandmarkRecord> {
        self.iter(side).find(|r| !r.is_empty())
    }

    #[inline]
    fn queue(&self, side: Side) -> &CircularQueue<LandmarkRecord> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::tests::flat_hand;

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut history = HandposeHistory::new(4);
        for i in 0..10 {
            let pose = Handpose {
                left: LandmarkRecord::from_points(flat_hand(i as f32)).unwrap(),
                right: LandmarkRecord::empty(),
            };
            history.update(&pose);
            assert!(history.len(Side::Left) <= 4);
            assert!(history.len(Side::Right) <= 4);
        }
        assert_eq!(history.capacity(), 4);
        let newest = history.iter(Side::Left).next().and_then(|r| r.get(0));
        assert_eq!(newest.map(|p| p.y), Some(9.0));
    }

    #[test]
    fn test_latest_detected_skips_empty_frames() {
        let mut history = HandposeHistory::new(4);
        history.update(&Handpose {
            left: LandmarkRecord::from_points(flat_hand(3.0)).unwrap(),
            right: LandmarkRecord::empty(),
        });
        history.update(&Handpose::default());

        let held = history.latest_detected(Side::Left);
        assert_eq!(held.and_then(|r| r.get(0)).map(|p| p.y), Some(3.0));
        assert!(history.latest_detected(Side::Right).is_none());

        let ages: Vec<_> = history.window(Side::Left, 4).map(|(age, r)| (age, r.is_empty())).collect();
        assert_eq!(ages, vec![(0, true), (1, false)]);

        history.clear();
        assert!(history.is_empty(Side::Left));
        assert!(history.latest_detected(Side::Left).is_none());
    }
}
