use crate::landmark::{self, Hand, Handpose};

/// Input of one draw tick: the canvas size, the detector's hands and the
/// host clock in seconds.
pub struct Frame {
    pub dims: (u32, u32),
    pub hands: Vec<Hand>,
    pub timestamp: f32,
}

impl Frame {
    pub fn new(dims: (u32, u32), hands: Vec<Hand>, timestamp: f32) -> Self {
        Self {
            dims,
            hands,
            timestamp,
        }
    }

    /// Canvas size in world units, or `None` when the host reports no area.
    pub fn canvas_dims(&self) -> Option<(f32, f32)> {
        match self.dims {
            (0, _) | (_, 0) => None,
            (w, h) => Some((w as f32, h as f32)),
        }
    }

    /// Hands of this frame keyed by side.
    #[inline]
    pub fn handpose(&self) -> Handpose {
        landmark::normalize(&self.hands)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::tests::flat_hand;
    use crate::landmark::Handedness;

    #[test]
    fn test_canvas_dims() {
        assert_eq!(Frame::new((640, 480), Vec::new(), 0.0).canvas_dims(), Some((640.0, 480.0)));
        assert_eq!(Frame::new((0, 480), Vec::new(), 0.0).canvas_dims(), None);
        assert_eq!(Frame::new((640, 0), Vec::new(), 0.0).canvas_dims(), None);
    }

    #[test]
    fn test_handpose_keys_by_side() {
        let frame = Frame::new(
            (640, 480),
            vec![
                Hand {
                    handedness: Handedness::Right,
                    landmarks: flat_hand(10.0),
                    score: 0.8,
                },
                Hand {
                    handedness: Handedness::Left,
                    landmarks: flat_hand(10.0)[..5].to_vec(),
                    score: 0.9,
                },
            ],
            0.0,
        );

        let pose = frame.handpose();
        assert_eq!(pose.right.len(), 21);
        assert!(pose.left.is_empty());
        assert_eq!(frame.iter().count(), 2);
    }
}
