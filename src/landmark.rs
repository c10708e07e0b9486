use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Number of points the detector reports for one hand.
pub const LANDMARK_COUNT: usize = 21;

/// One tracked point of a hand, in canvas pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "p", default)]
    pub score: f32,
}

impl Landmark {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, score: 1.0 }
    }

    #[inline(always)]
    pub fn point(&self) -> na::Point2<f32> {
        na::Point2::new(self.x, self.y)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// Raw detector output for one hand
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Hand {
    pub handedness: Handedness,
    pub landmarks: Vec<Landmark>,
    pub score: f32,
}

/// Landmarks of one hand side. Empty means "not detected this frame".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkRecord(Vec<Landmark>);

impl LandmarkRecord {
    #[inline]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Builds a record, rejecting anything but the canonical 21-point layout.
    pub fn from_points(points: Vec<Landmark>) -> Result<Self, Error> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::LandmarkCount {
                expected: LANDMARK_COUNT,
                found: points.len(),
            });
        }

        Ok(Self(points))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.0.len() == LANDMARK_COUNT
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Landmark> {
        self.0.get(idx)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Landmark] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

impl From<Handedness> for Side {
    fn from(h: Handedness) -> Self {
        match h {
            Handedness::Left => Side::Left,
            Handedness::Right => Side::Right,
        }
    }
}

/// Two-slot (left/right) landmark record for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handpose {
    pub left: LandmarkRecord,
    pub right: LandmarkRecord,
}

impl Handpose {
    #[inline]
    pub fn side(&self, side: Side) -> &LandmarkRecord {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[inline]
    pub fn side_mut(&mut self, side: Side) -> &mut LandmarkRecord {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Converts the detector output into the fixed two-slot layout.
///
/// Hands without the canonical point count are dropped. When the detector
/// reports the same side twice, the more confident hand wins.
pub fn normalize(hands: &[Hand]) -> Handpose {
    let mut pose = Handpose::default();
    let mut best = [f32::NEG_INFINITY; 2];

    for hand in hands {
        let side = Side::from(hand.handedness);
        let slot = side as usize;

        if hand.score <= best[slot] {
            continue;
        }

        match LandmarkRecord::from_points(hand.landmarks.clone()) {
            Ok(record) => {
                *pose.side_mut(side) = record;
                best[slot] = hand.score;
            }
            Err(err) => log::debug!("skipping {} hand: {}", hand.handedness.label(), err),
        }
    }

    pose
}
