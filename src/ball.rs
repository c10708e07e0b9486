use nalgebra as na;

pub type BallId = u32;

/// A falling ball tracked by the scene. The scene owns the only copy of
/// `handle`; once the ball is dropped from tracking its body is gone too.
#[derive(Debug, Clone)]
pub struct Ball<H> {
    pub id: BallId,
    pub handle: H,
    size: f32,
    multiplier: f32,
}

impl<H> Ball<H> {
    pub fn new(id: BallId, handle: H, size: f32) -> Self {
        Self {
            id,
            handle,
            size,
            multiplier: 1.0,
        }
    }

    /// Diameter at multiplier 1.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    #[inline]
    pub fn set_multiplier(&mut self, m: f32) {
        self.multiplier = m;
    }

    #[inline]
    pub fn is_scaled(&self) -> bool {
        self.multiplier != 1.0
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size * self.multiplier / 2.0
    }
}

/// Region in which balls stay tracked: the canvas widened by a margin on
/// the left, right and bottom. Open toward the top so balls can spawn above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new((width, height): (f32, f32), margin: f32) -> Self {
        Self {
            left: -margin,
            right: width + margin,
            bottom: height + margin,
        }
    }

    #[inline]
    pub fn contains(&self, p: na::Point2<f32>) -> bool {
        p.x >= self.left && p.x <= self.right && p.y <= self.bottom
    }
}
