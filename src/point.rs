use nalgebra as na;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointState {
    Alive,
    Hit,
    Dying { since: f32 },
    Dead,
}

/// Collectible target.
#[derive(Debug, Clone)]
pub struct Point {
    pub position: na::Point2<f32>,
    pub size: f32,
    pub state: PointState,
}

impl Point {
    pub fn new(position: na::Point2<f32>, size: f32) -> Self {
        Self {
            position,
            size,
            state: PointState::Alive,
        }
    }

    #[inline]
    pub fn overlaps(&self, center: na::Point2<f32>, radius: f32) -> bool {
        na::distance(&self.position, &center) < radius + self.size / 2.0
    }

    /// Alive -> Hit when any of `balls` (center, radius) touches the point.
    pub fn check_hit<I>(&mut self, balls: I) -> bool
    where
        I: IntoIterator<Item = (na::Point2<f32>, f32)>,
    {
        if self.state == PointState::Alive
            && balls.into_iter().any(|(c, r)| self.overlaps(c, r))
        {
            self.state = PointState::Hit;
        }

        self.state == PointState::Hit
    }

    pub fn start_dying(&mut self, now: f32) {
        if self.state == PointState::Hit {
            self.state = PointState::Dying { since: now };
        }
    }

    /// Dying -> Dead once `duration` has elapsed.
    pub fn advance(&mut self, now: f32, duration: f32) {
        if let PointState::Dying { since } = self.state {
            if now - since >= duration {
                self.state = PointState::Dead;
            }
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == PointState::Dead
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == PointState::Alive
    }
}
