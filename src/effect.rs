use crate::math;
use nalgebra as na;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectState {
    Alive,
    Dead,
}

/// Expanding ring left where something was hit. Presentation only.
#[derive(Debug, Clone)]
pub struct Effect {
    pub position: na::Point2<f32>,
    pub state: EffectState,
    born_at: f32,
    duration: f32,
    progress: f32,
}

impl Effect {
    pub fn new(position: na::Point2<f32>, now: f32, duration: f32) -> Self {
        Self {
            position,
            state: EffectState::Alive,
            born_at: now,
            duration,
            progress: 0.0,
        }
    }

    pub fn update(&mut self, now: f32) {
        self.progress = ((now - self.born_at) / self.duration).clamp(0.0, 1.0);

        if self.progress >= 1.0 {
            self.state = EffectState::Dead;
        }
    }

    /// 0 at creation, 1 when dead.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn diameter(&self, from: f32, to: f32) -> f32 {
        math::lerp(from, to, self.progress)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == EffectState::Dead
    }
}

/// Flash value set to 1 on a pulse and fading back to 0.
#[derive(Debug, Clone, Default)]
pub struct Pulse {
    value: f32,
    decay: f32,
}

impl Pulse {
    pub fn new(decay: f32) -> Self {
        Self { value: 0.0, decay }
    }

    pub fn pulse(&mut self) {
        self.value = 1.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.value = (self.value - self.decay * dt.max(0.0)).max(0.0);
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}
