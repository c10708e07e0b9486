pub mod ball;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod floor;
pub mod frame;
pub mod gesture;
pub mod history;
pub mod landmark;
pub mod math;
pub mod physics;
pub mod point;
pub mod render;
pub mod scene;
pub mod score;
pub mod sketch;
pub mod smoothing;

mod circular_queue;

pub use config::SketchConfig;
pub use frame::Frame;
pub use landmark::{Hand, Handedness, Handpose, Landmark, LandmarkRecord};
pub use physics::{PhysicsWorld, RapierWorld};
pub use sketch::{DebugEntry, Sketch};

/// Hand detector feeding the sketch, polled once per frame.
pub trait PoseSource {
    /// May return fewer than two hands, or none.
    fn hands(&mut self) -> Vec<Hand>;
}

/// Fire-and-forget sound request.
pub trait AudioTrigger {
    fn play_hit(&mut self);
}

/// Audio sink that drops every request.
pub struct Silent;

impl AudioTrigger for Silent {
    #[inline]
    fn play_hit(&mut self) {}
}
