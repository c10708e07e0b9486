use serde_derive::Serialize;

use crate::config::SketchConfig;
use crate::error::Error;
use crate::floor::FloorRig;
use crate::frame::Frame;
use crate::gesture::CurlDistances;
use crate::history::HandposeHistory;
use crate::landmark::Handpose;
use crate::physics::{PhysicsWorld, RapierWorld};
use crate::scene::Scene;
use crate::score::ScoreTracker;
use crate::smoothing::Smoother;
use crate::{AudioTrigger, PoseSource};

/// Monitor line, one per detected hand.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DebugEntry {
    pub label: String,
    pub value: f32,
}

/// One play session: hand pipeline, floor rig, physics world and game
/// objects, advanced together by `draw`.
pub struct Sketch<P: PhysicsWorld = RapierWorld> {
    cfg: SketchConfig,
    world: P,
    history: HandposeHistory,
    smoother: Smoother,
    hands: Handpose,
    curls: CurlDistances,
    floor: FloorRig<P::Handle>,
    scene: Scene<P::Handle>,
    score: ScoreTracker,
    debug_log: Vec<DebugEntry>,
}

impl Sketch<RapierWorld> {
    pub fn new(cfg: SketchConfig) -> Result<Self, Error> {
        let world = RapierWorld::new(cfg.gravity, cfg.physics_dt);

        Self::with_world(cfg, world)
    }
}

impl<P: PhysicsWorld> Sketch<P> {
    pub fn with_world(cfg: SketchConfig, mut world: P) -> Result<Self, Error> {
        cfg.validate()?;

        let floor = FloorRig::new(
            &mut world,
            (cfg.width, cfg.height),
            cfg.floor_width,
            cfg.floor_thickness,
            cfg.floor_tilt_offset,
        );
        let scene = Scene::new(&cfg, &mut world);

        Ok(Self {
            history: HandposeHistory::new(cfg.history_capacity),
            smoother: Smoother::new(cfg.smoothing_window, cfg.smoothing_sigma),
            hands: Handpose::default(),
            curls: CurlDistances::new(cfg.curl_max, cfg.curl_multiplier),
            floor,
            scene,
            score: ScoreTracker::new(),
            debug_log: Vec::new(),
            world,
            cfg,
        })
    }

    /// Runs one frame: smoothing, floor kinematics, one physics step, then
    /// the game objects against the stepped world.
    pub fn draw<A: AudioTrigger + ?Sized>(&mut self, frame: &Frame, audio: &mut A) {
        if let Some(dims) = frame.canvas_dims() {
            if dims != (self.cfg.width, self.cfg.height) {
                self.resize(dims);
            }
        }

        let raw = frame.handpose();
        self.history.update(&raw);
        self.hands = self.smoother.smooth(&raw, &self.history);

        self.debug_log = frame
            .iter()
            .map(|hand| DebugEntry {
                label: format!("{} accuracy", hand.handedness.label()),
                value: hand.score,
            })
            .collect();

        self.curls.update(&self.hands);
        self.floor.sync(&self.curls, &mut self.world);

        self.world.step();

        self.scene
            .update(frame.timestamp, &mut self.world, &mut self.score, audio);
        self.score.tick();
    }

    /// Polls `source` and draws a frame at the current canvas size.
    pub fn tick<S, A>(&mut self, source: &mut S, timestamp: f32, audio: &mut A)
    where
        S: PoseSource + ?Sized,
        A: AudioTrigger + ?Sized,
    {
        let frame = Frame::new(
            (self.cfg.width as u32, self.cfg.height as u32),
            source.hands(),
            timestamp,
        );

        self.draw(&frame, audio);
    }

    /// Relayouts the floor and bounds for a new canvas. Landmark history is
    /// dropped since it was recorded in the old canvas coordinates.
    pub fn resize(&mut self, dims: (f32, f32)) {
        log::debug!("canvas resized to {}x{}", dims.0, dims.1);
        self.history.clear();
        self.cfg.width = dims.0;
        self.cfg.height = dims.1;
        self.floor.relayout(dims);
        self.scene.resize(dims);
    }

    #[inline]
    pub fn config(&self) -> &SketchConfig {
        &self.cfg
    }

    #[inline]
    pub fn world(&self) -> &P {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut P {
        &mut self.world
    }

    /// Smoothed landmarks of the last frame.
    #[inline]
    pub fn hands(&self) -> &Handpose {
        &self.hands
    }

    #[inline]
    pub fn history(&self) -> &HandposeHistory {
        &self.history
    }

    #[inline]
    pub fn curls(&self) -> &CurlDistances {
        &self.curls
    }

    #[inline]
    pub fn floor(&self) -> &FloorRig<P::Handle> {
        &self.floor
    }

    #[inline]
    pub fn scene(&self) -> &Scene<P::Handle> {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene<P::Handle> {
        &mut self.scene
    }

    #[inline]
    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    #[inline]
    pub fn debug_log(&self) -> &[DebugEntry] {
        &self.debug_log
    }
}
