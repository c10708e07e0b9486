use std::collections::VecDeque;

use crate::ball::{Ball, BallId, Bounds};
use crate::config::SketchConfig;
use crate::effect::{Effect, Pulse};
use crate::event::{Event, EventKind, EventState};
use crate::physics::{BodyKind, BodyShape, PhysicsWorld};
use crate::point::Point;
use crate::score::ScoreTracker;
use crate::AudioTrigger;

use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Point batch waiting for its delay to pass. Owned by the scene, so it
/// never fires once the scene is gone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingBatch {
    pub due: f32,
}

/// Live game objects of one session and their per-frame lifecycle.
///
/// Collections are only mutated by `update`; removals are done by a
/// compaction pass after each collection has been walked once.
pub struct Scene<H> {
    cfg: SketchConfig,
    bounds: Bounds,
    balls: Vec<Ball<H>>,
    points: Vec<Point>,
    events: Vec<Event>,
    effects: Vec<Effect>,
    /// Scaled balls, oldest scaling first.
    scaled: VecDeque<BallId>,
    pending: Option<PendingBatch>,
    pulse: Pulse,
    next_ball_id: BallId,
    /// Unset until the first tick anchors the scene clock.
    last_second: Option<f32>,
    rng: StdRng,
}

impl<H: Copy + Eq + std::fmt::Debug> Scene<H> {
    pub fn new<P>(cfg: &SketchConfig, world: &mut P) -> Self
    where
        P: PhysicsWorld<Handle = H>,
    {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut scene = Self {
            cfg: cfg.clone(),
            bounds: Bounds::new((cfg.width, cfg.height), cfg.bounds_margin),
            balls: Vec::with_capacity(8),
            points: Vec::with_capacity(cfg.points_per_batch),
            events: Vec::with_capacity(8),
            effects: Vec::with_capacity(16),
            scaled: VecDeque::new(),
            pending: None,
            pulse: Pulse::new(cfg.pulse_decay),
            next_ball_id: 1,
            last_second: None,
            rng,
        };

        scene.spawn_points();
        let at = scene.random_band_position();
        scene.events.push(Event::new(
            EventKind::PlusOne,
            at,
            cfg.event_size,
            0.0,
            cfg.event_lifetime_secs,
        ));
        scene.spawn_ball(world);

        scene
    }

    pub fn resize(&mut self, dims: (f32, f32)) {
        self.cfg.width = dims.0;
        self.cfg.height = dims.1;
        self.bounds = Bounds::new(dims, self.cfg.bounds_margin);
    }

    /// Returns the time elapsed since the previous tick.
    ///
    /// Events created before the first tick are timed from it, whatever
    /// the host clock read when the session started.
    pub fn update_time(&mut self, ts_sec: f32) -> f32 {
        let Some(last) = self.last_second else {
            for event in &mut self.events {
                event.delay(ts_sec);
            }
            self.last_second = Some(ts_sec);

            return 0.0;
        };

        if ts_sec > last {
            self.last_second = Some(ts_sec);
        }

        (ts_sec - last).max(0.0)
    }

    /// Advances every game object by one frame. Reads post-step body
    /// positions from `world`.
    pub fn update<P, A>(&mut self, now: f32, world: &mut P, score: &mut ScoreTracker, audio: &mut A)
    where
        P: PhysicsWorld<Handle = H>,
        A: AudioTrigger + ?Sized,
    {
        let dt = self.update_time(now);
        self.pulse.update(dt);

        self.spawn_pending(now);
        self.prune_balls(world);
        self.update_events(now, world);
        self.ensure_ball(world, score);
        self.update_points(now, world, score, audio);
        self.schedule_points(now);

        for effect in &mut self.effects {
            effect.update(now);
        }
        self.effects.retain(|e| !e.is_dead());
    }

    fn prune_balls<P: PhysicsWorld<Handle = H>>(&mut self, world: &mut P) {
        let bounds = self.bounds;
        let scaled = &mut self.scaled;

        self.balls.retain(|ball| {
            let inside = match world.position(ball.handle) {
                Ok(pos) => bounds.contains(pos),
                Err(err) => {
                    log::warn!("dropping ball {}: {}", ball.id, err);
                    false
                }
            };

            if !inside {
                if world.contains(ball.handle) {
                    if let Err(err) = world.remove(ball.handle) {
                        log::warn!("ball {}: {}", ball.id, err);
                    }
                }
                scaled.retain(|id| *id != ball.id);
                log::debug!("ball {} left the scene", ball.id);
            }

            inside
        });
    }

    fn update_events<P: PhysicsWorld<Handle = H>>(&mut self, now: f32, world: &mut P) {
        let circles = self.ball_circles(world);
        let mut spawn = 0;
        let mut reverts = 0;

        let Self {
            events,
            balls,
            effects,
            scaled,
            cfg,
            ..
        } = self;

        for event in events.iter_mut() {
            event.tick();

            if event.state == EventState::Alive {
                let hit = circles
                    .iter()
                    .position(|&(_, c, r)| event.overlaps(c, r));

                if let Some(idx) = hit {
                    event.state = EventState::Hit;
                    log::debug!("event {} hit by ball {}", event.kind.label(), circles[idx].0);
                    effects.push(Effect::new(event.position, now, cfg.effect_secs));

                    match event.kind.multiplier() {
                        None => spawn += 1,
                        Some(m) => {
                            let id = circles[idx].0;
                            if let Some(ball) = balls.iter_mut().find(|b| b.id == id) {
                                match world.scale(ball.handle, m / ball.multiplier()) {
                                    Ok(()) => {
                                        ball.set_multiplier(m);
                                        if !scaled.contains(&id) {
                                            scaled.push_back(id);
                                        }
                                    }
                                    Err(err) => log::warn!("ball {}: {}", id, err),
                                }
                            }
                        }
                    }

                    event.state = EventState::Dead;
                }
            }

            if event.is_expired(now) {
                log::debug!("event {} expired", event.kind.label());
                if event.kind.is_scale() {
                    reverts += 1;
                }
            }
        }

        events.retain(|e| !e.is_expired(now));

        for _ in 0..reverts {
            self.revert_oldest_scale(world);
        }

        for _ in 0..spawn {
            self.spawn_ball(world);
        }
    }

    /// Restores the ball that was scaled first back to multiplier 1.
    fn revert_oldest_scale<P: PhysicsWorld<Handle = H>>(&mut self, world: &mut P) {
        while let Some(id) = self.scaled.pop_front() {
            let Some(ball) = self.balls.iter_mut().find(|b| b.id == id) else {
                continue;
            };

            if !ball.is_scaled() {
                continue;
            }

            match world.scale(ball.handle, 1.0 / ball.multiplier()) {
                Ok(()) => ball.set_multiplier(1.0),
                Err(err) => log::warn!("ball {}: {}", id, err),
            }

            return;
        }
    }

    fn ensure_ball<P: PhysicsWorld<Handle = H>>(&mut self, world: &mut P, score: &mut ScoreTracker) {
        if !self.balls.is_empty() {
            return;
        }

        let id = self.spawn_ball(world);
        score.reset();
        self.pulse.pulse();
        log::info!("last ball lost, respawned ball {} and reset score", id);
    }

    fn update_points<P, A>(&mut self, now: f32, world: &P, score: &mut ScoreTracker, audio: &mut A)
    where
        P: PhysicsWorld<Handle = H>,
        A: AudioTrigger + ?Sized,
    {
        let circles = self.ball_circles(world);
        let mut born = Vec::new();

        let Self {
            points,
            effects,
            cfg,
            rng,
            ..
        } = self;

        for point in points.iter_mut() {
            if point.check_hit(circles.iter().map(|&(_, c, r)| (c, r))) {
                score.add(1);
                audio.play_hit();
                effects.push(Effect::new(point.position, now, cfg.effect_secs));

                if rng.gen_bool(cfg.event_chance) {
                    let kind = EventKind::random(rng);
                    log::debug!("point hit spawned event {}", kind.label());
                    born.push(Event::new(
                        kind,
                        point.position,
                        cfg.event_size,
                        now,
                        cfg.event_lifetime_secs,
                    ));
                }

                point.start_dying(now);
            } else {
                point.advance(now, cfg.point_dying_secs);
            }
        }

        points.retain(|p| !p.is_dead());
        self.events.extend(born);
    }

    fn schedule_points(&mut self, now: f32) {
        if self.points.is_empty() && self.pending.is_none() {
            let due = now + self.cfg.point_respawn_delay_secs;
            log::debug!("points depleted, next batch at {:.2}s", due);
            self.pending = Some(PendingBatch { due });
        }
    }

    fn spawn_pending(&mut self, now: f32) {
        if let Some(batch) = self.pending {
            if now >= batch.due {
                self.pending = None;
                self.spawn_points();
            }
        }
    }

    /// Drops a scheduled point batch that has not fired yet.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn spawn_points(&mut self) {
        while self.points.len() < self.cfg.points_per_batch {
            let at = self.random_band_position();
            self.points.push(Point::new(at, self.cfg.point_size));
        }

        log::debug!("spawned point batch of {}", self.points.len());
    }

    /// Uniform position in the upper band: x in [0.1w, 0.9w], y in [0.1h, 0.4h].
    fn random_band_position(&mut self) -> na::Point2<f32> {
        let x = self.cfg.width * self.rng.gen_range(0.1f32..0.9);
        let y = self.cfg.height * self.rng.gen_range(0.1f32..0.4);

        na::Point2::new(x, y)
    }

    fn spawn_ball<P: PhysicsWorld<Handle = H>>(&mut self, world: &mut P) -> BallId {
        let id = self.next_ball_id;
        self.next_ball_id += 1;

        let at = na::Point2::new(self.cfg.width / 2.0, self.cfg.ball_spawn_y);
        let handle = world.add_body(
            BodyKind::Dynamic,
            BodyShape::Circle {
                radius: self.cfg.ball_size / 2.0,
            },
            at,
        );
        self.balls.push(Ball::new(id, handle, self.cfg.ball_size));

        id
    }

    /// (id, center, radius) of every tracked ball still in the world.
    fn ball_circles<P: PhysicsWorld<Handle = H>>(&self, world: &P) -> Vec<(BallId, na::Point2<f32>, f32)> {
        self.balls
            .iter()
            .filter_map(|b| {
                world
                    .position(b.handle)
                    .ok()
                    .map(|pos| (b.id, pos, b.radius()))
            })
            .collect()
    }

    #[inline]
    pub fn balls(&self) -> &[Ball<H>] {
        &self.balls
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[inline]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    #[inline]
    pub fn pending(&self) -> Option<PendingBatch> {
        self.pending
    }

    #[inline]
    pub fn pulse(&self) -> &Pulse {
        &self.pulse
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[cfg(test)]
    pub(crate) fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    #[cfg(test)]
    pub(crate) fn clear_points(&mut self) {
        self.points.clear();
    }

    #[cfg(test)]
    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }
}
