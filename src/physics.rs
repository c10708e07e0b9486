use std::fmt;

use crate::error::Error;
use nalgebra as na;
use rapier2d::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves.
    Fixed,
    /// Moved by the game every frame, pushes dynamic bodies.
    Kinematic,
    /// Moved by the simulation.
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// Rigid-body world driven once per frame. Coordinates are canvas pixels
/// with y pointing down.
pub trait PhysicsWorld {
    type Handle: Copy + Eq + fmt::Debug;

    fn add_body(&mut self, kind: BodyKind, shape: BodyShape, at: na::Point2<f32>) -> Self::Handle;
    fn remove(&mut self, handle: Self::Handle) -> Result<(), Error>;
    fn contains(&self, handle: Self::Handle) -> bool;
    fn len(&self) -> usize;

    /// Instantaneous placement. Kinematic bodies reach the pose on the next step.
    fn set_pose(&mut self, handle: Self::Handle, at: na::Point2<f32>, angle: f32)
        -> Result<(), Error>;
    fn pose(&self, handle: Self::Handle) -> Result<(na::Point2<f32>, f32), Error>;

    /// Scales the body's shape uniformly by `factor`.
    fn scale(&mut self, handle: Self::Handle, factor: f32) -> Result<(), Error>;

    fn step(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn position(&self, handle: Self::Handle) -> Result<na::Point2<f32>, Error> {
        self.pose(handle).map(|(p, _)| p)
    }
}

pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
}

impl RapierWorld {
    pub fn new(gravity: f32, dt: f32) -> Self {
        let integration_params = IntegrationParameters {
            dt,
            ..IntegrationParameters::default()
        };

        Self {
            gravity: vector![0.0, gravity],
            integration_params,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }

    fn body(&self, handle: RigidBodyHandle) -> Result<&RigidBody, Error> {
        self.bodies
            .get(handle)
            .ok_or_else(|| Error::UnknownBody(format!("{:?}", handle)))
    }

    fn body_mut(&mut self, handle: RigidBodyHandle) -> Result<&mut RigidBody, Error> {
        self.bodies
            .get_mut(handle)
            .ok_or_else(|| Error::UnknownBody(format!("{:?}", handle)))
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(1000.0, 1.0 / 60.0)
    }
}

impl PhysicsWorld for RapierWorld {
    type Handle = RigidBodyHandle;

    fn add_body(&mut self, kind: BodyKind, shape: BodyShape, at: na::Point2<f32>) -> Self::Handle {
        let builder = match kind {
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().ccd_enabled(true),
        };
        let body = builder.translation(vector![at.x, at.y]).build();

        let collider = match shape {
            BodyShape::Rect { width, height } => {
                ColliderBuilder::cuboid(width / 2.0, height / 2.0).friction(0.1)
            }
            BodyShape::Circle { radius } => ColliderBuilder::ball(radius)
                .restitution(0.5)
                .density(0.001),
        }
        .build();

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    fn remove(&mut self, handle: Self::Handle) -> Result<(), Error> {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .map(|_| ())
            .ok_or_else(|| Error::UnknownBody(format!("{:?}", handle)))
    }

    #[inline]
    fn contains(&self, handle: Self::Handle) -> bool {
        self.bodies.contains(handle)
    }

    #[inline]
    fn len(&self) -> usize {
        self.bodies.len()
    }

    fn set_pose(
        &mut self,
        handle: Self::Handle,
        at: na::Point2<f32>,
        angle: f32,
    ) -> Result<(), Error> {
        let body = self.body_mut(handle)?;
        let iso = Isometry::new(vector![at.x, at.y], angle);

        if body.is_kinematic() {
            body.set_next_kinematic_position(iso);
        } else {
            body.set_position(iso, true);
        }

        Ok(())
    }

    fn pose(&self, handle: Self::Handle) -> Result<(na::Point2<f32>, f32), Error> {
        let body = self.body(handle)?;
        let t = body.translation();

        Ok((na::Point2::new(t.x, t.y), body.rotation().angle()))
    }

    fn scale(&mut self, handle: Self::Handle, factor: f32) -> Result<(), Error> {
        let attached = self.body(handle)?.colliders().to_vec();

        for ch in attached {
            let Some(collider) = self.colliders.get_mut(ch) else {
                continue;
            };

            let shape = if let Some(ball) = collider.shape().as_ball() {
                SharedShape::ball(ball.radius * factor)
            } else if let Some(cuboid) = collider.shape().as_cuboid() {
                let he = cuboid.half_extents * factor;
                SharedShape::cuboid(he.x, he.y)
            } else {
                log::warn!("cannot scale collider {:?}: unsupported shape", ch);
                continue;
            };

            collider.set_shape(shape);
        }

        self.body_mut(handle)?.wake_up(true);

        Ok(())
    }

    fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = RapierWorld::default();
        let ball = world.add_body(
            BodyKind::Dynamic,
            BodyShape::Circle { radius: 10.0 },
            na::Point2::new(100.0, 0.0),
        );

        for _ in 0..30 {
            world.step();
        }

        let pos = world.position(ball).unwrap();
        assert!(pos.y > 10.0, "{:?}", pos);
        assert!((pos.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_kinematic_pose_applied_on_step() {
        let mut world = RapierWorld::default();
        let floor = world.add_body(
            BodyKind::Kinematic,
            BodyShape::Rect {
                width: 300.0,
                height: 10.0,
            },
            na::Point2::new(200.0, 400.0),
        );

        world
            .set_pose(floor, na::Point2::new(200.0, 350.0), -0.3)
            .unwrap();
        world.step();

        let (pos, angle) = world.pose(floor).unwrap();
        assert!((pos.y - 350.0).abs() < 1e-3);
        assert!((angle + 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_removed_body_is_unknown() {
        let mut world = RapierWorld::default();
        let ball = world.add_body(
            BodyKind::Dynamic,
            BodyShape::Circle { radius: 10.0 },
            na::Point2::new(0.0, 0.0),
        );

        assert_eq!(world.len(), 1);
        world.remove(ball).unwrap();
        assert!(!world.contains(ball));
        assert!(world.is_empty());
        assert!(matches!(world.remove(ball), Err(Error::UnknownBody(_))));
        assert!(world.pose(ball).is_err());
        assert!(world.scale(ball, 2.0).is_err());
    }

    #[test]
    fn test_scale_resizes_collider() {
        let mut world = RapierWorld::default();
        let ball = world.add_body(
            BodyKind::Dynamic,
            BodyShape::Circle { radius: 10.0 },
            na::Point2::new(0.0, 0.0),
        );

        world.scale(ball, 2.0).unwrap();

        let ch = world.bodies[ball].colliders()[0];
        let radius = world.colliders[ch].shape().as_ball().map(|b| b.radius);
        assert_eq!(radius, Some(20.0));
    }
}
