use crate::gesture::{CurlDistances, FINGER_COUNT};
use crate::physics::{BodyKind, BodyShape, PhysicsWorld};
use nalgebra as na;

/// Vertical offset and tilt of a segment driven by one finger pair.
///
/// The segment rises by the mean curl and tilts toward the less curled side.
#[inline]
pub fn segment_pose(d_left: f32, d_right: f32, tilt_offset: f32) -> (f32, f32) {
    let offset = -(d_left + d_right) / 2.0;
    let angle = -(d_right - d_left).atan2(2.0 * tilt_offset);

    (offset, angle)
}

/// One floor piece, paired with its physics body and the finger driving it.
#[derive(Debug, Clone)]
pub struct FloorSegment<H> {
    pub finger: usize,
    pub handle: H,
    /// Rest position, before the curl offset is applied.
    pub base: na::Point2<f32>,
    pub offset: f32,
    pub angle: f32,
}

impl<H> FloorSegment<H> {
    #[inline]
    pub fn center(&self) -> na::Point2<f32> {
        self.base + na::Vector2::new(0.0, self.offset)
    }
}

#[derive(Debug)]
pub struct FloorRig<H> {
    segments: Vec<FloorSegment<H>>,
    width: f32,
    thickness: f32,
    tilt_offset: f32,
}

impl<H: Copy + Eq + std::fmt::Debug> FloorRig<H> {
    pub fn new<P>(world: &mut P, dims: (f32, f32), width: f32, thickness: f32, tilt_offset: f32) -> Self
    where
        P: PhysicsWorld<Handle = H>,
    {
        let segments = (0..FINGER_COUNT)
            .map(|finger| {
                let base = Self::base_position(finger, dims);
                let handle = world.add_body(
                    BodyKind::Kinematic,
                    BodyShape::Rect {
                        width,
                        height: thickness,
                    },
                    base,
                );

                FloorSegment {
                    finger,
                    handle,
                    base,
                    offset: 0.0,
                    angle: 0.0,
                }
            })
            .collect();

        Self {
            segments,
            width,
            thickness,
            tilt_offset,
        }
    }

    /// Segments sit on a row at 2/3 of the height, spaced by a sixth of the width.
    fn base_position(finger: usize, (w, h): (f32, f32)) -> na::Point2<f32> {
        na::Point2::new(w / 6.0 * (finger + 1) as f32, h * 2.0 / 3.0)
    }

    pub fn relayout(&mut self, dims: (f32, f32)) {
        for seg in &mut self.segments {
            seg.base = Self::base_position(seg.finger, dims);
        }
    }

    /// Writes this frame's curl-driven pose into every segment's body.
    ///
    /// A segment whose body cannot be posed is skipped for this frame; the
    /// rest are still synced. Returns the number of skipped segments.
    pub fn sync<P>(&mut self, curls: &CurlDistances, world: &mut P) -> usize
    where
        P: PhysicsWorld<Handle = H>,
    {
        let mut skipped = 0;

        for seg in &mut self.segments {
            let (d_left, d_right) = curls.pair(seg.finger);
            let (offset, angle) = segment_pose(d_left, d_right, self.tilt_offset);

            seg.offset = offset;
            seg.angle = angle;
            if let Err(err) = world.set_pose(seg.handle, seg.center(), angle) {
                log::warn!("floor segment {} skipped: {}", seg.finger, err);
                skipped += 1;
            }
        }

        skipped
    }

    #[inline]
    pub fn segments(&self) -> &[FloorSegment<H>] {
        &self.segments
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    #[inline]
    pub fn tilt_offset(&self) -> f32 {
        self.tilt_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Handpose, Landmark, LandmarkRecord, LANDMARK_COUNT};
    use crate::physics::RapierWorld;

    #[test]
    fn test_segment_pose() {
        let (offset, angle) = segment_pose(0.0, 0.0, 30.0);
        assert_eq!(offset, 0.0);
        assert_eq!(angle, 0.0);

        let (offset, angle) = segment_pose(60.0, 60.0, 30.0);
        assert_eq!(offset, -60.0);
        assert_eq!(angle, 0.0);

        // right finger curled more: tilts toward the left
        let (offset, angle) = segment_pose(0.0, 60.0, 30.0);
        assert_eq!(offset, -30.0);
        assert!((angle + std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    fn curled_pose() -> Handpose {
        let points: Vec<_> = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(0.0, if i % 4 == 0 { 0.0 } else { 500.0 }))
            .collect();
        let record = LandmarkRecord::from_points(points).unwrap();

        Handpose {
            left: record.clone(),
            right: record,
        }
    }

    #[test]
    fn test_sync_skips_only_missing_body() {
        let mut world = RapierWorld::default();
        let mut rig = FloorRig::new(&mut world, (1200.0, 900.0), 300.0, 10.0, 30.0);
        let lost = rig.segments()[1].handle;
        world.remove(lost).unwrap();

        let mut curls = CurlDistances::default();
        curls.update(&curled_pose());

        assert_eq!(rig.sync(&curls, &mut world), 1);
        world.step();

        for seg in rig.segments().iter().filter(|s| s.handle != lost) {
            let (pos, _) = world.pose(seg.handle).unwrap();
            assert!((pos.y - 480.0).abs() < 1e-3, "finger {}: {:?}", seg.finger, pos);
        }
    }

    #[test]
    fn test_sync_drives_bodies() {
        let mut world = RapierWorld::default();
        let mut rig = FloorRig::new(&mut world, (1200.0, 900.0), 300.0, 10.0, 30.0);
        assert_eq!(rig.segments().len(), FINGER_COUNT);
        assert_eq!(world.len(), FINGER_COUNT);

        // both hands fully curled on every finger
        let mut curls = CurlDistances::default();
        curls.update(&curled_pose());

        assert_eq!(rig.sync(&curls, &mut world), 0);
        world.step();

        for (n, seg) in rig.segments().iter().enumerate() {
            let (pos, angle) = world.pose(seg.handle).unwrap();
            assert!((pos.x - 200.0 * (n + 1) as f32).abs() < 1e-3);
            assert!((pos.y - (600.0 - 120.0)).abs() < 1e-3);
            assert!(angle.abs() < 1e-5);
        }
    }
}
