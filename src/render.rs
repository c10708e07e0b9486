use crate::physics::PhysicsWorld;
use crate::sketch::Sketch;

/// Immediate-mode drawing surface with a transform stack.
pub trait Canvas {
    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Rect centered on (cx, cy).
    fn rect(&mut self, cx: f32, cy: f32, width: f32, height: f32);
    fn circle(&mut self, cx: f32, cy: f32, diameter: f32);
    fn text(&mut self, text: &str, x: f32, y: f32);
}

const EFFECT_DIAMETER: (f32, f32) = (20.0, 140.0);

/// Issues the draw calls for one frame of `sketch`.
pub fn draw_frame<P, C>(sketch: &Sketch<P>, canvas: &mut C)
where
    P: PhysicsWorld,
    C: Canvas + ?Sized,
{
    draw_floor(sketch, canvas);

    let scene = sketch.scene();
    let world = sketch.world();

    for ball in scene.balls() {
        // a ball whose body vanished is skipped for this frame
        if let Ok(pos) = world.position(ball.handle) {
            canvas.circle(pos.x, pos.y, ball.radius() * 2.0);
        }
    }

    for event in scene.events().iter().filter(|e| e.is_visible()) {
        canvas.circle(event.position.x, event.position.y, event.size);
        canvas.text(event.kind.label(), event.position.x, event.position.y);
    }

    for point in scene.points().iter().filter(|p| p.is_alive()) {
        canvas.circle(point.position.x, point.position.y, point.size);
    }

    for effect in scene.effects() {
        let (from, to) = EFFECT_DIAMETER;
        canvas.circle(effect.position.x, effect.position.y, effect.diameter(from, to));
    }

    let score = sketch.score();
    canvas.push();
    canvas.translate(0.0, sketch.config().height - 200.0);
    canvas.text(&score.display().to_string(), 0.0, 0.0);
    canvas.text(&format!("best {}", score.display_best()), 0.0, 60.0);
    canvas.pop();
}

/// Floor segments plus the two finger linkages standing beside each one.
fn draw_floor<P, C>(sketch: &Sketch<P>, canvas: &mut C)
where
    P: PhysicsWorld,
    C: Canvas + ?Sized,
{
    let floor = sketch.floor();
    let curls = sketch.curls();
    let offset = floor.tilt_offset();
    let half_r = curls.max() / 2.0;

    for seg in floor.segments() {
        let (d_left, d_right) = curls.pair(seg.finger);

        canvas.push();
        canvas.translate(seg.base.x, seg.base.y);

        canvas.push();
        canvas.translate(0.0, seg.offset);
        canvas.rotate(seg.angle);
        canvas.rect(0.0, 0.0, floor.width(), floor.thickness());
        canvas.pop();

        let knee_l = (half_r * half_r - (d_left / 2.0).powi(2)).max(0.0).sqrt();
        canvas.line(-offset, 0.0, -offset - knee_l, -d_left / 2.0);
        canvas.line(-offset - knee_l, -d_left / 2.0, -offset, -d_left);

        let knee_r = (half_r * half_r - (d_right / 2.0).powi(2)).max(0.0).sqrt();
        canvas.line(offset, 0.0, offset + knee_r, -d_right / 2.0);
        canvas.line(offset + knee_r, -d_right / 2.0, offset, -d_right);

        canvas.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SketchConfig;
    use crate::frame::Frame;
    use crate::scene::tests::{CountingAudio, StubWorld};

    #[derive(Default)]
    struct Recorder {
        depth: i32,
        max_depth: i32,
        rects: usize,
        lines: usize,
        circles: Vec<f32>,
        texts: Vec<String>,
    }

    impl Canvas for Recorder {
        fn push(&mut self) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }

        fn pop(&mut self) {
            self.depth -= 1;
        }

        fn translate(&mut self, _x: f32, _y: f32) {}

        fn rotate(&mut self, _angle: f32) {}

        fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
            assert!(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite());
            self.lines += 1;
        }

        fn rect(&mut self, _cx: f32, _cy: f32, _width: f32, _height: f32) {
            self.rects += 1;
        }

        fn circle(&mut self, _cx: f32, _cy: f32, diameter: f32) {
            self.circles.push(diameter);
        }

        fn text(&mut self, text: &str, _x: f32, _y: f32) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_draw_calls_balance() {
        let cfg = SketchConfig {
            seed: Some(2),
            ..SketchConfig::new(1200.0, 900.0)
        };
        let mut sketch = Sketch::with_world(cfg, StubWorld::default()).unwrap();
        sketch.draw(&Frame::new((1200, 900), Vec::new(), 0.016), &mut CountingAudio::default());

        let mut canvas = Recorder::default();
        draw_frame(&sketch, &mut canvas);

        assert_eq!(canvas.depth, 0);
        assert_eq!(canvas.max_depth, 2);
        assert_eq!(canvas.rects, 5);
        assert_eq!(canvas.lines, 20);
        // 1 ball, the "+1" event, 3 points
        assert_eq!(canvas.circles.len(), 5);
        assert_eq!(canvas.circles[0], 80.0);
        assert!(canvas.texts.contains(&"+1".to_string()));
        assert!(canvas.texts.contains(&"best 0".to_string()));
    }
}
