use nalgebra as na;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    #[serde(rename = "+1")]
    PlusOne,
    #[serde(rename = "x2")]
    Double,
    #[serde(rename = "x0.5")]
    Half,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::PlusOne, EventKind::Double, EventKind::Half];

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::PlusOne => "+1",
            EventKind::Double => "x2",
            EventKind::Half => "x0.5",
        }
    }

    /// Ball scale multiplier for scale modifiers.
    pub fn multiplier(&self) -> Option<f32> {
        match self {
            EventKind::PlusOne => None,
            EventKind::Double => Some(2.0),
            EventKind::Half => Some(0.5),
        }
    }

    #[inline]
    pub fn is_scale(&self) -> bool {
        self.multiplier().is_some()
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    Born,
    Alive,
    Hit,
    Dead,
}

/// Timed score modifier. Expiry is independent of the state.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub position: na::Point2<f32>,
    pub size: f32,
    pub state: EventState,
    expires_at: f32,
}

impl Event {
    pub fn new(kind: EventKind, position: na::Point2<f32>, size: f32, now: f32, lifetime: f32) -> Self {
        Self {
            kind,
            position,
            size,
            state: EventState::Born,
            expires_at: now + lifetime,
        }
    }

    /// Pushes the expiry back by `secs`.
    #[inline]
    pub fn delay(&mut self, secs: f32) {
        self.expires_at += secs;
    }

    #[inline]
    pub fn is_expired(&self, now: f32) -> bool {
        now >= self.expires_at
    }

    #[inline]
    pub fn overlaps(&self, center: na::Point2<f32>, radius: f32) -> bool {
        na::distance(&self.position, &center) < radius + self.size / 2.0
    }

    /// Born -> Alive on the first tick.
    pub fn tick(&mut self) {
        if self.state == EventState::Born {
            self.state = EventState::Alive;
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        matches!(self.state, EventState::Born | EventState::Alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_expiry_ignores_state() {
        let mut event = Event::new(EventKind::Double, na::Point2::new(0.0, 0.0), 50.0, 2.0, 8.0);
        assert_eq!(event.state, EventState::Born);
        event.tick();
        assert_eq!(event.state, EventState::Alive);

        assert!(!event.is_expired(9.5));
        assert!(event.is_expired(10.0));

        event.state = EventState::Dead;
        assert!(!event.is_visible());
        assert!(event.is_expired(11.0));

        event.delay(5.0);
        assert!(!event.is_expired(14.5));
        assert!(event.is_expired(15.0));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(EventKind::PlusOne.multiplier(), None);
        assert_eq!(EventKind::Half.multiplier(), Some(0.5));
        assert_eq!(EventKind::Double.label(), "x2");

        let kind: EventKind = serde_json::from_str(r#""x0.5""#).unwrap();
        assert_eq!(kind, EventKind::Half);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..16 {
            assert!(EventKind::ALL.contains(&EventKind::random(&mut rng)));
        }
    }
}
