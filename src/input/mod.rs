//! Input module - pointer/touch events from the host and their routing

mod router;

pub use router::{map_client_to_surface, InputRouter, RoutedInput};

use serde::{Deserialize, Serialize};

/// A position in surface pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

impl SurfacePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position in viewport (client) space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPoint {
    pub client_x: f32,
    pub client_y: f32,
}

impl ClientPoint {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Layout box of the surface as displayed, in viewport coordinates.
///
/// Its size can differ from the surface's pixel size (CSS scaling,
/// high-density displays).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Stage of a pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// mousedown / touchstart
    Down,
    /// mousemove / touchmove
    Move,
    /// mouseup / touchend
    Up,
    /// mouseleave / touchcancel
    Leave,
}

/// Where the coordinates came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerSource {
    Mouse(ClientPoint),
    /// Active touch points; only the first one is used
    Touch { touches: Vec<ClientPoint> },
}

impl PointerSource {
    /// The single point this event refers to, if it carries any
    pub fn primary(&self) -> Option<ClientPoint> {
        match self {
            PointerSource::Mouse(point) => Some(*point),
            PointerSource::Touch { touches } => touches.first().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse(ClientPoint::new(client_x, client_y)),
        }
    }

    pub fn touch(phase: PointerPhase, touches: Vec<ClientPoint>) -> Self {
        Self {
            phase,
            source: PointerSource::Touch { touches },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_first_point() {
        let source = PointerSource::Touch {
            touches: vec![ClientPoint::new(1.0, 2.0), ClientPoint::new(9.0, 9.0)],
        };
        assert_eq!(source.primary(), Some(ClientPoint::new(1.0, 2.0)));
        assert_eq!(PointerSource::Touch { touches: vec![] }.primary(), None);
    }

    #[test]
    fn rect_usability() {
        assert!(DisplayRect::new(0.0, 0.0, 10.0, 10.0).is_usable());
        assert!(!DisplayRect::new(0.0, 0.0, 0.0, 10.0).is_usable());
        assert!(!DisplayRect::new(f32::NAN, 0.0, 10.0, 10.0).is_usable());
    }

    #[test]
    fn deserializes_host_events() {
        let event: PointerEvent = serde_json::from_str(
            r#"{ "phase": "down", "source": { "kind": "mouse", "clientX": 3, "clientY": 4 } }"#,
        )
        .unwrap();
        assert_eq!(event, PointerEvent::mouse(PointerPhase::Down, 3.0, 4.0));

        let event: PointerEvent = serde_json::from_str(
            r#"{ "phase": "move", "source": { "kind": "touch", "touches": [ { "clientX": 1, "clientY": 2 } ] } }"#,
        )
        .unwrap();
        assert_eq!(event.source.primary(), Some(ClientPoint::new(1.0, 2.0)));
    }
}
