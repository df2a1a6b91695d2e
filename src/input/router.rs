//! Viewport -> surface coordinate mapping and stroke routing.

use super::{ClientPoint, DisplayRect, PointerEvent, PointerPhase, SurfacePoint};
use crate::core::geometry::SurfaceSize;

/// Map a viewport point into surface pixel space.
///
/// `surface = (client - rect.origin) * (surface_px / displayed_px)` per axis.
/// Returns `None` when the rect has no usable size or the surface is empty.
pub fn map_client_to_surface(
    point: ClientPoint,
    rect: DisplayRect,
    surface: SurfaceSize,
) -> Option<SurfacePoint> {
    if !rect.is_usable() || surface.is_empty() {
        return None;
    }
    let x = (point.client_x as f64 - rect.left as f64) * surface.width as f64 / rect.width as f64;
    let y = (point.client_y as f64 - rect.top as f64) * surface.height as f64 / rect.height as f64;
    Some(SurfacePoint::new(x as f32, y as f32))
}

/// What the mask layer should do with an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedInput {
    Begin(SurfacePoint),
    Extend(SurfacePoint),
    End,
    /// Not captured: wrong tool, or no usable coordinates
    Ignored,
}

/// Decides whether the mask overlay captures pointer input at all.
///
/// When not capturing, events pass through as if the overlay were not
/// there, so other tools are never obstructed.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    capturing: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn set_capturing(&mut self, capturing: bool) {
        self.capturing = capturing;
    }

    pub fn route(&self, event: &PointerEvent, rect: DisplayRect, surface: SurfaceSize) -> RoutedInput {
        if !self.capturing {
            return RoutedInput::Ignored;
        }

        let mapped = || {
            event
                .source
                .primary()
                .and_then(|point| map_client_to_surface(point, rect, surface))
        };

        match event.phase {
            PointerPhase::Down => mapped().map_or(RoutedInput::Ignored, RoutedInput::Begin),
            PointerPhase::Move => mapped().map_or(RoutedInput::Ignored, RoutedInput::Extend),
            PointerPhase::Up | PointerPhase::Leave => RoutedInput::End,
        }
    }
}
