//! Plane geometry helpers
//!
//! - `Rect`: axis-aligned region (drawing area, segment colliders)
//! - `signed_angle` / `clamp_to_rect`: pure helpers for segment placement
//! - `Camera` / `Region`: screen pixels to region-local coordinates

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Axis-aligned rectangle, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() / 2.0;
        Self::new(center - half, center + half)
    }

    /// Smallest rectangle containing every point (None when empty)
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Point containment, edges count as inside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Overlap test, touching edges count as intersecting
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Angle in degrees from the +X axis to the segment `from -> to`.
///
/// The magnitude is the undirected angle (0..=180); it is negated when the
/// segment heads downward (`to.y < from.y`). Zero-length segments give 0.
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    let v = to - from;
    let len = v.length();
    if len <= f32::EPSILON {
        return 0.0;
    }
    let unsigned = (v.x / len).clamp(-1.0, 1.0).acos().to_degrees();
    if to.y < from.y { -unsigned } else { unsigned }
}

/// Clamp each axis of `point` into `rect` independently
#[inline]
pub fn clamp_to_rect(point: Vec2, rect: &Rect) -> Vec2 {
    Vec2::new(
        point.x.max(rect.min.x).min(rect.max.x),
        point.y.max(rect.min.y).min(rect.max.y),
    )
}

/// Orthographic camera mapping screen pixels (y down, origin top-left) to world units (y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Viewport size in pixels
    pub screen_size: Vec2,
    /// World position shown at the viewport center
    pub position: Vec2,
    pub pixels_per_unit: f32,
}

impl Camera {
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            screen_size,
            position: Vec2::ZERO,
            pixels_per_unit: 1.0,
        }
    }

    fn validate(&self) -> Result<(), ProjectionError> {
        let usable = self.screen_size.x > 0.0
            && self.screen_size.y > 0.0
            && self.pixels_per_unit > 0.0
            && self.screen_size.is_finite()
            && self.pixels_per_unit.is_finite();
        if usable {
            Ok(())
        } else {
            Err(ProjectionError::InvalidCamera {
                width: self.screen_size.x,
                height: self.screen_size.y,
                pixels_per_unit: self.pixels_per_unit,
            })
        }
    }

    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let offset = (screen - self.screen_size / 2.0) / self.pixels_per_unit;
        self.position + Vec2::new(offset.x, -offset.y)
    }

    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let offset = (world - self.position) * self.pixels_per_unit;
        self.screen_size / 2.0 + Vec2::new(offset.x, -offset.y)
    }
}

/// A rectangular UI region: its pivot in world space and its local bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// World position of the region's local origin
    pub origin: Vec2,
    /// Bounds in local coordinates
    pub rect: Rect,
}

impl Region {
    pub fn new(origin: Vec2, rect: Rect) -> Self {
        Self { origin, rect }
    }
}

/// Project a screen-space pointer position into `region`'s local space.
///
/// Fails when the region has no area or the camera cannot map pixels;
/// callers must not assume success.
pub fn pointer_to_local(screen: Vec2, region: &Region, camera: &Camera) -> Result<Vec2, ProjectionError> {
    if region.rect.area() <= 0.0 || !region.rect.area().is_finite() {
        return Err(ProjectionError::DegenerateRegion);
    }
    camera.validate()?;
    Ok(camera.screen_to_world(screen) - region.origin)
}

/// Inverse of `pointer_to_local`
pub fn local_to_screen(local: Vec2, region: &Region, camera: &Camera) -> Result<Vec2, ProjectionError> {
    if region.rect.area() <= 0.0 || !region.rect.area().is_finite() {
        return Err(ProjectionError::DegenerateRegion);
    }
    camera.validate()?;
    Ok(camera.world_to_screen(local + region.origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_signed_angle_quadrants() {
        let o = Vec2::ZERO;
        assert!(approx(signed_angle(o, Vec2::new(10.0, 0.0)), 0.0));
        assert!(approx(signed_angle(o, Vec2::new(0.0, 10.0)), 90.0));
        assert!(approx(signed_angle(o, Vec2::new(0.0, -10.0)), -90.0));
        assert!(approx(signed_angle(o, Vec2::new(-10.0, 0.0)), 180.0));
        assert!(approx(signed_angle(o, Vec2::new(-10.0, -10.0)), -135.0));
    }

    #[test]
    fn test_signed_angle_zero_length() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(signed_angle(p, p), 0.0);
    }

    #[test]
    fn test_clamp_to_rect() {
        let rect = Rect::new(Vec2::new(-10.0, -5.0), Vec2::new(10.0, 5.0));
        assert_eq!(clamp_to_rect(Vec2::new(20.0, -9.0), &rect), Vec2::new(10.0, -5.0));
        assert_eq!(clamp_to_rect(Vec2::new(1.0, 2.0), &rect), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_rect_touching_edges_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let c = Rect::new(Vec2::new(10.5, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_pointer_round_trip() {
        let camera = Camera {
            screen_size: Vec2::new(800.0, 600.0),
            position: Vec2::new(5.0, -5.0),
            pixels_per_unit: 2.0,
        };
        let region = Region::new(
            Vec2::new(20.0, 10.0),
            Rect::from_center_size(Vec2::ZERO, Vec2::new(100.0, 100.0)),
        );
        // Viewport center maps to camera position
        let local = pointer_to_local(Vec2::new(400.0, 300.0), &region, &camera).unwrap();
        assert_eq!(local, Vec2::new(-15.0, -15.0));

        let screen = local_to_screen(Vec2::new(12.0, -7.0), &region, &camera).unwrap();
        let back = pointer_to_local(screen, &region, &camera).unwrap();
        assert!(approx(back.x, 12.0) && approx(back.y, -7.0));
    }

    #[test]
    fn test_pointer_degenerate_region() {
        let camera = Camera::new(Vec2::new(800.0, 600.0));
        let flat = Region::new(Vec2::ZERO, Rect::new(Vec2::ZERO, Vec2::new(100.0, 0.0)));
        assert_eq!(
            pointer_to_local(Vec2::ZERO, &flat, &camera),
            Err(ProjectionError::DegenerateRegion)
        );
    }

    #[test]
    fn test_pointer_invalid_camera() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.pixels_per_unit = 0.0;
        let region = Region::new(Vec2::ZERO, Rect::from_center_size(Vec2::ZERO, Vec2::splat(10.0)));
        assert!(matches!(
            pointer_to_local(Vec2::ZERO, &region, &camera),
            Err(ProjectionError::InvalidCamera { .. })
        ));
    }
}
