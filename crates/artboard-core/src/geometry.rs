//! Pure geometry helpers for rotated resize, cursors, and bounding boxes.
//!
//! Element rotation is stored in degrees; everything here converts to
//! radians before touching `kurbo`.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Rotations closer to zero than this are treated as unrotated.
const ROTATION_EPSILON: f64 = 1e-6;

/// Compass direction of a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeDirection {
    /// Handles in clockwise order starting at north.
    pub const CYCLE: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::Ne,
        ResizeDirection::E,
        ResizeDirection::Se,
        ResizeDirection::S,
        ResizeDirection::Sw,
        ResizeDirection::W,
        ResizeDirection::Nw,
    ];

    fn cycle_index(self) -> usize {
        Self::CYCLE.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Handle drags the west edge, so the east edge is the anchor.
    pub fn moves_west_edge(self) -> bool {
        matches!(
            self,
            ResizeDirection::W | ResizeDirection::Nw | ResizeDirection::Sw
        )
    }

    /// Handle drags the north edge, so the south edge is the anchor.
    pub fn moves_north_edge(self) -> bool {
        matches!(
            self,
            ResizeDirection::N | ResizeDirection::Nw | ResizeDirection::Ne
        )
    }
}

/// CSS resize cursor shown over a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeCursor {
    Ns,
    Nesw,
    Ew,
    Nwse,
}

impl ResizeCursor {
    pub fn css_name(self) -> &'static str {
        match self {
            ResizeCursor::Ns => "ns-resize",
            ResizeCursor::Nesw => "nesw-resize",
            ResizeCursor::Ew => "ew-resize",
            ResizeCursor::Nwse => "nwse-resize",
        }
    }

    fn for_unrotated(direction: ResizeDirection) -> Self {
        match direction {
            ResizeDirection::N | ResizeDirection::S => ResizeCursor::Ns,
            ResizeDirection::Ne | ResizeDirection::Sw => ResizeCursor::Nesw,
            ResizeDirection::E | ResizeDirection::W => ResizeCursor::Ew,
            ResizeDirection::Se | ResizeDirection::Nw => ResizeCursor::Nwse,
        }
    }
}

/// Result of [`calculate_rotated_resize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Whether `x`/`y` differ from the input position.
    pub should_move: bool,
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

pub fn is_rotated(degrees: f64) -> bool {
    let r = normalize_rotation(degrees);
    r > ROTATION_EPSILON && (360.0 - r) > ROTATION_EPSILON
}

/// Map a pointer delta in artboard space into the element's local frame.
///
/// The delta is rotated by `-rotation`, so the returned components can be
/// applied directly as local width/height deltas. Zero rotation is the
/// identity.
pub fn transform_rotated_resize(dx: f64, dy: f64, rotation_degrees: f64) -> Vec2 {
    if !is_rotated(rotation_degrees) {
        return Vec2::new(dx, dy);
    }
    let inverse = Affine::rotate(-rotation_degrees.to_radians());
    (inverse * Point::new(dx, dy)).to_vec2()
}

/// Reconcile position and size after a handle resize.
///
/// Unrotated elements keep the edge opposite the handle fixed: dragging a
/// west handle shifts `x` by `old_width - new_width`, a north handle shifts
/// `y` by `old_height - new_height`. Rotated elements keep their position and
/// only change size.
pub fn calculate_rotated_resize(
    bounds: Rect,
    rotation_degrees: f64,
    direction: ResizeDirection,
    new_width: f64,
    new_height: f64,
) -> ResizeOutcome {
    let (x, y) = (bounds.x0, bounds.y0);
    if is_rotated(rotation_degrees) {
        return ResizeOutcome {
            x,
            y,
            width: new_width,
            height: new_height,
            should_move: false,
        };
    }

    let new_x = if direction.moves_west_edge() {
        x + (bounds.width() - new_width)
    } else {
        x
    };
    let new_y = if direction.moves_north_edge() {
        y + (bounds.height() - new_height)
    } else {
        y
    };

    ResizeOutcome {
        x: new_x,
        y: new_y,
        width: new_width,
        height: new_height,
        should_move: new_x != x || new_y != y,
    }
}

/// Cursor that visually matches `direction` on an element rotated by
/// `rotation_degrees`. The 8-handle cycle is shifted by `round(rotation/45)`.
pub fn cursor_for_handle(direction: ResizeDirection, rotation_degrees: f64) -> ResizeCursor {
    let steps = (normalize_rotation(rotation_degrees) / 45.0).round() as usize;
    let idx = (direction.cycle_index() + steps) % ResizeDirection::CYCLE.len();
    ResizeCursor::for_unrotated(ResizeDirection::CYCLE[idx])
}

/// Inclusive AABB overlap: touching edges count as overlapping.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// Inclusive point containment.
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Smallest rectangle covering every input rectangle.
pub fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

/// Scale `natural` down to fit inside `max`, preserving aspect ratio.
/// Sizes that already fit are returned unchanged.
pub fn fit_within(natural: Size, max: Size) -> Option<Size> {
    if !(natural.width > 0.0 && natural.height > 0.0) {
        return None;
    }
    if natural.width <= max.width && natural.height <= max.height {
        return Some(natural);
    }
    let scale = (max.width / natural.width).min(max.height / natural.height);
    Some(Size::new(
        (natural.width * scale).round().max(1.0),
        (natural.height * scale).round().max(1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rotation_is_identity() {
        let v = transform_rotated_resize(12.0, -7.0, 0.0);
        assert_eq!(v, Vec2::new(12.0, -7.0));
        let v = transform_rotated_resize(12.0, -7.0, 360.0);
        assert_eq!(v, Vec2::new(12.0, -7.0));
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        // Element rotated 90° clockwise: dragging right on screen is
        // dragging "up" in the element's local frame.
        let v = transform_rotated_resize(10.0, 0.0, 90.0);
        assert!(v.x.abs() < 1e-9, "x={}", v.x);
        assert!((v.y + 10.0).abs() < 1e-9, "y={}", v.y);
    }

    #[test]
    fn west_handle_keeps_east_edge() {
        let bounds = Rect::new(100.0, 50.0, 250.0, 125.0);
        let out = calculate_rotated_resize(bounds, 0.0, ResizeDirection::W, 100.0, 75.0);
        assert_eq!(out.x, 150.0);
        assert_eq!(out.y, 50.0);
        assert!(out.should_move);
        assert_eq!(out.x + out.width, bounds.x1);
    }

    #[test]
    fn north_west_handle_moves_both_axes() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let out = calculate_rotated_resize(bounds, 0.0, ResizeDirection::Nw, 140.0, 120.0);
        assert_eq!((out.x, out.y), (-40.0, -20.0));
    }

    #[test]
    fn south_east_handle_never_moves() {
        let bounds = Rect::new(10.0, 10.0, 60.0, 60.0);
        let out = calculate_rotated_resize(bounds, 0.0, ResizeDirection::Se, 80.0, 80.0);
        assert_eq!((out.x, out.y), (10.0, 10.0));
        assert!(!out.should_move);
    }

    #[test]
    fn rotated_resize_freezes_position() {
        let bounds = Rect::new(10.0, 10.0, 60.0, 60.0);
        let out = calculate_rotated_resize(bounds, 30.0, ResizeDirection::Nw, 80.0, 90.0);
        assert_eq!((out.x, out.y), (10.0, 10.0));
        assert_eq!((out.width, out.height), (80.0, 90.0));
        assert!(!out.should_move);
    }

    #[test]
    fn cursor_rotates_with_element() {
        assert_eq!(cursor_for_handle(ResizeDirection::N, 0.0), ResizeCursor::Ns);
        assert_eq!(cursor_for_handle(ResizeDirection::N, 45.0), ResizeCursor::Nesw);
        assert_eq!(cursor_for_handle(ResizeDirection::N, 90.0), ResizeCursor::Ew);
        assert_eq!(cursor_for_handle(ResizeDirection::E, 100.0), ResizeCursor::Ns);
        assert_eq!(cursor_for_handle(ResizeDirection::Se, -45.0), ResizeCursor::Ew);
        assert_eq!(ResizeCursor::Nwse.css_name(), "nwse-resize");
    }

    #[test]
    fn normalize_handles_negative_and_large_angles() {
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(720.0), 0.0);
        assert_eq!(normalize_rotation(405.0), 45.0);
        assert_eq!(normalize_rotation(f64::NAN), 0.0);
    }

    #[test]
    fn overlap_is_inclusive() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(a, Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!rects_overlap(a, Rect::new(10.5, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn fit_within_preserves_aspect() {
        let s = fit_within(Size::new(800.0, 400.0), Size::new(400.0, 400.0)).unwrap();
        assert_eq!(s, Size::new(400.0, 200.0));
        let s = fit_within(Size::new(50.0, 20.0), Size::new(400.0, 400.0)).unwrap();
        assert_eq!(s, Size::new(50.0, 20.0));
        assert!(fit_within(Size::new(0.0, 20.0), Size::new(400.0, 400.0)).is_none());
    }

    #[test]
    fn union_of_nothing_is_none() {
        assert!(union_bounds(Vec::<Rect>::new()).is_none());
        let u = union_bounds([
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(100.0, 0.0, 150.0, 50.0),
        ])
        .unwrap();
        assert_eq!(u, Rect::new(0.0, 0.0, 150.0, 50.0));
    }
}
