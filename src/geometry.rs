//! Selection and magnifier geometry.
//!
//! Everything here is a pure function of its inputs. Coordinates are in
//! document space, with `y` growing downwards.

use serde::{Deserialize, Serialize};

/// A 2D point (or offset) in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a container or element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Normalizes a drag from `(start_x, start_y)` to `(end_x, end_y)`.
    ///
    /// On each axis the origin is the smaller coordinate and the extent is the
    /// absolute difference, so all four drag directions give the same box.
    pub fn from_drag(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        let (x, width) = if end_x < start_x {
            (end_x, start_x - end_x)
        } else {
            (start_x, end_x - start_x)
        };
        let (y, height) = if end_y < start_y {
            (end_y, start_y - end_y)
        } else {
            (start_y, end_y - start_y)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the rectangle covers no area (a click without a drag).
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Builds the selection rectangle for a pointer drag.
pub fn compute_rectangle(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Rectangle {
    Rectangle::from_drag(start_x, start_y, end_x, end_y)
}

/// Top-left position that centers an element of `element` size in `container`.
pub fn compute_centered_placement(container: Size, element: Size) -> Point {
    Point::new(
        container.width / 2.0 - element.width / 2.0,
        container.height / 2.0 - element.height / 2.0,
    )
}

/// Offset to apply to a `zoom_factor`-scaled copy of the source image so the
/// selected region lands at the magnifier's origin.
///
/// The deltas are the selection's distance from `anchor` (usually the image's
/// top-left corner).
pub fn compute_zoom_offset(selection: &Rectangle, anchor: Point, zoom_factor: f64) -> Point {
    let dx = (selection.x - anchor.x).abs();
    let dy = (selection.y - anchor.y).abs();
    Point::new(-zoom_factor * dx, -zoom_factor * dy)
}

/// Sizes and gaps used to place the magnifier and the widgets around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnifierSettings {
    #[serde(default = "default_magnifier_width")]
    pub width: f64,
    #[serde(default = "default_magnifier_height")]
    pub height: f64,
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    /// Rendered height of the field helper shown above the magnifier.
    #[serde(default = "default_helper_height")]
    pub helper_height: f64,
    /// Vertical gap between the helper's bottom edge and the magnifier.
    #[serde(default = "default_helper_gap")]
    pub helper_gap: f64,
    /// Vertical gap between the magnifier and the input widget.
    #[serde(default = "default_widget_gap")]
    pub widget_gap: f64,
}

fn default_magnifier_width() -> f64 {
    640.0
}

fn default_magnifier_height() -> f64 {
    480.0
}

fn default_zoom_factor() -> f64 {
    2.0
}

fn default_helper_height() -> f64 {
    90.0
}

fn default_helper_gap() -> f64 {
    35.0
}

fn default_widget_gap() -> f64 {
    10.0
}

impl Default for MagnifierSettings {
    fn default() -> Self {
        Self {
            width: default_magnifier_width(),
            height: default_magnifier_height(),
            zoom_factor: default_zoom_factor(),
            helper_height: default_helper_height(),
            helper_gap: default_helper_gap(),
            widget_gap: default_widget_gap(),
        }
    }
}

/// Placement of the zoomed view derived from a confirmed highlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnifierLayout {
    /// The magnifier viewport, centered in the document viewport.
    pub frame: Rectangle,
    /// Offset of the zoomed image inside `frame`.
    pub zoom_offset: Point,
    /// Top-left corner of the field helper, which sits above the frame.
    pub helper_origin: Point,
    /// Top-left corner of the input widget, which sits below the frame.
    pub widget_origin: Point,
}

impl MagnifierLayout {
    pub fn compute(
        highlight: &Rectangle,
        image_origin: Point,
        viewport: Size,
        settings: &MagnifierSettings,
    ) -> Self {
        let size = Size::new(settings.width, settings.height);
        let top_left = compute_centered_placement(viewport, size);
        let frame = Rectangle {
            x: top_left.x,
            y: top_left.y,
            width: size.width,
            height: size.height,
        };

        Self {
            frame,
            zoom_offset: compute_zoom_offset(highlight, image_origin, settings.zoom_factor),
            helper_origin: Point::new(
                frame.x,
                frame.y - settings.helper_height - settings.helper_gap,
            ),
            widget_origin: Point::new(frame.x, frame.y + frame.height + settings.widget_gap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_drag_is_normalized() {
        let r = compute_rectangle(100.0, 100.0, 10.0, 10.0);
        assert_eq!(
            r,
            Rectangle {
                x: 10.0,
                y: 10.0,
                width: 90.0,
                height: 90.0
            }
        );
    }

    #[test]
    fn all_drag_directions_yield_same_box() {
        let corners = [(20.0, 30.0), (80.0, 30.0), (20.0, 70.0), (80.0, 70.0)];
        for &(sx, sy) in &corners {
            for &(ex, ey) in &corners {
                if sx == ex || sy == ey {
                    continue;
                }
                let r = compute_rectangle(sx, sy, ex, ey);
                assert_eq!(r.origin(), Point::new(20.0, 30.0));
                assert_eq!(r.width, 60.0);
                assert_eq!(r.height, 40.0);
            }
        }
    }

    #[test]
    fn mixed_direction_drag() {
        // Right and up.
        let r = compute_rectangle(10.0, 50.0, 40.0, 5.0);
        assert_eq!(
            r,
            Rectangle {
                x: 10.0,
                y: 5.0,
                width: 30.0,
                height: 45.0
            }
        );
        assert!(r.width >= 0.0 && r.height >= 0.0);
    }

    #[test]
    fn click_without_drag_is_empty() {
        let r = compute_rectangle(12.0, 12.0, 12.0, 12.0);
        assert!(r.is_empty());
        assert_eq!(r.origin(), Point::new(12.0, 12.0));
    }

    #[test]
    fn rectangle_center_and_contains() {
        let r = Rectangle {
            x: 10.0,
            y: 20.0,
            width: 40.0,
            height: 10.0,
        };
        assert_eq!(r.center(), Point::new(30.0, 25.0));
        assert!(r.contains(Point::new(10.0, 30.0)));
        assert!(!r.contains(Point::new(51.0, 25.0)));
    }

    #[test]
    fn centered_placement() {
        let p = compute_centered_placement(Size::new(1280.0, 800.0), Size::new(640.0, 480.0));
        assert_eq!(p, Point::new(320.0, 160.0));
    }

    #[test]
    fn centered_placement_of_larger_element_is_negative() {
        let p = compute_centered_placement(Size::new(400.0, 300.0), Size::new(640.0, 480.0));
        assert_eq!(p, Point::new(-120.0, -90.0));
    }

    #[test]
    fn zoom_offset_scales_distance_from_anchor() {
        let sel = Rectangle {
            x: 150.0,
            y: 90.0,
            width: 200.0,
            height: 100.0,
        };
        let offset = compute_zoom_offset(&sel, Point::new(50.0, 40.0), 2.0);
        assert_eq!(offset, Point::new(-200.0, -100.0));
    }

    #[test]
    fn zoom_offset_uses_distance_not_signed_delta() {
        let sel = Rectangle {
            x: 10.0,
            y: 10.0,
            width: 5.0,
            height: 5.0,
        };
        let offset = compute_zoom_offset(&sel, Point::new(30.0, 20.0), 3.0);
        assert_eq!(offset, Point::new(-60.0, -30.0));
    }

    #[test]
    fn magnifier_layout_with_defaults() {
        let highlight = Rectangle {
            x: 300.0,
            y: 250.0,
            width: 120.0,
            height: 60.0,
        };
        let layout = MagnifierLayout::compute(
            &highlight,
            Point::new(100.0, 50.0),
            Size::new(1280.0, 800.0),
            &MagnifierSettings::default(),
        );

        assert_eq!(
            layout.frame,
            Rectangle {
                x: 320.0,
                y: 160.0,
                width: 640.0,
                height: 480.0
            }
        );
        assert_eq!(layout.zoom_offset, Point::new(-400.0, -400.0));
        // 160 - 90 - 35
        assert_eq!(layout.helper_origin, Point::new(320.0, 35.0));
        assert_eq!(layout.widget_origin, Point::new(320.0, 650.0));
    }

    #[test]
    fn magnifier_settings_partial_toml() {
        let settings: MagnifierSettings = toml::from_str("zoom_factor = 3.0").unwrap();
        assert_eq!(settings.zoom_factor, 3.0);
        assert_eq!(settings.width, 640.0);
        assert_eq!(settings.widget_gap, 10.0);
        assert_eq!(settings.helper_height, 90.0);
    }

    #[test]
    fn taller_helper_moves_helper_origin_up() {
        let settings = MagnifierSettings {
            helper_height: 140.0,
            ..Default::default()
        };
        let highlight = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let layout = MagnifierLayout::compute(
            &highlight,
            Point::default(),
            Size::new(1280.0, 800.0),
            &settings,
        );
        assert_eq!(layout.helper_origin, Point::new(320.0, -15.0));
        assert_eq!(layout.widget_origin, Point::new(320.0, 650.0));
    }
}
