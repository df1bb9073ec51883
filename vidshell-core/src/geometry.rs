use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Integer pixel size of a window or video surface. Arithmetic saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Scale both axes by `factor`, rounding half up.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: round_half_up(self.width as f64 * factor),
            height: round_half_up(self.height as f64 * factor),
        }
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(
            self.width.saturating_add(rhs.width),
            self.height.saturating_add(rhs.height),
        )
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(
            self.width.saturating_sub(rhs.width),
            self.height.saturating_sub(rhs.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window geometry in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Place `size` in the middle of `area`.
    ///
    /// Halves are truncated, so an odd leftover pixel ends up on the
    /// right/bottom edge. A size larger than the area overhangs it evenly.
    pub fn centered_in(size: Size, area: Rect) -> Self {
        Self {
            origin: Point::new(
                area.origin.x
                    .saturating_add(area.size.width.saturating_sub(size.width) / 2),
                area.origin.y
                    .saturating_add(area.size.height.saturating_sub(size.height) / 2),
            ),
            size,
        }
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
