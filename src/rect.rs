//! Rectangles and coordinates.
//!
//! All coordinates are screen pixels with the origin at the bottom left. Sub-pixel values are
//! allowed everywhere except in texel extents.

use cgmath::{Point2, Vector2, Zero};

/// An absolute position.
pub type Coord = Point2<f32>;

/// A size, or the difference between two positions.
pub type Extent = Vector2<f32>;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin (bottom left corner).
    pub origin: Coord,

    /// Rectangle size.
    pub size: Extent,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Coord, size: Extent) -> Rect {
        Rect { origin, size }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Returns the corner opposite to the origin.
    pub fn opposite(&self) -> Coord {
        self.origin + self.size
    }

    /// Returns true if the point is strictly inside the rectangle.
    ///
    /// Points on any of the four edges are outside.
    pub fn contains(&self, point: Coord) -> bool {
        point.x > self.origin.x
            && point.y > self.origin.y
            && point.x < self.origin.x + self.size.x
            && point.y < self.origin.y + self.size.y
    }

    /// Returns a new rectangle with the given origin.
    pub fn with_origin(&self, origin: Coord) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }
}

/// Size of a texture in whole texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TexelExtent {
    pub width: u32,
    pub height: u32,
}

impl TexelExtent {
    pub fn new(width: u32, height: u32) -> TexelExtent {
        TexelExtent { width, height }
    }

    /// Number of texels.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The same size in floating-point pixels.
    pub fn to_extent(self) -> Extent {
        Vector2::new(self.width as f32, self.height as f32)
    }
}
