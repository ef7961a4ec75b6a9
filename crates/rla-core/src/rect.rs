//! Rectangle type for display and data windows.
//!
//! # Coordinate System
//!
//! Windows use the usual image convention: origin at the top-left, X to the
//! right, Y downward. The origin is signed so that data windows can start
//! outside the display window (overscan) or at negative offsets.
//!
//! ```text
//! (x,y) ──────────► X
//!   │   ┌──────────┐
//!   │   │  Window  │ height
//!   │   └──────────┘
//!   ▼      width
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rla_core::Rect;
//!
//! let rect = Rect::new(-8, -8, 1936, 1096);
//! assert_eq!(rect.max_x(), 1927);
//! assert_eq!(rect.max_y(), 1087);
//! assert!(rect.contains_row(0));
//! ```

/// A rectangle defined by a signed origin and unsigned dimensions.
///
/// # Invariants
///
/// A rectangle with zero width or height is empty; [`Rect::max_x`] and
/// [`Rect::max_y`] are only meaningful for non-empty rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at origin (0, 0) with the given dimensions.
    ///
    /// ```rust
    /// use rla_core::Rect;
    ///
    /// let rect = Rect::from_size(1920, 1080);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Last column inside the rectangle (inclusive), widened to `i64`.
    #[inline]
    pub const fn max_x(&self) -> i64 {
        self.x as i64 + self.width as i64 - 1
    }

    /// Last row inside the rectangle (inclusive), widened to `i64`.
    #[inline]
    pub const fn max_y(&self) -> i64 {
        self.y as i64 + self.height as i64 - 1
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if row `y` lies inside the rectangle.
    #[inline]
    pub const fn contains_row(&self, y: i32) -> bool {
        (y as i64) >= self.y as i64 && (y as i64) <= self.max_y()
    }

    /// Returns the rectangle moved by `(dx, dy)`, or `None` if the origin
    /// leaves the `i32` range.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Option<Rect> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Rect::new(x, y, self.width, self.height)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}
