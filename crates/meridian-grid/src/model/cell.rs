//! Cell coordinates for the selection engine.
//!
//! Positions here are always *visible* coordinates: the column/row a cell
//! occupies in the currently transformed view, not the underlying data index.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// A rectangle handle whose bounds are updated in place.
///
/// Returned by the last-selected-region accessors. Because updates go through
/// the shared lock rather than replacing the allocation, a handle obtained
/// earlier observes later changes to the region.
pub type SharedRegion = Arc<RwLock<CellRect>>;

/// A cell's visible coordinates: `(column position, row position)`.
///
/// A reserved invalid value stands in for "no cell": it is what marker
/// getters return when the marker is unset, or when the marked row currently
/// resolves to no visible position (hidden or filtered out).
///
/// # Example
///
/// ```
/// use meridian_grid::model::CellPosition;
///
/// let cell = CellPosition::new(2, 5);
/// assert!(cell.is_valid());
/// assert_eq!((cell.column(), cell.row()), (2, 5));
///
/// assert!(!CellPosition::invalid().is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    column: usize,
    row: usize,
    valid: bool,
}

impl CellPosition {
    /// Creates the reserved "no cell" value.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            column: 0,
            row: 0,
            valid: false,
        }
    }

    /// Creates a valid cell position.
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            valid: true,
        }
    }

    /// Returns `true` unless this is the reserved "no cell" value.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The visible column position. Returns 0 for the invalid value.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The visible row position. Returns 0 for the invalid value.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }
}

impl Default for CellPosition {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Debug for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.debug_struct("CellPosition")
                .field("column", &self.column)
                .field("row", &self.row)
                .finish()
        } else {
            write!(f, "CellPosition(invalid)")
        }
    }
}

/// An axis-aligned rectangle in visible cell coordinates.
///
/// `x`/`width` span column positions, `y`/`height` span row positions. A
/// width or height of [`CellRect::UNBOUNDED`] means "to the edge of the
/// grid"; the selection engine clamps such rectangles against the grid's
/// current extents before storing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Leftmost column position.
    pub x: usize,
    /// Topmost row position.
    pub y: usize,
    /// Number of columns covered.
    pub width: usize,
    /// Number of rows covered.
    pub height: usize,
}

impl CellRect {
    /// Sentinel width/height meaning "to the edge of the grid".
    pub const UNBOUNDED: usize = usize::MAX;

    /// Creates a rectangle from its origin and extent.
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the 1×1 rectangle covering a single cell.
    #[inline]
    pub const fn unit(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
        }
    }

    /// First column position right of the rectangle (exclusive edge).
    #[inline]
    pub const fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// First row position below the rectangle (exclusive edge).
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the width carries the unbounded sentinel.
    #[inline]
    pub const fn is_width_unbounded(&self) -> bool {
        self.width == Self::UNBOUNDED
    }

    /// Returns `true` if the height carries the unbounded sentinel.
    #[inline]
    pub const fn is_height_unbounded(&self) -> bool {
        self.height == Self::UNBOUNDED
    }

    /// Returns `true` if the cell at `(column, row)` lies inside.
    #[inline]
    pub const fn contains(&self, column: usize, row: usize) -> bool {
        column >= self.x && column < self.right() && row >= self.y && row < self.bottom()
    }

    /// Clamps the rectangle against the given visible extents.
    ///
    /// The origin is kept; width and height are reduced so the rectangle ends
    /// at the grid edge. An origin past the edge yields a zero extent. This
    /// is how unbounded sentinels become concrete bounds.
    #[inline]
    pub fn clamped_to(&self, column_count: usize, row_count: usize) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: self.width.min(column_count.saturating_sub(self.x)),
            height: self.height.min(row_count.saturating_sub(self.y)),
        }
    }
}
