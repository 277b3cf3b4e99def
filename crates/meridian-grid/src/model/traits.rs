//! Core traits for the selection engine.
//!
//! Two groups live here. The collaborator traits ([`RowIdAccessor`],
//! [`RowDataProvider`], [`PositionTranslator`]) are implemented by the
//! surrounding grid and injected into the selection model at construction.
//! The model traits ([`SelectionModel`], [`MarkerSelectionModel`]) are the
//! operation surface views and command handlers program against.

use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use super::cell::{CellPosition, CellRect, SharedRegion};

/// Maps a row object to its stable identity.
///
/// The id is what makes selection survive structural transforms: distinct row
/// objects map to distinct ids, and the same row object maps to the same id
/// no matter how the grid is currently sorted, filtered, or reordered.
pub trait RowIdAccessor<T> {
    /// The stable row key.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// Returns the identity of the given row object.
    fn row_id(&self, row_object: &T) -> Self::Id;
}

/// Access to the underlying row data, in index space.
///
/// Indices here are untransformed ordinals from the data source; they do not
/// move when the grid is sorted or filtered.
pub trait RowDataProvider<T> {
    /// Number of rows in the underlying data source.
    fn row_count(&self) -> usize;

    /// Number of columns in the underlying data source.
    fn column_count(&self) -> usize;

    /// The row object at the given underlying index, or `None` when the
    /// index is out of range.
    fn row_object(&self, row_index: usize) -> Option<T>;

    /// The underlying index of the given row object, or `None` when the row
    /// is no longer part of the data source.
    fn index_of_row(&self, row_object: &T) -> Option<usize>;
}

/// Translation between visible positions and underlying indices.
///
/// Implemented by the grid layer; answers reflect the current hide/reorder
/// state and change as the user transforms the view. All lookups return
/// `None` for positions or indices that are currently not visible.
pub trait PositionTranslator {
    /// The underlying row index behind the given visible row position.
    fn row_index_by_position(&self, row_position: usize) -> Option<usize>;

    /// The current visible position of the given underlying row index.
    fn row_position_by_index(&self, row_index: usize) -> Option<usize>;

    /// The underlying column index behind the given visible column position.
    fn column_index_by_position(&self, column_position: usize) -> Option<usize>;

    /// The current visible position of the given underlying column index.
    fn column_position_by_index(&self, column_index: usize) -> Option<usize>;

    /// Number of currently visible rows.
    fn visible_row_count(&self) -> usize;

    /// Number of currently visible columns.
    fn visible_column_count(&self) -> usize;
}

/// Selection state operations, in visible position space.
///
/// All coordinates crossing this trait are positions; implementations decide
/// how state is keyed internally. [`PreserveSelectionModel`] keys it by row
/// identity so it survives structural transforms.
///
/// [`PreserveSelectionModel`]: super::PreserveSelectionModel
pub trait SelectionModel {
    /// Whether more than one cell may be selected at a time.
    fn is_multiple_selection_allowed(&self) -> bool;

    /// Enables or disables multiple selection.
    ///
    /// While disabled, any new single-cell selection atomically replaces the
    /// entire prior selection.
    fn set_multiple_selection_allowed(&mut self, allowed: bool);

    /// Selects the cell at the given visible coordinates.
    fn select_cell(&mut self, column_position: usize, row_position: usize);

    /// Selects every cell inside the given rectangle.
    ///
    /// Width and height may carry [`CellRect::UNBOUNDED`], meaning "to the
    /// edge of the grid"; the rectangle is clamped against the grid's current
    /// extents before anything is stored, so the result is always a concrete
    /// set of cells as of this call. Selections do not grow retroactively if
    /// the grid later gains rows or columns.
    fn select_region(&mut self, region: CellRect);

    /// Deselects the cell at the given visible coordinates.
    fn deselect_cell(&mut self, column_position: usize, row_position: usize);

    /// Deselects every cell inside the given rectangle.
    ///
    /// Accepts the same unbounded sentinels as
    /// [`select_region`](Self::select_region). A rectangle with an unbounded
    /// dimension is intersected with the already-selected cells instead of
    /// iterating the visible extent of that dimension.
    fn deselect_region(&mut self, region: CellRect);

    /// Deselects everything.
    fn clear_selection(&mut self);

    /// Returns `true` if no cell is selected.
    fn is_empty(&self) -> bool;

    /// Returns `true` if the cell at the given visible coordinates is
    /// selected.
    fn is_cell_position_selected(&self, column_position: usize, row_position: usize) -> bool;

    /// Returns `true` if any selected row has the given column selected.
    fn is_column_position_selected(&self, column_position: usize) -> bool;

    /// Returns `true` iff every visible row position in `[0, row_count)`
    /// resolves to a row with the given column selected.
    fn is_column_position_fully_selected(&self, column_position: usize, row_count: usize) -> bool;

    /// Every column position with at least one selected cell, ascending.
    fn selected_column_positions(&self) -> Vec<usize>;

    /// The selected column positions that are fully selected over
    /// `[0, row_count)` visible rows, ascending.
    fn fully_selected_column_positions(&self, row_count: usize) -> Vec<usize>;

    /// Returns `true` if the row at the given visible position has any
    /// selected cell.
    fn is_row_position_selected(&self, row_position: usize) -> bool;

    /// Returns `true` iff the row at the given visible position has every
    /// column in `[0, column_count)` selected.
    fn is_row_position_fully_selected(&self, row_position: usize, column_count: usize) -> bool;

    /// The visible positions of all selected rows, coalesced into contiguous
    /// ranges, ascending. Rows that currently resolve to no visible position
    /// are skipped.
    fn selected_row_positions(&self) -> Vec<Range<usize>>;

    /// The visible positions of rows with every column in
    /// `[0, column_count)` selected, ascending.
    fn fully_selected_row_positions(&self, column_count: usize) -> Vec<usize>;

    /// Number of distinct selected row identities, including rows that are
    /// currently not visible.
    fn selected_row_count(&self) -> usize;

    /// The currently visible selected cells as unit rectangles, one 1×1
    /// [`CellRect`] per cell. Rows that resolve to no visible position are
    /// excluded entirely.
    fn selected_cells(&self) -> Vec<CellRect>;
}

/// Selection markers: anchor, last selected cell, last selected region.
///
/// Markers are owned by the selection model but driven by the surrounding
/// gesture layer through these accessors; the model stores them by row
/// identity and recomputes positions on every read.
pub trait MarkerSelectionModel: SelectionModel {
    /// The anchor cell of the current selection gesture, or
    /// [`CellPosition::invalid`] when unset or currently unresolvable.
    fn selection_anchor(&self) -> CellPosition;

    /// Records the anchor. The position is resolved to a row identity now
    /// and discarded; passing an invalid position clears the anchor.
    fn set_selection_anchor(&mut self, position: CellPosition);

    /// The most recently selected cell, or [`CellPosition::invalid`] when
    /// unset or currently unresolvable.
    fn last_selected_cell(&self) -> CellPosition;

    /// Records the most recently selected cell; same resolution rules as
    /// [`set_selection_anchor`](Self::set_selection_anchor).
    fn set_last_selected_cell(&mut self, position: CellPosition);

    /// The most recent rectangular selection extent, with its vertical
    /// origin recomputed from the origin row's current position. `None` when
    /// unset.
    fn last_selected_region(&self) -> Option<SharedRegion>;

    /// Records the last selected region, updating the existing rectangle in
    /// place when one exists so previously returned handles stay current.
    /// `None` clears the region.
    fn set_last_selected_region(&mut self, region: Option<CellRect>);

    /// Records the last selected region from raw bounds without allocating
    /// when a rectangle instance already exists.
    fn set_last_selected_region_bounds(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    );
}
