//! Structure-preserving selection model.
//!
//! [`PreserveSelectionModel`] keeps cell selection keyed by stable row
//! identity instead of visual position. Every operation entering the model
//! with a position resolves it through the grid's live collaborators
//! (position → index → row object → id) at call time; nothing is cached. The
//! identity behind a position can change whenever the grid is sorted,
//! filtered, or reordered, but the identity's selection state does not, which
//! is exactly why selections survive those transforms without being
//! re-issued.

use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use meridian_grid_core::Signal;

use super::cell::{CellPosition, CellRect, SharedRegion};
use super::selections::Selections;
use super::traits::{
    MarkerSelectionModel, PositionTranslator, RowDataProvider, RowIdAccessor, SelectionModel,
};

const TARGET: &str = "meridian_grid::selection";

/// Describes a selection mutation, carried by
/// [`PreserveSelectionModel::selection_changed`].
///
/// Regions are reported clamped to the grid extents at mutation time. A
/// replace under disabled multiple selection is reported as a single
/// `CellsSelected` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Cells inside `region` were selected.
    CellsSelected {
        /// The affected region.
        region: CellRect,
    },
    /// Cells inside `region` were deselected.
    CellsDeselected {
        /// The affected region.
        region: CellRect,
    },
    /// The whole selection was cleared.
    SelectionCleared,
}

/// Selection model that survives structural grid transforms.
///
/// The model owns rectangle semantics, fully-selected queries, the
/// multiplicity policy, and the selection markers; cell storage is delegated
/// to [`Selections`]. It is wired to the surrounding grid through three
/// constructor-injected collaborators:
///
/// - `A`: [`RowIdAccessor`], row object → stable id
/// - `D`: [`RowDataProvider`], index ↔ row object
/// - `P`: [`PositionTranslator`], visible position ↔ index
///
/// # Signals
///
/// - `selection_changed`: emitted once per observable mutation, with a
///   [`SelectionChange`] describing it. No-op mutations do not emit.
///
/// # Example
///
/// ```ignore
/// use meridian_grid::model::{PreserveSelectionModel, SelectionModel};
///
/// let mut selection = PreserveSelectionModel::new(ids, data, layer);
/// selection.select_cell(2, 0);
///
/// // The grid is sorted; the row behind position 0 changes.
/// assert!(selection.selected_row_count() == 1);
/// ```
pub struct PreserveSelectionModel<T, A, D, P>
where
    A: RowIdAccessor<T>,
{
    id_accessor: Arc<A>,
    data_provider: Arc<D>,
    translator: Arc<P>,

    /// Identity-keyed cell storage.
    selections: Selections<T, A::Id>,

    /// Whether more than one cell may be selected.
    multiple_selection_allowed: bool,

    /// Anchor of the current gesture, as `(row object, column position)`.
    selection_anchor: Option<(T, usize)>,

    /// Most recently selected cell, as `(row object, column position)`.
    last_selected_cell: Option<(T, usize)>,

    /// Last rectangular selection extent; its y is recomputed on read from
    /// the origin row's current position, through the shared handle.
    last_selected_region: Option<SharedRegion>,
    last_selected_region_origin: Option<T>,

    /// Emitted when the selection actually changes.
    pub selection_changed: Signal<SelectionChange>,
}

impl<T, A, D, P> PreserveSelectionModel<T, A, D, P>
where
    T: Clone,
    A: RowIdAccessor<T>,
    D: RowDataProvider<T>,
    P: PositionTranslator,
{
    /// Creates an empty selection model over the given collaborators.
    ///
    /// Multiple selection starts enabled.
    pub fn new(id_accessor: Arc<A>, data_provider: Arc<D>, translator: Arc<P>) -> Self {
        Self {
            id_accessor,
            data_provider,
            translator,
            selections: Selections::new(),
            multiple_selection_allowed: true,
            selection_anchor: None,
            last_selected_cell: None,
            last_selected_region: None,
            last_selected_region_origin: None,
            selection_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Position/identity resolution
    // =========================================================================

    fn row_object_by_position(&self, row_position: usize) -> Option<T> {
        let row_index = self.translator.row_index_by_position(row_position)?;
        self.data_provider.row_object(row_index)
    }

    fn row_by_position(&self, row_position: usize) -> Option<(A::Id, T)> {
        let row_object = self.row_object_by_position(row_position)?;
        let id = self.id_accessor.row_id(&row_object);
        Some((id, row_object))
    }

    fn row_position_of(&self, row_object: &T) -> Option<usize> {
        let row_index = self.data_provider.index_of_row(row_object)?;
        self.translator.row_position_by_index(row_index)
    }

    fn clamp_region(&self, region: CellRect) -> CellRect {
        region.clamped_to(
            self.translator.visible_column_count(),
            self.translator.visible_row_count(),
        )
    }

    // =========================================================================
    // Clear strategies
    // =========================================================================

    /// Height-unbounded clears walk the already-selected rows instead of the
    /// visible row axis, so the work is proportional to the selection.
    fn deselect_stored_rows(&mut self, region: CellRect) -> usize {
        let columns = region.x..region.right();
        let stored: Vec<(A::Id, T)> = self
            .selections
            .rows()
            .map(|row| (row.id().clone(), row.row_object().clone()))
            .collect();

        let mut removed = 0;
        for (id, row_object) in &stored {
            if region.y > 0 {
                // A span starting below the top is position-scoped: rows that
                // currently resolve above it, or to nothing, are untouched.
                match self.row_position_of(row_object) {
                    Some(position) if position >= region.y => {}
                    _ => continue,
                }
            }
            removed += self.selections.deselect_columns(id, columns.clone());
        }
        removed
    }

    /// Width-unbounded clears resolve each row in the span exactly once and
    /// drop its stored columns from `x` on, instead of iterating the visible
    /// column axis.
    fn deselect_row_span(&mut self, region: CellRect) -> usize {
        let columns = region.x..region.right();
        let bottom = region.bottom().min(self.translator.visible_row_count());

        let mut removed = 0;
        for row_position in region.y..bottom {
            let Some((id, _)) = self.row_by_position(row_position) else {
                continue;
            };
            removed += self.selections.deselect_columns(&id, columns.clone());
        }
        removed
    }

    fn deselect_bounded(&mut self, region: CellRect) -> usize {
        let clamped = self.clamp_region(region);
        let mut removed = 0;
        for row_position in clamped.y..clamped.bottom() {
            let Some((id, _)) = self.row_by_position(row_position) else {
                continue;
            };
            removed += self
                .selections
                .deselect_columns(&id, clamped.x..clamped.right());
        }
        removed
    }

    // =========================================================================
    // Markers
    // =========================================================================

    fn marker_position(&self, marker: Option<&(T, usize)>) -> CellPosition {
        let Some((row_object, column_position)) = marker else {
            return CellPosition::invalid();
        };
        match self.row_position_of(row_object) {
            Some(row_position) => CellPosition::new(*column_position, row_position),
            None => CellPosition::invalid(),
        }
    }

    fn resolve_marker(&self, position: CellPosition) -> Option<(T, usize)> {
        if !position.is_valid() {
            return None;
        }
        self.row_object_by_position(position.row())
            .map(|row_object| (row_object, position.column()))
    }

    fn store_region(&mut self, bounds: CellRect) {
        match &self.last_selected_region {
            Some(region) => *region.write() = bounds,
            None => self.last_selected_region = Some(Arc::new(RwLock::new(bounds))),
        }
        self.last_selected_region_origin = self.row_object_by_position(bounds.y);
    }
}

impl<T, A, D, P> SelectionModel for PreserveSelectionModel<T, A, D, P>
where
    T: Clone,
    A: RowIdAccessor<T>,
    D: RowDataProvider<T>,
    P: PositionTranslator,
{
    fn is_multiple_selection_allowed(&self) -> bool {
        self.multiple_selection_allowed
    }

    fn set_multiple_selection_allowed(&mut self, allowed: bool) {
        self.multiple_selection_allowed = allowed;
    }

    fn select_cell(&mut self, column_position: usize, row_position: usize) {
        let had_selection = !self.selections.is_empty();
        if !self.multiple_selection_allowed {
            self.selections.clear();
        }

        let mut selected = false;
        if let Some((id, row_object)) = self.row_by_position(row_position) {
            selected = self.selections.select(id, row_object, column_position);
        }

        if selected {
            trace!(target: TARGET, column_position, row_position, "cell selected");
            self.selection_changed.emit(&SelectionChange::CellsSelected {
                region: CellRect::unit(column_position, row_position),
            });
        } else if had_selection && self.selections.is_empty() {
            // Single-selection replace where the new cell did not resolve.
            self.selection_changed.emit(&SelectionChange::SelectionCleared);
        }
    }

    fn select_region(&mut self, region: CellRect) {
        let had_selection = !self.selections.is_empty();
        let mut region = region;
        if !self.multiple_selection_allowed {
            self.selections.clear();
            region = CellRect::unit(region.x, region.y);
        }

        let clamped = self.clamp_region(region);
        let mut newly_selected = 0usize;
        for row_position in clamped.y..clamped.bottom() {
            let Some((id, row_object)) = self.row_by_position(row_position) else {
                continue;
            };
            for column_position in clamped.x..clamped.right() {
                if self
                    .selections
                    .select(id.clone(), row_object.clone(), column_position)
                {
                    newly_selected += 1;
                }
            }
        }

        if newly_selected > 0 {
            trace!(target: TARGET, region = ?clamped, newly_selected, "region selected");
            self.selection_changed
                .emit(&SelectionChange::CellsSelected { region: clamped });
        } else if had_selection && self.selections.is_empty() {
            self.selection_changed.emit(&SelectionChange::SelectionCleared);
        }
    }

    fn deselect_cell(&mut self, column_position: usize, row_position: usize) {
        let mut removed = false;
        if let Some((id, _)) = self.row_by_position(row_position) {
            removed = self.selections.deselect(&id, column_position);
        }
        if removed {
            trace!(target: TARGET, column_position, row_position, "cell deselected");
            self.selection_changed
                .emit(&SelectionChange::CellsDeselected {
                    region: CellRect::unit(column_position, row_position),
                });
        }
    }

    fn deselect_region(&mut self, region: CellRect) {
        let removed = if region.is_height_unbounded() {
            self.deselect_stored_rows(region)
        } else if region.is_width_unbounded() {
            self.deselect_row_span(region)
        } else {
            self.deselect_bounded(region)
        };

        if removed > 0 {
            let clamped = self.clamp_region(region);
            trace!(target: TARGET, region = ?clamped, removed, "region deselected");
            self.selection_changed
                .emit(&SelectionChange::CellsDeselected { region: clamped });
        }
    }

    fn clear_selection(&mut self) {
        if self.selections.is_empty() {
            return;
        }
        self.selections.clear();
        trace!(target: TARGET, "selection cleared");
        self.selection_changed.emit(&SelectionChange::SelectionCleared);
    }

    fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    fn is_cell_position_selected(&self, column_position: usize, row_position: usize) -> bool {
        self.row_by_position(row_position)
            .is_some_and(|(id, _)| self.selections.is_selected(&id, column_position))
    }

    fn is_column_position_selected(&self, column_position: usize) -> bool {
        self.selections
            .rows()
            .any(|row| row.contains_column(column_position))
    }

    fn is_column_position_fully_selected(&self, column_position: usize, row_count: usize) -> bool {
        // Checked per position: duplicate or overlapping writes cannot double
        // count, and any single unselected row fails the whole column.
        (0..row_count)
            .all(|row_position| self.is_cell_position_selected(column_position, row_position))
    }

    fn selected_column_positions(&self) -> Vec<usize> {
        self.selections.column_positions()
    }

    fn fully_selected_column_positions(&self, row_count: usize) -> Vec<usize> {
        self.selections
            .column_positions()
            .into_iter()
            .filter(|&column| self.is_column_position_fully_selected(column, row_count))
            .collect()
    }

    fn is_row_position_selected(&self, row_position: usize) -> bool {
        self.row_by_position(row_position)
            .is_some_and(|(id, _)| self.selections.is_row_selected(&id))
    }

    fn is_row_position_fully_selected(&self, row_position: usize, column_count: usize) -> bool {
        let Some((id, _)) = self.row_by_position(row_position) else {
            return false;
        };
        let Some(row) = self.selections.row(&id) else {
            return false;
        };
        if row.column_count() < column_count {
            return false;
        }
        (0..column_count).all(|column| row.contains_column(column))
    }

    fn selected_row_positions(&self) -> Vec<Range<usize>> {
        let mut positions: Vec<usize> = self
            .selections
            .rows()
            .filter_map(|row| self.row_position_of(row.row_object()))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        contiguous_ranges(&positions)
    }

    fn fully_selected_row_positions(&self, column_count: usize) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .selections
            .rows()
            .filter(|row| (0..column_count).all(|column| row.contains_column(column)))
            .filter_map(|row| self.row_position_of(row.row_object()))
            .collect();
        positions.sort_unstable();
        positions
    }

    fn selected_row_count(&self) -> usize {
        self.selections.row_count()
    }

    fn selected_cells(&self) -> Vec<CellRect> {
        let mut cells = Vec::new();
        for row in self.selections.rows() {
            // Unresolvable rows drop out of the view entirely, without
            // affecting the cells of other rows.
            let Some(row_position) = self.row_position_of(row.row_object()) else {
                continue;
            };
            for column_position in row.column_positions() {
                cells.push(CellRect::unit(column_position, row_position));
            }
        }
        cells
    }
}

impl<T, A, D, P> MarkerSelectionModel for PreserveSelectionModel<T, A, D, P>
where
    T: Clone,
    A: RowIdAccessor<T>,
    D: RowDataProvider<T>,
    P: PositionTranslator,
{
    fn selection_anchor(&self) -> CellPosition {
        self.marker_position(self.selection_anchor.as_ref())
    }

    fn set_selection_anchor(&mut self, position: CellPosition) {
        self.selection_anchor = self.resolve_marker(position);
    }

    fn last_selected_cell(&self) -> CellPosition {
        self.marker_position(self.last_selected_cell.as_ref())
    }

    fn set_last_selected_cell(&mut self, position: CellPosition) {
        self.last_selected_cell = self.resolve_marker(position);
    }

    fn last_selected_region(&self) -> Option<SharedRegion> {
        let region = self.last_selected_region.as_ref()?;
        if let Some(origin) = &self.last_selected_region_origin {
            if let Some(row_position) = self.row_position_of(origin) {
                region.write().y = row_position;
            }
        }
        Some(Arc::clone(region))
    }

    fn set_last_selected_region(&mut self, region: Option<CellRect>) {
        match region {
            Some(bounds) => self.store_region(bounds),
            None => {
                self.last_selected_region = None;
                self.last_selected_region_origin = None;
            }
        }
    }

    fn set_last_selected_region_bounds(&mut self, x: usize, y: usize, width: usize, height: usize) {
        self.store_region(CellRect::new(x, y, width, height));
    }
}

/// Coalesces sorted, distinct positions into contiguous half-open ranges.
fn contiguous_ranges(positions: &[usize]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut iter = positions.iter().copied();
    let Some(first) = iter.next() else {
        return ranges;
    };
    let mut start = first;
    let mut end = first + 1;
    for position in iter {
        if position == end {
            end += 1;
        } else {
            ranges.push(start..end);
            start = position;
            end = position + 1;
        }
    }
    ranges.push(start..end);
    ranges
}
