//! Identity-keyed sparse storage of selected cells.
//!
//! [`Selections`] is the leaf of the selection engine: a pure data structure
//! with no position awareness. Cells are stored per row id as an ordered set
//! of column positions; which object a row id currently corresponds to on
//! screen is entirely the caller's concern.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::ops::Range;

/// The selected cells of a single row: its id, its row object, and an
/// ordered set of selected column positions.
///
/// A `SelectedRow` exists exactly as long as it has at least one selected
/// column; [`Selections`] removes the entry the instant the set empties.
#[derive(Debug, Clone)]
pub struct SelectedRow<T, I> {
    id: I,
    row_object: T,
    columns: BTreeSet<usize>,
}

impl<T, I> SelectedRow<T, I> {
    fn new(id: I, row_object: T) -> Self {
        Self {
            id,
            row_object,
            columns: BTreeSet::new(),
        }
    }

    /// The row's stable identity.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// The row object this entry was created for.
    pub fn row_object(&self) -> &T {
        &self.row_object
    }

    /// The selected column positions, ascending.
    pub fn column_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    /// Returns `true` if the given column is selected on this row.
    pub fn contains_column(&self, column_position: usize) -> bool {
        self.columns.contains(&column_position)
    }

    /// Number of selected columns on this row. Never zero.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// A selected cell, flattened to its row object and column position.
#[derive(Debug, Clone, Copy)]
pub struct SelectedCell<'a, T> {
    /// The row object the cell belongs to.
    pub row_object: &'a T,
    /// The cell's column position.
    pub column_position: usize,
}

/// Identity-keyed sparse set of selected cells.
///
/// Rows are kept in first-selection order so iteration is deterministic;
/// per-row columns are ordered sets, so the whole structure has no ordering
/// ambiguity. There is no other state.
///
/// # Example
///
/// ```
/// use meridian_grid::model::Selections;
///
/// let mut selections: Selections<&str, u32> = Selections::new();
/// selections.select(7, "row seven", 2);
/// selections.select(7, "row seven", 0);
///
/// assert!(selections.is_selected(&7, 2));
/// assert!(selections.is_row_selected(&7));
/// assert_eq!(selections.column_positions(), vec![0, 2]);
///
/// selections.deselect(&7, 0);
/// selections.deselect(&7, 2);
/// assert!(selections.is_empty());
/// ```
pub struct Selections<T, I> {
    rows: HashMap<I, SelectedRow<T, I>>,
    /// Row ids in first-selection order, for deterministic iteration.
    order: Vec<I>,
}

impl<T, I: Clone + Eq + Hash> Selections<T, I> {
    /// Creates an empty selection set.
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Selects `column_position` on the given row, creating the row entry if
    /// this is the row's first selected cell.
    ///
    /// Returns `true` if the cell was newly selected; selecting an already
    /// selected cell is a no-op.
    pub fn select(&mut self, id: I, row_object: T, column_position: usize) -> bool {
        match self.rows.entry(id) {
            Entry::Occupied(mut entry) => entry.get_mut().columns.insert(column_position),
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                let row = entry.insert(SelectedRow::new(id.clone(), row_object));
                row.columns.insert(column_position);
                self.order.push(id);
                true
            }
        }
    }

    /// Deselects `column_position` on the given row; the row entry is
    /// removed entirely when its last column goes.
    ///
    /// Returns `true` if the cell had been selected.
    pub fn deselect(&mut self, id: &I, column_position: usize) -> bool {
        let Some(row) = self.rows.get_mut(id) else {
            return false;
        };
        let removed = row.columns.remove(&column_position);
        if removed && row.columns.is_empty() {
            self.remove_row(id);
        }
        removed
    }

    /// Deselects every column of the row that falls inside `columns`,
    /// removing the row entry if that empties it.
    ///
    /// Returns the number of cells deselected. This is the primitive behind
    /// row-span and column-span clears: one call per stored row, cost
    /// proportional to the row's stored columns.
    pub fn deselect_columns(&mut self, id: &I, columns: Range<usize>) -> usize {
        let Some(row) = self.rows.get_mut(id) else {
            return 0;
        };
        let before = row.columns.len();
        row.columns.retain(|column| !columns.contains(column));
        let removed = before - row.columns.len();
        if removed > 0 && row.columns.is_empty() {
            self.remove_row(id);
        }
        removed
    }

    /// Returns `true` if the given cell is selected.
    pub fn is_selected(&self, id: &I, column_position: usize) -> bool {
        self.rows
            .get(id)
            .is_some_and(|row| row.contains_column(column_position))
    }

    /// Returns `true` if the row has any selected cell.
    pub fn is_row_selected(&self, id: &I) -> bool {
        self.rows.contains_key(id)
    }

    /// The row entry for the given id, if any cell of it is selected.
    pub fn row(&self, id: &I) -> Option<&SelectedRow<T, I>> {
        self.rows.get(id)
    }

    /// Number of rows with at least one selected cell.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes every selection.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.order.clear();
    }

    /// The selected rows, in first-selection order.
    pub fn rows(&self) -> impl Iterator<Item = &SelectedRow<T, I>> + '_ {
        self.order.iter().filter_map(move |id| self.rows.get(id))
    }

    /// Every selected cell, flattened to `(row object, column position)`
    /// pairs: rows in first-selection order, columns ascending.
    pub fn cells(&self) -> impl Iterator<Item = SelectedCell<'_, T>> + '_ {
        self.rows().flat_map(|row| {
            row.columns.iter().map(move |&column_position| SelectedCell {
                row_object: &row.row_object,
                column_position,
            })
        })
    }

    /// The union of selected column positions across all rows, ascending and
    /// distinct.
    pub fn column_positions(&self) -> Vec<usize> {
        let mut positions = BTreeSet::new();
        for row in self.rows.values() {
            positions.extend(row.columns.iter().copied());
        }
        positions.into_iter().collect()
    }

    fn remove_row(&mut self, id: &I) {
        self.rows.remove(id);
        self.order.retain(|key| key != id);
    }
}

impl<T, I: Clone + Eq + Hash> Default for Selections<T, I> {
    fn default() -> Self {
        Self::new()
    }
}
