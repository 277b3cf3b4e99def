//! End-to-end scenarios for selection persistence across structural grid
//! transforms: sorting, filtering, hide/show, and reordering.
//!
//! The fixture plays the role of the surrounding grid: it owns the row data
//! and the visible row mapping, and implements all three collaborator
//! contracts the selection model is wired to.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use meridian_grid::model::{
    CellPosition, CellRect, MarkerSelectionModel, PositionTranslator, PreserveSelectionModel,
    RowDataProvider, RowIdAccessor, SelectionModel,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Employee {
    id: u32,
    name: &'static str,
    score: u32,
}

type RowHandle = Arc<Employee>;

/// A grid over a fixed employee roster. Rows keep their underlying index for
/// life; sorting and filtering only rewrite the visible position mapping.
struct RosterGrid {
    rows: Vec<RowHandle>,
    visible_rows: RwLock<Vec<usize>>,
    column_count: usize,
    id_lookups: AtomicUsize,
}

impl RosterGrid {
    fn new() -> Arc<Self> {
        let rows = vec![
            Arc::new(Employee { id: 11, name: "ada", score: 92 }),
            Arc::new(Employee { id: 12, name: "grace", score: 85 }),
            Arc::new(Employee { id: 13, name: "edsger", score: 71 }),
            Arc::new(Employee { id: 14, name: "barbara", score: 97 }),
            Arc::new(Employee { id: 15, name: "donald", score: 64 }),
        ];
        let visible = (0..rows.len()).collect();
        Arc::new(Self {
            rows,
            visible_rows: RwLock::new(visible),
            column_count: 3,
            id_lookups: AtomicUsize::new(0),
        })
    }

    fn position_of_name(&self, name: &str) -> Option<usize> {
        let visible = self.visible_rows.read();
        visible
            .iter()
            .position(|&index| self.rows[index].name == name)
    }

    fn sort_by_name(&self) {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by_key(|&index| self.rows[index].name);
        *self.visible_rows.write() = order;
    }

    fn sort_by_score_descending(&self) {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by_key(|&index| std::cmp::Reverse(self.rows[index].score));
        *self.visible_rows.write() = order;
    }

    /// Keeps only rows passing the predicate, preserving the current order.
    fn filter(&self, keep: impl Fn(&Employee) -> bool) {
        self.visible_rows
            .write()
            .retain(|&index| keep(&self.rows[index]));
    }

    fn reset_view(&self) {
        *self.visible_rows.write() = (0..self.rows.len()).collect();
    }
}

impl RowIdAccessor<RowHandle> for RosterGrid {
    type Id = u32;

    fn row_id(&self, row_object: &RowHandle) -> u32 {
        self.id_lookups.fetch_add(1, Ordering::SeqCst);
        row_object.id
    }
}

impl RowDataProvider<RowHandle> for RosterGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn row_object(&self, row_index: usize) -> Option<RowHandle> {
        self.rows.get(row_index).cloned()
    }

    fn index_of_row(&self, row_object: &RowHandle) -> Option<usize> {
        self.rows.iter().position(|row| Arc::ptr_eq(row, row_object))
    }
}

impl PositionTranslator for RosterGrid {
    fn row_index_by_position(&self, row_position: usize) -> Option<usize> {
        self.visible_rows.read().get(row_position).copied()
    }

    fn row_position_by_index(&self, row_index: usize) -> Option<usize> {
        self.visible_rows
            .read()
            .iter()
            .position(|&index| index == row_index)
    }

    fn column_index_by_position(&self, column_position: usize) -> Option<usize> {
        (column_position < self.column_count).then_some(column_position)
    }

    fn column_position_by_index(&self, column_index: usize) -> Option<usize> {
        (column_index < self.column_count).then_some(column_index)
    }

    fn visible_row_count(&self) -> usize {
        self.visible_rows.read().len()
    }

    fn visible_column_count(&self) -> usize {
        self.column_count
    }
}

type Model = PreserveSelectionModel<RowHandle, RosterGrid, RosterGrid, RosterGrid>;

fn model(grid: &Arc<RosterGrid>) -> Model {
    PreserveSelectionModel::new(grid.clone(), grid.clone(), grid.clone())
}

#[test]
fn collaborator_contracts_are_consistent() {
    init_tracing();
    let grid = RosterGrid::new();

    assert_eq!(grid.row_count(), 5);
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.visible_row_count(), 5);
    assert_eq!(grid.visible_column_count(), 3);

    // Position and index round-trip while the view is untransformed.
    for position in 0..grid.visible_row_count() {
        let index = grid.row_index_by_position(position).unwrap();
        assert_eq!(grid.row_position_by_index(index), Some(position));
    }
    for column in 0..grid.visible_column_count() {
        let index = grid.column_index_by_position(column).unwrap();
        assert_eq!(grid.column_position_by_index(index), Some(column));
    }
    assert_eq!(grid.row_index_by_position(99), None);
    assert_eq!(grid.column_index_by_position(3), None);

    // The id accessor is stable per row object.
    let row = grid.row_object(2).unwrap();
    assert_eq!(grid.row_id(&row), grid.row_id(&row));
}

#[test]
fn selection_survives_sort_filter_and_restore() {
    init_tracing();
    let grid = RosterGrid::new();
    let mut selection = model(&grid);

    // Select the score column cell of ada and donald, by position.
    selection.select_cell(2, grid.position_of_name("ada").unwrap());
    selection.select_cell(2, grid.position_of_name("donald").unwrap());

    grid.sort_by_score_descending();
    // barbara 97, ada 92, grace 85, edsger 71, donald 64.
    assert!(selection.is_cell_position_selected(2, 1));
    assert!(selection.is_cell_position_selected(2, 4));
    assert!(!selection.is_cell_position_selected(2, 0));

    // Filter below 70: donald drops out of the view but not out of the
    // selection's identity space.
    grid.filter(|employee| employee.score >= 70);
    assert_eq!(selection.selected_row_count(), 2);
    assert_eq!(selection.selected_cells(), vec![CellRect::unit(2, 1)]);

    grid.reset_view();
    let positions: Vec<usize> = selection
        .selected_cells()
        .into_iter()
        .map(|rect| rect.y)
        .collect();
    assert_eq!(
        positions,
        vec![
            grid.position_of_name("ada").unwrap(),
            grid.position_of_name("donald").unwrap(),
        ]
    );
}

#[test]
fn full_row_selection_follows_its_row() {
    init_tracing();
    let grid = RosterGrid::new();
    let mut selection = model(&grid);

    // Select grace's whole row with an unbounded-width rectangle.
    let grace = grid.position_of_name("grace").unwrap();
    selection.select_region(CellRect::new(0, grace, CellRect::UNBOUNDED, 1));
    assert!(selection.is_row_position_fully_selected(grace, grid.column_count()));

    grid.sort_by_name();
    let grace = grid.position_of_name("grace").unwrap();
    assert!(selection.is_row_position_fully_selected(grace, grid.column_count()));
    assert_eq!(selection.fully_selected_row_positions(grid.column_count()), vec![grace]);
    assert_eq!(selection.selected_row_positions(), vec![grace..grace + 1]);
}

#[test]
fn full_column_selection_tracks_filtering() {
    init_tracing();
    let grid = RosterGrid::new();
    let mut selection = model(&grid);

    selection.select_region(CellRect::new(1, 0, 1, CellRect::UNBOUNDED));
    assert!(selection.is_column_position_fully_selected(1, grid.visible_row_count()));

    // Hiding rows cannot break a fully selected column; every remaining
    // visible row still has the column selected.
    grid.filter(|employee| employee.score >= 80);
    assert!(selection.is_column_position_fully_selected(1, grid.visible_row_count()));

    // Restoring the view cannot either, since the hidden rows kept their
    // selection state.
    grid.reset_view();
    assert!(selection.is_column_position_fully_selected(1, grid.visible_row_count()));
    assert_eq!(
        selection.fully_selected_column_positions(grid.visible_row_count()),
        vec![1]
    );
}

#[test]
fn markers_follow_their_rows_across_sorting() {
    init_tracing();
    let grid = RosterGrid::new();
    let mut selection = model(&grid);

    let edsger = grid.position_of_name("edsger").unwrap();
    selection.select_cell(0, edsger);
    selection.set_selection_anchor(CellPosition::new(0, edsger));
    selection.set_last_selected_cell(CellPosition::new(0, edsger));
    selection.set_last_selected_region(Some(CellRect::new(0, edsger, 1, 1)));

    grid.sort_by_name();
    let edsger = grid.position_of_name("edsger").unwrap();

    assert_eq!(selection.selection_anchor(), CellPosition::new(0, edsger));
    assert_eq!(selection.last_selected_cell(), CellPosition::new(0, edsger));
    let region = selection.last_selected_region().unwrap();
    assert_eq!(region.read().y, edsger);

    // Filtering the anchor row out degrades the markers to the invalid
    // sentinel instead of failing, and they come back with the row.
    grid.filter(|employee| employee.name != "edsger");
    assert!(!selection.selection_anchor().is_valid());
    assert!(!selection.last_selected_cell().is_valid());

    grid.reset_view();
    assert!(selection.selection_anchor().is_valid());
}

#[test]
fn shift_extend_gesture_reuses_the_region_handle() {
    init_tracing();
    let grid = RosterGrid::new();
    let mut selection = model(&grid);

    // Click at (0, 1), then shift-extend two columns to the right.
    selection.select_cell(0, 1);
    selection.set_selection_anchor(CellPosition::new(0, 1));
    selection.set_last_selected_region(Some(CellRect::new(0, 1, 1, 1)));
    let region = selection.last_selected_region().unwrap();

    let anchor = selection.selection_anchor();
    selection.set_last_selected_region_bounds(anchor.column(), anchor.row(), 3, 1);
    selection.select_region(*region.read());

    assert!(selection.is_cell_position_selected(0, 1));
    assert!(selection.is_cell_position_selected(1, 1));
    assert!(selection.is_cell_position_selected(2, 1));
    assert_eq!(selection.selected_row_count(), 1);
}
