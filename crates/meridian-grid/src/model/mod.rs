//! Model layer for Meridian Grid.
//!
//! This module provides the types behind the grid's selection-persistence
//! engine. The engine separates two coordinate systems:
//!
//! - **Position**: a row/column's place in the currently visible
//!   (transformed) view, as painted on screen.
//! - **Index**: the underlying, untransformed ordinal from the data source.
//!
//! Sorting, filtering, reordering, and hide/show all change which index (and
//! therefore which row object) sits behind a given position. Selection state
//! is therefore keyed by stable row *identity*: every operation that enters
//! the engine with a position resolves it to a row id first, and every read
//! that must report positions resolves ids back through the live grid layer.
//!
//! # Core Types
//!
//! - [`CellPosition`] / [`CellRect`]: visible cell coordinates
//! - [`Selections`]: identity-keyed sparse set of selected cells
//! - [`PreserveSelectionModel`]: the position-translating selection model
//!
//! # Collaborator Traits
//!
//! The engine is wired to the surrounding grid through three
//! constructor-injected contracts:
//!
//! - [`RowIdAccessor`]: row object → stable identity
//! - [`RowDataProvider`]: row index ↔ row object, row/column counts
//! - [`PositionTranslator`]: visible position ↔ underlying index, reflecting
//!   the current hide/reorder state
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐     position      ┌────────────────────┐
//! │ PreserveSelection-   │──────────────────>│ PositionTranslator │
//! │ Model                │       index       └────────────────────┘
//! │  rectangle semantics │──────────────────>┌────────────────────┐
//! │  fully-selected      │    row object     │ RowDataProvider    │
//! │  anchor / markers    │──────────────────>└────────────────────┘
//! └──────────┬───────────┘      row id       ┌────────────────────┐
//!            │ set operations ──────────────>│ RowIdAccessor      │
//!            v                               └────────────────────┘
//! ┌──────────────────────┐
//! │ Selections           │   pure identity-keyed cell set
//! └──────────────────────┘
//! ```

mod cell;
mod preserve;
mod selections;
mod traits;

pub use cell::{CellPosition, CellRect, SharedRegion};
pub use preserve::{PreserveSelectionModel, SelectionChange};
pub use selections::{SelectedCell, SelectedRow, Selections};
pub use traits::{
    MarkerSelectionModel, PositionTranslator, RowDataProvider, RowIdAccessor, SelectionModel,
};
