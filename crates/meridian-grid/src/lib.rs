//! Meridian Grid - a data grid widget toolkit for Rust.
//!
//! This is the toolkit's model layer. Its centerpiece is the
//! selection-persistence engine: selection state is keyed by stable row
//! identity rather than by visual position, so a user's selection survives
//! sorting, filtering, reordering, and hide/show of rows and columns without
//! being re-issued.
//!
//! See the [`model`] module for the full architecture.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use meridian_grid::model::{PreserveSelectionModel, SelectionModel};
//!
//! // The grid layer supplies the three collaborators: identity access,
//! // row data access, and position translation.
//! let mut selection = PreserveSelectionModel::new(ids, data, layer);
//!
//! selection.select_cell(2, 0);
//! assert!(selection.is_cell_position_selected(2, 0));
//!
//! // Sorting the grid moves rows around; the selection follows the row.
//! ```

pub use meridian_grid_core::*;

pub mod model;
