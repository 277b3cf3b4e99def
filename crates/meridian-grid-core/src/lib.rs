//! Core systems for Meridian Grid.
//!
//! This crate provides the foundational components of the Meridian Grid
//! widget toolkit:
//!
//! - **Signal/Slot System**: Type-safe change notification between the model
//!   layer and its observers
//!
//! Everything here follows the toolkit's synchronous, command-driven
//! execution model: signals invoke their slots directly on the emitting
//! thread, in connection order.
//!
//! # Signal/Slot Example
//!
//! ```
//! use meridian_grid_core::Signal;
//!
//! // Create a signal that notifies with a row count
//! let rows_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = rows_changed.connect(|count| {
//!     println!("Row count is now {count}");
//! });
//!
//! // Emit the signal
//! rows_changed.emit(&42);
//!
//! // Disconnect when done
//! rows_changed.disconnect(conn_id);
//! ```

pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
