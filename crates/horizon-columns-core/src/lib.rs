//! Core systems for Horizon Columns.
//!
//! This crate provides the toolkit-independent building blocks the column
//! widget is made of:
//!
//! - **Geometry**: points, sizes, rectangles, insets and colors
//! - **Signal/Slot System**: Type-safe notification of selection and reloads
//! - **Property System**: Interior-mutable cells with change detection
//! - **Logging**: `tracing` targets, span names and a timing guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_columns_core::Signal;
//!
//! let reloaded = Signal::<()>::new();
//! let conn_id = reloaded.connect(|_| println!("row reloaded"));
//!
//! reloaded.emit(());
//! reloaded.disconnect(conn_id);
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::ParseColorError;
pub use geometry::{Color, Insets, Point, Rect, Size};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
