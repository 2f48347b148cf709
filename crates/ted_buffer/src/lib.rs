//! A byte gap buffer with row/column navigation, the storage behind the
//! editor's single document.

mod buffer;
mod gap;
mod iter;
mod navigator;
mod position;

pub use buffer::{next_capacity, GapBuffer, INITIAL_CAPACITY};
pub use gap::Gap;
pub use iter::Bytes;
pub use navigator::{CursorNavigator, Motion};
pub use position::Position;
