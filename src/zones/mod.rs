//! Card zones outside the hands: the shared table and the capture piles.
//!
//! Casino's zones are fixed, so unlike a general engine they are concrete
//! types rather than configured IDs.

pub mod table;
pub mod capture;

pub use table::{Table, TableItem};
pub use capture::CaptureStack;
