//! Price history module
//!
//! Spot observations pushed in by an external producer, kept in a bounded
//! chronological window that every engine cycle reads from.

mod types;
mod window;

pub use types::PricePoint;
pub use window::PriceWindow;
