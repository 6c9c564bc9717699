//! Risk module
//!
//! Position sizing for the recommended contract

mod sizing;

pub use sizing::{expected_value, PositionSizer};
