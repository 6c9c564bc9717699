//! Contract search module
//!
//! Builds a strike ladder around spot, scores YES and NO at every strike,
//! extends the ladder upward when its top is still tradeable, and selects the
//! best candidate.

mod search;
mod strikes;

pub use search::{select_best, true_prob_above, ContractSearch, SearchResult};
pub use strikes::{build_ladder, centre_strike, extend_above};
