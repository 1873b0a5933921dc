//! Result types and batch ranking
//!
//! - Compatibility results, mix parameters and ranking records
//! - Parallel ranking of a candidate library against a base track

pub mod ranking;
pub mod result;
