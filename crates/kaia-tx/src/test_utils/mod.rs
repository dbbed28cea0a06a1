//! Test utilities for the Kaia transaction layer.

mod state;
mod transactions;

pub use state::*;
pub use transactions::*;
