//! Calculator session: the imperative shell around the pure core.
//!
//! A [`Calculator`] owns one input state and, for the history variant, a
//! persisted [`HistoryLog`](crate::core::HistoryLog). Each user [`Action`]
//! is dispatched synchronously to the pure transitions in
//! [`crate::core`]; completed calculations are timestamped and recorded.

mod action;
mod calculator;
mod error;

pub use action::{Action, Mode, Variant};
pub use calculator::{Calculator, HistoryRow};
pub use error::ActionError;
