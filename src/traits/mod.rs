//! Optimizer seams
//!
//! The objective is a black-box oracle; search strategies only see it
//! through [`Objective`]. Each strategy owns one axis of the design
//! (phases or position) and leaves the other untouched.

mod objective;
mod strategy;

pub use objective::Objective;
pub use strategy::{AcceptedMove, Design, SearchReport, SearchStrategy, StopReason};
