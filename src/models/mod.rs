//! Core data models for the schedule extraction engine.
//!
//! This module contains all the domain models used throughout the engine.

mod month;
mod payload;
mod position;
mod shift;

pub use month::MonthBase;
pub use payload::SchedulePayload;
pub use position::Position;
pub use shift::{ExtraShift, NightShift};
