//! Core types: rooms, booked ranges, availability, tracing

pub mod availability;
pub mod tracing;

pub use availability::{BookedRange, Room, RoomAvailability, day_after};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
