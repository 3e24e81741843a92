//! # SlotSync Core
//!
//! Domain types and the booking engine for the SlotSync scheduling service.
//!
//! - **models**: time windows, availability, bookings, suggestions and the
//!   provider/customer records that own them
//! - **engine**: interval tests, slot generation, conflict filtering, exact
//!   matching and suggestion ranking
//! - **store**: the `SchedulingStore` trait the engine reads from and writes
//!   bookings through, plus an in-memory implementation
//! - **errors**: the error taxonomy shared by every layer

pub mod engine;
pub mod errors;
pub mod models;
pub mod store;
