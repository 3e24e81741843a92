pub mod availability;
pub mod booking;
pub mod participant;
pub mod suggestion;
pub mod window;
