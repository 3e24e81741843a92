pub mod availability;
pub mod booking;
pub mod customer;
pub mod provider;
