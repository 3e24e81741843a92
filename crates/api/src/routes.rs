pub mod availability;
pub mod bookings;
pub mod customers;
pub mod health;
pub mod providers;
