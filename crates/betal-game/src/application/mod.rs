//! Store, controller and view computation.

pub mod controller;
pub mod store;
pub mod views;
