pub mod admin;
pub mod auth;
pub mod lifecycle;
pub mod litter_reports;
pub mod users;
pub mod waste_pickups;
