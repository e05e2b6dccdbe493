mod waste_pickup_repository;

pub use waste_pickup_repository::{PgWastePickupRepository, WastePickupRepository};
