mod waste_pickup_service;

pub use waste_pickup_service::WastePickupService;
