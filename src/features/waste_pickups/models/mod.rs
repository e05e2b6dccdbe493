mod waste_pickup;

pub use waste_pickup::{NewWastePickup, PickupStatus, QuantityUnit, TimeSlot, WastePickup};
