pub mod waste_pickup_handler;
