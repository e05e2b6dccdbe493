//! Waste pickup requests.
//!
//! Citizens schedule pickups, collectors claim and fulfil them within their
//! city, admins oversee everything. Status changes go through the pickup
//! lifecycle (`pending → scheduled → in-progress → completed`, with
//! cancellation from any non-terminal state); completing a pickup credits
//! the assigned collector.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/waste-pickups` | List visible pickups (`status`, `page`, `limit`) |
//! | POST | `/api/waste-pickups` | Schedule a pickup (citizens) |
//! | GET | `/api/waste-pickups/{id}` | Pickup details |
//! | PUT | `/api/waste-pickups/{id}` | Transition and/or assign |
//! | DELETE | `/api/waste-pickups/{id}` | Cancel (owner or admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::WastePickupService;
