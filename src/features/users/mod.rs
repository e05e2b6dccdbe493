//! Users as seen by the lifecycle service.
//!
//! Accounts themselves are issued by the identity provider; this feature
//! resolves token subjects into stored users (role, assigned area, pickup
//! counter) and lets users read and edit their own profile.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/me` | Current user profile |
//! | PUT | `/api/users/me` | Update own name and email |
//! | GET | `/api/users/collectors` | Collectors, optional `city` filter (admin/collector) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
