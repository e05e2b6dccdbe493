//! Litter reports.
//!
//! Anyone signed in can report litter; admins verify, collectors work on
//! verified reports in their city. Reports move through
//! `pending → verified → in-progress → resolved`, and can be closed from
//! any non-terminal state.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/litter-reports` | List visible reports (`status`, `severity`, `city`, `page`, `limit`) |
//! | POST | `/api/litter-reports` | File a report |
//! | GET | `/api/litter-reports/{id}` | Report details |
//! | PUT | `/api/litter-reports/{id}` | Transition and/or assign |
//! | DELETE | `/api/litter-reports/{id}` | Close (reporter or admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::LitterReportService;
