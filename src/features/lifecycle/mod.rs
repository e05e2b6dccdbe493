//! Status lifecycles for waste pickups and litter reports.
//!
//! Both entity kinds share one state-machine abstraction ([`Lifecycle`])
//! with their own transition tables, one set of actor rules
//! ([`guard`]) and one role-scoped visibility predicate ([`scope`]).
//! Everything here is pure; services supply the current entity and the
//! looked-up assignee and persist the resulting [`UpdatePlan`].

mod actor;
mod error;
mod machine;

pub mod guard;
pub mod scope;

pub use actor::Actor;
pub use error::LifecycleError;
pub use guard::{UpdatePlan, UpdateRequest};
pub use machine::Lifecycle;
pub use scope::{ListFilter, ScopeColumns, Scoped, ScopedQuery};
