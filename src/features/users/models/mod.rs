mod user;

pub use user::{AssignedArea, User, UserRole};
