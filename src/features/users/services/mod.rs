mod user_directory;
mod user_service;

pub use user_directory::{PgUserDirectory, UserDirectory};
pub use user_service::UserService;
