pub mod joke_service;
pub mod user_store;

pub use joke_service::*;
pub use user_store::*;
