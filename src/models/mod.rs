pub mod joke;
pub mod user;

pub use joke::*;
pub use user::*;
