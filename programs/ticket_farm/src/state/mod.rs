pub mod catalog;
pub mod config;
pub mod pool;
pub mod user;

pub use catalog::*;
pub use config::*;
pub use pool::*;
pub use user::*;
