pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod types;

pub use config::Config;
pub use db::Store;
pub use error::ShelfError;
pub use router::{ShelfState, shelf_router};
