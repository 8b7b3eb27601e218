pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod types;

pub use client::CartClient;
pub use error::CartError;
pub use router::{CartState, cartd_router};
