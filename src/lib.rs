mod api;
pub mod auth;
mod config;
mod cookie;
pub mod dashboard;
mod error;
mod media_type;
mod models;
mod server;
mod token;
mod token_store;
mod views;

pub use api::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use server::*;
pub use token::*;
pub use token_store::*;
