//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod urls;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{resolve_handler, shorten_handler};
