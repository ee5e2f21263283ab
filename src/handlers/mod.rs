//! HTTP handlers.

pub mod generate;
pub mod health;
pub mod pages;

pub use generate::generate_image;
pub use health::health_check;
pub use pages::{fallback_page, test_cors};
