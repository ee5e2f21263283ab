pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
