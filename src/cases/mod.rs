//! Case document export.

pub mod handlers;

pub use handlers::config;
