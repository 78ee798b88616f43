//! In-memory real-estate listing browser: a property query engine with
//! composable filters and sorting, a bookmark index, and an agent directory,
//! all seeded from bundled JSON.

pub mod browse;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;

pub use browse::ListingBrowser;
pub use config::Config;
pub use error::{StoreError, StoreResult};
