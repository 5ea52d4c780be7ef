pub mod client;
pub mod error;
pub mod worker;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::ApiError;
pub use worker::ApiWorker;
