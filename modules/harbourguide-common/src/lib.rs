pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use config::Config;
pub use error::HarbourGuideError;
pub use geo::{haversine_km, round_km};
pub use types::*;
