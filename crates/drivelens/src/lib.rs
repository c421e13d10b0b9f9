//! DriveLens: car financing math, vehicle recommendations, and the HTTP
//! surface that serves them.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod finance;
pub mod profile;
pub mod telemetry;

pub use advisor::{financing_router, AdvisorError, FinancingService};
pub use catalog::{CatalogError, VehicleCatalog, VehicleModel};
pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use profile::{UserProfile, ValidationError};
