// Service exports
pub mod postgres;
pub mod vision;

pub use postgres::{LocationSort, PostgresClient, PostgresError, SortDirection};
pub use vision::{VisionClient, VisionError};
