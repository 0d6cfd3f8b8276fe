pub mod address;
pub mod config;
pub mod coordinate;
pub mod table;

pub use address::{AddressField, AddressFields, FieldSelection};
pub use config::{ClientConfig, EnrichConfig};
pub use coordinate::Coordinate;
pub use table::RecordTable;
