//! idmap-common — Shared types, errors, and value conventions used across all idmap crates.

pub mod error;
pub mod id_type;
pub mod fill;
pub mod multi_hits;
pub mod conversion;

// Re-export commonly used types
pub use error::{IdMapError, Result};
pub use id_type::IdType;
pub use fill::FillValue;
pub use multi_hits::{MultiHits, MULTI_HIT_SEPARATOR};
pub use conversion::{Conversion, IdQuery, KeyedValues};
