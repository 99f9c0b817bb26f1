//! idmap-resolver — Multi-source identifier resolution.
//!
//! Queries every source that supports a conversion, in priority order, and
//! merges their answers by priority fallback or by consensus vote.

pub mod consensus;
pub mod resolver;
pub mod registry;
pub mod config;

pub use resolver::{IdResolver, ResolutionReport, SourceColumn};
pub use registry::{BuiltinSource, SourceSelection, build_resolver, build_sources};
pub use config::ResolverConfig;
