/*!
 * Memory Module
 * Guest address space access and mapped-region bookkeeping
 */

pub mod flat;
pub mod maps;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use flat::FlatMemory;
pub use maps::RegionMap;
pub use traits::*;
pub use types::*;
