/*!
 * Process Module
 * Guest process identity and descriptor bookkeeping
 */

pub mod pcb;
pub mod session;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use pcb::ProcessControlBlock;
pub use session::Session;
pub use traits::DescriptorTable;
pub use types::FdEntry;
