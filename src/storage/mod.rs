//! Subscriber and tool persistence.
//!
//! The [`Store`] trait is the only surface callers see; [`MemoryStore`] keeps
//! everything in process memory with no persistence across restarts.

mod memory;
mod records;
mod stats;
mod traits;

pub use memory::MemoryStore;
pub use records::{Candidate, Subscriber, Tool};
pub use stats::ToolStats;
pub use traits::Store;
