// Core library for the Trellis routing framework
// This crate contains the declaration model, the collection pass, and the
// precedence ordering that produces the final route table

pub mod collector;
pub mod declaration;
pub mod entry;
pub mod error;
pub mod group;
pub mod logging;
pub mod pattern;
pub mod sort;
pub mod table;

// Re-export commonly used types
pub use collector::*;
pub use declaration::*;
pub use entry::*;
pub use error::*;
pub use group::*;
pub use pattern::*;
pub use sort::*;
pub use table::*;
// logging stays namespaced; it re-exports the tracing macros
