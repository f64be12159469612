//! Construction heuristic initializer.
//!
//! Expands every demand unit into its planning entities, then assigns each
//! entity, hardest demand first, the candidate value with the best score.

mod events;
mod initializer;

pub use events::{InitializerEventSink, NoopEventSink, TracingEventSink};
pub use initializer::{ConstructionInitializer, InitializationSummary};
