//! coin-timeline: correlation engine for coin prices, tweet volume, notable
//! events and model prediction logs.
//!
//! Payloads are fetched by the host and handed to [`TimelineEngine`], which
//! merges them into a price-anchored timeline, projects event markers through
//! host-supplied scales, owns the single-date selection and resolves
//! prediction outcomes for it.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod sources;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
