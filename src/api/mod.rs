mod consumer_dispatch;
mod consumer_registry;
mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod prediction_resolver;
mod request_context;
mod snapshot_controller;

pub use engine::TimelineEngine;
pub use engine::TimelineStatus;
use engine::LoadedSources;
pub use engine_config::{COIN_PLACEHOLDER, ModelSpec, SourceLayout, TimelineEngineConfig};
pub use engine_snapshot::{PredictionSourceSummary, TimelineSnapshot};
pub use json_contract::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
pub use prediction_resolver::{ModelLogState, PredictionLookup, PredictionResolver};
pub use request_context::{CoinRequest, Delivery, RequestTicket, SourceRef, SourceRequest};
