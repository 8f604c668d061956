//! Server-authoritative Belot engine: a pure rules core plus an
//! actor-per-game concurrency layer that serializes client actions and
//! fans out state snapshots.

pub mod archive;
pub mod config;
pub mod domain;
pub mod errors;
pub mod sync;
pub mod telemetry;

pub use config::EngineConfig;
pub use errors::DomainError;
