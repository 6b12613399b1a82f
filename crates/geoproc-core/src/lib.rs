//! geoproc core - envelopes, configuration and operation dispatch
//!
//! This crate turns GeoJSON payloads into calls on a [`ports::GeometryEngine`]
//! and turns the results back into GeoJSON shaped like the input.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod ports;
pub mod processing;

pub use error::{GeoprocError, Result};
pub use models::{Operation, ProcessingDefaults};
pub use ports::{EngineFailure, GeometryEngine};
pub use processing::Processor;
