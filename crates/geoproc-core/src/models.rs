pub mod envelope;
pub mod operation;

pub use envelope::{EnvelopeKind, InputEnvelope};
pub use operation::{
    Operation, OperationParams, ProcessingDefaults, DEFAULT_EXTRUDE_HEIGHT,
    DEFAULT_OFFSET_DISTANCE,
};
