//! Error types.
//!
//! `InputError` is data-level: the engine logs it and skips the offending
//! item. `SimulationError` is fatal and is always raised before the first
//! trial runs.

use crate::point_system::{Outcome, PointSystem};

/// A single bad input item (result, fixture or line).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("team `{team}` is not in the roster")]
    UnknownTeam { team: String },

    #[error("outcome `{outcome}` is not valid under the `{system}` point system")]
    OutcomeNotAllowed { outcome: Outcome, system: PointSystem },

    #[error("unknown outcome code `{0}`")]
    UnknownOutcomeCode(String),

    #[error("malformed line `{0}`")]
    MalformedLine(String),
}

/// Configuration-level failures. Nothing is simulated when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("conflicting configuration: {0}")]
    ConflictingConfiguration(String),

    #[error("no schedule: supply either a round count or a fixture list")]
    MissingSchedule,

    #[error("unsupported point system `{0}` (expected `f` or `3ph`)")]
    UnsupportedPointSystem(String),

    #[error("invalid trial count {0}: must be positive")]
    InvalidTrialCount(i64),

    #[error("invalid probability `{0}`: must be a decimal in [0, 1]")]
    InvalidProbability(String),

    #[error("invalid round count {0}: must be at least 1")]
    InvalidRounds(u32),

    #[error("team `{0}` appears more than once in the roster")]
    DuplicateTeam(String),

    #[error("roster is empty")]
    EmptyRoster,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
