//! Error type for the configuration-time failures
//!
//! Collisions, game over and other simulation outcomes are events, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcadeError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas element `{0}` not found")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("could not acquire a 2D drawing context")]
    NoContext2d,
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid tuning: {0}")]
    Tuning(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    TuningValue(String),
    #[error("unknown game `{0}`")]
    UnknownGame(String),
}
