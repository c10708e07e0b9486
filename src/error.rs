use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Physics Error: body {0} is not in the world")]
    UnknownBody(String),

    #[error("Config Error: {0}")]
    InvalidConfig(String),

    #[error("Landmark Error: expected {expected} points, found {found}")]
    LandmarkCount { expected: usize, found: usize },
}
