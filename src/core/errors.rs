#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no empty cell to spawn a tile into")]
    NoEmptyCell,
    #[error("malformed state: {0}")]
    MalformedState(String),
}
