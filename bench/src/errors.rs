use groth16_backend::ZkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Zk(#[from] ZkError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reference proof did not verify")]
    VerificationFailed,
}
