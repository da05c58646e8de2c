use jsbsonrpc_types::error::CodecError;
use jsbsonrpc_types::wire::WireType;
use thiserror::Error;

pub type Result<T, E = JsonBridgeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum JsonBridgeError {
    #[error("wire tag {0:?} has no JSON representation")]
    TypeNotSupported(WireType),

    /// The JSON value does not have the shape a document needs.
    #[error("cannot convert JSON: {0}")]
    Convert(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
