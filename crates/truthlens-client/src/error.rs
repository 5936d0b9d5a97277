use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status.
    #[error("{0}")]
    Server(String),

    #[error("Proxy unreachable: {0}")]
    Transport(String),

    #[error("Unexpected proxy response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
