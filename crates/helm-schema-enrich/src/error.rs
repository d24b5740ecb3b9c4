#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode default {text:?} of documented value {key:?}")]
    DefaultDecode {
        key: String,
        text: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
