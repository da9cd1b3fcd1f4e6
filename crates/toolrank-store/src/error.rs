use thiserror::Error;

/// Errors returned by the remote datastore client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request and returned an error body.
    #[error("store API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
