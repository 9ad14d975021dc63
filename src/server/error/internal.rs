use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Password hashing or verification failed for a reason other than a mismatch.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned to client.
    #[error("Password hash operation failed: {0}")]
    PasswordHash(String),

    /// Activity log metadata could not be serialized to or parsed from text.
    #[error("Failed to handle activity log metadata: {source}")]
    Metadata {
        #[source]
        source: serde_json::Error,
    },

    /// A row that was just written could not be read back.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite {
        /// Table name
        entity: &'static str,
        /// Primary key of the row
        id: i32,
    },
}
