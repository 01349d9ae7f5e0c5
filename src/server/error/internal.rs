use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A row written moments ago could not be read back.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("{entity} {id} was not found after being written")]
    MissingAfterWrite {
        /// Entity name, e.g. "course"
        entity: &'static str,
        /// Primary key that was written
        id: i32,
    },

    /// Failure to build an absolute URL from the configured application URL.
    #[error("Failed to build URL from '{value}': {source}")]
    InvalidUrl {
        /// The string that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}
