//! Error types for rs-opengraph.
//!
//! Only host-level inconsistencies surface as errors. Page content never
//! fails extraction; malformed trees and titles degrade to partial output.

/// Error type for tag assembly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Hosted docs build without a canonical base URL to derive `og:url` from.
    #[error("ReadTheDocs did not provide a valid canonical URL")]
    MissingCanonicalUrl,

    /// A configured base URL could not be parsed.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Options could not be deserialized.
    #[error("invalid options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for tag assembly.
pub type Result<T> = std::result::Result<T, Error>;
