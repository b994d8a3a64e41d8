//! S2 NetBox client errors

use thiserror::Error;

/// Errors that can occur when interacting with the S2 NetBox API
#[derive(Debug, Error)]
pub enum S2NetboxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor returned a non-success status code
    #[error("NetBox API fault ({code}): {raw}")]
    Fault {
        /// Status code reported by the vendor (or the HTTP status for
        /// transport-level rejections)
        code: String,
        /// Raw payload kept for diagnosis
        raw: String,
    },

    /// Login did not yield a usable session token
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// A non-empty field failed to parse into its expected semantic type
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Request envelope serialization error
    #[error("XML serialization error: {0}")]
    XmlSer(#[from] quick_xml::SeError),

    /// Response envelope parse error
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),
}
