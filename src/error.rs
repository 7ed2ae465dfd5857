pub type Result<T, E = PathError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A `b:` element of a textual path did not hold valid URL-safe base64.
    #[error("invalid base64 in path element '{element}': {source}")]
    Base64Decode {
        element: String,
        #[source]
        source: simple_base64::DecodeError,
    },
    /// Segment content does not fit into the one-byte length prefix.
    #[error("path segment of {len} bytes exceeds the 255 byte limit")]
    LengthOverflow { len: usize },
    #[error("path segment at offset {offset} declares {expected} bytes, but only {available} remain")]
    Truncated {
        offset: usize,
        expected: usize,
        available: usize,
    },
}
