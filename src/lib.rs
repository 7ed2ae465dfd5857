//! Paths whose segments may hold arbitrary bytes.
//!
//! A [Path] is stored as a sequence of length-prefixed segments,
//! `[len][len bytes][len][len bytes]...`, without any separators or header.
//! Its textual form separates segments with `/`; segments that are not plain
//! printable text are written as `b:` followed by URL-safe base64.
//!
//! ```
//! use binpath::{Path, join};
//!
//! let bin = Path::parse("bin").unwrap();
//! let hash = Path::from_segment(&[60, 90, 129, 37]).unwrap();
//! let path = join([&bin, &hash]);
//! assert_eq!(path.to_string(), "/bin/b:PFqBJQ==");
//! assert_eq!(Path::parse("/bin/b:PFqBJQ==").unwrap(), path);
//! ```

mod error;
mod path;
#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod proptests;

pub use error::{PathError, Result};
pub use path::{MAX_SEGMENT_LEN, Path, PathSegment, Segments, join, must};
