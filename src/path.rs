use crate::error::{PathError, Result};
use simple_base64::Engine as _;
use simple_base64::engine::general_purpose::URL_SAFE;
use std::borrow::Cow;
use std::fmt::{Display, Formatter, Write as _};
use std::str::FromStr;

/// Largest number of content bytes a single segment can hold.
pub const MAX_SEGMENT_LEN: usize = u8::MAX as usize;

const SEPARATOR: char = '/';

/// Marks a textual path element as URL-safe base64 content, i.e. `/bin/b:PFqBJQ==`
const BINARY_PREFIX: &str = "b:";

/// A path made of length-prefixed segments: `[len][len bytes]...`, with no
/// other framing. Segment content may be arbitrary bytes.
///
/// Owned paths are `Path<'static>`. Paths returned by [Path::pop] borrow the
/// buffer of the path they were split from.
#[derive(Clone, Debug, Default, Ord, PartialOrd, PartialEq, Eq, Hash)]
pub struct Path<'a> {
    buf: Cow<'a, [u8]>,
}

impl<'a> Path<'a> {
    /// Returns a path with no segments.
    pub const fn new() -> Path<'static> {
        Path {
            buf: Cow::Borrowed(&[]),
        }
    }

    /// Builds a path holding exactly one segment with `content` as is.
    pub fn from_segment(content: &[u8]) -> Result<Path<'static>> {
        let mut buf = Vec::with_capacity(content.len() + 1);
        push_segment(&mut buf, content)?;
        Ok(Path::from_vec_unchecked(buf))
    }

    /// Wraps an already encoded buffer without copying it.
    pub fn from_encoded(buf: &'a [u8]) -> Result<Self> {
        validate(buf)?;
        Ok(Self::from_slice_unchecked(buf))
    }

    pub fn from_encoded_vec(buf: Vec<u8>) -> Result<Path<'static>> {
        validate(&buf)?;
        Ok(Path::from_vec_unchecked(buf))
    }

    /// Parses the textual form, i.e. `/home/keks/go` or `home/b:PFqBJQ==`.
    ///
    /// Elements are separated by `/`. An element starting with `b:` holds
    /// URL-safe, padded base64. Elements with no content are skipped, so
    /// `//a` and `a` parse to the same path.
    pub fn parse(s: &str) -> Result<Path<'static>> {
        // base64 never expands and separators are dropped, so the textual
        // length plus one missing leading separator bounds the encoded size
        let mut buf = Vec::with_capacity(s.len() + 1);
        for element in s.split(SEPARATOR) {
            let content: Cow<'_, [u8]> = match element.strip_prefix(BINARY_PREFIX) {
                Some(encoded) => Cow::Owned(URL_SAFE.decode(encoded).map_err(|source| {
                    log::debug!("rejected path element '{element}': {source}");
                    PathError::Base64Decode {
                        element: element.to_string(),
                        source,
                    }
                })?),
                None => Cow::Borrowed(element.as_bytes()),
            };
            if content.is_empty() {
                continue;
            }
            log::trace!("path element '{element}' -> {} byte segment", content.len());
            push_segment(&mut buf, &content)?;
        }
        Ok(Path::from_vec_unchecked(buf))
    }

    /// Same as [Path::parse], but panics on malformed input. Only meant for
    /// literals known to be valid.
    #[track_caller]
    pub fn must_parse(s: &str) -> Path<'static> {
        must(Path::parse(s))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// Length of the encoded buffer in bytes, prefixes included.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_owned(self) -> Path<'static> {
        Path {
            buf: Cow::Owned(self.buf.into_owned()),
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.into_owned()
    }

    /// Splits off the first segment. `head` holds the first segment with its
    /// length prefix, `tail` the remaining segments. Both borrow this path's
    /// buffer, and concatenated they equal it. Popping an empty path yields
    /// two empty paths.
    pub fn pop(&self) -> (Path<'_>, Path<'_>) {
        match split_head(self.as_bytes()) {
            Some((head, tail)) => (
                Path::from_slice_unchecked(head),
                Path::from_slice_unchecked(tail),
            ),
            None => (Path::new(), Path::new()),
        }
    }

    pub fn iter(&self) -> Segments<'_> {
        Segments::new(self.as_bytes())
    }

    /// Returns a new path with the segments of `other` after those of `self`.
    pub fn concat(&self, other: &Path<'_>) -> Path<'static> {
        join([self, other])
    }

    fn from_slice_unchecked(buf: &'a [u8]) -> Self {
        Self {
            buf: Cow::Borrowed(buf),
        }
    }

    fn from_vec_unchecked(buf: Vec<u8>) -> Path<'static> {
        Path {
            buf: Cow::Owned(buf),
        }
    }
}

impl<'a> Display for Path<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for segment in self.iter() {
            if segment.is_empty() {
                continue;
            }
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path<'static> {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl<'s> TryFrom<&'s str> for Path<'static> {
    type Error = PathError;

    fn try_from(value: &'s str) -> Result<Self> {
        Path::parse(value)
    }
}

impl<'a> AsRef<[u8]> for Path<'a> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<'p, 'a> IntoIterator for &'p Path<'a> {
    type Item = PathSegment<'p>;
    type IntoIter = Segments<'p>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Concatenates paths in order. Joining nothing gives an empty path.
pub fn join<'p, 'a: 'p, I>(paths: I) -> Path<'static>
where
    I: IntoIterator<Item = &'p Path<'a>>,
{
    let paths: Vec<&Path<'a>> = paths.into_iter().collect();
    let len = paths.iter().map(|path| path.len()).sum();
    let mut buf = Vec::with_capacity(len);
    for path in paths {
        buf.extend_from_slice(path.as_bytes());
    }
    Path::from_vec_unchecked(buf)
}

/// Unwraps the result of a path constructor, panicking with the error message
/// on failure. Never use it on untrusted input, call the fallible constructor
/// and handle the error instead.
#[track_caller]
pub fn must(result: Result<Path<'_>>) -> Path<'_> {
    match result {
        Ok(path) => path,
        Err(e) => panic!("invalid path: {e}"),
    }
}

/// Iterator over the segments of a [Path], front to back.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a [u8],
}

impl<'a> Segments<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { rest: buf }
    }

    /// The encoded segments not yet yielded.
    pub fn as_path(&self) -> Path<'a> {
        Path::from_slice_unchecked(self.rest)
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = PathSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, tail) = split_head(self.rest)?;
        self.rest = tail;
        Some(PathSegment(&head[1..]))
    }
}

/// Content bytes of a single path segment, without the length prefix.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, PartialEq, Eq, Hash)]
pub struct PathSegment<'a>(&'a [u8]);

impl<'a> PathSegment<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any byte lies below the space character or above 127.
    /// DEL (127) itself counts as text.
    pub fn is_binary(&self) -> bool {
        self.0.iter().any(|&b| b < b' ' || b > 127)
    }

    /// True if the segment can't be written literally in the textual form:
    /// it is binary, contains the separator or looks like a base64 element.
    pub fn needs_escape(&self) -> bool {
        self.is_binary()
            || self.0.contains(&b'/')
            || self.0.starts_with(BINARY_PREFIX.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for PathSegment<'a> {
    fn from(value: &'a [u8]) -> Self {
        PathSegment(value)
    }
}

impl<'a> Display for PathSegment<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.needs_escape() {
            write!(f, "{}{}", BINARY_PREFIX, URL_SAFE.encode(self.0))
        } else {
            // not binary, so every byte is ASCII
            for &b in self.0 {
                f.write_char(char::from(b))?;
            }
            Ok(())
        }
    }
}

fn push_segment(buf: &mut Vec<u8>, content: &[u8]) -> Result<()> {
    let len = u8::try_from(content.len()).map_err(|_| PathError::LengthOverflow {
        len: content.len(),
    })?;
    buf.push(len);
    buf.extend_from_slice(content);
    Ok(())
}

/// Splits `buf` after its first segment. A length prefix running past the end
/// of the buffer takes whatever remains.
fn split_head(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let len = *buf.first()? as usize;
    Some(buf.split_at((len + 1).min(buf.len())))
}

fn validate(buf: &[u8]) -> Result<()> {
    let mut offset = 0;
    while offset < buf.len() {
        let expected = buf[offset] as usize;
        let available = buf.len() - offset - 1;
        if expected > available {
            return Err(PathError::Truncated {
                offset,
                expected,
                available,
            });
        }
        offset += expected + 1;
    }
    Ok(())
}
