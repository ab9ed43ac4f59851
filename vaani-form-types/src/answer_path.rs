use std::fmt;

/// A dotted path to an answer, e.g. `"presentAddress.pinCode"`.
///
/// Used as keys in `AnswerRecord` to identify specific answers, including
/// fields nested one level into a sub-record and positional writes into
/// list-valued fields (`"annexures.0"`).
///
/// Paths are authored in the form schema; an invalid path (empty segment,
/// leading/trailing dot) is a schema bug and trips a debug assertion rather
/// than being repaired at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnswerPath {
    /// Dot-separated path string, e.g. "presentAddress.pinCode".
    path: String,
}

/// One segment of an [`AnswerPath`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A named key into a record or sub-record.
    Name(&'a str),
    /// A position into a list-valued answer.
    Index(usize),
}

impl AnswerPath {
    /// Create a new path from a dot-separated string.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        debug_assert!(
            Self::is_well_formed(&path),
            "malformed answer path: {path:?}"
        );
        Self { path }
    }

    fn is_well_formed(path: &str) -> bool {
        !path.is_empty() && path.split('.').all(|s| !s.is_empty() && !s.contains(char::is_whitespace))
    }

    /// Append a child segment to this path, returning a new path.
    pub fn child(&self, name: &str) -> Self {
        Self::new(format!("{}.{name}", self.path))
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Iterate over the segments of this path.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.path.split('.').map(|s| match s.parse::<usize>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Name(s),
        })
    }

    /// Get the last segment, if it is a name.
    pub fn last_name(&self) -> Option<&str> {
        match self.path.rsplit('.').next() {
            Some(s) if s.parse::<usize>().is_err() => Some(s),
            _ => None,
        }
    }

    /// Split a trailing positional segment off this path.
    ///
    /// `"annexures.0"` yields `("annexures", 0)`; paths without a trailing
    /// index yield `None`.
    pub fn split_index(&self) -> Option<(AnswerPath, usize)> {
        let (head, tail) = self.path.rsplit_once('.')?;
        let index = tail.parse::<usize>().ok()?;
        Some((Self::new(head), index))
    }

    /// Get the parent path by removing the last segment.
    ///
    /// Returns `None` for single-segment paths.
    pub fn parent(&self) -> Option<Self> {
        self.path.rsplit_once('.').map(|(head, _)| Self::new(head))
    }

    /// Returns the remainder of this path with the given prefix path removed.
    ///
    /// `"presentAddress.pinCode".strip_prefix("presentAddress")` is
    /// `Some("pinCode")`; an exact match or non-prefix yields `None`.
    pub fn strip_prefix(&self, prefix: &AnswerPath) -> Option<&str> {
        let rest = self.path.strip_prefix(prefix.as_str())?;
        rest.strip_prefix('.')
    }

    /// Whether this path lies strictly under the given prefix.
    pub fn is_under(&self, prefix: &AnswerPath) -> bool {
        self.strip_prefix(prefix).is_some()
    }
}

impl fmt::Display for AnswerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl From<&str> for AnswerPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AnswerPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&AnswerPath> for AnswerPath {
    fn from(p: &AnswerPath) -> Self {
        p.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child() {
        let path = AnswerPath::new("presentAddress").child("pinCode");
        assert_eq!(path.as_str(), "presentAddress.pinCode");
    }

    #[test]
    fn segments() {
        let path = AnswerPath::new("annexures.0");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec![Segment::Name("annexures"), Segment::Index(0)]);
    }

    #[test]
    fn split_index() {
        let (head, index) = AnswerPath::new("annexures.2").split_index().unwrap();
        assert_eq!(head.as_str(), "annexures");
        assert_eq!(index, 2);

        assert!(AnswerPath::new("presentAddress.pinCode").split_index().is_none());
    }

    #[test]
    fn parent() {
        assert_eq!(
            AnswerPath::new("presentAddress.pinCode").parent(),
            Some(AnswerPath::new("presentAddress"))
        );
        assert_eq!(AnswerPath::new("aadhaarNumber").parent(), None);
    }

    #[test]
    fn strip_prefix() {
        let path = AnswerPath::new("presentAddress.pinCode");
        let prefix = AnswerPath::new("presentAddress");
        assert_eq!(path.strip_prefix(&prefix), Some("pinCode"));

        let exact = AnswerPath::new("presentAddress");
        assert_eq!(exact.strip_prefix(&prefix), None);

        let other = AnswerPath::new("permanentAddress.pinCode");
        assert_eq!(other.strip_prefix(&prefix), None);
    }

    #[test]
    fn display() {
        let path = AnswerPath::new("declaration.place");
        assert_eq!(format!("{path}"), "declaration.place");
    }

    #[test]
    #[should_panic(expected = "malformed answer path")]
    fn rejects_empty_segment() {
        let _ = AnswerPath::new("presentAddress..pinCode");
    }
}
