use std::fmt;
use std::path::PathBuf;

/// The value of a single answer.
///
/// Every answer a field can produce is one of these four shapes. Radio
/// groups store either a `Text` label or a `Bool`, checkbox groups store
/// either a `TextList` of selected options or one `Bool` per option,
/// depending on the storage mode declared on the field.
#[derive(Clone, Debug, PartialEq)]
pub enum AnswerValue {
    /// Free text, including the empty string for untouched fields.
    Text(String),
    /// A yes/no answer.
    Bool(bool),
    /// Selected option labels, in selection order.
    TextList(Vec<String>),
    /// Attached files, in attachment order.
    FileList(Vec<FileHandle>),
}

/// A file attached to a form, by display name and local path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub path: PathBuf,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl AnswerValue {
    /// Get the value as a string slice, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a list of strings, if it is one.
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items),
            _ => None,
        }
    }

    /// Get the value as a list of files, if it is one.
    pub fn as_file_list(&self) -> Option<&[FileHandle]> {
        match self {
            Self::FileList(files) => Some(files),
            _ => None,
        }
    }

    /// Whether this value is the default for its shape: empty text,
    /// `false`, or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bool(b) => !b,
            Self::TextList(items) => items.is_empty(),
            Self::FileList(files) => files.is_empty(),
        }
    }

    /// Get the name of this value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::TextList(_) => "text list",
            Self::FileList(_) => "file list",
        }
    }

    /// Whether two values have the same shape.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::TextList(items) => write!(f, "{}", items.join(", ")),
            Self::FileList(files) => {
                let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::TextList(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        Self::TextList(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<FileHandle>> for AnswerValue {
    fn from(files: Vec<FileHandle>) -> Self {
        Self::FileList(files)
    }
}
