use std::collections::HashMap;

use crate::{
    AnswerPath, AnswerValue, CheckboxStore, FieldKind, FileHandle, FormSchema, RadioStore,
    normalize_option,
};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for path: {0}")]
    Missing(AnswerPath),

    #[error("Type mismatch at path '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: AnswerPath,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Index {index} out of range at path '{path}' (length {len})")]
    IndexOutOfRange {
        path: AnswerPath,
        index: usize,
        len: usize,
    },
}

/// Collected answers for one form session.
///
/// A flat map keyed by `AnswerPath` - a nested field like
/// `presentAddress.pinCode` is stored under that full path, and a file
/// element like `annexures.0` addresses one slot of a list-valued answer.
/// Records are created fully defaulted from a schema, so every write lands
/// on a key that already exists with a known shape; `set` enforces that
/// shape instead of guessing from key names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerRecord {
    values: HashMap<AnswerPath, AnswerValue>,
}

impl AnswerRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Create a record with every key of the schema present at its default:
    /// empty text, `false`, or an empty list depending on the field kind.
    ///
    /// Bool-group checkboxes contribute one boolean leaf per option, keyed
    /// `field.option` with the option label normalized.
    pub fn defaults_for(schema: &FormSchema) -> Self {
        let mut record = Self::new();
        for field in schema.fields() {
            match field.kind() {
                FieldKind::Text { .. } | FieldKind::Textarea { .. } | FieldKind::Email { .. } => {
                    record.insert(field.key(), AnswerValue::Text(String::new()));
                }
                FieldKind::Radio { store, .. } => match store {
                    RadioStore::Label => {
                        record.insert(field.key(), AnswerValue::Text(String::new()));
                    }
                    RadioStore::YesNoBool => {
                        record.insert(field.key(), AnswerValue::Bool(false));
                    }
                },
                FieldKind::Checkbox { store, options } => match store {
                    CheckboxStore::Membership => {
                        record.insert(field.key(), AnswerValue::TextList(Vec::new()));
                    }
                    CheckboxStore::BoolGroup => {
                        for option in options {
                            record.insert(
                                field.key().child(&normalize_option(option)),
                                AnswerValue::Bool(false),
                            );
                        }
                    }
                },
                FieldKind::File => {
                    record.insert(field.key(), AnswerValue::FileList(Vec::new()));
                }
            }
        }
        record
    }

    /// Restore every key of the schema to its default value.
    pub fn reset_to_defaults(&mut self, schema: &FormSchema) {
        *self = Self::defaults_for(schema);
    }

    /// Insert an answer at the given path, without shape checks.
    ///
    /// Used when seeding defaults and in tests; session writes go through
    /// [`AnswerRecord::set`].
    pub fn insert(&mut self, path: impl Into<AnswerPath>, value: impl Into<AnswerValue>) {
        self.values.insert(path.into(), value.into());
    }

    /// Write an answer, keeping the shape the key already has.
    ///
    /// A path with a trailing index (`annexures.0`) writes one element of a
    /// text list: replacing below the length, appending exactly at it. File
    /// elements go through [`AnswerRecord::set_file`].
    pub fn set(
        &mut self,
        path: impl Into<AnswerPath>,
        value: impl Into<AnswerValue>,
    ) -> Result<(), AnswerError> {
        let path = path.into();
        let value = value.into();
        if let Some((head, index)) = path.split_index() {
            return self.set_text_element(&head, index, value);
        }
        let Some(slot) = self.values.get_mut(&path) else {
            return Err(AnswerError::Missing(path));
        };
        if !slot.same_shape(&value) {
            return Err(AnswerError::TypeMismatch {
                path,
                expected: slot.type_name(),
                actual: value.type_name(),
            });
        }
        *slot = value;
        Ok(())
    }

    fn set_text_element(
        &mut self,
        head: &AnswerPath,
        index: usize,
        value: AnswerValue,
    ) -> Result<(), AnswerError> {
        let Some(slot) = self.values.get_mut(head) else {
            return Err(AnswerError::Missing(head.clone()));
        };
        let AnswerValue::TextList(items) = slot else {
            return Err(AnswerError::TypeMismatch {
                path: head.clone(),
                expected: "text list",
                actual: slot.type_name(),
            });
        };
        let AnswerValue::Text(text) = value else {
            return Err(AnswerError::TypeMismatch {
                path: head.clone(),
                expected: "text",
                actual: value.type_name(),
            });
        };
        if index < items.len() {
            items[index] = text;
            Ok(())
        } else if index == items.len() {
            items.push(text);
            Ok(())
        } else {
            Err(AnswerError::IndexOutOfRange {
                path: head.clone(),
                index,
                len: items.len(),
            })
        }
    }

    /// Write one element of a file list. The path carries the index
    /// (`annexures.0`); appending is allowed exactly at the current length.
    pub fn set_file(
        &mut self,
        path: impl Into<AnswerPath>,
        file: FileHandle,
    ) -> Result<(), AnswerError> {
        let path = path.into();
        let Some((head, index)) = path.split_index() else {
            return Err(AnswerError::Missing(path));
        };
        let files = self.file_list_mut(&head)?;
        if index < files.len() {
            files[index] = file;
            Ok(())
        } else if index == files.len() {
            files.push(file);
            Ok(())
        } else {
            Err(AnswerError::IndexOutOfRange {
                path: head,
                index,
                len: files.len(),
            })
        }
    }

    /// Append a file to the list at the given path.
    pub fn push_file(
        &mut self,
        path: impl Into<AnswerPath>,
        file: FileHandle,
    ) -> Result<(), AnswerError> {
        self.file_list_mut(&path.into())?.push(file);
        Ok(())
    }

    /// Remove and return the file at the given index.
    pub fn remove_file(
        &mut self,
        path: impl Into<AnswerPath>,
        index: usize,
    ) -> Result<FileHandle, AnswerError> {
        let path = path.into();
        let files = self.file_list_mut(&path)?;
        if index < files.len() {
            Ok(files.remove(index))
        } else {
            Err(AnswerError::IndexOutOfRange {
                path,
                index,
                len: files.len(),
            })
        }
    }

    fn file_list_mut(&mut self, path: &AnswerPath) -> Result<&mut Vec<FileHandle>, AnswerError> {
        let Some(slot) = self.values.get_mut(path) else {
            return Err(AnswerError::Missing(path.clone()));
        };
        let AnswerValue::FileList(files) = slot else {
            return Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "file list",
                actual: slot.type_name(),
            });
        };
        Ok(files)
    }

    /// Flip one option in a membership list: remove it when present, append
    /// it when absent. Returns whether the option is selected afterwards.
    pub fn toggle_membership(
        &mut self,
        path: &AnswerPath,
        option: &str,
    ) -> Result<bool, AnswerError> {
        let Some(slot) = self.values.get_mut(path) else {
            return Err(AnswerError::Missing(path.clone()));
        };
        let AnswerValue::TextList(items) = slot else {
            return Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "text list",
                actual: slot.type_name(),
            });
        };
        if let Some(position) = items.iter().position(|item| item == option) {
            items.remove(position);
            Ok(false)
        } else {
            items.push(option.to_string());
            Ok(true)
        }
    }

    /// Copy every entry at or under `from` to the corresponding path under
    /// `to`. A snapshot: later edits to the source do not propagate.
    pub fn copy_group(&mut self, from: &AnswerPath, to: &AnswerPath) {
        let mut copies = Vec::new();
        for (path, value) in &self.values {
            if path == from {
                copies.push((to.clone(), value.clone()));
            } else if let Some(suffix) = path.strip_prefix(from) {
                copies.push((to.child(suffix), value.clone()));
            }
        }
        for (path, value) in copies {
            self.values.insert(path, value);
        }
    }

    /// Get an answer at the given path.
    pub fn get(&self, path: &AnswerPath) -> Option<&AnswerValue> {
        self.values.get(path)
    }

    /// Check if an answer exists at the given path.
    pub fn contains(&self, path: &AnswerPath) -> bool {
        self.values.contains_key(path)
    }

    /// Get an iterator over all path-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&AnswerPath, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Convenience accessors ===

    /// Get a text answer at the given path.
    pub fn get_text(&self, path: &AnswerPath) -> Result<&str, AnswerError> {
        match self.get(path) {
            Some(AnswerValue::Text(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "text",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(path.clone())),
        }
    }

    /// Get a boolean answer at the given path.
    pub fn get_bool(&self, path: &AnswerPath) -> Result<bool, AnswerError> {
        match self.get(path) {
            Some(AnswerValue::Bool(b)) => Ok(*b),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "bool",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(path.clone())),
        }
    }

    /// Get a text list answer at the given path.
    pub fn get_text_list(&self, path: &AnswerPath) -> Result<&[String], AnswerError> {
        match self.get(path) {
            Some(AnswerValue::TextList(items)) => Ok(items),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "text list",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(path.clone())),
        }
    }

    /// Get a file list answer at the given path.
    pub fn get_file_list(&self, path: &AnswerPath) -> Result<&[FileHandle], AnswerError> {
        match self.get(path) {
            Some(AnswerValue::FileList(files)) => Ok(files),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "file list",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(path.clone())),
        }
    }

    /// The boolean at `path`, or `false` when missing or non-boolean.
    ///
    /// Visibility conditions read upstream answers through this, so a stale
    /// path in a schema shows up as "never visible" rather than a panic
    /// mid-session.
    pub fn bool_at(&self, path: impl Into<AnswerPath>) -> bool {
        matches!(self.values.get(&path.into()), Some(AnswerValue::Bool(true)))
    }

    /// The text at `path`, or `""` when missing or non-text.
    pub fn text_at(&self, path: impl Into<AnswerPath>) -> &str {
        match self.values.get(&path.into()) {
            Some(AnswerValue::Text(s)) => s,
            _ => "",
        }
    }

    /// Check if the answer at the given path has moved off its default:
    /// non-empty text, `true`, or a non-empty list.
    pub fn has_value(&self, path: &AnswerPath) -> bool {
        self.get(path).is_some_and(|value| !value.is_empty())
    }
}
