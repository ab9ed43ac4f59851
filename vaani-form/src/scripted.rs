//! Scripted answer source for driving sessions without user interaction.
//!
//! `ScriptedAnswers` walks a session the way a user would: one visible
//! field at a time, applying the scripted input for each field it has one
//! for, advancing until the preview. Fields without a scripted answer keep
//! their defaults, like a user skipping past an optional field.
//!
//! # Example
//!
//! ```rust,ignore
//! use vaani_form::ScriptedAnswers;
//!
//! let session = ScriptedAnswers::new()
//!     .with_text("applicantName", "Asha Devi")
//!     .with_choice("married", "Yes")
//!     .run(schema)?;
//! assert!(session.in_preview());
//! ```

use std::collections::HashMap;

use vaani_form_types::{AnswerError, AnswerPath, AnswerValue, FileHandle, FormSchema};

use crate::{FormSession, StepOutcome};

/// Error type for scripted runs.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedError {
    #[error("Validation failed for '{path}': {message}")]
    ValidationFailed { path: AnswerPath, message: String },

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

#[derive(Debug, Clone)]
enum ScriptedEntry {
    /// A value written as-is, validation permitting.
    Value(AnswerValue),
    /// A radio option picked by label.
    Choice(String),
    /// Checkbox options toggled in order.
    Toggles(Vec<String>),
    /// Files attached in order.
    Files(Vec<FileHandle>),
}

/// Pre-configured answers, keyed by field path.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: HashMap<String, ScriptedEntry>,
}

impl ScriptedAnswers {
    /// Create an empty script.
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
        }
    }

    /// Script a raw value for a field.
    pub fn with_value(mut self, path: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.answers
            .insert(path.into(), ScriptedEntry::Value(value.into()));
        self
    }

    /// Script a text answer.
    pub fn with_text(self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_value(path, AnswerValue::Text(text.into()))
    }

    /// Script a radio pick, by option label.
    pub fn with_choice(mut self, path: impl Into<String>, option: impl Into<String>) -> Self {
        self.answers
            .insert(path.into(), ScriptedEntry::Choice(option.into()));
        self
    }

    /// Script checkbox toggles, by option label.
    pub fn with_toggles<I, S>(mut self, path: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.insert(
            path.into(),
            ScriptedEntry::Toggles(options.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Script a file attachment. Repeated calls for the same path attach
    /// more files.
    pub fn with_file(
        mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<std::path::PathBuf>,
    ) -> Self {
        let file = FileHandle::new(name, source);
        match self
            .answers
            .entry(path.into())
            .or_insert_with(|| ScriptedEntry::Files(Vec::new()))
        {
            ScriptedEntry::Files(files) => files.push(file),
            other => *other = ScriptedEntry::Files(vec![file]),
        }
        self
    }

    /// Walk a fresh session over the schema, applying scripted answers in
    /// visible-field order, and leave it on the preview screen.
    pub fn run(&self, schema: FormSchema) -> Result<FormSession, ScriptedError> {
        let mut session = FormSession::new(schema);
        loop {
            let Some(key) = session.current_field().map(|field| field.key().clone()) else {
                break;
            };
            if let Some(entry) = self.answers.get(key.as_str()) {
                apply(&mut session, &key, entry)?;
            }
            if session.advance() == StepOutcome::EnteredPreview {
                break;
            }
        }
        Ok(session)
    }
}

fn apply(
    session: &mut FormSession,
    key: &AnswerPath,
    entry: &ScriptedEntry,
) -> Result<(), ScriptedError> {
    match entry {
        ScriptedEntry::Value(value) => {
            if let Some(field) = session.schema().field(key).cloned() {
                field
                    .validate_answer(value, session.answers())
                    .map_err(|message| ScriptedError::ValidationFailed {
                        path: key.clone(),
                        message,
                    })?;
            }
            session.set_value(key.clone(), value.clone())?;
        }
        ScriptedEntry::Choice(option) => session.select_option(key, option)?,
        ScriptedEntry::Toggles(options) => {
            for option in options {
                session.toggle_option(key, option)?;
            }
        }
        ScriptedEntry::Files(files) => {
            for file in files {
                session.push_file(key, file.clone())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_form_types::{DocumentPlan, FieldDescriptor, FieldKind};

    fn schema() -> FormSchema {
        FormSchema::new(
            "scripted-test",
            "Scripted test",
            vec![
                FieldDescriptor::new("fullName", "Full name", FieldKind::text()),
                FieldDescriptor::new("married", "Married?", FieldKind::yes_no()),
                FieldDescriptor::new("spouseName", "Spouse's name", FieldKind::text())
                    .with_condition(|answers| answers.bool_at("married")),
                FieldDescriptor::new(
                    "hobbies",
                    "Hobbies",
                    FieldKind::checkbox(["Reading", "Farming"]),
                ),
                FieldDescriptor::new("annexures", "Annexures", FieldKind::File),
            ],
            DocumentPlan::new("scripted-test.pdf"),
        )
    }

    #[test]
    fn scripted_run_lands_on_preview_with_the_answers() {
        let session = ScriptedAnswers::new()
            .with_text("fullName", "Asha Devi")
            .with_choice("married", "Yes")
            .with_text("spouseName", "Ravi Kumar")
            .with_toggles("hobbies", ["Farming"])
            .with_file("annexures", "id.pdf", "/tmp/id.pdf")
            .run(schema())
            .unwrap();

        assert!(session.in_preview());
        let answers = session.answers();
        assert_eq!(answers.text_at("fullName"), "Asha Devi");
        assert!(answers.bool_at("married"));
        assert_eq!(answers.text_at("spouseName"), "Ravi Kumar");
        assert_eq!(
            answers
                .get_text_list(&AnswerPath::new("hobbies"))
                .unwrap(),
            &["Farming".to_string()]
        );
        assert_eq!(
            answers
                .get_file_list(&AnswerPath::new("annexures"))
                .unwrap()[0]
                .name,
            "id.pdf"
        );
    }

    #[test]
    fn unscripted_fields_keep_their_defaults() {
        let session = ScriptedAnswers::new()
            .with_text("fullName", "Asha Devi")
            .run(schema())
            .unwrap();

        assert!(session.in_preview());
        // married stayed No, so the spouse field never became visible.
        assert_eq!(session.answers().text_at("spouseName"), "");
        assert_eq!(session.visible_fields().len(), 4);
    }

    #[test]
    fn validation_failures_stop_the_run() {
        fn non_empty(
            value: &AnswerValue,
            _answers: &vaani_form_types::AnswerRecord,
        ) -> Result<(), String> {
            if value.as_text().is_some_and(|text| !text.is_empty()) {
                Ok(())
            } else {
                Err("required".to_string())
            }
        }

        let schema = FormSchema::new(
            "validated-test",
            "Validated test",
            vec![FieldDescriptor::new(
                "fullName",
                "Full name",
                FieldKind::text_validated(non_empty),
            )],
            DocumentPlan::new("validated-test.pdf"),
        );

        let result = ScriptedAnswers::new().with_text("fullName", "").run(schema);
        assert!(matches!(
            result,
            Err(ScriptedError::ValidationFailed { .. })
        ));
    }
}
