use crate::{AnswerPath, AnswerRecord, AnswerValue};

/// A visibility predicate over the answers collected so far.
///
/// Conditions are pure and declared in the schema next to the field they
/// gate. They must only read answers that are settled before the field is
/// reached; a condition reading downstream answers is a schema-author bug.
pub type Condition = fn(&AnswerRecord) -> bool;

/// A field validator: checks a candidate answer against the record,
/// returning a message suitable for showing next to the field.
pub type Validator = fn(&AnswerValue, &AnswerRecord) -> Result<(), String>;

/// A single field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Where this field's answer lives in the record.
    key: AnswerPath,

    /// The label shown to the user, matching the printed form.
    label: String,

    /// The kind of field (determines input widget and answer shape).
    kind: FieldKind,

    /// Section heading this field belongs to on the printed form.
    section: Option<String>,

    /// Visibility predicate; `None` means always visible.
    condition: Option<Condition>,

    /// Wizard-only field that has no row on the printed form.
    ephemeral: bool,

    /// Presentation hints for preview and export.
    hint: FieldHint,
}

impl FieldDescriptor {
    /// Create a new field.
    pub fn new(key: impl Into<AnswerPath>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            section: None,
            condition: None,
            ephemeral: false,
            hint: FieldHint::default(),
        }
    }

    /// Set the section heading.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Gate this field on a condition over earlier answers.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Mark this field as wizard chrome: it steers the filling session
    /// (example data, copy toggles) and is skipped by document layout.
    pub fn with_ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Render the answer as one bordered square per character.
    pub fn with_boxes(mut self, boxes: usize) -> Self {
        self.hint.boxes = Some(boxes);
        self
    }

    /// Attach example text the renderer can reveal on demand.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.hint.example = Some(example.into());
        self
    }

    /// Get the answer path for this field.
    pub fn key(&self) -> &AnswerPath {
        &self.key
    }

    /// Get the label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Get the section heading, if any.
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Whether this field is wizard chrome with no printed-form row.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Get the presentation hints.
    pub fn hint(&self) -> &FieldHint {
        &self.hint
    }

    /// Evaluate this field's visibility against the current answers.
    pub fn is_visible(&self, answers: &AnswerRecord) -> bool {
        self.condition.is_none_or(|condition| condition(answers))
    }

    /// Check a candidate answer for this field. Email fields get the
    /// format check before any declared validator runs.
    pub fn validate_answer(
        &self,
        value: &AnswerValue,
        answers: &AnswerRecord,
    ) -> Result<(), String> {
        if let FieldKind::Email { .. } = self.kind {
            let text = value.as_text().unwrap_or_default();
            if !text.is_empty() && !is_valid_email(text) {
                return Err(format!("'{text}' is not a valid email address"));
            }
        }
        if let Some(validate) = self.kind.validator() {
            validate(value, answers)?;
        }
        Ok(())
    }
}

/// The kind of field, determining the input widget and the shape of the
/// stored answer. Radio and checkbox fields declare their storage mode
/// explicitly instead of it being inferred from the key name.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text input.
    Text { validate: Option<Validator> },

    /// Multi-line text input.
    Textarea { validate: Option<Validator> },

    /// Single-line text input with email format validation.
    Email { validate: Option<Validator> },

    /// Exactly one option.
    Radio {
        options: Vec<String>,
        store: RadioStore,
    },

    /// Any number of options.
    Checkbox {
        options: Vec<String>,
        store: CheckboxStore,
    },

    /// File attachments.
    File,
}

impl FieldKind {
    /// Single-line text input.
    pub fn text() -> Self {
        Self::Text { validate: None }
    }

    /// Single-line text input with a validator.
    pub fn text_validated(validate: Validator) -> Self {
        Self::Text {
            validate: Some(validate),
        }
    }

    /// Multi-line text input.
    pub fn textarea() -> Self {
        Self::Textarea { validate: None }
    }

    /// Email input.
    pub fn email() -> Self {
        Self::Email { validate: None }
    }

    /// Radio group storing the selected label as text.
    pub fn radio<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Radio {
            options: options.into_iter().map(Into::into).collect(),
            store: RadioStore::Label,
        }
    }

    /// Yes/No radio group storing a boolean.
    pub fn yes_no() -> Self {
        Self::Radio {
            options: vec!["Yes".to_string(), "No".to_string()],
            store: RadioStore::YesNoBool,
        }
    }

    /// Checkbox group storing selected labels as a list.
    pub fn checkbox<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Checkbox {
            options: options.into_iter().map(Into::into).collect(),
            store: CheckboxStore::Membership,
        }
    }

    /// Checkbox group storing one boolean per option, keyed by the
    /// normalized option label under the field's path.
    pub fn checkbox_flags<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Checkbox {
            options: options.into_iter().map(Into::into).collect(),
            store: CheckboxStore::BoolGroup,
        }
    }

    /// The declared validator, if any.
    pub fn validator(&self) -> Option<Validator> {
        match self {
            Self::Text { validate } | Self::Textarea { validate } | Self::Email { validate } => {
                *validate
            }
            Self::Radio { .. } | Self::Checkbox { .. } | Self::File => None,
        }
    }

    /// The option labels for radio and checkbox groups.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Radio { options, .. } | Self::Checkbox { options, .. } => options,
            _ => &[],
        }
    }

    /// Whether this kind takes typed text (and so can take dictated text).
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Text { .. } | Self::Textarea { .. } | Self::Email { .. }
        )
    }
}

/// How a radio group's answer is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioStore {
    /// The selected option label, as text.
    Label,
    /// A boolean: the first option means `true`, the second `false`.
    YesNoBool,
}

/// How a checkbox group's answer is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxStore {
    /// One text list of the selected labels, under the field's key.
    Membership,
    /// One boolean per option, under `key.<normalized option>`.
    BoolGroup,
}

/// Presentation hints carried by a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldHint {
    /// Character-box count: render the answer as this many bordered
    /// squares, one glyph each.
    pub boxes: Option<usize>,

    /// Example text shown when the user asks for it.
    pub example: Option<String>,
}

/// Normalize an option label into a path segment: lower-cased, with
/// everything but ASCII alphanumerics stripped. "Name Correction" becomes
/// `namecorrection`.
pub fn normalize_option(option: &str) -> String {
    option
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_defaults_to_true() {
        let field = FieldDescriptor::new("fullName", "Full name", FieldKind::text());
        assert!(field.is_visible(&AnswerRecord::new()));
    }

    #[test]
    fn condition_gates_visibility() {
        let field = FieldDescriptor::new("bplCardNumber", "BPL card number", FieldKind::text())
            .with_condition(|answers| answers.bool_at("belowPovertyLine"));

        let mut answers = AnswerRecord::new();
        answers.insert("belowPovertyLine", false);
        assert!(!field.is_visible(&answers));

        answers.insert("belowPovertyLine", true);
        assert!(field.is_visible(&answers));
    }

    #[test]
    fn normalize_option_strips_punctuation() {
        assert_eq!(normalize_option("Name Correction"), "namecorrection");
        assert_eq!(normalize_option("Father's Name"), "fathersname");
        assert_eq!(normalize_option("Address"), "address");
    }

    #[test]
    fn email_format_check() {
        let field = FieldDescriptor::new("email", "Email", FieldKind::email());
        let answers = AnswerRecord::new();

        assert!(field
            .validate_answer(&AnswerValue::from("asha@example.org"), &answers)
            .is_ok());
        assert!(field
            .validate_answer(&AnswerValue::from("not-an-email"), &answers)
            .is_err());
        assert!(field
            .validate_answer(&AnswerValue::from("two@at@signs.org"), &answers)
            .is_err());
        // Empty is allowed; required-ness is a validator concern.
        assert!(field
            .validate_answer(&AnswerValue::from(""), &answers)
            .is_ok());
    }

    #[test]
    fn declared_validator_runs() {
        fn six_digits(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
            let text = value.as_text().unwrap_or_default();
            if text.len() == 6 && text.chars().all(|c| c.is_ascii_digit()) {
                Ok(())
            } else {
                Err("PIN code must be 6 digits".to_string())
            }
        }

        let field = FieldDescriptor::new(
            "presentAddress.pinCode",
            "PIN code",
            FieldKind::text_validated(six_digits),
        );
        let answers = AnswerRecord::new();
        assert!(field
            .validate_answer(&AnswerValue::from("411001"), &answers)
            .is_ok());
        assert!(field
            .validate_answer(&AnswerValue::from("41100"), &answers)
            .is_err());
    }
}
