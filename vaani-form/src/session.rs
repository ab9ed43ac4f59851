use vaani_form_types::{
    AnswerError, AnswerPath, AnswerRecord, AnswerValue, FieldDescriptor, FileHandle, FormSchema,
};

use crate::{display, rules};

/// Where the user is in a form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// At the visible field with this index.
    Stepping(usize),
    /// On the read-only preview of the whole record.
    Preview,
    /// Editing one field, reached from the preview.
    Editing(AnswerPath),
}

/// What an [`FormSession::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to the next visible field.
    Moved,
    /// Left the last field (or was already there) and entered preview.
    EnteredPreview,
    /// An edit is in progress; the renderer must confirm the return to
    /// preview and then call [`FormSession::finish_edit`].
    ConfirmReturn,
}

/// One form-filling session: the schema being filled, the answers so far,
/// and the cursor.
///
/// Every mutation goes through this type. Writes are shape-checked by the
/// record and may fan out into the schema's derived rules (copying an
/// address group, filling or resetting example data). Navigation follows
/// the step machine: stepping through visible fields, a preview at the
/// end, and single-field edits reached from the preview.
///
/// Out-of-range cursor positions are schema bugs (a condition reading a
/// downstream answer, a stale edit key); they trip debug assertions rather
/// than being clamped, so they surface during testing.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    answers: AnswerRecord,
    cursor: Cursor,
}

impl FormSession {
    /// Start a session at the first field, with every answer at its
    /// schema default.
    pub fn new(schema: FormSchema) -> Self {
        let answers = AnswerRecord::defaults_for(&schema);
        Self {
            schema,
            answers,
            cursor: Cursor::Stepping(0),
        }
    }

    /// Get the schema being filled.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Get the answers collected so far.
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    /// Consume the session, keeping the answers.
    pub fn into_answers(self) -> AnswerRecord {
        self.answers
    }

    /// Get the cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Whether the session is on the preview screen.
    pub fn in_preview(&self) -> bool {
        self.cursor == Cursor::Preview
    }

    /// The key being edited, when an edit is in progress.
    pub fn editing_key(&self) -> Option<&AnswerPath> {
        match &self.cursor {
            Cursor::Editing(key) => Some(key),
            _ => None,
        }
    }

    /// The ordered subsequence of schema fields whose condition holds
    /// against the current answers. Recomputed on every call; calling it
    /// twice without a write in between yields the same list.
    pub fn visible_fields(&self) -> Vec<&FieldDescriptor> {
        self.schema
            .fields()
            .iter()
            .filter(|field| field.is_visible(&self.answers))
            .collect()
    }

    /// The field under the cursor; `None` on the preview screen.
    pub fn current_field(&self) -> Option<&FieldDescriptor> {
        match &self.cursor {
            Cursor::Stepping(index) => self.visible_fields().get(*index).copied(),
            Cursor::Editing(key) => self.schema.field(key),
            Cursor::Preview => None,
        }
    }

    /// The cursor's position in the visible list, as `(index, total)`.
    /// `None` on the preview screen.
    pub fn step_position(&self) -> Option<(usize, usize)> {
        let visible = self.visible_fields();
        match &self.cursor {
            Cursor::Stepping(index) => Some((*index, visible.len())),
            Cursor::Editing(key) => visible
                .iter()
                .position(|field| field.key() == key)
                .map(|index| (index, visible.len())),
            Cursor::Preview => None,
        }
    }

    /// Whether the cursor stands on the last visible field, where the
    /// renderer's Next affordance reads "Preview".
    pub fn is_last_step(&self) -> bool {
        match &self.cursor {
            Cursor::Stepping(index) => index + 1 == self.visible_fields().len(),
            _ => false,
        }
    }

    /// Read the raw answer at a path.
    pub fn value(&self, path: &AnswerPath) -> Option<&AnswerValue> {
        self.answers.get(path)
    }

    /// Read a field's answer rendered the way the user entered it:
    /// booleans come back as their option labels ("Yes"/"No"), option
    /// groups as their joined selected labels, files as their names.
    pub fn display_value(&self, field: &FieldDescriptor) -> String {
        display::display_value(field, &self.answers)
    }

    /// Write an answer and apply any derived rules it triggers.
    pub fn set_value(
        &mut self,
        path: impl Into<AnswerPath>,
        value: impl Into<AnswerValue>,
    ) -> Result<(), AnswerError> {
        self.write(path.into(), value.into())
    }

    /// Select a radio option, storing it per the field's declared mode:
    /// the label itself, or the boolean it maps to.
    pub fn select_option(&mut self, key: &AnswerPath, option: &str) -> Result<(), AnswerError> {
        let Some(field) = self.schema.field(key) else {
            debug_assert!(false, "select_option: no field at '{key}'");
            return Err(AnswerError::Missing(key.clone()));
        };
        let value = rules::coerce_choice(field, option);
        self.write(key.clone(), value)
    }

    /// Toggle a checkbox option, storing it per the field's declared
    /// mode: list membership, or the option's own boolean leaf. Returns
    /// whether the option is selected afterwards.
    pub fn toggle_option(&mut self, key: &AnswerPath, option: &str) -> Result<bool, AnswerError> {
        let Some(field) = self.schema.field(key) else {
            debug_assert!(false, "toggle_option: no field at '{key}'");
            return Err(AnswerError::Missing(key.clone()));
        };
        if let Some(leaf) = rules::bool_group_leaf(field, option) {
            let selected = !self.answers.bool_at(&leaf);
            self.write(leaf, AnswerValue::Bool(selected))?;
            Ok(selected)
        } else {
            self.answers.toggle_membership(key, option)
        }
    }

    /// Attach a file to a file field.
    pub fn push_file(&mut self, key: &AnswerPath, file: FileHandle) -> Result<(), AnswerError> {
        self.answers.push_file(key, file)
    }

    /// Remove the file at the given index from a file field.
    pub fn remove_file(
        &mut self,
        key: &AnswerPath,
        index: usize,
    ) -> Result<FileHandle, AnswerError> {
        self.answers.remove_file(key, index)
    }

    fn write(&mut self, path: AnswerPath, value: AnswerValue) -> Result<(), AnswerError> {
        self.answers.set(path.clone(), value.clone())?;
        rules::apply_rules(&self.schema, &mut self.answers, &path, &value);
        Ok(())
    }

    /// Move forward: to the next visible field, or into preview from the
    /// last one. An in-progress edit is never left silently; the caller
    /// gets [`StepOutcome::ConfirmReturn`] and decides whether to call
    /// [`FormSession::finish_edit`].
    pub fn advance(&mut self) -> StepOutcome {
        match &self.cursor {
            Cursor::Editing(_) => StepOutcome::ConfirmReturn,
            Cursor::Preview => StepOutcome::EnteredPreview,
            Cursor::Stepping(index) => {
                let total = self.visible_fields().len();
                debug_assert!(
                    *index < total,
                    "step index {index} out of range ({total} visible fields)"
                );
                if index + 1 < total {
                    self.cursor = Cursor::Stepping(index + 1);
                    StepOutcome::Moved
                } else {
                    self.cursor = Cursor::Preview;
                    StepOutcome::EnteredPreview
                }
            }
        }
    }

    /// Move backward: out of preview onto the last visible field, or to
    /// the previous field. At the first field this is a no-op.
    pub fn retreat(&mut self) {
        match &self.cursor {
            Cursor::Preview => {
                let total = self.visible_fields().len();
                debug_assert!(total > 0, "preview over a schema with no visible fields");
                self.cursor = Cursor::Stepping(total.saturating_sub(1));
            }
            Cursor::Stepping(index) if *index > 0 => {
                self.cursor = Cursor::Stepping(index - 1);
            }
            Cursor::Stepping(_) | Cursor::Editing(_) => {}
        }
    }

    /// Jump from the preview into editing one field. A key outside the
    /// current visible list is a schema bug: asserted in debug builds,
    /// ignored in release.
    pub fn jump_to_edit(&mut self, key: &AnswerPath) {
        let known = self
            .visible_fields()
            .iter()
            .any(|field| field.key() == key);
        debug_assert!(known, "jump_to_edit: '{key}' is not a visible field");
        if known {
            self.cursor = Cursor::Editing(key.clone());
        }
    }

    /// Close a confirmed edit and return to the preview.
    pub fn finish_edit(&mut self) {
        debug_assert!(
            matches!(self.cursor, Cursor::Editing(_)),
            "finish_edit outside of an edit"
        );
        if matches!(self.cursor, Cursor::Editing(_)) {
            self.cursor = Cursor::Preview;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_form_types::{DerivedAction, DerivedRule, DocumentPlan, FieldKind, Trigger};

    /// Name, married yes/no, spouse name only when married, hobby list.
    fn three_step_schema() -> FormSchema {
        FormSchema::new(
            "marriage-test",
            "Marriage test",
            vec![
                FieldDescriptor::new("fullName", "Full name", FieldKind::text()),
                FieldDescriptor::new("married", "Married?", FieldKind::yes_no()),
                FieldDescriptor::new("spouseName", "Spouse's name", FieldKind::text())
                    .with_condition(|answers| answers.bool_at("married")),
                FieldDescriptor::new(
                    "hobbies",
                    "Hobbies",
                    FieldKind::checkbox(["Reading", "Farming", "Music"]),
                ),
            ],
            DocumentPlan::new("marriage-test.pdf"),
        )
    }

    fn address_schema() -> FormSchema {
        FormSchema::new(
            "address-copy-test",
            "Address copy test",
            vec![
                FieldDescriptor::new("presentAddress.houseNo", "House no.", FieldKind::text()),
                FieldDescriptor::new("presentAddress.pinCode", "PIN code", FieldKind::text()),
                FieldDescriptor::new(
                    "sameAsPresent",
                    "Permanent address same as present?",
                    FieldKind::yes_no(),
                ),
                FieldDescriptor::new("permanentAddress.houseNo", "House no.", FieldKind::text())
                    .with_condition(|answers| !answers.bool_at("sameAsPresent")),
                FieldDescriptor::new("permanentAddress.pinCode", "PIN code", FieldKind::text())
                    .with_condition(|answers| !answers.bool_at("sameAsPresent")),
            ],
            DocumentPlan::new("address-copy-test.pdf"),
        )
        .with_rule(DerivedRule::new(
            "sameAsPresent",
            Trigger::BoolIs(true),
            DerivedAction::CopyGroup {
                from: AnswerPath::new("presentAddress"),
                to: AnswerPath::new("permanentAddress"),
            },
        ))
    }

    #[test]
    fn hidden_fields_drop_out_of_the_visible_list() {
        let mut session = FormSession::new(three_step_schema());
        assert_eq!(session.visible_fields().len(), 3);

        session
            .select_option(&AnswerPath::new("married"), "Yes")
            .unwrap();
        let visible: Vec<_> = session
            .visible_fields()
            .iter()
            .map(|field| field.key().as_str().to_string())
            .collect();
        assert_eq!(visible, ["fullName", "married", "spouseName", "hobbies"]);

        // Idempotent: recomputing without a write changes nothing.
        assert_eq!(
            session.visible_fields().len(),
            session.visible_fields().len()
        );
    }

    #[test]
    fn visible_list_is_a_schema_subsequence() {
        let mut session = FormSession::new(three_step_schema());
        session
            .select_option(&AnswerPath::new("married"), "Yes")
            .unwrap();

        let schema_order: Vec<_> = session
            .schema()
            .fields()
            .iter()
            .map(|field| field.key().clone())
            .collect();
        let mut last_position = 0;
        for field in session.visible_fields() {
            let position = schema_order
                .iter()
                .position(|key| key == field.key())
                .unwrap();
            assert!(position >= last_position);
            last_position = position;
        }
    }

    #[test]
    fn advance_walks_into_preview_and_stays() {
        let mut session = FormSession::new(three_step_schema());
        assert_eq!(session.advance(), StepOutcome::Moved);
        assert_eq!(session.advance(), StepOutcome::Moved);
        assert!(session.is_last_step());
        assert_eq!(session.advance(), StepOutcome::EnteredPreview);
        assert!(session.in_preview());

        // Advancing in preview reports the state without moving anywhere.
        assert_eq!(session.advance(), StepOutcome::EnteredPreview);
        assert!(session.in_preview());
    }

    #[test]
    fn retreat_from_preview_lands_on_the_last_field() {
        let mut session = FormSession::new(three_step_schema());
        while session.advance() == StepOutcome::Moved {}
        assert!(session.in_preview());

        session.retreat();
        assert_eq!(session.cursor(), &Cursor::Stepping(2));
        assert_eq!(
            session.current_field().unwrap().key(),
            &AnswerPath::new("hobbies")
        );
    }

    #[test]
    fn retreat_at_the_first_field_is_a_no_op() {
        let mut session = FormSession::new(three_step_schema());
        session.retreat();
        assert_eq!(session.cursor(), &Cursor::Stepping(0));
    }

    #[test]
    fn edit_must_be_confirmed_before_returning_to_preview() {
        let mut session = FormSession::new(three_step_schema());
        while session.advance() == StepOutcome::Moved {}

        let key = AnswerPath::new("fullName");
        session.jump_to_edit(&key);
        assert_eq!(session.editing_key(), Some(&key));
        assert_eq!(session.step_position(), Some((0, 3)));

        // Advance does not leave the edit on its own.
        assert_eq!(session.advance(), StepOutcome::ConfirmReturn);
        assert_eq!(session.editing_key(), Some(&key));

        session.finish_edit();
        assert!(session.in_preview());
        assert_eq!(session.editing_key(), None);
    }

    #[test]
    fn same_as_present_copies_a_snapshot() {
        let mut session = FormSession::new(address_schema());
        session.set_value("presentAddress.houseNo", "12-B").unwrap();
        session.set_value("presentAddress.pinCode", "411001").unwrap();
        session
            .select_option(&AnswerPath::new("sameAsPresent"), "Yes")
            .unwrap();

        let copied = AnswerPath::new("permanentAddress.pinCode");
        assert_eq!(session.answers().get_text(&copied).unwrap(), "411001");

        // Editing the source afterwards does not update the copy.
        session.set_value("presentAddress.pinCode", "411002").unwrap();
        assert_eq!(session.answers().get_text(&copied).unwrap(), "411001");
    }

    #[test]
    fn yes_no_answers_display_as_their_labels() {
        let mut session = FormSession::new(three_step_schema());
        let married = AnswerPath::new("married");
        let field = session.schema().field(&married).unwrap().clone();

        assert_eq!(session.display_value(&field), "No");
        session.select_option(&married, "Yes").unwrap();
        assert!(session.answers().bool_at("married"));
        assert_eq!(session.display_value(&field), "Yes");
    }

    #[test]
    fn checkbox_toggles_round_trip() {
        let mut session = FormSession::new(three_step_schema());
        let hobbies = AnswerPath::new("hobbies");
        assert!(session.toggle_option(&hobbies, "Music").unwrap());
        assert!(session.toggle_option(&hobbies, "Reading").unwrap());
        assert!(!session.toggle_option(&hobbies, "Music").unwrap());

        assert_eq!(
            session.answers().get_text_list(&hobbies).unwrap(),
            &["Reading".to_string()]
        );
    }

    #[test]
    fn example_data_rules_fill_and_reset() {
        let schema = FormSchema::new(
            "example-data-test",
            "Example data test",
            vec![
                FieldDescriptor::new("useExample", "Fill with example data?", FieldKind::yes_no()),
                FieldDescriptor::new("accountHolder", "Account holder", FieldKind::text()),
            ],
            DocumentPlan::new("example-data-test.pdf"),
        )
        .with_rule(DerivedRule::new(
            "useExample",
            Trigger::BoolIs(true),
            DerivedAction::SetValues(vec![(
                AnswerPath::new("accountHolder"),
                AnswerValue::from("Asha Devi"),
            )]),
        ))
        .with_rule(DerivedRule::new(
            "useExample",
            Trigger::BoolIs(false),
            DerivedAction::ResetRecord,
        ));

        let mut session = FormSession::new(schema);
        let toggle = AnswerPath::new("useExample");

        session.select_option(&toggle, "Yes").unwrap();
        assert_eq!(session.answers().text_at("accountHolder"), "Asha Devi");

        session.select_option(&toggle, "No").unwrap();
        assert_eq!(session.answers().text_at("accountHolder"), "");
    }
}
