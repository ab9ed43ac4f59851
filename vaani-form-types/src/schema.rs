use crate::{AnswerPath, AnswerValue, FieldDescriptor};

/// The schema of one form type: an ordered field list plus the rule table
/// and document plan that go with it.
///
/// Presentation-agnostic, like the forms it mirrors. A schema can drive the
/// step-by-step wizard, the preview facsimile, or the PDF export without
/// knowing which.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    /// Stable identifier used on the command line (`voter-id`, `rti`).
    slug: String,

    /// Human-readable form title.
    title: String,

    /// All fields in presentation order.
    fields: Vec<FieldDescriptor>,

    /// Derived updates applied after certain answers change.
    rules: Vec<DerivedRule>,

    /// How the filled form is laid out and exported.
    plan: DocumentPlan,
}

impl FormSchema {
    /// Create a new schema.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        plan: DocumentPlan,
    ) -> Self {
        let schema = Self {
            slug: slug.into(),
            title: title.into(),
            fields,
            rules: Vec::new(),
            plan,
        };
        debug_assert!(
            schema.duplicate_key().is_none(),
            "duplicate field key in schema '{}': {:?}",
            schema.slug,
            schema.duplicate_key(),
        );
        schema
    }

    /// Attach a derived-update rule.
    pub fn with_rule(mut self, rule: DerivedRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Get the slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Get the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the fields, in presentation order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get the derived-update rules.
    pub fn rules(&self) -> &[DerivedRule] {
        &self.rules
    }

    /// Get the document plan.
    pub fn plan(&self) -> &DocumentPlan {
        &self.plan
    }

    /// Find a field by its answer path.
    pub fn field(&self, key: &AnswerPath) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key() == key)
    }

    fn duplicate_key(&self) -> Option<&AnswerPath> {
        self.fields.iter().enumerate().find_map(|(i, field)| {
            self.fields[..i]
                .iter()
                .any(|earlier| earlier.key() == field.key())
                .then(|| field.key())
        })
    }
}

/// How one filled form becomes a printable document: the heading block, the
/// closing declaration, and the output file.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    /// Centered heading lines drawn at the top of the first page.
    letterhead: Vec<String>,

    /// Declaration paragraph drawn after the fields; empty for none.
    declaration: String,

    /// Output file name, deterministic per form type.
    file_name: String,

    /// Vertical position (mm from the top content edge) past which a new
    /// page is started before drawing the next block.
    break_after_mm: f32,
}

impl DocumentPlan {
    /// Default page-break threshold in millimeters.
    pub const DEFAULT_BREAK_AFTER_MM: f32 = 210.0;

    /// Create a plan writing to the given file name.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            letterhead: Vec::new(),
            declaration: String::new(),
            file_name: file_name.into(),
            break_after_mm: Self::DEFAULT_BREAK_AFTER_MM,
        }
    }

    /// Set the letterhead lines.
    pub fn with_letterhead<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.letterhead = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the declaration paragraph.
    pub fn with_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration = declaration.into();
        self
    }

    /// Override the page-break threshold.
    pub fn with_break_after(mut self, millimeters: f32) -> Self {
        self.break_after_mm = millimeters;
        self
    }

    /// Get the letterhead lines.
    pub fn letterhead(&self) -> &[String] {
        &self.letterhead
    }

    /// Get the declaration paragraph.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// Get the output file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the page-break threshold in millimeters.
    pub fn break_after_mm(&self) -> f32 {
        self.break_after_mm
    }
}

/// A derived update: when the answer at `trigger` matches `when`, `action`
/// runs against the record.
///
/// Rules fire on writes to the trigger path only; they are the schema's
/// declarative replacement for side effects buried in input handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRule {
    trigger: AnswerPath,
    when: Trigger,
    action: DerivedAction,
}

impl DerivedRule {
    /// Create a new rule.
    pub fn new(trigger: impl Into<AnswerPath>, when: Trigger, action: DerivedAction) -> Self {
        Self {
            trigger: trigger.into(),
            when,
            action,
        }
    }

    /// The path whose writes this rule watches.
    pub fn trigger(&self) -> &AnswerPath {
        &self.trigger
    }

    /// The condition on the written value.
    pub fn when(&self) -> &Trigger {
        &self.when
    }

    /// The action to run when the condition matches.
    pub fn action(&self) -> &DerivedAction {
        &self.action
    }
}

/// The condition a written value must match for a rule to fire.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// The written boolean equals this.
    BoolIs(bool),
    /// The written text equals this.
    TextIs(String),
}

impl Trigger {
    /// Text-equality trigger.
    pub fn text_is(text: impl Into<String>) -> Self {
        Self::TextIs(text.into())
    }
}

/// What a derived rule does to the record.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedAction {
    /// Snapshot every answer at or under `from` into the mirror path under
    /// `to`.
    CopyGroup { from: AnswerPath, to: AnswerPath },

    /// Write the given values, shape-checked against the record.
    SetValues(Vec<(AnswerPath, AnswerValue)>),

    /// Restore the whole record to schema defaults.
    ResetRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnswerRecord, FieldKind};

    fn address_schema() -> FormSchema {
        FormSchema::new(
            "address-test",
            "Address test",
            vec![
                FieldDescriptor::new("fullName", "Full name", FieldKind::text()),
                FieldDescriptor::new("sameAsPresent", "Same as present?", FieldKind::yes_no()),
                FieldDescriptor::new(
                    "corrections",
                    "Corrections needed",
                    FieldKind::checkbox_flags(["Name", "Father's Name"]),
                ),
                FieldDescriptor::new("annexures", "Annexures", FieldKind::File),
            ],
            DocumentPlan::new("address-test.pdf"),
        )
    }

    #[test]
    fn defaults_cover_every_kind() {
        let schema = address_schema();
        let record = AnswerRecord::defaults_for(&schema);

        assert_eq!(record.text_at("fullName"), "");
        assert!(!record.bool_at("sameAsPresent"));
        assert!(record.get(&AnswerPath::new("corrections.name")).is_some());
        assert!(record
            .get(&AnswerPath::new("corrections.fathersname"))
            .is_some());
        assert!(record
            .get_file_list(&AnswerPath::new("annexures"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn field_lookup_by_key() {
        let schema = address_schema();
        let key = AnswerPath::new("sameAsPresent");
        assert_eq!(schema.field(&key).unwrap().label(), "Same as present?");
        assert!(schema.field(&AnswerPath::new("missing")).is_none());
    }

    #[test]
    fn plan_defaults() {
        let plan = DocumentPlan::new("voter-id-application.pdf");
        assert_eq!(plan.break_after_mm(), DocumentPlan::DEFAULT_BREAK_AFTER_MM);
        assert_eq!(plan.file_name(), "voter-id-application.pdf");
    }

    #[test]
    fn rules_attach_in_order() {
        let schema = address_schema()
            .with_rule(DerivedRule::new(
                "sameAsPresent",
                Trigger::BoolIs(true),
                DerivedAction::CopyGroup {
                    from: AnswerPath::new("presentAddress"),
                    to: AnswerPath::new("permanentAddress"),
                },
            ))
            .with_rule(DerivedRule::new(
                "sameAsPresent",
                Trigger::BoolIs(false),
                DerivedAction::ResetRecord,
            ));
        assert_eq!(schema.rules().len(), 2);
        assert_eq!(schema.rules()[0].trigger(), &AnswerPath::new("sameAsPresent"));
    }
}
