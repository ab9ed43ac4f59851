//! The form-specific business rules of writes: how option picks map to
//! stored values, and the derived updates some answers fan out into.
//!
//! Everything here is driven by what the schema declares. There is no
//! key-name sniffing: a radio group stores a boolean only when its
//! descriptor says so, and a write has side effects only when a rule
//! names its path.

use vaani_form_types::{
    AnswerPath, AnswerRecord, AnswerValue, CheckboxStore, DerivedAction, FieldDescriptor,
    FieldKind, FormSchema, RadioStore, Trigger, normalize_option,
};

/// Map a picked radio option to the value the field stores: the label
/// itself, or for yes/no-boolean fields, `true` for the first option.
pub(crate) fn coerce_choice(field: &FieldDescriptor, option: &str) -> AnswerValue {
    match field.kind() {
        FieldKind::Radio {
            options,
            store: RadioStore::YesNoBool,
        } => AnswerValue::Bool(options.first().is_some_and(|affirmative| option == affirmative)),
        _ => AnswerValue::Text(option.to_string()),
    }
}

/// The boolean leaf a checkbox option toggles, for bool-group fields.
pub(crate) fn bool_group_leaf(field: &FieldDescriptor, option: &str) -> Option<AnswerPath> {
    match field.kind() {
        FieldKind::Checkbox {
            store: CheckboxStore::BoolGroup,
            ..
        } => Some(field.key().child(&normalize_option(option))),
        _ => None,
    }
}

/// Run every rule the written path and value trigger, in declaration
/// order. Called after the write itself has landed.
pub(crate) fn apply_rules(
    schema: &FormSchema,
    answers: &mut AnswerRecord,
    path: &AnswerPath,
    value: &AnswerValue,
) {
    for rule in schema.rules() {
        if rule.trigger() != path || !trigger_matches(rule.when(), value) {
            continue;
        }
        match rule.action() {
            DerivedAction::CopyGroup { from, to } => answers.copy_group(from, to),
            DerivedAction::SetValues(values) => {
                for (target, value) in values {
                    let written = answers.set(target, value.clone());
                    debug_assert!(written.is_ok(), "rule write to '{target}' failed");
                }
            }
            DerivedAction::ResetRecord => answers.reset_to_defaults(schema),
        }
    }
}

fn trigger_matches(when: &Trigger, value: &AnswerValue) -> bool {
    match (when, value) {
        (Trigger::BoolIs(expected), AnswerValue::Bool(actual)) => expected == actual,
        (Trigger::TextIs(expected), AnswerValue::Text(actual)) => expected == actual,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_form_types::FieldKind;

    #[test]
    fn yes_no_coercion_follows_option_order() {
        let field = FieldDescriptor::new("married", "Married?", FieldKind::yes_no());
        assert_eq!(coerce_choice(&field, "Yes"), AnswerValue::Bool(true));
        assert_eq!(coerce_choice(&field, "No"), AnswerValue::Bool(false));
    }

    #[test]
    fn label_radios_store_the_option_text() {
        let field = FieldDescriptor::new(
            "accountType",
            "Account type",
            FieldKind::radio(["Savings", "Current"]),
        );
        assert_eq!(
            coerce_choice(&field, "Savings"),
            AnswerValue::from("Savings")
        );
    }

    #[test]
    fn bool_group_options_map_to_normalized_leaves() {
        let field = FieldDescriptor::new(
            "corrections",
            "Corrections needed",
            FieldKind::checkbox_flags(["Name", "Father's Name"]),
        );
        assert_eq!(
            bool_group_leaf(&field, "Father's Name"),
            Some(AnswerPath::new("corrections.fathersname"))
        );

        let membership = FieldDescriptor::new(
            "hobbies",
            "Hobbies",
            FieldKind::checkbox(["Reading", "Music"]),
        );
        assert_eq!(bool_group_leaf(&membership, "Reading"), None);
    }

    #[test]
    fn triggers_require_matching_shape() {
        assert!(trigger_matches(&Trigger::BoolIs(true), &AnswerValue::Bool(true)));
        assert!(!trigger_matches(&Trigger::BoolIs(true), &AnswerValue::Bool(false)));
        assert!(!trigger_matches(
            &Trigger::BoolIs(true),
            &AnswerValue::from("Yes")
        ));
        assert!(trigger_matches(
            &Trigger::text_is("No"),
            &AnswerValue::from("No")
        ));
    }
}
