//! Reading answers back out the way the user entered them.
//!
//! The record stores what the schema declares (booleans for yes/no radios,
//! option booleans for bool-group checkboxes); preview and export want the
//! labels instead. These are the inverse reads of the coercions in
//! `rules`.

use vaani_form_types::{
    AnswerRecord, CheckboxStore, FieldDescriptor, FieldKind, RadioStore, normalize_option,
};

/// Render a field's stored answer for display: text as-is, booleans as
/// their option labels, option groups as joined selected labels, files as
/// joined names.
pub fn display_value(field: &FieldDescriptor, answers: &AnswerRecord) -> String {
    match field.kind() {
        FieldKind::Text { .. } | FieldKind::Textarea { .. } | FieldKind::Email { .. } => {
            answers.text_at(field.key()).to_string()
        }
        FieldKind::Radio { options, store } => match store {
            RadioStore::Label => answers.text_at(field.key()).to_string(),
            RadioStore::YesNoBool => {
                let selected = answers.bool_at(field.key());
                let index = if selected { 0 } else { 1 };
                options
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| if selected { "Yes" } else { "No" }.to_string())
            }
        },
        FieldKind::Checkbox { .. } => selected_options(field, answers).join(", "),
        FieldKind::File => {
            let names: Vec<&str> = answers
                .get_file_list(field.key())
                .unwrap_or_default()
                .iter()
                .map(|file| file.name.as_str())
                .collect();
            names.join(", ")
        }
    }
}

/// The selected option labels of a checkbox field, in schema order for
/// bool groups and selection order for membership lists.
pub fn selected_options(field: &FieldDescriptor, answers: &AnswerRecord) -> Vec<String> {
    match field.kind() {
        FieldKind::Checkbox {
            options,
            store: CheckboxStore::BoolGroup,
        } => options
            .iter()
            .filter(|option| answers.bool_at(field.key().child(&normalize_option(option))))
            .cloned()
            .collect(),
        FieldKind::Checkbox {
            store: CheckboxStore::Membership,
            ..
        } => answers
            .get_text_list(field.key())
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Whether an option of a radio or checkbox field is currently selected.
pub fn option_selected(field: &FieldDescriptor, answers: &AnswerRecord, option: &str) -> bool {
    match field.kind() {
        FieldKind::Radio { options, store } => match store {
            RadioStore::Label => answers.text_at(field.key()) == option,
            RadioStore::YesNoBool => match options.iter().position(|o| o == option) {
                Some(0) => answers.bool_at(field.key()),
                Some(1) => !answers.bool_at(field.key()),
                _ => false,
            },
        },
        FieldKind::Checkbox {
            store: CheckboxStore::BoolGroup,
            ..
        } => answers.bool_at(field.key().child(&normalize_option(option))),
        FieldKind::Checkbox {
            store: CheckboxStore::Membership,
            ..
        } => answers
            .get_text_list(field.key())
            .is_ok_and(|items| items.iter().any(|item| item == option)),
        _ => false,
    }
}
