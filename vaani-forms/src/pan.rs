//! PAN card correction request (changes or correction in PAN data).

use vaani_form_types::{DocumentPlan, FieldDescriptor, FieldKind, FormSchema};

use crate::validators::{
    validate_date, validate_mobile, validate_name, validate_pan, validate_pin_code,
};

pub const SLUG: &str = "pan";

/// The correction checkboxes. Each stores its own boolean under
/// `corrections.<normalized label>`, so downstream fields can condition
/// on a single tick.
pub const CORRECTION_OPTIONS: [&str; 5] = [
    "Name",
    "Father's Name",
    "Date of Birth",
    "Address",
    "Photograph",
];

pub fn schema() -> FormSchema {
    let plan = DocumentPlan::new("pan-correction-request.pdf").with_letterhead([
        "INCOME TAX DEPARTMENT",
        "Request for New PAN Card or/and Changes or Correction in PAN Data",
    ]);

    FormSchema::new(SLUG, "PAN correction request", fields(), plan)
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "panNumber",
            "Permanent Account Number (PAN)",
            FieldKind::text_validated(validate_pan),
        )
        .with_section("Existing PAN")
        .with_boxes(10)
        .with_example("Five letters, four digits, one letter, e.g. ABCDE1234F"),
        FieldDescriptor::new(
            "applicantName",
            "Full name (as on PAN)",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "fatherName",
            "Father's name",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "dateOfBirth",
            "Date of birth",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Applicant details")
        .with_boxes(10),
        FieldDescriptor::new(
            "corrections",
            "Which details need correction?",
            FieldKind::checkbox_flags(CORRECTION_OPTIONS),
        )
        .with_section("Corrections"),
        FieldDescriptor::new(
            "correctedName",
            "Corrected name",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Corrections")
        .with_condition(|answers| answers.bool_at("corrections.name")),
        FieldDescriptor::new(
            "correctedFatherName",
            "Corrected father's name",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Corrections")
        .with_condition(|answers| answers.bool_at("corrections.fathersname")),
        FieldDescriptor::new(
            "correctedDateOfBirth",
            "Corrected date of birth",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Corrections")
        .with_boxes(10)
        .with_condition(|answers| answers.bool_at("corrections.dateofbirth")),
        FieldDescriptor::new("address.flat", "Flat / door / block number", FieldKind::text())
            .with_section("Address for communication"),
        FieldDescriptor::new("address.street", "Road / street / lane", FieldKind::text())
            .with_section("Address for communication"),
        FieldDescriptor::new("address.cityTown", "Town / city", FieldKind::text())
            .with_section("Address for communication"),
        FieldDescriptor::new("address.state", "State / UT", FieldKind::text())
            .with_section("Address for communication"),
        FieldDescriptor::new(
            "address.pinCode",
            "PIN code",
            FieldKind::text_validated(validate_pin_code),
        )
        .with_section("Address for communication")
        .with_boxes(6),
        FieldDescriptor::new(
            "mobileNumber",
            "Mobile number",
            FieldKind::text_validated(validate_mobile),
        )
        .with_section("Contact")
        .with_boxes(10),
        FieldDescriptor::new("email", "Email", FieldKind::email()).with_section("Contact"),
        FieldDescriptor::new(
            "supportingDocuments",
            "Proof documents for the corrections",
            FieldKind::File,
        )
        .with_section("Documents"),
        FieldDescriptor::new("declaration.place", "Place", FieldKind::text())
            .with_section("Declaration"),
        FieldDescriptor::new(
            "declaration.date",
            "Date",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Declaration")
        .with_boxes(10),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_form_types::{AnswerPath, AnswerRecord};

    #[test]
    fn correction_flags_seed_one_boolean_per_option() {
        let record = AnswerRecord::defaults_for(&schema());
        for leaf in [
            "corrections.name",
            "corrections.fathersname",
            "corrections.dateofbirth",
            "corrections.address",
            "corrections.photograph",
        ] {
            assert!(
                record.get(&AnswerPath::new(leaf)).is_some(),
                "missing {leaf}"
            );
        }
    }

    #[test]
    fn corrected_name_appears_only_when_ticked() {
        let schema = schema();
        let mut record = AnswerRecord::defaults_for(&schema);
        let corrected = schema.field(&AnswerPath::new("correctedName")).unwrap();

        assert!(!corrected.is_visible(&record));
        record.set("corrections.name", true).unwrap();
        assert!(corrected.is_visible(&record));
    }
}
