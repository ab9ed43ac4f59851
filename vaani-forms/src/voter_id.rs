//! Voter ID enrolment (Form 6, inclusion in the electoral roll).

use vaani_form_types::{
    AnswerPath, DerivedAction, DerivedRule, DocumentPlan, FieldDescriptor, FieldKind, FormSchema,
    Trigger,
};

use crate::validators::{
    validate_aadhaar, validate_date, validate_mobile, validate_name, validate_pin_code,
};

pub const SLUG: &str = "voter-id";

pub fn schema() -> FormSchema {
    let plan = DocumentPlan::new("voter-id-application.pdf")
        .with_letterhead([
            "ELECTION COMMISSION OF INDIA",
            "FORM 6",
            "Application for inclusion of name in the electoral roll",
        ])
        .with_declaration(
            "I hereby declare that to the best of my knowledge and belief the particulars \
             given above are true, and that I am a citizen of India ordinarily resident at \
             the address given above.",
        );

    FormSchema::new(SLUG, "Voter ID application", fields(), plan)
        .with_rule(DerivedRule::new(
            "sameAsPresent",
            Trigger::BoolIs(true),
            DerivedAction::CopyGroup {
                from: AnswerPath::new("presentAddress"),
                to: AnswerPath::new("permanentAddress"),
            },
        ))
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "applicantName",
            "Name of applicant",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Applicant details")
        .with_example("As on your Aadhaar card, e.g. Asha Devi"),
        FieldDescriptor::new(
            "relativeName",
            "Name of father / mother / husband",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "dateOfBirth",
            "Date of birth",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Applicant details")
        .with_boxes(10)
        .with_example("DD/MM/YYYY, e.g. 12/08/1990"),
        FieldDescriptor::new(
            "gender",
            "Gender",
            FieldKind::radio(["Female", "Male", "Third Gender"]),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "aadhaarNumber",
            "Aadhaar number",
            FieldKind::text_validated(validate_aadhaar),
        )
        .with_section("Applicant details")
        .with_boxes(12)
        .with_example("12 digits, e.g. 123456789012"),
        FieldDescriptor::new(
            "mobileNumber",
            "Mobile number",
            FieldKind::text_validated(validate_mobile),
        )
        .with_section("Applicant details")
        .with_boxes(10),
        FieldDescriptor::new("email", "Email (optional)", FieldKind::email())
            .with_section("Applicant details"),
        FieldDescriptor::new("presentAddress.houseNo", "House / door number", FieldKind::text())
            .with_section("Present address"),
        FieldDescriptor::new(
            "presentAddress.street",
            "Street / area / locality",
            FieldKind::text(),
        )
        .with_section("Present address"),
        FieldDescriptor::new(
            "presentAddress.villageTown",
            "Village / town",
            FieldKind::text(),
        )
        .with_section("Present address"),
        FieldDescriptor::new("presentAddress.district", "District", FieldKind::text())
            .with_section("Present address"),
        FieldDescriptor::new("presentAddress.state", "State / UT", FieldKind::text())
            .with_section("Present address"),
        FieldDescriptor::new(
            "presentAddress.pinCode",
            "PIN code",
            FieldKind::text_validated(validate_pin_code),
        )
        .with_section("Present address")
        .with_boxes(6),
        FieldDescriptor::new(
            "sameAsPresent",
            "Is your permanent address the same as your present address?",
            FieldKind::yes_no(),
        )
        .with_section("Permanent address"),
        FieldDescriptor::new(
            "permanentAddress.houseNo",
            "House / door number",
            FieldKind::text(),
        )
        .with_section("Permanent address")
        .with_condition(|answers| !answers.bool_at("sameAsPresent")),
        FieldDescriptor::new(
            "permanentAddress.street",
            "Street / area / locality",
            FieldKind::text(),
        )
        .with_section("Permanent address")
        .with_condition(|answers| !answers.bool_at("sameAsPresent")),
        FieldDescriptor::new(
            "permanentAddress.villageTown",
            "Village / town",
            FieldKind::text(),
        )
        .with_section("Permanent address")
        .with_condition(|answers| !answers.bool_at("sameAsPresent")),
        FieldDescriptor::new("permanentAddress.district", "District", FieldKind::text())
            .with_section("Permanent address")
            .with_condition(|answers| !answers.bool_at("sameAsPresent")),
        FieldDescriptor::new("permanentAddress.state", "State / UT", FieldKind::text())
            .with_section("Permanent address")
            .with_condition(|answers| !answers.bool_at("sameAsPresent")),
        FieldDescriptor::new(
            "permanentAddress.pinCode",
            "PIN code",
            FieldKind::text_validated(validate_pin_code),
        )
        .with_section("Permanent address")
        .with_boxes(6)
        .with_condition(|answers| !answers.bool_at("sameAsPresent")),
        FieldDescriptor::new("photo", "Passport-size photograph", FieldKind::File)
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

    #[test]
    fn aadhaar_field_renders_as_twelve_boxes() {
        let schema = schema();
        let field = schema.field(&AnswerPath::new("aadhaarNumber")).unwrap();
        assert_eq!(field.hint().boxes, Some(12));
    }

    #[test]
    fn permanent_address_mirrors_present_address() {
        let schema = schema();
        let present: Vec<_> = schema
            .fields()
            .iter()
            .filter_map(|field| field.key().strip_prefix(&AnswerPath::new("presentAddress")))
            .collect();
        let permanent: Vec<_> = schema
            .fields()
            .iter()
            .filter_map(|field| field.key().strip_prefix(&AnswerPath::new("permanentAddress")))
            .collect();
        assert_eq!(present, permanent);
    }
}
