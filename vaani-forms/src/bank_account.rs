//! Savings / current account opening form for resident individuals.

use vaani_form_types::{
    AnswerPath, AnswerValue, DerivedAction, DerivedRule, DocumentPlan, FieldDescriptor, FieldKind,
    FormSchema, Trigger,
};

use crate::validators::{
    validate_aadhaar, validate_amount, validate_date, validate_mobile, validate_name, validate_pan,
    validate_pin_code,
};

pub const SLUG: &str = "bank-account";

pub fn schema() -> FormSchema {
    let plan = DocumentPlan::new("bank-account-opening.pdf")
        .with_letterhead(["ACCOUNT OPENING FORM", "(For Resident Individuals)"])
        .with_declaration(
            "I declare that the information given above is true and complete, and I agree \
             to abide by the rules of the bank governing the conduct of the account.",
        );

    FormSchema::new(SLUG, "Bank account opening", fields(), plan)
        .with_rule(DerivedRule::new(
            "useExample",
            Trigger::BoolIs(true),
            DerivedAction::SetValues(example_values()),
        ))
        .with_rule(DerivedRule::new(
            "useExample",
            Trigger::BoolIs(false),
            DerivedAction::ResetRecord,
        ))
}

/// The example answers the leading toggle fills in, so a first-time user
/// can see the expected format in place. Picking "No" wipes them again.
fn example_values() -> Vec<(AnswerPath, AnswerValue)> {
    vec![
        (
            AnswerPath::new("applicantName"),
            AnswerValue::from("Asha Devi"),
        ),
        (
            AnswerPath::new("fatherName"),
            AnswerValue::from("Ramesh Kumar"),
        ),
        (
            AnswerPath::new("dateOfBirth"),
            AnswerValue::from("12/08/1990"),
        ),
        (
            AnswerPath::new("mobileNumber"),
            AnswerValue::from("9876543210"),
        ),
        (
            AnswerPath::new("aadhaarNumber"),
            AnswerValue::from("123456789012"),
        ),
        (
            AnswerPath::new("address.street"),
            AnswerValue::from("12-B, Shastri Nagar"),
        ),
        (
            AnswerPath::new("address.district"),
            AnswerValue::from("Pune"),
        ),
        (
            AnswerPath::new("address.pinCode"),
            AnswerValue::from("411001"),
        ),
        (
            AnswerPath::new("initialDeposit"),
            AnswerValue::from("1000"),
        ),
    ]
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "useExample",
            "Fill the form with example data first, to see the expected format?",
            FieldKind::yes_no(),
        )
        .with_section("Getting started")
        .with_ephemeral(),
        FieldDescriptor::new(
            "accountType",
            "Type of account",
            FieldKind::radio(["Savings", "Current", "Fixed Deposit"]),
        )
        .with_section("Account"),
        FieldDescriptor::new(
            "initialDeposit",
            "Initial deposit (rupees)",
            FieldKind::text_validated(validate_amount),
        )
        .with_section("Account"),
        FieldDescriptor::new(
            "applicantName",
            "Full name",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "fatherName",
            "Father's / spouse's name",
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
            "mobileNumber",
            "Mobile number",
            FieldKind::text_validated(validate_mobile),
        )
        .with_section("Applicant details")
        .with_boxes(10),
        FieldDescriptor::new(
            "aadhaarNumber",
            "Aadhaar number",
            FieldKind::text_validated(validate_aadhaar),
        )
        .with_section("KYC")
        .with_boxes(12),
        FieldDescriptor::new(
            "panNumber",
            "PAN (if held)",
            FieldKind::text_validated(validate_pan),
        )
        .with_section("KYC")
        .with_boxes(10),
        FieldDescriptor::new("address.street", "Street / area / locality", FieldKind::text())
            .with_section("Address"),
        FieldDescriptor::new("address.district", "District", FieldKind::text())
            .with_section("Address"),
        FieldDescriptor::new("address.state", "State / UT", FieldKind::text())
            .with_section("Address"),
        FieldDescriptor::new(
            "address.pinCode",
            "PIN code",
            FieldKind::text_validated(validate_pin_code),
        )
        .with_section("Address")
        .with_boxes(6),
        FieldDescriptor::new(
            "wantsNominee",
            "Do you want to register a nominee?",
            FieldKind::yes_no(),
        )
        .with_section("Nomination"),
        FieldDescriptor::new(
            "nominee.name",
            "Nominee's name",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Nomination")
        .with_condition(|answers| answers.bool_at("wantsNominee")),
        FieldDescriptor::new("nominee.relation", "Relationship with applicant", FieldKind::text())
            .with_section("Nomination")
            .with_condition(|answers| answers.bool_at("wantsNominee")),
        FieldDescriptor::new(
            "nominee.dateOfBirth",
            "Nominee's date of birth",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Nomination")
        .with_boxes(10)
        .with_condition(|answers| answers.bool_at("wantsNominee")),
        FieldDescriptor::new("kycDocuments", "KYC documents", FieldKind::File)
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
