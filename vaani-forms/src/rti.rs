//! Application under the Right to Information Act, 2005.

use vaani_form_types::{DocumentPlan, FieldDescriptor, FieldKind, FormSchema};

use crate::validators::{validate_date, validate_mobile, validate_name, validate_pin_code};

pub const SLUG: &str = "rti";

pub fn schema() -> FormSchema {
    let plan = DocumentPlan::new("rti-application.pdf")
        .with_letterhead([
            "APPLICATION UNDER THE RIGHT TO INFORMATION ACT, 2005",
            "To: The Public Information Officer",
        ])
        .with_declaration(
            "I state that the information sought does not fall within the restrictions \
             contained in Section 8 and 9 of the RTI Act and to the best of my knowledge \
             it pertains to your office.",
        );

    FormSchema::new(SLUG, "RTI application", fields(), plan)
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "publicAuthority",
            "Name of the public authority",
            FieldKind::text(),
        )
        .with_section("Public authority")
        .with_example("e.g. Office of the District Collector, Pune"),
        FieldDescriptor::new(
            "authorityAddress",
            "Address of the public authority",
            FieldKind::textarea(),
        )
        .with_section("Public authority"),
        FieldDescriptor::new(
            "applicantName",
            "Name of applicant",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "applicantAddress.street",
            "Street / area / locality",
            FieldKind::text(),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new(
            "applicantAddress.district",
            "District",
            FieldKind::text(),
        )
        .with_section("Applicant details"),
        FieldDescriptor::new("applicantAddress.state", "State / UT", FieldKind::text())
            .with_section("Applicant details"),
        FieldDescriptor::new(
            "applicantAddress.pinCode",
            "PIN code",
            FieldKind::text_validated(validate_pin_code),
        )
        .with_section("Applicant details")
        .with_boxes(6),
        FieldDescriptor::new(
            "mobileNumber",
            "Mobile number",
            FieldKind::text_validated(validate_mobile),
        )
        .with_section("Applicant details")
        .with_boxes(10),
        FieldDescriptor::new("subject", "Subject of information", FieldKind::text())
            .with_section("Information sought")
            .with_example("e.g. Status of road repair works sanctioned in 2025"),
        FieldDescriptor::new(
            "informationSought",
            "Particulars of the information required",
            FieldKind::textarea(),
        )
        .with_section("Information sought")
        .with_example(
            "Describe the records you want: copies of sanction orders, expenditure \
             statements, inspection reports, and the period they cover.",
        ),
        FieldDescriptor::new(
            "periodOfInformation",
            "Period to which the information relates",
            FieldKind::text(),
        )
        .with_section("Information sought")
        .with_example("e.g. April 2024 to March 2025"),
        FieldDescriptor::new(
            "belowPovertyLine",
            "Do you belong to a Below Poverty Line family?",
            FieldKind::yes_no(),
        )
        .with_section("Fee"),
        FieldDescriptor::new(
            "bplCardNumber",
            "BPL card number",
            FieldKind::text(),
        )
        .with_section("Fee")
        .with_condition(|answers| answers.bool_at("belowPovertyLine")),
        FieldDescriptor::new(
            "feeMode",
            "Mode of fee payment",
            FieldKind::radio([
                "Cash",
                "Demand Draft",
                "Indian Postal Order",
                "Court Fee Stamp",
            ]),
        )
        .with_section("Fee")
        .with_condition(|answers| !answers.bool_at("belowPovertyLine")),
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
