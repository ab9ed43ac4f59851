//! Consumer complaint before the District Consumer Disputes Redressal
//! Commission.

use vaani_form_types::{DocumentPlan, FieldDescriptor, FieldKind, FormSchema};

use crate::validators::{
    validate_amount, validate_date, validate_mobile, validate_name, validate_pin_code,
};

pub const SLUG: &str = "consumer";

pub fn schema() -> FormSchema {
    // The complaint narrative runs long; break pages a little earlier than
    // the box-heavy forms so a section never straddles the border.
    let plan = DocumentPlan::new("consumer-complaint.pdf")
        .with_letterhead([
            "BEFORE THE DISTRICT CONSUMER DISPUTES REDRESSAL COMMISSION",
            "Complaint under Section 35 of the Consumer Protection Act, 2019",
        ])
        .with_declaration(
            "I declare that the complaint is filed within the limitation period, that the \
             matter is not pending before any other forum, and that the facts stated above \
             are true to my knowledge.",
        )
        .with_break_after(200.0);

    FormSchema::new(SLUG, "Consumer complaint", fields(), plan)
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "complainantName",
            "Name of complainant",
            FieldKind::text_validated(validate_name),
        )
        .with_section("Complainant"),
        FieldDescriptor::new(
            "complainantAddress.street",
            "Street / area / locality",
            FieldKind::text(),
        )
        .with_section("Complainant"),
        FieldDescriptor::new(
            "complainantAddress.district",
            "District",
            FieldKind::text(),
        )
        .with_section("Complainant"),
        FieldDescriptor::new(
            "complainantAddress.pinCode",
            "PIN code",
            FieldKind::text_validated(validate_pin_code),
        )
        .with_section("Complainant")
        .with_boxes(6),
        FieldDescriptor::new(
            "mobileNumber",
            "Mobile number",
            FieldKind::text_validated(validate_mobile),
        )
        .with_section("Complainant")
        .with_boxes(10),
        FieldDescriptor::new(
            "oppositeParty",
            "Name of the opposite party (seller / service provider)",
            FieldKind::text(),
        )
        .with_section("Opposite party")
        .with_example("e.g. M/s Sharma Electronics, FC Road"),
        FieldDescriptor::new(
            "oppositePartyAddress",
            "Address of the opposite party",
            FieldKind::textarea(),
        )
        .with_section("Opposite party"),
        FieldDescriptor::new(
            "purchaseDate",
            "Date of purchase / service",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Transaction")
        .with_boxes(10),
        FieldDescriptor::new(
            "purchaseAmount",
            "Amount paid (rupees)",
            FieldKind::text_validated(validate_amount),
        )
        .with_section("Transaction"),
        FieldDescriptor::new(
            "complaintDetails",
            "Facts of the complaint",
            FieldKind::textarea(),
        )
        .with_section("Complaint")
        .with_example(
            "What you bought or hired, what went wrong, when you approached the opposite \
             party, and what they said.",
        ),
        FieldDescriptor::new(
            "reliefSought",
            "Relief sought",
            FieldKind::checkbox(["Refund", "Replacement", "Repair", "Compensation"]),
        )
        .with_section("Relief"),
        FieldDescriptor::new(
            "litigationCost",
            "Do you also claim the cost of litigation?",
            FieldKind::yes_no(),
        )
        .with_section("Relief"),
        FieldDescriptor::new(
            "annexures",
            "Annexures (bills, receipts, correspondence)",
            FieldKind::File,
        )
        .with_section("Annexures"),
        FieldDescriptor::new("declaration.place", "Place", FieldKind::text())
            .with_section("Verification"),
        FieldDescriptor::new(
            "declaration.date",
            "Date",
            FieldKind::text_validated(validate_date),
        )
        .with_section("Verification")
        .with_boxes(10),
    ]
}
