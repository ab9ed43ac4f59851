//! Scripted end-to-end fills of the shipped schemas.

use vaani_form::{AnswerPath, ScriptedAnswers, StepOutcome};
use vaani_forms::{bank_account, consumer, pan, registry, rti, voter_id};

#[test]
fn voter_id_same_address_copies_the_present_address() {
    let session = ScriptedAnswers::new()
        .with_text("applicantName", "Asha Devi")
        .with_text("relativeName", "Ramesh Kumar")
        .with_text("dateOfBirth", "12/08/1990")
        .with_choice("gender", "Female")
        .with_text("aadhaarNumber", "123456789012")
        .with_text("mobileNumber", "9876543210")
        .with_text("presentAddress.houseNo", "12-B")
        .with_text("presentAddress.street", "Shastri Nagar")
        .with_text("presentAddress.villageTown", "Pune")
        .with_text("presentAddress.district", "Pune")
        .with_text("presentAddress.state", "Maharashtra")
        .with_text("presentAddress.pinCode", "411001")
        .with_choice("sameAsPresent", "Yes")
        .with_file("photo", "photo.jpg", "/tmp/photo.jpg")
        .with_text("declaration.place", "Pune")
        .with_text("declaration.date", "20/08/2026")
        .run(voter_id::schema())
        .unwrap();

    assert!(session.in_preview());
    let answers = session.answers();
    assert_eq!(answers.text_at("permanentAddress.houseNo"), "12-B");
    assert_eq!(answers.text_at("permanentAddress.pinCode"), "411001");

    // The mirror fields were hidden, so the walk never stopped on them.
    let visible: Vec<_> = session
        .visible_fields()
        .iter()
        .map(|field| field.key().as_str().to_string())
        .collect();
    assert!(!visible.contains(&"permanentAddress.houseNo".to_string()));
}

#[test]
fn pan_corrections_reveal_their_replacement_fields() {
    let session = ScriptedAnswers::new()
        .with_text("panNumber", "ABCDE1234F")
        .with_text("applicantName", "Asha Devi")
        .with_toggles("corrections", ["Name", "Date of Birth"])
        .with_text("correctedName", "Asha D. Sharma")
        .with_text("correctedDateOfBirth", "12/08/1990")
        .run(pan::schema())
        .unwrap();

    let answers = session.answers();
    assert!(answers.bool_at("corrections.name"));
    assert!(answers.bool_at("corrections.dateofbirth"));
    assert!(!answers.bool_at("corrections.address"));
    assert_eq!(answers.text_at("correctedName"), "Asha D. Sharma");

    // Untouched corrections leave their replacement fields hidden.
    assert!(session
        .visible_fields()
        .iter()
        .all(|field| field.key() != &AnswerPath::new("correctedFatherName")));
}

#[test]
fn rti_bpl_waives_the_fee_mode() {
    let session = ScriptedAnswers::new()
        .with_text("publicAuthority", "Office of the District Collector, Pune")
        .with_text("applicantName", "Asha Devi")
        .with_choice("belowPovertyLine", "Yes")
        .with_text("bplCardNumber", "MH-BPL-004521")
        .run(rti::schema())
        .unwrap();

    let answers = session.answers();
    assert!(answers.bool_at("belowPovertyLine"));
    assert_eq!(answers.text_at("bplCardNumber"), "MH-BPL-004521");
    // The fee mode was never visible, so it kept its default.
    assert_eq!(answers.text_at("feeMode"), "");
}

#[test]
fn consumer_complaint_collects_relief_and_annexures() {
    let session = ScriptedAnswers::new()
        .with_text("complainantName", "Asha Devi")
        .with_text("oppositeParty", "M/s Sharma Electronics")
        .with_text("purchaseDate", "02/06/2026")
        .with_text("purchaseAmount", "18500")
        .with_toggles("reliefSought", ["Refund", "Compensation"])
        .with_choice("litigationCost", "Yes")
        .with_file("annexures", "invoice.pdf", "/tmp/invoice.pdf")
        .with_file("annexures", "warranty-card.pdf", "/tmp/warranty-card.pdf")
        .run(consumer::schema())
        .unwrap();

    let answers = session.answers();
    assert_eq!(
        answers
            .get_text_list(&AnswerPath::new("reliefSought"))
            .unwrap(),
        &["Refund".to_string(), "Compensation".to_string()]
    );
    assert!(answers.bool_at("litigationCost"));
    let annexures = answers
        .get_file_list(&AnswerPath::new("annexures"))
        .unwrap();
    assert_eq!(annexures.len(), 2);
    assert_eq!(annexures[0].name, "invoice.pdf");
}

#[test]
fn bank_account_example_data_fills_then_resets() {
    let mut session = ScriptedAnswers::new()
        .with_choice("useExample", "Yes")
        .run(bank_account::schema())
        .unwrap();

    assert_eq!(session.answers().text_at("applicantName"), "Asha Devi");
    assert_eq!(session.answers().text_at("address.pinCode"), "411001");

    // Turning the toggle off from the preview wipes the whole record.
    let toggle = AnswerPath::new("useExample");
    session.jump_to_edit(&toggle);
    session.select_option(&toggle, "No").unwrap();
    assert_eq!(session.advance(), StepOutcome::ConfirmReturn);
    session.finish_edit();

    assert_eq!(session.answers().text_at("applicantName"), "");
    assert_eq!(session.answers().text_at("initialDeposit"), "");
}

#[test]
fn every_schema_walks_to_preview_untouched() {
    for schema in registry::all() {
        let slug = schema.slug().to_string();
        let session = ScriptedAnswers::new().run(schema).unwrap();
        assert!(session.in_preview(), "{slug} did not reach preview");
    }
}
