//! Integration tests for vaani-form

use vaani_form::{
    AnswerPath, Cursor, DocumentPlan, FieldDescriptor, FieldKind, FormSchema, FormSession,
    ScriptedAnswers, StepOutcome,
};

fn three_required_fields() -> FormSchema {
    FormSchema::new(
        "fir-minimal",
        "First Information Report (minimal)",
        vec![
            FieldDescriptor::new("complainantName", "Complainant's name", FieldKind::text()),
            FieldDescriptor::new("incidentPlace", "Place of incident", FieldKind::text()),
            FieldDescriptor::new("incidentDetails", "Details", FieldKind::textarea()),
        ],
        DocumentPlan::new("fir-minimal.pdf"),
    )
}

#[test]
fn fresh_session_shows_all_fields_and_starts_at_zero() {
    let session = FormSession::new(three_required_fields());

    let keys: Vec<_> = session
        .visible_fields()
        .iter()
        .map(|field| field.key().as_str().to_string())
        .collect();
    assert_eq!(keys, ["complainantName", "incidentPlace", "incidentDetails"]);
    assert_eq!(session.cursor(), &Cursor::Stepping(0));
    assert!(!session.in_preview());
}

#[test]
fn edit_confirm_returns_to_preview_from_any_key() {
    let keys = ["complainantName", "incidentPlace", "incidentDetails"];
    for key in keys {
        let mut session = FormSession::new(three_required_fields());
        while session.advance() == StepOutcome::Moved {}
        assert!(session.in_preview());

        let key = AnswerPath::new(key);
        session.jump_to_edit(&key);
        assert_eq!(session.advance(), StepOutcome::ConfirmReturn);
        session.finish_edit();

        assert!(session.in_preview());
        assert_eq!(session.editing_key(), None);
    }
}

#[test]
fn yes_no_round_trip_is_lossless() {
    let schema = FormSchema::new(
        "litigation-test",
        "Litigation cost test",
        vec![FieldDescriptor::new(
            "litigationCost",
            "Claim litigation cost?",
            FieldKind::yes_no(),
        )],
        DocumentPlan::new("litigation-test.pdf"),
    );
    let mut session = FormSession::new(schema);
    let key = AnswerPath::new("litigationCost");
    let field = session.schema().field(&key).unwrap().clone();

    // true -> "Yes" -> true
    session.select_option(&key, "Yes").unwrap();
    assert!(session.answers().bool_at("litigationCost"));
    let shown = session.display_value(&field);
    assert_eq!(shown, "Yes");
    session.select_option(&key, &shown).unwrap();
    assert!(session.answers().bool_at("litigationCost"));

    // false -> "No" -> false
    session.select_option(&key, "No").unwrap();
    let shown = session.display_value(&field);
    assert_eq!(shown, "No");
    session.select_option(&key, &shown).unwrap();
    assert!(!session.answers().bool_at("litigationCost"));
}

#[test]
fn scripted_walk_then_edit_one_answer() {
    let mut session = ScriptedAnswers::new()
        .with_text("complainantName", "Asha Devi")
        .with_text("incidentPlace", "Shivajinagar")
        .with_text("incidentDetails", "Theft of a bicycle on 12 August.")
        .run(three_required_fields())
        .unwrap();
    assert!(session.in_preview());

    let place = AnswerPath::new("incidentPlace");
    session.jump_to_edit(&place);
    session.set_value(place.clone(), "Shivajinagar, Pune").unwrap();
    assert_eq!(session.advance(), StepOutcome::ConfirmReturn);
    session.finish_edit();

    assert!(session.in_preview());
    assert_eq!(session.answers().text_at("incidentPlace"), "Shivajinagar, Pune");
    assert_eq!(session.answers().text_at("complainantName"), "Asha Devi");
}
