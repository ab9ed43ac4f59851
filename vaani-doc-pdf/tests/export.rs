use vaani_doc_pdf::{DocNode, build_document, export, to_pdf};
use vaani_form::AnswerRecord;

fn flatten(nodes: &[DocNode]) -> Vec<&DocNode> {
    let mut flat = Vec::new();
    for node in nodes {
        flat.push(node);
        if let DocNode::Section { children, .. } = node {
            flat.extend(flatten(children));
        }
    }
    flat
}

#[test]
fn every_schema_exports_a_loadable_pdf() {
    for schema in vaani_forms::registry::all() {
        let record = AnswerRecord::defaults_for(&schema);
        let bytes = to_pdf(&schema, &record).unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "{}", schema.slug());

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(!doc.get_pages().is_empty(), "{}", schema.slug());
    }
}

#[test]
fn aadhaar_number_lands_in_twelve_boxes() {
    let schema = vaani_forms::voter_id::schema();
    let mut record = AnswerRecord::defaults_for(&schema);
    record.set("aadhaarNumber", "123456789012").unwrap();

    let nodes = build_document(&schema, &record);
    let aadhaar = flatten(&nodes).into_iter().find(|node| {
        matches!(node, DocNode::CharBoxes { text, .. } if text == "123456789012")
    });
    assert_eq!(
        aadhaar,
        Some(&DocNode::CharBoxes {
            label: "Aadhaar number".to_string(),
            text: "123456789012".to_string(),
            cells: 12,
        })
    );
}

#[test]
fn long_complaint_spills_onto_extra_pages() {
    let schema = vaani_forms::consumer::schema();
    let mut record = AnswerRecord::defaults_for(&schema);
    record.set("complainantName", "Asha Devi").unwrap();
    let narrative = "The water purifier stopped working within a week and the seller \
                     refused to honour the warranty despite repeated visits. "
        .repeat(40);
    record.set("complaintDetails", narrative.trim()).unwrap();

    let bytes = to_pdf(&schema, &record).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert!(
        doc.get_pages().len() >= 2,
        "expected a page break, got {} page(s)",
        doc.get_pages().len()
    );
}

#[test]
fn export_writes_the_plans_file_name() {
    let schema = vaani_forms::rti::schema();
    let record = AnswerRecord::defaults_for(&schema);
    let dir = tempfile::TempDir::new().unwrap();

    let path = export(&schema, &record, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "rti-application.pdf");
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));

    // A second export replaces the file in a single write.
    let again = export(&schema, &record, dir.path()).unwrap();
    assert_eq!(again, path);
}
