//! The declarative layout tree between a filled form and its pages.
//!
//! [`build_document`] decides *what* the document contains; the renderer
//! decides *where* it lands. Keeping the two apart means the pagination
//! logic is written once, and a new form type needs only a schema.

use vaani_form::{AnswerRecord, FieldDescriptor, FieldKind, FormSchema, display};

use crate::translit::to_latin;

/// One block of the rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    /// Centered heading lines, first line largest.
    Letterhead(Vec<String>),

    /// Titled group of blocks, set off with a heading rule.
    Section {
        title: String,
        children: Vec<DocNode>,
    },

    /// A labeled run of bordered squares, one glyph per square.
    CharBoxes {
        label: String,
        text: String,
        cells: usize,
    },

    /// A labeled ruled line carrying the answer text.
    RuledLine { label: String, text: String },

    /// A labeled row of checkbox glyphs with their ticked states.
    CheckRow {
        label: String,
        options: Vec<(String, bool)>,
    },

    /// Free text wrapped to the column width.
    TextBlock(String),

    /// Bold label and plain value on one line.
    KeyValue { label: String, value: String },

    /// Vertical gap in millimeters.
    Spacer(f32),
}

/// Build the layout tree for a filled form.
///
/// Every non-ephemeral schema field gets a row whether or not it is
/// currently visible in the wizard: the paper form prints all its boxes,
/// and answers mirrored in by derived rules belong on it. Consecutive
/// fields sharing a section tag group under one [`DocNode::Section`].
pub fn build_document(schema: &FormSchema, record: &AnswerRecord) -> Vec<DocNode> {
    let mut nodes = Vec::new();

    let letterhead = if schema.plan().letterhead().is_empty() {
        vec![schema.title().to_string()]
    } else {
        schema.plan().letterhead().to_vec()
    };
    nodes.push(DocNode::Letterhead(letterhead));

    let mut section_title: Option<String> = None;
    let mut section_children: Vec<DocNode> = Vec::new();
    for field in schema.fields() {
        if field.is_ephemeral() {
            continue;
        }
        let same_section = field
            .section()
            .is_some_and(|section| section_title.as_deref() == Some(section));
        if !same_section {
            flush_section(&mut nodes, &mut section_title, &mut section_children);
            section_title = field.section().map(str::to_string);
        }
        let target = if section_title.is_some() {
            &mut section_children
        } else {
            &mut nodes
        };
        push_field_nodes(target, field, record);
    }
    flush_section(&mut nodes, &mut section_title, &mut section_children);

    let declaration = schema.plan().declaration();
    if !declaration.is_empty() {
        nodes.push(DocNode::Spacer(4.0));
        nodes.push(DocNode::TextBlock(declaration.to_string()));
    }
    nodes.push(DocNode::Spacer(10.0));
    nodes.push(DocNode::RuledLine {
        label: "Signature / Thumb impression of applicant".to_string(),
        text: String::new(),
    });

    nodes
}

fn flush_section(
    nodes: &mut Vec<DocNode>,
    title: &mut Option<String>,
    children: &mut Vec<DocNode>,
) {
    if let Some(title) = title.take() {
        nodes.push(DocNode::Section {
            title,
            children: std::mem::take(children),
        });
    }
}

fn push_field_nodes(out: &mut Vec<DocNode>, field: &FieldDescriptor, record: &AnswerRecord) {
    let label = field.label().to_string();
    match field.kind() {
        FieldKind::Text { .. } | FieldKind::Email { .. } => {
            let text = to_latin(record.text_at(field.key()));
            match field.hint().boxes {
                Some(cells) => out.push(DocNode::CharBoxes { label, text, cells }),
                None => out.push(DocNode::RuledLine { label, text }),
            }
        }
        FieldKind::Textarea { .. } => {
            out.push(DocNode::KeyValue {
                label,
                value: String::new(),
            });
            out.push(DocNode::TextBlock(to_latin(record.text_at(field.key()))));
        }
        FieldKind::Radio { options, .. } | FieldKind::Checkbox { options, .. } => {
            let options = options
                .iter()
                .map(|option| {
                    (
                        option.clone(),
                        display::option_selected(field, record, option),
                    )
                })
                .collect();
            out.push(DocNode::CheckRow { label, options });
        }
        FieldKind::File => out.push(DocNode::KeyValue {
            label,
            value: display::display_value(field, record),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_form::{DocumentPlan, FieldDescriptor, FieldKind};

    fn schema() -> FormSchema {
        FormSchema::new(
            "layout-test",
            "Layout test",
            vec![
                FieldDescriptor::new("useExample", "Use example data?", FieldKind::yes_no())
                    .with_ephemeral(),
                FieldDescriptor::new("fullName", "Full name", FieldKind::text())
                    .with_section("Applicant details"),
                FieldDescriptor::new("aadhaarNumber", "Aadhaar number", FieldKind::text())
                    .with_section("Applicant details")
                    .with_boxes(12),
                FieldDescriptor::new("city", "City / Town", FieldKind::text())
                    .with_section("Address"),
                FieldDescriptor::new("married", "Married?", FieldKind::yes_no()),
            ],
            DocumentPlan::new("layout-test.pdf")
                .with_letterhead(["OFFICE OF THE TEST", "FORM 0"])
                .with_declaration("I affirm the above."),
        )
    }

    #[test]
    fn consecutive_fields_group_under_their_section() {
        let record = AnswerRecord::defaults_for(&schema());
        let nodes = build_document(&schema(), &record);

        let titles: Vec<&str> = nodes
            .iter()
            .filter_map(|node| match node {
                DocNode::Section { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, ["Applicant details", "Address"]);

        let Some(DocNode::Section { children, .. }) = nodes
            .iter()
            .find(|node| matches!(node, DocNode::Section { .. }))
        else {
            panic!("no section node");
        };
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn boxed_field_becomes_char_boxes() {
        let schema = schema();
        let mut record = AnswerRecord::defaults_for(&schema);
        record.set("aadhaarNumber", "123456789012").unwrap();

        let nodes = build_document(&schema, &record);
        let boxes = find(&nodes, &|node| matches!(node, DocNode::CharBoxes { .. }));
        assert_eq!(
            boxes,
            Some(&DocNode::CharBoxes {
                label: "Aadhaar number".to_string(),
                text: "123456789012".to_string(),
                cells: 12,
            })
        );
    }

    #[test]
    fn ephemeral_fields_have_no_row() {
        let record = AnswerRecord::defaults_for(&schema());
        let nodes = build_document(&schema(), &record);
        let rows = collect_labels(&nodes);
        assert!(!rows.iter().any(|label| label.contains("example")));
    }

    #[test]
    fn yes_no_row_mirrors_the_stored_bool() {
        let schema = schema();
        let mut record = AnswerRecord::defaults_for(&schema);

        let ticked = |nodes: &[DocNode]| -> Vec<(String, bool)> {
            match find(nodes, &|node| matches!(node, DocNode::CheckRow { .. })) {
                Some(DocNode::CheckRow { options, .. }) => options.clone(),
                _ => panic!("no check row"),
            }
        };

        let nodes = build_document(&schema, &record);
        assert_eq!(
            ticked(&nodes),
            [("Yes".to_string(), false), ("No".to_string(), true)]
        );

        record.set("married", true).unwrap();
        let nodes = build_document(&schema, &record);
        assert_eq!(
            ticked(&nodes),
            [("Yes".to_string(), true), ("No".to_string(), false)]
        );
    }

    #[test]
    fn values_pass_through_the_transliteration_table() {
        let schema = schema();
        let mut record = AnswerRecord::defaults_for(&schema);
        record.set("city", "नई दिल्ली").unwrap();

        let nodes = build_document(&schema, &record);
        let city = find(&nodes, &|node| {
            matches!(node, DocNode::RuledLine { label, .. } if label == "City / Town")
        });
        assert_eq!(
            city,
            Some(&DocNode::RuledLine {
                label: "City / Town".to_string(),
                text: "New Delhi".to_string(),
            })
        );
    }

    #[test]
    fn missing_letterhead_falls_back_to_the_title() {
        let schema = FormSchema::new(
            "bare",
            "Bare form",
            vec![FieldDescriptor::new("one", "One", FieldKind::text())],
            DocumentPlan::new("bare.pdf"),
        );
        let record = AnswerRecord::defaults_for(&schema);
        let nodes = build_document(&schema, &record);
        assert_eq!(
            nodes.first(),
            Some(&DocNode::Letterhead(vec!["Bare form".to_string()]))
        );
    }

    fn find<'a>(nodes: &'a [DocNode], pred: &dyn Fn(&DocNode) -> bool) -> Option<&'a DocNode> {
        for node in nodes {
            if pred(node) {
                return Some(node);
            }
            if let DocNode::Section { children, .. } = node {
                if let Some(hit) = find(children, pred) {
                    return Some(hit);
                }
            }
        }
        None
    }

    fn collect_labels(nodes: &[DocNode]) -> Vec<String> {
        let mut labels = Vec::new();
        for node in nodes {
            match node {
                DocNode::Section { children, .. } => labels.extend(collect_labels(children)),
                DocNode::CharBoxes { label, .. }
                | DocNode::RuledLine { label, .. }
                | DocNode::CheckRow { label, .. }
                | DocNode::KeyValue { label, .. } => labels.push(label.clone()),
                _ => {}
            }
        }
        labels
    }
}
