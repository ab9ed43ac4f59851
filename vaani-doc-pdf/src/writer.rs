//! Assembles rendered pages into a PDF document.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use thiserror::Error;

use vaani_form::{AnswerRecord, FormSchema};

use crate::layout::build_document;
use crate::page::{MM_TO_PT, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::render::{FONT_BOLD, FONT_REGULAR, render_nodes};

#[derive(Debug, Error)]
pub enum DocError {
    #[error("PDF assembly error: {0}")]
    Assembly(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a filled form into PDF bytes, entirely in memory.
pub fn to_pdf(schema: &FormSchema, record: &AnswerRecord) -> Result<Vec<u8>, DocError> {
    let nodes = build_document(schema, record);
    let pages = render_nodes(&nodes, schema.plan().break_after_mm());
    assemble(schema.title(), pages)
}

/// Render a filled form and write it to `dir` under the plan's file name.
///
/// The write happens only after the whole document has been assembled, so
/// a failed render leaves no partial file.
pub fn export(
    schema: &FormSchema,
    record: &AnswerRecord,
    dir: &Path,
) -> Result<PathBuf, DocError> {
    let bytes = to_pdf(schema, record)?;
    let path = dir.join(schema.plan().file_name());
    fs::write(&path, bytes)?;
    Ok(path)
}

fn assemble(title: &str, pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, DocError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![],
        "Count" => 0,
    });

    let mut kids = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| DocError::Assembly(e.to_string()))?;
        let stream_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    FONT_REGULAR => dictionary! {
                        "Type" => "Font",
                        "Subtype" => "Type1",
                        "BaseFont" => "Helvetica",
                    },
                    FONT_BOLD => dictionary! {
                        "Type" => "Font",
                        "Subtype" => "Type1",
                        "BaseFont" => "Helvetica-Bold",
                    },
                },
            },
            "MediaBox" => vec![
                0f32.into(),
                0f32.into(),
                (PAGE_WIDTH_MM * MM_TO_PT).into(),
                (PAGE_HEIGHT_MM * MM_TO_PT).into(),
            ],
            "Contents" => stream_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| DocError::Assembly(e.to_string()))?;
    pages_dict.set("Kids", kids);
    pages_dict.set("Count", count);

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("Vaani-Nyay"),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| DocError::Assembly(e.to_string()))?;
    Ok(bytes)
}
