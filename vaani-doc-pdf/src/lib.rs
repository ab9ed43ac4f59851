//! PDF backend for vaani-form: renders a filled [`AnswerRecord`] into a
//! paginated facsimile of the official paper form.
//!
//! The pipeline has two halves. [`build_document`] walks a schema and its
//! answers into a declarative layout tree of [`DocNode`]s; the renderer
//! walks that tree onto A4 pages, starting a fresh bordered page whenever
//! the vertical cursor passes the plan's break threshold. Form-specific
//! text enters only through the schema's [`DocumentPlan`], so one renderer
//! serves every form type.
//!
//! The document is assembled fully in memory; [`export`] writes it to disk
//! in a single call, so a failed render leaves no partial file behind.
//!
//! Free text is passed through [`to_latin`] before drawing, a best-effort
//! lookup of known non-Latin strings. Unrecognized text passes through
//! unchanged; the built-in base-14 fonts will render it as garbage, which
//! is an accepted limitation of the facsimile, not an error.
//!
//! [`AnswerRecord`]: vaani_form::AnswerRecord
//! [`DocumentPlan`]: vaani_form::DocumentPlan

mod layout;
mod page;
mod render;
mod translit;
mod writer;

pub use layout::{DocNode, build_document};
pub use translit::to_latin;
pub use writer::{DocError, export, to_pdf};
