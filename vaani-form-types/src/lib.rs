//! Core types for Vaani-Nyay guided forms.
//!
//! This crate provides the foundational types for declaring and filling forms:
//! - `FormSchema` and `FieldDescriptor` - The static, ordered definition of one form
//! - `AnswerPath` and `AnswerValue` - Dotted-path keys and the closed value variant
//! - `AnswerRecord` - The flat path/value store holding one session's answers
//! - `DerivedRule` and `DocumentPlan` - Declarative side effects and export layout data

mod answer_path;
pub use answer_path::{AnswerPath, Segment};

mod answer_value;
pub use answer_value::{AnswerValue, FileHandle};

mod answer_record;
pub use answer_record::{AnswerError, AnswerRecord};

mod field;
pub use field::{
    CheckboxStore, Condition, FieldDescriptor, FieldHint, FieldKind, RadioStore, Validator,
    normalize_option,
};

mod schema;
pub use schema::{DerivedAction, DerivedRule, DocumentPlan, FormSchema, Trigger};
