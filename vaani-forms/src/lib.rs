//! The form schemas shipped with Vaani-Nyay.
//!
//! One module per form type, each exposing a `schema()` function and its
//! field validators. Schemas are plain data: the session, the wizard, and
//! the PDF export all consume them without knowing which form they carry.

pub mod bank_account;
pub mod consumer;
pub mod pan;
pub mod rti;
pub mod voter_id;

pub mod registry;

pub mod validators;
