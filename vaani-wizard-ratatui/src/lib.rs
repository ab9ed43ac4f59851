//! Ratatui front end for Vaani-Nyay form filling.
//!
//! [`FormWizard`] runs a [`vaani_form::FormSession`] in the terminal:
//! one field per screen with typed or dictated answers, then a preview
//! of the finished document where any line can be reopened, and finally
//! PDF export through `vaani-doc-pdf`.
//!
//! ```no_run
//! use vaani_wizard_ratatui::{FormWizard, WizardOutcome};
//!
//! # fn main() -> Result<(), vaani_wizard_ratatui::WizardError> {
//! let mut wizard = FormWizard::new().with_export_dir("filled");
//! match wizard.run(vaani_forms::voter_id::schema())? {
//!     WizardOutcome::Exported(path) => println!("saved {}", path.display()),
//!     WizardOutcome::Cancelled => println!("nothing saved"),
//! }
//! # Ok(())
//! # }
//! ```

mod preview;
mod wizard;

pub use wizard::{FormWizard, Theme, WizardError, WizardOutcome};
