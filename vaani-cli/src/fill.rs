use std::path::PathBuf;

use anyhow::{Context, bail};
use tracing::info;
use vaani_speech::{BhashiniClient, LiveCapture, WavFileSource};
use vaani_wizard_ratatui::{FormWizard, WizardOutcome};

use crate::Global;

#[derive(Debug, clap::Args)]
pub struct Options {
    /// Which form to fill (see `vaani forms`).
    pub form: String,

    /// Directory the exported PDF is written to.
    #[clap(long, default_value = ".")]
    pub out: PathBuf,

    /// WAV recording used as the dictation source; each F2 press sends
    /// it through the Bhashini pipeline. Without this flag dictation is
    /// off and answers are typed.
    #[clap(long)]
    pub speech_wav: Option<PathBuf>,

    /// Dictation language tag, e.g. `hi` or `ta`.
    #[clap(long, default_value = "hi")]
    pub language: String,
}

pub fn run(options: Options, global: Global) -> anyhow::Result<()> {
    let Some(schema) = vaani_forms::registry::by_slug(&options.form) else {
        bail!(
            "unknown form '{}'; `vaani forms` lists the available ones",
            options.form
        );
    };

    let mut wizard = FormWizard::new()
        .with_export_dir(options.out.clone())
        .with_capture_language(options.language.clone());
    if let Some(wav) = &options.speech_wav {
        let client = BhashiniClient::new(global.bhashini_base.clone());
        let capture =
            LiveCapture::new(client, WavFileSource::new(wav.clone())).with_translation("en");
        wizard = wizard.with_speech(capture);
        info!("dictation from {} ({})", wav.display(), options.language);
    }

    match wizard.run(schema).context("the form wizard failed")? {
        WizardOutcome::Exported(path) => println!("Saved {}", path.display()),
        WizardOutcome::Cancelled => println!("Cancelled; nothing was saved."),
    }
    Ok(())
}
