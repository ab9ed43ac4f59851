use tracing::debug;
use vaani_assist::{Assistant, GeminiClient};

use crate::Global;

#[derive(Debug, clap::Args)]
pub struct Options {
    /// The question, in any supported language.
    #[clap(required = true)]
    pub question: Vec<String>,
}

pub async fn run(options: Options, global: Global) -> anyhow::Result<()> {
    let question = options.question.join(" ");
    let answer = match &global.gemini_key {
        Some(key) => {
            let mut assistant = Assistant::new(GeminiClient::new(key.clone()));
            assistant.ask(&question).await
        }
        None => {
            debug!("no API key; answering from the offline bank");
            vaani_assist::offline_answer(&question).to_string()
        }
    };
    println!("{answer}");
    Ok(())
}
