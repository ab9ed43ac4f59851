use clap::Parser;

mod account;
mod assist;
mod fill;

#[derive(Debug, clap::Parser)]
#[command(
    name = "vaani",
    version,
    about = "Voice-assisted legal form filling for Indian public services"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Account service base URL.
    #[clap(
        long,
        env = "VAANI_API_BASE",
        global = true,
        default_value = "http://localhost:5000"
    )]
    pub api_base: String,

    /// Bhashini speech pipeline base URL.
    #[clap(
        long,
        env = "VAANI_BHASHINI_BASE",
        global = true,
        default_value = "http://localhost:8000"
    )]
    pub bhashini_base: String,

    /// Gemini API key. Without one, `ask` answers from the built-in
    /// guidance only.
    #[clap(long, env = "GEMINI_API_KEY", global = true)]
    pub gemini_key: Option<String>,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List the bundled form schemas
    Forms,

    /// Fill one form in the terminal wizard and export it as a PDF
    Fill(fill::Options),

    /// Ask the legal assistant a question
    Ask(assist::Options),

    /// Create an account on the Vaani-Nyay service
    Register(account::RegisterOptions),

    /// Log in to the Vaani-Nyay service
    Login(account::LoginOptions),

    /// Forget a remembered login
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let app = App::parse();

    match app.command {
        SubCommands::Forms => {
            for schema in vaani_forms::registry::all() {
                println!("{:<14} {}", schema.slug(), schema.title());
            }
            Ok(())
        }
        SubCommands::Fill(options) => fill::run(options, app.global),
        SubCommands::Ask(options) => assist::run(options, app.global).await,
        SubCommands::Register(options) => account::register(options, app.global).await,
        SubCommands::Login(options) => account::login(options, app.global).await,
        SubCommands::Logout => account::logout(),
    }
}
