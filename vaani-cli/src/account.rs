use anyhow::Context;
use tracing::info;
use vaani_auth::{AuthClient, CredentialStore, DurableStore, RegisterRequest, store_for};

use crate::Global;

#[derive(Debug, clap::Args)]
pub struct RegisterOptions {
    /// Full name on the account.
    #[clap(long)]
    pub name: Option<String>,

    /// Email address used to log in.
    #[clap(long)]
    pub email: Option<String>,

    /// Mobile number.
    #[clap(long)]
    pub phone: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct LoginOptions {
    /// Email address used to log in.
    #[clap(long)]
    pub email: Option<String>,

    /// Keep the login on disk for later runs.
    #[clap(long)]
    pub remember: bool,
}

pub async fn register(options: RegisterOptions, global: Global) -> anyhow::Result<()> {
    let name = prompt_or("Name", options.name)?;
    let email = prompt_or("Email", options.email)?;
    let phone = prompt_or("Mobile number", options.phone)?;
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "The passwords do not match")
        .interact()?;

    let client = AuthClient::new(global.api_base.clone());
    let credentials = client
        .register(&RegisterRequest {
            name,
            email,
            phone,
            password,
        })
        .await
        .context("registration failed")?;

    println!(
        "Registered {} <{}>.",
        credentials.user.name, credentials.user.email
    );
    Ok(())
}

pub async fn login(options: LoginOptions, global: Global) -> anyhow::Result<()> {
    let email = prompt_or("Email", options.email)?;
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()?;

    let client = AuthClient::new(global.api_base.clone());
    let credentials = client
        .login(&email, &password)
        .await
        .context("login failed")?;

    let mut store = store_for(options.remember)?;
    store.set(&credentials)?;
    if options.remember {
        info!("stored login for {}", credentials.user.email);
        println!(
            "Logged in as {}. The login is remembered on this machine.",
            credentials.user.name
        );
    } else {
        println!(
            "Logged in as {}. The login lasts until this process exits.",
            credentials.user.name
        );
    }
    Ok(())
}

pub fn logout() -> anyhow::Result<()> {
    let mut store = DurableStore::open_default()?;
    store.clear()?;
    println!("Logged out.");
    Ok(())
}

fn prompt_or(label: &str, value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(dialoguer::Input::<String>::new()
            .with_prompt(label)
            .interact_text()?),
    }
}
