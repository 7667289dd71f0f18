mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use lottery_config::Config;
use lottery_engine::{MessageComposer, Orchestrator};
use lottery_mail::AzureEmailClient;
use lottery_source::RandomOrgClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(
        games = config.games.len(),
        packs = config.ticket_packs.len(),
        "configuration loaded"
    );

    // Fail fast: nothing is drawn or sent for an invalid configuration
    let validated = Orchestrator::new(config.catalog()).validate(cli.filter())?;

    let mut source = RandomOrgClient::new(config.random_org_api_key.clone())?;
    if let Some(endpoint) = &config.random_org_endpoint {
        source = source.with_endpoint(endpoint.clone());
    }

    if cli.dry_run {
        let generated = validated.generate(&source).await?;
        for pack in generated.packs() {
            println!("{}:", pack.name);
            println!("{}", pack);
            println!();
        }
        return Ok(());
    }

    let mailer = AzureEmailClient::new(&config.azure_email_endpoint, &config.azure_email_key)
        .context("Failed to set up email client")?;
    let composer = MessageComposer::new(config.sender_name.clone(), config.sender_email.clone());

    let generated = validated.generate(&source).await?;
    let report = generated.send(&mailer, &composer).await;

    for delivered in &report.delivered {
        println!("✓ Sent pack '{}' to {}", delivered.pack, delivered.email);
    }
    for failed in &report.failed {
        println!("✗ Pack '{}' to {}: {}", failed.pack, failed.email, failed.error);
    }

    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} emails could not be sent",
            report.failed.len(),
            report.attempted()
        );
    }

    Ok(())
}
