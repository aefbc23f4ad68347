//! tendergen - Main CLI Entry Point

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tendergen::{
    bootstrap::{connect_index, Services},
    cli::{write_exports, Args, Commands, GenerateArgs, Verbosity},
    config::{mask_secret, Config, Credentials, IndexBackend, OPENAI_API_KEY_VAR, PINECONE_API_KEY_VAR},
    progress::TerminalProgress,
    TenderDocument,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbosity());

    if let Err(e) = run(args).await {
        eprintln!("{} {}", "✗".red(), format!("{:#}", e).red());
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    let verbosity = args.verbosity();

    match &args.command {
        Commands::Generate(form) => run_generate(&config, form, verbosity).await,
        Commands::Stats => run_stats(&config).await,
        Commands::Config => {
            show_config(&config, &args);
            Ok(())
        }
    }
}

/// Validate the form, generate every section, display and export
async fn run_generate(config: &Config, form: &GenerateArgs, verbosity: Verbosity) -> Result<()> {
    // Validate before touching the network
    let details = form.project_details()?;
    let credentials = Credentials::from_env(config.index.backend)?;
    let services = Services::connect(config, &credentials).await?;

    if verbosity.show_progress() {
        println!(
            "{}",
            "Generating tender document... This may take a few minutes.".dimmed()
        );
    }

    let mut progress = if verbosity.show_progress() {
        TerminalProgress::new()
    } else {
        TerminalProgress::hidden()
    };

    let document = services
        .generator
        .generate_document(&details, &mut progress)
        .await
        .context("An error occurred during tender generation")?;

    println!("{}", "✓ Tender document generated successfully!".green());
    if verbosity != Verbosity::Quiet {
        display_document(&document);
    }

    let written = write_exports(&document, details.title(), &form.output_dir, form.format)?;
    for path in written {
        println!("{} {}", "Saved".cyan(), path.display());
    }

    Ok(())
}

fn display_document(document: &TenderDocument) {
    for (section, content) in document.iter() {
        println!("\n{}", format!("### {}", section).bold().cyan());
        println!("{}", content);
    }
    println!();
}

/// Print reference index statistics
async fn run_stats(config: &Config) -> Result<()> {
    let pinecone_api_key = Credentials::index_key_from_env(config.index.backend)?;
    let index = connect_index(config, pinecone_api_key.as_deref()).await?;

    println!("{}", "Database Statistics".bold());
    match index.total_records().await {
        Ok(total) => println!("  Total Documents: {}", total),
        Err(e) => println!("  {} {}", "Error fetching statistics:".red(), e),
    }
    println!("  Last Updated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    Ok(())
}

fn show_config(config: &Config, args: &Args) {
    let path = args
        .config
        .clone()
        .or_else(Config::default_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("{}", "tendergen configuration".bold());
    println!("  File:            {}", path);
    println!("  API base URL:    {}", config.openai.base_url);
    println!("  Embedding model: {}", config.openai.embedding_model);
    println!("  Chat model:      {}", config.openai.chat_model);
    println!("  Temperature:     {}", config.openai.temperature);
    println!("  Max tokens:      {}", config.openai.max_tokens);
    println!("  Index backend:   {:?}", config.index.backend);
    match &config.index.host {
        Some(host) => println!("  Index host:      {}", host),
        None => println!(
            "  Index host:      {}",
            format!("(looked up via {})", config.index.control_plane_url).dimmed()
        ),
    }
    println!("  Collection:      {}", config.index.collection);
    println!("  Top K:           {}", config.index.top_k);
    println!("  HTTP timeout:    {}s", config.http.timeout_secs);

    print_key(OPENAI_API_KEY_VAR);
    if config.index.backend == IndexBackend::Pinecone {
        print_key(PINECONE_API_KEY_VAR);
    }
}

fn print_key(var: &str) {
    let shown = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(|v| mask_secret(&v))
        .unwrap_or_else(|| "not set".yellow().to_string());
    println!("  {:<16} {}", format!("{}:", var), shown);
}
