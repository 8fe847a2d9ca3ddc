use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use dialoguer::{Confirm, Password};
use std::path::PathBuf;

use zdorg_cli::config::{AppConfig, ConfigManager, get_config};
use zdorg_cli::orchestrators::update_orchestrator::UpdateOrchestrator;
use zdorg_cli::output::OutputFormat;
use zdorg_cli::{CliError, terminal};
use zdorg_core::error::ValidationError;
use zdorg_core::form::{self, DataSource, UpdateForm};
use zdorg_core::update::default_export_filename;
use zdorg_core::{Environment, FIELD_OPTIONS, csv_import};

#[derive(Parser)]
#[command(name = "zdorg")]
#[command(author, version, about = "Bulk-update Zendesk organizations from an ID or a CSV file", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Connection options shared by commands that talk to Zendesk
#[derive(clap::Args, Debug, Default)]
struct ConnectionArgs {
    /// Zendesk subdomain (the `acme` in acme.zendesk.com)
    #[arg(short, long)]
    subdomain: Option<String>,

    /// API token (prompted for when not given or set in the environment)
    #[arg(long)]
    api_token: Option<String>,

    /// Target environment
    #[arg(short, long, value_parser = parse_environment)]
    environment: Option<Environment>,
}

#[derive(Subcommand)]
enum Commands {
    /// Update one organization or every organization listed in a CSV file
    Update {
        /// Organization ID to update
        #[arg(long, conflicts_with = "csv", required_unless_present = "csv")]
        org_id: Option<String>,

        /// CSV file with an organization_id, org_id or id column
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Field to set, as KEY=VALUE (repeatable, at most 5)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        #[command(flatten)]
        connection: ConnectionArgs,

        /// Skip the confirmation prompt for production runs
        #[arg(short, long)]
        yes: bool,

        /// Output format (defaults to human on a terminal, json otherwise)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the results as CSV (defaults to zendesk-updates-YYYY-MM-DD.csv)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },

    /// Check that the subdomain and API token are accepted
    Verify {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// List the organization IDs found in a CSV file
    Ids {
        /// CSV file to read
        path: PathBuf,
    },

    /// List the fields that can be updated
    Fields,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., zendesk.subdomain)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., zendesk.subdomain)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

fn parse_environment(value: &str) -> Result<Environment, String> {
    value.parse()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize logging based on debug flag
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("zdorg_core", log::LevelFilter::Debug)
            .filter_module("zdorg_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(error) = run(cli).await {
        let error = CliError::from(error);
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Update {
            org_id,
            csv,
            fields,
            connection,
            yes,
            format,
            export,
        } => {
            let config = get_config().context("Failed to load configuration")?;
            update_command(config, org_id, csv, fields, connection, yes, format, export).await
        }
        Commands::Verify { connection } => {
            let config = get_config().context("Failed to load configuration")?;
            verify_command(config, connection).await
        }
        Commands::Ids { path } => ids_command(path).await,
        Commands::Fields => {
            fields_command();
            Ok(())
        }
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn update_command(
    mut config: AppConfig,
    org_id: Option<String>,
    csv: Option<PathBuf>,
    field_arguments: Vec<String>,
    connection: ConnectionArgs,
    yes: bool,
    format: Option<OutputFormat>,
    export: Option<Option<PathBuf>>,
) -> Result<()> {
    log::debug!("Starting update command");

    let fields = field_arguments
        .iter()
        .map(|argument| form::parse_field_argument(argument))
        .collect::<Result<Vec<_>, ValidationError>>()
        .map_err(zdorg_core::Error::from)?;

    let source = match (org_id, csv) {
        (Some(id), _) => DataSource::Manual(id),
        (None, Some(path)) => {
            let ids = csv_import::load_file(&path)
                .await
                .map_err(zdorg_core::Error::from)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            eprintln!("Found {} organization IDs", ids.len());
            DataSource::Csv(ids)
        }
        (None, None) => DataSource::default(),
    };

    config.apply_cli_overrides(
        connection.subdomain,
        connection.api_token,
        connection.environment,
    );

    let mut form = UpdateForm {
        subdomain: config.zendesk.subdomain.clone().unwrap_or_default(),
        api_token: config.zendesk.api_token.clone().unwrap_or_default(),
        environment: config.zendesk.environment,
        source,
        fields,
    };

    // Ask for the token only once everything before it is valid
    if form.api_token.trim().is_empty()
        && !form.subdomain.trim().is_empty()
        && let Some(token) = prompt_for_token()?
    {
        form.api_token = token.clone();
        config.zendesk.api_token = Some(token);
    }
    form.validate().map_err(zdorg_core::Error::from)?;

    if form.environment.is_production() && !yes {
        confirm_production_run(form.target_ids().len())?;
    }

    let orchestrator = UpdateOrchestrator::from_config(&config.client_config())?;
    orchestrator.submit(&form).await?;

    let format = format.unwrap_or(if terminal::is_interactive() {
        config.output.default_format
    } else {
        OutputFormat::Json
    });
    let use_color = terminal::use_color(config.output.color_enabled);
    println!("{}", orchestrator.render(format, use_color)?);

    if let Some(path) = export {
        let path = path.unwrap_or_else(|| PathBuf::from(default_export_filename()));
        orchestrator.export(&path)?;
        eprintln!("Results exported to {}", path.display());
    }

    Ok(())
}

async fn verify_command(mut config: AppConfig, connection: ConnectionArgs) -> Result<()> {
    config.apply_cli_overrides(
        connection.subdomain,
        connection.api_token,
        connection.environment,
    );
    if config.zendesk.api_token.is_none() && config.zendesk.subdomain.is_some() {
        config.zendesk.api_token = prompt_for_token()?;
    }

    let subdomain = config.zendesk.subdomain.clone().unwrap_or_default();
    let orchestrator = UpdateOrchestrator::from_config(&config.client_config())?;
    if !orchestrator.verify().await {
        return Err(
            zdorg_core::Error::from(zdorg_core::error::AuthError::invalid_credentials(&subdomain))
                .into(),
        );
    }

    eprintln!(
        "{}",
        format!(
            "Credentials verified for {subdomain} ({})",
            config.zendesk.environment
        )
        .green()
    );
    Ok(())
}

async fn ids_command(path: PathBuf) -> Result<()> {
    let ids = csv_import::load_file(&path)
        .await
        .map_err(zdorg_core::Error::from)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    eprintln!("Found {} organization IDs", ids.len());
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

fn fields_command() {
    let use_color = terminal::use_color(true);
    for option in FIELD_OPTIONS {
        let path = if use_color {
            option.path.cyan().to_string()
        } else {
            option.path.to_string()
        };
        println!("{path:<40} {}", option.label);
    }
}

fn prompt_for_token() -> Result<Option<String>> {
    if !terminal::can_prompt() {
        return Ok(None);
    }

    let token = Password::new()
        .with_prompt("Zendesk API token")
        .interact()
        .context("Failed to read API token")?;
    Ok(Some(token))
}

fn confirm_production_run(count: usize) -> Result<()> {
    if !terminal::can_prompt() {
        return Err(CliError::misuse(
            "Refusing to update production organizations without confirmation; pass --yes",
        )
        .into());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "You are about to update {count} organization(s) in PRODUCTION. Continue?"
        ))
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;

    if !confirmed {
        return Err(CliError::general("Update cancelled").into());
    }
    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            let value = manager.get(&key).map_err(|e| CliError::misuse(&e.to_string()))?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut current_section = None;
            for (key, value) in items {
                let (section, name) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if current_section != Some(section.to_string()) {
                    if current_section.is_some() {
                        println!();
                    }
                    println!("[{}]", section.yellow());
                    current_section = Some(section.to_string());
                }
                println!("  {} = {}", name.cyan(), value);
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
