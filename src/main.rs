//! page-events-demo CLI
//!
//! Interactive event-handling page in the terminal, plus a headless form
//! validator.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use page_events_demo::config::{ConfigSource, default_log_path, load_config};
use page_events_demo::logging::{init_file_logging, init_stderr_logging};
use page_events_demo::report::format_report;
use page_events_demo::tui::run::run;
use page_events_demo::tui::state::App;
use page_events_demo::types::{Field, OutputFormat};
use page_events_demo::validation::{FormState, Validator};

#[derive(Parser)]
#[command(name = "page-events-demo")]
#[command(about = "Click, hover and keypress feedback, interactive widgets and form validation")]
#[command(version)]
struct Cli {
    /// Page configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file for the interactive page
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive page (default)
    Run,

    /// Validate form values without opening the page
    Validate {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the effective page configuration as JSON
    PrintConfig,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(config, cli.log_file),
        Commands::Validate {
            name,
            email,
            password,
            phone,
            format,
        } => cmd_validate([name, email, password, phone], format.into()),
        Commands::PrintConfig => cmd_print_config(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_run(config_path: Option<&Path>, log_file: Option<PathBuf>) -> Result<(), String> {
    let log_path = log_file.unwrap_or_else(default_log_path);
    // Buffered log lines are flushed when the guard drops
    let _log_guard = init_file_logging(&log_path)
        .map_err(|e| format!("cannot open log file {}: {}", log_path.display(), e))?;

    let (config, source) = load_config(config_path).map_err(|e| {
        tracing::error!(error = %e, "startup failed");
        e.to_string()
    })?;
    match &source {
        ConfigSource::File(path) => tracing::info!(path = %path.display(), "config loaded"),
        ConfigSource::Defaults => tracing::info!("using built-in config"),
    }

    let app = App::new(&config).map_err(|e| e.to_string())?;
    run(app).map_err(|e| format!("terminal: {}", e))
}

fn cmd_validate(values: [String; 4], format: OutputFormat) -> Result<(), String> {
    init_stderr_logging();

    let validator = Validator::new().map_err(|e| e.to_string())?;
    let form = Field::ALL
        .iter()
        .zip(values)
        .fold(FormState::default(), |form, (&field, value)| {
            form.input(field, value, &validator)
        });
    let (form, _) = form.submit(&validator);
    let report = form.report();

    println!("{}", format_report(&report, format));

    if report.valid {
        Ok(())
    } else {
        Err("form is invalid".to_string())
    }
}

fn cmd_print_config(config_path: Option<&Path>) -> Result<(), String> {
    init_stderr_logging();

    let (config, source) = load_config(config_path).map_err(|e| e.to_string())?;
    if let ConfigSource::File(path) = &source {
        tracing::debug!(path = %path.display(), "config loaded");
    }

    let json = serde_json::to_string_pretty(&config).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
