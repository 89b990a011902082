use anyhow::Result;
use clap::{Parser, Subcommand};

use benchmarkinator::api::models::Id;
use benchmarkinator::app::App;
use benchmarkinator::cli::{self, OutputFormat, ResultSelection};
use benchmarkinator::views::hardware::HardwareTab;
use benchmarkinator::views::results::parse_date;
use benchmarkinator::{config, logging, web};

#[derive(Debug, Parser)]
#[command(name = "benchmarkinator")]
#[command(about = "Admin console for the Benchmarkinator hardware and benchmark catalogue")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in as the administrator
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the current session, theme and reachable pages
    Status {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Toggle dark mode
    Theme,
    /// Manage the API key sent with every request
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Catalogue totals and quick actions
    Dashboard {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List one hardware category: cpu, gpu, motherboard, ram, disk, os
    Hardware {
        #[arg(default_value = "cpu")]
        tab: HardwareTab,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List benchmarks, or their targets with --targets
    Benchmarks {
        #[arg(long)]
        targets: bool,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List test systems, or show one in detail
    Configs {
        id: Option<Id>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List benchmark results (no login required)
    Results {
        /// Only results of this benchmark (id or name)
        #[arg(long)]
        benchmark: Option<String>,
        /// Only results of this configuration (id or name)
        #[arg(long)]
        config: Option<String>,
        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: Option<chrono::NaiveDate>,
        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: Option<chrono::NaiveDate>,
        /// Show scores as a bar chart
        #[arg(long)]
        chart: bool,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Compare the scores of two configurations
    Compare {
        config_1: Id,
        config_2: Id,
        /// Pair the fetched results locally instead of asking the API
        #[arg(long)]
        local: bool,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a record, e.g. `create cpu '{"model": "..."}'`
    Create { endpoint: String, json: String },
    /// Change fields of a record by id, e.g. `update cpu 4 '{"speed": "500MHz"}'`
    Update { endpoint: String, id: Id, json: String },
    /// Delete a record by id
    Delete {
        endpoint: String,
        id: Id,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Launch the web dashboard
    Web {
        /// Address to bind (default from config, 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum KeyAction {
    /// Store a key, prompting when none is given
    Set { key: Option<String> },
    /// Forget the stored key and fall back to `api.api_key`
    Clear,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default global config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.base_url`
    Set { key: String, value: String },
    /// Restore the global config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let config = config::load();
    logging::init(&config.logging);

    if let Commands::Config { action } = args.command {
        return match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        };
    }

    let mut app = App::start(config)?;

    match args.command {
        Commands::Login { username, password } => cli::run_login(&mut app, username, password),
        Commands::Logout => cli::run_logout(&mut app),
        Commands::Status { format } => cli::run_status(&app, fmt(&format)),
        Commands::Theme => cli::run_theme(&mut app),
        Commands::Key { action } => match action {
            KeyAction::Set { key } => cli::run_key_set(&mut app, key),
            KeyAction::Clear => cli::run_key_clear(&mut app),
        },
        Commands::Dashboard { format } => cli::run_dashboard(&app, fmt(&format)),
        Commands::Hardware { tab, format } => cli::run_hardware(&app, tab, fmt(&format)),
        Commands::Benchmarks { targets, format } => cli::run_benchmarks(&app, targets, fmt(&format)),
        Commands::Configs { id, format } => cli::run_configs(&app, id, fmt(&format)),
        Commands::Results {
            benchmark,
            config,
            from,
            to,
            chart,
            format,
        } => {
            let selection = ResultSelection {
                benchmark,
                configuration: config,
                date_from: from,
                date_to: to,
            };
            cli::run_results(&app, &selection, chart, fmt(&format))
        }
        Commands::Compare {
            config_1,
            config_2,
            local,
            format,
        } => cli::run_compare(&app, config_1, config_2, local, fmt(&format)),
        Commands::Create { endpoint, json } => {
            cli::run_create(&app, cli::parse_endpoint(&endpoint)?, &json)
        }
        Commands::Update { endpoint, id, json } => {
            cli::run_update(&app, cli::parse_endpoint(&endpoint)?, id, &json)
        }
        Commands::Delete { endpoint, id, yes } => {
            cli::run_delete(&app, cli::parse_endpoint(&endpoint)?, id, yes)
        }
        Commands::Web { addr } => {
            let addr = addr.unwrap_or_else(|| app.config.web.addr.clone());
            web::serve(app, &addr)
        }
        Commands::Config { .. } => Ok(()),
    }
}

fn fmt(format: &str) -> OutputFormat {
    OutputFormat::from_str_opt(Some(format))
}
