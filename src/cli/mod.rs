//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `benchmarkinator login|logout|status|theme|key`: session gate and preferences
//! - `benchmarkinator dashboard|hardware|benchmarks|configs|results`: page views
//! - `benchmarkinator compare`: score comparison between two test systems
//! - `benchmarkinator create|update|delete`: record mutations
//! - `benchmarkinator config show|init|set|reset`: configuration management

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::api::models::{Benchmark, Configuration, Id};
use crate::api::{ApiClient, ApiError, Endpoint};
use crate::app::App;
use crate::config;
use crate::session::SessionError;
use crate::ui::confirm::{confirm, prompt_line};
use crate::ui::nav::Route;
use crate::ui::select::{SearchableSelect, SelectConfig};
use crate::ui::table::Table;
use crate::ui::toast::Toast;
use crate::views::hardware::HardwareTab;
use crate::views::results::ResultFilter;
use crate::views::{self, forms, load_or_log};

/// Output format for read commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Print a view in the requested format.
fn emit<T: Serialize>(title: &str, format: OutputFormat, data: &T, table: &Table) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Csv => print!("{}", table.to_csv()),
        OutputFormat::Table => {
            println!("{}", title.bold().cyan());
            println!("{}", "=".repeat(60));
            if table.is_empty() {
                println!("{}", "  No records found.".yellow());
            } else {
                table.print();
            }
        }
    }
    Ok(())
}

/// Fall back to an empty view on a failed load, but still fail the command.
fn loaded<T: Default>(view: &str, result: Result<T, ApiError>) -> Result<T> {
    match load_or_log(view, result) {
        (data, None) => Ok(data),
        (_, Some(e)) => {
            Toast::error(format!("Error fetching {view}: {e}")).show();
            Err(e.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Input is read as a plain line, so the terminal echoes it.
const PASSWORD_PROMPT: &str = "Password (visible as you type): ";

/// Log in, prompting for whatever was not passed on the command line.
pub fn run_login(app: &mut App, username: Option<String>, password: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt_line(PASSWORD_PROMPT)?,
    };

    match app.session.login(&username, &password) {
        Ok(user) => {
            Toast::success(format!("Logged in as {} ({})", user.username, user.role)).show();
            Ok(())
        }
        Err(SessionError::Auth(e)) => {
            Toast::error(e.to_string()).show();
            Err(e.into())
        }
        Err(e) => Err(e).context("failed to persist session"),
    }
}

pub fn run_logout(app: &mut App) -> Result<()> {
    let was_logged_in = app.session.is_authenticated();
    app.session.logout().context("failed to clear session store")?;
    if was_logged_in {
        Toast::success("Logged out").show();
    } else {
        Toast::info("Not logged in").show();
    }
    Ok(())
}

pub fn run_status(app: &App, format: OutputFormat) -> Result<()> {
    let session = app.session.session();
    if format == OutputFormat::Json {
        let value = serde_json::json!({
            "is_authenticated": session.is_authenticated,
            "user": session.user,
            "dark_mode": app.session.dark_mode(),
            "api_url": app.config.api.base_url,
            "api_key": api_key_source(app),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Benchmarkinator Session".bold().cyan());
    println!("{}", "=".repeat(40));
    match &session.user {
        Some(user) => println!("  {} {} ({})", "User:     ".bold(), user.username, user.role),
        None => println!("  {} {}", "User:     ".bold(), "logged out".dimmed()),
    }
    println!(
        "  {} {}",
        "Theme:    ".bold(),
        if app.session.dark_mode() { "dark" } else { "light" }
    );
    println!("  {} {}", "API:      ".bold(), app.config.api.base_url);
    println!("  {} {}", "API key:  ".bold(), api_key_source(app));
    if let Some(path) = config::global_config_file() {
        let note = if path.exists() { "" } else { " (not created)" };
        println!("  {} {}{}", "Config:   ".bold(), path.display(), note.dimmed());
    }
    println!();
    for route in Route::ALL {
        let mark = if app.session.can_access(route) {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("  {mark} {}", route.label());
    }
    Ok(())
}

/// Where the `X-API-Key` value comes from. The key itself is never printed.
fn api_key_source(app: &App) -> &'static str {
    if app.session.has_stored_api_key() {
        "stored"
    } else if app.config.api.api_key.is_empty() {
        "none"
    } else {
        "configured"
    }
}

/// Store the API key sent with every request, prompting when not given.
pub fn run_key_set(app: &mut App, key: Option<String>) -> Result<()> {
    let key = match key {
        Some(k) => k,
        None => prompt_line("API key: ")?,
    };
    if key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    app.session
        .set_api_key(Some(&key))
        .context("failed to save API key")?;
    Toast::success("API key saved").show();
    Ok(())
}

pub fn run_key_clear(app: &mut App) -> Result<()> {
    app.session.set_api_key(None).context("failed to clear API key")?;
    Toast::info(format!("Stored API key cleared (now: {})", api_key_source(app))).show();
    Ok(())
}

pub fn run_theme(app: &mut App) -> Result<()> {
    let dark = app
        .session
        .toggle_dark_mode()
        .context("failed to save theme preference")?;
    Toast::info(format!("Dark mode {}", if dark { "on" } else { "off" })).show();
    Ok(())
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

pub fn run_dashboard(app: &App, format: OutputFormat) -> Result<()> {
    app.require(Route::Dashboard)?;
    let stats = loaded("dashboard", views::dashboard::load(&app.client()))?;
    emit("Benchmarkinator Dashboard", format, &stats, &stats.table())?;
    if format == OutputFormat::Table {
        println!();
        println!("{}", "Quick Actions".bold().cyan());
        for action in views::dashboard::QUICK_ACTIONS {
            println!("  {:<20} {}", action.name, action.description.dimmed());
        }
    }
    Ok(())
}

pub fn run_hardware(app: &App, tab: HardwareTab, format: OutputFormat) -> Result<()> {
    app.require(Route::Hardware)?;
    let data = loaded("hardware", views::hardware::load(&app.client(), tab))?;
    emit(tab.label(), format, &data, &data.table())?;
    if format == OutputFormat::Table {
        let missing = data.missing_prerequisites();
        if !missing.is_empty() {
            Toast::warning(format!(
                "Create at least one {} before adding {}.",
                missing.join(", "),
                tab.label()
            ))
            .show();
        }
    }
    Ok(())
}

pub fn run_benchmarks(app: &App, targets: bool, format: OutputFormat) -> Result<()> {
    app.require(Route::Benchmarks)?;
    let data = loaded("benchmarks", views::benchmarks::load(&app.client()))?;
    if targets {
        emit("Benchmark Targets", format, &data.targets, &data.targets_table())
    } else {
        emit("Benchmarks", format, &data, &data.table())
    }
}

pub fn run_configs(app: &App, id: Option<Id>, format: OutputFormat) -> Result<()> {
    app.require(Route::Configurations)?;
    let data = loaded("configurations", views::configurations::load(&app.client()))?;

    let Some(id) = id else {
        return emit("Test Systems", format, &data, &data.table());
    };

    let cfg = data
        .configurations
        .iter()
        .find(|c| c.id == Some(id))
        .with_context(|| format!("configuration {id} not found"))?;
    let mut table = Table::new(["Field", "Value"]);
    for (field, value) in data.detail(cfg) {
        table.push(vec![field, value]);
    }
    emit(&format!("Test System #{id}"), format, cfg, &table)
}

/// Results filters as typed on the command line. Benchmarks and
/// configurations may be named by id or by a unique part of their name.
#[derive(Debug, Clone, Default)]
pub struct ResultSelection {
    pub benchmark: Option<String>,
    pub configuration: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

fn pick<T>(select: &SearchableSelect<T>, input: Option<&str>, what: &str) -> Result<Option<Id>> {
    let Some(input) = input else {
        return Ok(None);
    };
    let id = select.resolve(input).with_context(|| {
        let matches = select.filtered(input).len();
        format!("'{input}' matches {matches} {what}s; give an id or a more specific name")
    })?;
    Ok(Some(id))
}

pub fn run_results(app: &App, selection: &ResultSelection, chart: bool, format: OutputFormat) -> Result<()> {
    app.require(Route::Results)?;
    let data = loaded("results", views::results::load(&app.client()))?;

    let benchmarks = SearchableSelect::new(SelectConfig {
        options: data.benchmarks.clone(),
        display: |b: &Benchmark| b.name.clone(),
        value: |b: &Benchmark| b.id,
        placeholder: "All benchmarks",
    });
    let configurations = SearchableSelect::new(SelectConfig {
        options: data.configurations.clone(),
        display: |c: &Configuration| c.name.clone(),
        value: |c: &Configuration| c.id,
        placeholder: "All configurations",
    });
    let filter = ResultFilter {
        benchmark: pick(&benchmarks, selection.benchmark.as_deref(), "benchmark")?,
        configuration: pick(&configurations, selection.configuration.as_deref(), "configuration")?,
        date_from: selection.date_from,
        date_to: selection.date_to,
    };

    if format == OutputFormat::Table {
        println!(
            "{} {} / {}",
            "Showing:".dimmed(),
            benchmarks.selected_label(filter.benchmark),
            configurations.selected_label(filter.configuration)
        );
    }

    if !chart {
        let rows = data.filtered(&filter);
        return emit("Benchmark Results", format, &rows, &data.table(&filter));
    }

    let rows = data.chart(&filter);
    let mut table = Table::new(["Benchmark - Configuration", "Score", ""]);
    let max = rows.iter().map(|r| r.score).fold(0.0_f64, f64::max);
    for row in &rows {
        table.push(vec![row.name.clone(), format!("{}", row.score), bar(row.score, max, 30)]);
    }
    emit("Performance Comparison", format, &rows, &table)
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

/// Compare two test systems, server-side by default or over the fetched
/// results with `local`.
pub fn run_compare(app: &App, config_1: Id, config_2: Id, local: bool, format: OutputFormat) -> Result<()> {
    app.require(Route::Results)?;
    let client = app.client();
    let data = loaded("results", views::results::load(&client))?;

    let entries = if local {
        data.compare(config_1, config_2)
    } else {
        match client.compare_configs(config_1, config_2) {
            Ok(entries) => entries,
            Err(ApiError::Status { code: 404, .. }) => Vec::new(),
            Err(e) => {
                Toast::error(format!("Comparison failed: {e}")).show();
                return Err(e.into());
            }
        }
    };

    if entries.is_empty() && format == OutputFormat::Table {
        Toast::warning("No benchmark results shared by both configurations.").show();
        return Ok(());
    }

    let table = data.comparison_table(&entries, config_1, config_2);
    emit("Configuration Comparison", format, &entries, &table)
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Parse an endpoint argument like `cpu` or `gpu/vram_type`.
pub fn parse_endpoint(s: &str) -> Result<Endpoint> {
    Endpoint::from_path(s).with_context(|| {
        let known: Vec<&str> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        format!("unknown endpoint '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_draft(json: &str) -> Result<Value> {
    let draft: Value = serde_json::from_str(json).context("record must be a JSON object")?;
    if !draft.is_object() {
        anyhow::bail!("record must be a JSON object");
    }
    Ok(draft)
}

fn check_required(endpoint: Endpoint, draft: &Value) -> Result<()> {
    let missing = forms::missing_fields(endpoint, draft);
    if missing.is_empty() {
        return Ok(());
    }
    let message = format!(
        "Please fill in all required fields for {endpoint}: {}",
        missing.join(", ")
    );
    Toast::warning(&message).show();
    anyhow::bail!(message)
}

/// Refuse to create CPUs, GPUs or motherboards before their lookup tables exist.
fn check_prerequisites(client: &ApiClient, endpoint: Endpoint) -> Result<()> {
    let tab = match endpoint {
        Endpoint::Cpu => HardwareTab::Cpu,
        Endpoint::Gpu => HardwareTab::Gpu,
        Endpoint::Motherboard => HardwareTab::Motherboard,
        _ => return Ok(()),
    };
    let data = views::hardware::load(client, tab)?;
    let missing = data.missing_prerequisites();
    if missing.is_empty() {
        return Ok(());
    }
    let message = format!(
        "Please create at least one {} before adding {}.",
        missing.join(", "),
        tab.label()
    );
    Toast::warning(&message).show();
    anyhow::bail!(message)
}

pub fn run_create(app: &App, endpoint: Endpoint, json: &str) -> Result<()> {
    app.require_login()?;
    let draft = parse_draft(json)?;
    check_required(endpoint, &draft)?;

    let client = app.client();
    check_prerequisites(&client, endpoint)?;

    match client.create::<Value, Value>(endpoint, &draft) {
        Ok(created) => {
            let id = created.get("id").map(Value::to_string).unwrap_or_default();
            Toast::success(format!("Created {endpoint} {id}")).show();
            refresh(app, &client, endpoint)
        }
        Err(e) => {
            tracing::error!(%endpoint, error = %e, "create failed");
            Toast::error(format!("Error saving {endpoint}: {e}")).show();
            Err(e.into())
        }
    }
}

/// Overlay the given fields on the stored record and save it.
pub fn run_update(app: &App, endpoint: Endpoint, id: Id, json: &str) -> Result<()> {
    app.require_login()?;
    let edit = parse_draft(json)?;

    let client = app.client();
    let stored = client.get::<Value>(endpoint, id).map_err(|e| {
        Toast::error(format!("Error loading {endpoint} {id}: {e}")).show();
        e
    })?;
    let draft = forms::merge_edit(endpoint, stored, &edit)
        .with_context(|| format!("invalid {endpoint} record"))?;
    check_required(endpoint, &draft)?;

    match client.update::<Value, Value>(endpoint, id, &draft) {
        Ok(_) => {
            Toast::success(format!("Updated {endpoint} {id}")).show();
            refresh(app, &client, endpoint)
        }
        Err(e) => {
            tracing::error!(%endpoint, id, error = %e, "update failed");
            Toast::error(format!("Error saving {endpoint}: {e}")).show();
            Err(e.into())
        }
    }
}

pub fn run_delete(app: &App, endpoint: Endpoint, id: Id, yes: bool) -> Result<()> {
    app.require_login()?;
    if !yes && !confirm(&format!("Are you sure you want to delete this {endpoint} ({id})?")) {
        Toast::info("Delete cancelled").show();
        return Ok(());
    }

    let client = app.client();
    match client.delete(endpoint, id) {
        Ok(()) => {
            Toast::success(format!("Deleted {endpoint} {id}")).show();
            refresh(app, &client, endpoint)
        }
        Err(e) => {
            tracing::error!(%endpoint, id, error = %e, "delete failed");
            Toast::error(format!("Error deleting {endpoint}: {e}")).show();
            Err(e.into())
        }
    }
}

/// Re-fetch and show the view a mutated endpoint belongs to.
fn refresh(app: &App, client: &ApiClient, endpoint: Endpoint) -> Result<()> {
    println!();
    match endpoint {
        Endpoint::Config => {
            let data = loaded("configurations", views::configurations::load(client))?;
            emit("Test Systems", OutputFormat::Table, &data, &data.table())
        }
        Endpoint::Benchmark | Endpoint::BenchmarkTarget => {
            let data = loaded("benchmarks", views::benchmarks::load(client))?;
            if endpoint == Endpoint::Benchmark {
                emit("Benchmarks", OutputFormat::Table, &data, &data.table())
            } else {
                emit("Benchmark Targets", OutputFormat::Table, &data, &data.targets_table())
            }
        }
        Endpoint::BenchmarkResults => {
            run_results(app, &ResultSelection::default(), false, OutputFormat::Table)
        }
        other => run_hardware(app, hardware_tab_of(other), OutputFormat::Table),
    }
}

/// The hardware tab that shows (or resolves names from) an endpoint.
fn hardware_tab_of(endpoint: Endpoint) -> HardwareTab {
    HardwareTab::ALL
        .into_iter()
        .find(|tab| tab.endpoint() == endpoint || tab.lookups().contains(&endpoint))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// benchmarkinator config
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    println!("{}", config::show_effective_config()?);
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    Toast::success(format!("Wrote {}", path.display())).show();
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    Toast::success(format!("{key} = {value}")).show();
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    Toast::success(format!("Reset {} to defaults", path.display())).show();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_defaults_to_table() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str_opt(Some("xml")), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
    }

    #[test]
    fn password_prompt_warns_about_echo() {
        assert!(PASSWORD_PROMPT.starts_with("Password"));
        assert!(PASSWORD_PROMPT.contains("visible"));
    }

    #[test]
    fn lookup_endpoints_refresh_their_parent_tab() {
        assert_eq!(hardware_tab_of(Endpoint::GpuVramType), HardwareTab::Gpu);
        assert_eq!(hardware_tab_of(Endpoint::MotherboardChipset), HardwareTab::Motherboard);
        assert_eq!(hardware_tab_of(Endpoint::Os), HardwareTab::Os);
    }

    #[test]
    fn drafts_must_be_objects() {
        assert!(parse_draft(r#"{"name": "x"}"#).is_ok());
        assert!(parse_draft("[1]").is_err());
        assert!(parse_draft("nope").is_err());
    }

    #[test]
    fn bars_scale_to_max() {
        assert_eq!(bar(50.0, 100.0, 10).chars().count(), 5);
        assert_eq!(bar(0.0, 100.0, 10), "");
        assert_eq!(bar(0.1, 100.0, 10).chars().count(), 1);
    }

    #[test]
    fn unknown_endpoint_lists_alternatives() {
        let err = parse_endpoint("psu").unwrap_err().to_string();
        assert!(err.contains("gpu/vram_type"));
    }
}
