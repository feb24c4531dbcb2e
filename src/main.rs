use std::collections::HashMap;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod model;
mod services;

use model::resource::Dataset;
use services::fetch::{ApiClient, FetchError};
use services::report::SortOrder;
use services::{aggregate, cache, report};

#[derive(Parser)]
#[command(
    name = "transifex-stats",
    version,
    about = "Translation activity reports for a Transifex project"
)]
struct Cli {
    /// Project code on the Transifex
    project_code: String,

    /// Username of an account on the Transifex
    username: String,

    /// Password of the account (prompted if needed and not given)
    #[arg(short, long)]
    password: Option<String>,

    /// Language code of the project (prompted if not given)
    #[arg(short, long)]
    language: Option<String>,

    /// Group changes by field (date is the default)
    #[arg(short, long, value_parser = ["resource", "user", "source", "date"])]
    groupby: Option<String>,

    /// Override a report limit as KEY=VALUE (top_limit, changes_limit)
    #[arg(short = 's', long, value_name = "KEY=VALUE")]
    limits: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt(term: &Term, message: &str) -> Result<String> {
    term.write_str(message).context("failed to write prompt")?;
    let value = term.read_line().context("failed to read input")?;
    Ok(value.trim().to_string())
}

fn prompt_password(term: &Term) -> Result<String> {
    term.write_str("Password: ").context("failed to write prompt")?;
    term.read_secure_line().context("failed to read password")
}

fn parse_limits(pair: Option<&str>) -> Result<HashMap<String, String>> {
    let mut limits = HashMap::new();
    if let Some(pair) = pair {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("limits must be KEY=VALUE, got {pair:?}"))?;
        limits.insert(key.to_string(), value.to_string());
    }
    Ok(limits)
}

fn resolve_limit(limits: &HashMap<String, String>, key: &str, default: usize) -> Result<usize> {
    match limits.get(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid value for {key}: {value:?}")),
        None => Ok(default),
    }
}

fn obtain_dataset(cli: &Cli, language: &str, dir: &Path, term: &Term) -> Result<Dataset> {
    if cache::is_fresh(dir, &cli.project_code, language) {
        info!("cache used");
        return cache::load(dir, &cli.project_code, language);
    }

    let password = match &cli.password {
        Some(password) => password.clone(),
        None => prompt_password(term)?,
    };

    let client = match std::env::var("TRANSIFEX_API_ROOT") {
        Ok(root) => ApiClient::with_base_url(root, cli.username.clone(), password),
        Err(_) => ApiClient::new(cli.username.clone(), password),
    }?;
    let dataset = match client.download(&cli.project_code, language) {
        Ok(dataset) => dataset,
        Err(FetchError::Authorization) => {
            println!("Authorization failed.");
            process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    cache::save(dir, &cli.project_code, language, &dataset)?;
    Ok(dataset)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let term = Term::stderr();

    let language = match &cli.language {
        Some(language) => language.clone(),
        None => prompt(&term, "Language code: ")?,
    };

    let limits = parse_limits(cli.limits.as_deref())?;
    let top_limit = resolve_limit(&limits, "top_limit", report::DEFAULT_TOP_LIMIT)?;
    let changes_limit = resolve_limit(&limits, "changes_limit", report::DEFAULT_CHANGES_LIMIT)?;

    let dir = Path::new(".");
    let dataset = obtain_dataset(&cli, &language, dir, &term)?;

    let (users, events) = aggregate::aggregate(&dataset);

    let path = report::write_top_users(dir, &cli.project_code, &language, &users, top_limit)
        .context("failed to write top-users report")?;
    println!("Top {} user list saved to \"{}\"", top_limit, path.display());

    let order = SortOrder::from_key(cli.groupby.as_deref());
    let path =
        report::write_recent_changes(dir, &cli.project_code, &language, &events, order, changes_limit)
            .context("failed to write recent-changes report")?;
    println!("Last {} changes list saved to \"{}\"", changes_limit, path.display());

    Ok(())
}
