mod config;
mod credentials;
mod render;

use clap::Parser;
use config::{default_config_toml, load_config, write_default_config, Config};
use credentials::{bearer_headers, resolve_github_token};
use libnamecheck::{check_batch, tlds::parse_tld_list, BatchRequest, CheckConfig};
use std::{
    io::{self, Write},
    time::Duration,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "namecheck", version)]
#[command(about = "Check name availability across Comfy Registry, PyPI, npm, GitHub and domains", long_about = None)]
struct Args {
    /// Name(s) to check, comma-separated for several
    names: Option<String>,

    /// Comma-separated TLDs to check (e.g., com,io,dev)
    #[arg(long)]
    tlds: Option<String>,

    /// Comma-separated checks to skip: comfy,pypi,npm,github,domain
    #[arg(long)]
    skip: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output results as NDJSON (one JSON object per line)
    #[arg(long, short = 'j')]
    json: bool,

    /// Log debug output to stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print the default config to stdout and exit
    #[arg(long)]
    print_default_config: bool,

    /// Write the default config to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

/// Effective settings once flags are layered over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    names: Vec<String>,
    tlds: Vec<String>,
    skip: Vec<String>,
    timeout: Duration,
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve_settings(names: &str, args: &Args, config: &Config) -> Settings {
    let tlds = match &args.tlds {
        Some(list) => parse_tld_list(list),
        None => config.tlds.clone(),
    };
    let skip = match &args.skip {
        Some(list) => split_list(list),
        None => config.skip.clone(),
    };
    Settings {
        names: split_list(names),
        tlds,
        skip: skip.into_iter().map(|s| s.to_lowercase()).collect(),
        timeout: Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs)),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.print_default_config {
        println!("{}", default_config_toml());
        return Ok(());
    }

    if args.write_default_config {
        let path = write_default_config()?;
        println!("Default config written to: {}", path.display());
        return Ok(());
    }

    let Some(names) = args.names.as_deref() else {
        eprintln!("Error: no names provided");
        std::process::exit(2);
    };

    let config = load_config();
    let settings = resolve_settings(names, &args, &config);
    if settings.names.is_empty() {
        eprintln!("Error: no names provided");
        std::process::exit(2);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run(settings, args.json))
}

async fn run(settings: Settings, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let token = resolve_github_token().await;
    let check_config = CheckConfig::default()
        .with_timeout(settings.timeout)
        .with_credential_headers(bearer_headers(token.as_deref()));

    let mut stdout = io::stdout();
    for (i, name) in settings.names.iter().enumerate() {
        let request = BatchRequest {
            name: name.clone(),
            tlds: settings.tlds.clone(),
            skip: settings.skip.clone(),
        };
        let rows = check_batch(check_config.clone(), &request).await?;

        if json {
            write!(stdout, "{}", render::render_ndjson(name, &rows)?)?;
        } else {
            write!(stdout, "{}", render::render_report(name, &rows))?;
            if i + 1 < settings.names.len() {
                writeln!(stdout, "{}", render::separator())?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}
