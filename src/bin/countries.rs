use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use countries_rs::{Client, Query, display, stats, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "countries",
    version,
    about = "Fetch, search & export countries from the REST Countries API"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch countries (and optionally save them and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Search by country name (e.g., france). Omit to list all countries.
    #[arg(short, long)]
    name: Option<String>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Locale for population digit grouping (e.g., en, de, fr).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Max table rows printed to stdout (0 = all).
    #[arg(long, default_value_t = 0)]
    limit: usize,
    /// Print population statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

/// Format a statistic up to one decimal, trimming a trailing ".0".
fn fmt_stat(x: f64) -> String {
    let s = format!("{:.1}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let client = Client::default();
    // Whitespace-only input means "all", same as the interactive search box.
    let query = match args.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Query::Named(name.to_string()),
        _ => Query::All,
    };

    let countries = client.fetch(&query)?;
    if countries.is_empty() {
        eprintln!("No countries found");
        return Ok(());
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&countries, path)?,
            "json" => storage::save_json(&countries, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} countries to {}", countries.len(), path.display());
    }

    let shown = if args.limit > 0 {
        args.limit.min(countries.len())
    } else {
        countries.len()
    };
    for c in &countries[..shown] {
        println!(
            "{:<36} {:>16}",
            c.name.common,
            display::format_population(c.population, &args.locale)
        );
    }
    if shown < countries.len() {
        eprintln!("({} more not shown; raise --limit)", countries.len() - shown);
    }

    if args.stats
        && let Some(s) = stats::population_summary(&countries)
    {
        println!(
            "count={}  total={}  min={}  max={}  mean={}  median={}",
            s.count,
            display::format_population(s.total, &args.locale),
            display::format_population(s.min, &args.locale),
            display::format_population(s.max, &args.locale),
            fmt_stat(s.mean),
            fmt_stat(s.median)
        );
    }

    Ok(())
}
