mod cli;

use clap::Parser;
use cli::{Cli, Commands, FilterArgs, OutputFormat};
use colored::*;
use std::collections::BTreeMap;
use mobility_explorer::{
    config::Config,
    eligibility::{evaluate_all, evaluate_country, EligibilityResult, EligibilityStatus, MatchPath},
    error::{self, ExplorerError},
    loader::{load_dataset, Dataset, FileDataSource},
    tui,
    utils,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Tui));

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> error::Result<()> {
    let config = Config::load(&cli.config)
        .map_err(|e| ExplorerError::Other(e.context(format!("failed to load configuration from {}", cli.config))))?;

    match cli.command {
        Commands::Tui => {
            info!("Starting interactive explorer...");
            tui::run_tui(config).await
        }

        Commands::Check { country, filter, format } => {
            info!("Checking eligibility for {}", country);
            check_country(&config, &country, &filter, format).await
        }

        Commands::Scan { filter, status, format, verbose } => {
            info!("Scanning all countries...");
            scan_countries(&config, &filter, status, format, verbose).await
        }

        Commands::Rules { country } => list_rules(&config, country.as_deref()).await,

        Commands::Init => {
            info!("Initializing...");
            initialize(&config).await
        }
    }
}

/// Log to stderr. The TUI owns the terminal, so it stays silent unless
/// `RUST_LOG` asks otherwise.
fn init_tracing(interactive: bool) {
    let default = if interactive { "off" } else { "mobility_explorer=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load(config: &Config) -> Dataset {
    let source = FileDataSource::from_config(config);
    let dataset = load_dataset(&source, &config.normalizer()).await;
    if !dataset.is_loaded() {
        warn!("Data only partially loaded; affected countries show as no data");
    }
    dataset
}

fn resolve_filter(args: &FilterArgs, config: &Config) -> mobility_explorer::filter::FilterInput {
    let filter = args.resolve(config);
    if !filter.persona.is_recognized() {
        warn!("Unrecognized persona {:?}; no visa will match", filter.persona.label());
    }
    filter
}

async fn check_country(
    config: &Config,
    country: &str,
    args: &FilterArgs,
    format: OutputFormat,
) -> error::Result<()> {
    let filter = resolve_filter(args, config);
    let dataset = load(config).await;
    let normalizer = config.normalizer();
    let name = normalizer.normalize(country);

    let result = evaluate_country(&filter, dataset.rules.as_ref(), &normalizer, country);

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "country": name,
            "filter": filter,
            "color": result.status.color_hex(),
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", format!("=== {} ===", name).cyan().bold());
    println!(
        "Filter: {} | age {} | income {}",
        filter.persona.label(),
        filter.age,
        utils::format_usd(filter.income_usd)
    );
    println!("Status: {}", utils::colored_status(result.status));

    if dataset.geometry.as_ref().is_some_and(|g| g.get(&name).is_none()) {
        println!("{}", "Note: this country is not on the map".yellow());
    }

    match result.status {
        EligibilityStatus::Unknown => {
            println!("{}", "No rules in the demo data for this country.".dimmed());
        }
        EligibilityStatus::Ineligible => {
            println!("No matching visa in demo for current filters.");
        }
        EligibilityStatus::Eligible => {
            println!("\n{}", "Matching visas:".yellow());
            for visa in &result.matches {
                let via = match visa.path {
                    MatchPath::Persona => String::new(),
                    MatchPath::YoungRetireeFallback => " (fallback: under minimum age)".yellow().to_string(),
                };
                println!(
                    "  {} - {}{}",
                    visa.rule.label.green().bold(),
                    utils::format_thresholds(visa.rule.min_age, visa.rule.min_income_usd),
                    via
                );
                if let Some(notes) = &visa.rule.notes {
                    println!("    {}", notes.dimmed());
                }
            }
        }
    }

    println!("\n{}", "Demo data only. Not legal advice.".dimmed());
    Ok(())
}

async fn scan_countries(
    config: &Config,
    args: &FilterArgs,
    status: Option<EligibilityStatus>,
    format: OutputFormat,
    verbose: bool,
) -> error::Result<()> {
    let filter = resolve_filter(args, config);
    let dataset = load(config).await;

    if dataset.geometry.is_none() {
        warn!("No world geometry loaded from {}; nothing to scan", config.data.world_path);
    }

    let results = evaluate_all(&filter, &dataset);
    let rows: Vec<_> = match status {
        Some(status) => results.with_status(status).collect(),
        None => results.iter().collect(),
    };

    if format == OutputFormat::Json {
        let countries: BTreeMap<&str, &EligibilityResult> = rows.iter().copied().collect();
        let output = serde_json::json!({
            "filter": filter,
            "summary": results.summary(),
            "countries": countries,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let summary = results.summary();
    println!("\n{}", "=== Scan Results ===".cyan().bold());
    println!(
        "Filter:       {} | age {} | income {}",
        filter.persona.label(),
        filter.age,
        utils::format_usd(filter.income_usd)
    );
    println!("Countries:    {}", summary.total);
    println!("Eligible:     {} ✓", summary.eligible.to_string().green());
    println!("Not eligible: {}", summary.ineligible.to_string().bright_black());
    println!("No data yet:  {}", summary.unknown.to_string().dimmed());

    if rows.is_empty() {
        return Ok(());
    }

    let widths = [32, 12, 8];
    println!();
    utils::print_table_border(60);
    utils::print_table_row(&["Country", "Status", "Matches"], &widths);
    utils::print_table_border(60);

    for (name, result) in &rows {
        // Pad before coloring so ANSI codes don't skew the columns.
        let status = utils::pad(&result.status.to_string(), widths[1]);
        println!(
            "{}  {}  {}",
            utils::pad(name, widths[0]),
            utils::paint_status(result.status, &status),
            result.matches.len()
        );
        if verbose {
            for visa in &result.matches {
                println!(
                    "    - {} ({})",
                    visa.rule.label,
                    utils::format_thresholds(visa.rule.min_age, visa.rule.min_income_usd)
                );
            }
        }
    }
    utils::print_table_border(60);

    Ok(())
}

async fn list_rules(config: &Config, country: Option<&str>) -> error::Result<()> {
    let dataset = load(config).await;
    let normalizer = config.normalizer();

    let Some(rules) = dataset.rules.as_ref() else {
        return Err(ExplorerError::Data(format!(
            "no visa rules could be loaded from {}",
            config.data.rules_path
        )));
    };

    let selected: Vec<_> = match country {
        Some(name) => {
            let canonical = normalizer.normalize(name);
            let entry = rules
                .get(&canonical)
                .ok_or_else(|| ExplorerError::UnknownCountry(canonical.clone()))?;
            vec![entry]
        }
        None => rules.iter().collect(),
    };

    for entry in selected {
        println!("{}", entry.country_name.cyan().bold());
        if entry.visas.is_empty() {
            println!("  {}", "(no usable visa entries)".dimmed());
        }
        for visa in &entry.visas {
            let categories: Vec<&str> = visa.categories.iter().map(String::as_str).collect();
            println!(
                "  {} [{}] - {}",
                visa.label.bold(),
                categories.join(", "),
                utils::format_thresholds(visa.min_age, visa.min_income_usd)
            );
            if let Some(notes) = &visa.notes {
                println!("    {}", notes.dimmed());
            }
        }
    }

    Ok(())
}

async fn initialize(config: &Config) -> error::Result<()> {
    println!("{}", "Mobility Explorer".green().bold());
    println!("{}", "✓ Configuration loaded".green());

    let dataset = load(config).await;
    match &dataset.rules {
        Some(rules) => println!(
            "{}",
            format!("✓ Rules loaded: {} countries, {} visas", rules.len(), rules.visa_count()).green()
        ),
        None => println!("{}", format!("✗ Rules unavailable ({})", config.data.rules_path).red()),
    }
    match &dataset.geometry {
        Some(geometry) => println!("{}", format!("✓ Geometry loaded: {} countries", geometry.len()).green()),
        None => println!("{}", format!("✗ Geometry unavailable ({})", config.data.world_path).red()),
    }

    println!("\n{}", "Configuration:".cyan());
    let rendered = toml::to_string_pretty(config).map_err(|e| ExplorerError::Config(e.to_string()))?;
    for line in rendered.lines() {
        println!("  {}", line);
    }

    println!("\n{}", "Ready to use! Try running:".cyan());
    println!("  {} to check one country", "mobility-explorer check Portugal --age 62".yellow());
    println!("  {} to list eligible countries", "mobility-explorer scan --status eligible".yellow());
    println!("  {} to launch the explorer", "mobility-explorer tui".yellow());
    Ok(())
}
