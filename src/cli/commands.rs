use clap::{Args, Parser, Subcommand, ValueEnum};
use mobility_explorer::{
    config::Config,
    eligibility::EligibilityStatus,
    filter::{FilterInput, Persona, MAX_INCOME_USD},
};

#[derive(Parser)]
#[command(name = "mobility-explorer")]
#[command(about = "Explore which countries offer a visa pathway for your persona, age and income")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (extension optional)
    #[arg(short, long, global = true, default_value = "config/default")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive explorer
    Tui,

    /// Show eligibility for one country
    Check {
        /// Country name (alias spellings are accepted)
        country: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Classify every country on the map
    Scan {
        #[command(flatten)]
        filter: FilterArgs,

        /// Only show countries with this status (eligible, ineligible, unknown)
        #[arg(short, long)]
        status: Option<EligibilityStatus>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// List matching visas under each country
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the loaded visa rules
    Rules {
        /// Only show this country
        country: Option<String>,
    },

    /// Show configuration and data status
    Init,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Persona: retiree, digital_nomad, remote_worker, second_home
    #[arg(short, long)]
    pub persona: Option<Persona>,

    /// Age in years
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(18..=85))]
    pub age: Option<u32>,

    /// Annual income in USD
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=MAX_INCOME_USD as i64))]
    pub income: Option<u32>,
}

impl FilterArgs {
    /// Command-line values over the configured defaults.
    pub fn resolve(&self, config: &Config) -> FilterInput {
        let defaults = config.initial_filter();
        FilterInput::new(
            self.persona.clone().unwrap_or(defaults.persona),
            self.age.unwrap_or(defaults.age),
            self.income.unwrap_or(defaults.income_usd),
        )
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_arguments() {
        let cli = Cli::try_parse_from([
            "mobility-explorer", "scan", "--persona", "remote_worker", "--age", "40",
            "--income", "90000", "--status", "eligible", "--format", "json",
        ])
        .unwrap();

        let Commands::Scan { filter, status, format, verbose } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(status, Some(EligibilityStatus::Eligible));
        assert_eq!(format, OutputFormat::Json);
        assert!(!verbose);

        let resolved = filter.resolve(&Config::default());
        assert_eq!(resolved, FilterInput::new(Persona::RemoteWorker, 40, 90_000));
    }

    #[test]
    fn filter_falls_back_to_config() {
        let cli = Cli::try_parse_from(["mobility-explorer", "check", "Viet Nam", "--age", "60"]).unwrap();
        let Commands::Check { country, filter, .. } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(country, "Viet Nam");
        assert_eq!(filter.resolve(&Config::default()), FilterInput::new(Persona::Retiree, 60, 50_000));
    }

    #[test]
    fn rejects_out_of_range_age() {
        assert!(Cli::try_parse_from(["mobility-explorer", "scan", "--age", "17"]).is_err());
        assert!(Cli::try_parse_from(["mobility-explorer", "scan", "--income", "200001"]).is_err());
    }
}
