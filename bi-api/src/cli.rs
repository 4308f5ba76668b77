use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dwh_sim::Preset;

#[derive(Debug, Parser)]
#[command(name = "bi-api")]
#[command(about = "Synthetic software-delivery warehouse with a BI service and defect predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a fresh warehouse and replace the stored tables and views
    Generate {
        /// Parameter set, defaults to the configured one
        #[arg(long)]
        preset: Option<Preset>,
        /// Seed for a reproducible run, defaults to the configured one
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the views, dashboard and predictor over HTTP
    Serve {
        /// Regenerate the warehouse before serving
        #[arg(long)]
        fresh: bool,
    },
    /// Estimate defects for a planned project
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        effort: f64,
        #[arg(long, allow_negative_numbers = true)]
        maturity: i64,
        /// Project name shown on the chart
        #[arg(long)]
        name: Option<String>,
        /// Also write the Rayleigh curve page to this file
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Write the dashboard to a standalone HTML file
    Render {
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_with_preset_and_seed() {
        let cli = Cli::try_parse_from(["bi-api", "generate", "--preset", "Startup", "--seed", "42"])
            .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Generate {
                preset: Some(Preset::Startup),
                seed: Some(42)
            }
        ));
    }

    #[test]
    fn predict_requires_effort_and_maturity() {
        assert!(Cli::try_parse_from(["bi-api", "predict", "--effort", "1500"]).is_err());

        let cli =
            Cli::try_parse_from(["bi-api", "predict", "--effort", "1500", "--maturity", "3"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Predict {
                maturity: 3,
                chart: None,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_preset() {
        assert!(Cli::try_parse_from(["bi-api", "generate", "--preset", "galactic"]).is_err());
    }
}
