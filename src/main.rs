use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use referee::catalog::{Catalog, Category};
use referee::compare::{compare, ComparisonRequest};
use referee::scoring::{Priority, PriorityWeights};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SELECTION: i32 = 2;
const EXIT_IO: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON document
    Json,
    /// Comparison table as CSV
    Csv,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Category to compare within (api, cloud-service, database)
    #[arg(short = 'k', long)]
    category: Category,

    /// Option ids to compare (2 to 4, as shown by `referee list`)
    #[arg(required = true, num_args = 1..)]
    options: Vec<String>,

    /// Weight for cost (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    cost: Option<u8>,

    /// Weight for performance (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    performance: Option<u8>,

    /// Weight for ease of use (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    ease_of_use: Option<u8>,

    /// Weight for scalability (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    scalability: Option<u8>,

    /// Weight for reliability (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    reliability: Option<u8>,

    /// A requirement to record with the result (repeatable; newlines split entries)
    #[arg(short = 'r', long = "requirement")]
    requirements: Vec<String>,

    /// A constraint to record with the result (repeatable; newlines split entries)
    #[arg(short = 'x', long = "constraint")]
    constraints: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CompareArgs {
    /// Config weights with any command-line overrides applied
    fn weights(&self, base: PriorityWeights) -> PriorityWeights {
        let overrides = [
            (Priority::Cost, self.cost),
            (Priority::Performance, self.performance),
            (Priority::EaseOfUse, self.ease_of_use),
            (Priority::Scalability, self.scalability),
            (Priority::Reliability, self.reliability),
        ];
        let mut weights = base;
        for (priority, value) in overrides {
            if let Some(v) = value {
                weights.set(priority, v);
            }
        }
        weights
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare 2-4 options and recommend one
    Compare(CompareArgs),
    /// List categories and their options
    List {
        /// Only list this category
        category: Option<Category>,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "referee")]
#[command(about = "Compare technical options and understand the trade-offs", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/referee/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Free text arrives one entry per line; the core only forwards the entries.
fn split_entries(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split('\n'))
        .map(str::to_string)
        .collect()
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    if let Commands::Init = cli.command {
        if let Err(e) = referee::config::run_init_wizard(cli.config.map(PathBuf::from)) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    if cli.verbose {
        match &config_path {
            Some(p) => eprintln!("Using config file {}", p.display()),
            None => {
                if let Ok(p) = referee::config::get_config_path() {
                    eprintln!("Using config file {} (if present)", p.display());
                }
            }
        }
    }
    let config =match referee::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = referee::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Load catalog (once; shared read-only from here on)
    let catalog = match &config.catalog {
        Some(path) => {
            if cli.verbose {
                eprintln!("Loading catalog from {}", path.display());
            }
            referee::catalog::load_catalog(path)
        }
        None => {
            if cli.verbose {
                eprintln!("Using built-in catalog");
            }
            Catalog::builtin().map_err(anyhow::Error::from)
        }
    };
    let catalog = match catalog {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Catalog error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        for category in catalog.categories() {
            eprintln!(
                "  {}: {} options",
                category,
                catalog.options(category).len()
            );
        }
    }

    let use_colors = referee::output::should_use_colors();

    match cli.command {
        Commands::List { category } => {
            println!(
                "{}",
                referee::output::format_catalog(&catalog, category, use_colors)
            );
        }
        Commands::Compare(args) => {
            let weights = args.weights(config.effective_weights());
            if let Err(errors) = referee::scoring::validate_weights(&weights) {
                eprintln!("Priority errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            if cli.verbose {
                let summary: Vec<String> = Priority::ALL
                    .iter()
                    .map(|p| format!("{}={}", p.key(), weights.get(*p)))
                    .collect();
                eprintln!("Priorities: {}", summary.join(", "));
            }

            let request = ComparisonRequest {
                category: args.category,
                selected: args.options.clone(),
                weights,
                requirements: split_entries(&args.requirements),
                constraints: split_entries(&args.constraints),
            };

            let result = match compare(&catalog, request) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Invalid selection: {}", e);
                    if let referee::compare::CompareError::Catalog(_) = e {
                        let available: Vec<&str> = catalog
                            .options(args.category)
                            .iter()
                            .map(|o| o.id.as_str())
                            .collect();
                        eprintln!("Available in {}: {}", args.category, available.join(", "));
                    }
                    std::process::exit(EXIT_SELECTION);
                }
            };

            if cli.verbose {
                for scored in &result.ranked {
                    eprintln!("{}", referee::output::format_breakdown(scored));
                }
            }

            // Files never get color codes
            let colors_for_output = use_colors && args.output.is_none();
            let rendered = match args.format {
                OutputFormat::Text => Ok(referee::output::format_report(&result, colors_for_output)),
                OutputFormat::Json => referee::output::format_json(&result),
                OutputFormat::Csv => Ok(referee::output::format_csv(&result)),
            };
            let rendered = match rendered {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            };

            match &args.output {
                Some(path) => {
                    if let Err(e) = referee::output::save_export(path, &rendered) {
                        eprintln!("Export failed: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                    println!("Results written to {}", path.display());
                }
                None => println!("{}", rendered.trim_end()),
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Compared {} options in {:?}",
                    result.ranked.len(),
                    start_time.elapsed()
                );
            }
        }
        // Runs before config loading, see above
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
