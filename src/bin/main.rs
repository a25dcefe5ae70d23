//! mdxgen CLI - Convert query models to MDX
//!
//! Usage:
//!   mdxgen convert <model.toml|model.json> [--config <file>] [--output <format>]
//!   mdxgen parse <expression>
//!
//! Examples:
//!   mdxgen convert queries/sales_by_product.toml
//!   mdxgen convert queries/sales_by_product.json --output json
//!   mdxgen parse "{[Product].[Drink], [Product].[Food]}"
//!
//! Set RUST_LOG (e.g. RUST_LOG=mdxgen=debug) to see conversion tracing on stderr.

use clap::{Parser, Subcommand, ValueEnum};
use mdxgen::config::{OutputFormat, Settings};
use mdxgen::convert::convert;
use mdxgen::model::QueryModel;
use mdxgen::parser::{ExpressionParser, MdxParser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdxgen")]
#[command(about = "mdxgen - Convert structured OLAP query models into MDX")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a query model to an MDX statement
    Convert {
        /// Path to the model file (.toml or .json)
        file: PathBuf,

        /// Settings file (defaults to MDXGEN_CONFIG, ./mdxgen.toml, then the user config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (overrides the settings file)
        #[arg(short, long)]
        output: Option<OutputArg>,
    },

    /// Parse an MDX expression and print it normalised
    Parse {
        /// The expression text
        expression: String,

        /// Print the expression tree as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputArg {
    /// MDX text
    Mdx,
    /// Statement tree as JSON
    Json,
    /// Statement tree in debug form
    Debug,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Mdx => OutputFormat::Mdx,
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Debug => OutputFormat::Debug,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            file,
            config,
            output,
        } => cmd_convert(file, config, output),
        Commands::Parse { expression, json } => cmd_parse(&expression, json),
    }
}

fn cmd_convert(file: PathBuf, config: Option<PathBuf>, output: Option<OutputArg>) -> ExitCode {
    let settings = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let model = match QueryModel::from_file(&file) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading model '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let stmt = match convert(&model, &MdxParser, &settings.convert_options()) {
        Ok(stmt) => stmt,
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = output.map(OutputFormat::from).unwrap_or(settings.output.format);
    match format {
        OutputFormat::Mdx => println!("{}", stmt),
        OutputFormat::Json => match serde_json::to_string_pretty(&stmt) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing statement: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Debug => println!("{:#?}", stmt),
    }

    ExitCode::SUCCESS
}

fn cmd_parse(expression: &str, json: bool) -> ExitCode {
    let expr = match MdxParser.parse_expression(expression) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&expr) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing expression: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", expr);
    }

    ExitCode::SUCCESS
}
