use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schema_structgen::{generate_go_source_from_path, GeneratorConfig, StructgenError};

/// Generate Go structs from a JSON Schema document.
#[derive(Parser, Debug)]
#[command(name = "schema-structgen", author, version, about, long_about = None)]
struct Cli {
    /// The input JSON Schema file
    #[arg(short, long)]
    input: PathBuf,

    /// The output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The package that the structs are created in (default: main)
    #[arg(short, long)]
    package: Option<String>,

    /// Emit optional object fields as pointers
    #[arg(long)]
    pointers: bool,

    /// TOML file with generator settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail when any field or type could not be resolved
    #[arg(long)]
    strict: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn generator_config(&self) -> Result<GeneratorConfig, StructgenError> {
        let config = match &self.config {
            Some(path) => GeneratorConfig::from_path(path)?,
            None => GeneratorConfig::default(),
        }
        .with_overrides(self.package.as_deref(), self.pointers);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), StructgenError> {
    let config = cli.generator_config()?;
    tracing::debug!(?config, input = %cli.input.display(), "generating");

    let (source, error) = generate_go_source_from_path(&cli.input, &config)?;
    if let Some(err) = error {
        if cli.strict {
            return Err(err);
        }
        eprintln!("warning: failure generating structs: {err}");
    }

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, source)?;
        }
        None => print!("{source}"),
    }
    Ok(())
}
