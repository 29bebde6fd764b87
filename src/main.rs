use abcxyz_policy::io::{loader, reporting, suppliers, synthetic};
use abcxyz_policy::{logging, PolicyConfig, PolicyPipeline, PolicyRun, PriceEntry, SupplierResolver};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "abcxyz")]
#[command(version)]
#[command(about = "ABC-XYZ classification and stock policy without on-hand data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify SKUs from CSV exports and write the policy reports
    Run(RunArgs),
    /// Run the pipeline over a generated dataset
    Demo(DemoArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Price table (item code, name, average price), CSV or .xlsx
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Dispatch-note movements, CSV or .xlsx
    #[arg(long)]
    guias: Option<PathBuf>,

    /// Stock issue movements, CSV or .xlsx
    #[arg(long)]
    salidas: Option<PathBuf>,

    /// Single movement file, used only without --guias/--salidas
    #[arg(long)]
    issues: Option<PathBuf>,

    /// HELI item list
    #[arg(long)]
    heli: Option<PathBuf>,

    /// TVH item list
    #[arg(long)]
    tvh: Option<PathBuf>,

    /// YAML policy file (default: ./config.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for generated reports
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,
}

#[derive(clap::Args)]
struct DemoArgs {
    #[arg(long, default_value_t = 40)]
    skus: usize,

    #[arg(long, default_value_t = 12)]
    months: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// YAML policy file (default: ./config.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Demo(args) => demo(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    // 1. SETUP CONFIGURATION
    let config = PolicyConfig::load(args.config.as_deref()).context("loading policy config")?;

    // 2. LOAD MOVEMENTS
    let movement_files: Vec<&Path> = match (&args.guias, &args.salidas, &args.issues) {
        (None, None, Some(issues)) => vec![issues.as_path()],
        (None, None, None) => bail!("missing movements: provide --guias and/or --salidas, or --issues"),
        (guias, salidas, _) => guias.iter().chain(salidas.iter()).map(|p| p.as_path()).collect(),
    };
    let consumption = loader::read_consumption_files(&movement_files).context("reading movements")?;

    // 3. LOAD PRICES AND SUPPLIER LISTS
    let prices: Vec<PriceEntry> = match &args.prices {
        Some(path) => loader::read_prices_file(path)
            .with_context(|| format!("reading prices from {}", path.display()))?,
        None => Vec::new(),
    };
    let heli = args.heli.as_deref().map(suppliers::load_heli_codes).unwrap_or_default();
    let tvh = args.tvh.as_deref().map(suppliers::load_tvh_codes).unwrap_or_default();

    // 4. CLASSIFY AND SIZE
    let pipeline = PolicyPipeline::new(config, SupplierResolver::standard(heli, tvh))?;
    let result = pipeline.run(&consumption, &prices)?;

    // 5. EXPORT RESULTS
    export(&args.output_dir, &result)
}

fn demo(args: DemoArgs) -> Result<()> {
    let config = PolicyConfig::load(args.config.as_deref()).context("loading policy config")?;

    let dataset = synthetic::generate_dataset(args.skus, args.months, args.seed)?;
    println!(
        "Generated {} movements for {} SKUs (seed {})",
        dataset.consumption.len(),
        dataset.prices.len(),
        args.seed
    );

    let pipeline = PolicyPipeline::new(config, SupplierResolver::standard(HashSet::new(), HashSet::new()))?;
    let result = pipeline.run(&dataset.consumption, &dataset.prices)?;

    export(&args.output_dir, &result)
}

fn export(output_dir: &Path, result: &PolicyRun) -> Result<()> {
    reporting::write_run(output_dir, result)
        .with_context(|| format!("writing reports to {}", output_dir.display()))?;

    println!(
        "OK | items={} | alerts={} | out={}",
        result.profiles.len(),
        result.alerts.len(),
        output_dir.display()
    );
    Ok(())
}
