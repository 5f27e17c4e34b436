use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use bank_services::{BankConfig, DEFAULT_SERVERS, DEFAULT_TIME_UNIT, error::ConfigError};
use clap::{Args, Parser, Subcommand};
use simulator::{
    input::{self, InputError},
    reporter::SimulationReporter,
    scenario::{ScenarioConfig, ScenarioError, ScenarioRunner},
    workload::{Workload, WorkloadError},
};
use thiserror::Error;
use tracing::{Level, error};

/// Tick length used when `--time-interval` is not given.
const DEFAULT_TIME_INTERVAL_MS: u64 = DEFAULT_TIME_UNIT.as_millis() as u64;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate customers being served at a bank", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log every step the bank takes
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a customer file against the bank
    Run(RunArgs),
    /// Write a random customer file
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Customer file: one `id arrival_time service_duration` per line
    #[arg(long = "file-name", value_name = "PATH")]
    file_name: PathBuf,

    /// Number of service counters
    #[arg(long = "server-num", default_value_t = DEFAULT_SERVERS)]
    server_num: usize,

    /// Milliseconds of real time per tick
    #[arg(long = "time-interval", default_value_t = DEFAULT_TIME_INTERVAL_MS)]
    time_interval: u64,

    /// Customers served at once. Defaults to the number of servers
    #[arg(long)]
    attendants: Option<usize>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of customers
    #[arg(long)]
    count: usize,

    /// Mean arrivals per tick
    #[arg(long, default_value_t = 0.5)]
    arrival_rate: f64,

    /// Erlang tasks per visit
    #[arg(long, default_value_t = 2)]
    service_tasks: u64,

    /// Tasks completed per tick
    #[arg(long, default_value_t = 1.0)]
    service_rate: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the customers. Defaults to stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Workload(#[from] WorkloadError),
    #[error("Unable to write customers: {0}")]
    Io(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Command::Run(args) => run(args).await,
        Command::Generate(args) => generate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: RunArgs) -> Result<(), CliError> {
    let customers = input::load(&args.file_name)?;

    let config = BankConfig::builder()
        .servers(args.server_num)
        .maybe_attendants(args.attendants)
        .time_unit(Duration::from_millis(args.time_interval))
        .build()?;

    let name = args.file_name.display().to_string();
    let reporter = SimulationReporter::new(&name, &config);
    reporter.print_roster(&customers);

    let served = ScenarioRunner::new(ScenarioConfig {
        name: name.clone(),
        bank: config,
        customers,
    })
    .run()
    .await?;

    reporter.report(&served);

    Ok(())
}

fn generate(args: GenerateArgs) -> Result<(), CliError> {
    let customers = Workload::builder()
        .count(args.count)
        .arrival_rate(args.arrival_rate)
        .service_tasks(args.service_tasks)
        .service_rate(args.service_rate)
        .maybe_seed(args.seed)
        .build()?
        .generate();

    match args.output {
        Some(path) => input::write_customers(BufWriter::new(File::create(path)?), &customers)?,
        None => input::write_customers(io::stdout().lock(), &customers)?,
    }

    Ok(())
}
