use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod command;

use command::{diff, export, infuse, pull, push, squeeze, status};

#[derive(Parser)]
#[command(name = "sfc-locale")]
#[command(
    about = "Squeeze locale messages out of single-file components and infuse them back",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Squeeze locale messages from single-file components
    #[command(alias = "sqz")]
    Squeeze(squeeze::SqueezeArgs),

    /// Infuse locale messages to single-file components
    #[command(alias = "inf")]
    Infuse(infuse::InfuseArgs),

    /// Pull locale messages from localization service
    #[command(alias = "pl")]
    Pull(pull::PullArgs),

    /// Push locale messages to localization service
    #[command(alias = "ph")]
    Push(push::PushArgs),

    /// Export locale messages from localization service
    #[command(alias = "ex")]
    Export(export::ExportArgs),

    /// Diff locale messages between local and localization service
    #[command(alias = "df")]
    Diff(diff::DiffArgs),

    /// Indicate translation status from localization service
    #[command(alias = "st")]
    Status(status::StatusArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Squeeze(args) => squeeze::run(args),
        Commands::Infuse(args) => infuse::run(args),
        Commands::Pull(args) => pull::run(args).await,
        Commands::Push(args) => push::run(args).await,
        Commands::Export(args) => export::run(args).await,
        Commands::Diff(args) => diff::run(args).await,
        Commands::Status(args) => status::run(args).await,
    }
}
