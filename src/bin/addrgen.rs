use addrgen::lens::utils::OutputFormat;
use addrgen::AddrgenConfig;
use clap::{Parser, Subcommand};
use tracing::Level;

mod commands;

use commands::browse::BrowseArgs;
use commands::config::ConfigArgs;
use commands::generate::GenerateCommandArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.addrgen/addrgen.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up nearby street addresses for an IP address or a postal code
    #[clap(visible_alias = "gen")]
    Generate(GenerateCommandArgs),

    /// Interactive address panels driven by line commands on stdin
    Browse(BrowseArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

fn main() {
    // values from a local .env file behave like exported variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(Level::DEBUG)
            .init();
    }

    let config = match AddrgenConfig::new(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: unable to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::run(&config, args, cli.format),
        Commands::Browse(args) => commands::browse::run(&config, args, cli.format),
        Commands::Config(args) => commands::config::run(&config, args, cli.format),
    }
}
