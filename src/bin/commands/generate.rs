use addrgen::lens::address::{AddressLens, GenerateArgs, HttpGeoService};
use addrgen::lens::utils::OutputFormat;
use addrgen::AddrgenConfig;
use clap::Args;
use serde_json::json;

/// Arguments for the Generate command
#[derive(Args)]
pub struct GenerateCommandArgs {
    #[clap(flatten)]
    pub lookup: GenerateArgs,

    /// Maximum number of addresses (overrides address_limit from the config)
    #[clap(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn run(config: &AddrgenConfig, args: GenerateCommandArgs, output_format: OutputFormat) {
    let GenerateCommandArgs { lookup, limit } = args;

    super::require_access_token(config);

    let service = HttpGeoService::new(config);
    let limit = limit.filter(|n| *n > 0).unwrap_or(config.address_limit);
    let lens = AddressLens::new(&service, limit);

    match lens.generate(&lookup) {
        Ok(report) => {
            println!("{}", lens.format_report(&report, &output_format));
        }
        Err(e) => {
            if output_format.is_json() {
                let value = json!({
                    "query": lookup.query.trim(),
                    "mode": lookup.mode,
                    "error": e.to_string(),
                });
                if let Some(s) = output_format.to_json(&value) {
                    println!("{}", s);
                }
            }
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}
