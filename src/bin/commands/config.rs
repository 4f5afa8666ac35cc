use addrgen::lens::utils::OutputFormat;
use addrgen::{mask_token, AddrgenConfig, ServiceInfo};
use clap::Args;
use serde::Serialize;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Also list the lookup services and whether they are usable
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Serialize)]
struct ConfigInfo<'a> {
    access_token: Option<String>,
    #[serde(flatten)]
    config: &'a AddrgenConfig,
    services: Vec<ServiceInfo>,
}

pub fn run(config: &AddrgenConfig, args: ConfigArgs, output_format: OutputFormat) {
    let ConfigArgs { verbose } = args;

    if output_format.is_json() {
        let info = ConfigInfo {
            access_token: config.access_token.as_deref().map(mask_token),
            config,
            services: config.services(),
        };
        match output_format.to_json(&info) {
            Some(s) => println!("{}", s),
            None => {
                eprintln!("ERROR: unable to serialize configuration");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", config.summary());

    if verbose {
        let services = config.services();
        match output_format {
            OutputFormat::Psv => {
                println!("\nname|url|authenticated|ready");
                for s in &services {
                    println!("{}|{}|{}|{}", s.name, s.url, s.authenticated, s.ready);
                }
            }
            _ => {
                let mut table = tabled::Table::new(services);
                if output_format == OutputFormat::Markdown {
                    table.with(tabled::settings::Style::markdown());
                } else {
                    table.with(tabled::settings::Style::rounded());
                }
                println!("\n{}", table);
            }
        }
    }
}
