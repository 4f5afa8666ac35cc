pub mod browse;
pub mod config;
pub mod generate;

use addrgen::AddrgenConfig;

/// Exit early when the geocoding service cannot be called at all
pub(crate) fn require_access_token(config: &AddrgenConfig) {
    if !config.has_access_token() {
        eprintln!(
            "ERROR: no geocoding access token configured; set access_token in {} or export {}",
            config.config_file,
            addrgen::config::FALLBACK_TOKEN_ENV
        );
        std::process::exit(1);
    }
}
