use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default Mapbox-compatible geocoding endpoint (forward and reverse)
pub const DEFAULT_GEOCODING_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Default ipinfo-compatible IP lookup endpoint
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipinfo.io";

/// Default country filter applied to postal code lookups
pub const DEFAULT_COUNTRY: &str = "US";

/// Default maximum number of addresses returned by reverse geocoding
pub const DEFAULT_ADDRESS_LIMIT: usize = 5;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 6;

/// Environment variable read when no access token is configured
pub const FALLBACK_TOKEN_ENV: &str = "MAPBOX_TOKEN";

#[derive(Debug, Clone, Serialize)]
pub struct AddrgenConfig {
    /// Access token for the geocoding service
    #[serde(skip_serializing)]
    pub access_token: Option<String>,

    /// Base URL of the geocoding service
    pub geocoding_url: String,

    /// Base URL of the IP lookup service
    pub ip_lookup_url: String,

    /// Country filter for postal code lookups
    pub country: String,

    /// Maximum number of addresses to fetch per lookup
    pub address_limit: usize,

    /// Timeout for each outgoing request in seconds
    pub timeout_secs: u64,

    /// Path of the configuration file these settings were read from
    pub config_file: String,
}

const EMPTY_CONFIG: &str = r#"### addrgen configuration file

### access token for the geocoding service (MAPBOX_TOKEN is used when unset)
# access_token = "pk.your-token"

### lookup service endpoints
# geocoding_url = "https://api.mapbox.com/geocoding/v5/mapbox.places"
# ip_lookup_url = "https://ipinfo.io"

### postal code country filter and result size
# country = "US"
# address_limit = 5

### per-request timeout (in seconds)
# timeout_secs = 6
"#;

impl Default for AddrgenConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            address_limit: DEFAULT_ADDRESS_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            config_file: Self::default_config_file_path(),
        }
    }
}

impl AddrgenConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<AddrgenConfig> {
        let mut builder = Config::builder();

        // Add in toml configuration file
        let config_file = match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
                p.clone()
            }
            None => {
                // By default use $HOME/.addrgen/addrgen.toml as the configuration file path
                let addrgen_dir = Self::config_dir()?;
                std::fs::create_dir_all(addrgen_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create addrgen directory: {}", e))?;
                let p = format!("{}/addrgen.toml", addrgen_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
                p
            }
        };

        // Add in settings from the environment (with a prefix of ADDRGEN)
        // E.g., `ADDRGEN_COUNTRY=CA ./addrgen zip 90210` would change the country filter
        builder = builder.add_source(config::Environment::with_prefix("ADDRGEN"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Ok(AddrgenConfig {
            config_file,
            ..Self::from_map(&config, std::env::var(FALLBACK_TOKEN_ENV).ok())
        })
    }

    /// Build a configuration from flattened key-value settings.
    ///
    /// Unknown keys are ignored and unparsable numbers fall back to defaults.
    /// `fallback_token` is used only when `access_token` is absent or blank.
    pub fn from_map(config: &HashMap<String, String>, fallback_token: Option<String>) -> Self {
        let defaults = AddrgenConfig::default();

        let access_token = config
            .get("access_token")
            .cloned()
            .or(fallback_token)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let geocoding_url = config
            .get("geocoding_url")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.geocoding_url);

        let ip_lookup_url = config
            .get("ip_lookup_url")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.ip_lookup_url);

        let country = config
            .get("country")
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.country);

        // A zero limit would make every lookup come back empty
        let address_limit = config
            .get("address_limit")
            .and_then(|s| s.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.address_limit);

        let timeout_secs = config
            .get("timeout_secs")
            .and_then(|s| s.parse().ok())
            .filter(|n: &u64| *n > 0)
            .unwrap_or(defaults.timeout_secs);

        AddrgenConfig {
            access_token,
            geocoding_url,
            ip_lookup_url,
            country,
            address_limit,
            timeout_secs,
            config_file: defaults.config_file,
        }
    }

    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether an access token for the geocoding service is available
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let token = match &self.access_token {
            Some(t) => mask_token(t),
            None => format!("(not set, export {} or set access_token)", FALLBACK_TOKEN_ENV),
        };

        [
            format!("Config File:        {}", self.config_file),
            format!("Access Token:       {}", token),
            format!("Geocoding URL:      {}", self.geocoding_url),
            format!("IP Lookup URL:      {}", self.ip_lookup_url),
            format!("Country:            {}", self.country),
            format!("Address Limit:      {}", self.address_limit),
            format!("Request Timeout:    {} seconds", self.timeout_secs),
        ]
        .join("\n")
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Result<String> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();
        Ok(format!("{}/.addrgen", home_dir))
    }

    /// Default config file path, `$HOME/.addrgen/addrgen.toml`
    pub fn default_config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.addrgen/addrgen.toml", home_dir)
    }

    /// Describe the external services this configuration points at
    pub fn services(&self) -> Vec<ServiceInfo> {
        vec![
            ServiceInfo {
                name: "ip-lookup".to_string(),
                url: self.ip_lookup_url.clone(),
                authenticated: false,
                ready: true,
            },
            ServiceInfo {
                name: "geocoding".to_string(),
                url: self.geocoding_url.clone(),
                authenticated: true,
                ready: self.has_access_token(),
            },
        ]
    }
}

/// An external lookup service and whether it can be used
#[derive(Debug, Serialize, Clone)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct ServiceInfo {
    pub name: String,
    pub url: String,
    pub authenticated: bool,
    pub ready: bool,
}

/// Mask a secret so only its first and last four characters remain visible
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
