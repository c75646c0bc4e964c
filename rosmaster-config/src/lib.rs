use serde::{Deserialize, Serialize};
use std::{
    fmt, fs, io,
    net::IpAddr,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use url::Url;

/// Environment variable holding the default master URI.
pub const ROS_MASTER_URI_ENV_VAR: &str = "ROS_MASTER_URI";

pub const DEFAULT_CALLER_ID: &str = "anon";

#[derive(Debug, thiserror::Error)]
pub enum ConfigReadError {
    #[error("Error in configuration file {}", .path.display())]
    ConfigToml {
        path: PathBuf,
        #[source]
        error: Box<toml::de::Error>,
    },

    #[error("Ecountered an IO error while reading the configuration file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: Box<io::Error>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MasterUriError {
    #[error(
        "No master URI given. Pass --master_uri or set ROS_MASTER_URI, \
         e.g. `export ROS_MASTER_URI=http://localhost:11311`"
    )]
    Unset,

    #[error("Couldn't parse the master URI '{uri}'")]
    Invalid {
        uri: String,
        #[source]
        error: url::ParseError,
    },

    #[error("The master URI '{uri}' uses unsupported scheme '{scheme}', expected http or https")]
    UnsupportedScheme { uri: String, scheme: String },

    #[error("Couldn't parse the master URI '{_0}' into a host:port pair")]
    MissingHostOrPort(String),
}

/// A validated XML-RPC endpoint of a ROS master.
///
/// The master is always addressed as an explicit `host:port` pair over
/// http(s), e.g. `http://localhost:11311/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterUri {
    url: Url,
    host: String,
    port: u16,
}

impl MasterUri {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The master lives on this machine: `localhost`, a loopback address,
    /// or an IPv4 link-local address.
    pub fn is_local(&self) -> bool {
        if self.host.eq_ignore_ascii_case("localhost") {
            return true;
        }
        self.host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(is_local_address)
            .unwrap_or(false)
    }
}

impl FromStr for MasterUri {
    type Err = MasterUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MasterUriError::Unset);
        }

        let url = Url::parse(s).map_err(|error| MasterUriError::Invalid {
            uri: s.to_owned(),
            error,
        })?;

        match url.scheme() {
            "http" | "https" => (),
            scheme => {
                return Err(MasterUriError::UnsupportedScheme {
                    uri: s.to_owned(),
                    scheme: scheme.to_owned(),
                })
            }
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| MasterUriError::MissingHostOrPort(s.to_owned()))?
            .to_owned();

        // `Url` drops a port equal to the scheme default, so fall back to
        // checking the authority text for an explicit one
        let port = match url.port() {
            Some(port) => port,
            None if has_explicit_port(s) => url
                .port_or_known_default()
                .ok_or_else(|| MasterUriError::MissingHostOrPort(s.to_owned()))?,
            None => return Err(MasterUriError::MissingHostOrPort(s.to_owned())),
        };

        Ok(MasterUri { url, host, port })
    }
}

impl fmt::Display for MasterUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn has_explicit_port(uri: &str) -> bool {
    let authority = uri
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(uri)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    match authority.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Loopback or IPv4 link-local (169.254.0.0/16)
pub fn is_local_address(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}

/// Optional on-disk client configuration.
///
/// Every value here is a fallback, command line flags and the environment
/// win over it.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn read<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigReadError> {
        let path = config_path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigReadError::Io {
            path: path.to_owned(),
            error: Box::new(e),
        })?;
        Self::from_str(&content).map_err(|e| ConfigReadError::ConfigToml {
            path: path.to_owned(),
            error: Box::new(e),
        })
    }

    /// First non-empty of `explicit` and the configured URI.
    /// There is no built-in default endpoint.
    pub fn resolve_master_uri(&self, explicit: Option<&str>) -> Result<MasterUri, MasterUriError> {
        [explicit, self.master_uri.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|uri| !uri.is_empty())
            .ok_or(MasterUriError::Unset)?
            .parse()
    }

    pub fn resolve_caller_id(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.caller_id.as_deref())
            .unwrap_or(DEFAULT_CALLER_ID)
            .to_owned()
    }

    pub fn resolve_timeout(&self, explicit_secs: Option<u64>) -> Option<Duration> {
        explicit_secs.or(self.timeout_secs).map(Duration::from_secs)
    }
}

impl FromStr for ClientConfig {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
