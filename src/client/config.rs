//! Client configuration options.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Environment variable holding the API base URL.
pub const URL_ENV: &str = "SEPTOTRIP_URL";
/// Environment variable holding the platform (`web`, `android`, `ios`).
pub const PLATFORM_ENV: &str = "SEPTOTRIP_PLATFORM";

/// The kind of host the client runs in.
///
/// Reported in the User-Agent. Reading mobile file references is up to the
/// [`FileResolver`](crate::FileResolver) the client was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Browser or desktop host; files are in-memory blobs.
    #[default]
    Web,
    /// Android host; files are `content://` references.
    Android,
    /// iOS host; files are `file://` references.
    Ios,
}

impl Platform {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Platform::Web),
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(Error::Config(format!("unknown platform `{other}`"))),
        }
    }
}

/// Configuration for the Septotrip client.
///
/// # Example
///
/// ```
/// use septotrip::{ClientConfig, Platform};
/// use std::time::Duration;
///
/// let config = ClientConfig::new("https://api.septotrip.test/")
///     .unwrap()
///     .with_platform(Platform::Android)
///     .with_timeout(Duration::from_secs(20));
/// assert_eq!(config.base_url(), "https://api.septotrip.test");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    /// Host platform
    pub platform: Platform,
    /// Request timeout; none by default
    pub timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the API at `base_url`.
    ///
    /// The URL must be absolute; trailing slashes are dropped so that
    /// resource paths (which start with `/`) can be appended directly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref().trim();
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Config(format!("`{base_url}` cannot be a base URL")));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            platform: Platform::default(),
            timeout: None,
            user_agent: default_user_agent(Platform::default()),
        })
    }

    /// Build a configuration from `SEPTOTRIP_URL` and `SEPTOTRIP_PLATFORM`.
    pub fn from_env() -> Result<Self> {
        let url = env::var(URL_ENV).map_err(|_| Error::Config(format!("{URL_ENV} must be set")))?;
        let config = Self::new(url)?;

        match env::var(PLATFORM_ENV) {
            Ok(platform) => Ok(config.with_platform(platform.parse()?)),
            Err(_) => Ok(config),
        }
    }

    /// The API base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the host platform.
    ///
    /// Also refreshes the User-Agent unless a custom one was set.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        if self.user_agent == default_user_agent(self.platform) {
            self.user_agent = default_user_agent(platform);
        }
        self.platform = platform;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent(platform: Platform) -> String {
    format!("septotrip-rs/{} ({platform})", env!("CARGO_PKG_VERSION"))
}
