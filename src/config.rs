//! Client configuration
//!
//! A resolved configuration value is handed to the client constructor; the
//! core never reads ambient globals. `from_env` exists for binaries and tests
//! that want the conventional environment variables.

use secrecy::{ExposeSecret, SecretString};

use crate::error::LlmError;

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("pagechat/", env!("CARGO_PKG_VERSION"));

/// Outbound HTTP proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse a `host:port` descriptor.
    pub fn parse(descriptor: &str) -> Result<Self, LlmError> {
        let (host, port) = descriptor.trim().rsplit_once(':').ok_or_else(|| {
            LlmError::ConfigurationError(format!("Invalid proxy '{descriptor}': expected host:port"))
        })?;
        let port = port.parse::<u16>().map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid proxy port '{port}': {e}"))
        })?;
        if host.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Proxy host cannot be empty".to_string(),
            ));
        }
        Ok(Self::new(host, port))
    }

    /// Proxy URL understood by the HTTP client.
    pub fn url(&self) -> String {
        if self.host.contains("://") {
            format!("{}:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

/// Configuration for a chat client bound to one model.
#[derive(Clone)]
pub struct ClientConfig {
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Bearer credential
    pub api_key: SecretString,
    /// Whether `chat` requests use the streaming protocol
    pub stream: bool,
    /// Sampling temperature
    pub temperature: f64,
    /// Optional outbound proxy
    pub proxy: Option<ProxyConfig>,
    /// User agent
    pub user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("has_api_key", &self.has_api_key())
            .field("stream", &self.stream)
            .field("temperature", &self.temperature)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration for `model` with default endpoint and buffered mode.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: SecretString::from(String::new()),
            stream: false,
            temperature: 0.0,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Load from `PAGECHAT_*` variables, with `OPENAI_API_KEY` for the credential.
    pub fn from_env() -> Result<Self, LlmError> {
        let model = std::env::var("PAGECHAT_MODEL").map_err(|_| {
            LlmError::ConfigurationError("PAGECHAT_MODEL is not set".to_string())
        })?;
        let mut config = Self::new(model);

        if let Ok(endpoint) = std::env::var("PAGECHAT_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config = config.with_api_key(key);
        }
        if let Ok(val) = std::env::var("PAGECHAT_STREAM") {
            let v = val.trim().to_lowercase();
            config.stream = matches!(v.as_str(), "1" | "true" | "on" | "yes");
        }
        if let Ok(val) = std::env::var("PAGECHAT_TEMPERATURE") {
            config.temperature = val.trim().parse::<f64>().map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid PAGECHAT_TEMPERATURE '{val}': {e}"))
            })?;
        }
        if let Ok(val) = std::env::var("PAGECHAT_PROXY")
            && !val.trim().is_empty()
        {
            config.proxy = Some(ProxyConfig::parse(&val)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the credential
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(key.into());
        self
    }

    /// Enable or disable streaming mode
    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Route requests through a proxy
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Override the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::ConfigurationError(
                "Model cannot be empty".to_string(),
            ));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(LlmError::ConfigurationError(
                "Endpoint must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
