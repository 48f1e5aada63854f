use std::env;

#[derive(Debug, Clone)]
pub struct NimConfig {
    pub api_key: Option<String>,
    pub invoke_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub nim: Option<NimConfig>,
}

impl Default for NimConfig {
    fn default() -> Self {
        NimConfig {
            api_key: None,
            invoke_url: None,
        }
    }
}

impl NimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("NVIDIA_API_KEY").ok();
        let invoke_url = env::var("NIM_INVOKE_URL").ok();

        NimConfig {
            api_key,
            invoke_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_invoke_url(mut self, invoke_url: impl Into<String>) -> Self {
        self.invoke_url = Some(invoke_url.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            nim: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config { port, nim: None }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_nim(mut self, config: NimConfig) -> Self {
        self.nim = Some(config);
        self
    }
}
