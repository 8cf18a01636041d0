//! Command-line configuration.
//!
//! Every flag can also be supplied through an environment variable, so the
//! same binary can be pointed at different backends without wrapper scripts.

use std::path::PathBuf;

use clap::Parser;

use crate::{domain::BaseUrl, error::ClientError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_VIEWPORT_WIDTH: u16 = 1024;

#[derive(Parser, Debug)]
#[command(name = "feedsapp-client", about = "Terminal client for FeedsApp", version)]
pub struct Args {
    /// Base URL of the FeedsApp REST backend
    #[arg(long, env = "FEEDSAPP_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// File the bearer token is persisted in [default: $HOME/.feedsapp/token]
    #[arg(long, env = "FEEDSAPP_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Viewport width; below 768 the chat screen uses the mobile layout
    #[arg(long, env = "FEEDSAPP_VIEWPORT_WIDTH", default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: u16,

    /// Log level for this client (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub token_file: PathBuf,
    pub viewport_width: u16,
}

impl ClientConfig {
    pub fn from_args(args: &Args) -> Result<Self, ClientError> {
        let base_url = BaseUrl::new(&args.base_url)?;
        let token_file = match &args.token_file {
            Some(path) => path.clone(),
            None => Self::default_token_file()?,
        };
        Ok(Self {
            base_url,
            token_file,
            viewport_width: args.width,
        })
    }

    fn default_token_file() -> Result<PathBuf, ClientError> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".feedsapp").join("token"))
            .ok_or_else(|| {
                ClientError::Config("cannot locate $HOME; pass --token-file".to_string())
            })
    }
}
