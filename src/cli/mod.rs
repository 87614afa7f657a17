use clap::Parser;

use crate::config::AppConfig;

/// Command-line flags; each one overrides the matching environment variable.
#[derive(Parser, Debug, Default)]
#[command(name = "portfolio-api")]
#[command(about = "HTTP API for portfolio categories and projects")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Interface to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(short, long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "SQLite connection URL (overrides DATABASE_URL)")]
    pub database_url: Option<String>,
}

impl Cli {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        config
    }
}
