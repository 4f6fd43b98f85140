//! Implementation of the `autolinear serve` command.

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::adapters::mcp::{McpHttpServer, StdioServer, ToolServer};
use crate::cli::commands::build_tool_host;
use crate::domain::models::{Config, Transport};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransportArg {
    Http,
    Stdio,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Http => Self::Http,
            TransportArg::Stdio => Self::Stdio,
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Transport to serve on (overrides config)
    #[arg(short, long, value_enum)]
    pub transport: Option<TransportArg>,

    /// Bind address for the HTTP transport (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port for the HTTP transport (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(transport) = args.transport {
        config.server.transport = transport.into();
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let server = ToolServer::new(build_tool_host(&config.linear)?);

    let transport = config.server.transport;
    match transport {
        Transport::Http => McpHttpServer::new(server, config.server).run().await,
        Transport::Stdio => StdioServer::new(server).run().await,
    }
}
