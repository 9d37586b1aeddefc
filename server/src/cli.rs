//! CLI argument definitions

use clap::Parser;
use humanize_edge::ResponsePolicy;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "humanize-edge")]
#[command(about = "Edge proxy forwarding humanize requests to the FastAPI humanizer")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Humanizer service base URL
    #[arg(short, long)]
    pub upstream_url: Option<String>,

    /// Response policy: normalize or passthrough
    #[arg(short, long)]
    pub policy: Option<ResponsePolicy>,

    /// Disable permissive CORS headers
    #[arg(long)]
    pub no_cors: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
