use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use crate::pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "aozora-clean")]
#[command(version)]
#[command(about = "Serve cleaned Aozora Bunko texts over HTTP", long_about = None)]
#[command(after_help = "Examples:\n  \
  aozora-clean                          serve on 127.0.0.1:5000\n  \
  aozora-clean -b 0.0.0.0:8080 -v       serve on all interfaces with debug logs\n  \
  curl -d url=https://www.aozora.gr.jp/cards/000148/files/773_ruby_5968.zip \\\n    \
  http://127.0.0.1:5000/api/convert")]
pub struct Cli {
    /// Address to listen on
    #[arg(short = 'b', long, value_name = "ADDR", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Give up on an archive download after this many seconds
    #[arg(long, value_name = "SECS")]
    pub fetch_timeout: Option<u64>,

    /// Create per-request scratch directories under DIR
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Verbose logging (-vv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (-qq => errors only)
    #[arg(short = 'q', action = clap::ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Cli {
    /// Default log level; `RUST_LOG` still overrides it
    pub fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (q, _) if q > 1 => Level::ERROR,
            (1, _) => Level::WARN,
            (_, 0) => Level::INFO,
            (_, 1) => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            fetch_timeout: self.fetch_timeout.map(Duration::from_secs),
            scratch_root: self.scratch_dir.clone(),
        }
    }
}
