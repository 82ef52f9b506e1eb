//! # aozora-clean
//!
//! Fetch an Aozora Bunko ZIP archive and turn its text into plain prose.
//!
//! The archive is downloaded into a per-call scratch directory, unpacked, and
//! its `.txt` file decoded from Shift_JIS. The text then loses its header and
//! notation legend, the colophon, ruby glosses `《…》`, editorial notes
//! `［＃…］`, ideographic spaces and excess blank lines.
//!
//! ## Features
//!
//! - Self-contained ZIP reader (STORED and DEFLATE, ZIP64, CRC-32 checks)
//! - Classified errors with user-facing messages
//! - axum front end: JSON API, form page, and plain-text download
//!
//! ## Example
//!
//! ```no_run
//! use aozora_clean::{PipelineConfig, TextPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = TextPipeline::new(PipelineConfig::default())?;
//!     let text = pipeline
//!         .fetch_clean_text("https://www.aozora.gr.jp/cards/000148/files/773_ruby_5968.zip")
//!         .await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod server;
pub mod text;

pub use cli::Cli;
pub use error::{Error, FetchError, Result};
pub use pipeline::{PipelineConfig, TextPipeline, fetch_clean_text};
pub use text::normalize;
