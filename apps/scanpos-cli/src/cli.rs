//! Command-line flags. Every flag overrides the matching config file and
//! environment setting.

use clap::Parser;
use std::path::PathBuf;

/// ScanPOS barcode scanning station
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "scanpos", about = "ScanPOS barcode scanning station", long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir / scanpos.toml)
    #[arg(short, long, env = "SCANPOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Product catalog endpoint
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Catalog request timeout in milliseconds (default: none)
    #[arg(long)]
    pub lookup_timeout_ms: Option<u64>,

    /// Cooldown after each lookup in milliseconds
    #[arg(long)]
    pub cooldown_ms: Option<u64>,

    /// Line-oriented decoder device or pipe
    #[arg(short, long)]
    pub device: Option<PathBuf>,

    /// Run with manual entry only, ignoring any configured device
    #[arg(long)]
    pub no_camera: bool,

    /// Snapshot database file
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Currency label for amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}
