//! Command line and environment configuration

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

const BYTES_PER_MIB: usize = 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "xlsx-upload")]
#[command(about = "Upload spreadsheets and reject files with empty cells or numbers stored as text")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the upload server
    Serve(ServeArgs),
    /// Upload a spreadsheet to a running server, like the browser form does
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address the HTTP server listens on
    #[arg(long, env = "UPLOAD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory staged and accepted uploads are written to (created if missing)
    #[arg(long, env = "UPLOAD_DIR", default_value = "files")]
    pub upload_dir: PathBuf,

    /// Largest accepted upload, in MiB
    #[arg(long, env = "UPLOAD_MAX_MB", default_value_t = 200)]
    pub max_upload_mb: usize,
}

impl ServeArgs {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(BYTES_PER_MIB)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Spreadsheet to upload (.xlsx or .xls)
    pub file: Option<PathBuf>,

    /// Base URL of the upload server
    #[arg(long, env = "UPLOAD_URL", default_value = "http://127.0.0.1:3000")]
    pub url: String,
}
