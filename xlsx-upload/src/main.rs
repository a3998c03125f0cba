//! xlsx-upload - serve the upload form and endpoint, or submit a file to a running server

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xlsx_upload::client::{FormState, UploadClient};
use xlsx_upload::config::{Cli, Command, ServeArgs, SubmitArgs};
use xlsx_upload::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Submit(args) => submit(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    tokio::fs::create_dir_all(&args.upload_dir)
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to create upload directory {}: {}",
                args.upload_dir.display(),
                e
            )
        })?;
    info!("Upload directory: {}", args.upload_dir.display());
    info!("Maximum upload size: {} MiB", args.max_upload_mb);

    let state = AppState::new(args.upload_dir.clone(), args.max_upload_bytes());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn submit(args: SubmitArgs) -> Result<()> {
    let client = UploadClient::new(&args.url);
    let mut form = FormState::default();

    let accepted = client.submit(&mut form, args.file.as_deref()).await;
    print!("{}", form.render());

    if !accepted {
        std::process::exit(1);
    }
    Ok(())
}
