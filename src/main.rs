use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use kubelens_k8s::{ConnectOptions, KubeClient};
use kubelens_mcp::{Dispatcher, McpServer};

/// Kubelens - a read-only MCP server for Kubernetes cluster inspection
#[derive(Parser, Debug)]
#[command(name = "kubelens")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the kubeconfig file (defaults to the standard lookup)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long, value_name = "CONTEXT")]
    context: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Log to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    let client = KubeClient::connect(ConnectOptions {
        kubeconfig: args.kubeconfig,
        context: args.context,
    })
    .await?;

    let context = client.context().clone();
    let dispatcher = Dispatcher::new(Arc::new(client), context);

    McpServer::new(dispatcher).serve_stdio().await?;

    Ok(())
}
