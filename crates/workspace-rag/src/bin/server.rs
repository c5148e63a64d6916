//! Indexing and retrieval server binary
//!
//! Run with: cargo run -p workspace-rag --bin workspace-rag-server [config.toml]

use workspace_rag::{config::RagConfig, server::RagServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workspace_rag=info,tower_http=debug".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RagConfig::load(&path)?,
        None => RagConfig::default(),
    };

    tracing::info!("configuration loaded");
    tracing::info!("  - chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - chunk overlap: {}", config.chunking.chunk_overlap);
    tracing::info!("  - embedding model: {}", config.gemini.embed_model);
    tracing::info!("  - generation model: {}", config.gemini.generate_model);
    tracing::info!("  - search backend: {}", config.vespa.endpoint);

    let server = RagServer::new(config)?;

    if !server.state().backend().health_check().await.unwrap_or(false) {
        tracing::warn!("search backend not reachable yet, continuing startup");
    }

    println!("Server starting on http://{}", server.address());
    println!("  POST   /index      - index a workspace item");
    println!("  DELETE /index/:id  - delete a document and its chunks");
    println!("  POST   /search     - ask a question");

    server.start().await?;

    Ok(())
}
