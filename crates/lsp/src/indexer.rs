use crate::config::{CONFIG_SECTION, ServerConfig};
use std::sync::Arc;
use stormscope_core::{IndexHandle, IndexSnapshot};
use tokio::sync::RwLock;
use tower_lsp::Client;
use tower_lsp::lsp_types::{ConfigurationItem, MessageType};

/// Loads the metadata index in the background and publishes it.
///
/// The client's configuration is consulted first. Whatever happens, a
/// snapshot is published at the end (an empty one on failure) so requests
/// waiting on readiness are released.
pub fn spawn_indexer(client: Client, config: Arc<RwLock<ServerConfig>>, index: Arc<IndexHandle>) {
    tokio::spawn(async move {
        let start = std::time::Instant::now();

        if let Some(layer) = fetch_client_config(&client).await {
            config.write().await.overlay(layer);
        }
        let source = config.read().await.index_source();

        client
            .log_message(
                MessageType::INFO,
                format!("Loading metadata index (datadir: {:?})", source.datadir),
            )
            .await;

        let loaded = tokio::task::spawn_blocking(move || source.load()).await;

        let snapshot = match loaded {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                tracing::warn!("Metadata index unavailable: {}", e);
                client
                    .log_message(MessageType::ERROR, format!("Metadata index unavailable: {}", e))
                    .await;
                IndexSnapshot::empty(stormscope_core::index::source::UNKNOWN_VERSION)
            }
            Err(e) => {
                tracing::error!("Index loader panicked: {}", e);
                IndexSnapshot::empty(stormscope_core::index::source::UNKNOWN_VERSION)
            }
        };

        let stats = snapshot.stats();
        let version = snapshot.version.clone();
        index.publish(snapshot).await;

        client
            .log_message(
                MessageType::INFO,
                format!(
                    "Metadata index {} ready in {:?}: {} libraries, {} form types, {} properties, {} commands",
                    version,
                    start.elapsed(),
                    stats.libraries,
                    stats.form_types,
                    stats.properties,
                    stats.commands
                ),
            )
            .await;
        client
            .show_message(MessageType::INFO, "stormscope ready")
            .await;
    });
}

async fn fetch_client_config(client: &Client) -> Option<ServerConfig> {
    let items = vec![ConfigurationItem {
        scope_uri: None,
        section: Some(CONFIG_SECTION.to_string()),
    }];

    match client.configuration(items).await {
        Ok(values) => ServerConfig::from_value(values.into_iter().next()),
        Err(e) => {
            tracing::debug!("Client configuration unavailable: {}", e);
            None
        }
    }
}
