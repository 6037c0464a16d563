pub mod capabilities;
pub mod completion;
pub mod config;
pub mod hover;
pub mod indexer;
pub mod semantic_tokens;
pub mod symbols;
pub mod util;

use crate::config::ServerConfig;
use dashmap::DashMap;
use std::sync::Arc;
use stormscope_api::parser::QueryParser;
use stormscope_core::{DocumentState, IndexHandle};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    pub index: Arc<IndexHandle>,
    pub documents: DashMap<Url, DocumentState>,
    pub parser: Arc<dyn QueryParser>,
    pub config: Arc<RwLock<ServerConfig>>,
}

impl LspServer {
    pub fn new(client: Client, parser: Arc<dyn QueryParser>, defaults: ServerConfig) -> Self {
        Self {
            client,
            index: Arc::new(IndexHandle::new(
                stormscope_core::index::source::UNKNOWN_VERSION,
            )),
            documents: DashMap::new(),
            parser,
            config: Arc::new(RwLock::new(defaults)),
        }
    }

    /// Re-parses and re-walks one document, then publishes its diagnostics.
    async fn refresh(&self, uri: Url, text: String, version: i32) {
        self.index.ready().await;
        let index = self.index.snapshot().await;
        let parser = self.parser.clone();
        let mut state = self
            .documents
            .get(&uri)
            .map(|d| d.clone())
            .unwrap_or_default();

        let analyzed = tokio::task::spawn_blocking(move || {
            state.update(text, version, parser.as_ref(), &index);
            state
        })
        .await;

        let state = match analyzed {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Analysis of {} failed: {}", uri, e);
                return;
            }
        };

        // a newer edit may have finished first
        if self
            .documents
            .get(&uri)
            .is_some_and(|d| d.version > state.version)
        {
            return;
        }

        let diagnostics = state
            .diagnostics
            .iter()
            .map(util::to_lsp_diagnostic)
            .collect();
        self.documents.insert(uri.clone(), state);
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }

    async fn log_request(&self, message: String) {
        self.client.log_message(MessageType::LOG, message).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(layer) = ServerConfig::from_value(params.initialization_options) {
            self.config.write().await.overlay(layer);
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "stormscope".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        indexer::spawn_indexer(
            self.client.clone(),
            self.config.clone(),
            self.index.clone(),
        );
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.log_request(format!("LSP Event: did_open uri={}", doc.uri))
            .await;
        self.refresh(doc.uri, doc.text, doc.version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            self.refresh(uri, change.text, version).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        let current = self
            .documents
            .get(&uri)
            .map(|d| (d.text.clone(), d.version));

        let (text, version) = match (params.text, current) {
            (Some(text), Some((_, version))) => (text, version),
            (Some(text), None) => (text, 0),
            (None, Some(current)) => current,
            (None, None) => return,
        };
        self.refresh(uri, text, version).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.log_request(format!("LSP Event: did_close uri={}", uri))
            .await;
        self.documents.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, _: DidChangeConfigurationParams) {
        tracing::debug!("Configuration change ignored until restart");
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.log_request(format!(
            "LSP Request: textDocument/hover uri={} pos={}:{}",
            uri, pos.line, pos.character
        ))
        .await;

        self.index.ready().await;
        hover::hover(self, params).await
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        self.log_request(format!(
            "LSP Request: textDocument/completion uri={} pos={}:{}",
            uri, pos.line, pos.character
        ))
        .await;

        self.index.ready().await;
        let result = completion::completion(self, params).await;
        if let Ok(Some(CompletionResponse::Array(items))) = &result {
            self.log_request(format!("LSP Response: found {} completions", items.len()))
                .await;
        }
        result
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        self.log_request(format!(
            "LSP Request: textDocument/documentSymbol uri={}",
            params.text_document.uri
        ))
        .await;

        self.index.ready().await;
        symbols::document_symbol(self, params).await
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        self.log_request(format!(
            "LSP Request: textDocument/semanticTokens/full uri={}",
            params.text_document.uri
        ))
        .await;

        self.index.ready().await;
        semantic_tokens::semantic_tokens_full(self, params).await
    }
}

pub async fn run_server(
    parser: Arc<dyn QueryParser>,
    defaults: ServerConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(move |client| {
        LspServer::new(client, parser.clone(), defaults.clone())
    });
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use stormscope_api::models::{NodeKind, SyntaxNode};
    use stormscope_api::parser::SyntaxError;
    use stormscope_core::IndexSnapshot;

    struct EmptyQuery;

    impl QueryParser for EmptyQuery {
        fn parse(&self, _source: &str) -> std::result::Result<SyntaxNode, SyntaxError> {
            Ok(SyntaxNode::new(NodeKind::Query, None, ""))
        }
    }

    #[tokio::test]
    async fn test_did_open_waits_for_the_index() {
        let (service, _socket) = tower_lsp::LspService::new(|client| {
            LspServer::new(client, Arc::new(EmptyQuery), ServerConfig::default())
        });
        let server = service.inner();
        let uri = Url::parse("file:///tmp/query.storm").unwrap();

        let open = server.did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(
                uri.clone(),
                "storm".to_string(),
                1,
                "inet:fqdn".to_string(),
            ),
        });
        tokio::pin!(open);

        let early = tokio::time::timeout(Duration::from_millis(50), open.as_mut()).await;
        assert!(early.is_err());
        assert!(!server.documents.contains_key(&uri));

        server.index.publish(IndexSnapshot::empty("2.150.0")).await;
        open.await;
        assert_eq!(server.documents.get(&uri).map(|d| d.version), Some(1));
    }
}
