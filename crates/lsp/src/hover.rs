use crate::LspServer;
use crate::util::{to_lsp_range, word_at_position};
use stormscope_core::analysis;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn hover(server: &LspServer, params: HoverParams) -> Result<Option<Hover>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    let Some(doc) = server.documents.get(&uri).map(|d| d.clone()) else {
        return Ok(None);
    };
    let Some(word) = word_at_position(&doc, position) else {
        return Ok(None);
    };

    let index = server.index.snapshot().await;
    let symbols = &doc.analysis.symbols;

    Ok(analysis::hover(&word, symbols, &index).map(|info| Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.markdown(),
        }),
        range: Some(to_lsp_range(info.range)),
    }))
}
