use crate::LspServer;
use crate::util::to_lsp_range;
use stormscope_api::models::{self as api};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn document_symbol(
    server: &LspServer,
    params: DocumentSymbolParams,
) -> Result<Option<DocumentSymbolResponse>> {
    let Some(doc) = server.documents.get(&params.text_document.uri) else {
        return Ok(None);
    };
    if doc.tree.is_none() {
        return Ok(None);
    }

    let symbols = doc.analysis.outline.iter().map(convert_symbol).collect();
    Ok(Some(DocumentSymbolResponse::Nested(symbols)))
}

fn convert_symbol(sym: &api::DocumentSymbol) -> DocumentSymbol {
    let kind = match sym.kind {
        api::SymbolKind::Function => SymbolKind::FUNCTION,
        api::SymbolKind::Variable => SymbolKind::VARIABLE,
    };

    #[allow(deprecated)]
    DocumentSymbol {
        name: sym.name.clone(),
        detail: None,
        kind,
        tags: None,
        deprecated: None,
        range: to_lsp_range(sym.range),
        selection_range: to_lsp_range(sym.selection_range),
        children: None,
    }
}
