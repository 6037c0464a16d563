use crate::LspServer;
use crate::util::{to_api_position, to_lsp_range, word_at_position};
use stormscope_core::analysis::{self, CompletionCandidate, CompletionKind};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn completion(
    server: &LspServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    let Some(doc) = server.documents.get(&uri).map(|d| d.clone()) else {
        return Ok(None);
    };

    let items = match word_at_position(&doc, position) {
        Some(word) => {
            let index = server.index.snapshot().await;
            analysis::complete(&word, to_api_position(position), &doc.analysis.symbols, &index)
                .into_iter()
                .map(to_completion_item)
                .collect()
        }
        None => Vec::new(),
    };

    Ok(Some(CompletionResponse::Array(items)))
}

pub fn to_completion_item(candidate: CompletionCandidate) -> CompletionItem {
    let kind = match candidate.kind {
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::Property => CompletionItemKind::PROPERTY,
        CompletionKind::Variable => CompletionItemKind::VARIABLE,
        CompletionKind::Field => CompletionItemKind::FIELD,
    };

    CompletionItem {
        label: candidate.label.clone(),
        kind: Some(kind),
        detail: candidate.detail,
        tags: candidate
            .deprecated
            .then(|| vec![CompletionItemTag::DEPRECATED]),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range: to_lsp_range(candidate.range),
            new_text: candidate.label,
        })),
        ..Default::default()
    }
}
