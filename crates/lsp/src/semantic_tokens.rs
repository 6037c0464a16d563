use crate::LspServer;
use stormscope_core::analysis::tokens;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn semantic_tokens_full(
    server: &LspServer,
    params: SemanticTokensParams,
) -> Result<Option<SemanticTokensResult>> {
    let Some(doc) = server.documents.get(&params.text_document.uri).map(|d| d.clone()) else {
        return Ok(None);
    };

    let index = server.index.snapshot().await;
    let data = tokens::encode(&doc.analysis.candidates, &index);

    Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
        result_id: None,
        data: to_semantic_tokens(&data),
    })))
}

/// Groups the flat integer stream into protocol tokens.
pub fn to_semantic_tokens(data: &[u32]) -> Vec<SemanticToken> {
    data.chunks_exact(5)
        .map(|t| SemanticToken {
            delta_line: t[0],
            delta_start: t[1],
            length: t[2],
            token_type: t[3],
            token_modifiers_bitset: t[4],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_grouped_by_five() {
        let tokens = to_semantic_tokens(&[0, 4, 3, 2, 4, 1, 0, 9, 8, 1]);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].delta_line, 1);
        assert_eq!(tokens[1].length, 9);
        assert_eq!(tokens[1].token_modifiers_bitset, 1);
    }
}
