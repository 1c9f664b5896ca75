use crate::models::Token;

/// Tokens whose name or symbol contains `query`, ignoring case.
/// An empty query matches everything.
pub fn filter_tokens<'a>(tokens: &'a [Token], query: &str) -> Vec<&'a Token> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return tokens.iter().collect();
    }

    tokens
        .iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&query) || t.symbol.to_lowercase().contains(&query)
        })
        .collect()
}
