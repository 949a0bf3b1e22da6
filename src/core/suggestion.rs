use crate::domain::catalog::ServiceCatalog;
use crate::domain::ports::CompletionClient;
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

/// 組出詢問語言模型的提示文字
pub fn build_prompt(user_input: &str, catalog: &ServiceCatalog) -> String {
    let choices = catalog
        .names()
        .iter()
        .map(|name| quote_name(name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "User request: {}\nWhat service is needed? Choose from: [{}]",
        user_input, choices
    )
}

/// 依 Python `repr(str)` 的規則加上引號
fn quote_name(name: &str) -> String {
    let quote = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(quote);
    for c in name.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == quote => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(quote);
    quoted
}

pub struct SuggestionRequester<C: CompletionClient> {
    client: C,
}

impl<C: CompletionClient> SuggestionRequester<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// 回傳模型原文，只供參考，不會回填到下單表單
    pub async fn suggest(&self, catalog: &ServiceCatalog, user_input: &str) -> Result<String> {
        validate_non_empty_string("request", user_input)?;

        let prompt = build_prompt(user_input, catalog);
        tracing::debug!("Asking model for a service suggestion ({} chars)", prompt.len());

        let suggestion = self.client.complete(&prompt).await.inspect_err(|e| {
            tracing::error!("❌ Suggestion request failed: {}", e);
        })?;

        tracing::info!("🤖 Model suggestion received");
        Ok(suggestion)
    }
}
