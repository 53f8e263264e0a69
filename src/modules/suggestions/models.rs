use serde::{Deserialize, Serialize};

/// Input to the suggestion generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub review_text: String,
    pub current_book_title: String,
}

/// Generator output; also the HTTP response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub suggested_books: Vec<String>,
}
