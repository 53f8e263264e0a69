use lyrical_db::Book;
use serde::{Deserialize, Serialize};

/// Genre filter value meaning "any genre"
pub const ALL_GENRES: &str = "all";

/// Catalog listing parameters. Every filter is optional and they combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the title
    #[serde(default)]
    pub title: Option<String>,
    /// Case-insensitive substring of the author
    #[serde(default)]
    pub author: Option<String>,
    /// Case-insensitive exact genre tag; `all` disables the filter
    #[serde(default)]
    pub genre: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub books: Vec<Book>,
    /// Matches before pagination
    pub total: usize,
    /// Distinct sorted genres of the whole catalog
    pub genres: Vec<String>,
}
