//! Catalog listing: filtering, pagination and the genre index.

use std::collections::BTreeSet;
use std::sync::Arc;

use lyrical_db::{Book, BookRepository, StoreError};

use super::models::{CatalogPage, CatalogQuery, ALL_GENRES};
use crate::utils::{contains_ignore_case, eq_ignore_case, non_blank};

/// Read-only view over the book repository
pub struct Catalog {
    books: Arc<dyn BookRepository>,
    default_page_size: usize,
}

impl Catalog {
    pub fn new(books: Arc<dyn BookRepository>, default_page_size: usize) -> Self {
        Self {
            books,
            default_page_size: default_page_size.max(1),
        }
    }

    pub async fn query(&self, query: &CatalogQuery) -> Result<CatalogPage, StoreError> {
        let books = self.books.all_books().await?;
        let page = select_page(books, query, self.default_page_size);
        tracing::debug!(
            total = page.total,
            returned = page.books.len(),
            "catalog query served"
        );
        Ok(page)
    }

    pub async fn featured(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.all_books().await?;
        Ok(books.into_iter().filter(|book| book.featured).collect())
    }

    pub async fn book(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.books.find_book(id).await
    }
}

fn matches(book: &Book, query: &CatalogQuery) -> bool {
    if let Some(title) = non_blank(query.title.as_deref()) {
        if !contains_ignore_case(&book.title, title) {
            return false;
        }
    }
    if let Some(author) = non_blank(query.author.as_deref()) {
        if !contains_ignore_case(&book.author, author) {
            return false;
        }
    }
    match non_blank(query.genre.as_deref()) {
        Some(genre) if !eq_ignore_case(genre, ALL_GENRES) => {
            book.genre.iter().any(|tag| eq_ignore_case(tag, genre))
        }
        _ => true,
    }
}

/// Distinct genres across `books`, sorted.
pub fn genre_index(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .flat_map(|book| book.genre.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Filter, count and slice `books` for the requested page.
///
/// Missing or zero `page` means the first page; missing or zero `limit` means
/// `default_limit`. Pages past the end are empty.
pub fn select_page(books: Vec<Book>, query: &CatalogQuery, default_limit: usize) -> CatalogPage {
    let genres = genre_index(&books);

    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(default_limit);

    let matching: Vec<Book> = books.into_iter().filter(|b| matches(b, query)).collect();
    let total = matching.len();

    let start = (page - 1).saturating_mul(limit);
    let end = page.saturating_mul(limit).min(total);
    let books = if start >= total {
        Vec::new()
    } else {
        matching[start..end].to_vec()
    };

    CatalogPage {
        books,
        total,
        genres,
    }
}
