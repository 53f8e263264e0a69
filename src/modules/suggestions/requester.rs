//! Suggestion requests: one generator call, post-filtered, never failing.

use std::sync::Arc;
use std::time::Duration;

use super::generator::{GenerationError, SuggestionGenerator};
use super::models::SuggestionRequest;
use crate::utils::eq_ignore_case;

pub struct SuggestionRequester {
    generator: Arc<dyn SuggestionGenerator>,
    timeout: Duration,
}

impl SuggestionRequester {
    pub fn new(generator: Arc<dyn SuggestionGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Titles related to the reviewed book. Any generator failure, including
    /// a timeout, yields an empty list.
    pub async fn suggest(&self, request: &SuggestionRequest) -> Vec<String> {
        let outcome = tokio::time::timeout(self.timeout, self.generator.generate(request)).await;

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(GenerationError::Disabled)) => {
                tracing::debug!("suggestions disabled; returning none");
                return Vec::new();
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "suggestion generation failed");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "suggestion generation timed out"
                );
                return Vec::new();
            }
        };

        let suggestions = exclude_current_title(response.suggested_books, &request.current_book_title);
        tracing::info!(
            book_title = %request.current_book_title,
            suggestions = suggestions.len(),
            "suggestions generated"
        );
        suggestions
    }
}

/// Drop blank titles and any title matching the current book, ignoring case
/// and surrounding whitespace.
pub fn exclude_current_title(titles: Vec<String>, current_title: &str) -> Vec<String> {
    let current_title = current_title.trim();
    titles
        .into_iter()
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty() && !eq_ignore_case(title, current_title))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::suggestions::generator::DisabledGenerator;
    use crate::modules::suggestions::models::SuggestionResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Canned {
        titles: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(titles: Vec<&'static str>) -> Self {
            Self {
                titles,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SuggestionGenerator for Canned {
        async fn generate(
            &self,
            _request: &SuggestionRequest,
        ) -> Result<SuggestionResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SuggestionResponse {
                suggested_books: self.titles.iter().map(|t| t.to_string()).collect(),
            })
        }
    }

    struct Failing(AtomicUsize);

    #[async_trait]
    impl SuggestionGenerator for Failing {
        async fn generate(
            &self,
            _request: &SuggestionRequest,
        ) -> Result<SuggestionResponse, GenerationError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    struct Stalled;

    #[async_trait]
    impl SuggestionGenerator for Stalled {
        async fn generate(
            &self,
            _request: &SuggestionRequest,
        ) -> Result<SuggestionResponse, GenerationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(SuggestionResponse::default())
        }
    }

    fn request() -> SuggestionRequest {
        SuggestionRequest {
            review_text: "Loved the science and the friendship.".to_string(),
            current_book_title: "Project Hail Mary".to_string(),
        }
    }

    #[tokio::test]
    async fn current_title_is_removed_ignoring_case() {
        let generator = Arc::new(Canned::new(vec![
            "The Martian",
            "project hail mary",
            "PROJECT HAIL MARY ",
            "Children of Time",
        ]));
        let requester = SuggestionRequester::new(generator.clone(), Duration::from_secs(5));

        let titles = requester.suggest(&request()).await;

        assert_eq!(titles, vec!["The Martian", "Children of Time"]);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_yield_empty_list_without_retry() {
        let generator = Arc::new(Failing(AtomicUsize::new(0)));
        let requester = SuggestionRequester::new(generator.clone(), Duration::from_secs(5));

        assert!(requester.suggest(&request()).await.is_empty());
        assert_eq!(generator.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_generator_yields_empty_list() {
        let requester = SuggestionRequester::new(Arc::new(DisabledGenerator), Duration::from_secs(5));
        assert!(requester.suggest(&request()).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_generator_times_out_to_empty_list() {
        let requester = SuggestionRequester::new(Arc::new(Stalled), Duration::from_millis(50));
        assert!(requester.suggest(&request()).await.is_empty());
    }

    #[test]
    fn blank_titles_are_dropped() {
        let titles = exclude_current_title(
            vec!["  ".to_string(), " Dune ".to_string()],
            "Project Hail Mary",
        );
        assert_eq!(titles, vec!["Dune"]);
    }
}
