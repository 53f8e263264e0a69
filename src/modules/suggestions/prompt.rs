//! Fixed instruction sent to the generation endpoint.

use super::models::SuggestionRequest;

/// Render the recommendation prompt for one review.
pub fn render_prompt(request: &SuggestionRequest) -> String {
    let title = request.current_book_title.trim();
    let review = request.review_text.trim();

    format!(
        "You are an expert at recommending books. A reader has just reviewed the book \"{title}\".\n\
         \n\
         Review text: {review}\n\
         \n\
         Suggest other books this reader is likely to enjoy, similar in theme, style, or target audience. \
         Do not suggest \"{title}\" itself.\n\
         \n\
         Respond only with the list of book titles."
    )
}
