//! Static catalog loaded at startup.

use once_cell::sync::Lazy;
use time::macros::datetime;

use crate::models::{Book, Review, User};

const COVER_HINT: &str = "?data-ai-hint=book+cover";
const PLACEHOLDER_COVER: &str = "https://placehold.co/300x450.png";

/// Seed users, books and reviews
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub books: Vec<Book>,
    pub reviews: Vec<Review>,
}

static SEED: Lazy<SeedData> = Lazy::new(|| SeedData {
    users: seed_users(),
    books: seed_books(),
    reviews: seed_reviews(),
});

/// A fresh copy of the seed data
pub fn seed_data() -> SeedData {
    SEED.clone()
}

fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
    }
}

fn seed_users() -> Vec<User> {
    vec![
        user("user1", "BookwormReader"),
        user("user2", "NovelLover23"),
        user("user3", "StorySeeker"),
    ]
}

struct BookSeed {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    genre: &'static [&'static str],
    summary: &'static str,
    average_rating: f64,
    featured: bool,
    ai_insight: &'static str,
    reviews_count: u32,
}

impl From<BookSeed> for Book {
    fn from(seed: BookSeed) -> Self {
        Book {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            author: seed.author.to_string(),
            genre: seed.genre.iter().map(|g| g.to_string()).collect(),
            summary: seed.summary.to_string(),
            cover_image: format!("{PLACEHOLDER_COVER}{COVER_HINT}"),
            average_rating: seed.average_rating,
            featured: seed.featured,
            ai_insight: Some(seed.ai_insight.to_string()),
            reviews_count: seed.reviews_count,
        }
    }
}

fn seed_books() -> Vec<Book> {
    [
        BookSeed {
            id: "1",
            title: "The Midnight Library",
            author: "Matt Haig",
            genre: &["Fantasy", "Contemporary"],
            summary: "Between life and death there is a library, and within that library, the shelves go on forever. Every book provides a chance to try another life you could have lived.",
            average_rating: 4.5,
            featured: true,
            ai_insight: "Readers who enjoyed this book often explore themes of regret, second chances, and philosophical questions about life choices.",
            reviews_count: 2,
        },
        BookSeed {
            id: "2",
            title: "Project Hail Mary",
            author: "Andy Weir",
            genre: &["Science Fiction", "Thriller"],
            summary: "Ryland Grace is the sole survivor on a desperate, last-chance mission. Except that right now, he doesn't know that. He can't even remember his own name.",
            average_rating: 4.8,
            featured: true,
            ai_insight: "Fans of hard science fiction, witty protagonists, and interstellar problem-solving will find this novel highly engaging.",
            reviews_count: 1,
        },
        BookSeed {
            id: "3",
            title: "Klara and the Sun",
            author: "Kazuo Ishiguro",
            genre: &["Science Fiction", "Literary Fiction"],
            summary: "Klara, an Artificial Friend with outstanding observational qualities, watches carefully the behavior of those who come in to browse, and of those who pass on the street outside.",
            average_rating: 4.2,
            featured: false,
            ai_insight: "This novel appeals to readers interested in artificial intelligence, human connection, and subtle dystopian undertones.",
            reviews_count: 1,
        },
        BookSeed {
            id: "4",
            title: "The Vanishing Half",
            author: "Brit Bennett",
            genre: &["Historical Fiction", "Family Saga"],
            summary: "The Vignes twin sisters will always be identical. But after growing up together in a small southern community and running away at sixteen, everything about their adult lives is different.",
            average_rating: 4.6,
            featured: true,
            ai_insight: "This book resonates with those who appreciate multi-generational stories exploring identity, race, and family secrets.",
            reviews_count: 0,
        },
        BookSeed {
            id: "5",
            title: "Atomic Habits",
            author: "James Clear",
            genre: &["Self-Help", "Productivity"],
            summary: "An easy and proven way to build good habits and break bad ones, with practical strategies for mastering the tiny behaviors that lead to remarkable results.",
            average_rating: 4.9,
            featured: false,
            ai_insight: "A must-read for individuals seeking actionable advice on personal development and achieving long-term goals through small changes.",
            reviews_count: 0,
        },
        BookSeed {
            id: "6",
            title: "The Song of Achilles",
            author: "Madeline Miller",
            genre: &["Historical Fiction", "Mythology", "LGBTQ+"],
            summary: "A tale of gods, kings, immortal fame, and the human heart that reimagines Homer's Iliad as an epic love story.",
            average_rating: 4.7,
            featured: false,
            ai_insight: "Perfect for readers who love mythological retellings with deep emotional focus and compelling character relationships.",
            reviews_count: 0,
        },
    ]
    .into_iter()
    .map(Book::from)
    .collect()
}

fn seed_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "r1".to_string(),
            book_id: "1".to_string(),
            user_id: "user1".to_string(),
            username: "BookwormReader".to_string(),
            rating: 5.0,
            review_text: "Absolutely loved this book! The concept was fascinating and it made me think a lot about my own life choices. Highly recommend.".to_string(),
            created_at: datetime!(2023-05-10 10:00 UTC),
        },
        Review {
            id: "r2".to_string(),
            book_id: "1".to_string(),
            user_id: "user2".to_string(),
            username: "NovelLover23".to_string(),
            rating: 4.0,
            review_text: "A thought-provoking read. Some parts were a bit slow, but the overall message was powerful. The library concept is unique.".to_string(),
            created_at: datetime!(2023-05-12 14:30 UTC),
        },
        Review {
            id: "r3".to_string(),
            book_id: "2".to_string(),
            user_id: "user1".to_string(),
            username: "BookwormReader".to_string(),
            rating: 5.0,
            review_text: "Andy Weir does it again! A thrilling, hilarious, and surprisingly heartwarming sci-fi adventure. Couldn't put it down.".to_string(),
            created_at: datetime!(2023-06-01 09:15 UTC),
        },
        Review {
            id: "r4".to_string(),
            book_id: "3".to_string(),
            user_id: "user3".to_string(),
            username: "StorySeeker".to_string(),
            rating: 4.0,
            review_text: "Ishiguro's writing is beautiful as always. Klara is a compelling narrator, and the story raises interesting questions about love and humanity.".to_string(),
            created_at: datetime!(2023-04-20 11:00 UTC),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seed_review_references_a_seed_book() {
        let seed = seed_data();
        for review in &seed.reviews {
            assert!(
                seed.books.iter().any(|book| book.id == review.book_id),
                "review {} points at missing book {}",
                review.id,
                review.book_id
            );
        }
    }

    #[test]
    fn covers_carry_the_hint_suffix() {
        let seed = seed_data();
        assert_eq!(seed.books.len(), 6);
        assert!(seed
            .books
            .iter()
            .all(|book| book.cover_image.ends_with(COVER_HINT)));
    }
}
