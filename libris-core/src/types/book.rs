//! The catalog Book record

use crate::error::{LibrisError, Result};
use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a book by its source
pub type BookId = i64;

/// A catalog record with bibliographic fields
///
/// Field names follow the book API's wire format, so a record read from the
/// source can be persisted and read back without conversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    /// Rating between 1 and 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Book {
    /// Create a book with only the required fields set
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            isbn: None,
            publication_year: None,
            publisher: None,
            genre: None,
            pages: None,
            rating: None,
            description: None,
        }
    }

    /// Set the genre
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the publication year
    pub fn with_year(mut self, year: i32) -> Self {
        self.publication_year = Some(year);
        self
    }

    /// Set the page count
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Build a stored record from a create/update payload
    pub fn from_new(id: BookId, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
            isbn: new.isbn,
            publication_year: new.publication_year,
            publisher: new.publisher,
            genre: new.genre,
            pages: new.pages,
            rating: new.rating,
            description: new.description,
        }
    }
}

/// Payload for creating or replacing a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: None,
            publication_year: None,
            publisher: None,
            genre: None,
            pages: None,
            rating: None,
            description: None,
        }
    }
}

/// Parse a book id taken from a route or command argument
pub fn parse_book_id(raw: &str) -> Result<BookId> {
    raw.trim()
        .parse::<BookId>()
        .map_err(|_| LibrisError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let book = Book::new(7, "Dune", "Frank Herbert").with_rating(4.5);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["rating"], 4.5);
        assert!(json.get("genre").is_none());
        assert!(json.get("isbn").is_none());
    }

    #[test]
    fn test_deserialize_api_record_with_nulls() {
        let json = r#"{
            "id": 3,
            "title": "Emma",
            "author": "Jane Austen",
            "isbn": null,
            "publication_year": 1815,
            "genre": "Classic",
            "pages": null,
            "rating": 4
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 3);
        assert_eq!(book.publication_year, Some(1815));
        assert_eq!(book.rating, Some(4.0));
        assert_eq!(book.pages, None);
        assert_eq!(book.description, None);
    }

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("12").unwrap(), 12);
        assert_eq!(parse_book_id(" 5 ").unwrap(), 5);
        assert!(matches!(
            parse_book_id("abc"),
            Err(LibrisError::InvalidId(raw)) if raw == "abc"
        ));
        assert!(parse_book_id("").is_err());
    }
}
