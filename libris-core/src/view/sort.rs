//! Sort engine

use crate::types::{Book, SortDirection, SortField, SortSpec};
use std::cmp::Ordering;

/// Return a sorted copy of `books`
pub fn sort_books(books: &[Book], spec: &SortSpec) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sort_in_place(&mut sorted, spec);
    sorted
}

/// Sort a list the pipeline already owns
pub fn sort_in_place(books: &mut [Book], spec: &SortSpec) {
    books.sort_by(|a, b| compare_books(a, b, spec));
}

/// Compare two books under `spec`
pub fn compare_books(a: &Book, b: &Book, spec: &SortSpec) -> Ordering {
    let ordering = match spec.field {
        SortField::Title => compare_text(&a.title, &b.title),
        SortField::Author => compare_text(&a.author, &b.author),
        SortField::Rating => a
            .rating
            .unwrap_or(0.0)
            .total_cmp(&b.rating.unwrap_or(0.0)),
        SortField::Year => a
            .publication_year
            .unwrap_or(0)
            .cmp(&b.publication_year.unwrap_or(0)),
        SortField::Pages => a.pages.unwrap_or(0).cmp(&b.pages.unwrap_or(0)),
    };

    match spec.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Human ordering for titles and names
///
/// Letters compare without regard to case or Latin-1 accents first. Ties are
/// broken by accent, then by case with lowercase first, then by raw bytes.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(base_letter)
        .flat_map(char::to_lowercase)
        .cmp(b.chars().map(base_letter).flat_map(char::to_lowercase));

    primary
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            for (x, y) in a.chars().zip(b.chars()) {
                if x != y {
                    return match (x.is_lowercase(), y.is_lowercase()) {
                        (true, false) => Ordering::Less,
                        (false, true) => Ordering::Greater,
                        _ => x.cmp(&y),
                    };
                }
            }
            a.len().cmp(&b.len())
        })
}

fn base_letter(c: char) -> char {
    match c {
        'À'..='Å' => 'A',
        'à'..='å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' => 'O',
        'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ý' => 'Y',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}
