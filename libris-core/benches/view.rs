//! View pipeline benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use libris_core::view::Unwired;
use libris_core::{
    Book, FilterOptions, FilterPreset, LibraryView, SortDirection, SortField, SortSpec,
};
use std::sync::Arc;

fn catalog(n: i64) -> Vec<Book> {
    let genres = ["Fantasy", "Sci-Fi", "Classic", "Mystery"];
    (1..=n)
        .map(|id| {
            Book::new(id, format!("Title {}", (id * 7919) % n), format!("Author {}", id % 97))
                .with_genre(genres[(id % 4) as usize])
                .with_rating((id % 5 + 1) as f64)
                .with_year(1900 + (id % 120) as i32)
                .with_pages((id % 900) as u32 + 50)
        })
        .collect()
}

fn view_benchmark(c: &mut Criterion) {
    let books = catalog(5_000);
    let filters = FilterOptions {
        genre: Some("Fantasy".to_string()),
        ..Default::default()
    }
    .with_preset(FilterPreset::HighlyRated);
    let sort = SortSpec::new(SortField::Title, SortDirection::Asc);

    c.bench_function("compute_view_5000", |b| {
        b.iter(|| libris_core::compute_view(std::hint::black_box(&books), &filters, &sort, 2))
    });

    let shared = Arc::new(books.clone());
    let mut view = LibraryView::new();
    view.set_filters(filters.clone());
    c.bench_function("library_view_memoized", |b| {
        b.iter(|| view.compute(std::hint::black_box(&shared), &Unwired))
    });
}

criterion_group!(benches, view_benchmark);
criterion_main!(benches);
