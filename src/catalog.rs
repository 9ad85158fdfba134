//! Library catalog filtering and ordering.

use std::cmp::Ordering;

use crate::models::Book;

/// Active catalog filters. Every filter that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub tag: Option<String>,
    pub rating: Option<u8>,
}

impl CatalogFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Default::default()
        }
    }

    /// Toggle a tag button: selecting the active tag clears it
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.tag.as_deref() == Some(tag) {
            self.tag = None;
        } else {
            self.tag = Some(tag.to_string());
        }
    }

    /// Toggle a rating button: selecting the active rating clears it
    pub fn toggle_rating(&mut self, rating: u8) {
        if self.rating == Some(rating) {
            self.rating = None;
        } else {
            self.rating = Some(rating);
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let tokens: Vec<String> = self
            .query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let matches_query = tokens.iter().all(|token| book_contains(book, token));
        let matches_tag = self
            .tag
            .as_ref()
            .map_or(true, |tag| book.tags.iter().any(|t| t == tag));
        let matches_rating = self.rating.map_or(true, |r| book.rating == Some(r));

        matches_query && matches_tag && matches_rating
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|book| self.matches(book)).collect()
    }
}

fn book_contains(book: &Book, token: &str) -> bool {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map_or(false, |v| v.to_lowercase().contains(token))
    };

    book.titolo.to_lowercase().contains(token)
        || field(&book.volume)
        || field(&book.autori)
        || field(&book.editore)
        || field(&book.data)
        || book.tags.iter().any(|tag| tag.to_lowercase().contains(token))
}

/// Tags as displayed, with an "N copie" tag added for multiple copies
pub fn display_tags(book: &Book) -> Vec<String> {
    let mut tags = book.tags.clone();
    if book.copie > 1 && !tags.iter().any(|tag| tag.contains("copie")) {
        tags.push(format!("{} copie", book.copie));
    }
    tags
}

/// Sort by several fields; a leading `-` sorts that field descending.
///
/// Comparison is case-insensitive and numeric-aware ("Vol. 2" < "Vol. 10").
/// Missing fields compare as empty strings.
pub fn advanced_sort(books: &mut [Book], keys: &[&str]) {
    books.sort_by(|a, b| {
        for key in keys {
            let (field, descending) = match key.strip_prefix('-') {
                Some(field) => (field, true),
                None => (*key, false),
            };

            let left = a.field(field).unwrap_or_default();
            let right = b.field(field).unwrap_or_default();

            match natural_cmp(&left, &right) {
                Ordering::Equal => continue,
                ordering if descending => return ordering.reverse(),
                ordering => return ordering,
            }
        }
        Ordering::Equal
    });
}

/// Case-insensitive comparison treating digit runs as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = chunks(&a.to_lowercase());
    let b = chunks(&b.to_lowercase());

    for (left, right) in a.iter().zip(b.iter()) {
        let ordering = match (left, right) {
            (Chunk::Number(l), Chunk::Number(r)) => {
                let (l, r) = (l.trim_start_matches('0'), r.trim_start_matches('0'));
                l.len().cmp(&r.len()).then_with(|| l.cmp(r))
            }
            (l, r) => l.text().cmp(r.text()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.len().cmp(&b.len())
}

#[derive(Debug)]
enum Chunk {
    Number(String),
    Text(String),
}

impl Chunk {
    fn text(&self) -> &str {
        match self {
            Chunk::Number(s) | Chunk::Text(s) => s,
        }
    }
}

fn chunks(s: &str) -> Vec<Chunk> {
    let mut out: Vec<Chunk> = Vec::new();
    for c in s.chars() {
        let digit = c.is_ascii_digit();
        let extended = match out.last_mut() {
            Some(Chunk::Number(run)) if digit => {
                run.push(c);
                true
            }
            Some(Chunk::Text(run)) if !digit => {
                run.push(c);
                true
            }
            _ => false,
        };

        if !extended {
            out.push(if digit {
                Chunk::Number(c.to_string())
            } else {
                Chunk::Text(c.to_string())
            });
        }
    }
    out
}
