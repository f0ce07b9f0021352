//! Translate National Library records into catalog drafts.

use crate::domain::validation;

use super::model::BnBib;

pub const DEFAULT_CATEGORY: &str = "Other";
pub const UNKNOWN_PUBLISHER: &str = "Unknown";

/// A record reduced to what the catalog stores.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub release_year: i32,
    pub language: String,
    pub author_names: Vec<String>,
    pub category: String,
    pub genre: Option<String>,
}

/// `"Lalka / Bolesław Prus."` becomes `"Lalka"`.
pub fn clean_title(raw: &str) -> String {
    let title = raw.split(" / ").next().unwrap_or(raw);
    title
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '/') || c.is_whitespace())
        .to_string()
}

/// `"Prus, Bolesław (1847-1912)"` becomes `"Bolesław Prus"`.
pub fn parse_author(raw: &str) -> Option<String> {
    let mut name = String::new();
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => name.push(c),
            _ => {}
        }
    }

    let name = name
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',') || c.is_whitespace());
    let name = match name.split_once(',') {
        Some((surname, given)) if !given.trim().is_empty() => {
            format!("{} {}", given.trim(), surname.trim())
        }
        Some((surname, _)) => surname.trim().to_string(),
        None => name.to_string(),
    };

    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}

/// Every author in a `|` or `;` separated list, without repeats.
pub fn parse_authors(raw: &str) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    for name in raw.split(['|', ';']).filter_map(parse_author) {
        let key = name.to_lowercase();
        if !authors.iter().any(|known| known.to_lowercase() == key) {
            authors.push(name);
        }
    }
    authors
}

/// First valid ISBN in the field, normalized.
pub fn first_isbn(raw: &str) -> Option<String> {
    raw.split(['|', ';', ','])
        .filter_map(|candidate| {
            let token: String = candidate
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | 'X' | 'x'))
                .collect();
            validation::isbn(&token).ok()
        })
        .next()
}

/// First run of exactly four digits, so `"cop. 2010"` gives 2010.
pub fn parse_year(raw: &str) -> Option<i32> {
    let chars: Vec<char> = raw.chars().collect();
    let mut start = 0;
    while start < chars.len() {
        if !chars[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let end = chars[start..]
            .iter()
            .position(|c| !c.is_ascii_digit())
            .map_or(chars.len(), |len| start + len);
        if end - start == 4 {
            return chars[start..end].iter().collect::<String>().parse().ok();
        }
        start = end;
    }
    None
}

/// Polish language names to ISO 639-1 codes; unknown names pass through.
pub fn map_language(raw: &str) -> String {
    let name = raw.trim().to_lowercase();
    let code = match name.as_str() {
        "polski" => "pl",
        "angielski" => "en",
        "niemiecki" => "de",
        "francuski" => "fr",
        "rosyjski" => "ru",
        "hiszpański" => "es",
        "włoski" => "it",
        "czeski" => "cs",
        "ukraiński" => "uk",
        "łaciński" => "la",
        "" => "pl",
        _ => return name,
    };
    code.to_string()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// `None` when the record lacks a title, ISBN, author or year.
pub fn map_record(bib: &BnBib) -> Option<BookDraft> {
    let title = clean_title(non_blank(&bib.title)?);
    if title.is_empty() {
        return None;
    }
    let isbn = first_isbn(non_blank(&bib.isbn_issn)?)?;
    let author_names = parse_authors(non_blank(&bib.author)?);
    if author_names.is_empty() {
        return None;
    }
    let release_year = parse_year(non_blank(&bib.publication_year)?)?;

    Some(BookDraft {
        title,
        isbn,
        publisher: non_blank(&bib.publisher)
            .map(|publisher| publisher.trim_end_matches(',').trim().to_string())
            .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string()),
        release_year,
        language: map_language(non_blank(&bib.language).unwrap_or_default()),
        author_names,
        category: non_blank(&bib.domain)
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        genre: non_blank(&bib.genre).map(str::to_string),
    })
}
