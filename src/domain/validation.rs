//! Input rules shared by the domain constructors and setters.

use chrono::NaiveDate;

use super::error::{DomainResult, OperationNotValidError};

pub const MIN_RELEASE_YEAR: i32 = 1;
pub const MAX_RELEASE_YEAR: i32 = 2100;
pub const MAX_PAGES: u32 = 10_000;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Trimmed text with a length in `min..=max` characters.
pub fn text(field: &str, value: impl Into<String>, min: usize, max: usize) -> DomainResult<String> {
    let value = value.into().trim().to_string();
    let len = value.chars().count();
    if len < min {
        return Err(if min == 1 {
            OperationNotValidError::field(field, format!("{} must not be empty", field))
        } else {
            OperationNotValidError::field(
                field,
                format!("{} must be at least {} characters long", field, min),
            )
        });
    }
    if len > max {
        return Err(OperationNotValidError::field(
            field,
            format!("{} must be at most {} characters long", field, max),
        ));
    }
    Ok(value)
}

/// Optional trimmed text; blank input becomes `None`.
pub fn optional_text(field: &str, value: Option<String>, max: usize) -> DomainResult<Option<String>> {
    match value {
        Some(value) if !value.trim().is_empty() => text(field, value, 1, max).map(Some),
        _ => Ok(None),
    }
}

/// ISBN-10 or ISBN-13 with separators stripped.
pub fn isbn(value: &str) -> DomainResult<String> {
    let normalized: String = value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let valid = match normalized.len() {
        13 => normalized.chars().all(|c| c.is_ascii_digit()),
        10 => normalized
            .char_indices()
            .all(|(i, c)| c.is_ascii_digit() || (i == 9 && c == 'X')),
        _ => false,
    };

    if !valid {
        return Err(OperationNotValidError::field(
            "isbn",
            format!("{} is not a valid ISBN", value.trim()),
        ));
    }
    Ok(normalized)
}

pub fn release_year(value: i32) -> DomainResult<i32> {
    if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&value) {
        return Err(OperationNotValidError::field(
            "releaseYear",
            format!(
                "releaseYear must be between {} and {}",
                MIN_RELEASE_YEAR, MAX_RELEASE_YEAR
            ),
        ));
    }
    Ok(value)
}

pub fn pages(value: Option<u32>) -> DomainResult<Option<u32>> {
    match value {
        Some(pages) if pages == 0 || pages > MAX_PAGES => Err(OperationNotValidError::field(
            "pages",
            format!("pages must be between 1 and {}", MAX_PAGES),
        )),
        other => Ok(other),
    }
}

pub fn rating(value: Option<u8>) -> DomainResult<Option<u8>> {
    match value {
        Some(rating) if !(1..=10).contains(&rating) => Err(OperationNotValidError::field(
            "rating",
            "rating must be between 1 and 10",
        )),
        other => Ok(other),
    }
}

pub fn email(value: &str) -> DomainResult<String> {
    let value = value.trim().to_lowercase();
    let valid = value.len() <= 254
        && value
            .split_once('@')
            .map(|(local, domain)| {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            })
            .unwrap_or(false)
        && !value.chars().any(char::is_whitespace);

    if !valid {
        return Err(OperationNotValidError::field(
            "email",
            format!("{} is not a valid email address", value),
        ));
    }
    Ok(value)
}

pub fn password(value: &str) -> DomainResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(OperationNotValidError::field(
            "password",
            format!("password must be at least {} characters long", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Optional http(s) URL.
pub fn image_url(value: Option<String>) -> DomainResult<Option<String>> {
    let value = optional_text("imageUrl", value, 2048)?;
    if let Some(url) = &value {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(OperationNotValidError::field(
                "imageUrl",
                "imageUrl must be an http(s) URL",
            ));
        }
    }
    Ok(value)
}

/// `end` may not precede `start`.
pub fn date_range(start: NaiveDate, end: Option<NaiveDate>) -> DomainResult<()> {
    if let Some(end) = end {
        if end < start {
            return Err(OperationNotValidError::with_context(
                "end date must not be earlier than start date",
                serde_json::json!({ "startedAt": start, "endedAt": end }),
            ));
        }
    }
    Ok(())
}
