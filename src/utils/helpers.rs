//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Normalize an email for comparisons: trimmed and lowercased.
/// Blank input is treated as no email at all.
pub fn normalize_email(email: Option<&str>) -> Option<String> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
}

/// Trim an optional text field, dropping it when blank
pub fn clean_optional(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Calculate pagination offset
pub fn calculate_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Calculate total number of pages for a result set
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
