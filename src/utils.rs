// Utility helpers shared by the views and the facade

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    constants::UNKNOWN_PLACEHOLDER,
    error::{AppError, Result},
};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// True for `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    let Some(body) = address.trim().strip_prefix("0x") else {
        return false;
    };
    body.len() == 40 && hex::decode(body).is_ok()
}

pub fn ensure_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    if !is_valid_address(trimmed) {
        return Err(AppError::InvalidAddress(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Shortens an address to `0x1234...abcd`.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Whether a URL looks like something a browser (and the AI judge) can load
/// directly as an image.
pub fn is_valid_image_url(raw: &str) -> bool {
    let Ok(parsed) = url::Url::parse(raw.trim()) else {
        return false;
    };
    if parsed.host_str().is_some_and(|host| host.contains("cataas.com")) {
        return true;
    }
    let path = parsed.path().to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(&format!(".{ext}")))
}

/// Contract timestamps are ISO-8601 strings, sometimes without an offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_relative_time(raw: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse_timestamp(raw) else {
        return UNKNOWN_PLACEHOLDER.to_string();
    };
    let diff = now - at;
    let minutes = diff.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", diff.num_days())
}

/// Percentage rounded to the nearest integer, 0 when nothing was played.
pub fn win_rate_percent(wins: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((wins as f64 / total as f64) * 100.0).round() as u64
}

/// Clamp a requested page size to what the contract accepts.
pub fn clamp_limit(requested: Option<u32>, default: u32, contract_max: u32) -> u32 {
    match requested {
        Some(0) | None => default,
        Some(limit) => limit.min(contract_max),
    }
}
