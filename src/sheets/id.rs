use once_cell::sync::Lazy;
use regex::Regex;

static SPREADSHEET_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/spreadsheets/d/([a-zA-Z0-9\-_]+)").expect("valid regex"));

/// Returns the spreadsheet id from a sharing URL, or the trimmed input if it isn't one.
pub fn extract_spreadsheet_id(url_or_id: &str) -> String {
    match SPREADSHEET_URL.captures(url_or_id) {
        Some(caps) => caps[1].to_string(),
        None => url_or_id.trim().to_string(),
    }
}

/// Canonical viewing URL for a spreadsheet id.
pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}/edit")
}

// -- Tests -------------------------------------------------------------------
