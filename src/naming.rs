//! Output file naming

use crate::collect::UNTITLED;

/// Characters not allowed in file names on common platforms
const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Strip characters that cannot appear in a file name
///
/// Falls back to `Untitled` when nothing is left.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        UNTITLED.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Make sure a name ends in `.pdf`
pub fn with_pdf_suffix(name: &str) -> String {
    if name.ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{}.pdf", name)
    }
}

/// File name derived from the page title
pub fn default_output_name(title: &str) -> String {
    with_pdf_suffix(&sanitize_title(title))
}

/// The user's name if they gave one, otherwise the title-based default
pub fn output_file_name(requested: Option<&str>, title: &str) -> String {
    match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => with_pdf_suffix(name),
        None => default_output_name(title),
    }
}
