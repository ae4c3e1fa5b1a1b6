//! Accepted image extensions

use std::collections::BTreeSet;
use std::fmt;

/// Extensions used when the user does not name any
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["webp", "jpg", "png", "jpeg"];

/// Set of lowercase file extensions an image URL must end with to be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions(BTreeSet<String>);

impl Extensions {
    /// Build a set from user-supplied names
    ///
    /// Names are lowercased and a leading `.` is dropped, so `".PNG"` and
    /// `"png"` are the same entry. Empty names are ignored.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = names
            .into_iter()
            .map(|name| name.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Extensions(set)
    }

    /// Parse a space-separated list, falling back to the defaults when blank
    pub fn parse(input: &str) -> Self {
        let parsed = Self::new(input.split_whitespace());
        if parsed.is_empty() {
            Self::default()
        } else {
            parsed
        }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(extension)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether the URL's extension is one of ours
    pub fn matches_url(&self, url: &str) -> bool {
        self.contains(&extension_of(url))
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl fmt::Display for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "{}", names.join(" "))
    }
}

/// Lowercase text after the last `.` of a URL
///
/// This is a plain string split, not a MIME check: `photo.png?w=200`
/// yields `png?w=200` and is rejected, a URL without any dot yields the whole
/// string.
pub fn extension_of(url: &str) -> String {
    url.rsplit('.').next().unwrap_or_default().to_lowercase()
}
