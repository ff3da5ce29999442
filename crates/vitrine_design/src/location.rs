//! Location and history access
//!
//! The provider reads the `design` query parameter from the current location
//! and rewrites it with a history-replacing navigation. [`Navigator`] is the
//! seam to the host (browser history, test harness, CLI).

use crate::error::NavigationError;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};
use url::Url;

/// Base used to resolve relative locations like `/?design=medical`
const RELATIVE_BASE: &str = "http://localhost";

/// How the location was written, so it can be printed back the same way
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Form {
    /// `https://host/path`
    Absolute,
    /// `//host/path`, host kept but no scheme
    SchemeRelative,
    /// `/path` or `path`
    PathRelative,
}

/// A parsed page location that remembers how it was written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignLocation {
    url: Url,
    form: Form,
}

impl DesignLocation {
    pub fn parse(raw: &str) -> Result<Self, NavigationError> {
        let invalid = |source| NavigationError::InvalidUrl {
            url: raw.to_string(),
            source,
        };
        match Url::parse(raw) {
            Ok(url) => Ok(Self {
                url,
                form: Form::Absolute,
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(RELATIVE_BASE).map_err(invalid)?;
                let url = base.join(raw).map_err(invalid)?;
                let form = if raw.trim_start().starts_with("//") {
                    Form::SchemeRelative
                } else {
                    Form::PathRelative
                };
                Ok(Self { url, form })
            }
            Err(e) => Err(invalid(e)),
        }
    }

    /// First value of a query parameter, percent-decoded
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Copy with `name` set to `value`; other parameters keep their order
    pub fn with_query_param(&self, name: &str, value: &str) -> Self {
        let mut pairs = self.pairs_without(name);
        pairs.push((name.to_string(), value.to_string()));
        self.with_pairs(pairs)
    }

    /// Copy with every `name` parameter removed
    pub fn without_query_param(&self, name: &str) -> Self {
        self.with_pairs(self.pairs_without(name))
    }

    /// Copy pointing at `path` with no query or fragment
    pub fn with_path(&self, path: &str) -> Self {
        let mut url = self.url.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        Self {
            url,
            form: self.form,
        }
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    fn pairs_without(&self, name: &str) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .filter(|(k, _)| k != name)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn with_pairs(&self, pairs: Vec<(String, String)>) -> Self {
        let mut url = self.url.clone();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        Self {
            url,
            form: self.form,
        }
    }
}

impl Display for DesignLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.form {
            Form::Absolute => return f.write_str(self.url.as_str()),
            Form::SchemeRelative => {
                // Everything after `scheme:` is already `//host/path?query#frag`.
                let full = self.url.as_str();
                return f.write_str(&full[self.url.scheme().len() + 1..]);
            }
            Form::PathRelative => {}
        }
        f.write_str(self.url.path())?;
        if let Some(q) = self.url.query() {
            write!(f, "?{q}")?;
        }
        if let Some(frag) = self.url.fragment() {
            write!(f, "#{frag}")?;
        }
        Ok(())
    }
}

/// Access to the host's location and session history
pub trait Navigator: Send + Sync {
    /// Current location as a raw string
    fn location(&self) -> Result<String, NavigationError>;

    /// Replace the current history entry (no new entry)
    fn replace(&self, url: &str) -> Result<(), NavigationError>;

    /// Navigate to a new entry
    fn push(&self, url: &str) -> Result<(), NavigationError>;
}

/// In-process session history
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Mutex<Vec<String>>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![initial.into()]),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of history entries
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn current(&self) -> String {
        self.entries().last().cloned().unwrap_or_default()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Result<String, NavigationError> {
        Ok(self.current())
    }

    fn replace(&self, url: &str) -> Result<(), NavigationError> {
        let mut entries = self.entries();
        match entries.last_mut() {
            Some(last) => *last = url.to_string(),
            None => entries.push(url.to_string()),
        }
        Ok(())
    }

    fn push(&self, url: &str) -> Result<(), NavigationError> {
        self.entries().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_locations_stay_relative() {
        let loc = DesignLocation::parse("/services?design=medical&lang=fr").unwrap();
        assert_eq!(loc.query_param("design").as_deref(), Some("medical"));
        assert_eq!(loc.to_string(), "/services?design=medical&lang=fr");
    }

    #[test]
    fn setting_a_param_preserves_the_others() {
        let loc = DesignLocation::parse("https://vitrine.example/?lang=en&design=medical").unwrap();
        let next = loc.with_query_param("design", "autoGarage");
        assert_eq!(
            next.to_string(),
            "https://vitrine.example/?lang=en&design=autoGarage"
        );
    }

    #[test]
    fn removing_the_last_param_drops_the_question_mark() {
        let loc = DesignLocation::parse("/?design=bogus").unwrap();
        assert_eq!(loc.without_query_param("design").to_string(), "/");
    }

    #[test]
    fn with_path_clears_query_and_fragment() {
        let loc = DesignLocation::parse("/contact?design=medical#form").unwrap();
        assert_eq!(loc.with_path("/").to_string(), "/");
    }

    #[test]
    fn scheme_relative_locations_keep_their_host() {
        let loc = DesignLocation::parse("//cdn.example/offres?design=x").unwrap();
        assert_eq!(loc.query_param("design").as_deref(), Some("x"));
        assert_eq!(loc.to_string(), "//cdn.example/offres?design=x");

        let next = loc.with_query_param("design", "medical");
        assert_eq!(next.to_string(), "//cdn.example/offres?design=medical");
        assert_eq!(loc.with_path("/").to_string(), "//cdn.example/");
    }

    #[test]
    fn malformed_urls_are_rejected() {
        assert!(DesignLocation::parse("http://[::1").is_err());
    }

    #[test]
    fn replace_does_not_grow_history() {
        let history = MemoryHistory::new("/");
        history.replace("/?design=medical").unwrap();
        assert_eq!(history.len(), 1);
        history.push("/contact").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), "/contact");
    }
}
