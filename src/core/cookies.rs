use reqwest::Response;
use std::time::SystemTime;

/// Session cookies gathered over one invocation.
///
/// Cookies are parsed by reqwest; only the name and value are kept. A cookie
/// set again replaces the earlier value in place, so the header keeps
/// first-seen order. A `Set-Cookie` that clears a cookie (empty value,
/// `Max-Age=0` or an `Expires` in the past) drops it from the jar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Folds the `Set-Cookie` headers of a response into the jar. Returns how
    /// many cookies were stored; cleared and unparseable ones are not counted.
    pub fn absorb(&mut self, response: &Response) -> usize {
        let now = SystemTime::now();
        let mut stored = 0;

        for cookie in response.cookies() {
            let expired = cookie.max_age().is_some_and(|age| age.is_zero())
                || cookie.expires().is_some_and(|at| at <= now);

            if expired || cookie.value().is_empty() {
                if self.remove(cookie.name()).is_some() {
                    tracing::debug!("🍪 Cookie {} cleared by the server", cookie.name());
                }
                continue;
            }

            self.insert(cookie.name(), cookie.value());
            stored += 1;
        }

        stored
    }

    /// `Cookie` request header value; empty when the jar is empty.
    pub fn header_value(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
