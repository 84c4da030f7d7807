use reqwest::header::HeaderValue;

/// Cookies handed out by the cookie endpoint, attached to a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieSet {
    pairs: Vec<(String, String)>,
}

impl CookieSet {
    pub fn from_response(response: &reqwest::Response) -> Self {
        response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Renders the set as a `Cookie` request header, `None` when there is nothing to send.
    pub fn header_value(&self) -> Option<HeaderValue> {
        if self.pairs.is_empty() {
            return None;
        }
        let rendered = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&rendered).ok()
    }
}

impl FromIterator<(String, String)> for CookieSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
