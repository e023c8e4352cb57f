// requests/form.rs
use url::form_urlencoded;

/// Decoded `application/x-www-form-urlencoded` pairs (request body or query
/// string). Keeps every pair so repeated keys such as `ids=1&ids=2` survive.
#[derive(Debug, Default, Clone)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(raw: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(raw).into_owned().collect(),
        }
    }

    pub fn from_query(query: Option<&str>) -> Self {
        Self::parse(query.unwrap_or("").as_bytes())
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// First raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, trimmed, `None` when blank.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Checkbox semantics: present with any value other than "0"/"false".
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.text(key), Some(v) if v != "0" && v != "false")
    }

    /// Rebuilds a query string, optionally replacing one key. Used for
    /// pagination and sort links that must keep the active filters.
    pub fn to_query_with(&self, key: &str, value: &str) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            if k != key && !v.is_empty() {
                ser.append_pair(k, v);
            }
        }
        ser.append_pair(key, value);
        ser.finish()
    }
}
