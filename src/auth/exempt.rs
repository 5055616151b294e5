//! Path prefixes that bypass the authentication gate.

use std::sync::Arc;

/// Ordered, de-duplicated set of exempt path prefixes.
///
/// A prefix matches a request path when the path equals it or continues it
/// with a `/`, so `/api/auth` covers `/api/auth/login` but not `/api/authors`.
#[derive(Debug, Clone, Default)]
pub struct ExemptPaths {
    prefixes: Arc<Vec<String>>,
}

impl ExemptPaths {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in prefixes {
            let Some(prefix) = normalize(raw.as_ref()) else {
                continue;
            };
            if !out.contains(&prefix) {
                out.push(prefix);
            }
        }
        Self {
            prefixes: Arc::new(out),
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            prefix == "/"
                || path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let body = trimmed.trim_end_matches('/');
    if body.is_empty() {
        return Some("/".to_string());
    }
    if body.starts_with('/') {
        Some(body.to_string())
    } else {
        Some(format!("/{}", body))
    }
}
