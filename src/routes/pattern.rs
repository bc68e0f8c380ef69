//! Route path patterns such as `/books/edit/:name`

use crate::utils::error::{AccessError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A `/`-separated path pattern; `:name` segments capture one path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(AccessError::validation(format!(
                "route pattern must start with '/': {}",
                pattern
            )));
        }

        let mut segments = Vec::new();
        for part in split_path(pattern) {
            match part.strip_prefix(':') {
                Some("") => {
                    return Err(AccessError::validation(format!(
                        "unnamed parameter in route pattern: {}",
                        pattern
                    )));
                }
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(AccessError::validation(format!(
                            "duplicate parameter :{} in route pattern: {}",
                            name, pattern
                        )));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a location path; the query string and fragment are ignored
    pub fn matches(&self, path: &str) -> Option<RouteMatch> {
        let parts = split_path(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(RouteMatch {
            pattern: self.raw.clone(),
            params,
        })
    }
}

/// A successful pattern match and its captured parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    pattern: String,
    params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|part| !part.is_empty()).collect()
}
