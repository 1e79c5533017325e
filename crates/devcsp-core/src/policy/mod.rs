//! Policy model (directives, source lists, header selection).
//!
//! A `Policy` is an ordered map from directive name to a `SourceList`. Source
//! lists are ordered sets of tokens: appending a token that is already present
//! is a no-op, which keeps runtime augmentation idempotent. Values are joined
//! with single spaces only when the policy is serialized.

pub mod builder;
pub mod meta;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{CspError, Result};

pub use builder::build_policy_string;
pub use meta::{meta_tag, unsupported_directives, META_UNSUPPORTED_DIRECTIVES};

pub const CSP_SELF: &str = "'self'";
pub const CSP_NONE: &str = "'none'";

pub const DEFAULT_SRC: &str = "default-src";
pub const SCRIPT_SRC: &str = "script-src";
pub const FONT_SRC: &str = "font-src";
pub const CONNECT_SRC: &str = "connect-src";
pub const IMG_SRC: &str = "img-src";
pub const STYLE_SRC: &str = "style-src";
pub const MEDIA_SRC: &str = "media-src";
pub const REPORT_URI: &str = "report-uri";
pub const FRAME_ANCESTORS: &str = "frame-ancestors";
pub const SANDBOX: &str = "sandbox";

pub const CSP_HEADER: &str = "Content-Security-Policy";
pub const CSP_HEADER_REPORT_ONLY: &str = "Content-Security-Policy-Report-Only";
pub const X_CSP_HEADER: &str = "X-Content-Security-Policy";
pub const X_CSP_HEADER_REPORT_ONLY: &str = "X-Content-Security-Policy-Report-Only";

/// Header a policy is delivered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CspHeader {
    /// `Content-Security-Policy`: violating loads are blocked.
    Enforce,
    /// `Content-Security-Policy-Report-Only`: violations are only reported.
    ReportOnly,
}

impl CspHeader {
    /// Canonical header name.
    pub fn name(self) -> &'static str {
        match self {
            CspHeader::Enforce => CSP_HEADER,
            CspHeader::ReportOnly => CSP_HEADER_REPORT_ONLY,
        }
    }

    /// `X-` prefixed alias older browsers read.
    pub fn legacy_name(self) -> &'static str {
        match self {
            CspHeader::Enforce => X_CSP_HEADER,
            CspHeader::ReportOnly => X_CSP_HEADER_REPORT_ONLY,
        }
    }

    pub fn is_report_only(self) -> bool {
        matches!(self, CspHeader::ReportOnly)
    }

    /// Parse a configured header name. Empty input means CSP is disabled.
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        match raw.trim() {
            "" => Ok(None),
            s if s.eq_ignore_ascii_case(CSP_HEADER) => Ok(Some(CspHeader::Enforce)),
            s if s.eq_ignore_ascii_case(CSP_HEADER_REPORT_ONLY) => Ok(Some(CspHeader::ReportOnly)),
            other => Err(CspError::InvalidConfig(format!(
                "unknown CSP header: {other} (expected {CSP_HEADER} or {CSP_HEADER_REPORT_ONLY})"
            ))),
        }
    }
}

impl fmt::Display for CspHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of source-expression tokens for one directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceList {
    tokens: Vec<String>,
}

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a space-separated value (`"'self' https://cdn.example.com"`).
    pub fn parse(raw: &str) -> Self {
        let mut out = Self::new();
        out.extend_from_str(raw);
        out
    }

    /// Append one token. Blank or already present tokens are ignored.
    /// Returns whether the list changed.
    pub fn push(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Append every whitespace-separated token of `raw`.
    pub fn extend_from_str(&mut self, raw: &str) {
        for token in raw.split_whitespace() {
            self.push(token);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl fmt::Display for SourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for SourceList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = Self::new();
        for s in iter {
            out.extend_from_str(s.as_ref());
        }
        out
    }
}

/// Accepted config shapes for a directive value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSources {
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for SourceList {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<RawSources>::deserialize(d)? {
            None => SourceList::new(),
            Some(RawSources::Text(s)) => SourceList::parse(&s),
            Some(RawSources::List(v)) => v.into_iter().collect(),
        })
    }
}

/// Directive name -> source list, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Policy {
    directives: IndexMap<String, SourceList>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The policy a fresh project starts with: deny by default, same-origin
    /// for scripts, fonts, connections, images, styles and media.
    pub fn dev_default() -> Self {
        Self::new()
            .with(DEFAULT_SRC, CSP_NONE)
            .with(SCRIPT_SRC, CSP_SELF)
            .with(FONT_SRC, CSP_SELF)
            .with(CONNECT_SRC, CSP_SELF)
            .with(IMG_SRC, CSP_SELF)
            .with(STYLE_SRC, CSP_SELF)
            .with(MEDIA_SRC, CSP_SELF)
    }

    /// Builder-style `set` taking a space-separated value.
    pub fn with(mut self, name: impl Into<String>, value: &str) -> Self {
        self.set(name, SourceList::parse(value));
        self
    }

    /// Replace (or insert) a directive. Existing directives keep their position.
    pub fn set(&mut self, name: impl Into<String>, value: SourceList) {
        self.directives.insert(name.into(), value);
    }

    /// Append a token to a directive, creating the directive if absent.
    pub fn append(&mut self, name: &str, token: impl Into<String>) -> bool {
        self.directives
            .entry(name.to_string())
            .or_default()
            .push(token)
    }

    pub fn get(&self, name: &str) -> Option<&SourceList> {
        self.directives.get(name)
    }

    /// Whether the directive is declared at all, empty or not.
    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceList)> {
        self.directives.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`: its directives replace ours by name,
    /// new names are appended in `other`'s order.
    pub fn merge(&mut self, other: &Policy) {
        for (name, value) in other.iter() {
            self.set(name, value.clone());
        }
    }

    /// Reject directive names and tokens that would make the serialized policy
    /// ambiguous or unrepresentable in a header.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.iter() {
            let name_ok = !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
            if !name_ok {
                return Err(CspError::InvalidConfig(format!(
                    "invalid directive name: {name:?}"
                )));
            }
            for token in value.iter() {
                if token.chars().any(|c| c == ';' || c == ',' || c.is_control()) {
                    return Err(CspError::InvalidConfig(format!(
                        "invalid source in {name}: {token:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Policy {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.set(k, SourceList::parse(v.as_ref()));
        }
        out
    }
}
