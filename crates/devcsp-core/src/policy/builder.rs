//! Policy serialization.

use super::Policy;

/// Serialize a policy into a header value.
///
/// Each directive with at least one source becomes `"<name> <sources>"`; the
/// clauses are joined with `"; "` in declaration order. Directives without
/// sources are omitted rather than emitted bare, so a policy with nothing but
/// empty directives serializes to `""`. Tokens are not escaped.
pub fn build_policy_string(policy: &Policy) -> String {
    policy
        .iter()
        .filter(|(_, sources)| !sources.is_empty())
        .map(|(name, sources)| format!("{name} {sources}"))
        .collect::<Vec<_>>()
        .join("; ")
}
