//! Delivery via `<meta http-equiv>`.
//!
//! Browsers ignore a few directives when the policy arrives in a meta tag
//! instead of a header. We only warn about them: the tag still carries the full
//! serialized policy and the browser drops what it cannot honour.

use super::{build_policy_string, Policy, CSP_HEADER, FRAME_ANCESTORS, REPORT_URI, SANDBOX};

/// Directives a meta-delivered policy cannot express.
pub const META_UNSUPPORTED_DIRECTIVES: [&str; 3] = [REPORT_URI, FRAME_ANCESTORS, SANDBOX];

/// Unsupported-in-meta directives declared by `policy`, whatever their value.
pub fn unsupported_directives(policy: &Policy) -> Vec<&'static str> {
    META_UNSUPPORTED_DIRECTIVES
        .iter()
        .copied()
        .filter(|name| policy.contains(name))
        .collect()
}

/// Render the `<meta>` tag for `policy`.
///
/// Emits one warning per unsupported directive. Returns `None` (with a warning)
/// when the policy serializes to nothing.
pub fn meta_tag(policy: &Policy) -> Option<String> {
    for name in unsupported_directives(policy) {
        tracing::warn!(
            directive = name,
            "CSP delivered via meta does not support `{name}`, per the W3C recommendation."
        );
    }

    let value = build_policy_string(policy);
    if value.is_empty() {
        tracing::warn!("CSP via meta tag enabled but no policy exists.");
        return None;
    }

    Some(format!(
        r#"<meta http-equiv="{CSP_HEADER}" content="{}">"#,
        escape_attr(&value)
    ))
}

fn escape_attr(v: &str) -> String {
    v.replace('&', "&amp;").replace('"', "&quot;")
}
