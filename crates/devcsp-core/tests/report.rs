#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use devcsp_core::report::ViolationReport;
use serde_json::json;

#[test]
fn parses_json_body() {
    let r = ViolationReport::from_body(br#"{"csp-report":{"violated-directive":"script-src"}}"#);
    assert_eq!(r.body(), &json!({"csp-report": {"violated-directive": "script-src"}}));
    assert_eq!(r.violated_directive(), Some("script-src"));
}

#[test]
fn empty_body_becomes_empty_object() {
    assert_eq!(ViolationReport::from_body(b"").body(), &json!({}));
    assert_eq!(ViolationReport::from_body(b" \n").body(), &json!({}));
}

#[test]
fn malformed_body_is_forwarded_raw() {
    let r = ViolationReport::from_body(b"{not json");
    assert_eq!(r.body(), &json!("{not json"));
    assert_eq!(r.violated_directive(), None);
}

#[test]
fn render_is_labeled_and_indented() {
    let r = ViolationReport::new(json!({"csp-report": {"violated-directive": "img-src"}}));
    assert_eq!(
        r.render(),
        "Content Security Policy violation:\n\n{\n  \"csp-report\": {\n    \"violated-directive\": \"img-src\"\n  }\n}"
    );
}
