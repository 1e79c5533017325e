#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use devcsp_core::policy::{meta_tag, unsupported_directives, Policy};

/// In-memory log writer shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with warnings captured; returns its result and the log text.
fn with_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let cap = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(cap.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(cap.0.lock().unwrap().clone()).unwrap();
    (out, logs)
}

#[test]
fn detects_unsupported_regardless_of_value() {
    let p = Policy::new().with("sandbox", "").with("default-src", "'self'");
    assert_eq!(unsupported_directives(&p), vec!["sandbox"]);
}

#[test]
fn empty_policy_has_nothing_unsupported() {
    assert!(unsupported_directives(&Policy::new()).is_empty());
}

#[test]
fn reports_in_fixed_order() {
    let p = Policy::new()
        .with("sandbox", "allow-scripts")
        .with("frame-ancestors", "'none'")
        .with("report-uri", "/csp");
    assert_eq!(
        unsupported_directives(&p),
        vec!["report-uri", "frame-ancestors", "sandbox"]
    );
}

#[test]
fn meta_tag_keeps_unsupported_directives() {
    let p = Policy::new()
        .with("default-src", "'self'")
        .with("frame-ancestors", "'none'");
    let tag = meta_tag(&p).expect("non-empty policy yields a tag");
    assert_eq!(
        tag,
        r#"<meta http-equiv="Content-Security-Policy" content="default-src 'self'; frame-ancestors 'none'">"#
    );
}

#[test]
fn meta_tag_skipped_for_empty_policy() {
    assert!(meta_tag(&Policy::new()).is_none());
    assert!(meta_tag(&Policy::new().with("sandbox", "")).is_none());
}

#[test]
fn meta_tag_escapes_attribute_quotes() {
    let p = Policy::new().with("img-src", r#"https://a.example/?q="x"&y"#);
    let tag = meta_tag(&p).unwrap();
    assert!(tag.contains("content=\"img-src https://a.example/?q=&quot;x&quot;&amp;y\""));
}

#[test]
fn meta_tag_warns_once_per_unsupported_directive() {
    let p = Policy::new()
        .with("default-src", "'self'")
        .with("sandbox", "allow-scripts")
        .with("report-uri", "/csp-report")
        .with("frame-ancestors", "'none'");
    let (tag, logs) = with_warnings(|| meta_tag(&p));

    assert!(tag.is_some());
    for name in ["report-uri", "frame-ancestors", "sandbox"] {
        let line = format!("does not support `{name}`");
        assert_eq!(logs.matches(&line).count(), 1, "{name}: {logs}");
    }
    assert!(!logs.contains("no policy exists"));
}

#[test]
fn meta_tag_warns_when_no_policy_exists() {
    let (tag, logs) = with_warnings(|| meta_tag(&Policy::new()));

    assert!(tag.is_none());
    assert!(logs.contains("CSP via meta tag enabled but no policy exists."));
}

#[test]
fn supported_policy_emits_no_warnings() {
    let p = Policy::new().with("default-src", "'self'");
    let (_, logs) = with_warnings(|| meta_tag(&p));
    assert!(logs.is_empty(), "{logs}");
}
