//! Build-time content for the generated `index.html`.
//!
//! The host inserts whatever `content_for` returns at the matching point of the
//! document. Only the head receives anything, and only when meta delivery is
//! enabled.

use std::str::FromStr;

use devcsp_core::error::CspError;
use devcsp_core::policy::meta_tag;

use crate::config::AppSection;

/// Insertion points of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSection {
    Head,
    HeadFooter,
    Body,
    BodyFooter,
}

impl FromStr for ContentSection {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(ContentSection::Head),
            "head-footer" => Ok(ContentSection::HeadFooter),
            "body" => Ok(ContentSection::Body),
            "body-footer" => Ok(ContentSection::BodyFooter),
            other => Err(CspError::InvalidConfig(format!("unknown content section: {other}"))),
        }
    }
}

/// The `<meta http-equiv="Content-Security-Policy">` tag for the head, built
/// from the declared policy (no dev-server augmentation).
pub fn content_for(section: ContentSection, app: &AppSection) -> Option<String> {
    if section != ContentSection::Head || !app.content_security_policy_meta {
        return None;
    }
    meta_tag(&app.content_security_policy)
}
