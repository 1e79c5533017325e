use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use devcsp_core::error::{CspError, Result};
use devcsp_core::negotiate::RuntimeParams;
use devcsp_core::policy::{CspHeader, Policy};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    /// Per-environment overrides of `app`, keyed by environment name.
    #[serde(default)]
    pub environments: IndexMap<String, AppOverride>,
}

impl DevServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CspError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.app.content_security_policy.validate()?;

        for (env, o) in &self.environments {
            if let Some(p) = &o.content_security_policy {
                p.validate().map_err(|e| {
                    CspError::InvalidConfig(format!("environments.{env}: {e}"))
                })?;
            }
        }

        Ok(())
    }

    /// App section with the override for `server.environment` applied.
    pub fn resolved_app(&self) -> AppSection {
        let mut app = self.app.clone();
        if let Some(o) = self.environments.get(&self.server.environment) {
            o.apply(&mut app);
        }
        app
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub live_reload: bool,

    #[serde(default = "default_live_reload_port")]
    pub live_reload_port: u16,

    #[serde(default = "default_environment")]
    pub environment: String,

    /// Directory served to requests no other route claims.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            live_reload: false,
            live_reload_port: default_live_reload_port(),
            environment: default_environment(),
            root: default_root(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(CspError::InvalidConfig("server.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(CspError::InvalidConfig("server.port must be non-zero".into()));
        }
        if self.live_reload && self.live_reload_port == 0 {
            return Err(CspError::InvalidConfig(
                "server.live_reload_port must be non-zero when live_reload is enabled".into(),
            ));
        }
        Ok(())
    }

    pub fn runtime_params(&self) -> RuntimeParams {
        RuntimeParams {
            host: self.host.clone(),
            port: self.port,
            live_reload: self.live_reload,
            live_reload_port: self.live_reload_port,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    4200
}
fn default_live_reload_port() -> u16 {
    49152
}
fn default_environment() -> String {
    "development".into()
}
fn default_root() -> String {
    "dist".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    /// `None` disables CSP.
    #[serde(default = "default_header", deserialize_with = "de_header")]
    pub content_security_policy_header: Option<CspHeader>,

    /// Omitted or null means the default policy.
    #[serde(default = "Policy::dev_default", deserialize_with = "de_policy")]
    pub content_security_policy: Policy,

    /// Also deliver the policy in a `<meta>` tag of the document head.
    #[serde(default)]
    pub content_security_policy_meta: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            content_security_policy_header: default_header(),
            content_security_policy: Policy::dev_default(),
            content_security_policy_meta: false,
        }
    }
}

fn default_header() -> Option<CspHeader> {
    Some(CspHeader::ReportOnly)
}

fn de_policy<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Policy, D::Error> {
    Ok(Option::<Policy>::deserialize(d)?.unwrap_or_else(Policy::dev_default))
}

/// Header name, with null or `""` meaning "disabled".
fn de_header<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<CspHeader>, D::Error> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(s) => CspHeader::parse(&s).map_err(serde::de::Error::custom),
    }
}

fn de_header_override<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Option<CspHeader>>, D::Error> {
    de_header(d).map(Some)
}

/// Environment-specific changes to the app section. Absent fields keep the
/// base value; policy directives replace the base directive of the same name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppOverride {
    #[serde(default, deserialize_with = "de_header_override")]
    pub content_security_policy_header: Option<Option<CspHeader>>,

    #[serde(default)]
    pub content_security_policy: Option<Policy>,

    #[serde(default)]
    pub content_security_policy_meta: Option<bool>,
}

impl AppOverride {
    pub fn apply(&self, app: &mut AppSection) {
        if let Some(h) = self.content_security_policy_header {
            app.content_security_policy_header = h;
        }
        if let Some(p) = &self.content_security_policy {
            app.content_security_policy.merge(p);
        }
        if let Some(m) = self.content_security_policy_meta {
            app.content_security_policy_meta = m;
        }
    }
}
