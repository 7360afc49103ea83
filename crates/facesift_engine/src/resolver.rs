use crate::types::{ResolvedSource, SourceKind};

/// Prefix marking a locator as an embedded data URL.
pub const DATA_URL_PREFIX: &str = "data:";

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Same-origin relay taking the target in a `url` query parameter.
    pub proxy_endpoint: String,
    /// Base address prepended to backend-relative locators.
    pub upstream_base: String,
    /// Locator prefixes treated as backend-relative paths.
    pub relative_prefixes: Vec<String>,
    /// Media type assumed for bare embedded payloads.
    pub default_media_type: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            proxy_endpoint: "/api/proxy-image".to_string(),
            upstream_base: String::new(),
            relative_prefixes: vec!["/".to_string()],
            default_media_type: "image/jpeg".to_string(),
        }
    }
}

/// Classifies locators into retrieval plans.
///
/// Upstream services are inconsistent about returning absolute URLs,
/// backend-relative paths, or raw embedded payloads; every consumer
/// (display, single download, batch export) goes through this one decision
/// instead of re-deriving fallback order.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    settings: ResolverSettings,
}

impl Resolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    /// Pure classification: the result depends only on the locator's
    /// shape, never on fetch outcomes.
    pub fn resolve(&self, locator: &str) -> ResolvedSource {
        if locator.starts_with(DATA_URL_PREFIX) {
            return ResolvedSource {
                kind: SourceKind::InlineEmbedded,
                primary_url: locator.to_string(),
                fallback_url: None,
            };
        }
        if locator.starts_with("http://") {
            // Plain-http targets would trip mixed-content/CORS rules when
            // fetched directly, so the proxy goes first.
            return ResolvedSource {
                kind: SourceKind::ProxiedRemote,
                primary_url: self.proxied(locator),
                fallback_url: Some(locator.to_string()),
            };
        }
        if locator.starts_with("https://") {
            return ResolvedSource {
                kind: SourceKind::DirectRemote,
                primary_url: locator.to_string(),
                fallback_url: Some(self.proxied(locator)),
            };
        }
        if self
            .settings
            .relative_prefixes
            .iter()
            .any(|prefix| locator.starts_with(prefix.as_str()))
        {
            return ResolvedSource {
                kind: SourceKind::PathRelative,
                primary_url: format!(
                    "{}{}",
                    self.settings.upstream_base.trim_end_matches('/'),
                    locator
                ),
                fallback_url: None,
            };
        }
        // Anything else is a bare embedded payload without a declared scheme.
        ResolvedSource {
            kind: SourceKind::InlineEmbedded,
            primary_url: format!(
                "{DATA_URL_PREFIX}{};base64,{locator}",
                self.settings.default_media_type
            ),
            fallback_url: None,
        }
    }

    fn proxied(&self, target: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        format!("{}?url={}", self.settings.proxy_endpoint, encoded)
    }
}
