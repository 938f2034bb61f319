//! Build host environment.
//!
//! Hosted documentation builds (ReadTheDocs) publish under a canonical base
//! URL that the project itself never configures. When no site URL is set,
//! the base is taken from the host instead.

use tracing::debug;

use crate::error::{Error, Result};
use crate::url_utils;

/// Environment variable ReadTheDocs sets on its builders.
pub const READTHEDOCS_ENV: &str = "READTHEDOCS";

/// Facts about the machine running the build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Building on ReadTheDocs.
    pub on_readthedocs: bool,
    /// Canonical base URL provided by the host, if any.
    pub html_baseurl: Option<String>,
}

impl HostEnvironment {
    /// Read the environment of the current process.
    ///
    /// `html_baseurl` is the builder's canonical URL setting, passed through
    /// because it lives in the host's configuration, not the environment.
    #[must_use]
    pub fn from_env(html_baseurl: Option<String>) -> Self {
        Self {
            on_readthedocs: std::env::var_os(READTHEDOCS_ENV).is_some_and(|v| !v.is_empty()),
            html_baseurl,
        }
    }

    /// The site URL pages resolve against.
    ///
    /// A configured URL always wins. On ReadTheDocs without one, the host's
    /// canonical URL is trimmed to scheme, host and path; its absence there
    /// is a misconfigured build and fails.
    pub fn resolve_site_url(&self, configured: Option<&str>) -> Result<Option<String>> {
        if let Some(url) = configured {
            return Ok(Some(url.to_string()));
        }
        if !self.on_readthedocs {
            return Ok(None);
        }

        let baseurl = self
            .html_baseurl
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingCanonicalUrl)?;
        let root = url_utils::canonical_root(baseurl)?;
        debug!(site_url = %root, "using hosted canonical URL");
        Ok(Some(root))
    }
}
