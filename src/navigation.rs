//! Opening links in an external browser
//!
//! Site-open, video search, map navigation, location and web-search
//! fallback all end in a URL being handed off. Nothing is read back.

use url::Url;

use crate::{Error, Result};

/// Hands URLs to something that can show them
pub trait Navigator: Send + Sync {
    /// Open a URL; fire-and-forget
    fn open(&self, url: &Url);
}

/// Opens URLs with the platform's default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn launch(url: &Url) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            tokio::process::Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = tokio::process::Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            tokio::process::Command::new("xdg-open")
        };

        command
            .arg(url.as_str())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| Error::Navigation(format!("failed to launch browser: {e}")))?;

        Ok(())
    }
}

impl Navigator for SystemBrowser {
    fn open(&self, url: &Url) {
        tracing::info!(%url, "opening link");
        if let Err(e) = Self::launch(url) {
            tracing::warn!(error = %e, %url, "could not open link");
        }
    }
}

/// Logs URLs instead of opening them (headless sessions)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open(&self, url: &Url) {
        tracing::info!(%url, "link (not opened)");
    }
}

/// Known sites for the "open <site>" command
const SITES: &[(&str, &str)] = &[
    ("youtube", "https://youtube.com/"),
    ("google", "https://google.com/"),
    ("facebook", "https://facebook.com/"),
    ("instagram", "https://instagram.com/"),
    ("whatsapp", "https://web.whatsapp.com/"),
];

/// Home page for a known site name
#[must_use]
pub fn site_url(site: &str) -> Option<Url> {
    SITES
        .iter()
        .find(|(name, _)| *name == site)
        .and_then(|(_, url)| Url::parse(url).ok())
}

/// Video search results page
#[must_use]
pub fn video_search_url(query: &str) -> Option<Url> {
    Url::parse_with_params(
        "https://www.youtube.com/results",
        &[("search_query", query)],
    )
    .ok()
}

/// Driving directions to a place
#[must_use]
pub fn directions_url(place: &str) -> Option<Url> {
    Url::parse_with_params(
        "https://www.google.com/maps/dir/",
        &[("api", "1"), ("destination", place)],
    )
    .ok()
}

/// Map centred on a position
#[must_use]
pub fn map_url(latitude: f64, longitude: f64) -> Option<Url> {
    Url::parse(&format!("https://www.google.com/maps?q={latitude},{longitude}")).ok()
}

/// Web search results page
#[must_use]
pub fn web_search_url(query: &str) -> Option<Url> {
    Url::parse_with_params("https://www.google.com/search", &[("q", query)]).ok()
}
