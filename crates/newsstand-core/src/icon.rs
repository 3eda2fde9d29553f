//! Entry icon resolution.

use crate::error::IconResolutionError;
use crate::models::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

pub const DEFAULT_FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain=";
pub const DEFAULT_PLACEHOLDER: &str = "https://via.placeholder.com/50?text=News";

/// Where fallback icons come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSettings {
    /// Prefix the bare domain is appended to.
    pub favicon_service: String,
    /// Used when no domain can be parsed.
    pub placeholder: String,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            favicon_service: DEFAULT_FAVICON_SERVICE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl IconSettings {
    /// Favicon-service URL for the website's domain.
    pub fn favicon_url(&self, website: &str) -> Result<String, IconResolutionError> {
        let url = Url::parse(website).map_err(|_| IconResolutionError(website.to_string()))?;
        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(format!("{}{}", self.favicon_service, host)),
            _ => Err(IconResolutionError(website.to_string())),
        }
    }

    /// Favicon for the website, or the placeholder when that fails.
    pub fn fallback_for(&self, website: &str) -> IconSource {
        match self.favicon_url(website) {
            Ok(url) => IconSource::Favicon(url),
            Err(e) => {
                tracing::warn!("Using placeholder icon: {}", e);
                IconSource::Placeholder(self.placeholder.clone())
            }
        }
    }

    /// The image to show for an entry. Called on every render, so it does not log.
    pub fn display_image(&self, entry: &Entry) -> String {
        match &entry.image {
            Some(image) if !image.is_empty() => image.clone(),
            _ => self
                .favicon_url(&entry.website)
                .unwrap_or_else(|_| self.placeholder.clone()),
        }
    }
}

/// Resolved icon of a submitted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// Session-scoped reference to an uploaded logo.
    Uploaded(String),
    Favicon(String),
    Placeholder(String),
}

impl IconSource {
    pub fn into_url(self) -> String {
        match self {
            IconSource::Uploaded(url) | IconSource::Favicon(url) | IconSource::Placeholder(url) => {
                url
            }
        }
    }
}

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Uploaded logo files for the current session.
///
/// References are `blob:` URLs that only resolve inside the session that
/// created them; a reference read back from storage in a later session
/// resolves to nothing and is shown as a broken image.
#[derive(Debug)]
pub struct UploadRegistry {
    session: String,
    next: u64,
    files: HashMap<String, PathBuf>,
}

impl Default for UploadRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadRegistry {
    pub fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or_default();
        let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            session: format!("{:x}-{:x}-{:x}", std::process::id(), nanos, seq),
            next: 0,
            files: HashMap::new(),
        }
    }

    /// Register a file and return its reference.
    pub fn register(&mut self, path: &Path) -> String {
        self.next += 1;
        let reference = format!("blob:newsstand/{}/{}", self.session, self.next);
        self.files.insert(reference.clone(), path.to_path_buf());
        reference
    }

    /// File behind a reference, if it belongs to this session.
    pub fn resolve(&self, reference: &str) -> Option<&Path> {
        self.files.get(reference).map(PathBuf::as_path)
    }
}

/// Icon for a submission: the uploaded file if any, else a derived fallback.
pub fn resolve_icon(
    uploaded: Option<&Path>,
    website: &str,
    settings: &IconSettings,
    uploads: &mut UploadRegistry,
) -> IconSource {
    match uploaded {
        Some(path) if path.is_file() => IconSource::Uploaded(uploads.register(path)),
        Some(path) => {
            tracing::warn!("Logo file {} not found, deriving icon", path.display());
            settings.fallback_for(website)
        }
        None => settings.fallback_for(website),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favicon_url_contains_domain() {
        let settings = IconSettings::default();
        let url = settings.favicon_url("https://example.com/news").unwrap();
        assert_eq!(url, "https://www.google.com/s2/favicons?domain=example.com");
    }

    #[test]
    fn test_favicon_url_keeps_full_host() {
        let settings = IconSettings::default();
        let url = settings.favicon_url("https://www.bhaskar.com/").unwrap();
        assert_eq!(url, "https://www.google.com/s2/favicons?domain=www.bhaskar.com");
    }

    #[test]
    fn test_hostless_url_falls_back_to_placeholder() {
        let settings = IconSettings::default();
        assert!(settings.favicon_url("mailto:desk@example.com").is_err());
        assert_eq!(
            settings.fallback_for("mailto:desk@example.com"),
            IconSource::Placeholder(DEFAULT_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn test_display_image_prefers_entry_image() {
        let settings = IconSettings::default();
        let mut entry = Entry {
            name: "A".into(),
            website: "https://a.example/path".into(),
            kind: "national".into(),
            image: Some("https://cdn.example/a.png".into()),
            language: "Hindi".into(),
        };
        assert_eq!(settings.display_image(&entry), "https://cdn.example/a.png");

        entry.image = None;
        assert!(settings.display_image(&entry).ends_with("domain=a.example"));
    }

    #[test]
    fn test_uploaded_logo_is_session_scoped() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"png").unwrap();

        let settings = IconSettings::default();
        let mut uploads = UploadRegistry::new();
        let icon = resolve_icon(Some(&logo), "https://a.example", &settings, &mut uploads);

        let IconSource::Uploaded(reference) = icon else {
            panic!("expected uploaded icon, got {icon:?}");
        };
        assert!(reference.starts_with("blob:"));
        assert_eq!(uploads.resolve(&reference), Some(logo.as_path()));

        let next_session = UploadRegistry::new();
        assert_eq!(next_session.resolve(&reference), None);
    }

    #[test]
    fn test_missing_logo_file_derives_favicon() {
        let settings = IconSettings::default();
        let mut uploads = UploadRegistry::new();
        let icon = resolve_icon(
            Some(Path::new("/nonexistent/logo.png")),
            "https://b.example",
            &settings,
            &mut uploads,
        );
        assert!(matches!(icon, IconSource::Favicon(url) if url.ends_with("b.example")));
    }
}
