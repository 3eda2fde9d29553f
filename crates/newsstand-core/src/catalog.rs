//! Static catalog loading and visible-subset derivation.

use crate::error::LoadError;
use crate::models::{Entry, Language, ALL_CATEGORIES};
use std::path::PathBuf;
use url::Url;

/// Where the static catalog comes from.
pub trait CatalogSource {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Fetch the raw JSON document.
    fn fetch(&self) -> Result<String, LoadError>;
}

/// Catalog stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// Catalog served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let url = self.url.to_string();
        let request_err = |source| LoadError::Request {
            url: url.clone(),
            source,
        };

        let response = reqwest::blocking::get(self.url.clone()).map_err(request_err)?;
        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: url.clone(),
                status: response.status().as_u16(),
            });
        }

        response.text().map_err(request_err)
    }
}

/// Pick the source for `language` under `location`.
///
/// `location` is either an `http(s)://` base URL or a directory path; the
/// language's data file name is appended to it.
pub fn source_for(location: &str, language: Language) -> Result<Box<dyn CatalogSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let mut base = location.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)
            .and_then(|base| base.join(language.data_file()))
            .map_err(|e| LoadError::Location(format!("{location}: {e}")))?;
        Ok(Box::new(HttpSource::new(url)))
    } else {
        Ok(Box::new(FileSource::new(
            PathBuf::from(location).join(language.data_file()),
        )))
    }
}

/// Fetch and decode the static catalog.
///
/// Entries without a language are tagged with `language`.
pub fn load(source: &dyn CatalogSource, language: Language) -> Result<Vec<Entry>, LoadError> {
    let raw = source.fetch()?;
    let mut entries: Vec<Entry> = serde_json::from_str(&raw)?;

    for entry in &mut entries {
        if entry.language.is_empty() {
            entry.language = language.name().to_string();
        }
    }

    tracing::info!("Loaded {} entries from {}", entries.len(), source.describe());
    Ok(entries)
}

/// Static entries followed by user-added ones. No dedup.
pub fn merge(static_entries: Vec<Entry>, user_added: &[Entry]) -> Vec<Entry> {
    let mut all = static_entries;
    all.extend_from_slice(user_added);
    all
}

/// Entries matching both the category and the search term, in input order.
pub fn derive_visible(all: &[Entry], category: &str, search: &str) -> Vec<Entry> {
    let category = category.to_lowercase();
    let search = search.to_lowercase();
    let any_category = category == ALL_CATEGORIES;

    all.iter()
        .filter(|entry| any_category || entry.category() == category)
        .filter(|entry| search.is_empty() || entry.name.to_lowercase().contains(&search))
        .cloned()
        .collect()
}

/// Entries whose name is favorited. Category and search are ignored.
pub fn derive_favorites_view(all: &[Entry], favorites: &[String]) -> Vec<Entry> {
    all.iter()
        .filter(|entry| favorites.iter().any(|name| name == &entry.name))
        .cloned()
        .collect()
}

/// `"all"` followed by each distinct lower-cased category in first-seen order.
pub fn categories(all: &[Entry]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for entry in all {
        let category = entry.category();
        if !category.is_empty() && !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: &str) -> Entry {
        Entry {
            name: name.to_string(),
            website: format!("https://{}.example", name.to_lowercase().replace(' ', "")),
            kind: kind.to_string(),
            image: None,
            language: "Hindi".to_string(),
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("Dainik Bhaskar", "National"),
            entry("Amar Ujala", "national"),
            entry("Khel Samachar", "Sports"),
            entry("Dainik Jagran", "regional"),
        ]
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_all_category_is_identity() {
        let all = sample();
        assert_eq!(derive_visible(&all, "all", ""), all);
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let all = sample();
        let visible = derive_visible(&all, "national", "");
        assert_eq!(names(&visible), ["Dainik Bhaskar", "Amar Ujala"]);

        let visible = derive_visible(&all, "SPORTS", "");
        assert_eq!(names(&visible), ["Khel Samachar"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let all = sample();
        let visible = derive_visible(&all, "all", "DAINIK");
        assert_eq!(names(&visible), ["Dainik Bhaskar", "Dainik Jagran"]);

        let visible = derive_visible(&all, "all", "ujal");
        assert_eq!(names(&visible), ["Amar Ujala"]);
    }

    #[test]
    fn test_filters_compose() {
        let all = sample();
        let visible = derive_visible(&all, "national", "dainik");
        assert_eq!(names(&visible), ["Dainik Bhaskar"]);
    }

    #[test]
    fn test_no_match_in_category_is_empty() {
        let all = vec![
            entry("One", "national"),
            entry("Two", "national"),
            entry("Three", "sports"),
        ];
        assert!(derive_visible(&all, "sports", "zzz").is_empty());
    }

    #[test]
    fn test_non_latin_search() {
        let all = vec![entry("दैनिक भास्कर", "national"), entry("अमर उजाला", "national")];
        let visible = derive_visible(&all, "all", "उजाला");
        assert_eq!(names(&visible), ["अमर उजाला"]);
    }

    #[test]
    fn test_favorites_view_ignores_filters_and_keeps_order() {
        let all = sample();
        let favorites = vec!["Khel Samachar".to_string(), "Dainik Bhaskar".to_string()];
        let visible = derive_favorites_view(&all, &favorites);
        assert_eq!(names(&visible), ["Dainik Bhaskar", "Khel Samachar"]);
    }

    #[test]
    fn test_merge_keeps_duplicates_static_first() {
        let user = vec![entry("Amar Ujala", "national"), entry("New One", "local")];
        let merged = merge(sample(), &user);
        assert_eq!(merged.len(), 6);
        assert_eq!(merged[4].name, "Amar Ujala");
        assert_eq!(merged[5].name, "New One");
    }

    #[test]
    fn test_categories_are_distinct_lowercase() {
        assert_eq!(
            categories(&sample()),
            ["all", "national", "sports", "regional"]
        );
    }

    #[test]
    fn test_load_fills_missing_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ml.json");
        std::fs::write(
            &path,
            r#"[{"name":"Manorama","website":"https://manorama.example","type":"national"},
                {"name":"Mathrubhumi","website":"https://mathrubhumi.example","type":"national","language":"Other"}]"#,
        )
        .unwrap();

        let entries = load(&FileSource::new(&path), Language::Malayalam).unwrap();
        assert_eq!(entries[0].language, "Malayalam");
        assert_eq!(entries[1].language, "Other");
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileSource::new(dir.path().join("hi.json"));
        assert!(matches!(load(&missing, Language::Hindi), Err(LoadError::Io { .. })));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"name": 1}"#).unwrap();
        assert!(matches!(
            load(&FileSource::new(&path), Language::Hindi),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn test_source_for_picks_file_or_http() {
        let source = source_for("data", Language::Hindi).unwrap();
        assert!(source.describe().ends_with("hi.json"));

        let source = source_for("https://news.example/catalogs", Language::Malayalam).unwrap();
        assert_eq!(source.describe(), "https://news.example/catalogs/ml.json");
    }

    #[test]
    fn test_unreachable_http_source_is_load_error() {
        let source = HttpSource::new(Url::parse("http://127.0.0.1:9/hi.json").unwrap());
        assert!(matches!(
            load(&source, Language::Hindi),
            Err(LoadError::Request { .. })
        ));
    }
}
