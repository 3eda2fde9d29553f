//! User-added entries: validation and append-only persistence.

use crate::error::{PersistenceError, ValidationError};
use crate::icon::IconSource;
use crate::models::{Entry, Language};
use crate::storage::{read_json, write_json, KeyValueStore, ADDED_ENTRIES_KEY};
use url::Url;

/// Trimmed, checked submission fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub name: String,
    pub website: String,
    pub kind: String,
}

/// Check a raw submission, reporting every problem at once.
pub fn validate(
    raw_name: &str,
    raw_website: &str,
    raw_kind: &str,
) -> Result<ValidatedInput, Vec<ValidationError>> {
    let name = raw_name.trim();
    let website = raw_website.trim();
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(ValidationError::NameRequired);
    }

    if website.is_empty() {
        errors.push(ValidationError::WebsiteRequired);
    } else if let Err(e) = Url::parse(website) {
        tracing::debug!("Rejected website {:?}: {}", website, e);
        errors.push(ValidationError::InvalidUrl(website.to_string()));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedInput {
        name: name.to_string(),
        website: website.to_string(),
        kind: raw_kind.trim().to_string(),
    })
}

/// Entries the user has added, mirrored in the key-value store.
#[derive(Debug, Clone)]
pub struct UserEntries {
    language: Language,
    entries: Vec<Entry>,
}

impl UserEntries {
    /// Read the persisted list. Missing or unreadable data yields an empty list.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, language: Language) -> Self {
        let entries = match read_json::<Vec<Entry>, _>(store, ADDED_ENTRIES_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring stored user entries: {}", e);
                Vec::new()
            }
        };
        Self { language, entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Build an entry and persist the extended list.
    ///
    /// The list in memory only grows once the write has succeeded.
    pub fn submit<S: KeyValueStore + ?Sized>(
        &mut self,
        input: ValidatedInput,
        icon: IconSource,
        store: &mut S,
    ) -> Result<Entry, PersistenceError> {
        let entry = Entry {
            name: input.name,
            website: input.website,
            kind: input.kind,
            image: Some(icon.into_url()),
            language: self.language.name().to_string(),
        };

        let mut extended = self.entries.clone();
        extended.push(entry.clone());
        write_json(store, ADDED_ENTRIES_KEY, &extended)?;
        self.entries = extended;

        tracing::info!("Added entry {:?} ({})", entry.name, entry.website);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_validate_trims_fields() {
        let input = validate("  Amar Ujala ", " https://amarujala.com ", " National ").unwrap();
        assert_eq!(input.name, "Amar Ujala");
        assert_eq!(input.website, "https://amarujala.com");
        assert_eq!(input.kind, "National");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let errors = validate("   ", "not a url", "national").unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NameRequired,
                ValidationError::InvalidUrl("not a url".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_empty_website_is_required_not_invalid() {
        let errors = validate("", "", "national").unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::NameRequired, ValidationError::WebsiteRequired]
        );
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let errors = validate("A", "example.com/news", "").unwrap_err();
        assert!(matches!(errors.as_slice(), [ValidationError::InvalidUrl(_)]));
    }

    #[test]
    fn test_submit_persists_before_returning() {
        let mut store = MemoryStore::new();
        let mut user = UserEntries::load(&store, Language::Hindi);
        let input = validate("Naya", "https://naya.example", "local").unwrap();

        let entry = user
            .submit(input, IconSource::Favicon("fav".into()), &mut store)
            .unwrap();

        assert_eq!(entry.language, "Hindi");
        assert_eq!(entry.image.as_deref(), Some("fav"));
        let stored: Vec<Entry> = read_json(&store, ADDED_ENTRIES_KEY).unwrap().unwrap();
        assert_eq!(stored, vec![entry]);
    }

    #[test]
    fn test_failed_write_leaves_list_unchanged() {
        let mut store = MemoryStore::read_only();
        let mut user = UserEntries::load(&store, Language::Hindi);
        let input = validate("Naya", "https://naya.example", "local").unwrap();

        let result = user.submit(input, IconSource::Placeholder("ph".into()), &mut store);
        assert!(matches!(result, Err(PersistenceError::Rejected(_))));
        assert!(user.entries().is_empty());
    }
}
