//! User-facing text, hard-coded per language.

use crate::error::ValidationError;
use crate::models::Language;

pub struct Messages {
    pub no_results: &'static str,
    pub added: &'static str,
    pub add_failed: &'static str,
    pub name_required: &'static str,
    pub website_required: &'static str,
    pub invalid_url: &'static str,
}

const HINDI: Messages = Messages {
    no_results: "कोई समाचार पत्र नहीं मिला",
    added: "समाचार पत्र सफलतापूर्वक जोड़ा गया",
    add_failed: "समाचार पत्र जोड़ने में त्रुटि",
    name_required: "समाचार पत्र का नाम आवश्यक है",
    website_required: "वेबसाइट URL आवश्यक है",
    invalid_url: "कृपया एक वैध URL दर्ज करें",
};

const MALAYALAM: Messages = Messages {
    no_results: "പത്രങ്ങളൊന്നും കണ്ടെത്തിയില്ല",
    added: "പത്രം വിജയകരമായി ചേർത്തു",
    add_failed: "പത്രം ചേർക്കുന്നതിൽ പിശക്",
    name_required: "പത്രത്തിന്റെ പേര് ആവശ്യമാണ്",
    website_required: "വെബ്സൈറ്റ് URL ആവശ്യമാണ്",
    invalid_url: "സാധുവായ ഒരു URL നൽകുക",
};

impl Language {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Language::Hindi => &HINDI,
            Language::Malayalam => &MALAYALAM,
        }
    }
}

impl Messages {
    pub fn validation(&self, error: &ValidationError) -> &'static str {
        match error {
            ValidationError::NameRequired => self.name_required,
            ValidationError::WebsiteRequired => self.website_required,
            ValidationError::InvalidUrl(_) => self.invalid_url,
        }
    }

    /// One line per error, for a combined report.
    pub fn validation_report(&self, errors: &[ValidationError]) -> String {
        errors
            .iter()
            .map(|e| self.validation(e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
