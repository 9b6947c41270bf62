pub const TITLE_KEY: &str = "TITLE";
pub const SHORT_DESCRIPTION_KEY: &str = "SHORT_DESCRIPTION";
pub const DESCRIPTION_KEY: &str = "DESCRIPTION";

/// App-store listing texts for one locale, in fastlane terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppMetadata {
    pub title: String,
    pub short_description: String,
    pub full_description: String,
}
