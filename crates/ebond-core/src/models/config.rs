//! Configuration structures for the extraction and analysis pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::record::Variant;

/// Main configuration for the ebond pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EbondConfig {
    /// PDF reading configuration.
    pub pdf: PdfConfig,

    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output table configuration.
    pub output: OutputConfig,

    /// Analysis configuration.
    pub analytics: AnalyticsConfig,
}

/// PDF reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Attempt to open encrypted PDFs with an empty user password.
    pub try_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            try_empty_password: true,
        }
    }
}

/// How the matched date and amount text is removed from a segment when
/// deriving the entity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCleanup {
    /// Remove every literal occurrence of the matched text.
    #[default]
    AllOccurrences,
    /// Remove only the first literal occurrence.
    FirstOccurrence,
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Entity name cleanup mode.
    pub name_cleanup: NameCleanup,

    /// Log a warning for pages whose date and denomination counts differ.
    pub warn_on_mismatch: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_cleanup: NameCleanup::AllOccurrences,
            warn_on_mismatch: true,
        }
    }
}

/// Output table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Table written by the purchaser pipeline.
    pub purchaser_file: PathBuf,

    /// Table written by the encasher pipeline.
    pub encasher_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            purchaser_file: PathBuf::from("01_Purchaser_Details.csv"),
            encasher_file: PathBuf::from("02_Encasher_Details.csv"),
        }
    }
}

impl OutputConfig {
    /// Default table path for a variant.
    pub fn file_for(&self, variant: Variant) -> &PathBuf {
        match variant {
            Variant::Purchaser => &self.purchaser_file,
            Variant::Encasher => &self.encasher_file,
        }
    }
}

/// Analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Entity filter applied to purchaser tables when none is given.
    pub purchaser_filter: String,

    /// Entity filter applied to encasher tables when none is given.
    pub encasher_filter: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            purchaser_filter: "FUTURE GAMING AND HOTEL SERVICES PR,QWIKSUPPLYCHAINPRIVATELIMITED"
                .to_string(),
            encasher_filter: String::new(),
        }
    }
}

impl AnalyticsConfig {
    /// Default filter text for a variant.
    pub fn filter_for(&self, variant: Variant) -> &str {
        match variant {
            Variant::Purchaser => &self.purchaser_filter,
            Variant::Encasher => &self.encasher_filter,
        }
    }
}

impl EbondConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EbondConfig =
            serde_json::from_str(r#"{"extraction": {"name_cleanup": "first_occurrence"}}"#).unwrap();

        assert_eq!(config.extraction.name_cleanup, NameCleanup::FirstOccurrence);
        assert!(config.extraction.warn_on_mismatch);
        assert_eq!(
            config.output.file_for(Variant::Encasher),
            &PathBuf::from("02_Encasher_Details.csv")
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EbondConfig::default();
        config.pdf.max_pages = 12;
        config.save(&path).unwrap();

        let loaded = EbondConfig::from_file(&path).unwrap();
        assert_eq!(loaded.pdf.max_pages, 12);
    }
}
