//! Configuration structures for the renamer.
//!
//! - [`RenameConfig`] - One planning run (root, filters, transformation pipeline)
//! - [`ConverterConfig`] - Where the full script-conversion dictionary lives
//! - [`ConfirmConfig`] - Two-step confirmation behavior of front-ends
//! - [`AppConfig`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] and deserialize with
//! `#[serde(default)]`, so a configuration file only has to name the options
//! it changes.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ConfigError;

/// Which kinds of entries are renamed.
///
/// Recursion into subdirectories is controlled separately by
/// [`RenameConfig::recurse_into_folders`]; excluding folders here never stops
/// the scanner from descending into them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EntryScope {
    /// Only files are added to the plan.
    #[default]
    FilesOnly,
    /// Files and directories are added to the plan.
    FilesAndFolders,
}

impl EntryScope {
    /// Returns `true` if directories themselves are renamed.
    #[inline]
    #[must_use]
    pub const fn includes_folders(self) -> bool {
        matches!(self, Self::FilesAndFolders)
    }
}

/// The single primary operation applied first in the name pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PrimaryOperation {
    /// Leave the name as-is.
    #[default]
    None,
    /// Convert simplified Chinese characters to traditional ones.
    ScriptConvert,
    /// Replace every literal occurrence of `find_text` with `replace_text`.
    FindReplace,
}

impl PrimaryOperation {
    /// Returns a human-readable label for this operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rn_core::PrimaryOperation;
    ///
    /// assert_eq!(PrimaryOperation::ScriptConvert.label(), "Simplified -> Traditional");
    /// ```
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No Operation",
            Self::ScriptConvert => "Simplified -> Traditional",
            Self::FindReplace => "Replace Text",
        }
    }
}

/// Extension filter applied to file entries.
///
/// Extensions are stored lower-cased with a leading dot (`.jpg`), matching
/// the form produced by [`split_extension`](crate::split_extension).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionFilter {
    /// Every file passes.
    #[default]
    None,
    /// Only files whose lower-cased extension is in the set pass.
    Only(SmallVec<[String; 4]>),
}

impl ExtensionFilter {
    /// Parses a comma-separated list such as `"jpg, .PNG ,txt"`.
    ///
    /// Items are trimmed, lower-cased, and given a leading dot. Blank items
    /// are dropped; an input with no usable items yields [`ExtensionFilter::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rn_core::ExtensionFilter;
    ///
    /// let filter = ExtensionFilter::parse("jpg, .PNG");
    /// assert!(filter.matches(".jpg"));
    /// assert!(filter.matches(".png"));
    /// assert!(!filter.matches(".txt"));
    ///
    /// assert_eq!(ExtensionFilter::parse(" , "), ExtensionFilter::None);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::from_extensions(input.split(','))
    }

    /// Builds a filter from individual extension strings.
    #[must_use]
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: SmallVec<[String; 4]> = SmallVec::new();
        for raw in extensions {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() || trimmed == "." {
                continue;
            }
            let lowered = trimmed.to_lowercase();
            let normalized = if lowered.starts_with('.') {
                lowered
            } else {
                format!(".{lowered}")
            };
            if !set.contains(&normalized) {
                set.push(normalized);
            }
        }

        if set.is_empty() {
            Self::None
        } else {
            Self::Only(set)
        }
    }

    /// Returns `true` if a filter set is in effect.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Returns `true` if a file with the given extension passes the filter.
    ///
    /// The comparison is case-insensitive; `extension` is the raw suffix from
    /// the last dot onward (empty when the name has no dot).
    #[must_use]
    pub fn matches(&self, extension: &str) -> bool {
        match self {
            Self::None => true,
            Self::Only(set) => {
                let lowered = extension.to_lowercase();
                set.iter().any(|ext| *ext == lowered)
            }
        }
    }
}

/// Configuration for one planning run.
///
/// Passed by value into the engine; the engine never mutates it.
///
/// # Examples
///
/// ```
/// use rn_core::{PrimaryOperation, RenameConfig};
/// use camino::Utf8Path;
///
/// let config = RenameConfig::new(Utf8Path::new("./photos"))
///     .with_primary_operation(PrimaryOperation::FindReplace)
///     .with_find_replace("_", "-")
///     .with_prefix("[")
///     .with_suffix("]");
///
/// assert!(config.recurse_into_folders);
/// assert_eq!(config.find_text, "_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Directory whose contents are planned.
    pub root_path: Utf8PathBuf,

    /// Whether the scanner descends into subdirectories.
    pub recurse_into_folders: bool,

    /// Whether folders are renamed in addition to files.
    pub entry_scope: EntryScope,

    /// Extension filter for files.
    pub extension_filter: ExtensionFilter,

    /// First stage of the name pipeline.
    pub primary_operation: PrimaryOperation,

    /// Text searched for by [`PrimaryOperation::FindReplace`].
    pub find_text: String,

    /// Replacement text for [`PrimaryOperation::FindReplace`].
    pub replace_text: String,

    /// Characters removed from every name.
    pub strip_symbols: String,

    /// Text prepended to the stem.
    pub prefix: String,

    /// Text appended to the stem (before the extension for files).
    pub suffix: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            root_path: Utf8PathBuf::new(),
            recurse_into_folders: true,
            entry_scope: EntryScope::FilesOnly,
            extension_filter: ExtensionFilter::None,
            primary_operation: PrimaryOperation::None,
            find_text: String::new(),
            replace_text: String::new(),
            strip_symbols: String::new(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl RenameConfig {
    /// Creates a configuration for the given root with identity settings.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            root_path: root.to_owned(),
            ..Self::default()
        }
    }

    /// Sets whether the scanner descends into subdirectories.
    #[must_use]
    pub const fn with_recursion(mut self, recurse: bool) -> Self {
        self.recurse_into_folders = recurse;
        self
    }

    /// Sets which entry kinds are renamed.
    #[must_use]
    pub const fn with_entry_scope(mut self, scope: EntryScope) -> Self {
        self.entry_scope = scope;
        self
    }

    /// Sets the extension filter.
    #[must_use]
    pub fn with_extension_filter(mut self, filter: ExtensionFilter) -> Self {
        self.extension_filter = filter;
        self
    }

    /// Sets the primary operation.
    #[must_use]
    pub const fn with_primary_operation(mut self, operation: PrimaryOperation) -> Self {
        self.primary_operation = operation;
        self
    }

    /// Sets the find and replace texts.
    #[must_use]
    pub fn with_find_replace(mut self, find: impl Into<String>, replace: impl Into<String>) -> Self {
        self.find_text = find.into();
        self.replace_text = replace.into();
        self
    }

    /// Sets the characters to strip.
    #[must_use]
    pub fn with_strip_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.strip_symbols = symbols.into();
        self
    }

    /// Sets the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Returns `true` if no stage of the pipeline can change a name.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        let primary_is_noop = match self.primary_operation {
            PrimaryOperation::None => true,
            PrimaryOperation::FindReplace => self.find_text.is_empty(),
            PrimaryOperation::ScriptConvert => false,
        };
        primary_is_noop
            && self.strip_symbols.is_empty()
            && self.prefix.is_empty()
            && self.suffix.is_empty()
    }
}

/// Where the full script-conversion backend is loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Directory holding OpenCC-format `STPhrases.txt` / `STCharacters.txt`.
    ///
    /// `None` means no full backend; conversion uses the built-in table.
    pub dictionary_dir: Option<Utf8PathBuf>,
}

/// Two-step confirmation settings for interactive front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmConfig {
    /// Seconds an armed confirmation stays valid.
    pub timeout_secs: u64,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Root configuration for the renamer.
///
/// # Examples
///
/// ```
/// use rn_core::AppConfig;
///
/// let config: AppConfig = serde_json::from_str(r#"{"plan": {"prefix": "old_"}}"#).unwrap();
/// assert_eq!(config.plan.prefix, "old_");
/// assert_eq!(config.confirm.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Planning defaults.
    pub plan: RenameConfig,

    /// Script converter settings.
    pub converter: ConverterConfig,

    /// Confirmation settings.
    pub confirm: ConfirmConfig,
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file does not exist,
    /// [`ConfigError::Io`] if it cannot be read, and [`ConfigError::Parse`]
    /// if it is not valid JSON for this structure. Values rejected by
    /// [`validate`](Self::validate) return [`ConfigError::InvalidOption`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_owned()));
        }
        if !path.is_file() {
            return Err(ConfigError::InvalidPath {
                path: path.to_owned(),
                reason: "not a regular file".to_owned(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.confirm.timeout_secs == 0 {
            return Err(ConfigError::invalid_option(
                "confirm.timeout_secs",
                "must be at least one second",
            ));
        }
        Ok(())
    }
}
