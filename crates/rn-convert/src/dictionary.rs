//! OpenCC-format dictionary backend.
//!
//! Reads the plain-text dictionaries shipped with OpenCC (`STPhrases.txt`
//! and `STCharacters.txt`) and converts by greedy forward maximum matching:
//! at each position the longest dictionary key wins, and the first listed
//! candidate is used.
//!
//! # File Format
//!
//! ```text
//! # comment
//! 国	國
//! 么	麼 幺
//! 一出	一齣
//! ```
//!
//! Each line is a source string, a tab (or other whitespace), and one or
//! more space-separated candidates.

use camino::Utf8Path;
use rn_core::{FxHashMap, fx_hash_map};
use tracing::debug;

use crate::backend::ConversionBackend;
use crate::error::ConvertError;

/// Single-character dictionary file name. Required.
pub const CHARACTERS_FILE: &str = "STCharacters.txt";

/// Phrase dictionary file name. Optional.
pub const PHRASES_FILE: &str = "STPhrases.txt";

/// A conversion backend backed by OpenCC dictionary files.
#[derive(Debug, Clone)]
pub struct DictionaryBackend {
    /// Source string to first candidate.
    table: FxHashMap<String, String>,
    /// Longest key length, in characters.
    max_key_chars: usize,
}

impl DictionaryBackend {
    /// Loads the dictionaries from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingDictionary`] if `dir` or its
    /// `STCharacters.txt` is missing, [`ConvertError::Read`] if a file cannot
    /// be read, and [`ConvertError::Malformed`] for lines without a candidate.
    pub fn load(dir: &Utf8Path) -> Result<Self, ConvertError> {
        if !dir.is_dir() {
            return Err(ConvertError::MissingDictionary(dir.to_owned()));
        }

        let characters = dir.join(CHARACTERS_FILE);
        if !characters.is_file() {
            return Err(ConvertError::MissingDictionary(characters));
        }

        let mut backend = Self {
            table: fx_hash_map(),
            max_key_chars: 0,
        };
        backend.load_file(&characters)?;

        let phrases = dir.join(PHRASES_FILE);
        if phrases.is_file() {
            backend.load_file(&phrases)?;
        }

        debug!(dir = %dir, entries = backend.len(), "Loaded conversion dictionary");
        Ok(backend)
    }

    /// Builds a backend from in-memory dictionary text.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Malformed`] for lines without a candidate.
    pub fn from_text(text: &str) -> Result<Self, ConvertError> {
        let mut backend = Self {
            table: fx_hash_map(),
            max_key_chars: 0,
        };
        backend.parse_into(Utf8Path::new("<memory>"), text)?;
        Ok(backend)
    }

    /// Number of dictionary entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no entries were loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn load_file(&mut self, path: &Utf8Path) -> Result<(), ConvertError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConvertError::read(path, e))?;
        self.parse_into(path, &text)
    }

    fn parse_into(&mut self, path: &Utf8Path, text: &str) -> Result<(), ConvertError> {
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(source), Some(candidate)) = (fields.next(), fields.next()) else {
                return Err(ConvertError::Malformed {
                    path: path.to_owned(),
                    line: index + 1,
                });
            };

            self.max_key_chars = self.max_key_chars.max(source.chars().count());
            self.table.insert(source.to_owned(), candidate.to_owned());
        }
        Ok(())
    }
}

impl ConversionBackend for DictionaryBackend {
    fn name(&self) -> &str {
        "opencc-dictionary"
    }

    fn convert(&self, text: &str) -> Option<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut output = String::with_capacity(text.len());
        let mut key = String::new();
        let mut position = 0;

        while position < chars.len() {
            let longest = self.max_key_chars.min(chars.len() - position);
            let mut matched = false;

            for len in (1..=longest).rev() {
                key.clear();
                key.extend(&chars[position..position + len]);
                if let Some(replacement) = self.table.get(&key) {
                    output.push_str(replacement);
                    position += len;
                    matched = true;
                    break;
                }
            }

            if !matched {
                output.push(chars[position]);
                position += 1;
            }
        }

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    const SAMPLE: &str = "# sample\n国\t國\n发\t發 髮\n头\t頭\n头发\t頭髮\n\n";

    #[test]
    fn test_from_text_parses_entries() {
        let backend = DictionaryBackend::from_text(SAMPLE).unwrap();
        assert_eq!(backend.len(), 4);
        assert!(!backend.is_empty());
    }

    #[test]
    fn test_longest_match_wins() {
        let backend = DictionaryBackend::from_text(SAMPLE).unwrap();
        assert_eq!(backend.convert("头发").as_deref(), Some("頭髮"));
        assert_eq!(backend.convert("发国").as_deref(), Some("發國"));
        assert_eq!(backend.convert("abc").as_deref(), Some("abc"));
    }

    #[test]
    fn test_malformed_line() {
        let err = DictionaryBackend::from_text("国\t國\n孤儿\n").unwrap_err();
        assert!(matches!(err, ConvertError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join(CHARACTERS_FILE), "国\t國\n文\t文\n").unwrap();
        std::fs::write(root.join(PHRASES_FILE), "文件\t文件\n").unwrap();

        let backend = DictionaryBackend::load(&root).unwrap();
        assert_eq!(backend.len(), 3);
        assert_eq!(backend.convert("国家").as_deref(), Some("國家"));
    }

    #[test]
    fn test_load_missing_characters_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let err = DictionaryBackend::load(&root).unwrap_err();
        assert!(matches!(err, ConvertError::MissingDictionary(path) if path.ends_with(CHARACTERS_FILE)));

        let err = DictionaryBackend::load(&root.join("nope")).unwrap_err();
        assert!(matches!(err, ConvertError::MissingDictionary(_)));
    }
}
