//! The name transformation pipeline.
//!
//! Every candidate name goes through the same stages, in this order:
//!
//! 1. the primary operation (script conversion, find/replace, or nothing)
//! 2. symbol stripping
//! 3. prefix/suffix injection around the stem
//!
//! For files the stem/extension split is taken from the *transformed* name,
//! so the extension always stays last. Directories have no extension.

use std::sync::Arc;

use rn_convert::ScriptConverter;
use rn_core::{EntryKind, PrimaryOperation, RenameConfig, split_extension};

/// Applies a [`RenameConfig`] pipeline to entry names.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rn_convert::ScriptConverter;
/// use rn_core::{EntryKind, RenameConfig};
/// use rn_engine::NameTransformer;
/// use camino::Utf8Path;
///
/// let transformer = NameTransformer::new(Arc::new(ScriptConverter::fallback_only()));
/// let config = RenameConfig::new(Utf8Path::new(".")).with_prefix("[").with_suffix("]");
///
/// assert_eq!(transformer.transform(EntryKind::File, "test.txt", &config), "[test].txt");
/// assert_eq!(transformer.transform(EntryKind::Directory, "v1.2", &config), "[v1.2]");
/// ```
#[derive(Debug, Clone)]
pub struct NameTransformer {
    converter: Arc<ScriptConverter>,
}

impl NameTransformer {
    /// Creates a transformer using the given script converter.
    #[must_use]
    pub const fn new(converter: Arc<ScriptConverter>) -> Self {
        Self { converter }
    }

    /// Returns the script converter.
    #[must_use]
    pub fn converter(&self) -> &ScriptConverter {
        &self.converter
    }

    /// Computes the proposed name for one entry.
    ///
    /// The result may equal `name` (a no-op) or be empty; neither is rejected
    /// here. Path separators are removed so the result stays a single segment.
    #[must_use]
    pub fn transform(&self, kind: EntryKind, name: &str, config: &RenameConfig) -> String {
        let primary = self.apply_primary(name, config);
        let stripped = strip_symbols(&primary, &config.strip_symbols);
        let formatted = attach_affixes(kind, &stripped, &config.prefix, &config.suffix);
        into_single_segment(formatted)
    }

    fn apply_primary(&self, name: &str, config: &RenameConfig) -> String {
        match config.primary_operation {
            PrimaryOperation::ScriptConvert => self.converter.convert(name),
            PrimaryOperation::FindReplace => find_replace(name, &config.find_text, &config.replace_text),
            _ => name.to_owned(), // PrimaryOperation::None and any future variants
        }
    }
}

/// Replaces every non-overlapping occurrence of `find`, left to right.
///
/// An empty `find` leaves the name unchanged.
///
/// # Examples
///
/// ```
/// use rn_engine::transform::find_replace;
///
/// assert_eq!(find_replace("hello_world", "_", "-"), "hello-world");
/// assert_eq!(find_replace("aaa", "aa", "b"), "ba");
/// assert_eq!(find_replace("name", "", "x"), "name");
/// ```
#[must_use]
pub fn find_replace(name: &str, find: &str, replace: &str) -> String {
    if find.is_empty() {
        return name.to_owned();
    }
    name.replace(find, replace)
}

/// Removes every occurrence of every character in `symbols`.
///
/// # Examples
///
/// ```
/// use rn_engine::transform::strip_symbols;
///
/// assert_eq!(strip_symbols("test@#$.txt", "@#$"), "test.txt");
/// assert_eq!(strip_symbols("test@#$.txt", "$@#"), "test.txt");
/// ```
#[must_use]
pub fn strip_symbols(name: &str, symbols: &str) -> String {
    if symbols.is_empty() {
        return name.to_owned();
    }
    name.chars().filter(|c| !symbols.contains(*c)).collect()
}

/// Wraps the stem of `name` in `prefix` and `suffix`.
///
/// Files keep their extension (from the last `.` onward) at the end;
/// directories are wrapped whole.
#[must_use]
pub fn attach_affixes(kind: EntryKind, name: &str, prefix: &str, suffix: &str) -> String {
    if prefix.is_empty() && suffix.is_empty() {
        return name.to_owned();
    }

    match kind {
        EntryKind::File => {
            let (stem, extension) = split_extension(name);
            format!("{prefix}{stem}{suffix}{extension}")
        }
        EntryKind::Directory => format!("{prefix}{name}{suffix}"),
    }
}

/// Drops path separators and NUL so the name is a single path segment.
fn into_single_segment(name: String) -> String {
    if name.chars().any(is_forbidden) {
        name.chars().filter(|c| !is_forbidden(*c)).collect()
    } else {
        name
    }
}

#[inline]
fn is_forbidden(c: char) -> bool {
    c == '\0' || std::path::is_separator(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    fn transformer() -> NameTransformer {
        NameTransformer::new(Arc::new(ScriptConverter::fallback_only()))
    }

    fn config() -> RenameConfig {
        RenameConfig::new(Utf8Path::new("."))
    }

    #[test]
    fn test_identity_pipeline() {
        let t = transformer();
        let config = config();
        for name in ["test.txt", "国家.txt", "no_extension", "a.b.c", "dir name"] {
            assert_eq!(t.transform(EntryKind::File, name, &config), name);
            assert_eq!(t.transform(EntryKind::Directory, name, &config), name);
        }
    }

    #[test]
    fn test_script_convert() {
        let config = config().with_primary_operation(PrimaryOperation::ScriptConvert);
        assert_eq!(transformer().transform(EntryKind::File, "国家", &config), "國家");
        assert_eq!(transformer().transform(EntryKind::File, "国家.txt", &config), "國家.txt");
    }

    #[test]
    fn test_find_replace_stage() {
        let config = config()
            .with_primary_operation(PrimaryOperation::FindReplace)
            .with_find_replace("_", "-");
        assert_eq!(transformer().transform(EntryKind::File, "hello_world", &config), "hello-world");
    }

    #[test]
    fn test_find_text_ignored_without_find_replace() {
        let config = config().with_find_replace("_", "-");
        assert_eq!(transformer().transform(EntryKind::File, "hello_world", &config), "hello_world");
    }

    #[test]
    fn test_strip_order_independent() {
        let t = transformer();
        for symbols in ["@#$", "$#@", "#@$"] {
            let config = config().with_strip_symbols(symbols);
            assert_eq!(t.transform(EntryKind::File, "test@#$.txt", &config), "test.txt");
        }
    }

    #[test]
    fn test_affixes_use_transformed_extension() {
        // Replacing the dot changes where the extension starts.
        let config = config()
            .with_primary_operation(PrimaryOperation::FindReplace)
            .with_find_replace(".", "_")
            .with_suffix("!");
        assert_eq!(transformer().transform(EntryKind::File, "a.tar.gz", &config), "a_tar_gz!");
    }

    #[test]
    fn test_affixes_are_not_stripped() {
        let config = config().with_strip_symbols("[]").with_prefix("[").with_suffix("]");
        assert_eq!(transformer().transform(EntryKind::File, "[old].txt", &config), "[old].txt");
    }

    #[test]
    fn test_directory_affixes_wrap_whole_name() {
        let config = config().with_prefix("2024-").with_suffix("_bak");
        assert_eq!(
            transformer().transform(EntryKind::Directory, "photos.raw", &config),
            "2024-photos.raw_bak"
        );
    }

    #[test]
    fn test_empty_stem_is_not_rejected() {
        let config = config().with_strip_symbols("@");
        assert_eq!(transformer().transform(EntryKind::File, "@@@.txt", &config), ".txt");
        assert_eq!(transformer().transform(EntryKind::Directory, "@@", &config), "");
    }

    #[test]
    fn test_separators_removed() {
        let config = config()
            .with_primary_operation(PrimaryOperation::FindReplace)
            .with_find_replace("-", "/");
        assert_eq!(transformer().transform(EntryKind::File, "a-b.txt", &config), "ab.txt");
    }
}
