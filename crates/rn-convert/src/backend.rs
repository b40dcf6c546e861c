//! The conversion backend capability.

use std::fmt;

/// A full simplified-to-traditional conversion engine.
///
/// Implementations must be deterministic for a given input. Returning
/// `None` signals that the backend could not convert this text; the
/// converter then falls back to the built-in table.
///
/// # Examples
///
/// ```
/// use rn_convert::ConversionBackend;
///
/// #[derive(Debug)]
/// struct Uppercase;
///
/// impl ConversionBackend for Uppercase {
///     fn name(&self) -> &str {
///         "uppercase"
///     }
///
///     fn convert(&self, text: &str) -> Option<String> {
///         Some(text.to_uppercase())
///     }
/// }
///
/// assert_eq!(Uppercase.convert("abc").as_deref(), Some("ABC"));
/// ```
pub trait ConversionBackend: fmt::Debug + Send + Sync {
    /// Short name used in status strings and logs.
    fn name(&self) -> &str;

    /// Converts `text`, or returns `None` on failure.
    fn convert(&self, text: &str) -> Option<String>;
}
