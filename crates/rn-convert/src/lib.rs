//! Simplified to traditional Chinese conversion for entry names.
//!
//! [`ScriptConverter`] prefers a full conversion backend and degrades to a
//! small built-in table of high-frequency characters. It never fails: a
//! backend that is missing, misconfigured, or returns its input unchanged
//! simply hands the text to the fallback table.
//!
//! # Backend Probe
//!
//! The backend is loaded lazily, at most once per converter, on the first
//! call to [`convert`](ScriptConverter::convert) or
//! [`status`](ScriptConverter::status). A loaded backend only becomes active
//! if it converts `国` to `國`. Share one converter (behind an `Arc`) for the
//! lifetime of the process to probe only once.
//!
//! ```text
//! BackendSource::None                   -> status "unavailable", fallback table
//! BackendSource::Dictionary(dir) fails  -> status "fallback",    fallback table
//! backend passes the probe              -> status "active",      backend first
//! ```
//!
//! # Examples
//!
//! ```
//! use rn_convert::{BackendSource, ConverterStatus, ScriptConverter};
//!
//! let converter = ScriptConverter::new(BackendSource::None);
//! assert_eq!(converter.convert("国家"), "國家");
//! assert_eq!(converter.status(), ConverterStatus::Unavailable);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod backend;
mod dictionary;
mod error;
pub mod fallback;

pub use backend::ConversionBackend;
pub use dictionary::{CHARACTERS_FILE, DictionaryBackend, PHRASES_FILE};
pub use error::ConvertError;

use std::fmt;
use std::sync::{Arc, OnceLock};

use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

/// Input used to check that a backend really converts.
pub const PROBE_INPUT: &str = "国";

/// Expected backend output for [`PROBE_INPUT`].
pub const PROBE_EXPECTED: &str = "國";

/// Where the full conversion backend comes from.
#[derive(Clone, Default)]
pub enum BackendSource {
    /// No full backend; always use the fallback table.
    #[default]
    None,
    /// Load OpenCC dictionaries from this directory.
    Dictionary(Utf8PathBuf),
    /// An already-built backend (tests, embedders).
    Custom(Arc<dyn ConversionBackend>),
}

impl BackendSource {
    /// Builds a source from an optional dictionary directory.
    #[must_use]
    pub fn from_dictionary_dir(dir: Option<Utf8PathBuf>) -> Self {
        dir.map_or(Self::None, Self::Dictionary)
    }
}

impl fmt::Debug for BackendSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Dictionary(dir) => f.debug_tuple("Dictionary").field(dir).finish(),
            Self::Custom(backend) => f.debug_tuple("Custom").field(&backend.name()).finish(),
        }
    }
}

/// Availability of the full conversion backend.
///
/// Informational only: it never changes what a scan produces beyond which
/// table performed the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterStatus {
    /// A backend passed the probe and is used first.
    Active,
    /// A backend was configured but could not be used.
    Fallback,
    /// No backend was configured.
    Unavailable,
}

impl ConverterStatus {
    /// Returns the status as a lowercase word.
    ///
    /// # Examples
    ///
    /// ```
    /// use rn_convert::ConverterStatus;
    ///
    /// assert_eq!(ConverterStatus::Active.as_str(), "active");
    /// assert_eq!(ConverterStatus::Fallback.as_str(), "fallback");
    /// assert_eq!(ConverterStatus::Unavailable.as_str(), "unavailable");
    /// ```
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Fallback => "fallback",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ConverterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the one-time backend probe.
#[derive(Debug)]
struct Probe {
    backend: Option<Arc<dyn ConversionBackend>>,
    status: ConverterStatus,
    detail: String,
}

/// Converts names from simplified to traditional script.
#[derive(Debug)]
pub struct ScriptConverter {
    source: BackendSource,
    probe: OnceLock<Probe>,
}

impl ScriptConverter {
    /// Creates a converter. The backend is not loaded until first use.
    #[must_use]
    pub const fn new(source: BackendSource) -> Self {
        Self {
            source,
            probe: OnceLock::new(),
        }
    }

    /// Creates a converter that only uses the fallback table.
    #[must_use]
    pub const fn fallback_only() -> Self {
        Self::new(BackendSource::None)
    }

    /// Converts `text` to traditional script.
    ///
    /// Uses the active backend when its output differs from the input,
    /// otherwise the fallback table.
    #[must_use]
    pub fn convert(&self, text: &str) -> String {
        if let Some(backend) = &self.probe().backend {
            match backend.convert(text) {
                Some(converted) if converted != text => return converted,
                Some(_) => {}
                None => debug!(backend = backend.name(), "Backend could not convert text"),
            }
        }
        fallback::convert(text)
    }

    /// Returns the backend status, probing it if needed.
    #[must_use]
    pub fn status(&self) -> ConverterStatus {
        self.probe().status
    }

    /// Returns a human-readable status such as `active (opencc-dictionary)`.
    #[must_use]
    pub fn status_label(&self) -> &str {
        &self.probe().detail
    }

    fn probe(&self) -> &Probe {
        self.probe.get_or_init(|| run_probe(&self.source))
    }
}

impl Default for ScriptConverter {
    fn default() -> Self {
        Self::fallback_only()
    }
}

fn run_probe(source: &BackendSource) -> Probe {
    let backend: Arc<dyn ConversionBackend> = match source {
        BackendSource::None => {
            debug!("No conversion backend configured, using fallback table");
            return Probe {
                backend: None,
                status: ConverterStatus::Unavailable,
                detail: ConverterStatus::Unavailable.as_str().to_owned(),
            };
        }
        BackendSource::Dictionary(dir) => match DictionaryBackend::load(dir) {
            Ok(backend) => Arc::new(backend),
            Err(e) => return degraded(&e),
        },
        BackendSource::Custom(backend) => Arc::clone(backend),
    };

    match check_probe(backend.as_ref()) {
        Ok(()) => {
            info!(backend = backend.name(), "Conversion backend active");
            let detail = format!("{} ({})", ConverterStatus::Active, backend.name());
            Probe {
                backend: Some(backend),
                status: ConverterStatus::Active,
                detail,
            }
        }
        Err(e) => degraded(&e),
    }
}

fn check_probe(backend: &dyn ConversionBackend) -> Result<(), ConvertError> {
    let actual = backend.convert(PROBE_INPUT).unwrap_or_default();
    if actual == PROBE_EXPECTED {
        Ok(())
    } else {
        Err(ConvertError::ProbeFailed {
            backend: backend.name().to_owned(),
            expected: PROBE_EXPECTED.to_owned(),
            actual,
        })
    }
}

fn degraded(error: &ConvertError) -> Probe {
    warn!(error = %error, "Conversion backend unusable, using fallback table");
    Probe {
        backend: None,
        status: ConverterStatus::Fallback,
        detail: format!("{} ({error})", ConverterStatus::Fallback),
    }
}
