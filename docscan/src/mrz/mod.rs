//! Machine-readable zone (MRZ) detection
//!
//! MRZ reading is an optional capability. Whether it is available is decided
//! once at startup by [`MrzScanner::new`]; a missing or misconfigured reader
//! degrades to [`MrzOutcome::Skipped`] for every request instead of failing.
//!
//! Every scan produces an explicit [`MrzOutcome`]. Reader errors, panics and
//! timeouts become [`MrzOutcome::Failed`], are logged, and collapse to `null`
//! in the HTTP response. They never affect the OCR result or status code.

mod parser;
mod reader;
mod record;

pub use parser::{check_digit, locate_zone, normalize_line, parse_zone, verify_check_digit, MrzZone};
pub use reader::{MrzReader, TesseractMrzReader};
pub use record::{MrzRecord, MrzType};

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::MrzConfig;

#[derive(Clone)]
enum MrzBackend {
    Available { reader: Arc<dyn MrzReader> },
    Unavailable { reason: String },
}

/// Result of one MRZ scan.
#[derive(Debug, Clone, PartialEq)]
pub enum MrzOutcome {
    Found(MrzRecord),
    NotFound,
    /// The capability is not available in this process.
    Skipped,
    /// Reading failed; the reason is kept for logs only.
    Failed(String),
}

impl MrzOutcome {
    pub fn into_record(self) -> Option<MrzRecord> {
        match self {
            MrzOutcome::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MrzOutcome::Found(_) => "found",
            MrzOutcome::NotFound => "not_found",
            MrzOutcome::Skipped => "skipped",
            MrzOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Clone)]
pub struct MrzScanner {
    backend: MrzBackend,
    timeout: Duration,
}

impl MrzScanner {
    /// Resolve the MRZ capability from configuration. Never fails.
    pub fn new(config: &MrzConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);

        if !config.enabled {
            return Self::unavailable("MRZ detection disabled by MRZ_ENABLED", timeout);
        }

        match TesseractMrzReader::new(config) {
            Ok(reader) => Self::with_reader(Arc::new(reader), timeout),
            Err(e) => {
                let reason = format!("MRZ reader not available: {e}");
                warn!("{}", reason);
                Self::unavailable(reason, timeout)
            }
        }
    }

    pub fn with_reader(reader: Arc<dyn MrzReader>, timeout: Duration) -> Self {
        Self {
            backend: MrzBackend::Available { reader },
            timeout,
        }
    }

    pub fn unavailable(reason: impl Into<String>, timeout: Duration) -> Self {
        Self {
            backend: MrzBackend::Unavailable {
                reason: reason.into(),
            },
            timeout,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, MrzBackend::Available { .. })
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            MrzBackend::Unavailable { reason } => Some(reason),
            MrzBackend::Available { .. } => None,
        }
    }

    pub async fn scan(&self, image_bytes: Arc<[u8]>) -> MrzOutcome {
        let reader = match &self.backend {
            MrzBackend::Available { reader } => Arc::clone(reader),
            MrzBackend::Unavailable { .. } => {
                info!("MRZ scan skipped (reader not available)");
                return MrzOutcome::Skipped;
            }
        };

        let name = reader.name().to_string();
        let task = tokio::task::spawn_blocking(move || reader.read(&image_bytes));

        let outcome = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(Ok(Some(record)))) => MrzOutcome::Found(record),
            Ok(Ok(Ok(None))) => MrzOutcome::NotFound,
            Ok(Ok(Err(e))) => MrzOutcome::Failed(e.to_string()),
            Ok(Err(e)) => MrzOutcome::Failed(format!("MRZ task panicked: {e}")),
            Err(_) => MrzOutcome::Failed(format!(
                "MRZ detection timed out after {} seconds",
                self.timeout.as_secs()
            )),
        };

        match &outcome {
            MrzOutcome::Found(record) => info!(
                reader = %name,
                mrz_type = %record.mrz_type,
                valid_score = record.valid_score,
                "MRZ found"
            ),
            MrzOutcome::NotFound => info!(reader = %name, "No MRZ zone detected"),
            MrzOutcome::Failed(reason) => warn!(reader = %name, %reason, "MRZ detection failed"),
            MrzOutcome::Skipped => {}
        }

        outcome
    }
}
