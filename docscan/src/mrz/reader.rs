use leptess::{LepTess, Variable};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::MrzConfig;
use crate::error::{DocscanError, Result};

use super::parser::{locate_zone, parse_zone, MRZ_ALPHABET};
use super::record::MrzRecord;

/// Something that can find and parse a machine-readable zone in an image.
///
/// `read` is blocking; callers run it on the blocking pool. `Ok(None)` means
/// the image was read but contains no zone.
pub trait MrzReader: Send + Sync {
    fn name(&self) -> &str;

    fn read(&self, image_bytes: &[u8]) -> Result<Option<MrzRecord>>;
}

/// Reads zones with a dedicated Tesseract handle restricted to the MRZ
/// alphabet, separate from the one used for free text.
pub struct TesseractMrzReader {
    tesseract: Mutex<LepTess>,
}

impl TesseractMrzReader {
    pub fn new(config: &MrzConfig) -> Result<Self> {
        let mut lt = LepTess::new(config.data_path.as_deref(), &config.languages).map_err(|e| {
            DocscanError::Mrz(format!(
                "Tesseract failed to load languages '{}': {e}",
                config.languages
            ))
        })?;
        lt.set_variable(Variable::TesseditCharWhitelist, MRZ_ALPHABET)
            .map_err(|e| DocscanError::Mrz(format!("Failed to restrict MRZ alphabet: {e}")))?;
        info!(languages = %config.languages, "Tesseract MRZ reader initialized");

        Ok(Self {
            tesseract: Mutex::new(lt),
        })
    }
}

impl MrzReader for TesseractMrzReader {
    fn name(&self) -> &str {
        "tesseract-mrz"
    }

    fn read(&self, image_bytes: &[u8]) -> Result<Option<MrzRecord>> {
        let text = {
            let mut lt = self.tesseract.blocking_lock();
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| DocscanError::Mrz(format!("Failed to set image: {e}")))?;
            lt.get_utf8_text()
                .map_err(|e| DocscanError::Mrz(format!("Failed to extract text: {e}")))?
        };

        let Some(zone) = locate_zone(&text) else {
            return Ok(None);
        };
        debug!(lines = zone.lines.len(), "MRZ zone located");

        Ok(parse_zone(&zone))
    }
}
