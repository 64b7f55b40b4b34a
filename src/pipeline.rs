use crate::brands::{logo_file_name, read_brands};
use crate::commons::MediaSource;
use crate::error::{LogoError, Result};
use crate::normalize::{normalize_logo, save_png};
use crate::wikidata::{resolve_entity, KnowledgeBase};
use log::{debug, error, info};
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single brand produced no logo.
#[derive(Error, Debug)]
pub enum BrandFailure {
    #[error("No Wikidata item found")]
    NoEntity,

    #[error("No logo (P154) for {0}")]
    NoLogo(String),

    #[error("Download failed")]
    DownloadFailed,

    #[error("Conversion failed")]
    ConversionFailed,

    #[error("Error: {0}")]
    Unexpected(String),
}

impl From<LogoError> for BrandFailure {
    fn from(err: LogoError) -> Self {
        BrandFailure::Unexpected(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandResult {
    pub brand: String,
    pub success: bool,
    pub message: String,
}

impl BrandResult {
    /// `[SUCCESS] <brand>: <message>` or `[FAIL] <brand>: <message>`.
    pub fn status_line(&self) -> String {
        let status = if self.success { "SUCCESS" } else { "FAIL" };
        format!("[{}] {}: {}", status, self.brand, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Summary {
    pub results: Vec<BrandResult>,
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, result: BrandResult) {
        if result.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// One status line per brand followed by the totals line.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.results.iter().map(BrandResult::status_line).collect();
        lines.push(format!("Done. Success: {}, Fail: {}", self.succeeded, self.failed));
        lines
    }

    /// `0` when at least one brand succeeded, otherwise `1`.
    pub fn exit_code(&self) -> i32 {
        if self.succeeded > 0 {
            0
        } else {
            1
        }
    }
}

/// Runs resolve, fetch, download, normalize and write for each brand.
pub struct LogoPipeline<'a, K: ?Sized, M: ?Sized> {
    kb: &'a K,
    media: &'a M,
    languages: &'a [String],
    candidate_limit: u32,
    output_dir: PathBuf,
}

impl<'a, K, M> LogoPipeline<'a, K, M>
where
    K: KnowledgeBase + ?Sized,
    M: MediaSource + ?Sized,
{
    pub fn new(
        kb: &'a K,
        media: &'a M,
        languages: &'a [String],
        candidate_limit: u32,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kb,
            media,
            languages,
            candidate_limit,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory, then read and process the brand list.
    /// A missing brands file is fatal.
    pub fn run_file<P: AsRef<Path>>(&self, brands_file: P) -> Result<Summary> {
        fs::create_dir_all(&self.output_dir)?;
        let brands = read_brands(brands_file)?;
        info!("Loaded {} brand(s)", brands.len());

        self.run(&brands)
    }

    /// Process every brand in order. Only failing to create the output
    /// directory aborts the run.
    pub fn run(&self, brands: &[String]) -> Result<Summary> {
        fs::create_dir_all(&self.output_dir)?;

        let mut summary = Summary::default();
        for brand in brands {
            summary.record(self.process_brand(brand));
        }

        Ok(summary)
    }

    /// Process one brand, turning every failure (including a panic) into a
    /// failed [`BrandResult`].
    pub fn process_brand(&self, brand: &str) -> BrandResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.fetch_logo(brand)))
            .unwrap_or_else(|payload| Err(BrandFailure::Unexpected(panic_message(payload))));

        match outcome {
            Ok(path) => {
                debug!("Wrote {}", path.display());
                BrandResult {
                    brand: brand.to_string(),
                    success: true,
                    message: "OK".to_string(),
                }
            }
            Err(failure) => {
                if let BrandFailure::Unexpected(ref reason) = failure {
                    error!("Processing '{}' failed: {}", brand, reason);
                }
                BrandResult {
                    brand: brand.to_string(),
                    success: false,
                    message: failure.to_string(),
                }
            }
        }
    }

    fn fetch_logo(&self, brand: &str) -> std::result::Result<PathBuf, BrandFailure> {
        let entity_id = resolve_entity(self.kb, brand, self.languages, self.candidate_limit)?
            .ok_or(BrandFailure::NoEntity)?;

        let filename = self
            .kb
            .logo_filename(&entity_id)?
            .ok_or_else(|| BrandFailure::NoLogo(entity_id.clone()))?;
        debug!("'{}' -> {} -> {}", brand, entity_id, filename);

        let bytes = self
            .media
            .download(&filename)
            .ok_or(BrandFailure::DownloadFailed)?;

        let logo = normalize_logo(&bytes).map_err(|_| BrandFailure::ConversionFailed)?;

        let path = self.output_dir.join(logo_file_name(brand));
        save_png(&logo, &path).map_err(LogoError::from)?;

        Ok(path)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
