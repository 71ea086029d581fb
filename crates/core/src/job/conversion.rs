//! Conversion job and its pipeline.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::types::{JobId, JobState};
use crate::engine::{PlistEngine, RawCode};
use crate::error::PlistError;
use crate::format::Format;
use crate::options::ConvertOptions;

/// One conversion request: input file → output file in `format`.
///
/// A job runs once. Its result starts as [`PlistError::Unknown`] and is
/// overwritten a single time when the pipeline finishes.
#[derive(Debug)]
pub struct ConversionJob {
    id: JobId,
    input_path: PathBuf,
    output_path: PathBuf,
    format: Format,
    options: ConvertOptions,
    state: JobState,
    result: PlistError,
    elapsed: Option<Duration>,
}

impl ConversionJob {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        format: Format,
        options: ConvertOptions,
    ) -> Self {
        Self {
            id: JobId::new(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            format,
            options,
            state: JobState::Created,
            result: PlistError::Unknown,
            elapsed: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Terminal result, or `Unknown` while the job has not completed.
    pub fn result(&self) -> PlistError {
        self.result
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_terminal()
    }

    /// Wall time the pipeline took, once completed.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Runs the pipeline to completion and returns the terminal result.
    ///
    /// Calling this on a job that already ran does nothing and returns the
    /// recorded result.
    pub fn run<E: PlistEngine>(&mut self, engine: &E) -> PlistError {
        if self.state != JobState::Created {
            tracing::warn!(job_id = %self.id, state = ?self.state, "job already executed, ignoring run");
            return self.result;
        }
        self.state = JobState::Running;
        let start = Instant::now();

        // Unwinding drops the document and any encoded buffer.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(engine)));
        let result = match outcome {
            Ok(Ok(())) => PlistError::Success,
            Ok(Err(err)) => err,
            Err(_) => {
                tracing::error!(job_id = %self.id, engine = engine.name(), "engine panicked during conversion");
                PlistError::Unknown
            }
        };

        self.elapsed = Some(start.elapsed());
        self.result = result;
        self.state = JobState::Completed(result);

        if result.is_success() {
            tracing::info!(
                job_id = %self.id,
                format = %self.format,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Converted {} -> {}",
                self.input_path.display(),
                self.output_path.display()
            );
        } else {
            tracing::warn!(
                job_id = %self.id,
                code = result.code(),
                "Conversion of {} failed: {}",
                self.input_path.display(),
                result
            );
        }
        result
    }

    fn execute<E: PlistEngine>(&self, engine: &E) -> Result<(), PlistError> {
        if self.options.contains(ConvertOptions::DEBUG) {
            engine.set_debug(true);
        }

        let data = std::fs::read(&self.input_path).map_err(|e| {
            tracing::debug!(job_id = %self.id, "Failed to read {}: {}", self.input_path.display(), e);
            PlistError::from(e)
        })?;
        tracing::debug!(job_id = %self.id, bytes = data.len(), "read input");

        let mut document = engine
            .parse(&data)
            .map_err(classify)?
            .ok_or(PlistError::NoMemory)?;

        if self.options.contains(ConvertOptions::SORT) {
            engine.sort(&mut document);
            tracing::debug!(job_id = %self.id, "sorted document");
        }

        let pretty = !self.options.contains(ConvertOptions::COMPACT);
        let encoded = match self.format {
            Format::Binary => engine.encode_binary(&document),
            Format::Xml => engine.encode_xml(&document),
            Format::Json => engine.encode_json(&document, pretty),
            Format::OpenStep => engine.encode_openstep(&document, pretty),
        }
        .map_err(classify)?
        .ok_or(PlistError::Unknown)?;
        drop(document);
        tracing::debug!(job_id = %self.id, format = %self.format, bytes = encoded.len(), "encoded document");

        std::fs::write(&self.output_path, &encoded).map_err(|e| {
            tracing::debug!(job_id = %self.id, "Failed to write {}: {}", self.output_path.display(), e);
            PlistError::Io
        })?;

        Ok(())
    }
}

/// Maps a failing engine status onto the taxonomy. An engine that fails with
/// the success code still failed.
fn classify(code: RawCode) -> PlistError {
    match PlistError::from_code(code) {
        PlistError::Success => PlistError::Unknown,
        err => err,
    }
}
