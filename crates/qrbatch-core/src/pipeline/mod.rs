//! Row processing for QR Batch.
//!
//! Each input row is handled independently and in order: the label is
//! cleaned, a blank target is recorded as a failure without encoding, and
//! anything else is rendered, encoded to JPEG and stored under a unique name.
//! A failing row never stops the rows after it.
//!
//! All state lives in the returned [`BatchOutput`]; nothing is written to
//! disk and nothing is shared between runs.

mod artifacts;
mod summary;

pub use artifacts::{Artifact, ArtifactSet, ARTIFACT_EXTENSION};
pub use summary::{FailureReason, FailureRecord, Progress, RowOutcome, RunSummary};

use crate::label;
use crate::render::{CaptionFont, CaptionFontKind, RenderOptions, Renderer};
use crate::table::{InputError, InputRow, Table};

/// Everything one run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    pub artifacts: ArtifactSet,
    pub summary: RunSummary,
    /// One outcome per input row, in row order.
    pub outcomes: Vec<RowOutcome>,
}

impl BatchOutput {
    pub fn into_parts(self) -> (ArtifactSet, RunSummary) {
        (self.artifacts, self.summary)
    }
}

/// Turns input rows into artifacts with a fixed render configuration.
///
/// The caption font is resolved when the processor is built, so every row of
/// every run through the same processor uses the same font.
#[derive(Debug, Default)]
pub struct BatchProcessor {
    renderer: Renderer,
}

impl BatchProcessor {
    /// Processor with the given options and the built-in caption glyphs.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: Renderer::new(options),
        }
    }

    /// Processor whose caption font is the first of `fonts` that parses.
    pub fn with_fonts<B: AsRef<[u8]>>(options: RenderOptions, fonts: &[B]) -> Self {
        Self {
            renderer: Renderer::with_font(options, CaptionFont::resolve(fonts)),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        self.renderer.options()
    }

    pub fn font_kind(&self) -> CaptionFontKind {
        self.renderer.font_kind()
    }

    /// Process rows in order.
    pub fn process(&self, rows: &[InputRow]) -> BatchOutput {
        self.process_with_progress(rows, |_, _| {})
    }

    /// Process rows in order, calling `on_row` after each one.
    pub fn process_with_progress<F>(&self, rows: &[InputRow], mut on_row: F) -> BatchOutput
    where
        F: FnMut(&RowOutcome, Progress),
    {
        let mut output = BatchOutput {
            outcomes: Vec::with_capacity(rows.len()),
            ..BatchOutput::default()
        };

        for (idx, row) in rows.iter().enumerate() {
            let outcome = self.process_row(idx + 1, row, &mut output.artifacts);
            output.summary.record(&outcome);
            on_row(
                &outcome,
                Progress {
                    completed: idx + 1,
                    total: rows.len(),
                },
            );
            output.outcomes.push(outcome);
        }

        tracing::info!(
            total = output.summary.total,
            succeeded = output.summary.succeeded,
            failed = output.summary.failed,
            "batch complete"
        );
        output
    }

    /// Validate the table's columns, then process its rows.
    pub fn process_table(&self, table: &Table) -> Result<BatchOutput, InputError> {
        let rows = table.input_rows()?;
        Ok(self.process(&rows))
    }

    fn process_row(&self, row_number: usize, row: &InputRow, artifacts: &mut ArtifactSet) -> RowOutcome {
        let cleaned = label::clean_label(&row.label);

        let Some(target) = row.trimmed_target() else {
            tracing::warn!(row = row_number, label = %cleaned, "empty target");
            return RowOutcome::Failed(FailureRecord {
                row: row_number,
                label: cleaned,
                target: row.target.clone().unwrap_or_default(),
                reason: FailureReason::EmptyTarget,
            });
        };

        let base = if cleaned.is_empty() {
            label::fallback_name(row_number)
        } else {
            cleaned
        };

        match self.renderer.render_jpeg(target, &base) {
            Ok(image) => {
                let artifact = Artifact {
                    name: base.clone(),
                    caption: base.clone(),
                    target: target.to_string(),
                    row: row_number,
                    width: image.width,
                    height: image.height,
                    jpeg: image.jpeg,
                };
                let name = artifacts.insert_unique(&base, artifact);
                tracing::debug!(row = row_number, %name, "generated artifact");
                RowOutcome::Generated {
                    row: row_number,
                    name,
                }
            }
            Err(e) => {
                tracing::warn!(row = row_number, label = %row.label, error = %e, "render failed");
                RowOutcome::Failed(FailureRecord {
                    row: row_number,
                    label: row.label.clone(),
                    target: target.to_string(),
                    reason: FailureReason::Render(e.to_string()),
                })
            }
        }
    }
}

/// Process rows with the default layout and built-in caption glyphs.
pub fn process(rows: &[InputRow]) -> (ArtifactSet, RunSummary) {
    BatchProcessor::default().process(rows).into_parts()
}
