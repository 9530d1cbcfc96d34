//! Batch decoding
//!
//! Caller-side helpers for decoding many rows. Each row is decoded
//! independently; a failed row is recorded and decoding continues.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::decoder::RecordDecoder;
use crate::error::RowDecodeError;
use crate::record::Record;

/// A row that failed to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Zero-based position of the row in the input
    pub row_number: usize,
    pub error: RowDecodeError,
}

/// Outcome of decoding a batch of rows, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub records: Vec<Record>,
    pub failures: Vec<RowFailure>,
}

/// Row and field counts for a [`DecodeReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DecodeSummary {
    pub rows: usize,
    pub decoded: usize,
    pub failed: usize,
    /// Total failing fields across all failed rows
    pub field_errors: usize,
}

impl DecodeReport {
    fn push(&mut self, row_number: usize, result: Result<Record, RowDecodeError>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(error) => self.failures.push(RowFailure { row_number, error }),
        }
    }

    /// True when every row decoded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> DecodeSummary {
        DecodeSummary {
            rows: self.records.len() + self.failures.len(),
            decoded: self.records.len(),
            failed: self.failures.len(),
            field_errors: self.failures.iter().map(|f| f.error.errors().len()).sum(),
        }
    }

    /// Log the summary at `info` and each failure at `debug`.
    pub fn log_summary(&self, schema: &str) {
        let summary = self.summary();
        info!(
            schema = %schema,
            rows = summary.rows,
            decoded = summary.decoded,
            failed = summary.failed,
            field_errors = summary.field_errors,
            "decoded rows"
        );
        for failure in &self.failures {
            debug!(
                schema = %schema,
                row = failure.row_number,
                error = %failure.error,
                "row failed to decode"
            );
        }
    }
}

impl RecordDecoder {
    /// Decode rows one after another.
    pub fn decode_rows<I, R, S>(&self, rows: I) -> DecodeReport
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut report = DecodeReport::default();
        for (row_number, row) in rows.into_iter().enumerate() {
            report.push(row_number, self.decode(row.as_ref()));
        }
        report
    }

    /// Decode rows on the rayon thread pool.
    ///
    /// Produces the same report as [`RecordDecoder::decode_rows`], in input order.
    pub fn par_decode_rows<R, S>(&self, rows: &[R]) -> DecodeReport
    where
        R: AsRef<[S]> + Sync,
        S: AsRef<str>,
    {
        let results: Vec<Result<Record, RowDecodeError>> = rows
            .par_iter()
            .map(|row| self.decode(row.as_ref()))
            .collect();

        let mut report = DecodeReport::default();
        for (row_number, result) in results.into_iter().enumerate() {
            report.push(row_number, result);
        }
        report
    }
}
