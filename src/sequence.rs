use anyhow::{Context, Result};
use std::path::Path;

use crate::dsp::energy::WINDOW_SIZE;
use crate::dsp::filter::BandLevels;
use crate::error::AnalysisError;

/// On-disk size of one record: four native-order f32.
pub const RECORD_SIZE: usize = std::mem::size_of::<BandLevels>();

/// Ordered per-window loudness records produced by the batch pipeline.
///
/// The file form is the headerless concatenation of 16-byte records in
/// window order; the record count is implicit in the file size. Playback
/// consumers map a sample offset to a record with `lookup`, using the
/// same `WINDOW_SIZE` the producer partitioned with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandSequence {
    records: Vec<BandLevels>,
}

impl BandSequence {
    pub fn new(records: Vec<BandLevels>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BandLevels] {
        &self.records
    }

    /// Record index for a playback sample offset.
    pub fn index_for_sample(sample_pos: usize) -> usize {
        sample_pos / WINDOW_SIZE
    }

    /// Playback-synced lookup. An offset past the precomputed range is
    /// reported rather than panicking so display layers can log and skip
    /// the update.
    pub fn lookup(&self, sample_pos: usize) -> Result<BandLevels, AnalysisError> {
        let index = Self::index_for_sample(sample_pos);
        self.records
            .get(index)
            .copied()
            .ok_or(AnalysisError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
    }

    pub fn to_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnalysisError> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(AnalysisError::DataUnavailable(format!(
                "record file length {} is not a multiple of {}",
                bytes.len(),
                RECORD_SIZE
            )));
        }
        let records = bytes
            .chunks_exact(RECORD_SIZE)
            .map(bytemuck::pod_read_unaligned)
            .collect();
        Ok(Self { records })
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes())
            .with_context(|| format!("Failed to write record file: {}", path.display()))
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read record file: {}", path.display()))?;
        Ok(Self::from_bytes(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: f32) -> BandLevels {
        BandLevels {
            raw: seed,
            low: seed - 1.0,
            band: seed - 2.0,
            high: seed - 3.0,
        }
    }

    #[test]
    fn byte_round_trip_is_lossless() {
        let seq = BandSequence::new(vec![record(-10.0), record(0.5), record(-243.0)]);
        let bytes = seq.to_bytes();
        assert_eq!(bytes.len(), 3 * RECORD_SIZE);
        assert_eq!(BandSequence::from_bytes(bytes).unwrap(), seq);
    }

    #[test]
    fn empty_round_trip() {
        let seq = BandSequence::default();
        assert_eq!(BandSequence::from_bytes(seq.to_bytes()).unwrap(), seq);
    }

    #[test]
    fn ragged_length_is_rejected() {
        let err = BandSequence::from_bytes(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, AnalysisError::DataUnavailable(_)));
    }

    #[test]
    fn lookup_uses_the_window_constant() {
        let seq = BandSequence::new(vec![record(1.0), record(2.0), record(3.0)]);
        assert_eq!(seq.lookup(0).unwrap(), record(1.0));
        assert_eq!(seq.lookup(WINDOW_SIZE - 1).unwrap(), record(1.0));
        assert_eq!(seq.lookup(WINDOW_SIZE).unwrap(), record(2.0));
        assert_eq!(seq.lookup(2 * WINDOW_SIZE + 7).unwrap(), record(3.0));
    }

    #[test]
    fn lookup_past_the_end_reports_not_panics() {
        let seq = BandSequence::new(vec![record(1.0)]);
        let err = seq.lookup(5 * WINDOW_SIZE).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::IndexOutOfRange { index: 5, len: 1 }
        ));
    }
}
