/// Single-pass junction extraction over an alignment source
use crate::error::Error;
use crate::io::{AlignmentRecord, AlignmentSource};
use crate::junction::{walk_cigar, JunctionFilter, JunctionRegistry, Strandness};
use crate::stats::{ExtractionStats, RecordOutcome};
use log::{debug, warn};

/// Walks, filters and registers the junctions of every alignment it is fed
pub struct JunctionExtractor {
    filter: JunctionFilter,
    strandness: Strandness,
    registry: JunctionRegistry,
    stats: ExtractionStats,
}

impl JunctionExtractor {
    pub fn new(filter: JunctionFilter, strandness: Strandness) -> Self {
        Self {
            filter,
            strandness,
            registry: JunctionRegistry::new(),
            stats: ExtractionStats::new(),
        }
    }

    /// Consume the whole source
    ///
    /// Per-record errors are logged and the record is skipped; source errors
    /// abort the pass.
    pub fn extract<S: AlignmentSource>(&mut self, source: &mut S) -> Result<(), Error> {
        loop {
            let result = match source.next_record() {
                Ok(Some(record)) => self.process_record(source.reference_names(), &record),
                Ok(None) => break,
                Err(e) => Err(e),
            };
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) if e.is_record_error() => {
                    warn!("Error processing read from {}: {}", source.source_name(), e);
                    RecordOutcome::Failed
                }
                Err(e) => return Err(e),
            };
            self.stats.record(outcome);
        }

        debug!(
            "Finished reading {}: {} records",
            source.source_name(),
            self.stats.total_records
        );
        Ok(())
    }

    /// Infer and register the junctions of one alignment
    ///
    /// Nothing is registered unless the whole record walks cleanly.
    pub fn process_record(
        &mut self,
        reference_names: &[String],
        record: &AlignmentRecord,
    ) -> Result<RecordOutcome, Error> {
        if record.cigar.len() <= 1 {
            return Ok(RecordOutcome::Skipped);
        }
        let (Some(reference_id), Some(position)) = (record.reference_id, record.position) else {
            return Ok(RecordOutcome::Skipped);
        };
        let reference = reference_names
            .get(reference_id)
            .ok_or(Error::UnknownReference(reference_id))?;

        let strand = self.strandness.infer(record.xs_tag, &record.orientation);
        let candidates = walk_cigar(reference, strand, position, &record.cigar)?;

        let mut accepted = 0;
        let mut rejected = 0;
        for candidate in &candidates {
            if self.filter.accepts(candidate) {
                self.registry.register(candidate);
                accepted += 1;
            } else {
                rejected += 1;
            }
        }
        Ok(RecordOutcome::Walked { accepted, rejected })
    }

    pub fn registry(&self) -> &JunctionRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }
}
