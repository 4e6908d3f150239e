/// Junction extraction statistics tracking and reporting
use log::info;

/// What happened to one alignment record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Unmapped or too few CIGAR operations to contain an intron
    Skipped,
    /// Rejected by a per-record error
    Failed,
    /// Walked; counts of candidates accepted and rejected by QC
    Walked { accepted: u64, rejected: u64 },
}

/// Tracks record and candidate counts for one extraction run
#[derive(Default, Debug)]
pub struct ExtractionStats {
    /// Total number of alignment records read
    pub total_records: u64,
    /// Records skipped without walking
    pub skipped: u64,
    /// Records dropped because of a per-record error
    pub failed: u64,
    /// Records yielding at least one candidate
    pub spliced: u64,
    /// Intron candidates passing QC
    pub accepted: u64,
    /// Intron candidates failing QC
    pub rejected: u64,
}

impl ExtractionStats {
    /// Create new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one alignment record
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.total_records += 1;
        match outcome {
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::Failed => self.failed += 1,
            RecordOutcome::Walked { accepted, rejected } => {
                if accepted + rejected > 0 {
                    self.spliced += 1;
                }
                self.accepted += accepted;
                self.rejected += rejected;
            }
        }
    }

    /// Total intron candidates seen
    pub fn candidates(&self) -> u64 {
        self.accepted + self.rejected
    }

    /// Get percentage of records that were spliced
    pub fn spliced_percent(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            100.0 * self.spliced as f64 / self.total_records as f64
        }
    }

    /// Get percentage of candidates passing QC
    pub fn accepted_percent(&self) -> f64 {
        let candidates = self.candidates();
        if candidates == 0 {
            0.0
        } else {
            100.0 * self.accepted as f64 / candidates as f64
        }
    }

    /// Print summary statistics to log
    pub fn print_summary(&self, n_junctions: usize, total_support: u64) {
        if self.total_records == 0 {
            info!("No alignments processed");
            return;
        }

        info!("=== Junction Summary ===");
        info!("Number of input alignments: {}", self.total_records);
        info!(
            "Spliced alignments: {} ({:.2}%)",
            self.spliced,
            self.spliced_percent()
        );
        info!("Skipped alignments: {}", self.skipped);
        if self.failed > 0 {
            info!("Alignments with errors: {}", self.failed);
        }
        info!(
            "Intron candidates: {} ({} passed QC, {:.2}%)",
            self.candidates(),
            self.accepted,
            self.accepted_percent()
        );
        info!(
            "Distinct junctions: {} (total support {})",
            n_junctions, total_support
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = ExtractionStats::default();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.spliced, 0);
        assert_eq!(stats.candidates(), 0);
    }

    #[test]
    fn test_record_skipped() {
        let mut stats = ExtractionStats::new();
        stats.record(RecordOutcome::Skipped);
        assert_eq!(stats.total_records, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.spliced, 0);
    }

    #[test]
    fn test_record_failed() {
        let mut stats = ExtractionStats::new();
        stats.record(RecordOutcome::Failed);
        assert_eq!(stats.total_records, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn test_record_walked_without_candidates() {
        let mut stats = ExtractionStats::new();
        stats.record(RecordOutcome::Walked {
            accepted: 0,
            rejected: 0,
        });
        assert_eq!(stats.total_records, 1);
        assert_eq!(stats.spliced, 0);
    }

    #[test]
    fn test_multiple_records() {
        let mut stats = ExtractionStats::new();
        stats.record(RecordOutcome::Walked {
            accepted: 2,
            rejected: 1,
        });
        stats.record(RecordOutcome::Skipped);
        stats.record(RecordOutcome::Walked {
            accepted: 0,
            rejected: 1,
        });
        stats.record(RecordOutcome::Failed);

        assert_eq!(stats.total_records, 4);
        assert_eq!(stats.spliced, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 2);
        assert!((stats.spliced_percent() - 50.0).abs() < 0.01);
        assert!((stats.accepted_percent() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_percentages() {
        let stats = ExtractionStats::new();
        assert_eq!(stats.spliced_percent(), 0.0);
        assert_eq!(stats.accepted_percent(), 0.0);
    }
}
