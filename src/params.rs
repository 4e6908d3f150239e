use std::path::PathBuf;

use clap::Parser;

use crate::junction::{
    JunctionFilter, Strandness, DEFAULT_MAX_INTRON_LENGTH, DEFAULT_MIN_ANCHOR_LENGTH,
    DEFAULT_MIN_INTRON_LENGTH,
};

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// intronProspector command-line parameters.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "intronProspector",
    about = "Find putative introns from RNA-Seq alignments",
    version
)]
pub struct Parameters {
    // ── Input ───────────────────────────────────────────────────────────
    /// SAM or BAM file to read; standard input if omitted or `-`
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    // ── Junction QC ─────────────────────────────────────────────────────
    /// Minimum anchor length on each side of the intron
    #[arg(short = 'a', long = "min-anchor-length", default_value_t = DEFAULT_MIN_ANCHOR_LENGTH)]
    pub min_anchor_length: u64,

    /// Minimum intron length
    #[arg(short = 'i', long = "min-intron-length", default_value_t = DEFAULT_MIN_INTRON_LENGTH)]
    pub min_intron_length: u64,

    /// Maximum intron length
    #[arg(short = 'I', long = "max-intron-length", default_value_t = DEFAULT_MAX_INTRON_LENGTH)]
    pub max_intron_length: u64,

    /// Library strandness: UN (unstranded, strand from XS tag), RF or FR
    #[arg(short = 's', long = "strandness", default_value = "UN")]
    pub strandness: Strandness,

    // ── Output ──────────────────────────────────────────────────────────
    /// BED file of junctions, with anchors as blocks and the intron as the gap
    #[arg(short = 'j', long = "junction-bed", value_name = "PATH")]
    pub junction_bed: Option<PathBuf>,

    /// BED file of introns
    #[arg(short = 'n', long = "intron-bed", value_name = "PATH")]
    pub intron_bed: Option<PathBuf>,
}

impl Parameters {
    /// QC thresholds for intron candidates
    pub fn junction_filter(&self) -> JunctionFilter {
        JunctionFilter {
            min_anchor_length: self.min_anchor_length,
            min_intron_length: self.min_intron_length,
            max_intron_length: self.max_intron_length,
        }
    }

    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.min_intron_length > self.max_intron_length {
            return Err(crate::error::Error::Parameter(format!(
                "--min-intron-length ({}) must not exceed --max-intron-length ({})",
                self.min_intron_length, self.max_intron_length
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
