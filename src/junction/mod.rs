/// Splice junction inference
///
/// This module handles:
/// - Walking CIGAR operations to find intron candidates
/// - Strand inference from XS tags or read-pair orientation
/// - QC filtering on anchor and intron lengths
/// - Deduplicating candidates into a junction registry
/// - BED output of the final junction set
mod bed_output;
mod filter;
mod registry;
mod strand;
mod walker;

pub use bed_output::{write_anchor_bed, write_intron_bed};
pub use filter::{
    JunctionFilter, DEFAULT_MAX_INTRON_LENGTH, DEFAULT_MIN_ANCHOR_LENGTH, DEFAULT_MIN_INTRON_LENGTH,
};
pub use registry::JunctionRegistry;
pub use strand::{infer_strand_from_flags, infer_strand_from_tag, PairOrientation, Strandness};
pub use walker::walk_cigar;

use std::fmt;

/// Strand of a junction
///
/// Variant order is the output tie-break order: `+`, `-`, unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    /// Map an XS-style strand character; anything but `+`/`-` is unknown
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Forward,
            '-' => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }

    /// BED strand character (`.` for unknown)
    pub fn as_char(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unknown => '.',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Key for junction lookup: (reference, intron_start, intron_end, strand)
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) struct JunctionKey {
    /// Interned reference name
    pub reference_id: usize,
    pub thick_start: u64,
    pub thick_end: u64,
    pub strand: Strand,
}

/// One intron candidate produced by the CIGAR walker, before QC.
///
/// All coordinates are 0-based half-open reference positions. The thick
/// interval is the intron itself; the anchor interval spans the flanking
/// aligned blocks on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawJunction<'a> {
    pub reference: &'a str,
    pub strand: Strand,
    pub anchor_start: u64,
    pub anchor_end: u64,
    pub thick_start: u64,
    pub thick_end: u64,
}

impl RawJunction<'_> {
    /// Intron length
    pub fn intron_len(&self) -> u64 {
        self.thick_end.saturating_sub(self.thick_start)
    }

    /// Aligned bases on the left of the intron
    pub fn left_anchor_len(&self) -> u64 {
        self.thick_start.saturating_sub(self.anchor_start)
    }

    /// Aligned bases on the right of the intron
    pub fn right_anchor_len(&self) -> u64 {
        self.anchor_end.saturating_sub(self.thick_end)
    }
}

/// A canonical splice junction with its read support
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junction {
    /// Reference sequence name
    pub reference: String,
    pub strand: Strand,
    /// Outer bounds of the flanking anchors (0-based, half-open)
    pub anchor_start: u64,
    pub anchor_end: u64,
    /// Intron bounds (0-based, half-open)
    pub thick_start: u64,
    pub thick_end: u64,
    /// Number of alignments supporting this junction
    pub support_count: u32,
}

impl Junction {
    fn from_raw(raw: &RawJunction<'_>) -> Self {
        Self {
            reference: raw.reference.to_string(),
            strand: raw.strand,
            anchor_start: raw.anchor_start,
            anchor_end: raw.anchor_end,
            thick_start: raw.thick_start,
            thick_end: raw.thick_end,
            support_count: 1,
        }
    }

    /// Intron length
    pub fn intron_len(&self) -> u64 {
        self.thick_end - self.thick_start
    }
}
