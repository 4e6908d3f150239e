/// QC thresholds for intron candidates
use super::RawJunction;

pub const DEFAULT_MIN_ANCHOR_LENGTH: u64 = 8;
pub const DEFAULT_MIN_INTRON_LENGTH: u64 = 70;
pub const DEFAULT_MAX_INTRON_LENGTH: u64 = 500_000;

/// Anchor and intron length thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionFilter {
    /// Minimum aligned bases required on each side of the intron
    pub min_anchor_length: u64,
    /// Minimum intron length (inclusive)
    pub min_intron_length: u64,
    /// Maximum intron length (inclusive)
    pub max_intron_length: u64,
}

impl Default for JunctionFilter {
    fn default() -> Self {
        Self {
            min_anchor_length: DEFAULT_MIN_ANCHOR_LENGTH,
            min_intron_length: DEFAULT_MIN_INTRON_LENGTH,
            max_intron_length: DEFAULT_MAX_INTRON_LENGTH,
        }
    }
}

impl JunctionFilter {
    /// Check a candidate against all thresholds
    pub fn accepts(&self, junction: &RawJunction<'_>) -> bool {
        let intron_len = junction.intron_len();
        (self.min_intron_length..=self.max_intron_length).contains(&intron_len)
            && junction.left_anchor_len() >= self.min_anchor_length
            && junction.right_anchor_len() >= self.min_anchor_length
    }
}
