/// Deduplicated junction store
use super::{Junction, JunctionKey, RawJunction};
#[cfg(test)]
use super::Strand;
use std::collections::HashMap;

/// Junctions keyed by (reference, intron start, intron end, strand)
///
/// Records live in an arena; the map only holds indices into it, so merging a
/// duplicate is an in-place update. Reference names are interned on first
/// sight and keys carry the interned id.
#[derive(Debug, Default)]
pub struct JunctionRegistry {
    junctions: Vec<Junction>,
    reference_ids: HashMap<String, usize>,
    index: HashMap<JunctionKey, usize>,
}

impl JunctionRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accepted candidate
    ///
    /// A new identity is stored with a support count of 1. A known identity
    /// has its thick bounds widened to the observed extremes and its support
    /// count incremented. Anchor bounds keep the values of the first
    /// observation.
    ///
    /// # Returns
    /// `true` if this created a new junction
    pub fn register(&mut self, raw: &RawJunction<'_>) -> bool {
        let key = JunctionKey {
            reference_id: self.intern(raw.reference),
            thick_start: raw.thick_start,
            thick_end: raw.thick_end,
            strand: raw.strand,
        };

        match self.index.get(&key) {
            Some(&idx) => {
                let junction = &mut self.junctions[idx];
                junction.thick_start = junction.thick_start.min(raw.thick_start);
                junction.thick_end = junction.thick_end.max(raw.thick_end);
                junction.support_count += 1;
                false
            }
            None => {
                self.index.insert(key, self.junctions.len());
                self.junctions.push(Junction::from_raw(raw));
                true
            }
        }
    }

    fn intern(&mut self, reference: &str) -> usize {
        match self.reference_ids.get(reference) {
            Some(&id) => id,
            None => {
                let id = self.reference_ids.len();
                self.reference_ids.insert(reference.to_string(), id);
                id
            }
        }
    }

    /// Look up a junction by its identity
    #[cfg(test)]
    pub(crate) fn get(
        &self,
        reference: &str,
        thick_start: u64,
        thick_end: u64,
        strand: Strand,
    ) -> Option<&Junction> {
        let key = JunctionKey {
            reference_id: *self.reference_ids.get(reference)?,
            thick_start,
            thick_end,
            strand,
        };
        self.index.get(&key).map(|&idx| &self.junctions[idx])
    }

    /// All junctions ordered by reference, intron start, intron end, then strand
    pub fn sorted(&self) -> Vec<&Junction> {
        let mut sorted: Vec<&Junction> = self.junctions.iter().collect();
        sorted.sort_by(|a, b| {
            a.reference
                .cmp(&b.reference)
                .then(a.thick_start.cmp(&b.thick_start))
                .then(a.thick_end.cmp(&b.thick_end))
                .then(a.strand.cmp(&b.strand))
        });
        sorted
    }

    /// Total support over all junctions
    pub fn total_support(&self) -> u64 {
        self.junctions
            .iter()
            .map(|j| u64::from(j.support_count))
            .sum()
    }

    /// Get the number of distinct junctions
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    /// Check if no junctions have been registered
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }
}
