/// CIGAR walker: turns one spliced alignment into intron candidates
use super::{RawJunction, Strand};
use crate::cigar::CigarOp;
use crate::error::Error;

/// Walk the CIGAR of one alignment and collect its intron candidates.
///
/// Introns come only from `N` operations. Matches extend the anchor on
/// either side of the open intron; any other read- or reference-consuming
/// operation closes the open intron and restarts the left anchor after it, so
/// anchors never contain indels, mismatches or clips. Consecutive `N`
/// operations separated by matches yield one candidate each, with the middle
/// block serving as right anchor of the first and left anchor of the second.
///
/// Candidates are only returned once the whole CIGAR has been accepted: an
/// unsupported operation fails the alignment with no partial output.
///
/// # Arguments
/// * `reference` - Reference sequence name
/// * `strand` - Strand inferred for this alignment
/// * `alignment_start` - Leftmost reference position (0-based)
/// * `cigar` - CIGAR operations in order
pub fn walk_cigar<'a>(
    reference: &'a str,
    strand: Strand,
    alignment_start: u64,
    cigar: &[CigarOp],
) -> Result<Vec<RawJunction<'a>>, Error> {
    let mut junctions = Vec::new();
    // At most one operation cannot hold a gap
    if cigar.len() <= 1 {
        return Ok(junctions);
    }

    // Left anchor start, intron start/end, right anchor end
    let mut left = alignment_start;
    let mut intron_start = alignment_start;
    let mut intron_end = 0u64;
    let mut right = 0u64;
    let mut open = false;

    let emit = |junctions: &mut Vec<RawJunction<'a>>, left, intron_start, intron_end, right| {
        junctions.push(RawJunction {
            reference,
            strand,
            anchor_start: left,
            anchor_end: right,
            thick_start: intron_start,
            thick_end: intron_end,
        });
    };

    for op in cigar {
        let len = u64::from(op.len());
        match op {
            CigarOp::RefSkip(_) => {
                if open {
                    emit(&mut junctions, left, intron_start, intron_end, right);
                    left = intron_end;
                    intron_start = right;
                }
                intron_end = intron_start + len;
                right = intron_end;
                open = true;
            }
            CigarOp::Match(_) | CigarOp::Equal(_) => {
                if open {
                    right += len;
                } else {
                    intron_start += len;
                }
            }
            CigarOp::Del(_) | CigarOp::Diff(_) => {
                if open {
                    emit(&mut junctions, left, intron_start, intron_end, right);
                    intron_start = right + len;
                } else {
                    intron_start += len;
                }
                left = intron_start;
                open = false;
            }
            CigarOp::Ins(_) | CigarOp::SoftClip(_) => {
                if open {
                    emit(&mut junctions, left, intron_start, intron_end, right);
                    intron_start = right;
                }
                left = intron_start;
                open = false;
            }
            CigarOp::HardClip(_) => {}
            CigarOp::Pad(_) => return Err(Error::UnknownCigarOp(op.op_char())),
        }
    }

    if open {
        emit(&mut junctions, left, intron_start, intron_end, right);
    }
    Ok(junctions)
}
