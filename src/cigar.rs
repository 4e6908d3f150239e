/// CIGAR operations as consumed by the junction walker

/// CIGAR operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    /// M: match/mismatch (default mode)
    Match(u32),
    /// =: exact match (optional)
    Equal(u32),
    /// X: mismatch (optional)
    Diff(u32),
    /// I: insertion to reference
    Ins(u32),
    /// D: deletion from reference
    Del(u32),
    /// N: splice junction (skipped reference region)
    RefSkip(u32),
    /// S: soft clip (clipped sequence present in read)
    SoftClip(u32),
    /// H: hard clip (clipped sequence not present)
    HardClip(u32),
    /// P: padding (silent deletion from padded reference)
    Pad(u32),
}

impl CigarOp {
    /// Build an operation from its SAM character code
    #[cfg(test)]
    pub(crate) fn from_char(op: char, len: u32) -> Option<Self> {
        let op = match op {
            'M' => CigarOp::Match(len),
            '=' => CigarOp::Equal(len),
            'X' => CigarOp::Diff(len),
            'I' => CigarOp::Ins(len),
            'D' => CigarOp::Del(len),
            'N' => CigarOp::RefSkip(len),
            'S' => CigarOp::SoftClip(len),
            'H' => CigarOp::HardClip(len),
            'P' => CigarOp::Pad(len),
            _ => return None,
        };
        Some(op)
    }

    /// Get the operation character
    pub fn op_char(&self) -> char {
        match self {
            CigarOp::Match(_) => 'M',
            CigarOp::Equal(_) => '=',
            CigarOp::Diff(_) => 'X',
            CigarOp::Ins(_) => 'I',
            CigarOp::Del(_) => 'D',
            CigarOp::RefSkip(_) => 'N',
            CigarOp::SoftClip(_) => 'S',
            CigarOp::HardClip(_) => 'H',
            CigarOp::Pad(_) => 'P',
        }
    }

    /// Get the operation length
    pub(crate) fn len(&self) -> u32 {
        match self {
            CigarOp::Match(n)
            | CigarOp::Equal(n)
            | CigarOp::Diff(n)
            | CigarOp::Ins(n)
            | CigarOp::Del(n)
            | CigarOp::RefSkip(n)
            | CigarOp::SoftClip(n)
            | CigarOp::HardClip(n)
            | CigarOp::Pad(n) => *n,
        }
    }
}

/// Parse a SAM CIGAR string such as `20M100N20M`.
///
/// `*` (no CIGAR) parses to an empty list.
#[cfg(test)]
pub(crate) fn parse_cigar(s: &str) -> Result<Vec<CigarOp>, String> {
    if s == "*" {
        return Ok(Vec::new());
    }

    let invalid = || format!("invalid CIGAR string '{s}'");

    let mut ops = Vec::new();
    let mut len: Option<u32> = None;
    for c in s.chars() {
        if let Some(digit) = c.to_digit(10) {
            let n = len.unwrap_or(0);
            len = Some(
                n.checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(invalid)?,
            );
        } else {
            let n = len.take().ok_or_else(invalid)?;
            ops.push(CigarOp::from_char(c, n).ok_or_else(invalid)?);
        }
    }

    if len.is_some() {
        return Err(invalid());
    }
    Ok(ops)
}
