/// Junction strand inference
///
/// Unstranded libraries take the strand from the aligner's XS tag. Stranded
/// paired-end libraries derive it from the orientation flags of the read and
/// its mate, given the protocol (RF or FR).
use super::Strand;
use std::fmt;

/// Library strandness protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strandness {
    #[default]
    Unstranded,
    /// First read maps to the reverse of the transcript (dUTP)
    Rf,
    /// First read maps to the forward of the transcript (ligation)
    Fr,
}

impl std::str::FromStr for Strandness {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UN" | "UNSTRANDED" => Ok(Self::Unstranded),
            "RF" => Ok(Self::Rf),
            "FR" => Ok(Self::Fr),
            _ => Err(format!(
                "invalid strandness value '{s}', expected one of 'UN', 'RF', or 'FR' (case insensitive)"
            )),
        }
    }
}

impl fmt::Display for Strandness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unstranded => write!(f, "UN"),
            Self::Rf => write!(f, "RF"),
            Self::Fr => write!(f, "FR"),
        }
    }
}

/// Orientation and pairing flags of one alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairOrientation {
    pub reversed: bool,
    pub mate_reversed: bool,
    pub first_in_pair: bool,
    pub second_in_pair: bool,
}

impl Strandness {
    /// Infer the junction strand for one alignment under this protocol
    ///
    /// # Arguments
    /// * `xs_tag` - Strand character from the XS tag, if present
    /// * `orientation` - Read and mate orientation flags
    pub fn infer(&self, xs_tag: Option<char>, orientation: &PairOrientation) -> Strand {
        match self {
            Strandness::Unstranded => infer_strand_from_tag(xs_tag),
            Strandness::Rf | Strandness::Fr => infer_strand_from_flags(*self, orientation),
        }
    }
}

/// Strand from the XS tag; a missing tag is unknown
pub fn infer_strand_from_tag(xs_tag: Option<char>) -> Strand {
    xs_tag.map_or(Strand::Unknown, Strand::from_char)
}

/// Strand from read-pair orientation flags
///
/// Each mate gives an independent vote; if they disagree the strand is
/// unknown. `Unstranded` carries no protocol and is always unknown.
pub fn infer_strand_from_flags(strandness: Strandness, orientation: &PairOrientation) -> Strand {
    let parity = match strandness {
        Strandness::Rf => true,
        Strandness::Fr => false,
        Strandness::Unstranded => return Strand::Unknown,
    };

    let first_strand = parity ^ orientation.first_in_pair ^ orientation.reversed;
    let second_strand = parity ^ orientation.second_in_pair ^ orientation.mate_reversed;

    if first_strand != second_strand {
        Strand::Unknown
    } else if first_strand {
        Strand::Forward
    } else {
        Strand::Reverse
    }
}
