/// SAM/BAM alignment input with noodles
use crate::cigar::CigarOp;
use crate::error::Error;
use crate::junction::PairOrientation;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::data::field::{Tag, Value};
use noodles::{bam, bgzf, sam};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// BGZF (and gzip) magic bytes
const BGZF_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// The fields of one alignment needed for junction calling
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignmentRecord {
    /// Index into the header's reference sequences
    pub reference_id: Option<usize>,
    /// Leftmost reference position (0-based)
    pub position: Option<u64>,
    pub cigar: Vec<CigarOp>,
    /// Strand character from the XS tag
    pub xs_tag: Option<char>,
    pub orientation: PairOrientation,
}

/// A single forward pass over aligned reads
pub trait AlignmentSource {
    /// Name used in log messages (usually the input path)
    fn source_name(&self) -> &str;

    /// Reference sequence names, indexed by reference id
    fn reference_names(&self) -> &[String];

    /// Next alignment, or `None` at end of input
    ///
    /// A record-level error (see [`Error::is_record_error`]) leaves the source
    /// positioned after the offending record, so the pass can continue.
    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, Error>;
}

// Records are read lazily; fields are decoded on conversion so a bad CIGAR
// only costs its own record.
enum Inner {
    Sam {
        reader: sam::io::Reader<Box<dyn BufRead>>,
        record: sam::Record,
    },
    Bam {
        reader: bam::io::Reader<bgzf::io::Reader<Box<dyn BufRead>>>,
        record: bam::Record,
    },
}

/// SAM or BAM reader; the format is detected from the first bytes
pub struct AlignmentReader {
    source_name: String,
    header: sam::Header,
    reference_names: Vec<String>,
    inner: Inner,
}

impl AlignmentReader {
    /// Open an alignment file, or standard input for `None` or `-`
    pub fn open(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) if path != Path::new("-") => {
                let file = File::open(path).map_err(|e| Error::io(e, path))?;
                Self::from_reader(path.display().to_string(), Box::new(BufReader::new(file)))
            }
            _ => Self::from_reader(
                "<stdin>".to_string(),
                Box::new(BufReader::new(io::stdin())),
            ),
        }
    }

    /// Wrap an already opened stream and read its header
    pub fn from_reader(source_name: String, mut reader: Box<dyn BufRead>) -> Result<Self, Error> {
        let is_bgzf = reader
            .fill_buf()
            .map_err(|e| Error::decode(&source_name, e))?
            .starts_with(&BGZF_MAGIC);

        let (inner, header) = if is_bgzf {
            let mut reader = bam::io::Reader::new(reader);
            let header = reader
                .read_header()
                .map_err(|e| Error::decode(&source_name, e))?;
            let record = bam::Record::default();
            (Inner::Bam { reader, record }, header)
        } else {
            let mut reader = sam::io::Reader::new(reader);
            let header = reader
                .read_header()
                .map_err(|e| Error::decode(&source_name, e))?;
            let record = sam::Record::default();
            (Inner::Sam { reader, record }, header)
        };

        let reference_names: Vec<String> = header
            .reference_sequences()
            .keys()
            .map(|name| name.to_string())
            .collect();

        log::debug!(
            "Opened {} as {} with {} reference sequences",
            source_name,
            if is_bgzf { "BAM" } else { "SAM" },
            reference_names.len()
        );

        Ok(Self {
            source_name,
            header,
            reference_names,
            inner,
        })
    }
}

impl AlignmentSource for AlignmentReader {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn reference_names(&self) -> &[String] {
        &self.reference_names
    }

    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, Error> {
        let source_name = self.source_name.as_str();
        let header = &self.header;

        match &mut self.inner {
            Inner::Sam { reader, record } => {
                let n = reader
                    .read_record(record)
                    .map_err(|e| Error::decode(source_name, e))?;
                if n == 0 {
                    return Ok(None);
                }
                convert_record(&*record, header, source_name).map(Some)
            }
            Inner::Bam { reader, record } => {
                let n = reader
                    .read_record(record)
                    .map_err(|e| Error::decode(source_name, e))?;
                if n == 0 {
                    return Ok(None);
                }
                convert_record(&*record, header, source_name).map(Some)
            }
        }
    }
}

/// Extract the junction-relevant fields from a lazily decoded record
///
/// A CIGAR that fails to decode is a record-level error; any other malformed
/// field is fatal for the input.
fn convert_record<R>(
    record: &R,
    header: &sam::Header,
    source_name: &str,
) -> Result<AlignmentRecord, Error>
where
    R: sam::alignment::Record,
{
    let decode = |e: io::Error| Error::decode(source_name, e);

    let flags = record.flags().map_err(decode)?;
    let reference_id = record
        .reference_sequence_id(header)
        .transpose()
        .map_err(decode)?;
    let position = record
        .alignment_start()
        .transpose()
        .map_err(decode)?
        .map(|pos| (pos.get() - 1) as u64);

    let cigar = record
        .cigar()
        .iter()
        .map(|result| {
            let op = result.map_err(|e| Error::InvalidCigar(e.to_string()))?;
            let len = u32::try_from(op.len()).map_err(|_| {
                Error::InvalidCigar(format!("operation length {} out of range", op.len()))
            })?;
            Ok(convert_op(op.kind(), len))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let xs_tag = match record
        .data()
        .get(&Tag::new(b'X', b'S'))
        .transpose()
        .map_err(decode)?
    {
        Some(Value::Character(c)) => Some(char::from(c)),
        Some(Value::String(s)) => s.first().map(|&c| char::from(c)),
        _ => None,
    };

    Ok(AlignmentRecord {
        reference_id,
        position,
        cigar,
        xs_tag,
        orientation: PairOrientation {
            reversed: flags.is_reverse_complemented(),
            mate_reversed: flags.is_mate_reverse_complemented(),
            first_in_pair: flags.is_first_segment(),
            second_in_pair: flags.is_last_segment(),
        },
    })
}

/// Convert noodles CIGAR kind to CigarOp
fn convert_op(kind: Kind, len: u32) -> CigarOp {
    match kind {
        Kind::Match => CigarOp::Match(len),
        Kind::SequenceMatch => CigarOp::Equal(len),
        Kind::SequenceMismatch => CigarOp::Diff(len),
        Kind::Insertion => CigarOp::Ins(len),
        Kind::Deletion => CigarOp::Del(len),
        Kind::Skip => CigarOp::RefSkip(len),
        Kind::SoftClip => CigarOp::SoftClip(len),
        Kind::HardClip => CigarOp::HardClip(len),
        Kind::Pad => CigarOp::Pad(len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noodles::sam::alignment::io::Write as SamWrite;
    use noodles::sam::alignment::RecordBuf;
    use noodles::sam::header::record::value::{map::ReferenceSequence, Map};
    use std::io::Cursor;
    use std::num::NonZeroUsize;
    use tempfile::NamedTempFile;

    const SAM: &str = "@HD\tVN:1.6\tSO:unsorted
@SQ\tSN:chr1\tLN:100000
@SQ\tSN:chr2\tLN:50000
r1\t0\tchr1\t1001\t60\t20M100N20M\t*\t0\t0\t*\t*\tXS:A:+
r2\t83\tchr2\t501\t60\t5S30M\t=\t301\t-235\t*\t*
r3\t4\t*\t0\t0\t*\t*\t0\t0\t*\t*
";

    fn sam_reader(text: &str) -> AlignmentReader {
        AlignmentReader::from_reader(
            "test.sam".to_string(),
            Box::new(Cursor::new(text.as_bytes().to_vec())),
        )
        .unwrap()
    }

    #[test]
    fn test_read_sam_header() {
        let reader = sam_reader(SAM);
        assert_eq!(reader.source_name(), "test.sam");
        assert_eq!(reader.reference_names(), &["chr1", "chr2"]);
    }

    #[test]
    fn test_read_sam_records() {
        let mut reader = sam_reader(SAM);

        let r1 = reader.next_record().unwrap().unwrap();
        assert_eq!(r1.reference_id, Some(0));
        assert_eq!(r1.position, Some(1000));
        assert_eq!(
            r1.cigar,
            vec![CigarOp::Match(20), CigarOp::RefSkip(100), CigarOp::Match(20)]
        );
        assert_eq!(r1.xs_tag, Some('+'));
        assert_eq!(r1.orientation, PairOrientation::default());

        // 83 = paired, proper pair, reverse, first in pair
        let r2 = reader.next_record().unwrap().unwrap();
        assert_eq!(r2.reference_id, Some(1));
        assert_eq!(r2.position, Some(500));
        assert_eq!(r2.xs_tag, None);
        assert!(r2.orientation.reversed);
        assert!(!r2.orientation.mate_reversed);
        assert!(r2.orientation.first_in_pair);
        assert!(!r2.orientation.second_in_pair);

        let r3 = reader.next_record().unwrap().unwrap();
        assert_eq!(r3.reference_id, None);
        assert_eq!(r3.position, None);
        assert!(r3.cigar.is_empty());

        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_padding_op_is_passed_through() {
        let text = "@SQ\tSN:chr1\tLN:100000\nr1\t0\tchr1\t1\t60\t10M2P10M\t*\t0\t0\t*\t*\n";
        let mut reader = sam_reader(text);
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.cigar[1], CigarOp::Pad(2));
    }

    #[test]
    fn test_xs_tag_types() {
        let text = "@SQ\tSN:chr1\tLN:100000
r1\t0\tchr1\t1\t60\t20M100N20M\t*\t0\t0\t*\t*\tXS:Z:-
r2\t0\tchr1\t1\t60\t20M100N20M\t*\t0\t0\t*\t*\tNM:i:0\tXS:A:?
";
        let mut reader = sam_reader(text);
        assert_eq!(reader.next_record().unwrap().unwrap().xs_tag, Some('-'));
        assert_eq!(reader.next_record().unwrap().unwrap().xs_tag, Some('?'));
    }

    #[test]
    fn test_undecodable_cigar_skips_only_its_record() {
        let text = "@SQ\tSN:chr1\tLN:100000
r1\t0\tchr1\t1001\t60\t20M100N20M\t*\t0\t0\t*\t*
r2\t0\tchr1\t3001\t60\t20M200N10M2B10M\t*\t0\t0\t*\t*
r3\t0\tchr1\t5001\t60\t20M100N20M\t*\t0\t0\t*\t*
";
        let mut reader = sam_reader(text);
        assert_eq!(reader.next_record().unwrap().unwrap().position, Some(1000));

        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, Error::InvalidCigar(_)));
        assert!(err.is_record_error());

        assert_eq!(reader.next_record().unwrap().unwrap().position, Some(5000));
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_malformed_position_is_fatal() {
        let text = "@SQ\tSN:chr1\tLN:100000\nr1\t0\tchr1\tnope\t60\t20M\t*\t0\t0\t*\t*\n";
        let mut reader = sam_reader(text);
        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, Error::Source { .. }));
        assert!(!err.is_record_error());
    }

    #[test]
    fn test_open_missing_file() {
        let result = AlignmentReader::open(Some(Path::new("/no/such/reads.bam")));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_read_bam() {
        let header = sam::Header::builder()
            .add_reference_sequence(
                "chr1",
                Map::<ReferenceSequence>::new(NonZeroUsize::new(100_000).unwrap()),
            )
            .build();

        let mut text_reader = sam::io::Reader::new(Cursor::new(
            "@SQ\tSN:chr1\tLN:100000\nr1\t16\tchr1\t1001\t60\t20M100N20M\t*\t0\t0\t*\t*\tXS:A:-\n"
                .as_bytes()
                .to_vec(),
        ));
        let text_header = text_reader.read_header().unwrap();
        let mut record = RecordBuf::default();
        text_reader
            .read_record_buf(&text_header, &mut record)
            .unwrap();

        let bam_file = NamedTempFile::new().unwrap();
        {
            let mut writer = bam::io::Writer::new(File::create(bam_file.path()).unwrap());
            writer.write_header(&header).unwrap();
            writer.write_alignment_record(&header, &record).unwrap();
            writer.finish(&header).unwrap();
        }

        let mut reader = AlignmentReader::open(Some(bam_file.path())).unwrap();
        assert_eq!(reader.reference_names(), &["chr1"]);
        let r = reader.next_record().unwrap().unwrap();
        assert_eq!(r.reference_id, Some(0));
        assert_eq!(r.position, Some(1000));
        assert_eq!(r.cigar.len(), 3);
        assert_eq!(r.xs_tag, Some('-'));
        assert!(r.orientation.reversed);
        assert!(reader.next_record().unwrap().is_none());
    }
}
