/// BED output of the junction set
///
/// Anchor BED (12 columns): the record spans both anchors; the two blocks are
/// the left and right anchors and the intron is the gap between them. The
/// thick region is the intron.
///
/// Intron BED (6 columns): the record spans the intron only.
///
/// In both, the name is `JUNC` and the score is the number of supporting
/// alignments.
use super::Junction;
use crate::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const JUNCTION_NAME: &str = "JUNC";
const ITEM_RGB: &str = "255,0,0";

/// Write one anchor BED row
fn write_anchor_row<W: Write>(writer: &mut W, junction: &Junction) -> io::Result<()> {
    let left_block = junction.thick_start - junction.anchor_start;
    let right_block = junction.anchor_end - junction.thick_end;
    let right_block_start = junction.thick_end - junction.anchor_start;

    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t2\t{},{}\t0,{}",
        junction.reference,
        junction.anchor_start,
        junction.anchor_end,
        JUNCTION_NAME,
        junction.support_count,
        junction.strand,
        junction.thick_start,
        junction.thick_end,
        ITEM_RGB,
        left_block,
        right_block,
        right_block_start,
    )
}

/// Write one intron BED row
fn write_intron_row<W: Write>(writer: &mut W, junction: &Junction) -> io::Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}",
        junction.reference,
        junction.thick_start,
        junction.thick_end,
        JUNCTION_NAME,
        junction.support_count,
        junction.strand,
    )
}

/// Write the anchor BED file
pub fn write_anchor_bed(output_path: &Path, junctions: &[&Junction]) -> Result<(), Error> {
    write_bed(output_path, junctions, write_anchor_row)
}

/// Write the intron BED file
pub fn write_intron_bed(output_path: &Path, junctions: &[&Junction]) -> Result<(), Error> {
    write_bed(output_path, junctions, write_intron_row)
}

fn write_bed(
    output_path: &Path,
    junctions: &[&Junction],
    write_row: fn(&mut BufWriter<File>, &Junction) -> io::Result<()>,
) -> Result<(), Error> {
    let file = File::create(output_path).map_err(|e| Error::io(e, output_path))?;
    let mut writer = BufWriter::new(file);

    for junction in junctions {
        write_row(&mut writer, junction).map_err(|e| Error::io(e, output_path))?;
    }

    writer.flush().map_err(|e| Error::io(e, output_path))?;

    log::info!(
        "Wrote {} junctions to {}",
        junctions.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::junction::Strand;
    use tempfile::NamedTempFile;

    fn junction(thick_start: u64, strand: Strand, support_count: u32) -> Junction {
        Junction {
            reference: "chr1".to_string(),
            strand,
            anchor_start: thick_start - 20,
            anchor_end: thick_start + 130,
            thick_start,
            thick_end: thick_start + 100,
            support_count,
        }
    }

    #[test]
    fn test_anchor_row() {
        let mut out = Vec::new();
        write_anchor_row(&mut out, &junction(1020, Strand::Forward, 3)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chr1\t1000\t1150\tJUNC\t3\t+\t1020\t1120\t255,0,0\t2\t20,30\t0,120\n"
        );
    }

    #[test]
    fn test_anchor_row_blocks_cover_record() {
        let j = junction(500, Strand::Reverse, 1);
        let mut out = Vec::new();
        write_anchor_row(&mut out, &j).unwrap();
        let line = String::from_utf8(out).unwrap();
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(fields.len(), 12);

        let sizes: Vec<u64> = fields[10].split(',').map(|s| s.parse().unwrap()).collect();
        let starts: Vec<u64> = fields[11].split(',').map(|s| s.parse().unwrap()).collect();
        // First block starts at chromStart, last block ends at chromEnd
        assert_eq!(starts[0], 0);
        assert_eq!(starts[1] + sizes[1], j.anchor_end - j.anchor_start);
        // The gap between the blocks is the intron
        assert_eq!(starts[1] - sizes[0], j.intron_len());
    }

    #[test]
    fn test_intron_row_unknown_strand() {
        let mut out = Vec::new();
        write_intron_row(&mut out, &junction(1020, Strand::Unknown, 7)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chr1\t1020\t1120\tJUNC\t7\t.\n"
        );
    }

    #[test]
    fn test_write_bed_files() {
        let a = junction(100, Strand::Forward, 1);
        let b = junction(300, Strand::Reverse, 2);
        let junctions = vec![&a, &b];

        let anchor_file = NamedTempFile::new().unwrap();
        write_anchor_bed(anchor_file.path(), &junctions).unwrap();
        let content = std::fs::read_to_string(anchor_file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("chr1\t80\t230\tJUNC\t1\t+"));
        assert!(lines[1].starts_with("chr1\t280\t430\tJUNC\t2\t-"));

        let intron_file = NamedTempFile::new().unwrap();
        write_intron_bed(intron_file.path(), &junctions).unwrap();
        let content = std::fs::read_to_string(intron_file.path()).unwrap();
        assert_eq!(
            content,
            "chr1\t100\t200\tJUNC\t1\t+\nchr1\t300\t400\tJUNC\t2\t-\n"
        );
    }

    #[test]
    fn test_write_bed_bad_path() {
        let a = junction(100, Strand::Forward, 1);
        let err = write_intron_bed(Path::new("/no/such/dir/introns.bed"), &[&a]).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
