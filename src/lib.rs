pub mod cigar;
pub mod error;
pub mod extract;
pub mod io;
pub mod junction;
pub mod params;
pub mod stats;

use log::info;

use crate::extract::JunctionExtractor;
use crate::io::AlignmentReader;
use crate::junction::{write_anchor_bed, write_intron_bed};
use crate::params::Parameters;

/// Top-level driver. Called from `main()` after CLI parsing.
///
/// Reads the whole input before writing anything, so a failed read leaves no
/// partial output.
pub fn run(params: &Parameters) -> anyhow::Result<()> {
    params.validate()?;

    info!("intronProspector v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "input: {}",
        params
            .input
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
    );
    info!("strandness: {}", params.strandness);
    info!(
        "minAnchorLength: {}, minIntronLength: {}, maxIntronLength: {}",
        params.min_anchor_length, params.min_intron_length, params.max_intron_length
    );

    let mut source = AlignmentReader::open(params.input.as_deref())?;
    let mut extractor = JunctionExtractor::new(params.junction_filter(), params.strandness);
    extractor.extract(&mut source)?;

    let registry = extractor.registry();
    extractor
        .stats()
        .print_summary(registry.len(), registry.total_support());

    if params.junction_bed.is_some() || params.intron_bed.is_some() {
        let junctions = registry.sorted();
        if let Some(path) = &params.junction_bed {
            write_anchor_bed(path, &junctions)?;
        }
        if let Some(path) = &params.intron_bed {
            write_intron_bed(path, &junctions)?;
        }
    } else {
        info!("No output files requested");
    }

    info!("Junction extraction complete!");
    Ok(())
}
