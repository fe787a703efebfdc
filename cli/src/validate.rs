use anyhow::{bail, Context, Result};

use abstutil::plain_list_names;
use opendrive::OffsetMismatch;

pub fn run(input: String) -> Result<()> {
    let raw = fs_err::read_to_string(&input)?;
    let doc =
        roxmltree::Document::parse(&raw).with_context(|| format!("parsing XML in {}", input))?;

    let problems = opendrive::validate_offsets(&doc);
    if problems.is_empty() {
        info!("Every road in {} has enough laneOffsets", input);
        return Ok(());
    }
    for problem in &problems {
        warn!(
            "{} has {} lane sections, but only {} laneOffsets",
            problem.road, problem.num_sections, problem.num_offsets
        );
    }
    bail!("{}", describe(&problems))
}

// Roads are listed in document order, repeats included.
fn describe(problems: &[OffsetMismatch]) -> String {
    format!(
        "Roads {} are missing laneOffsets. Pass --lenient-offsets to dump-calls or summary to treat \
         them as zero.",
        plain_list_names(problems.iter().map(|p| p.road.0.to_string()))
    )
}
