use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

/// Options for extracting roads from an OpenDRIVE document.
#[derive(Clone, Debug, Default, PartialEq, StructOpt, Serialize, Deserialize)]
pub struct ParseOptions {
    /// When a road has more lane sections than laneOffset entries, use a zero offset for the
    /// extra sections instead of failing.
    #[structopt(long = "lenient-offsets", parse(from_flag = OffsetPolicy::from_lenient_flag))]
    #[serde(default)]
    pub offset_policy: OffsetPolicy,
}

/// Every lane section takes the next laneOffset of its road, in document order. This decides what
/// happens when a road runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetPolicy {
    /// The road breaks the document's contract, so extraction fails.
    #[default]
    Strict,
    /// Use an all-zero polynomial and record a warning.
    ZeroWhenExhausted,
}

impl OffsetPolicy {
    pub fn from_lenient_flag(lenient: bool) -> OffsetPolicy {
        if lenient {
            OffsetPolicy::ZeroWhenExhausted
        } else {
            OffsetPolicy::Strict
        }
    }
}

impl ParseOptions {
    pub fn lenient() -> ParseOptions {
        ParseOptions {
            offset_policy: OffsetPolicy::ZeroWhenExhausted,
        }
    }

    /// Reads options from a JSON file. Missing fields get defaults.
    pub fn load(path: &str) -> Result<ParseOptions> {
        let raw = fs_err::read_to_string(path)?;
        serde_json::from_str(&raw).with_context(|| format!("parsing options in {}", path))
    }
}
