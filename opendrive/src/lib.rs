//! This crate reads [OpenDRIVE](https://www.asam.net/standards/detail/opendrive/) road networks
//! and hands every road, lane section, and lane to a `MapBuilder`.
//!
//! Only the road-level structure is covered: road attributes and links, road types with speed
//! limits, lane offsets, lane sections, and lanes with their links. Plan-view geometry,
//! elevation, junctions, signals, and objects are ignored.
//!
//! Extraction happens in two steps. First every `<road>` becomes a `Road`, then `forward` replays
//! the roads into a `MapBuilder` in document order. Since nothing reaches the builder until every
//! road has been extracted, a broken document never leaves the builder half-populated.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::builder::{forward, CubicPolynomial, MapBuilder};
pub use self::options::{OffsetPolicy, ParseOptions};
pub use self::parser::{extract_roads, load, load_roads, parse, validate_offsets, OffsetMismatch};
pub use self::recorder::{BuilderCall, RecordingBuilder};

pub mod attrs;
mod builder;
mod options;
mod parser;
mod recorder;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadID(pub i32);

impl fmt::Display for RoadID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Road #{}", self.0)
    }
}

impl RoadID {
    /// Builders see a missing road link as -1.
    pub const NO_LINK: i32 = -1;

    pub fn to_wire(id: Option<RoadID>) -> i32 {
        id.map(|r| r.0).unwrap_or(RoadID::NO_LINK)
    }

    pub fn from_wire(x: i32) -> Option<RoadID> {
        if x == RoadID::NO_LINK {
            None
        } else {
            Some(RoadID(x))
        }
    }
}

/// Positive IDs are left of the reference line, negative are right. 0 is the center lane, which
/// is never represented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneID(pub i32);

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane #{}", self.0)
    }
}

impl LaneID {
    /// Builders see a missing lane link as 0, the center lane's ID.
    pub const NO_LINK: i32 = 0;

    pub fn to_wire(id: Option<LaneID>) -> i32 {
        id.map(|l| l.0).unwrap_or(LaneID::NO_LINK)
    }

    pub fn from_wire(x: i32) -> Option<LaneID> {
        if x == LaneID::NO_LINK {
            None
        } else {
            Some(LaneID(x))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JunctionID(pub i32);

impl fmt::Display for JunctionID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Junction #{}", self.0)
    }
}

impl JunctionID {
    /// OpenDRIVE marks roads outside of any junction with junction="-1", and builders expect the
    /// same. Other negative values are passed through untouched.
    pub const NO_JUNCTION: i32 = -1;

    pub fn to_wire(id: Option<JunctionID>) -> i32 {
        id.map(|j| j.0).unwrap_or(JunctionID::NO_JUNCTION)
    }

    pub fn from_wire(x: i32) -> Option<JunctionID> {
        if x == JunctionID::NO_JUNCTION {
            None
        } else {
            Some(JunctionID(x))
        }
    }
}

/// A cubic segment starting at `s`: `value(ds) = a + b*ds + c*ds^2 + d*ds^3`, where `ds` is
/// measured from `s`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Polynomial {
    pub fn zero(s: f64) -> Polynomial {
        Polynomial {
            s,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        }
    }

    /// Evaluates at a local offset from the start of the segment.
    pub fn eval(&self, ds: f64) -> f64 {
        self.a + ds * (self.b + ds * (self.c + ds * self.d))
    }

    /// Evaluates at a longitudinal position along the whole road.
    pub fn eval_at(&self, s: f64) -> f64 {
        self.eval(s - self.s)
    }
}

/// The road type and speed limit, applying from `s` onwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadTypeSpeed {
    pub s: f64,
    /// Free-form, like "town" or "motorway"
    pub road_type: String,
    /// 0 if there's no `<speed>`. Interpret with `unit`.
    pub max_speed: f64,
    pub unit: String,
}

impl RoadTypeSpeed {
    pub fn speed_unit(&self) -> Option<SpeedUnit> {
        SpeedUnit::parse(&self.unit)
    }

    /// None if the unit isn't recognized.
    pub fn max_meters_per_second(&self) -> Option<f64> {
        self.speed_unit().map(|unit| unit.to_meters_per_second(self.max_speed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    MetersPerSecond,
    KmPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    pub fn parse(unit: &str) -> Option<SpeedUnit> {
        match unit.trim() {
            "m/s" => Some(SpeedUnit::MetersPerSecond),
            "km/h" => Some(SpeedUnit::KmPerHour),
            "mph" => Some(SpeedUnit::MilesPerHour),
            _ => None,
        }
    }

    pub fn to_meters_per_second(self, value: f64) -> f64 {
        match self {
            SpeedUnit::MetersPerSecond => value,
            SpeedUnit::KmPerHour => value / 3.6,
            SpeedUnit::MilesPerHour => value * 0.44704,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub id: LaneID,
    /// "driving", "sidewalk", etc. "none" if the document doesn't say.
    pub lane_type: String,
    pub level: bool,
    /// Lanes in the previous and next lane section
    pub predecessor: Option<LaneID>,
    pub successor: Option<LaneID>,
}

impl Lane {
    pub fn side(&self) -> Side {
        if self.id.0 > 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneSection {
    pub s: f64,
    /// Lateral offset of the lanes from the reference line. Always starts at this section's `s`.
    pub offset: Polynomial,
    /// Left lanes then right lanes, each in document order
    pub lanes: Vec<Lane>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub id: RoadID,
    pub name: String,
    pub length: f64,
    pub junction: Option<JunctionID>,
    pub predecessor: Option<RoadID>,
    pub successor: Option<RoadID>,
    /// Ordered by `s`, as long as the document was
    pub type_speeds: Vec<RoadTypeSpeed>,
    pub sections: Vec<LaneSection>,
}

impl Road {
    pub fn is_junction(&self) -> bool {
        self.junction.is_some()
    }

    /// The last section starting at or before `s`. Assumes sections are sorted by `s`.
    pub fn section_index_at(&self, s: f64) -> Option<usize> {
        self.sections.iter().rposition(|section| section.s <= s)
    }

    /// 0 before the first section or if there are no sections.
    pub fn lane_offset_at(&self, s: f64) -> f64 {
        match self.section_index_at(s) {
            Some(idx) => self.sections[idx].offset.eval_at(s),
            None => 0.0,
        }
    }

    pub fn num_lanes(&self) -> usize {
        self.sections.iter().map(|section| section.lanes.len()).sum()
    }
}
