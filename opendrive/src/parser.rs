//! Turns `<road>` elements into `Road`s.
//!
//! Lane offsets aren't linked to lane sections by any ID. A road lists its `<laneOffset>`s and
//! `<laneSection>`s separately, and the Nth section takes the Nth offset. Once taken, an offset
//! is never reused.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use roxmltree::{Document, Node};

use abstutil::{prettyprint_usize, Timer};

use crate::attrs::{children_of, NodeExt};
use crate::{
    forward, JunctionID, Lane, LaneID, LaneSection, MapBuilder, OffsetPolicy, ParseOptions,
    Polynomial, Road, RoadID, RoadTypeSpeed,
};

/// A road with fewer `<laneOffset>`s than `<laneSection>`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetMismatch {
    pub road: RoadID,
    pub num_offsets: usize,
    pub num_sections: usize,
}

/// Reads an OpenDRIVE file and sends every road to the builder.
pub fn load(
    path: &str,
    builder: &mut dyn MapBuilder,
    opts: &ParseOptions,
    timer: &mut Timer,
) -> Result<()> {
    let roads = load_roads(path, opts, timer)?;
    timer.start("forward to map builder");
    forward(&roads, builder);
    timer.stop("forward to map builder");
    Ok(())
}

/// Reads an OpenDRIVE file and returns its roads, without involving a builder.
pub fn load_roads(path: &str, opts: &ParseOptions, timer: &mut Timer) -> Result<Vec<Road>> {
    timer.start(format!("read {}", path));
    let raw_string = fs_err::read_to_string(path);
    timer.stop(format!("read {}", path));
    let raw_string = raw_string?;

    let tree = Document::parse(&raw_string).with_context(|| format!("parsing XML in {}", path))?;
    extract_roads(&tree, opts, timer).with_context(|| format!("extracting roads from {}", path))
}

/// Extracts every road, then sends them all to the builder. If extraction fails, the builder is
/// never called.
pub fn parse(
    doc: &Document,
    builder: &mut dyn MapBuilder,
    opts: &ParseOptions,
    timer: &mut Timer,
) -> Result<()> {
    let roads = extract_roads(doc, opts, timer)?;
    forward(&roads, builder);
    Ok(())
}

/// Every `<road>` under the `<OpenDRIVE>` root, in document order.
pub fn extract_roads(doc: &Document, opts: &ParseOptions, timer: &mut Timer) -> Result<Vec<Road>> {
    let road_nodes = road_elements(doc);
    if road_nodes.is_empty() {
        warn!("No <road> elements under <OpenDRIVE>");
    }

    timer.start("extract roads");
    let mut roads = Vec::new();
    for node in road_nodes {
        match extract_road(node, opts, timer) {
            Ok(road) => roads.push(road),
            Err(err) => {
                timer.stop("extract roads");
                return Err(err);
            }
        }
    }
    timer.stop("extract roads");

    let num_sections: usize = roads.iter().map(|r| r.sections.len()).sum();
    let num_lanes: usize = roads.iter().map(|r| r.num_lanes()).sum();
    timer.note(format!(
        "Extracted {} roads with {} lane sections and {} lanes",
        prettyprint_usize(roads.len()),
        prettyprint_usize(num_sections),
        prettyprint_usize(num_lanes)
    ));
    Ok(roads)
}

/// Finds roads whose lane sections would run out of lane offsets. Extracting these fails with
/// `OffsetPolicy::Strict`, so callers can check up-front.
pub fn validate_offsets(doc: &Document) -> Vec<OffsetMismatch> {
    let mut problems = Vec::new();
    for node in road_elements(doc) {
        let lanes = node.child_named("lanes");
        let num_offsets = children_of(lanes, "laneOffset").len();
        let num_sections = children_of(lanes, "laneSection").len();
        if num_offsets < num_sections {
            problems.push(OffsetMismatch {
                road: RoadID(node.attr_int("id")),
                num_offsets,
                num_sections,
            });
        }
    }
    problems
}

fn road_elements<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    children_of(doc.root().child_named("OpenDRIVE"), "road")
}

fn extract_road(node: Node, opts: &ParseOptions, timer: &mut Timer) -> Result<Road> {
    let mut road = Road {
        id: RoadID(node.attr_int("id")),
        name: node.attr_string("name"),
        length: node.attr_float("length"),
        junction: JunctionID::from_wire(node.attr_int("junction")),
        predecessor: None,
        successor: None,
        type_speeds: Vec::new(),
        sections: Vec::new(),
    };

    if let Some(link) = node.child_named("link") {
        road.predecessor = link
            .child_named("predecessor")
            .map(|n| RoadID(n.attr_int("elementId")));
        road.successor = link
            .child_named("successor")
            .map(|n| RoadID(n.attr_int("elementId")));
    }

    for node_type in node.children_named("type") {
        road.type_speeds.push(extract_type_speed(node_type));
    }

    let lanes = node.child_named("lanes");
    let mut lane_offsets: VecDeque<Polynomial> = children_of(lanes, "laneOffset")
        .into_iter()
        .map(extract_polynomial)
        .collect();
    let section_nodes = children_of(lanes, "laneSection");
    let num_offsets = lane_offsets.len();
    let num_sections = section_nodes.len();

    for node_section in section_nodes {
        let s = node_section.attr_float("s");
        let offset = match lane_offsets.pop_front() {
            Some(poly) => Polynomial { s, ..poly },
            None => match opts.offset_policy {
                OffsetPolicy::Strict => bail!(
                    "{} has {} lane sections, but only {} laneOffsets",
                    road.id,
                    num_sections,
                    num_offsets
                ),
                OffsetPolicy::ZeroWhenExhausted => {
                    timer.warn(format!(
                        "{} ran out of laneOffsets at the lane section at s={}; using a zero offset",
                        road.id, s
                    ));
                    Polynomial::zero(s)
                }
            },
        };

        let mut section = LaneSection {
            s,
            offset,
            lanes: Vec::new(),
        };
        for side in ["left", "right"] {
            extract_lanes(
                road.id,
                node_section.child_named(side),
                &mut section.lanes,
                timer,
            );
        }
        road.sections.push(section);
    }

    if !lane_offsets.is_empty() {
        debug!("{} has {} unused laneOffsets", road.id, lane_offsets.len());
    }

    Ok(road)
}

fn extract_type_speed(node: Node) -> RoadTypeSpeed {
    let mut type_speed = RoadTypeSpeed {
        s: node.attr_float("s"),
        road_type: node.attr_string("type"),
        max_speed: 0.0,
        unit: String::new(),
    };
    if let Some(speed) = node.child_named("speed") {
        type_speed.max_speed = speed.attr_float("max");
        type_speed.unit = speed.attr_string("unit");
    }
    type_speed
}

fn extract_polynomial(node: Node) -> Polynomial {
    Polynomial {
        s: node.attr_float("s"),
        a: node.attr_float("a"),
        b: node.attr_float("b"),
        c: node.attr_float("c"),
        d: node.attr_float("d"),
    }
}

// Appends lanes from one side (`<left>` or `<right>`) of a section, in document order.
fn extract_lanes(road: RoadID, side: Option<Node>, lanes: &mut Vec<Lane>, timer: &mut Timer) {
    for node_lane in children_of(side, "lane") {
        let id = node_lane.attr_int("id");
        if id == 0 {
            timer.warn(format!(
                "{} has a lane with ID 0 outside of <center>; skipping it",
                road
            ));
            continue;
        }

        let mut lane = Lane {
            id: LaneID(id),
            lane_type: node_lane.attr_string_or("type", "none"),
            level: node_lane.attr_bool("level"),
            predecessor: None,
            successor: None,
        };
        if let Some(link) = node_lane.child_named("link") {
            lane.predecessor = link
                .child_named("predecessor")
                .and_then(|n| LaneID::from_wire(n.attr_int("id")));
            lane.successor = link
                .child_named("successor")
                .and_then(|n| LaneID::from_wire(n.attr_int("id")));
        }
        lanes.push(lane);
    }
}
