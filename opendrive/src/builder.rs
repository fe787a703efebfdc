use serde::{Deserialize, Serialize};

use crate::{JunctionID, LaneID, Polynomial, Road, RoadID};

/// The lane offset handed to a builder, starting at `s`. Same meaning as `Polynomial`, just
/// ordered the way map builders take it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicPolynomial {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub s: f64,
}

impl CubicPolynomial {
    pub fn new(a: f64, b: f64, c: f64, d: f64, s: f64) -> CubicPolynomial {
        CubicPolynomial { a, b, c, d, s }
    }

    pub fn eval_at(&self, s: f64) -> f64 {
        Polynomial::from(*self).eval_at(s)
    }
}

impl From<Polynomial> for CubicPolynomial {
    fn from(p: Polynomial) -> CubicPolynomial {
        CubicPolynomial::new(p.a, p.b, p.c, p.d, p.s)
    }
}

impl From<CubicPolynomial> for Polynomial {
    fn from(p: CubicPolynomial) -> Polynomial {
        Polynomial {
            s: p.s,
            a: p.a,
            b: p.b,
            c: p.c,
            d: p.d,
        }
    }
}

/// Whatever constructs the real map. Calls arrive in this order for each road: `add_road`, every
/// `set_road_type_speed`, then per lane section, `add_road_section` followed by
/// `add_road_section_lane` for each of its lanes.
///
/// Missing links use sentinels: -1 for roads and junctions, 0 for lanes.
pub trait MapBuilder {
    fn add_road(
        &mut self,
        id: i32,
        name: &str,
        length: f64,
        junction_id: i32,
        predecessor: i32,
        successor: i32,
    );

    fn set_road_type_speed(
        &mut self,
        road_id: i32,
        s: f64,
        road_type: &str,
        max_speed: f64,
        unit: &str,
    );

    fn add_road_section(&mut self, road_id: i32, polynomial: CubicPolynomial);

    /// `section_index` counts the road's lane sections from 0, in document order.
    #[allow(clippy::too_many_arguments)]
    fn add_road_section_lane(
        &mut self,
        road_id: i32,
        section_index: usize,
        lane_id: i32,
        lane_type: &str,
        level: bool,
        predecessor: i32,
        successor: i32,
    );
}

/// Replays extracted roads into a builder, preserving their order.
pub fn forward(roads: &[Road], builder: &mut dyn MapBuilder) {
    for road in roads {
        builder.add_road(
            road.id.0,
            &road.name,
            road.length,
            JunctionID::to_wire(road.junction),
            RoadID::to_wire(road.predecessor),
            RoadID::to_wire(road.successor),
        );

        for speed in &road.type_speeds {
            builder.set_road_type_speed(
                road.id.0,
                speed.s,
                &speed.road_type,
                speed.max_speed,
                &speed.unit,
            );
        }

        for (idx, section) in road.sections.iter().enumerate() {
            builder.add_road_section(road.id.0, section.offset.into());
            for lane in &section.lanes {
                builder.add_road_section_lane(
                    road.id.0,
                    idx,
                    lane.id.0,
                    &lane.lane_type,
                    lane.level,
                    LaneID::to_wire(lane.predecessor),
                    LaneID::to_wire(lane.successor),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuilderCall, Lane, LaneSection, RecordingBuilder, RoadTypeSpeed};

    fn lane(id: i32, predecessor: Option<i32>) -> Lane {
        Lane {
            id: LaneID(id),
            lane_type: "driving".to_string(),
            level: false,
            predecessor: predecessor.map(LaneID),
            successor: None,
        }
    }

    #[test]
    fn test_forward_order() {
        let road = Road {
            id: RoadID(3),
            name: "Main".to_string(),
            length: 20.0,
            junction: Some(JunctionID(9)),
            predecessor: Some(RoadID(2)),
            successor: None,
            type_speeds: vec![RoadTypeSpeed {
                s: 0.0,
                road_type: "town".to_string(),
                max_speed: 50.0,
                unit: "km/h".to_string(),
            }],
            // Deliberately not sorted by s; the index is just the position
            sections: vec![
                LaneSection {
                    s: 10.0,
                    offset: Polynomial::zero(10.0),
                    lanes: vec![lane(1, None)],
                },
                LaneSection {
                    s: 0.0,
                    offset: Polynomial {
                        s: 0.0,
                        a: 1.0,
                        b: 2.0,
                        c: 3.0,
                        d: 4.0,
                    },
                    lanes: vec![lane(1, Some(1)), lane(-1, None)],
                },
            ],
        };

        let mut builder = RecordingBuilder::new();
        forward(&[road], &mut builder);
        assert_eq!(
            builder.calls,
            vec![
                BuilderCall::AddRoad {
                    id: 3,
                    name: "Main".to_string(),
                    length: 20.0,
                    junction_id: 9,
                    predecessor: 2,
                    successor: -1,
                },
                BuilderCall::SetRoadTypeSpeed {
                    road_id: 3,
                    s: 0.0,
                    road_type: "town".to_string(),
                    max_speed: 50.0,
                    unit: "km/h".to_string(),
                },
                BuilderCall::AddRoadSection {
                    road_id: 3,
                    polynomial: CubicPolynomial::new(0.0, 0.0, 0.0, 0.0, 10.0),
                },
                BuilderCall::AddRoadSectionLane {
                    road_id: 3,
                    section_index: 0,
                    lane_id: 1,
                    lane_type: "driving".to_string(),
                    level: false,
                    predecessor: 0,
                    successor: 0,
                },
                BuilderCall::AddRoadSection {
                    road_id: 3,
                    polynomial: CubicPolynomial::new(1.0, 2.0, 3.0, 4.0, 0.0),
                },
                BuilderCall::AddRoadSectionLane {
                    road_id: 3,
                    section_index: 1,
                    lane_id: 1,
                    lane_type: "driving".to_string(),
                    level: false,
                    predecessor: 1,
                    successor: 0,
                },
                BuilderCall::AddRoadSectionLane {
                    road_id: 3,
                    section_index: 1,
                    lane_id: -1,
                    lane_type: "driving".to_string(),
                    level: false,
                    predecessor: 0,
                    successor: 0,
                },
            ]
        );
    }

    #[test]
    fn test_cubic_polynomial_conversion() {
        let p = Polynomial {
            s: 5.0,
            a: 1.0,
            b: 0.5,
            c: 0.0,
            d: 0.0,
        };
        let cubic = CubicPolynomial::from(p);
        assert_eq!(cubic, CubicPolynomial::new(1.0, 0.5, 0.0, 0.0, 5.0));
        assert_eq!(cubic.eval_at(7.0), 2.0);
        assert_eq!(Polynomial::from(cubic), p);
    }
}
