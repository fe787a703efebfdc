use serde::{Deserialize, Serialize};

use crate::{CubicPolynomial, MapBuilder};

/// One call made on a `MapBuilder`, with the same arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BuilderCall {
    AddRoad {
        id: i32,
        name: String,
        length: f64,
        junction_id: i32,
        predecessor: i32,
        successor: i32,
    },
    SetRoadTypeSpeed {
        road_id: i32,
        s: f64,
        road_type: String,
        max_speed: f64,
        unit: String,
    },
    AddRoadSection {
        road_id: i32,
        polynomial: CubicPolynomial,
    },
    AddRoadSectionLane {
        road_id: i32,
        section_index: usize,
        lane_id: i32,
        lane_type: String,
        level: bool,
        predecessor: i32,
        successor: i32,
    },
}

/// A builder that just remembers every call, to inspect or dump to JSON later.
#[derive(Default)]
pub struct RecordingBuilder {
    pub calls: Vec<BuilderCall>,
}

impl RecordingBuilder {
    pub fn new() -> RecordingBuilder {
        RecordingBuilder { calls: Vec::new() }
    }

    pub fn into_calls(self) -> Vec<BuilderCall> {
        self.calls
    }
}

impl MapBuilder for RecordingBuilder {
    fn add_road(
        &mut self,
        id: i32,
        name: &str,
        length: f64,
        junction_id: i32,
        predecessor: i32,
        successor: i32,
    ) {
        self.calls.push(BuilderCall::AddRoad {
            id,
            name: name.to_string(),
            length,
            junction_id,
            predecessor,
            successor,
        });
    }

    fn set_road_type_speed(
        &mut self,
        road_id: i32,
        s: f64,
        road_type: &str,
        max_speed: f64,
        unit: &str,
    ) {
        self.calls.push(BuilderCall::SetRoadTypeSpeed {
            road_id,
            s,
            road_type: road_type.to_string(),
            max_speed,
            unit: unit.to_string(),
        });
    }

    fn add_road_section(&mut self, road_id: i32, polynomial: CubicPolynomial) {
        self.calls.push(BuilderCall::AddRoadSection { road_id, polynomial });
    }

    fn add_road_section_lane(
        &mut self,
        road_id: i32,
        section_index: usize,
        lane_id: i32,
        lane_type: &str,
        level: bool,
        predecessor: i32,
        successor: i32,
    ) {
        self.calls.push(BuilderCall::AddRoadSectionLane {
            road_id,
            section_index,
            lane_id,
            lane_type: lane_type.to_string(),
            level,
            predecessor,
            successor,
        });
    }
}
