use abstutil::Timer;
use opendrive::{
    BuilderCall, CubicPolynomial, JunctionID, LaneID, ParseOptions, RecordingBuilder, RoadID,
};

fn input(name: &str) -> String {
    format!("{}/tests/input/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn record(name: &str, opts: &ParseOptions) -> anyhow::Result<Vec<BuilderCall>> {
    let mut builder = RecordingBuilder::new();
    opendrive::load(&input(name), &mut builder, opts, &mut Timer::throwaway())?;
    Ok(builder.into_calls())
}

#[test]
fn single_road() {
    let calls = record("single_road.xodr", &ParseOptions::default()).unwrap();
    assert_eq!(
        calls,
        vec![
            BuilderCall::AddRoad {
                id: 10,
                name: String::new(),
                length: 50.0,
                junction_id: -1,
                predecessor: -1,
                successor: -1,
            },
            BuilderCall::AddRoadSection {
                road_id: 10,
                polynomial: CubicPolynomial::new(0.0, 0.0, 0.0, 0.0, 0.0),
            },
            BuilderCall::AddRoadSectionLane {
                road_id: 10,
                section_index: 0,
                lane_id: 1,
                lane_type: "driving".to_string(),
                level: false,
                predecessor: 0,
                successor: 0,
            },
            BuilderCall::AddRoadSectionLane {
                road_id: 10,
                section_index: 0,
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
fn one_add_road_per_road_in_order() {
    let calls = record("town.xodr", &ParseOptions::default()).unwrap();
    let roads: Vec<(i32, i32, i32, i32)> = calls
        .iter()
        .filter_map(|call| match call {
            BuilderCall::AddRoad {
                id,
                junction_id,
                predecessor,
                successor,
                ..
            } => Some((*id, *junction_id, *predecessor, *successor)),
            _ => None,
        })
        .collect();
    assert_eq!(roads, vec![(0, -1, -1, 100), (1, 100, 0, 2), (2, -1, 100, -1)]);
}

#[test]
fn lanes_follow_their_section() {
    let calls = record("town.xodr", &ParseOptions::default()).unwrap();

    let mut current_road = None;
    let mut sections_seen = 0;
    for call in &calls {
        match call {
            BuilderCall::AddRoad { id, .. } => {
                current_road = Some(*id);
                sections_seen = 0;
            }
            BuilderCall::SetRoadTypeSpeed { road_id, .. } => {
                assert_eq!(Some(*road_id), current_road);
                assert_eq!(sections_seen, 0, "type speeds come before any section");
            }
            BuilderCall::AddRoadSection { road_id, .. } => {
                assert_eq!(Some(*road_id), current_road);
                sections_seen += 1;
            }
            BuilderCall::AddRoadSectionLane {
                road_id,
                section_index,
                ..
            } => {
                assert_eq!(Some(*road_id), current_road);
                // The lane's section must be the most recent one
                assert_eq!(*section_index + 1, sections_seen);
            }
        }
    }
}

#[test]
fn town_details() {
    let roads = opendrive::load_roads(
        &input("town.xodr"),
        &ParseOptions::default(),
        &mut Timer::throwaway(),
    )
    .unwrap();
    assert_eq!(roads.len(), 3);

    let road0 = &roads[0];
    assert_eq!(road0.successor, Some(RoadID(100)));
    assert_eq!(road0.type_speeds.len(), 2);
    assert!((road0.type_speeds[0].max_meters_per_second().unwrap() - 17.8816).abs() < 1e-6);
    assert!((road0.type_speeds[1].max_meters_per_second().unwrap() - 25.0).abs() < 1e-6);
    assert_eq!(road0.sections.len(), 2);
    assert_eq!(road0.sections[1].offset.a, -0.5);
    assert_eq!(road0.sections[1].offset.s, 60.0);
    assert!((road0.lane_offset_at(70.0) - (-0.5 + 0.01 * 10.0)).abs() < 1e-9);

    // A lane without a type attribute
    let lane = &road0.sections[0].lanes[3];
    assert_eq!(lane.id, LaneID(-2));
    assert_eq!(lane.lane_type, "none");

    let connector = &roads[1];
    assert_eq!(connector.junction, Some(JunctionID(100)));
    assert!(connector.is_junction());
    assert_eq!(connector.type_speeds[0].max_speed, 0.0);

    // Surplus offsets are ignored
    assert_eq!(roads[2].sections.len(), 1);
    assert_eq!(roads[2].sections[0].offset.a, 0.25);
}

#[test]
fn missing_offset_is_a_contract_violation() {
    let err = record("missing_offset.xodr", &ParseOptions::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Road #3 has 2 lane sections, but only 1 laneOffsets"));

    let calls = record("missing_offset.xodr", &ParseOptions::lenient()).unwrap();
    let offsets: Vec<CubicPolynomial> = calls
        .iter()
        .filter_map(|call| match call {
            BuilderCall::AddRoadSection { polynomial, .. } => Some(*polynomial),
            _ => None,
        })
        .collect();
    assert_eq!(
        offsets,
        vec![
            CubicPolynomial::new(1.0, 0.0, 0.0, 0.0, 0.0),
            CubicPolynomial::new(0.0, 0.0, 0.0, 0.0, 20.0),
        ]
    );
}

#[test]
fn missing_file() {
    assert!(record("does_not_exist.xodr", &ParseOptions::default()).is_err());
}
