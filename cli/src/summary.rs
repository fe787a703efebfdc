use anyhow::Result;

use abstutil::{prettyprint_usize, Timer};
use opendrive::{ParseOptions, Road, Side};

pub fn run(input: String, opts: ParseOptions) -> Result<()> {
    let mut timer = Timer::new(format!("summarize {}", input));
    let roads = opendrive::load_roads(&input, &opts, &mut timer)?;

    println!(
        "{} has {} roads",
        abstutil::basename(&input),
        prettyprint_usize(roads.len())
    );
    for road in &roads {
        println!("{}", describe(road));
    }
    Ok(())
}

fn describe(road: &Road) -> String {
    let mut line = format!("- {}", road.id);
    if !road.name.is_empty() {
        line.push_str(&format!(" ({})", road.name));
    }
    line.push_str(&format!(", {}m", road.length));
    if let Some(junction) = road.junction {
        line.push_str(&format!(", in {}", junction));
    }

    let (left, right) = road
        .sections
        .iter()
        .flat_map(|section| section.lanes.iter())
        .fold((0, 0), |(left, right), lane| match lane.side() {
            Side::Left => (left + 1, right),
            Side::Right => (left, right + 1),
        });
    line.push_str(&format!(
        ": {} lane sections, {} left and {} right lanes",
        road.sections.len(),
        left,
        right
    ));

    for speed in &road.type_speeds {
        line.push_str(&format!("\n    from s={}: {}", speed.s, speed.road_type));
        if let Some(mps) = speed.max_meters_per_second() {
            line.push_str(&format!(", max {} {} ({:.1} m/s)", speed.max_speed, speed.unit, mps));
        }
    }
    line
}
