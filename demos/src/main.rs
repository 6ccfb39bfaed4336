//! levelnav-route — plan a route between two labelled places of a building.
//!
//! ```text
//! levelnav-route [--plan FILE] [--max-iterations N] [START GOAL]
//! ```
//!
//! Without `--plan` the default generated building is used. Without START
//! and GOAL the available labels are listed.

use std::error::Error;
use std::fmt;

use levelnav_building::{Building, BuildingConfig, RouteOutcome, RoutePlanner, render_session};
use levelnav_paths::SearchOptions;

const USAGE: &str = "usage: levelnav-route [--plan FILE] [--max-iterations N] [START GOAL]";

#[derive(Debug)]
struct UsageError(String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{USAGE}", self.0)
    }
}

impl Error for UsageError {}

#[derive(Debug, Default)]
struct Args {
    plan: Option<String>,
    max_iterations: Option<u32>,
    endpoints: Vec<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, UsageError> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--plan" => {
                    let file = args
                        .next()
                        .ok_or_else(|| UsageError("--plan needs a file".into()))?;
                    parsed.plan = Some(file);
                }
                "--max-iterations" => {
                    let n = args
                        .next()
                        .and_then(|n| n.parse().ok())
                        .ok_or_else(|| UsageError("--max-iterations needs a number".into()))?;
                    parsed.max_iterations = Some(n);
                }
                "-h" | "--help" => return Err(UsageError("levelnav-route".into())),
                _ if arg.starts_with("--") => {
                    return Err(UsageError(format!("unknown option {arg}")));
                }
                _ => parsed.endpoints.push(arg),
            }
        }
        if !matches!(parsed.endpoints.len(), 0 | 2) {
            return Err(UsageError("expected a start and a goal label".into()));
        }
        Ok(parsed)
    }
}

fn load_building(plan: Option<&str>) -> Result<Building, Box<dyn Error>> {
    match plan {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(Building::from_text(&text)?)
        }
        None => Ok(Building::generate(&BuildingConfig::default())?),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse(std::env::args().skip(1))?;
    let building = load_building(args.plan.as_deref())?;

    let [start, goal] = args.endpoints.as_slice() else {
        for (label, pos) in building.labels.iter() {
            println!("{label:<10} {pos}");
        }
        return Ok(());
    };

    let mut options = SearchOptions::default();
    if let Some(n) = args.max_iterations {
        options = options.with_max_iterations(n);
    }
    let mut planner = RoutePlanner::with_options(building, options);
    planner.select_start(start)?;
    planner.select_goal(goal)?;
    let found = matches!(planner.route(), Some(RouteOutcome::Found(_)));
    print!("{}", render_session(&planner));
    if !found {
        std::process::exit(1);
    }
    Ok(())
}
