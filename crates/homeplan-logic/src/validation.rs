//! Structural validation for floor plans.
//!
//! Pure functions that inspect a finished [`FloorPlanPreset`] and report
//! problems. Nothing here mutates or repairs a plan; callers decide what to
//! do with the findings.

use crate::constants::EPSILON;
use crate::model::{FloorPlanPreset, Wall};
use crate::waypoints::WaypointGraph;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

// ── A. Rooms ────────────────────────────────────────────────────────────

/// Every room has a positive footprint.
pub fn check_room_dimensions(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    plan.rooms
        .iter()
        .filter(|r| r.size[0] <= 0.0 || r.size[1] <= 0.0)
        .map(|r| {
            error(
                "room_geometry",
                format!("Room '{}' has non-positive size {}×{}", r.id, r.size[0], r.size[1]),
            )
        })
        .collect()
}

/// No two rooms on the same floor overlap. Shared edges are fine.
pub fn check_room_overlaps(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for floor in plan.declared_floors() {
        let rooms: Vec<_> = plan.rooms_on_floor(floor).collect();
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if rooms[i].bounds().overlaps(&rooms[j].bounds()) {
                    errors.push(error(
                        "room_overlap",
                        format!(
                            "Rooms '{}' and '{}' overlap on floor {}",
                            rooms[i].id, rooms[j].id, floor
                        ),
                    ));
                }
            }
        }
    }
    errors
}

/// Room and waypoint ids are unique within the plan.
pub fn check_unique_ids(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut rooms = HashSet::new();
    for r in &plan.rooms {
        if !rooms.insert(r.id.as_str()) {
            errors.push(error("identity", format!("Duplicate room id '{}'", r.id)));
        }
    }
    let mut waypoints = HashSet::new();
    for w in &plan.waypoints {
        if !waypoints.insert(w.id.as_str()) {
            errors.push(error("identity", format!("Duplicate waypoint id '{}'", w.id)));
        }
    }
    errors
}

/// Every element sits on a floor the plan declares.
pub fn check_declared_floors(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let declared: HashSet<i32> = plan.declared_floors().into_iter().collect();
    let rooms = plan
        .rooms
        .iter()
        .map(|r| ("Room", format!("'{}'", r.id), r.floor_index()));
    let waypoints = plan
        .waypoints
        .iter()
        .map(|w| ("Waypoint", format!("'{}'", w.id), w.floor_index()));
    let walls = plan
        .walls
        .iter()
        .enumerate()
        .map(|(i, w)| ("Wall", format!("#{}", i), w.floor_index()));
    let doors = plan
        .door_frames
        .iter()
        .enumerate()
        .map(|(i, d)| ("Door frame", format!("#{}", i), d.floor_index()));
    let lights = plan
        .lights
        .iter()
        .enumerate()
        .map(|(i, l)| ("Light", format!("#{}", i), l.floor.unwrap_or(0)));
    let ceilings = plan
        .ceilings
        .iter()
        .enumerate()
        .map(|(i, c)| ("Ceiling", format!("#{}", i), c.floor.unwrap_or(0)));

    rooms
        .chain(waypoints)
        .chain(walls)
        .chain(doors)
        .chain(lights)
        .chain(ceilings)
        .filter(|(_, _, floor)| !declared.contains(floor))
        .map(|(kind, label, floor)| {
            error(
                "floors",
                format!("{} {} is on undeclared floor {}", kind, label, floor),
            )
        })
        .collect()
}

// ── B. Walls & doors ────────────────────────────────────────────────────

/// Walls never have zero length.
pub fn check_wall_lengths(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    plan.walls
        .iter()
        .enumerate()
        .filter(|(_, w)| w.length() <= EPSILON)
        .map(|(i, w)| {
            error(
                "wall_geometry",
                format!("Wall #{} at ({}, {}) has zero length", i, w.start[0], w.start[1]),
            )
        })
        .collect()
}

/// Interval covered by `wall` along a line at `fixed`, if the wall lies on
/// that line. `along_x` selects horizontal (fixed z) lines.
fn span_on_line(wall: &Wall, along_x: bool, fixed: f32) -> Option<(f32, f32)> {
    let (fa, fb, a, b) = if along_x {
        (wall.start[1], wall.end[1], wall.start[0], wall.end[0])
    } else {
        (wall.start[0], wall.end[0], wall.start[1], wall.end[1])
    };
    (near(fa, fixed) && near(fb, fixed)).then(|| (a.min(b), a.max(b)))
}

/// Each door frame stands in a real gap: no wall on its line covers the
/// door center, and a wall segment ends at one of the gap's edges.
pub fn check_door_frames(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, d) in plan.door_frames.iter().enumerate() {
        let along_x = !d.along_z;
        let (fixed, c) = if along_x {
            (d.center[1], d.center[0])
        } else {
            (d.center[0], d.center[1])
        };
        let half = d.gap_width / 2.0;
        let spans: Vec<(f32, f32)> = plan
            .walls_on_floor(d.floor_index())
            .filter_map(|w| span_on_line(w, along_x, fixed))
            .collect();

        if spans.iter().any(|&(lo, hi)| lo < c - EPSILON && hi > c + EPSILON) {
            errors.push(error(
                "door_alignment",
                format!("Door #{} at ({}, {}) is covered by a solid wall", i, d.center[0], d.center[1]),
            ));
            continue;
        }
        let bounded = spans
            .iter()
            .any(|&(lo, hi)| near(hi, c - half) || near(lo, c + half));
        if !bounded {
            errors.push(error(
                "door_alignment",
                format!("Door #{} at ({}, {}) matches no wall gap", i, d.center[0], d.center[1]),
            ));
        }
    }
    errors
}

/// Warn about room edges not closed by walls or door openings.
pub fn check_rooms_enclosed(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let mut warnings = Vec::new();
    for room in &plan.rooms {
        let b = room.bounds();
        let floor = room.floor_index();
        let edges = [
            ("north", true, b.min_z, b.min_x, b.max_x),
            ("south", true, b.max_z, b.min_x, b.max_x),
            ("west", false, b.min_x, b.min_z, b.max_z),
            ("east", false, b.max_x, b.min_z, b.max_z),
        ];
        for (side, along_x, fixed, lo, hi) in edges {
            let mut spans: Vec<(f32, f32)> = plan
                .walls_on_floor(floor)
                .filter_map(|w| span_on_line(w, along_x, fixed))
                .collect();
            spans.extend(
                plan.door_frames
                    .iter()
                    .filter(|d| d.floor_index() == floor && d.along_z != along_x)
                    .filter_map(|d| {
                        let (f, c) = if along_x {
                            (d.center[1], d.center[0])
                        } else {
                            (d.center[0], d.center[1])
                        };
                        near(f, fixed).then(|| (c - d.gap_width / 2.0, c + d.gap_width / 2.0))
                    }),
            );
            if !covers(&mut spans, lo, hi) {
                warnings.push(ValidationError {
                    category: "enclosure",
                    severity: Severity::Warning,
                    message: format!("Room '{}' has an unwalled stretch on its {} edge", room.id, side),
                });
            }
        }
    }
    warnings
}

fn covers(spans: &mut [(f32, f32)], lo: f32, hi: f32) -> bool {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut reach = lo;
    for &(a, b) in spans.iter() {
        if a > reach + EPSILON {
            break;
        }
        reach = reach.max(b);
    }
    reach >= hi - EPSILON
}

// ── C. Waypoint graph ───────────────────────────────────────────────────

/// Every connection names a waypoint in the same plan.
pub fn check_connections_resolve(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let ids: HashSet<&str> = plan.waypoints.iter().map(|w| w.id.as_str()).collect();
    let mut errors = Vec::new();
    for w in &plan.waypoints {
        for c in w.connections.iter().filter(|c| !ids.contains(c.as_str())) {
            errors.push(error(
                "graph",
                format!("Waypoint '{}' connects to unknown '{}'", w.id, c),
            ));
        }
    }
    errors
}

/// If A lists B then B lists A.
pub fn check_connection_symmetry(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let lookup: HashMap<&str, &Vec<String>> = plan
        .waypoints
        .iter()
        .map(|w| (w.id.as_str(), &w.connections))
        .collect();
    let mut errors = Vec::new();
    for w in &plan.waypoints {
        for c in &w.connections {
            if let Some(back) = lookup.get(c.as_str()) {
                if !back.iter().any(|x| x == &w.id) {
                    errors.push(error(
                        "graph",
                        format!("Waypoint '{}' lists '{}' but not vice versa", w.id, c),
                    ));
                }
            }
        }
    }
    errors
}

/// One breadth-first traversal reaches every waypoint on every floor.
pub fn check_connectivity(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let graph = WaypointGraph::new(&plan.waypoints);
    let unreached = graph.unreachable();
    if unreached.is_empty() {
        return Vec::new();
    }
    vec![error(
        "connectivity",
        format!(
            "{} of {} waypoints unreachable (e.g. '{}')",
            unreached.len(),
            graph.node_count(),
            unreached[0]
        ),
    )]
}

/// Stairs have exactly one flagged waypoint on each of their two floors at
/// their (x, z); elevators have one per served floor.
pub fn check_connectors(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let at = |pos: [f32; 3], stairs: bool| -> BTreeSet<i32> {
        plan.waypoints
            .iter()
            .filter(|w| if stairs { w.is_stairs } else { w.is_elevator })
            .filter(|w| near(w.pos[0], pos[0]) && near(w.pos[1], pos[2]))
            .map(|w| w.floor_index())
            .collect()
    };
    let count_at = |pos: [f32; 3], stairs: bool| {
        plan.waypoints
            .iter()
            .filter(|w| if stairs { w.is_stairs } else { w.is_elevator })
            .filter(|w| near(w.pos[0], pos[0]) && near(w.pos[1], pos[2]))
            .count()
    };

    for (i, s) in plan.stairs.iter().enumerate() {
        let expected: BTreeSet<i32> = [s.floors.0, s.floors.1].into_iter().collect();
        if count_at(s.position, true) != 2 || at(s.position, true) != expected {
            errors.push(error(
                "connectors",
                format!(
                    "Stairs #{} needs one waypoint on each of floors {} and {}",
                    i, s.floors.0, s.floors.1
                ),
            ));
        }
    }
    for (i, e) in plan.elevators.iter().enumerate() {
        let expected: BTreeSet<i32> = e.floors.iter().copied().collect();
        if count_at(e.position, false) != e.floors.len() || at(e.position, false) != expected {
            errors.push(error(
                "connectors",
                format!("Elevator #{} needs one waypoint per floor {:?}", i, e.floors),
            ));
        }
    }

    let stairs_flagged = plan.waypoints.iter().filter(|w| w.is_stairs).count();
    let elevator_flagged = plan.waypoints.iter().filter(|w| w.is_elevator).count();
    let elevator_expected: usize = plan.elevators.iter().map(|e| e.floors.len()).sum();
    if stairs_flagged != 2 * plan.stairs.len() {
        errors.push(error(
            "connectors",
            format!(
                "{} stairs waypoints for {} stairs",
                stairs_flagged,
                plan.stairs.len()
            ),
        ));
    }
    if elevator_flagged != elevator_expected {
        errors.push(error(
            "connectors",
            format!(
                "{} elevator waypoints, expected {}",
                elevator_flagged, elevator_expected
            ),
        ));
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run every check and return combined findings.
pub fn validate_plan(plan: &FloorPlanPreset) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(plan));
    all.extend(check_room_overlaps(plan));
    all.extend(check_unique_ids(plan));
    all.extend(check_declared_floors(plan));
    all.extend(check_wall_lengths(plan));
    all.extend(check_door_frames(plan));
    all.extend(check_rooms_enclosed(plan));
    all.extend(check_connections_resolve(plan));
    all.extend(check_connection_symmetry(plan));
    all.extend(check_connectivity(plan));
    all.extend(check_connectors(plan));
    all
}

/// True when `validate_plan` reports no errors (warnings allowed).
pub fn is_structurally_valid(plan: &FloorPlanPreset) -> bool {
    validate_plan(plan)
        .iter()
        .all(|e| e.severity != Severity::Error)
}
