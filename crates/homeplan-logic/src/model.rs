//! Floor-plan data contract.
//!
//! These records are what the renderer, the navigation executor and the
//! persistence layer consume. A [`FloorPlanPreset`] is built once (by hand,
//! by the generator or by import) and never patched afterwards; switching
//! plans replaces the whole value.
//!
//! Plan space is x (east) by z (south). 2D positions are `[x, z]`, 3D
//! anchors are `[x, y, z]` with y up. A missing floor index means floor 0.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

fn is_false(b: &bool) -> bool {
    !*b
}

/// A rectangular room footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Footprint center `[x, z]`.
    pub center: [f32; 2],
    /// Footprint `[width, depth]`.
    pub size: [f32; 2],
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

impl Room {
    pub fn floor_index(&self) -> i32 {
        self.floor.unwrap_or(0)
    }

    /// Axis-aligned footprint rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.size)
    }
}

/// A straight wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub height: f32,
    pub thickness: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

impl Wall {
    pub fn floor_index(&self) -> i32 {
        self.floor.unwrap_or(0)
    }

    pub fn length(&self) -> f32 {
        let dx = self.end[0] - self.start[0];
        let dz = self.end[1] - self.start[1];
        (dx * dx + dz * dz).sqrt()
    }
}

/// A doorway frame standing in a wall gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorFrame {
    /// Center of the opening `[x, z]`.
    pub center: [f32; 2],
    /// True when the wall (and so the gap) runs along z.
    pub along_z: bool,
    pub gap_width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

impl DoorFrame {
    pub fn floor_index(&self) -> i32 {
        self.floor.unwrap_or(0)
    }
}

/// A navigable node in the movement graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub id: String,
    /// Position `[x, z]`.
    pub pos: [f32; 2],
    /// Neighbor ids, symmetric across the whole graph.
    pub connections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    /// Agents pause briefly when crossing this node.
    #[serde(default, skip_serializing_if = "is_false")]
    pub pause_at_doorway: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_stairs: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_elevator: bool,
}

impl Waypoint {
    pub fn floor_index(&self) -> i32 {
        self.floor.unwrap_or(0)
    }
}

/// A staircase joining exactly two floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StairsDef {
    /// Anchor `[x, y, z]` at the foot of the stairs.
    pub position: [f32; 3],
    /// Rotation about y in radians.
    pub rotation: f32,
    /// Lower and upper floor.
    pub floors: (i32, i32),
}

/// An elevator shaft serving any number of floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorDef {
    pub position: [f32; 3],
    pub floors: Vec<i32>,
}

/// A ceiling patch over a room or hallway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ceiling {
    pub position: [f32; 3],
    /// `[width, depth]`.
    pub size: [f32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

/// A point light fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: String,
    pub distance: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

/// Where a piece of furniture stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureAnchor {
    pub id: String,
    pub name: String,
    pub room_id: String,
    pub position: [f32; 3],
    pub rotation: f32,
    /// Radius the navigation executor should keep clear.
    pub obstacle_radius: f32,
    pub model: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub movable: bool,
}

/// A complete dwelling: rooms, walls, doors and the waypoint graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rooms: Vec<Room>,
    pub walls: Vec<Wall>,
    pub furniture: Vec<FurnitureAnchor>,
    pub waypoints: Vec<Waypoint>,
    pub charging_station: [f32; 3],
    pub windows: Vec<[f32; 3]>,
    pub ceilings: Vec<Ceiling>,
    pub door_frames: Vec<DoorFrame>,
    pub lights: Vec<Light>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floors: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stairs: Vec<StairsDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elevators: Vec<ElevatorDef>,
}

fn all_finite(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite())
}

impl FloorPlanPreset {
    /// First element carrying a NaN or infinite coordinate or measure.
    /// JSON has no spelling for those values.
    pub fn first_non_finite(&self) -> Option<String> {
        if let Some(r) = self.rooms.iter().find(|r| !all_finite(&r.center) || !all_finite(&r.size)) {
            return Some(format!("room '{}'", r.id));
        }
        if let Some(w) = self.waypoints.iter().find(|w| !all_finite(&w.pos)) {
            return Some(format!("waypoint '{}'", w.id));
        }
        if let Some(f) = self
            .furniture
            .iter()
            .find(|f| !all_finite(&f.position) || !all_finite(&[f.rotation, f.obstacle_radius]))
        {
            return Some(format!("furniture '{}'", f.id));
        }
        let indexed = [
            ("wall", self.walls.iter().position(|w| {
                !all_finite(&w.start) || !all_finite(&w.end) || !all_finite(&[w.height, w.thickness])
            })),
            ("door frame", self.door_frames.iter().position(|d| {
                !all_finite(&d.center) || !all_finite(&[d.gap_width, d.height])
            })),
            ("ceiling", self.ceilings.iter().position(|c| {
                !all_finite(&c.position) || !all_finite(&c.size)
            })),
            ("light", self.lights.iter().position(|l| {
                !all_finite(&l.position) || !all_finite(&[l.intensity, l.distance])
            })),
            ("window", self.windows.iter().position(|w| !all_finite(w))),
            ("stairs", self.stairs.iter().position(|s| {
                !all_finite(&s.position) || !s.rotation.is_finite()
            })),
            ("elevator", self.elevators.iter().position(|e| !all_finite(&e.position))),
        ];
        if let Some((kind, i)) = indexed.iter().find_map(|&(kind, i)| i.map(|i| (kind, i))) {
            return Some(format!("{} #{}", kind, i));
        }
        (!all_finite(&self.charging_station)).then(|| "charging station".to_string())
    }

    /// Floors the plan declares, or `[0]` for a single-floor plan.
    pub fn declared_floors(&self) -> Vec<i32> {
        if self.floors.is_empty() {
            vec![0]
        } else {
            self.floors.clone()
        }
    }

    pub fn is_multi_floor(&self) -> bool {
        self.floors.len() > 1
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn waypoint(&self, id: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    pub fn rooms_on_floor(&self, floor: i32) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.floor_index() == floor)
    }

    pub fn walls_on_floor(&self, floor: i32) -> impl Iterator<Item = &Wall> {
        self.walls.iter().filter(move |w| w.floor_index() == floor)
    }
}
