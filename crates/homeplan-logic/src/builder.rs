//! Authoring tool for floor plans.
//!
//! `PlanBuilder` collects rooms, walls, doors and waypoints floor by floor
//! and assembles an immutable [`FloorPlanPreset`]. Methods chain; the first
//! geometry error is remembered and returned from [`PlanBuilder::build`],
//! so an invalid plan is never emitted.
//!
//! Vertical placement (ceilings, lights, windows, furniture, connectors) is
//! derived from the current floor: `y = floor · FLOOR_HEIGHT + offset`.

use crate::constants::{
    DOOR_GAP, DOOR_HEIGHT, FLOOR_HEIGHT, INNER_WALL_THICKNESS, LIGHT_COLORS, LIGHT_HEIGHT,
    OUTER_WALL_THICKNESS, WALL_HEIGHT,
};
use crate::error::PlanError;
use crate::furniture;
use crate::geometry::{self, Axis, Rect};
use crate::model::{
    Ceiling, DoorFrame, ElevatorDef, FloorPlanPreset, FurnitureAnchor, Light, Room, StairsDef,
    Wall,
};
use crate::waypoints::{NodeKind, WaypointGraphBuilder};
use std::collections::HashSet;

/// Incremental floor-plan assembler.
pub struct PlanBuilder {
    id: String,
    name: String,
    description: String,
    floor: i32,
    floors: Vec<i32>,
    auto_light: Option<f32>,
    rooms: Vec<Room>,
    room_ids: HashSet<String>,
    walls: Vec<Wall>,
    door_frames: Vec<DoorFrame>,
    ceilings: Vec<Ceiling>,
    lights: Vec<Light>,
    windows: Vec<[f32; 3]>,
    furniture: Vec<FurnitureAnchor>,
    charging_station: [f32; 3],
    stairs: Vec<StairsDef>,
    elevators: Vec<ElevatorDef>,
    graph: WaypointGraphBuilder,
    error: Option<PlanError>,
}

impl PlanBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            floor: 0,
            floors: vec![0],
            auto_light: None,
            rooms: Vec::new(),
            room_ids: HashSet::new(),
            walls: Vec::new(),
            door_frames: Vec::new(),
            ceilings: Vec::new(),
            lights: Vec::new(),
            windows: Vec::new(),
            furniture: Vec::new(),
            charging_station: [0.0, 0.0, 0.0],
            stairs: Vec::new(),
            elevators: Vec::new(),
            graph: WaypointGraphBuilder::new(),
            error: None,
        }
    }

    /// Give every subsequently added room a ceiling light of this intensity.
    pub fn with_room_lights(mut self, intensity: f32) -> Self {
        self.auto_light = Some(intensity);
        self
    }

    /// Switch the floor that subsequent elements are placed on.
    pub fn on_floor(&mut self, floor: i32) -> &mut Self {
        self.floor = floor;
        if !self.floors.contains(&floor) {
            self.floors.push(floor);
        }
        self
    }

    fn base_y(&self) -> f32 {
        self.floor as f32 * FLOOR_HEIGHT
    }

    fn fail(&mut self, err: PlanError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    // ── Rooms ───────────────────────────────────────────────────────────

    /// Add a room and its ceiling patch.
    pub fn room(&mut self, id: &str, name: &str, color: &str, center: [f32; 2], size: [f32; 2]) -> &mut Self {
        if !self.room_ids.insert(id.to_string()) {
            self.fail(PlanError::DuplicateId {
                kind: "room",
                id: id.into(),
            });
            return self;
        }
        self.rooms.push(Room {
            id: id.into(),
            name: name.into(),
            center,
            size,
            color: color.into(),
            floor: Some(self.floor),
        });
        self.ceilings.push(Ceiling {
            position: [center[0], self.base_y() + WALL_HEIGHT, center[1]],
            size,
            floor: Some(self.floor),
        });
        if let Some(intensity) = self.auto_light {
            let color = LIGHT_COLORS[self.lights.len() % LIGHT_COLORS.len()];
            self.light(center, intensity, color, size[0].max(size[1]) + 4.0);
        }
        self
    }

    /// Add a point light at ceiling-light height.
    pub fn light(&mut self, at: [f32; 2], intensity: f32, color: &str, distance: f32) -> &mut Self {
        self.lights.push(Light {
            position: [at[0], self.base_y() + LIGHT_HEIGHT, at[1]],
            intensity,
            color: color.into(),
            distance,
            floor: Some(self.floor),
        });
        self
    }

    /// Footprint of an already-added room.
    pub fn room_bounds(&self, id: &str) -> Option<Rect> {
        self.rooms.iter().find(|r| r.id == id).map(Room::bounds)
    }

    /// Bounding box of every room on the current floor.
    pub fn floor_bounds(&self) -> Option<Rect> {
        let floor = self.floor;
        geometry::bounding_box(
            self.rooms
                .iter()
                .filter(|r| r.floor == Some(floor))
                .map(Room::bounds),
        )
    }

    // ── Walls & doors ───────────────────────────────────────────────────

    fn push_walls(&mut self, walls: Vec<Wall>) {
        let floor = self.floor;
        self.walls
            .extend(walls.into_iter().map(|w| Wall { floor: Some(floor), ..w }));
    }

    /// Four outer walls around `rect`.
    pub fn outer_walls(&mut self, rect: Rect) -> &mut Self {
        let walls = geometry::perimeter_walls(&rect, WALL_HEIGHT, OUTER_WALL_THICKNESS);
        self.push_walls(walls);
        self
    }

    /// Outer walls around everything on the current floor.
    pub fn enclose_floor(&mut self) -> &mut Self {
        match self.floor_bounds() {
            Some(rect) => self.outer_walls(rect),
            None => {
                let floor = self.floor;
                self.fail(PlanError::geometry(format!("floor {} has no rooms to enclose", floor)));
                self
            }
        }
    }

    /// Solid interior wall.
    pub fn wall(&mut self, start: [f32; 2], end: [f32; 2]) -> &mut Self {
        self.wall_with_doors(start, end, &[])
    }

    /// Interior wall pierced by doorways centered at `doors` along the
    /// line's varying axis. Registers one door frame per opening.
    pub fn wall_with_doors(&mut self, start: [f32; 2], end: [f32; 2], doors: &[f32]) -> &mut Self {
        let built = geometry::line_axis(start, end).and_then(|axis| {
            geometry::wall_with_gaps(start, end, doors, DOOR_GAP, WALL_HEIGHT, INNER_WALL_THICKNESS)
                .map(|walls| (axis, walls))
        });
        match built {
            Ok((axis, walls)) => {
                self.push_walls(walls);
                for &c in doors {
                    let center = match axis {
                        Axis::X => [c, start[1]],
                        Axis::Z => [start[0], c],
                    };
                    self.door_frames.push(DoorFrame {
                        center,
                        along_z: axis == Axis::Z,
                        gap_width: DOOR_GAP,
                        height: DOOR_HEIGHT,
                        floor: Some(self.floor),
                    });
                }
            }
            Err(e) => self.fail(e),
        }
        self
    }

    // ── Waypoints ───────────────────────────────────────────────────────

    /// Room-center (or other plain) waypoint.
    pub fn stop(&mut self, id: &str, pos: [f32; 2]) -> &mut Self {
        self.graph.node(id, pos, self.floor, NodeKind::Room);
        self
    }

    /// Hallway hub waypoint. Stairs and elevators attach to these.
    pub fn hub(&mut self, id: &str, pos: [f32; 2]) -> &mut Self {
        self.graph.node(id, pos, self.floor, NodeKind::Hallway);
        self
    }

    /// Doorway waypoint; agents pause when crossing it.
    pub fn doorway(&mut self, id: &str, pos: [f32; 2]) -> &mut Self {
        self.graph.node(id, pos, self.floor, NodeKind::Doorway);
        self
    }

    pub fn link(&mut self, a: &str, b: &str) -> &mut Self {
        self.graph.link(a, b);
        self
    }

    /// Link consecutive ids.
    pub fn chain(&mut self, ids: &[&str]) -> &mut Self {
        self.graph.chain(ids);
        self
    }

    // ── Connectors ──────────────────────────────────────────────────────

    /// Stairs at `(x, z)` rising from `floors.0` to `floors.1`.
    pub fn stairs(&mut self, at: [f32; 2], rotation: f32, floors: (i32, i32)) -> &mut Self {
        let def = StairsDef {
            position: [at[0], floors.0 as f32 * FLOOR_HEIGHT, at[1]],
            rotation,
            floors,
        };
        self.graph.stairs(&def);
        self.stairs.push(def);
        self
    }

    /// Elevator at `(x, z)` serving `floors`.
    pub fn elevator(&mut self, at: [f32; 2], floors: &[i32]) -> &mut Self {
        let lowest = floors.iter().copied().min().unwrap_or(0);
        let def = ElevatorDef {
            position: [at[0], lowest as f32 * FLOOR_HEIGHT, at[1]],
            floors: floors.to_vec(),
        };
        self.graph.elevator(&def);
        self.elevators.push(def);
        self
    }

    // ── Fixtures ────────────────────────────────────────────────────────

    pub fn window(&mut self, at: [f32; 2]) -> &mut Self {
        let y = self.base_y();
        self.windows.push([at[0], y, at[1]]);
        self
    }

    /// Furnish an existing room as `template_id`. `far` is the z sign of
    /// the wall opposite the room's door.
    pub fn furnish(&mut self, room_id: &str, template_id: &str, far: f32) -> &mut Self {
        let Some(room) = self.rooms.iter().find(|r| r.id == room_id) else {
            self.fail(PlanError::geometry(format!("cannot furnish unknown room '{}'", room_id)));
            return self;
        };
        let y = self.base_y();
        let anchors = furniture::anchors_for(template_id, room, far);
        self.furniture.extend(anchors.into_iter().map(|mut a| {
            a.position[1] += y;
            a
        }));
        self
    }

    pub fn charging_station(&mut self, at: [f32; 2]) -> &mut Self {
        self.charging_station = [at[0], self.base_y(), at[1]];
        self
    }

    // ── Assembly ────────────────────────────────────────────────────────

    /// Resolve the waypoint graph and emit the finished plan. Floor tags are
    /// kept only when more than one floor was used.
    pub fn build(self) -> Result<FloorPlanPreset, PlanError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let waypoints = self.graph.build()?;

        let mut floors = self.floors;
        floors.sort_unstable();
        let multi = floors.len() > 1;
        let tag = |f: Option<i32>| if multi { f } else { None };

        Ok(FloorPlanPreset {
            id: self.id,
            name: self.name,
            description: self.description,
            rooms: self
                .rooms
                .into_iter()
                .map(|r| Room { floor: tag(r.floor), ..r })
                .collect(),
            walls: self
                .walls
                .into_iter()
                .map(|w| Wall { floor: tag(w.floor), ..w })
                .collect(),
            furniture: self.furniture,
            waypoints,
            charging_station: self.charging_station,
            windows: self.windows,
            ceilings: self
                .ceilings
                .into_iter()
                .map(|c| Ceiling { floor: tag(c.floor), ..c })
                .collect(),
            door_frames: self
                .door_frames
                .into_iter()
                .map(|d| DoorFrame { floor: tag(d.floor), ..d })
                .collect(),
            lights: self
                .lights
                .into_iter()
                .map(|l| Light { floor: tag(l.floor), ..l })
                .collect(),
            floors: if multi { floors } else { Vec::new() },
            stairs: self.stairs,
            elevators: self.elevators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoints::WaypointGraph;

    fn two_room_builder() -> PlanBuilder {
        let mut b = PlanBuilder::new("t", "Test", "two rooms").with_room_lights(0.5);
        b.room("west", "West", "#111111", [-5.0, 0.0], [10.0, 10.0])
            .room("east", "East", "#222222", [5.0, 0.0], [10.0, 10.0])
            .enclose_floor()
            .wall_with_doors([0.0, -5.0], [0.0, 5.0], &[0.0])
            .stop("west-center", [-5.0, 0.0])
            .doorway("door", [0.0, 0.0])
            .stop("east-center", [5.0, 0.0])
            .chain(&["west-center", "door", "east-center"]);
        b
    }

    #[test]
    fn test_single_floor_plan_has_no_floor_tags() {
        let plan = two_room_builder().build().unwrap();
        assert!(plan.floors.is_empty());
        assert!(plan.rooms.iter().all(|r| r.floor.is_none()));
        assert!(plan.walls.iter().all(|w| w.floor.is_none()));
        assert_eq!(plan.ceilings.len(), 2);
        assert_eq!(plan.lights.len(), 2);
        assert_ne!(plan.lights[0].color, plan.lights[1].color);
    }

    #[test]
    fn test_door_frame_registered_for_gap() {
        let plan = two_room_builder().build().unwrap();
        assert_eq!(plan.door_frames.len(), 1);
        let d = &plan.door_frames[0];
        assert_eq!(d.center, [0.0, 0.0]);
        assert!(d.along_z);
        // 4 perimeter + 2 wall pieces either side of the door
        assert_eq!(plan.walls.len(), 6);
    }

    #[test]
    fn test_duplicate_room_fails_build() {
        let mut b = two_room_builder();
        b.room("west", "West again", "#000000", [0.0, 20.0], [4.0, 4.0]);
        assert!(matches!(b.build(), Err(PlanError::DuplicateId { kind: "room", .. })));
    }

    #[test]
    fn test_bad_door_fails_build() {
        let mut b = two_room_builder();
        b.wall_with_doors([-10.0, 5.0], [10.0, 5.0], &[9.5]);
        assert!(matches!(b.build(), Err(PlanError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_two_floors_with_stairs() {
        let mut b = two_room_builder();
        b.hub("hall-0", [0.0, 2.0])
            .link("hall-0", "door")
            .on_floor(1)
            .room("loft", "Loft", "#333333", [0.0, 0.0], [20.0, 10.0])
            .enclose_floor()
            .hub("hall-1", [0.0, 2.0])
            .stairs([2.0, 2.0], 0.0, (0, 1))
            .furnish("loft", "study", 1.0);
        let plan = b.build().unwrap();
        assert_eq!(plan.floors, vec![0, 1]);
        assert_eq!(plan.room("loft").unwrap().floor, Some(1));
        assert_eq!(plan.room("west").unwrap().floor, Some(0));
        assert!((plan.furniture[0].position[1] - FLOOR_HEIGHT).abs() < 1e-6);
        assert_eq!(plan.stairs.len(), 1);
        assert_eq!(plan.waypoints.iter().filter(|w| w.is_stairs).count(), 2);
        assert!(WaypointGraph::new(&plan.waypoints).is_connected());
    }
}
