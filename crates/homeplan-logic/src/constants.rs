//! Fixed plan-space constants.
//!
//! All plan coordinates are in plan-space units. Room templates are
//! authored in grid cells of size [`S`]; everything else is derived.

/// Grid cell size in plan-space units.
pub const S: f32 = 2.0;

/// Height of every wall.
pub const WALL_HEIGHT: f32 = 2.8 * S;

/// Thickness of the outer perimeter walls.
pub const OUTER_WALL_THICKNESS: f32 = 0.15 * S;

/// Thickness of interior and hallway walls.
pub const INNER_WALL_THICKNESS: f32 = 0.12 * S;

/// Full width of a doorway opening.
pub const DOOR_GAP: f32 = 1.5 * S;

/// Height of a door frame.
pub const DOOR_HEIGHT: f32 = 2.3 * S;

/// Depth of the central hallway strip in generated plans.
pub const HALLWAY_DEPTH: f32 = 2.0 * S;

/// Vertical distance between two floors.
pub const FLOOR_HEIGHT: f32 = 5.6;

/// Mounting height of ceiling lights.
pub const LIGHT_HEIGHT: f32 = 4.5;

/// Offset of a doorway waypoint from its door line, toward the hallway spine.
pub const DOORWAY_INSET: f32 = 0.5 * S;

/// Inset of window anchors from the outer walls.
pub const WINDOW_INSET: f32 = 0.6 * S;

/// Warm tints cycled across room lights.
pub const LIGHT_COLORS: [&str; 5] = ["#ffe8c0", "#fff5e0", "#e8e0ff", "#f0f5ff", "#ffe0b0"];

/// Tint of the dim hallway light.
pub const HALLWAY_LIGHT_COLOR: &str = "#ffe0b0";

/// Floor color of generated hallways.
pub const HALLWAY_COLOR: &str = "#454443";

/// Fixed id of the generated hallway room.
pub const HALLWAY_ID: &str = "hallway";

/// Tolerance used for geometric comparisons.
pub const EPSILON: f32 = 1e-3;
