//! Deterministic furniture anchors per room template.
//!
//! Positions are derived from the room footprint only, so the same room
//! always gets the same layout. `far` is the sign of the z direction that
//! points away from the room's door (−1 when the door is on the south
//! wall); wall-hugging pieces such as the kitchen line go on that side.

use crate::model::{FurnitureAnchor, Room};
use std::f32::consts::{FRAC_PI_2, PI};

struct Piece {
    key: &'static str,
    name: &'static str,
    model: &'static str,
    /// Offset as fractions of the half-extents: `(x, z_far)`.
    at: (f32, f32),
    rotation: f32,
    radius: f32,
}

const fn piece(
    key: &'static str,
    name: &'static str,
    model: &'static str,
    at: (f32, f32),
    rotation: f32,
    radius: f32,
) -> Piece {
    Piece {
        key,
        name,
        model,
        at,
        rotation,
        radius,
    }
}

const LIVING: &[Piece] = &[
    piece("sofa", "Sofa", "sofa-long", (-0.6, 0.0), FRAC_PI_2, 2.5),
    piece("coffee-table", "Coffee Table", "coffee-table", (-0.2, 0.0), 0.0, 1.5),
    piece("tv-stand", "TV Stand", "tv-stand", (0.0, 0.8), 0.0, 2.0),
];

const KITCHEN: &[Piece] = &[
    piece("fridge", "Fridge", "fridge", (-0.5, 0.8), PI, 1.5),
    piece("stove", "Stove", "stove-electric", (0.0, 0.8), 0.0, 1.5),
    piece("kitchen-sink", "Kitchen Sink", "kitchen-sink", (0.5, 0.8), 0.0, 1.5),
];

const BEDROOM: &[Piece] = &[
    piece("bed", "Bed", "bed", (0.0, -0.4), PI, 3.0),
    piece("nightstand", "Nightstand", "nightstand", (-0.6, -0.4), 0.0, 1.0),
    piece("desk", "Desk & Chair", "desk", (0.5, 0.5), FRAC_PI_2, 1.5),
];

const BATHROOM: &[Piece] = &[
    piece("bathroom-sink", "Bathroom Sink", "bathroom-sink", (-0.4, 0.6), PI, 1.0),
    piece("shower", "Shower", "shower-round", (0.4, -0.4), 0.0, 2.0),
    piece("toilet", "Toilet", "toilet", (-0.4, -0.3), FRAC_PI_2, 1.0),
];

const LAUNDRY: &[Piece] = &[piece(
    "laundry-station",
    "Washer & Dryer",
    "washer-dryer",
    (0.0, 0.0),
    PI,
    2.0,
)];

const STUDY: &[Piece] = &[piece("desk", "Desk & Chair", "desk", (0.0, 0.0), FRAC_PI_2, 1.5)];

const DINING: &[Piece] = &[piece("dining-table", "Dining Table", "coffee-table", (0.0, 0.0), 0.0, 2.0)];

fn pieces_for(template_id: &str) -> &'static [Piece] {
    match template_id {
        "living-room" => LIVING,
        "kitchen" => KITCHEN,
        "bedroom" => BEDROOM,
        "bathroom" => BATHROOM,
        "laundry" => LAUNDRY,
        "study" => STUDY,
        "dining" => DINING,
        _ => &[],
    }
}

/// Furniture anchors for `room` furnished as `template_id`.
///
/// Anchor ids are `{room_id}-{piece}`, unique within a plan as long as
/// room ids are. Unknown templates get no furniture.
pub fn anchors_for(template_id: &str, room: &Room, far: f32) -> Vec<FurnitureAnchor> {
    let [cx, cz] = room.center;
    let hw = room.size[0] / 2.0;
    let hd = room.size[1] / 2.0;
    let far = if far < 0.0 { -1.0 } else { 1.0 };
    pieces_for(template_id)
        .iter()
        .map(|p| FurnitureAnchor {
            id: format!("{}-{}", room.id, p.key),
            name: p.name.into(),
            room_id: room.id.clone(),
            position: [cx + hw * p.at.0, 0.0, cz + far * hd * p.at.1],
            rotation: p.rotation,
            obstacle_radius: p.radius,
            model: p.model.into(),
            movable: true,
        })
        .collect()
}
