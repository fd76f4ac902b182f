//! Hand-authored floor plans.
//!
//! | Id | Floors | Layout |
//! |----|--------|--------|
//! | `studio` | 1 | Main room with kitchenette and bathroom off one wall |
//! | `apartment` | 1 | Four rooms around a short corridor |
//! | `house` | 2 | Two rows off a hallway, stairs to a bedroom floor |
//! | `loft` | 1 | Open living/kitchen with a sleeping nook |
//! | `mansion` | 2 | Seven-room ground floor, gallery floor, stairs and elevator |
//!
//! Coordinates are plan-space units; rooms tile without overlap and every
//! shared edge is either a solid wall or a wall with a registered door.

use crate::builder::PlanBuilder;
use crate::constants::{HALLWAY_COLOR, WINDOW_INSET};
use crate::error::PlanError;
use crate::model::FloorPlanPreset;
use std::f32::consts::FRAC_PI_2;

/// Plan used whenever an id cannot be resolved.
pub const DEFAULT_PLAN_ID: &str = "house";

/// Ids of every built-in plan, in listing order.
pub const BUILTIN_PLAN_IDS: [&str; 5] = ["studio", "apartment", "house", "loft", "mansion"];

const LIGHT: f32 = 0.5;

/// Doorway node on the door line plus a center stop, linked to `hub`.
pub(crate) fn attach(b: &mut PlanBuilder, hub: &str, room: &str, door: [f32; 2], center: [f32; 2]) {
    let door_id = format!("{}-door", room);
    let center_id = format!("{}-center", room);
    b.doorway(&door_id, door)
        .stop(&center_id, center)
        .link(hub, &door_id)
        .link(&door_id, &center_id);
}

pub fn studio() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("studio", "Studio", "Compact single room with kitchenette and bath")
        .with_room_lights(LIGHT);
    b.room("main-room", "Main Room", "#4a4644", [-3.0, 0.0], [18.0, 16.0])
        .room("kitchen", "Kitchenette", "#484848", [10.0, -4.0], [8.0, 8.0])
        .room("bathroom", "Bathroom", "#464848", [10.0, 4.0], [8.0, 8.0])
        .enclose_floor()
        .wall_with_doors([6.0, -8.0], [6.0, 8.0], &[-4.0, 4.0])
        .wall([6.0, 0.0], [14.0, 0.0])
        .hub("main-room-center", [-3.0, 0.0]);
    attach(&mut b, "main-room-center", "kitchen", [6.0, -4.0], [10.0, -4.0]);
    attach(&mut b, "main-room-center", "bathroom", [6.0, 4.0], [10.0, 4.0]);
    b.furnish("main-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .window([-12.0 + WINDOW_INSET, -4.0])
        .window([-12.0 + WINDOW_INSET, 4.0])
        .charging_station([-10.0, 6.0]);
    b.build()
}

pub fn apartment() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("apartment", "Apartment", "Four rooms off a short corridor")
        .with_room_lights(LIGHT);
    b.room("living-room", "Living Room", "#4a4644", [-6.0, -5.0], [12.0, 10.0])
        .room("kitchen", "Kitchen", "#484848", [5.0, -5.0], [10.0, 10.0])
        .room("hallway", "Hallway", HALLWAY_COLOR, [-1.0, 2.0], [22.0, 4.0])
        .room("bedroom", "Bedroom", "#444446", [-6.0, 9.0], [12.0, 10.0])
        .room("bathroom", "Bathroom", "#464848", [5.0, 9.0], [10.0, 10.0])
        .enclose_floor()
        .wall_with_doors([-12.0, 0.0], [10.0, 0.0], &[-6.0, 5.0])
        .wall_with_doors([-12.0, 4.0], [10.0, 4.0], &[-6.0, 5.0])
        .wall([0.0, -10.0], [0.0, 0.0])
        .wall([0.0, 4.0], [0.0, 14.0])
        .hub("hall-west", [-6.0, 2.0])
        .hub("hall-east", [5.0, 2.0])
        .link("hall-west", "hall-east");
    attach(&mut b, "hall-west", "living-room", [-6.0, 0.0], [-6.0, -5.0]);
    attach(&mut b, "hall-west", "bedroom", [-6.0, 4.0], [-6.0, 9.0]);
    attach(&mut b, "hall-east", "kitchen", [5.0, 0.0], [5.0, -5.0]);
    attach(&mut b, "hall-east", "bathroom", [5.0, 4.0], [5.0, 9.0]);
    b.furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .window([-12.0 + WINDOW_INSET, -5.0])
        .window([10.0 - WINDOW_INSET, -5.0])
        .window([-12.0 + WINDOW_INSET, 9.0])
        .window([10.0 - WINDOW_INSET, 9.0])
        .charging_station([-10.0, 2.0]);
    b.build()
}

pub fn house() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("house", "House", "Two-storey family house with stairs")
        .with_room_lights(LIGHT);

    // Ground floor
    b.room("living-room", "Living Room", "#4a4644", [-7.0, -7.0], [14.0, 10.0])
        .room("kitchen", "Kitchen", "#484848", [7.0, -7.0], [14.0, 10.0])
        .room("hallway", "Hallway", HALLWAY_COLOR, [0.0, 0.0], [28.0, 4.0])
        .room("bedroom", "Bedroom", "#444446", [-7.0, 7.0], [14.0, 10.0])
        .room("bathroom", "Bathroom", "#464848", [3.5, 7.0], [7.0, 10.0])
        .room("laundry", "Laundry", "#484646", [10.5, 7.0], [7.0, 10.0])
        .enclose_floor()
        .wall_with_doors([-14.0, -2.0], [14.0, -2.0], &[-7.0, 7.0])
        .wall_with_doors([-14.0, 2.0], [14.0, 2.0], &[-7.0, 3.5, 10.5])
        .wall([0.0, -12.0], [0.0, -2.0])
        .wall([0.0, 2.0], [0.0, 12.0])
        .wall([7.0, 2.0], [7.0, 12.0])
        .hub("hall-west", [-7.0, 0.0])
        .hub("hall-center", [3.5, 0.0])
        .hub("hall-kitchen", [7.0, 0.0])
        .hub("hall-east", [10.5, 0.0])
        .chain(&["hall-west", "hall-center", "hall-kitchen", "hall-east"]);
    attach(&mut b, "hall-west", "living-room", [-7.0, -2.0], [-7.0, -7.0]);
    attach(&mut b, "hall-west", "bedroom", [-7.0, 2.0], [-7.0, 7.0]);
    attach(&mut b, "hall-kitchen", "kitchen", [7.0, -2.0], [7.0, -7.0]);
    attach(&mut b, "hall-center", "bathroom", [3.5, 2.0], [3.5, 7.0]);
    attach(&mut b, "hall-east", "laundry", [10.5, 2.0], [10.5, 7.0]);
    b.furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .furnish("laundry", "laundry", 1.0)
        .window([-14.0 + WINDOW_INSET, -7.0])
        .window([14.0 - WINDOW_INSET, -7.0])
        .window([-14.0 + WINDOW_INSET, 7.0])
        .charging_station([-12.0, 0.0])
        .stairs([12.5, 0.0], FRAC_PI_2, (0, 1));

    // Upper floor
    b.on_floor(1)
        .room("kids-room", "Kids Room", "#444446", [-7.0, -7.0], [14.0, 10.0])
        .room("office", "Office", "#464444", [7.0, -7.0], [14.0, 10.0])
        .room("landing", "Landing", HALLWAY_COLOR, [0.0, 0.0], [28.0, 4.0])
        .room("guest-bath", "Guest Bath", "#464848", [-9.0, 7.0], [10.0, 10.0])
        .room("playroom", "Playroom", "#434547", [5.0, 7.0], [18.0, 10.0])
        .enclose_floor()
        .wall_with_doors([-14.0, -2.0], [14.0, -2.0], &[-7.0, 7.0])
        .wall_with_doors([-14.0, 2.0], [14.0, 2.0], &[-9.0, 5.0])
        .wall([0.0, -12.0], [0.0, -2.0])
        .wall([-4.0, 2.0], [-4.0, 12.0])
        .hub("up-hall-west", [-8.0, 0.0])
        .hub("up-hall-east", [6.0, 0.0])
        .link("up-hall-west", "up-hall-east");
    attach(&mut b, "up-hall-west", "kids-room", [-7.0, -2.0], [-7.0, -7.0]);
    attach(&mut b, "up-hall-west", "guest-bath", [-9.0, 2.0], [-9.0, 7.0]);
    attach(&mut b, "up-hall-east", "office", [7.0, -2.0], [7.0, -7.0]);
    attach(&mut b, "up-hall-east", "playroom", [5.0, 2.0], [5.0, 7.0]);
    b.furnish("kids-room", "bedroom", -1.0)
        .furnish("office", "study", -1.0)
        .furnish("guest-bath", "bathroom", 1.0)
        .window([-14.0 + WINDOW_INSET, -7.0])
        .window([14.0 - WINDOW_INSET, 7.0]);
    b.build()
}

pub fn loft() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("loft", "Loft", "Open living and kitchen with a sleeping nook")
        .with_room_lights(LIGHT);
    b.room("living-room", "Living Area", "#4a4644", [-8.0, 0.0], [16.0, 16.0])
        .room("kitchen", "Kitchen Island", "#484848", [6.0, 0.0], [12.0, 16.0])
        .room("bedroom", "Sleeping Nook", "#444446", [17.0, -3.0], [10.0, 10.0])
        .room("bathroom", "Bathroom", "#464848", [17.0, 5.0], [10.0, 6.0])
        .enclose_floor()
        .wall_with_doors([0.0, -8.0], [0.0, 8.0], &[-4.0, 4.0])
        .wall_with_doors([12.0, -8.0], [12.0, 8.0], &[-3.0, 5.0])
        .wall([12.0, 2.0], [22.0, 2.0])
        .stop("living-room-center", [-8.0, 0.0])
        .hub("kitchen-island", [6.0, 0.0])
        .doorway("loft-door-north", [0.0, -4.0])
        .doorway("loft-door-south", [0.0, 4.0])
        .chain(&["living-room-center", "loft-door-north", "kitchen-island"])
        .chain(&["living-room-center", "loft-door-south", "kitchen-island"]);
    attach(&mut b, "kitchen-island", "bedroom", [12.0, -3.0], [17.0, -3.0]);
    attach(&mut b, "kitchen-island", "bathroom", [12.0, 5.0], [17.0, 5.0]);
    b.furnish("living-room", "living-room", 1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", -1.0)
        .window([-16.0 + WINDOW_INSET, -4.0])
        .window([-16.0 + WINDOW_INSET, 4.0])
        .window([22.0 - WINDOW_INSET, -3.0])
        .charging_station([-14.0, 6.0]);
    b.build()
}

pub fn mansion() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("mansion", "Mansion", "Grand two-floor home with stairs and elevator")
        .with_room_lights(LIGHT);

    // Ground floor
    b.room("living-room", "Living Room", "#4a4644", [-16.0, -8.0], [16.0, 12.0])
        .room("dining", "Dining Room", "#4a4843", [-1.0, -8.0], [14.0, 12.0])
        .room("kitchen", "Kitchen", "#484848", [15.0, -8.0], [18.0, 12.0])
        .room("hallway", "Grand Hall", HALLWAY_COLOR, [0.0, 0.0], [48.0, 4.0])
        .room("gym", "Home Gym", "#434547", [-17.0, 8.0], [14.0, 12.0])
        .room("study", "Study", "#464444", [-3.0, 8.0], [14.0, 12.0])
        .room("bathroom", "Bathroom", "#464848", [9.0, 8.0], [10.0, 12.0])
        .room("laundry", "Laundry", "#484646", [19.0, 8.0], [10.0, 12.0])
        .enclose_floor()
        .wall_with_doors([-24.0, -2.0], [24.0, -2.0], &[-16.0, -1.0, 15.0])
        .wall_with_doors([-24.0, 2.0], [24.0, 2.0], &[-17.0, -3.0, 9.0, 19.0])
        .wall([-8.0, -14.0], [-8.0, -2.0])
        .wall([6.0, -14.0], [6.0, -2.0])
        .wall([-10.0, 2.0], [-10.0, 14.0])
        .wall([4.0, 2.0], [4.0, 14.0])
        .wall([14.0, 2.0], [14.0, 14.0])
        .hub("hall-west", [-16.5, 0.0])
        .hub("hall-center", [-2.0, 0.0])
        .hub("hall-east", [12.0, 0.0])
        .hub("hall-far-east", [19.0, 0.0])
        .chain(&["hall-west", "hall-center", "hall-east", "hall-far-east"]);
    attach(&mut b, "hall-west", "living-room", [-16.0, -2.0], [-16.0, -8.0]);
    attach(&mut b, "hall-west", "gym", [-17.0, 2.0], [-17.0, 8.0]);
    attach(&mut b, "hall-center", "dining", [-1.0, -2.0], [-1.0, -8.0]);
    attach(&mut b, "hall-center", "study", [-3.0, 2.0], [-3.0, 8.0]);
    attach(&mut b, "hall-east", "kitchen", [15.0, -2.0], [15.0, -8.0]);
    attach(&mut b, "hall-east", "bathroom", [9.0, 2.0], [9.0, 8.0]);
    attach(&mut b, "hall-far-east", "laundry", [19.0, 2.0], [19.0, 8.0]);
    b.furnish("living-room", "living-room", -1.0)
        .furnish("dining", "dining", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("study", "study", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .furnish("laundry", "laundry", 1.0)
        .window([-24.0 + WINDOW_INSET, -8.0])
        .window([24.0 - WINDOW_INSET, -8.0])
        .window([-24.0 + WINDOW_INSET, 8.0])
        .window([24.0 - WINDOW_INSET, 8.0])
        .charging_station([-20.0, 0.0])
        .elevator([-22.0, 0.0], &[0, 1])
        .stairs([22.0, 0.0], -FRAC_PI_2, (0, 1));

    // Gallery floor
    b.on_floor(1)
        .room("master-bedroom", "Master Bedroom", "#444446", [-12.0, -8.0], [24.0, 12.0])
        .room("master-bath", "Master Bath", "#464848", [5.0, -8.0], [10.0, 12.0])
        .room("library", "Library", "#464444", [17.0, -8.0], [14.0, 12.0])
        .room("gallery", "Gallery", HALLWAY_COLOR, [0.0, 0.0], [48.0, 4.0])
        .room("guest-room", "Guest Room", "#444446", [-15.0, 8.0], [18.0, 12.0])
        .room("guest-bath", "Guest Bath", "#464848", [-1.0, 8.0], [10.0, 12.0])
        .room("theater", "Home Theater", "#4a4644", [14.0, 8.0], [20.0, 12.0])
        .enclose_floor()
        .wall_with_doors([-24.0, -2.0], [24.0, -2.0], &[-12.0, 5.0, 17.0])
        .wall_with_doors([-24.0, 2.0], [24.0, 2.0], &[-15.0, -1.0, 14.0])
        .wall([0.0, -14.0], [0.0, -2.0])
        .wall([10.0, -14.0], [10.0, -2.0])
        .wall([-6.0, 2.0], [-6.0, 14.0])
        .wall([4.0, 2.0], [4.0, 14.0])
        .hub("gallery-west", [-13.5, 0.0])
        .hub("gallery-center", [2.0, 0.0])
        .hub("gallery-east", [15.5, 0.0])
        .chain(&["gallery-west", "gallery-center", "gallery-east"]);
    attach(&mut b, "gallery-west", "master-bedroom", [-12.0, -2.0], [-12.0, -8.0]);
    attach(&mut b, "gallery-west", "guest-room", [-15.0, 2.0], [-15.0, 8.0]);
    attach(&mut b, "gallery-center", "master-bath", [5.0, -2.0], [5.0, -8.0]);
    attach(&mut b, "gallery-center", "guest-bath", [-1.0, 2.0], [-1.0, 8.0]);
    attach(&mut b, "gallery-east", "library", [17.0, -2.0], [17.0, -8.0]);
    attach(&mut b, "gallery-east", "theater", [14.0, 2.0], [14.0, 8.0]);
    b.furnish("master-bedroom", "bedroom", -1.0)
        .furnish("master-bath", "bathroom", -1.0)
        .furnish("library", "study", -1.0)
        .furnish("guest-room", "bedroom", 1.0)
        .furnish("guest-bath", "bathroom", 1.0)
        .furnish("theater", "living-room", 1.0)
        .window([-24.0 + WINDOW_INSET, -8.0])
        .window([24.0 - WINDOW_INSET, 8.0]);
    b.build()
}

/// Every built-in plan, in [`BUILTIN_PLAN_IDS`] order.
pub fn builtin_presets() -> Result<Vec<FloorPlanPreset>, PlanError> {
    Ok(vec![studio()?, apartment()?, house()?, loft()?, mansion()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_plan, Severity};

    #[test]
    fn test_builtin_ids_match_listing() {
        let presets = builtin_presets().unwrap();
        let ids: Vec<&str> = presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, BUILTIN_PLAN_IDS.to_vec());
        assert!(ids.contains(&DEFAULT_PLAN_ID));
    }

    #[test]
    fn test_every_preset_validates_clean() {
        for plan in builtin_presets().unwrap() {
            let errors: Vec<_> = validate_plan(&plan)
                .into_iter()
                .filter(|e| e.severity == Severity::Error)
                .collect();
            assert!(errors.is_empty(), "{}: {:?}", plan.id, errors);
        }
    }

    #[test]
    fn test_house_has_two_floors_and_stairs() {
        let plan = house().unwrap();
        assert_eq!(plan.floors, vec![0, 1]);
        assert_eq!(plan.stairs.len(), 1);
        assert_eq!(plan.stairs[0].floors, (0, 1));
        assert_eq!(plan.waypoints.iter().filter(|w| w.is_stairs).count(), 2);
        assert!(plan.rooms.iter().any(|r| r.floor == Some(1)));
    }

    #[test]
    fn test_mansion_has_elevator_and_stairs() {
        let plan = mansion().unwrap();
        assert_eq!(plan.elevators.len(), 1);
        assert_eq!(plan.stairs.len(), 1);
        assert_eq!(plan.waypoints.iter().filter(|w| w.is_elevator).count(), 2);
    }

    #[test]
    fn test_single_floor_presets_declare_no_floors() {
        for plan in [studio().unwrap(), apartment().unwrap(), loft().unwrap()] {
            assert!(plan.floors.is_empty(), "{}", plan.id);
            assert!(plan.stairs.is_empty() && plan.elevators.is_empty());
        }
    }
}
