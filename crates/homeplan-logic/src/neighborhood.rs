//! Seeded neighbor houses for the street around the player's home.
//!
//! `generate_neighborhood(seed)` always yields the same four houses for the
//! same seed. Every value is drawn from [`SeededRng`] in a fixed order:
//!
//! 1. family name (redrawn until unused on this street)
//! 2. resident count (1 or 2)
//! 3. style: wall, roof, door, trim, stories, width, garage, chimney, porch, fence
//! 4. layout (small / medium / large); the small layout also draws three room colors
//! 5. per resident: name (redrawn until unused in this house), personality, color
//!
//! Reordering any draw changes every house after it.

use crate::builder::PlanBuilder;
use crate::constants::{HALLWAY_COLOR, HALLWAY_LIGHT_COLOR, WINDOW_INSET};
use crate::error::PlanError;
use crate::model::FloorPlanPreset;
use crate::presets::attach;
use crate::rng::SeededRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of houses on a street.
pub const HOUSE_COUNT: usize = 4;

/// Street slot of each house, relative to the player's house at 0.
pub const STREET_SLOTS: [i32; HOUSE_COUNT] = [-1, 1, 2, -2];

const FAMILY_NAMES: [&str; 12] = [
    "The Johnsons",
    "The Garcias",
    "The Chens",
    "The Patels",
    "The Williamses",
    "The Kims",
    "The Andersons",
    "The Nguyens",
    "The Martinezes",
    "The Robinsons",
    "The Tanakas",
    "The Muellers",
];

const RESIDENT_NAMES: [&str; 12] = [
    "Bolt", "Gizmo", "Pixel", "Servo", "Widget", "Cog", "Ratchet", "Sprocket", "Diode", "Circuit",
    "Chip", "Nano",
];

// ── Palettes ───────────────────────────────────────────────────────────────

const WALL_COLORS: [&str; 8] = [
    "#e8dcc8", "#c4b8a0", "#d4c5a9", "#b8c4c8", "#c8b8b0", "#d0c8b8", "#a8b4a0", "#c0b0a0",
];
const ROOF_COLORS: [&str; 8] = [
    "#5a4a3a", "#3a4a5a", "#6a3a3a", "#3a5a4a", "#4a4a5a", "#5a5a3a", "#4a3a4a", "#3a4a3a",
];
const DOOR_COLORS: [&str; 8] = [
    "#8b4513", "#4a6741", "#4a5568", "#9b2335", "#2d5a7b", "#7a5230", "#5a3a6a", "#3a5a3a",
];
const TRIM_COLORS: [&str; 4] = ["#f5f0e8", "#e0d8c8", "#d0c8b0", "#c8d0d8"];
/// `None` means the house has no fence.
const FENCE_COLORS: [Option<&str>; 4] = [Some("#f5f0e8"), Some("#8b7355"), Some("#5a5a5a"), None];
const ROBOT_COLORS: [&str; 6] = ["#4fc3f7", "#e57373", "#81c784", "#ffb74d", "#ba68c8", "#4db6ac"];

const SMALL_LIVING_COLORS: [&str; 3] = ["#4a4644", "#484846", "#464444"];
const SMALL_KITCHEN_COLORS: [&str; 3] = ["#484848", "#464646", "#4a4a48"];
const SMALL_BEDROOM_COLORS: [&str; 3] = ["#444446", "#464448", "#484648"];

const DAY_LIGHT: &str = "#fff5e0";
const NIGHT_LIGHT: &str = "#e8e0ff";
const BATH_LIGHT: &str = "#f0f5ff";

fn draw<'a>(rng: &mut SeededRng, items: &[&'a str]) -> &'a str {
    items[rng.index(items.len())]
}

// ── Types ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Friendly,
    Grumpy,
    Curious,
    Shy,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Friendly,
        Personality::Grumpy,
        Personality::Curious,
        Personality::Shy,
    ];
}

/// A robot living next door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborResident {
    pub id: String,
    pub name: String,
    pub personality: Personality,
    pub color: String,
}

/// Street-facing look of a house. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseStyle {
    pub wall_color: String,
    pub roof_color: String,
    pub door_color: String,
    pub trim_color: String,
    pub stories: u8,
    /// Facade width on the street, in plan units.
    pub width: u32,
    pub has_garage: bool,
    pub has_chimney: bool,
    pub has_porch: bool,
    pub fence_color: Option<String>,
}

/// Interior layouts a neighbor house can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseLayout {
    Small,
    Medium,
    Large,
}

impl HouseLayout {
    pub const ALL: [HouseLayout; 3] = [HouseLayout::Small, HouseLayout::Medium, HouseLayout::Large];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborHouse {
    pub id: String,
    pub name: String,
    pub style: HouseStyle,
    pub street_slot: i32,
    pub layout: HouseLayout,
    pub floor_plan: FloorPlanPreset,
    pub residents: Vec<NeighborResident>,
    /// Player robots currently inside.
    pub visiting_robots: Vec<String>,
    /// Resident robots currently at home.
    pub neighbor_robots_home: Vec<String>,
}

impl NeighborHouse {
    /// Record a player robot entering. Returns `false` if it was already inside.
    pub fn begin_visit(&mut self, robot_id: &str) -> bool {
        if self.visiting_robots.iter().any(|r| r == robot_id) {
            return false;
        }
        self.visiting_robots.push(robot_id.to_string());
        true
    }

    /// Record a player robot leaving. Returns `false` if it was not inside.
    pub fn end_visit(&mut self, robot_id: &str) -> bool {
        let before = self.visiting_robots.len();
        self.visiting_robots.retain(|r| r != robot_id);
        self.visiting_robots.len() != before
    }

    pub fn is_visiting(&self, robot_id: &str) -> bool {
        self.visiting_robots.iter().any(|r| r == robot_id)
    }
}

// ── Generation ─────────────────────────────────────────────────────────────

/// Generate the street for `seed`.
pub fn generate_neighborhood(seed: u32) -> Result<Vec<NeighborHouse>, PlanError> {
    let mut rng = SeededRng::new(seed);
    let mut used_names = HashSet::new();
    let mut houses = Vec::with_capacity(HOUSE_COUNT);

    for (i, &slot) in STREET_SLOTS.iter().enumerate() {
        let name = loop {
            let candidate = draw(&mut rng, &FAMILY_NAMES);
            if used_names.insert(candidate) {
                break candidate;
            }
        };
        let house_id = format!("house-{}", i);
        let resident_count = 1 + rng.index(2);
        let style = house_style(&mut rng);
        let layout = HouseLayout::ALL[rng.index(HouseLayout::ALL.len())];
        let floor_plan = layout_plan(layout, &mut rng, &house_id)?;
        let residents = residents(&mut rng, resident_count);
        let home = residents.iter().map(|r| r.id.clone()).collect();

        log::debug!(
            "neighbor {} ({}) at slot {}: {:?} layout, {} resident(s)",
            house_id,
            name,
            slot,
            layout,
            residents.len()
        );

        houses.push(NeighborHouse {
            id: house_id,
            name: name.to_string(),
            style,
            street_slot: slot,
            layout,
            floor_plan,
            residents,
            visiting_robots: Vec::new(),
            neighbor_robots_home: home,
        });
    }

    log::info!("Generated neighborhood for seed {}", seed);
    Ok(houses)
}

fn house_style(rng: &mut SeededRng) -> HouseStyle {
    HouseStyle {
        wall_color: draw(rng, &WALL_COLORS).to_string(),
        roof_color: draw(rng, &ROOF_COLORS).to_string(),
        door_color: draw(rng, &DOOR_COLORS).to_string(),
        trim_color: draw(rng, &TRIM_COLORS).to_string(),
        stories: if rng.chance_above(0.6) { 2 } else { 1 },
        width: 14 + rng.index(8) as u32,
        has_garage: rng.chance_above(0.5),
        has_chimney: rng.chance_above(0.4),
        has_porch: rng.chance_above(0.3),
        fence_color: FENCE_COLORS[rng.index(FENCE_COLORS.len())].map(str::to_string),
    }
}

fn residents(rng: &mut SeededRng, count: usize) -> Vec<NeighborResident> {
    let mut used = HashSet::new();
    (0..count)
        .map(|_| {
            let name = loop {
                let candidate = draw(rng, &RESIDENT_NAMES);
                if used.insert(candidate) {
                    break candidate;
                }
            };
            let personality = Personality::ALL[rng.index(Personality::ALL.len())];
            NeighborResident {
                id: format!("resident-{}", name.to_lowercase()),
                name: name.to_string(),
                personality,
                color: draw(rng, &ROBOT_COLORS).to_string(),
            }
        })
        .collect()
}

fn layout_plan(layout: HouseLayout, rng: &mut SeededRng, house_id: &str) -> Result<FloorPlanPreset, PlanError> {
    let id = format!("neighbor-{}", house_id);
    match layout {
        HouseLayout::Small => small_house(rng, id),
        HouseLayout::Medium => medium_house(id),
        HouseLayout::Large => large_house(id),
    }
}

// ── Layouts ────────────────────────────────────────────────────────────────
//
// Each layout is a row of rooms above an east-west hallway and a row below
// it, with doors through both hallway walls.

fn small_house(rng: &mut SeededRng, id: String) -> Result<FloorPlanPreset, PlanError> {
    let living = draw(rng, &SMALL_LIVING_COLORS);
    let kitchen = draw(rng, &SMALL_KITCHEN_COLORS);
    let bedroom = draw(rng, &SMALL_BEDROOM_COLORS);

    let mut b = PlanBuilder::new(id, "Neighbor House", "A cozy small house");
    b.room("living-room", "Living Room", living, [-6.0, -5.0], [12.0, 10.0])
        .room("kitchen", "Kitchen", kitchen, [6.0, -5.0], [12.0, 10.0])
        .room("hallway", "Hallway", HALLWAY_COLOR, [0.0, 2.0], [24.0, 4.0])
        .room("bedroom", "Bedroom", bedroom, [0.0, 9.0], [24.0, 10.0])
        .enclose_floor()
        .wall_with_doors([-12.0, 0.0], [12.0, 0.0], &[-6.0, 6.0])
        .wall_with_doors([-12.0, 4.0], [12.0, 4.0], &[0.0])
        .wall([0.0, -10.0], [0.0, 0.0])
        .hub("hall", [0.0, 2.0]);
    attach(&mut b, "hall", "living-room", [-6.0, 0.0], [-6.0, -5.0]);
    attach(&mut b, "hall", "kitchen", [6.0, 0.0], [6.0, -5.0]);
    attach(&mut b, "hall", "bedroom", [0.0, 4.0], [0.0, 9.0]);
    b.light([-6.0, -5.0], 0.6, DAY_LIGHT, 12.0)
        .light([6.0, -5.0], 0.6, DAY_LIGHT, 12.0)
        .light([0.0, 9.0], 0.5, NIGHT_LIGHT, 12.0)
        .light([0.0, 2.0], 0.3, HALLWAY_LIGHT_COLOR, 8.0)
        .furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .window([-12.0 + WINDOW_INSET, -5.0])
        .window([12.0 - WINDOW_INSET, -5.0])
        .charging_station([10.0, 2.0]);
    b.build()
}

fn medium_house(id: String) -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new(id, "Neighbor House", "A medium family house");
    b.room("living-room", "Living Room", "#4a4644", [-8.0, -5.0], [16.0, 10.0])
        .room("kitchen", "Kitchen", "#484848", [7.0, -5.0], [14.0, 10.0])
        .room("hallway", "Hallway", HALLWAY_COLOR, [-1.0, 2.0], [30.0, 4.0])
        .room("bedroom", "Bedroom", "#444446", [-6.0, 9.0], [20.0, 10.0])
        .room("bathroom", "Bathroom", "#464848", [9.0, 9.0], [10.0, 10.0])
        .enclose_floor()
        .wall_with_doors([-16.0, 0.0], [14.0, 0.0], &[-8.0, 7.0])
        .wall_with_doors([-16.0, 4.0], [14.0, 4.0], &[-6.0, 9.0])
        .wall([0.0, -10.0], [0.0, 0.0])
        .wall([4.0, 4.0], [4.0, 14.0])
        .hub("hall-w", [-7.0, 2.0])
        .hub("hall-e", [8.0, 2.0])
        .link("hall-w", "hall-e");
    attach(&mut b, "hall-w", "living-room", [-8.0, 0.0], [-8.0, -5.0]);
    attach(&mut b, "hall-w", "bedroom", [-6.0, 4.0], [-6.0, 9.0]);
    attach(&mut b, "hall-e", "kitchen", [7.0, 0.0], [7.0, -5.0]);
    attach(&mut b, "hall-e", "bathroom", [9.0, 4.0], [9.0, 9.0]);
    b.light([-8.0, -5.0], 0.6, DAY_LIGHT, 14.0)
        .light([7.0, -5.0], 0.6, DAY_LIGHT, 14.0)
        .light([-6.0, 9.0], 0.5, NIGHT_LIGHT, 12.0)
        .light([9.0, 9.0], 0.4, BATH_LIGHT, 10.0)
        .light([-1.0, 2.0], 0.3, HALLWAY_LIGHT_COLOR, 10.0)
        .furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .window([-16.0 + WINDOW_INSET, -5.0])
        .window([14.0 - WINDOW_INSET, -5.0])
        .window([-16.0 + WINDOW_INSET, 9.0])
        .charging_station([12.0, 2.0]);
    b.build()
}

fn large_house(id: String) -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new(id, "Neighbor House", "A large family house");
    b.room("living-room", "Living Room", "#4a4644", [-10.0, -6.0], [20.0, 12.0])
        .room("kitchen", "Kitchen", "#484848", [9.0, -6.0], [18.0, 12.0])
        .room("hallway", "Hallway", HALLWAY_COLOR, [-1.0, 2.0], [38.0, 4.0])
        .room("bedroom", "Master Bedroom", "#444446", [-12.0, 10.0], [16.0, 12.0])
        .room("bathroom", "Bathroom", "#464848", [0.0, 10.0], [8.0, 12.0])
        .room("bedroom-2", "Guest Bedroom", "#464444", [11.0, 10.0], [14.0, 12.0])
        .enclose_floor()
        .wall_with_doors([-20.0, 0.0], [18.0, 0.0], &[-10.0, 9.0])
        .wall_with_doors([-20.0, 4.0], [18.0, 4.0], &[-12.0, 0.0, 11.0])
        .wall([0.0, -12.0], [0.0, 0.0])
        .wall([-4.0, 4.0], [-4.0, 16.0])
        .wall([4.0, 4.0], [4.0, 16.0])
        .hub("hall-w", [-11.0, 2.0])
        .hub("hall-c", [0.0, 2.0])
        .hub("hall-e", [10.0, 2.0])
        .chain(&["hall-w", "hall-c", "hall-e"]);
    attach(&mut b, "hall-w", "living-room", [-10.0, 0.0], [-10.0, -6.0]);
    attach(&mut b, "hall-w", "bedroom", [-12.0, 4.0], [-12.0, 10.0]);
    attach(&mut b, "hall-c", "bathroom", [0.0, 4.0], [0.0, 10.0]);
    attach(&mut b, "hall-e", "kitchen", [9.0, 0.0], [9.0, -6.0]);
    attach(&mut b, "hall-e", "bedroom-2", [11.0, 4.0], [11.0, 10.0]);
    b.light([-10.0, -6.0], 0.7, DAY_LIGHT, 16.0)
        .light([9.0, -6.0], 0.6, DAY_LIGHT, 14.0)
        .light([-12.0, 10.0], 0.5, NIGHT_LIGHT, 14.0)
        .light([11.0, 10.0], 0.5, NIGHT_LIGHT, 12.0)
        .light([0.0, 10.0], 0.4, BATH_LIGHT, 8.0)
        .light([-1.0, 2.0], 0.3, HALLWAY_LIGHT_COLOR, 12.0)
        .furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .furnish("bedroom-2", "bedroom", 1.0)
        .window([-20.0 + WINDOW_INSET, -6.0])
        .window([18.0 - WINDOW_INSET, -6.0])
        .window([-20.0 + WINDOW_INSET, 10.0])
        .window([18.0 - WINDOW_INSET, 10.0])
        .charging_station([16.0, 2.0]);
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_plan, Severity};
    use crate::waypoints::WaypointGraph;

    #[test]
    fn test_same_seed_same_street() {
        let a = generate_neighborhood(42).unwrap();
        let b = generate_neighborhood(42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), HOUSE_COUNT);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_neighborhood(42).unwrap();
        let b = generate_neighborhood(7).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_slots_and_ids() {
        let houses = generate_neighborhood(42).unwrap();
        for (i, h) in houses.iter().enumerate() {
            assert_eq!(h.id, format!("house-{}", i));
            assert_eq!(h.street_slot, STREET_SLOTS[i]);
            assert_eq!(h.floor_plan.id, format!("neighbor-house-{}", i));
        }
    }

    #[test]
    fn test_family_names_unique_across_seeds() {
        for seed in 1..200 {
            let houses = generate_neighborhood(seed).unwrap();
            let names: HashSet<_> = houses.iter().map(|h| h.name.as_str()).collect();
            assert_eq!(names.len(), houses.len(), "seed {}", seed);
        }
    }

    #[test]
    fn test_residents_unique_within_house() {
        for seed in 1..200 {
            for h in generate_neighborhood(seed).unwrap() {
                assert!((1..=2).contains(&h.residents.len()));
                let names: HashSet<_> = h.residents.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names.len(), h.residents.len());
                for r in &h.residents {
                    assert_eq!(r.id, format!("resident-{}", r.name.to_lowercase()));
                }
            }
        }
    }

    #[test]
    fn test_style_ranges() {
        for seed in 1..100 {
            for h in generate_neighborhood(seed).unwrap() {
                assert!(h.style.stories == 1 || h.style.stories == 2);
                assert!((14..=21).contains(&h.style.width));
            }
        }
    }

    #[test]
    fn test_all_layouts_validate() {
        let mut rng = SeededRng::new(3);
        for layout in HouseLayout::ALL {
            let plan = layout_plan(layout, &mut rng, "test").unwrap();
            let errors: Vec<_> = validate_plan(&plan)
                .into_iter()
                .filter(|e| e.severity == Severity::Error)
                .collect();
            assert!(errors.is_empty(), "{:?}: {:?}", layout, errors);
            assert!(WaypointGraph::new(&plan.waypoints).is_connected());
            assert!(plan.floors.is_empty());
        }
    }

    #[test]
    fn test_home_robots_start_as_residents() {
        for h in generate_neighborhood(42).unwrap() {
            let ids: Vec<_> = h.residents.iter().map(|r| r.id.clone()).collect();
            assert_eq!(h.neighbor_robots_home, ids);
            assert!(h.visiting_robots.is_empty());
        }
    }

    #[test]
    fn test_visit_bookkeeping() {
        let mut houses = generate_neighborhood(42).unwrap();
        let h = &mut houses[0];
        let home = h.neighbor_robots_home.clone();
        assert!(h.begin_visit("robot-1"));
        assert!(!h.begin_visit("robot-1"));
        assert!(h.is_visiting("robot-1"));
        assert!(h.end_visit("robot-1"));
        assert!(!h.end_visit("robot-1"));
        assert_eq!(h.neighbor_robots_home, home);
    }
}
