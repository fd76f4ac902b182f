//! Procedural floor-plan generator.
//!
//! Produces a single-floor plan from a [`TemplateCatalog`]:
//!
//! 1. Draw a room count, keep every required template and fill the rest
//!    with a shuffled prefix of the optional ones.
//! 2. Size each room within its template bounds.
//! 3. Pack the first half into a top row (negative z) and the rest into a
//!    bottom row, each centered on x, with a hallway strip between them.
//! 4. Derive outer walls, hallway walls pierced by one door per room and
//!    solid interior walls between row neighbours.
//! 5. Emit hallway/doorway/center waypoints, ceilings, lights, windows,
//!    furniture and the charging station.
//!
//! The generator is generic over [`rand::Rng`]; the same random stream
//! always yields the same plan.

use crate::builder::PlanBuilder;
use crate::constants::{
    DOORWAY_INSET, HALLWAY_COLOR, HALLWAY_DEPTH, HALLWAY_ID, HALLWAY_LIGHT_COLOR, LIGHT_COLORS, S,
    WINDOW_INSET,
};
use crate::error::PlanError;
use crate::geometry::{self, Rect};
use crate::model::FloorPlanPreset;
use crate::rng::SeededRng;
use crate::templates::{RoomTemplate, TemplateCatalog, MIN_REQUIRED_TEMPLATES};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Configuration ───────────────────────────────────────────────────────

/// Tunables for [`FloorPlanGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Inclusive room-count range (hallway excluded).
    pub min_rooms: usize,
    pub max_rooms: usize,
    /// Depth of the hallway strip between the two rows.
    pub hallway_depth: f32,
    /// Base intensity of room lights; each light adds up to `light_jitter`.
    pub light_intensity: f32,
    pub light_jitter: f32,
    /// Intensity of the hallway light.
    pub hallway_light_intensity: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_rooms: 4,
            max_rooms: 8,
            hallway_depth: HALLWAY_DEPTH,
            light_intensity: 0.4,
            light_jitter: 0.2,
            hallway_light_intensity: 0.3,
        }
    }
}

/// A configuration problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Room range is empty or below the required-template minimum.
    #[error("room count range {min}..={max} is empty or below {required}", required = MIN_REQUIRED_TEMPLATES)]
    RoomCountRange { min: usize, max: usize },
    /// A length or intensity that must be positive is not.
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    /// The hallway is too shallow to hold the doorway waypoints.
    #[error("hallway depth {0} cannot hold doorway waypoints (need {min})", min = 2.0 * DOORWAY_INSET)]
    HallwayTooShallow(f32),
}

impl GeneratorConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Report every problem with this configuration.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.min_rooms < MIN_REQUIRED_TEMPLATES || self.min_rooms > self.max_rooms {
            errors.push(ConfigError::RoomCountRange {
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        if self.hallway_depth <= 0.0 {
            errors.push(ConfigError::NonPositive("hallway_depth"));
        } else if self.hallway_depth < 2.0 * DOORWAY_INSET {
            errors.push(ConfigError::HallwayTooShallow(self.hallway_depth));
        }
        if self.light_intensity <= 0.0 {
            errors.push(ConfigError::NonPositive("light_intensity"));
        }
        if self.light_jitter < 0.0 {
            errors.push(ConfigError::NonPositive("light_jitter"));
        }
        if self.hallway_light_intensity <= 0.0 {
            errors.push(ConfigError::NonPositive("hallway_light_intensity"));
        }
        errors
    }
}

// ── Layout ──────────────────────────────────────────────────────────────

/// A sized, positioned room before it becomes part of a plan.
#[derive(Debug, Clone)]
struct Placed<'a> {
    template: &'a RoomTemplate,
    w: f32,
    d: f32,
    cx: f32,
    cz: f32,
}

fn pack_row<'a>(row: &[(&'a RoomTemplate, f32, f32)], z_sign: f32, hall_half: f32) -> Vec<Placed<'a>> {
    let total: f32 = row.iter().map(|&(_, w, _)| w).sum();
    let mut cur_x = -total / 2.0;
    row.iter()
        .map(|&(template, w, d)| {
            let placed = Placed {
                template,
                w,
                d,
                cx: cur_x + w / 2.0,
                cz: z_sign * (hall_half + d / 2.0),
            };
            cur_x += w;
            placed
        })
        .collect()
}

fn row_width(row: &[Placed<'_>]) -> f32 {
    row.iter().map(|p| p.w).sum()
}

// ── Generator ───────────────────────────────────────────────────────────

/// Seeded two-row floor-plan generator.
#[derive(Debug, Clone)]
pub struct FloorPlanGenerator {
    catalog: TemplateCatalog,
    config: GeneratorConfig,
}

impl FloorPlanGenerator {
    pub fn new(catalog: TemplateCatalog, config: GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate with the portable seeded source.
    pub fn generate_seeded(&self, seed: u32) -> Result<FloorPlanPreset, PlanError> {
        self.generate(&mut SeededRng::new(seed))
    }

    /// Generate a plan from `rng`. Fails only on a misconfigured catalog or
    /// config, never with a partial plan.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FloorPlanPreset, PlanError> {
        let required: Vec<&RoomTemplate> = self.catalog.required().collect();
        if required.len() < MIN_REQUIRED_TEMPLATES {
            return Err(PlanError::InvalidTemplateCatalog(format!(
                "{} required templates, need at least {}",
                required.len(),
                MIN_REQUIRED_TEMPLATES
            )));
        }
        if let Some(err) = self.config.validate().into_iter().next() {
            return Err(PlanError::InvalidConfig(err));
        }

        // Sampled as u32 so the draw is identical on every pointer width.
        let room_count =
            rng.gen_range(self.config.min_rooms as u32..=self.config.max_rooms as u32) as usize;
        let mut optional: Vec<&RoomTemplate> = self.catalog.optional().collect();
        optional.shuffle(rng);
        let extra = room_count.saturating_sub(required.len()).min(optional.len());
        let selected: Vec<&RoomTemplate> = required.into_iter().chain(optional.into_iter().take(extra)).collect();

        let sized: Vec<(&RoomTemplate, f32, f32)> = selected
            .into_iter()
            .map(|t| {
                let w = rng.gen_range(t.min_w..=t.max_w) as f32 * S;
                let d = rng.gen_range(t.min_d..=t.max_d) as f32 * S;
                (t, w, d)
            })
            .collect();

        let hall_half = self.config.hallway_depth / 2.0;
        let top_count = (sized.len() + 1) / 2;
        let top = pack_row(&sized[..top_count], -1.0, hall_half);
        let bottom = pack_row(&sized[top_count..], 1.0, hall_half);
        log::debug!(
            "packed {} rooms: top row {:.1} wide, bottom row {:.1} wide",
            sized.len(),
            row_width(&top),
            row_width(&bottom)
        );

        let intensities: Vec<f32> = (0..sized.len())
            .map(|_| self.config.light_intensity + rng.gen::<f32>() * self.config.light_jitter)
            .collect();
        let id = format!("random-{:08x}", rng.gen::<u32>());

        let plan = self.assemble(id, &top, &bottom, &intensities)?;
        log::info!(
            "generated plan {} with {} rooms, {} walls, {} waypoints",
            plan.id,
            plan.rooms.len(),
            plan.walls.len(),
            plan.waypoints.len()
        );
        Ok(plan)
    }

    fn assemble(
        &self,
        id: String,
        top: &[Placed<'_>],
        bottom: &[Placed<'_>],
        intensities: &[f32],
    ) -> Result<FloorPlanPreset, PlanError> {
        let hall_d = self.config.hallway_depth;
        let hall_w = row_width(top).max(row_width(bottom));
        let hall_top_z = -hall_d / 2.0;
        let hall_bot_z = hall_d / 2.0;
        let placed: Vec<&Placed<'_>> = top.iter().chain(bottom).collect();

        let mut b = PlanBuilder::new(id, "Random Layout", format!("{} rooms, procedural", placed.len() + 1));

        for p in &placed {
            b.room(&p.template.id, &p.template.name, &p.template.color, [p.cx, p.cz], [p.w, p.d]);
        }
        b.room(HALLWAY_ID, "Hallway", HALLWAY_COLOR, [0.0, 0.0], [hall_w, hall_d]);

        let bounds = geometry::bounding_box(
            placed
                .iter()
                .map(|p| Rect::from_center([p.cx, p.cz], [p.w, p.d]))
                .chain(std::iter::once(Rect::from_center([0.0, 0.0], [hall_w, hall_d]))),
        )
        .ok_or_else(|| PlanError::geometry("plan has no rooms"))?;

        // Walls
        b.outer_walls(bounds);
        let top_doors: Vec<f32> = top.iter().map(|p| p.cx).collect();
        let bottom_doors: Vec<f32> = bottom.iter().map(|p| p.cx).collect();
        b.wall_with_doors([bounds.min_x, hall_top_z], [bounds.max_x, hall_top_z], &top_doors);
        b.wall_with_doors([bounds.min_x, hall_bot_z], [bounds.max_x, hall_bot_z], &bottom_doors);
        for p in top.iter().take(top.len().saturating_sub(1)) {
            let x = p.cx + p.w / 2.0;
            b.wall([x, bounds.min_z], [x, hall_top_z]);
        }
        for p in bottom.iter().take(bottom.len().saturating_sub(1)) {
            let x = p.cx + p.w / 2.0;
            b.wall([x, hall_bot_z], [x, bounds.max_z]);
        }

        // Waypoints: hallway-side, doorway and center node per room
        let rows = [(top, hall_top_z + DOORWAY_INSET), (bottom, hall_bot_z - DOORWAY_INSET)];
        let mut hall_nodes: Vec<(f32, String)> = Vec::with_capacity(placed.len());
        for (row, door_z) in rows {
            for p in row {
                let rid = &p.template.id;
                let hall = format!("hall-{}", rid);
                let door = format!("{}-door", rid);
                let center = format!("{}-center", rid);
                b.hub(&hall, [p.cx, 0.0])
                    .doorway(&door, [p.cx, door_z])
                    .stop(&center, [p.cx, p.cz])
                    .link(&hall, &door)
                    .link(&door, &center);
                hall_nodes.push((p.cx, hall));
            }
        }
        // Spine runs west to east; ties keep top-row order first.
        hall_nodes.sort_by(|l, r| l.0.total_cmp(&r.0));
        let spine: Vec<&str> = hall_nodes.iter().map(|(_, id)| id.as_str()).collect();
        b.chain(&spine);

        // Lights
        for (i, p) in placed.iter().enumerate() {
            let color = LIGHT_COLORS[i % LIGHT_COLORS.len()];
            b.light([p.cx, p.cz], intensities[i], color, p.w.max(p.d) + 4.0);
        }
        b.light(
            [0.0, 0.0],
            self.config.hallway_light_intensity,
            HALLWAY_LIGHT_COLOR,
            hall_w * 0.6,
        );

        // Windows on the east and west outer walls
        let top_mid = (bounds.min_z + hall_top_z) / 2.0;
        b.window([bounds.min_x + WINDOW_INSET, top_mid])
            .window([bounds.max_x - WINDOW_INSET, top_mid]);
        if !bottom.is_empty() {
            let bot_mid = (bounds.max_z + hall_bot_z) / 2.0;
            b.window([bounds.min_x + WINDOW_INSET, bot_mid])
                .window([bounds.max_x - WINDOW_INSET, bot_mid]);
        }

        // Furniture: the far wall is the one opposite the hallway
        for p in top {
            b.furnish(&p.template.id, &p.template.id, -1.0);
        }
        for p in bottom {
            b.furnish(&p.template.id, &p.template.id, 1.0);
        }

        b.charging_station([bounds.min_x + 2.0, 0.0]);
        b.build()
    }
}

impl Default for FloorPlanGenerator {
    fn default() -> Self {
        Self::new(TemplateCatalog::standard(), GeneratorConfig::default())
    }
}

/// Generate a plan from the stock catalog and default config.
pub fn generate(seed: u32) -> Result<FloorPlanPreset, PlanError> {
    FloorPlanGenerator::default().generate_seeded(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoints::WaypointGraph;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_empty());
    }

    #[test]
    fn test_config_validation_reports_all() {
        let config = GeneratorConfig {
            min_rooms: 9,
            max_rooms: 5,
            hallway_depth: 0.0,
            light_intensity: -1.0,
            ..GeneratorConfig::default()
        };
        let errors = config.validate();
        assert!(errors.contains(&ConfigError::RoomCountRange { min: 9, max: 5 }));
        assert!(errors.contains(&ConfigError::NonPositive("hallway_depth")));
        assert!(errors.contains(&ConfigError::NonPositive("light_intensity")));
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = GeneratorConfig::from_json(r#"{"minRooms": 6, "maxRooms": 6}"#).unwrap();
        assert_eq!(config.min_rooms, 6);
        assert_eq!(config.hallway_depth, HALLWAY_DEPTH);
        assert!(GeneratorConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_same_seed_same_plan() {
        let a = generate(7).unwrap();
        let b = generate(7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_required_rooms_always_present() {
        for seed in 0..30 {
            let plan = generate(seed).unwrap();
            for id in ["living-room", "kitchen", "bedroom", "bathroom", HALLWAY_ID] {
                assert!(plan.room(id).is_some(), "seed {} missing {}", seed, id);
            }
            let rooms = plan.rooms.len() - 1;
            assert!((4..=8).contains(&rooms), "seed {} has {} rooms", seed, rooms);
        }
    }

    #[test]
    fn test_room_sizes_within_template_bounds() {
        let catalog = TemplateCatalog::standard();
        for seed in 0..20 {
            let plan = generate(seed).unwrap();
            for r in plan.rooms.iter().filter(|r| r.id != HALLWAY_ID) {
                let t = catalog.get(&r.id).unwrap();
                assert!(r.size[0] >= t.min_w as f32 * S && r.size[0] <= t.max_w as f32 * S);
                assert!(r.size[1] >= t.min_d as f32 * S && r.size[1] <= t.max_d as f32 * S);
            }
        }
    }

    #[test]
    fn test_fixed_room_count() {
        let config = GeneratorConfig {
            min_rooms: 6,
            max_rooms: 6,
            ..GeneratorConfig::default()
        };
        let generator = FloorPlanGenerator::new(TemplateCatalog::standard(), config);
        let plan = generator.generate_seeded(3).unwrap();
        assert_eq!(plan.rooms.len(), 7);
        assert_eq!(plan.door_frames.len(), 6);
        assert_eq!(plan.lights.len(), 7);
        assert_eq!(plan.ceilings.len(), 7);
        assert!(WaypointGraph::new(&plan.waypoints).is_connected());
    }

    #[test]
    fn test_bad_config_fails_fast() {
        let config = GeneratorConfig {
            min_rooms: 2,
            ..GeneratorConfig::default()
        };
        let generator = FloorPlanGenerator::new(TemplateCatalog::standard(), config);
        let err = generator.generate_seeded(1).unwrap_err();
        assert!(matches!(
            err,
            PlanError::InvalidConfig(ConfigError::RoomCountRange { min: 2, max: 8 })
        ));
        assert!(err.to_string().contains("2..=8"), "{}", err);
    }

    #[test]
    fn test_config_error_messages_name_the_field() {
        assert_eq!(
            ConfigError::NonPositive("light_intensity").to_string(),
            "light_intensity must be positive"
        );
        assert!(ConfigError::HallwayTooShallow(1.5).to_string().contains("need 2"));
    }

    #[test]
    fn test_room_count_draw_is_stable() {
        let config = GeneratorConfig {
            min_rooms: 5,
            max_rooms: 7,
            ..GeneratorConfig::default()
        };
        let generator = FloorPlanGenerator::new(TemplateCatalog::standard(), config);
        for seed in 0..40 {
            let rooms = generator.generate_seeded(seed).unwrap().rooms.len() - 1;
            assert!((5..=7).contains(&rooms), "seed {} has {} rooms", seed, rooms);

            let mut rng = SeededRng::new(seed);
            let expected = rng.gen_range(5u32..=7) as usize;
            assert_eq!(rooms, expected, "seed {}", seed);
        }
    }

    #[test]
    fn test_works_with_std_rng() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        let mut rng = StdRng::seed_from_u64(5);
        let plan = FloorPlanGenerator::default().generate(&mut rng).unwrap();
        assert!(plan.id.starts_with("random-"));
        assert!(WaypointGraph::new(&plan.waypoints).is_connected());
    }
}
