//! Room template catalog.
//!
//! A template is a room archetype the generator samples: display name,
//! floor color, size bounds in grid cells and whether every generated plan
//! must contain it.

use crate::constants::{DOOR_GAP, HALLWAY_ID, S};
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimum number of required templates a generator catalog must provide.
pub const MIN_REQUIRED_TEMPLATES: usize = 4;

/// A reusable room archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTemplate {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Width bounds in grid cells, inclusive.
    pub min_w: u32,
    pub max_w: u32,
    /// Depth bounds in grid cells, inclusive.
    pub min_d: u32,
    pub max_d: u32,
    pub required: bool,
}

impl RoomTemplate {
    pub fn new(id: &str, name: &str, color: &str, w: (u32, u32), d: (u32, u32), required: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            min_w: w.0,
            max_w: w.1,
            min_d: d.0,
            max_d: d.1,
            required,
        }
    }
}

/// Validated, immutable set of templates.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<RoomTemplate>,
}

impl TemplateCatalog {
    /// Build a catalog. Rejects duplicate or reserved ids, inverted or zero
    /// size bounds, rooms too narrow to hold a door, and catalogs with fewer
    /// than [`MIN_REQUIRED_TEMPLATES`] required entries.
    pub fn new(templates: Vec<RoomTemplate>) -> Result<Self, PlanError> {
        let mut seen = HashSet::new();
        for t in &templates {
            if t.id == HALLWAY_ID {
                return Err(PlanError::InvalidTemplateCatalog(format!(
                    "template id '{}' is reserved",
                    HALLWAY_ID
                )));
            }
            if !seen.insert(t.id.as_str()) {
                return Err(PlanError::InvalidTemplateCatalog(format!(
                    "duplicate template id '{}'",
                    t.id
                )));
            }
            if t.min_w == 0 || t.min_d == 0 || t.min_w > t.max_w || t.min_d > t.max_d {
                return Err(PlanError::InvalidTemplateCatalog(format!(
                    "template '{}' has invalid size bounds {}..{} x {}..{}",
                    t.id, t.min_w, t.max_w, t.min_d, t.max_d
                )));
            }
            // The hallway door is cut into the room's width.
            if t.min_w as f32 * S <= DOOR_GAP {
                return Err(PlanError::InvalidTemplateCatalog(format!(
                    "template '{}' is {} wide at minimum, narrower than a {} door",
                    t.id,
                    t.min_w as f32 * S,
                    DOOR_GAP
                )));
            }
        }
        let required = templates.iter().filter(|t| t.required).count();
        if required < MIN_REQUIRED_TEMPLATES {
            return Err(PlanError::InvalidTemplateCatalog(format!(
                "{} required templates, need at least {}",
                required, MIN_REQUIRED_TEMPLATES
            )));
        }
        Ok(Self { templates })
    }

    /// The stock household catalog.
    pub fn standard() -> Self {
        Self {
            templates: standard_templates(),
        }
    }

    pub fn all(&self) -> &[RoomTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&RoomTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn required(&self) -> impl Iterator<Item = &RoomTemplate> {
        self.templates.iter().filter(|t| t.required)
    }

    pub fn optional(&self) -> impl Iterator<Item = &RoomTemplate> {
        self.templates.iter().filter(|t| !t.required)
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_templates() -> Vec<RoomTemplate> {
    vec![
        RoomTemplate::new("living-room", "Living Room", "#4a4644", (6, 8), (6, 8), true),
        RoomTemplate::new("kitchen", "Kitchen", "#484848", (5, 8), (5, 8), true),
        RoomTemplate::new("bedroom", "Bedroom", "#444446", (5, 8), (5, 8), true),
        RoomTemplate::new("bathroom", "Bathroom", "#464848", (4, 6), (4, 6), true),
        RoomTemplate::new("laundry", "Laundry", "#484646", (3, 4), (3, 4), false),
        RoomTemplate::new("study", "Study", "#464444", (4, 6), (4, 6), false),
        RoomTemplate::new("dining", "Dining Room", "#4a4843", (5, 7), (5, 7), false),
        RoomTemplate::new("gym", "Home Gym", "#434547", (5, 7), (4, 6), false),
    ]
}
