//! Shareable envelopes for plans and robot builds.
//!
//! An envelope is `{ type, version, name, createdAt, data }` serialized as
//! JSON and encoded as standard base64 so it fits in a link. Decoding is a
//! trust boundary: anything that is not a well-formed version-1 envelope
//! decodes to `None`, never to a partly populated value.

use crate::builder::PlanBuilder;
use crate::constants::{HALLWAY_COLOR, WINDOW_INSET};
use crate::error::PlanError;
use crate::model::FloorPlanPreset;
use crate::presets::attach;
use crate::store::{BoundedList, Keyed};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// The only envelope version understood.
pub const ENVELOPE_VERSION: u32 = 1;

/// Number of shared creations retained.
pub const SHARED_CREATIONS_CAPACITY: usize = 20;

/// What an envelope carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareKind {
    FloorPlan,
    RobotBuild,
}

/// A player-assembled robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRobot {
    pub id: String,
    pub name: String,
    pub head_id: String,
    pub body_id: String,
    pub arms_id: String,
    pub legs_id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    pub deployed: bool,
}

/// Typed envelope contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    FloorPlan(FloorPlanPreset),
    RobotBuild(CustomRobot),
}

impl Payload {
    pub fn kind(&self) -> ShareKind {
        match self {
            Payload::FloorPlan(_) => ShareKind::FloorPlan,
            Payload::RobotBuild(_) => ShareKind::RobotBuild,
        }
    }
}

/// Versioned wrapper around a shared plan or robot build.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireEnvelope")]
pub struct Envelope {
    pub version: u32,
    pub name: String,
    /// ISO-8601 timestamp supplied by the exporter.
    pub created_at: String,
    pub payload: Payload,
}

impl Envelope {
    pub fn kind(&self) -> ShareKind {
        self.payload.kind()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvelope {
    #[serde(rename = "type")]
    kind: ShareKind,
    version: u32,
    name: String,
    created_at: String,
    data: serde_json::Value,
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = PlanError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        if wire.version != ENVELOPE_VERSION {
            return Err(PlanError::MalformedImport(format!(
                "unsupported envelope version {}",
                wire.version
            )));
        }
        let payload = match wire.kind {
            ShareKind::FloorPlan => Payload::FloorPlan(serde_json::from_value(wire.data)?),
            ShareKind::RobotBuild => Payload::RobotBuild(serde_json::from_value(wire.data)?),
        };
        Ok(Envelope {
            version: wire.version,
            name: wire.name,
            created_at: wire.created_at,
            payload,
        })
    }
}

impl TryFrom<&Envelope> for WireEnvelope {
    type Error = PlanError;

    fn try_from(env: &Envelope) -> Result<Self, Self::Error> {
        let data = match &env.payload {
            Payload::FloorPlan(plan) => {
                if let Some(field) = plan.first_non_finite() {
                    return Err(PlanError::geometry(format!(
                        "{} of plan '{}' is not a finite number",
                        field, plan.id
                    )));
                }
                serde_json::to_value(plan)?
            }
            Payload::RobotBuild(robot) => serde_json::to_value(robot)?,
        };
        Ok(WireEnvelope {
            kind: env.kind(),
            version: env.version,
            name: env.name.clone(),
            created_at: env.created_at.clone(),
            data,
        })
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireEnvelope::try_from(self)
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

// ── Encode / decode ─────────────────────────────────────────────────────

/// JSON, then standard base64. Fails on payloads JSON cannot carry
/// faithfully, such as NaN coordinates.
pub fn encode(envelope: &Envelope) -> Result<String, PlanError> {
    let json = serde_json::to_string(&WireEnvelope::try_from(envelope)?)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Inverse of [`encode`]. Returns `None` for anything that is not a valid
/// version-1 envelope.
pub fn decode(encoded: &str) -> Option<Envelope> {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("share code is not base64: {}", e);
            return None;
        }
    };
    let json = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("share code is not UTF-8: {}", e);
            return None;
        }
    };
    match serde_json::from_str::<Envelope>(&json) {
        Ok(env) => Some(env),
        Err(e) => {
            log::warn!("rejected share envelope: {}", e);
            None
        }
    }
}

// ── Export / import ─────────────────────────────────────────────────────

pub fn export_floor_plan(plan: &FloorPlanPreset, created_at: impl Into<String>) -> Envelope {
    Envelope {
        version: ENVELOPE_VERSION,
        name: plan.name.clone(),
        created_at: created_at.into(),
        payload: Payload::FloorPlan(plan.clone()),
    }
}

pub fn export_robot_build(robot: &CustomRobot, created_at: impl Into<String>) -> Envelope {
    Envelope {
        version: ENVELOPE_VERSION,
        name: robot.name.clone(),
        created_at: created_at.into(),
        payload: Payload::RobotBuild(robot.clone()),
    }
}

/// Decode a share code that must hold a floor plan whose waypoint graph
/// is self-contained (unique ids, no dangling connections).
pub fn import_floor_plan(encoded: &str) -> Result<FloorPlanPreset, PlanError> {
    let envelope =
        decode(encoded).ok_or_else(|| PlanError::MalformedImport("unreadable share code".into()))?;
    let plan = match envelope.payload {
        Payload::FloorPlan(plan) => plan,
        Payload::RobotBuild(_) => {
            return Err(PlanError::MalformedImport(
                "share code holds a robot build, not a floor plan".into(),
            ))
        }
    };
    let mut ids = HashSet::new();
    for w in &plan.waypoints {
        if !ids.insert(w.id.as_str()) {
            return Err(PlanError::MalformedImport(format!("duplicate waypoint '{}'", w.id)));
        }
    }
    for w in &plan.waypoints {
        if let Some(missing) = w.connections.iter().find(|c| !ids.contains(c.as_str())) {
            return Err(PlanError::MalformedImport(format!(
                "waypoint '{}' connects to unknown '{}'",
                w.id, missing
            )));
        }
    }
    if plan.rooms.is_empty() {
        return Err(PlanError::MalformedImport("plan has no rooms".into()));
    }
    log::info!("imported plan '{}' ({} rooms)", plan.id, plan.rooms.len());
    Ok(plan)
}

/// Decode a share code that must hold a robot build.
pub fn import_robot_build(encoded: &str) -> Result<CustomRobot, PlanError> {
    match decode(encoded).map(|e| e.payload) {
        Some(Payload::RobotBuild(robot)) => Ok(robot),
        Some(Payload::FloorPlan(_)) => Err(PlanError::MalformedImport(
            "share code holds a floor plan, not a robot build".into(),
        )),
        None => Err(PlanError::MalformedImport("unreadable share code".into())),
    }
}

// ── Shared creations ────────────────────────────────────────────────────

/// An envelope the player has shared, as remembered locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCreation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShareKind,
    pub name: String,
    pub shared_at: String,
    pub content: Envelope,
}

impl SharedCreation {
    pub fn new(id: impl Into<String>, shared_at: impl Into<String>, content: Envelope) -> Self {
        Self {
            id: id.into(),
            kind: content.kind(),
            name: content.name.clone(),
            shared_at: shared_at.into(),
            content,
        }
    }
}

impl Keyed for SharedCreation {
    fn key(&self) -> &str {
        &self.id
    }
}

/// The last [`SHARED_CREATIONS_CAPACITY`] shared creations, deduplicated by id.
pub type SharedCreations = BoundedList<SharedCreation>;

impl BoundedList<SharedCreation> {
    pub fn shared_creations() -> Self {
        Self::new(SHARED_CREATIONS_CAPACITY)
    }
}

/// Starter robot builds offered in the sharing gallery.
pub fn gallery_robot_builds() -> Vec<Envelope> {
    let build = |id: &str, name: &str, parts: [&str; 4]| {
        export_robot_build(
            &CustomRobot {
                id: id.into(),
                name: name.into(),
                head_id: parts[0].into(),
                body_id: parts[1].into(),
                arms_id: parts[2].into(),
                legs_id: parts[3].into(),
                created_at: 0,
                deployed: false,
            },
            "2025-01-01T00:00:00Z",
        )
    };
    vec![
        build(
            "gallery-speed-demon",
            "Speed Demon",
            ["head-quantum", "body-compact", "arms-nano", "legs-hover"],
        ),
        build(
            "gallery-tank-bot",
            "Tank Bot",
            ["head-antenna", "body-tank", "arms-hydraulic", "legs-treads"],
        ),
        build(
            "gallery-efficiency",
            "Efficiency Expert",
            ["head-visor", "body-stealth", "arms-multi", "legs-spring"],
        ),
    ]
}

/// Starter floor plans offered in the sharing gallery.
pub fn gallery_floor_plans() -> Result<Vec<Envelope>, PlanError> {
    Ok(vec![
        export_floor_plan(&cozy_cottage()?, GALLERY_CREATED_AT),
        export_floor_plan(&modern_penthouse()?, GALLERY_CREATED_AT),
    ])
}

const GALLERY_CREATED_AT: &str = "2025-01-01T00:00:00Z";

fn cozy_cottage() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("gallery-cottage", "Cozy Cottage", "Warm cottage, 4 rooms")
        .with_room_lights(0.5);
    b.room("living-room", "Living Room", "#5a4e3c", [-5.0, -5.0], [10.0, 10.0])
        .room("kitchen", "Kitchen", "#4a4538", [5.0, -5.0], [10.0, 10.0])
        .room("hallway", "Hallway", HALLWAY_COLOR, [0.0, 2.0], [20.0, 4.0])
        .room("bedroom", "Bedroom", "#3e3c48", [-5.0, 8.0], [10.0, 8.0])
        .room("bathroom", "Bathroom", "#3c4848", [5.0, 8.0], [10.0, 8.0])
        .enclose_floor()
        .wall_with_doors([-10.0, 0.0], [10.0, 0.0], &[-5.0, 5.0])
        .wall_with_doors([-10.0, 4.0], [10.0, 4.0], &[-5.0, 5.0])
        .wall([0.0, -10.0], [0.0, 0.0])
        .wall([0.0, 4.0], [0.0, 12.0])
        .hub("hall-west", [-5.0, 2.0])
        .hub("hall-east", [5.0, 2.0])
        .link("hall-west", "hall-east");
    attach(&mut b, "hall-west", "living-room", [-5.0, 0.0], [-5.0, -5.0]);
    attach(&mut b, "hall-west", "bedroom", [-5.0, 4.0], [-5.0, 8.0]);
    attach(&mut b, "hall-east", "kitchen", [5.0, 0.0], [5.0, -5.0]);
    attach(&mut b, "hall-east", "bathroom", [5.0, 4.0], [5.0, 8.0]);
    b.furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .window([-10.0 + WINDOW_INSET, -5.0])
        .window([10.0 - WINDOW_INSET, -5.0])
        .charging_station([-8.0, 2.0]);
    b.build()
}

fn modern_penthouse() -> Result<FloorPlanPreset, PlanError> {
    let mut b = PlanBuilder::new("gallery-penthouse", "Modern Penthouse", "Sleek penthouse, 5 rooms")
        .with_room_lights(0.5);
    b.room("living-room", "Grand Lounge", "#3a3a3a", [-7.0, -6.0], [14.0, 12.0])
        .room("kitchen", "Chef Kitchen", "#383838", [6.0, -6.0], [12.0, 12.0])
        .room("hallway", "Gallery", HALLWAY_COLOR, [-1.0, 2.0], [26.0, 4.0])
        .room("bedroom", "Master Suite", "#363640", [-7.0, 10.0], [14.0, 12.0])
        .room("bathroom", "Spa Bath", "#364040", [3.0, 10.0], [6.0, 12.0])
        .room("gym", "Fitness Room", "#343638", [9.0, 10.0], [6.0, 12.0])
        .enclose_floor()
        .wall_with_doors([-14.0, 0.0], [12.0, 0.0], &[-7.0, 6.0])
        .wall_with_doors([-14.0, 4.0], [12.0, 4.0], &[-7.0, 3.0, 9.0])
        .wall([0.0, -12.0], [0.0, 0.0])
        .wall([0.0, 4.0], [0.0, 16.0])
        .wall([6.0, 4.0], [6.0, 16.0])
        .hub("hall-west", [-7.0, 2.0])
        .hub("hall-spa", [3.0, 2.0])
        .hub("hall-kitchen", [6.0, 2.0])
        .hub("hall-east", [9.0, 2.0])
        .chain(&["hall-west", "hall-spa", "hall-kitchen", "hall-east"]);
    attach(&mut b, "hall-west", "living-room", [-7.0, 0.0], [-7.0, -6.0]);
    attach(&mut b, "hall-west", "bedroom", [-7.0, 4.0], [-7.0, 10.0]);
    attach(&mut b, "hall-kitchen", "kitchen", [6.0, 0.0], [6.0, -6.0]);
    attach(&mut b, "hall-spa", "bathroom", [3.0, 4.0], [3.0, 10.0]);
    attach(&mut b, "hall-east", "gym", [9.0, 4.0], [9.0, 10.0]);
    b.furnish("living-room", "living-room", -1.0)
        .furnish("kitchen", "kitchen", -1.0)
        .furnish("bedroom", "bedroom", 1.0)
        .furnish("bathroom", "bathroom", 1.0)
        .window([-14.0 + WINDOW_INSET, -6.0])
        .window([12.0 - WINDOW_INSET, -6.0])
        .window([-14.0 + WINDOW_INSET, 10.0])
        .window([12.0 - WINDOW_INSET, 10.0])
        .charging_station([-12.0, 2.0]);
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::validation::{validate_plan, Severity};
    use crate::waypoints::WaypointGraph;

    fn robot() -> CustomRobot {
        CustomRobot {
            id: "robot-1".into(),
            name: "Bolt".into(),
            head_id: "head-visor".into(),
            body_id: "body-tank".into(),
            arms_id: "arms-nano".into(),
            legs_id: "legs-hover".into(),
            created_at: 1_700_000_000_000,
            deployed: true,
        }
    }

    #[test]
    fn test_floor_plan_round_trip() {
        let env = export_floor_plan(&presets::house().unwrap(), "2026-01-01T00:00:00Z");
        let decoded = decode(&encode(&env).unwrap()).unwrap();
        assert_eq!(decoded, env);
        assert_eq!(decoded.kind(), ShareKind::FloorPlan);
    }

    #[test]
    fn test_robot_round_trip() {
        let env = export_robot_build(&robot(), "2026-01-01T00:00:00Z");
        let code = encode(&env).unwrap();
        assert_eq!(decode(&code), Some(env));
        assert_eq!(import_robot_build(&code).unwrap(), robot());
        assert!(import_floor_plan(&code).is_err());
    }

    #[test]
    fn test_wire_format_fields() {
        let env = export_robot_build(&robot(), "t");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["type"], "robot-build");
        assert_eq!(json["version"], 1);
        assert_eq!(json["createdAt"], "t");
        assert_eq!(json["data"]["headId"], "head-visor");
    }

    #[test]
    fn test_corrupted_and_truncated_codes_decode_to_none() {
        let code = encode(&export_floor_plan(&presets::studio().unwrap(), "t")).unwrap();
        assert!(decode(&code[..code.len() / 2]).is_none());
        assert!(decode("!!!not base64!!!").is_none());
        assert!(decode("").is_none());
        let mut bytes = code.into_bytes();
        bytes[10] = b'*';
        assert!(decode(&String::from_utf8(bytes).unwrap()).is_none());
    }

    #[test]
    fn test_unknown_version_and_missing_fields_rejected() {
        let v2 = r#"{"type":"robot-build","version":2,"name":"x","createdAt":"t","data":{}}"#;
        assert!(decode(&STANDARD.encode(v2)).is_none());
        let no_data = r#"{"type":"floor-plan","version":1,"name":"x","createdAt":"t"}"#;
        assert!(decode(&STANDARD.encode(no_data)).is_none());
        let bad_plan = r#"{"type":"floor-plan","version":1,"name":"x","createdAt":"t","data":{"id":"p"}}"#;
        assert!(decode(&STANDARD.encode(bad_plan)).is_none());
        let bad_kind = r#"{"type":"recipe","version":1,"name":"x","createdAt":"t","data":{}}"#;
        assert!(decode(&STANDARD.encode(bad_kind)).is_none());
    }

    #[test]
    fn test_import_rejects_dangling_connections() {
        let mut plan = presets::apartment().unwrap();
        plan.waypoints[0].connections.push("nowhere".into());
        let code = encode(&export_floor_plan(&plan, "t")).unwrap();
        assert!(decode(&code).is_some());
        assert!(matches!(import_floor_plan(&code), Err(PlanError::MalformedImport(_))));
    }

    #[test]
    fn test_import_accepts_valid_plan() {
        let plan = presets::loft().unwrap();
        let code = encode(&export_floor_plan(&plan, "t")).unwrap();
        assert_eq!(import_floor_plan(&code).unwrap(), plan);
    }

    #[test]
    fn test_shared_creations_capped_and_deduped() {
        let mut shared = SharedCreations::shared_creations();
        let env = export_robot_build(&robot(), "t");
        for i in 0..25 {
            shared.push(SharedCreation::new(format!("c{}", i), "t", env.clone()));
        }
        assert_eq!(shared.len(), SHARED_CREATIONS_CAPACITY);
        assert_eq!(shared.items()[0].id, "c5");
        shared.push(SharedCreation::new("c10", "later", env));
        assert_eq!(shared.len(), SHARED_CREATIONS_CAPACITY);
        assert_eq!(shared.items().last().unwrap().shared_at, "later");
    }

    #[test]
    fn test_non_finite_plan_refuses_to_encode() {
        let mut plan = presets::studio().unwrap();
        plan.rooms[1].center[0] = f32::NAN;
        let env = export_floor_plan(&plan, "t");
        match encode(&env) {
            Err(PlanError::InvalidGeometry { reason }) => assert!(reason.contains("kitchen"), "{}", reason),
            other => panic!("expected geometry error, got {:?}", other),
        }
        assert!(serde_json::to_string(&env).is_err());

        plan.rooms[1].center[0] = 10.0;
        plan.lights[0].intensity = f32::INFINITY;
        assert!(encode(&export_floor_plan(&plan, "t")).is_err());
    }

    #[test]
    fn test_shared_creation_serializes_envelope_on_the_wire() {
        let env = export_robot_build(&robot(), "t");
        let shared = SharedCreation::new("c1", "t", env.clone());
        let json = serde_json::to_string(&shared).unwrap();
        let back: SharedCreation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, env);
    }

    #[test]
    fn test_gallery_floor_plans_import_clean() {
        let gallery = gallery_floor_plans().unwrap();
        let names: Vec<&str> = gallery.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Cozy Cottage", "Modern Penthouse"]);
        for env in &gallery {
            let Payload::FloorPlan(plan) = &env.payload else {
                panic!("{} is not a floor plan", env.name);
            };
            let code = encode(env).unwrap();
            assert_eq!(decode(&code).as_ref(), Some(env));
            let imported = import_floor_plan(&code).unwrap();
            assert_eq!(&imported, plan);
            let errors: Vec<_> = validate_plan(&imported)
                .into_iter()
                .filter(|e| e.severity == Severity::Error)
                .collect();
            assert!(errors.is_empty(), "{}: {:?}", imported.id, errors);
            assert!(WaypointGraph::new(&imported.waypoints).is_connected());
        }
    }

    #[test]
    fn test_gallery_builds_round_trip() {
        for env in gallery_robot_builds() {
            assert_eq!(decode(&encode(&env).unwrap()).as_ref(), Some(&env));
        }
    }
}
