//! HomePlan Headless Harness
//!
//! Generates, validates and round-trips floor plans entirely in-process.
//! No renderer, no storage backend, no networking.
//!
//! Usage:
//!   cargo run -p homeplan-simtest
//!   cargo run -p homeplan-simtest -- --verbose
//!   cargo run -p homeplan-simtest -- --seed 1000 --config generator.json
//!   cargo run -p homeplan-simtest -- --export house

use homeplan_logic::constants::HALLWAY_ID;
use homeplan_logic::generator::{FloorPlanGenerator, GeneratorConfig};
use homeplan_logic::model::FloorPlanPreset;
use homeplan_logic::neighborhood::{generate_neighborhood, HOUSE_COUNT, STREET_SLOTS};
use homeplan_logic::presets::{BUILTIN_PLAN_IDS, DEFAULT_PLAN_ID};
use homeplan_logic::registry::{ActivePlan, FloorPlanRegistry};
use homeplan_logic::sharing::{
    decode, encode, export_floor_plan, gallery_floor_plans, gallery_robot_builds, import_floor_plan,
    SharedCreation,
    SharedCreations, SHARED_CREATIONS_CAPACITY,
};
use homeplan_logic::store::{CustomPlanStore, CUSTOM_PLAN_CAPACITY};
use homeplan_logic::templates::TemplateCatalog;
use homeplan_logic::validation::{check_rooms_enclosed, validate_plan, Severity};
use homeplan_logic::waypoints::WaypointGraph;
use std::collections::HashSet;

const SWEEP_SEEDS: u32 = 200;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let base_seed = match arg_value(&args, "--seed").map(|s| s.parse::<u32>()) {
        None => 0,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid --seed: {}", e);
            std::process::exit(2);
        }
    };
    let config = match arg_value(&args, "--config") {
        None => GeneratorConfig::default(),
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GeneratorConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                eprintln!("cannot load config {}: {}", path, e);
                std::process::exit(2);
            }
        },
    };

    if let Some(id) = arg_value(&args, "--export") {
        export(&id, verbose);
        return;
    }

    println!("=== HomePlan Harness ===\n");

    let mut results = Vec::new();

    // 1. Procedural generation sweep
    results.extend(validate_generation(&config, base_seed, verbose));

    // 2. Built-in presets
    results.extend(validate_presets(verbose));

    // 3. Registry resolution & active plan
    results.extend(validate_registry(verbose));

    // 4. Neighborhood
    results.extend(validate_neighborhood(base_seed, verbose));

    // 5. Share envelopes
    results.extend(validate_sharing(verbose));

    // 6. Bounded stores
    results.extend(validate_stores(base_seed, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Print the share code for a registry plan and exit.
fn export(id: &str, verbose: bool) {
    let registry = match FloorPlanRegistry::builtin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("built-in catalog failed: {}", e);
            std::process::exit(1);
        }
    };
    let plan = registry.resolve(id);
    let envelope = export_floor_plan(&plan, "1970-01-01T00:00:00Z");
    if verbose {
        match serde_json::to_string_pretty(&envelope) {
            Ok(json) => eprintln!("{}", json),
            Err(e) => eprintln!("cannot render envelope: {}", e),
        }
    }
    match encode(&envelope) {
        Ok(code) => println!("{}", code),
        Err(e) => {
            eprintln!("cannot encode {}: {}", plan.id, e);
            std::process::exit(1);
        }
    }
}

fn error_count(plan: &FloorPlanPreset) -> usize {
    validate_plan(plan)
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count()
}

// ── 1. Generation ───────────────────────────────────────────────────────

fn validate_generation(config: &GeneratorConfig, base_seed: u32, verbose: bool) -> Vec<TestResult> {
    println!("--- Procedural Generation ---");
    let mut results = Vec::new();

    let config_errors = config.validate();
    results.push(TestResult {
        name: "gen_config_valid".into(),
        passed: config_errors.is_empty(),
        detail: if config_errors.is_empty() {
            format!("rooms {}..={}", config.min_rooms, config.max_rooms)
        } else {
            format!("{:?}", config_errors)
        },
    });
    if !config_errors.is_empty() {
        return results;
    }

    let generator = FloorPlanGenerator::new(TemplateCatalog::standard(), config.clone());
    let mut plans = Vec::new();
    let mut gen_failures = Vec::new();
    for seed in base_seed..base_seed.saturating_add(SWEEP_SEEDS) {
        match generator.generate_seeded(seed) {
            Ok(plan) => plans.push((seed, plan)),
            Err(e) => gen_failures.push(format!("seed {}: {}", seed, e)),
        }
    }
    results.push(TestResult {
        name: "gen_all_seeds".into(),
        passed: gen_failures.is_empty(),
        detail: if gen_failures.is_empty() {
            format!("{} plans generated", plans.len())
        } else {
            gen_failures.join("; ")
        },
    });

    let invalid: Vec<u32> = plans
        .iter()
        .filter(|(_, p)| error_count(p) > 0)
        .map(|(s, _)| *s)
        .collect();
    results.push(TestResult {
        name: "gen_structurally_valid".into(),
        passed: invalid.is_empty(),
        detail: if invalid.is_empty() {
            "no validation errors".into()
        } else {
            format!("invalid seeds: {:?}", invalid)
        },
    });

    let disconnected: Vec<u32> = plans
        .iter()
        .filter(|(_, p)| !WaypointGraph::new(&p.waypoints).is_connected())
        .map(|(s, _)| *s)
        .collect();
    results.push(TestResult {
        name: "gen_waypoints_connected".into(),
        passed: disconnected.is_empty(),
        detail: format!("{} disconnected graphs", disconnected.len()),
    });

    let bad_count: Vec<u32> = plans
        .iter()
        .filter(|(_, p)| {
            let rooms = p.rooms.iter().filter(|r| r.id != HALLWAY_ID).count();
            let doors = p.waypoints.iter().filter(|w| w.pause_at_doorway).count();
            !(config.min_rooms..=config.max_rooms).contains(&rooms) || doors != rooms
        })
        .map(|(s, _)| *s)
        .collect();
    results.push(TestResult {
        name: "gen_room_and_door_counts".into(),
        passed: bad_count.is_empty(),
        detail: if bad_count.is_empty() {
            "one doorway per room, count in range".into()
        } else {
            format!("bad seeds: {:?}", bad_count)
        },
    });

    let repeat = generator.generate_seeded(base_seed).ok();
    let first = plans.first().map(|(_, p)| p);
    results.push(TestResult {
        name: "gen_deterministic".into(),
        passed: repeat.is_some() && repeat.as_ref() == first,
        detail: format!("seed {} regenerates identically", base_seed),
    });

    let unique_ids: HashSet<&str> = plans.iter().map(|(_, p)| p.id.as_str()).collect();
    results.push(TestResult {
        name: "gen_unique_plan_ids".into(),
        passed: unique_ids.len() == plans.len(),
        detail: format!("{} distinct ids over {} plans", unique_ids.len(), plans.len()),
    });

    // Known gap: row packing can leave unwalled voids. Reported, not failed.
    let with_voids = plans
        .iter()
        .filter(|(_, p)| !check_rooms_enclosed(p).is_empty())
        .count();
    results.push(TestResult {
        name: "gen_enclosure_report".into(),
        passed: true,
        detail: format!("{}/{} plans have unwalled room edges", with_voids, plans.len()),
    });

    if verbose {
        if let Some((seed, p)) = plans.first() {
            println!(
                "  seed {} → {}: {} rooms, {} walls, {} waypoints",
                seed,
                p.id,
                p.rooms.len(),
                p.walls.len(),
                p.waypoints.len()
            );
        }
    }

    results
}

// ── 2. Presets ──────────────────────────────────────────────────────────

fn validate_presets(verbose: bool) -> Vec<TestResult> {
    println!("--- Built-in Presets ---");
    let mut results = Vec::new();

    let registry = match FloorPlanRegistry::builtin() {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "presets_build".into(),
                passed: false,
                detail: format!("built-in catalog failed: {}", e),
            });
            return results;
        }
    };

    for id in BUILTIN_PLAN_IDS {
        let plan = registry.resolve(id);
        let errors = error_count(&plan);
        let connected = WaypointGraph::new(&plan.waypoints).is_connected();
        if verbose {
            println!(
                "  {}: {} floors, {} rooms, {} waypoints",
                id,
                plan.declared_floors().len(),
                plan.rooms.len(),
                plan.waypoints.len()
            );
        }
        results.push(TestResult {
            name: format!("preset_{}", id),
            passed: plan.id == id && errors == 0 && connected,
            detail: format!("{} errors, connected={}", errors, connected),
        });
    }

    let house = registry.resolve("house");
    let has_stairs = house.stairs.iter().any(|s| s.floors == (0, 1));
    results.push(TestResult {
        name: "preset_house_two_floors".into(),
        passed: house.declared_floors() == vec![0, 1] && has_stairs,
        detail: format!("floors {:?}, {} stairs", house.declared_floors(), house.stairs.len()),
    });

    let mut connector_ok = true;
    for plan in registry.list() {
        let stair_nodes = plan.waypoints.iter().filter(|w| w.is_stairs).count();
        let lift_nodes = plan.waypoints.iter().filter(|w| w.is_elevator).count();
        let served: usize = plan.elevators.iter().map(|e| e.floors.len()).sum();
        if stair_nodes != plan.stairs.len() * 2 || lift_nodes != served {
            connector_ok = false;
        }
    }
    results.push(TestResult {
        name: "preset_connector_nodes".into(),
        passed: connector_ok,
        detail: "one connector waypoint per served floor".into(),
    });

    results
}

// ── 3. Registry ─────────────────────────────────────────────────────────

fn validate_registry(_verbose: bool) -> Vec<TestResult> {
    println!("--- Registry ---");
    let mut results = Vec::new();

    let registry = match FloorPlanRegistry::builtin() {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "registry_build".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let fallback = registry.resolve("nonexistent-id");
    results.push(TestResult {
        name: "registry_fallback".into(),
        passed: fallback.id == DEFAULT_PLAN_ID,
        detail: format!("unknown id resolved to '{}'", fallback.id),
    });

    results.push(TestResult {
        name: "registry_strict_lookup".into(),
        passed: registry.try_resolve("nonexistent-id").is_err(),
        detail: "try_resolve rejects unknown ids".into(),
    });

    let extra = homeplan_logic::generate(77).ok();
    match registry.with_extra(extra.clone().into_iter().collect()) {
        Ok(extended) => {
            let found = extra
                .as_ref()
                .map(|p| extended.resolve(&p.id).id == p.id)
                .unwrap_or(false);
            results.push(TestResult {
                name: "registry_extra_plans".into(),
                passed: found && extended.list().len() == BUILTIN_PLAN_IDS.len() + 1,
                detail: format!("{} plans listed", extended.list().len()),
            });
        }
        Err(e) => results.push(TestResult {
            name: "registry_extra_plans".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    let shadow = registry.resolve("studio").as_ref().clone();
    results.push(TestResult {
        name: "registry_rejects_duplicate_ids".into(),
        passed: registry.with_extra(vec![shadow]).is_err(),
        detail: "a dynamic plan reusing 'studio' is refused".into(),
    });

    let active = ActivePlan::from_registry(&registry);
    let before = active.id();
    active.switch_to(&registry, "loft");
    results.push(TestResult {
        name: "registry_active_switch".into(),
        passed: before == DEFAULT_PLAN_ID && active.id() == "loft",
        detail: format!("{} → {}", before, active.id()),
    });

    results
}

// ── 4. Neighborhood ─────────────────────────────────────────────────────

fn validate_neighborhood(base_seed: u32, verbose: bool) -> Vec<TestResult> {
    println!("--- Neighborhood ---");
    let mut results = Vec::new();

    let a = generate_neighborhood(42);
    let b = generate_neighborhood(42);
    let (a, b) = match (a, b) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            results.push(TestResult {
                name: "neighborhood_generate".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "neighborhood_reproducible".into(),
        passed: a == b && a.len() == HOUSE_COUNT,
        detail: format!("seed 42 → {} houses", a.len()),
    });

    let slots: Vec<i32> = a.iter().map(|h| h.street_slot).collect();
    results.push(TestResult {
        name: "neighborhood_slots".into(),
        passed: slots == STREET_SLOTS,
        detail: format!("{:?}", slots),
    });

    let mut dupes = 0;
    let mut invalid = 0;
    for seed in base_seed..base_seed.saturating_add(SWEEP_SEEDS) {
        match generate_neighborhood(seed) {
            Ok(houses) => {
                let names: HashSet<&str> = houses.iter().map(|h| h.name.as_str()).collect();
                if names.len() != houses.len() {
                    dupes += 1;
                }
                for h in &houses {
                    let residents: HashSet<&str> = h.residents.iter().map(|r| r.name.as_str()).collect();
                    if residents.len() != h.residents.len() {
                        dupes += 1;
                    }
                    if error_count(&h.floor_plan) > 0 {
                        invalid += 1;
                    }
                }
            }
            Err(_) => invalid += 1,
        }
    }
    results.push(TestResult {
        name: "neighborhood_unique_names".into(),
        passed: dupes == 0,
        detail: format!("{} duplicate names over {} seeds", dupes, SWEEP_SEEDS),
    });
    results.push(TestResult {
        name: "neighborhood_plans_valid".into(),
        passed: invalid == 0,
        detail: format!("{} invalid neighbor plans", invalid),
    });

    if verbose {
        for h in &a {
            println!(
                "  {} {} (slot {}): {:?}, {} resident(s)",
                h.id,
                h.name,
                h.street_slot,
                h.layout,
                h.residents.len()
            );
        }
    }

    results
}

// ── 5. Sharing ──────────────────────────────────────────────────────────

fn validate_sharing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Sharing ---");
    let mut results = Vec::new();

    let round_trip = homeplan_logic::generate(21)
        .ok()
        .and_then(|plan| {
            let code = encode(&export_floor_plan(&plan, "2026-01-01T00:00:00Z")).ok()?;
            Some((plan, import_floor_plan(&code).ok()?))
        })
        .map(|(sent, received)| sent == received)
        .unwrap_or(false);
    results.push(TestResult {
        name: "share_round_trip".into(),
        passed: round_trip,
        detail: "generated plan survives encode/import".into(),
    });

    let rejects = ["", "%%%", "bm90IGpzb24=", "eyJ0eXBlIjoiZmxvb3ItcGxhbiJ9"]
        .iter()
        .all(|code| decode(code).is_none());
    results.push(TestResult {
        name: "share_rejects_garbage".into(),
        passed: rejects,
        detail: "malformed codes decode to nothing".into(),
    });

    let gallery = gallery_robot_builds();
    let gallery_ok = gallery.iter().all(|env| {
        encode(env)
            .ok()
            .and_then(|code| decode(&code))
            .map(|back| &back == env)
            .unwrap_or(false)
    });
    results.push(TestResult {
        name: "share_gallery_builds".into(),
        passed: !gallery.is_empty() && gallery_ok,
        detail: format!("{} gallery builds round-trip", gallery.len()),
    });

    let plans = gallery_floor_plans();
    let (passed, detail) = match &plans {
        Ok(plans) => {
            let clean = plans.iter().all(|env| {
                let imported = match encode(env).and_then(|code| import_floor_plan(&code)) {
                    Ok(plan) => plan,
                    Err(_) => return false,
                };
                validate_plan(&imported)
                    .iter()
                    .all(|e| e.severity != Severity::Error)
            });
            (clean && plans.len() == 2, format!("{} gallery plans import clean", plans.len()))
        }
        Err(e) => (false, e.to_string()),
    };
    results.push(TestResult {
        name: "share_gallery_plans".into(),
        passed,
        detail,
    });

    results
}

// ── 6. Stores ───────────────────────────────────────────────────────────

fn validate_stores(base_seed: u32, _verbose: bool) -> Vec<TestResult> {
    println!("--- Stores ---");
    let mut results = Vec::new();

    let mut store = CustomPlanStore::custom_plans();
    let mut evicted = 0;
    for seed in base_seed..base_seed.saturating_add(CUSTOM_PLAN_CAPACITY as u32 + 2) {
        if let Ok(plan) = homeplan_logic::generate(seed) {
            evicted += store.push(plan).len();
        }
    }
    results.push(TestResult {
        name: "store_custom_capacity".into(),
        passed: store.len() == CUSTOM_PLAN_CAPACITY && evicted == 2,
        detail: format!("{} kept, {} evicted", store.len(), evicted),
    });

    let restored = store
        .to_json()
        .map(|json| CustomPlanStore::from_json(&json, CUSTOM_PLAN_CAPACITY))
        .ok();
    results.push(TestResult {
        name: "store_persist_restore".into(),
        passed: restored.as_ref() == Some(&store),
        detail: "custom plans survive a JSON round trip".into(),
    });

    let corrupt = CustomPlanStore::from_json("{broken", CUSTOM_PLAN_CAPACITY);
    results.push(TestResult {
        name: "store_corrupt_input".into(),
        passed: corrupt.is_empty(),
        detail: "unreadable storage yields an empty store".into(),
    });

    let mut shared = SharedCreations::shared_creations();
    for (i, env) in gallery_robot_builds().into_iter().cycle().take(SHARED_CREATIONS_CAPACITY + 5).enumerate() {
        shared.push(SharedCreation::new(format!("share-{}", i), "2026-01-01T00:00:00Z", env));
    }
    results.push(TestResult {
        name: "store_shared_capacity".into(),
        passed: shared.len() == SHARED_CREATIONS_CAPACITY,
        detail: format!("{} shared creations kept", shared.len()),
    });

    results
}
