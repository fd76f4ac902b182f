//! Plan lookup and the active-plan holder.
//!
//! [`PlanCatalog`] is the immutable set of built-in plans, validated once at
//! construction. [`FloorPlanRegistry`] pairs a shared catalog with a
//! caller-supplied list of generated or imported plans and resolves ids
//! against both, falling back to the default plan. [`ActivePlan`] holds the
//! plan currently in use and swaps it wholesale.

use crate::error::PlanError;
use crate::model::FloorPlanPreset;
use crate::presets::{self, DEFAULT_PLAN_ID};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Validated, immutable set of built-in plans.
#[derive(Debug)]
pub struct PlanCatalog {
    plans: Vec<Arc<FloorPlanPreset>>,
    default_index: usize,
}

impl PlanCatalog {
    /// Build a catalog. Ids must be unique and `default_id` must be present.
    pub fn new(plans: Vec<FloorPlanPreset>, default_id: &str) -> Result<Self, PlanError> {
        let mut seen = HashSet::new();
        for p in &plans {
            if !seen.insert(p.id.as_str()) {
                return Err(PlanError::DuplicateId {
                    kind: "plan",
                    id: p.id.clone(),
                });
            }
        }
        let default_index = plans
            .iter()
            .position(|p| p.id == default_id)
            .ok_or_else(|| PlanError::UnresolvedPlanId(default_id.to_string()))?;
        Ok(Self {
            plans: plans.into_iter().map(Arc::new).collect(),
            default_index,
        })
    }

    /// The stock built-in presets with `house` as default.
    pub fn builtin() -> Result<Self, PlanError> {
        Self::new(presets::builtin_presets()?, DEFAULT_PLAN_ID)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<FloorPlanPreset>> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn default_plan(&self) -> &Arc<FloorPlanPreset> {
        &self.plans[self.default_index]
    }

    pub fn plans(&self) -> &[Arc<FloorPlanPreset>] {
        &self.plans
    }
}

/// Keyed lookup over the built-in catalog plus dynamic plans.
///
/// The registry is immutable; when the dynamic list changes, build a new
/// one with [`FloorPlanRegistry::with_extra`]. Every id, built-in or
/// dynamic, appears at most once.
#[derive(Debug, Clone)]
pub struct FloorPlanRegistry {
    catalog: Arc<PlanCatalog>,
    extra: Vec<Arc<FloorPlanPreset>>,
}

impl FloorPlanRegistry {
    /// Pair `catalog` with dynamic plans. Fails if a dynamic id repeats or
    /// collides with a built-in.
    pub fn new(catalog: Arc<PlanCatalog>, extra: Vec<FloorPlanPreset>) -> Result<Self, PlanError> {
        let mut seen: HashSet<&str> = catalog.plans().iter().map(|p| p.id.as_str()).collect();
        for p in &extra {
            if !seen.insert(p.id.as_str()) {
                return Err(PlanError::DuplicateId {
                    kind: "plan",
                    id: p.id.clone(),
                });
            }
        }
        Ok(Self {
            catalog,
            extra: extra.into_iter().map(Arc::new).collect(),
        })
    }

    /// Registry over the built-in catalog with no dynamic plans.
    pub fn builtin() -> Result<Self, PlanError> {
        Self::new(Arc::new(PlanCatalog::builtin()?), Vec::new())
    }

    /// A registry sharing this catalog with a different dynamic list.
    pub fn with_extra(&self, extra: Vec<FloorPlanPreset>) -> Result<Self, PlanError> {
        Self::new(Arc::clone(&self.catalog), extra)
    }

    pub fn catalog(&self) -> &Arc<PlanCatalog> {
        &self.catalog
    }

    /// Look up `id`, reporting a miss instead of falling back.
    pub fn try_resolve(&self, id: &str) -> Result<Arc<FloorPlanPreset>, PlanError> {
        self.catalog
            .get(id)
            .or_else(|| self.extra.iter().find(|p| p.id == id))
            .cloned()
            .ok_or_else(|| PlanError::UnresolvedPlanId(id.to_string()))
    }

    /// Look up `id`; unknown ids yield the default plan.
    pub fn resolve(&self, id: &str) -> Arc<FloorPlanPreset> {
        match self.try_resolve(id) {
            Ok(plan) => plan,
            Err(err) => {
                log::warn!("{}, using default plan '{}'", err, self.catalog.default_plan().id);
                Arc::clone(self.catalog.default_plan())
            }
        }
    }

    pub fn default_plan(&self) -> Arc<FloorPlanPreset> {
        Arc::clone(self.catalog.default_plan())
    }

    /// Built-ins first, then dynamic plans, each in their own order.
    pub fn list(&self) -> Vec<Arc<FloorPlanPreset>> {
        self.catalog
            .plans()
            .iter()
            .chain(&self.extra)
            .cloned()
            .collect()
    }
}

/// The plan currently in use.
///
/// Readers take an `Arc` snapshot and may keep it as long as they like;
/// switching installs a new `Arc` and never touches the old plan.
#[derive(Debug)]
pub struct ActivePlan {
    plan: RwLock<Arc<FloorPlanPreset>>,
}

impl ActivePlan {
    pub fn new(plan: Arc<FloorPlanPreset>) -> Self {
        Self {
            plan: RwLock::new(plan),
        }
    }

    /// Start from the registry's default plan.
    pub fn from_registry(registry: &FloorPlanRegistry) -> Self {
        Self::new(registry.default_plan())
    }

    pub fn current(&self) -> Arc<FloorPlanPreset> {
        Arc::clone(&self.plan.read())
    }

    pub fn id(&self) -> String {
        self.plan.read().id.clone()
    }

    /// Install `plan`, returning the previous one.
    pub fn replace(&self, plan: Arc<FloorPlanPreset>) -> Arc<FloorPlanPreset> {
        std::mem::replace(&mut *self.plan.write(), plan)
    }

    /// Resolve `id` and make it active. Returns the newly active plan.
    pub fn switch_to(&self, registry: &FloorPlanRegistry, id: &str) -> Arc<FloorPlanPreset> {
        let next = registry.resolve(id);
        let previous = self.replace(Arc::clone(&next));
        log::info!("active plan switched from '{}' to '{}'", previous.id, next.id);
        next
    }
}
