//! Waypoint graph construction and traversal.
//!
//! Graphs are built in two passes. Callers first declare nodes, links and
//! stairs/elevator connectors on a [`WaypointGraphBuilder`]; `build()` then
//! resolves connector attachment, checks every reference and emits an
//! immutable, symmetric `Vec<Waypoint>`. Nothing mutates a published graph.
//!
//! [`WaypointGraph`] is a read-only adjacency view over a finished waypoint
//! list, used for reachability checks.

use crate::error::PlanError;
use crate::model::{ElevatorDef, StairsDef, Waypoint};
use std::collections::{HashMap, HashSet, VecDeque};

/// Role of a node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Room center or any other plain stop.
    Room,
    /// Hallway spine node. Connectors attach to the nearest one.
    Hallway,
    /// Doorway node; agents pause when crossing it.
    Doorway,
    Stairs,
    Elevator,
}

#[derive(Debug, Clone)]
struct PendingNode {
    id: String,
    pos: [f32; 2],
    floor: i32,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum Connector {
    Stairs(StairsDef),
    Elevator(ElevatorDef),
}

/// Two-pass builder for a (possibly multi-floor) waypoint graph.
#[derive(Debug, Default)]
pub struct WaypointGraphBuilder {
    nodes: Vec<PendingNode>,
    index: HashMap<String, usize>,
    links: Vec<(String, String)>,
    connectors: Vec<Connector>,
    duplicates: Vec<String>,
}

impl WaypointGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node. Duplicate ids are reported by `build()`.
    pub fn node(&mut self, id: impl Into<String>, pos: [f32; 2], floor: i32, kind: NodeKind) -> &mut Self {
        let id = id.into();
        if self.index.contains_key(&id) {
            self.duplicates.push(id);
            return self;
        }
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(PendingNode { id, pos, floor, kind });
        self
    }

    /// Declare an undirected edge. Endpoints may be declared later.
    pub fn link(&mut self, a: impl Into<String>, b: impl Into<String>) -> &mut Self {
        self.links.push((a.into(), b.into()));
        self
    }

    /// Link consecutive ids into a chain.
    pub fn chain<S: AsRef<str>>(&mut self, ids: &[S]) -> &mut Self {
        for pair in ids.windows(2) {
            self.link(pair[0].as_ref(), pair[1].as_ref());
        }
        self
    }

    /// Import an existing single-floor waypoint list, keeping its edges.
    /// Nodes for which `is_hub` holds become hallway hubs.
    pub fn import_floor<F>(&mut self, floor: i32, waypoints: &[Waypoint], is_hub: F) -> &mut Self
    where
        F: Fn(&Waypoint) -> bool,
    {
        for w in waypoints {
            let kind = if is_hub(w) {
                NodeKind::Hallway
            } else if w.is_stairs {
                NodeKind::Stairs
            } else if w.is_elevator {
                NodeKind::Elevator
            } else if w.pause_at_doorway {
                NodeKind::Doorway
            } else {
                NodeKind::Room
            };
            self.node(w.id.clone(), w.pos, floor, kind);
            for c in &w.connections {
                self.link(w.id.clone(), c.clone());
            }
        }
        self
    }

    /// Register stairs; one connector node per floor is added at build time.
    pub fn stairs(&mut self, def: &StairsDef) -> &mut Self {
        self.connectors.push(Connector::Stairs(def.clone()));
        self
    }

    /// Register an elevator; one connector node per served floor is added.
    pub fn elevator(&mut self, def: &ElevatorDef) -> &mut Self {
        self.connectors.push(Connector::Elevator(def.clone()));
        self
    }

    /// Resolve connectors, validate references and emit the graph.
    pub fn build(mut self) -> Result<Vec<Waypoint>, PlanError> {
        if let Some(id) = self.duplicates.first() {
            return Err(PlanError::DuplicateId {
                kind: "waypoint",
                id: id.clone(),
            });
        }

        // Connector nodes attach to hubs declared by the caller only.
        let hubs: Vec<PendingNode> = self
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Hallway)
            .cloned()
            .collect();
        let connectors = std::mem::take(&mut self.connectors);
        let (mut stairs_n, mut elevator_n) = (0usize, 0usize);
        for connector in &connectors {
            let (prefix, n, kind, position, floors) = match connector {
                Connector::Stairs(def) => {
                    stairs_n += 1;
                    ("stairs", stairs_n - 1, NodeKind::Stairs, def.position, vec![def.floors.0, def.floors.1])
                }
                Connector::Elevator(def) => {
                    elevator_n += 1;
                    ("elevator", elevator_n - 1, NodeKind::Elevator, def.position, def.floors.clone())
                }
            };
            let pos = [position[0], position[2]];
            let ids: Vec<String> = floors
                .iter()
                .map(|f| format!("{}-{}-f{}", prefix, n, f))
                .collect();
            for (id, &floor) in ids.iter().zip(&floors) {
                let hub = nearest_hub(&hubs, floor, pos).ok_or(PlanError::MissingFloorHub { floor })?;
                log::debug!("{} attached to hub {} on floor {}", id, hub, floor);
                self.node(id.clone(), pos, floor, kind);
                self.link(id.clone(), hub);
            }
            for (i, a) in ids.iter().enumerate() {
                for b in &ids[i + 1..] {
                    self.link(a.clone(), b.clone());
                }
            }
        }
        if let Some(id) = self.duplicates.first() {
            return Err(PlanError::DuplicateId {
                kind: "waypoint",
                id: id.clone(),
            });
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (a, b) in &self.links {
            let ia = *self.index.get(a).ok_or_else(|| PlanError::DanglingConnection {
                from: b.clone(),
                to: a.clone(),
            })?;
            let ib = *self.index.get(b).ok_or_else(|| PlanError::DanglingConnection {
                from: a.clone(),
                to: b.clone(),
            })?;
            if ia == ib {
                log::debug!("ignoring self-link on waypoint {}", a);
                continue;
            }
            if !adjacency[ia].contains(&ib) {
                adjacency[ia].push(ib);
            }
            if !adjacency[ib].contains(&ia) {
                adjacency[ib].push(ia);
            }
        }

        let multi_floor = self.nodes.iter().any(|n| n.floor != 0);
        let waypoints = self
            .nodes
            .iter()
            .zip(&adjacency)
            .map(|(n, adj)| Waypoint {
                id: n.id.clone(),
                pos: n.pos,
                connections: adj.iter().map(|&i| self.nodes[i].id.clone()).collect(),
                floor: multi_floor.then_some(n.floor),
                pause_at_doorway: n.kind == NodeKind::Doorway,
                is_stairs: n.kind == NodeKind::Stairs,
                is_elevator: n.kind == NodeKind::Elevator,
            })
            .collect();
        Ok(waypoints)
    }
}

fn nearest_hub(hubs: &[PendingNode], floor: i32, pos: [f32; 2]) -> Option<String> {
    let dist = |n: &PendingNode| {
        let dx = n.pos[0] - pos[0];
        let dz = n.pos[1] - pos[1];
        dx * dx + dz * dz
    };
    hubs.iter()
        .filter(|n| n.floor == floor)
        .fold(None, |best: Option<&PendingNode>, n| match best {
            Some(b) if dist(b) <= dist(n) => Some(b),
            _ => Some(n),
        })
        .map(|n| n.id.clone())
}

/// Merge independently built per-floor graphs into one multi-floor graph
/// joined by the given connectors. `is_hub` selects the nodes connectors
/// may attach to.
pub fn merge_floor_graphs<F>(
    floors: &[(i32, Vec<Waypoint>)],
    stairs: &[StairsDef],
    elevators: &[ElevatorDef],
    is_hub: F,
) -> Result<Vec<Waypoint>, PlanError>
where
    F: Fn(&Waypoint) -> bool,
{
    let mut builder = WaypointGraphBuilder::new();
    for (floor, waypoints) in floors {
        builder.import_floor(*floor, waypoints, &is_hub);
    }
    for s in stairs {
        builder.stairs(s);
    }
    for e in elevators {
        builder.elevator(e);
    }
    builder.build()
}

// ── Read-only traversal ─────────────────────────────────────────────────

/// Adjacency view over a finished waypoint list.
pub struct WaypointGraph<'a> {
    adj: HashMap<&'a str, Vec<&'a str>>,
    order: Vec<&'a str>,
}

impl<'a> WaypointGraph<'a> {
    /// Build the view. Connections are taken as listed; unknown ids are
    /// kept as edges but never become nodes.
    pub fn new(waypoints: &'a [Waypoint]) -> Self {
        let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut order = Vec::with_capacity(waypoints.len());
        for w in waypoints {
            order.push(w.id.as_str());
            adj.entry(w.id.as_str())
                .or_default()
                .extend(w.connections.iter().map(|c| c.as_str()));
        }
        Self { adj, order }
    }

    pub fn neighbors(&self, id: &str) -> &[&'a str] {
        self.adj.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Every node reachable from `start` by breadth-first traversal.
    pub fn reachable_from(&self, start: &str) -> HashSet<&'a str> {
        let mut visited = HashSet::new();
        let Some((&start, _)) = self.adj.get_key_value(start) else {
            return visited;
        };
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if self.adj.contains_key(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// True when one traversal from the first node reaches every node.
    pub fn is_connected(&self) -> bool {
        match self.order.first() {
            Some(first) => self.reachable_from(first).len() == self.order.len(),
            None => true,
        }
    }

    /// Nodes a traversal from the first node fails to reach.
    pub fn unreachable(&self) -> Vec<&'a str> {
        let Some(first) = self.order.first() else {
            return Vec::new();
        };
        let reached = self.reachable_from(first);
        self.order
            .iter()
            .filter(|id| !reached.contains(*id))
            .copied()
            .collect()
    }
}
