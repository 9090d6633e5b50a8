//! Force-directed layout engine.
//!
//! This module implements a spring-embedder layout for class diagrams. It
//! uses a physics simulation to position nodes based on a system of
//! attractive and repulsive forces, then centers the result and rescales it
//! so coordinates span roughly ±scale.

use std::collections::{HashMap, HashSet};

use log::debug;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::{RngExt, SeedableRng, rngs::{StdRng, SysRng}};

use armature_core::{
    identifier::Ptr,
    model::{Diagram, Position},
};

/// Upper bound on simulation iterations, whatever the configuration says.
const MAX_ITERATIONS: usize = 1_000;

/// Force layout engine for class diagrams.
///
/// The simulation applies pairwise repulsion between all nodes, spring
/// attraction along edges, and velocity damping. Without a seed the initial
/// placement is random and the embedding is non-deterministic; seeding makes
/// it reproducible for a fixed node ordering.
pub struct Engine {
    // Simulation parameters
    iterations: usize,
    spring_constant: f32,
    repulsion_constant: f32,
    damping_factor: f32,
    // Used for maintaining distance between nodes
    min_distance: f32,
    // Half-extent of the final coordinate range
    scale: f32,
    seed: Option<u64>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new force layout engine with default parameters.
    pub fn new() -> Self {
        Self {
            iterations: 100,
            spring_constant: 0.1,
            repulsion_constant: 1000.0,
            damping_factor: 0.85,
            min_distance: 80.0,
            scale: 500.0,
            seed: None,
        }
    }

    /// Set the number of iterations for the force simulation.
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the spring constant for edge forces.
    pub fn set_spring_constant(&mut self, constant: f32) -> &mut Self {
        self.spring_constant = constant;
        self
    }

    /// Set the repulsion constant for node forces.
    pub fn set_repulsion_constant(&mut self, constant: f32) -> &mut Self {
        self.repulsion_constant = constant;
        self
    }

    /// Set the damping factor for the simulation.
    pub fn set_damping_factor(&mut self, factor: f32) -> &mut Self {
        self.damping_factor = factor;
        self
    }

    /// Set the minimum distance between nodes.
    pub fn set_min_distance(&mut self, distance: f32) -> &mut Self {
        self.min_distance = distance;
        self
    }

    /// Set the half-extent of the final coordinate range.
    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Seed the position initializer for reproducible embeddings.
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Compute positions for every node of the diagram.
    ///
    /// Edges are taken as undirected connections regardless of relationship
    /// kind; parallel edges and self-loops contribute nothing extra.
    pub fn compute(&self, diagram: &Diagram) -> HashMap<Ptr, Position> {
        if diagram.nodes.is_empty() {
            return HashMap::new();
        }

        let graph = undirected_graph(diagram);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Running force layout"
        );

        let mut positions = self.initialize_positions(&graph);
        self.run_simulation(&graph, &mut positions);
        center_positions(&mut positions);
        self.rescale_positions(&mut positions);

        graph
            .node_indices()
            .map(|idx| {
                let (x, y) = positions[&idx];
                (
                    graph[idx],
                    Position::new(x.round() as i32, y.round() as i32),
                )
            })
            .collect()
    }

    /// Compute positions and write them into the diagram.
    ///
    /// Only node positions change; the node and edge sets are untouched.
    pub fn apply(&self, diagram: &mut Diagram) {
        let positions = self.compute(diagram);
        for node in &mut diagram.nodes {
            if let Some(position) = positions.get(&node.id) {
                node.data.position = *position;
            }
        }
    }

    /// Place nodes on a jittered grid as the simulation's starting state.
    fn initialize_positions(&self, graph: &UnGraph<Ptr, ()>) -> HashMap<NodeIndex, (f32, f32)> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::try_from_rng(&mut SysRng).expect("OS RNG unavailable"),
        };

        let node_count = graph.node_count();
        let grid_size = (node_count as f32).sqrt().ceil() as usize;
        let cell_size = self.min_distance * 1.5;

        graph
            .node_indices()
            .enumerate()
            .map(|(i, idx)| {
                let row = i / grid_size;
                let col = i % grid_size;

                let base_x = col as f32 * cell_size;
                let base_y = row as f32 * cell_size;

                // Jitter breaks the perfect grid so forces have a direction
                // to act along.
                let jitter_x = rng.random_range(-20.0..20.0);
                let jitter_y = rng.random_range(-20.0..20.0);

                (idx, (base_x + jitter_x, base_y + jitter_y))
            })
            .collect()
    }

    /// Run the spring simulation over the initialized positions.
    fn run_simulation(
        &self,
        graph: &UnGraph<Ptr, ()>,
        positions: &mut HashMap<NodeIndex, (f32, f32)>,
    ) {
        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        let mut velocities: HashMap<NodeIndex, (f32, f32)> =
            nodes.iter().map(|&idx| (idx, (0.0, 0.0))).collect();

        for _ in 0..self.iterations.min(MAX_ITERATIONS) {
            let mut forces: HashMap<NodeIndex, (f32, f32)> =
                nodes.iter().map(|&idx| (idx, (0.0, 0.0))).collect();

            // Repulsive forces between all node pairs.
            for &node_i in &nodes {
                for &node_j in &nodes {
                    if node_i == node_j {
                        continue;
                    }

                    let (xi, yi) = positions[&node_i];
                    let (xj, yj) = positions[&node_j];
                    let dx = xi - xj;
                    let dy = yi - yj;

                    // Avoid division by zero
                    let distance = dx.hypot(dy).max(1.0);

                    // Stronger repulsion when nodes are too close
                    let force_factor = if distance < self.min_distance {
                        self.repulsion_constant * (self.min_distance / distance).powf(2.0)
                    } else {
                        self.repulsion_constant / distance
                    };

                    let force_x = force_factor * dx / distance;
                    let force_y = force_factor * dy / distance;

                    let (fx, fy) = forces[&node_i];
                    forces.insert(node_i, (fx + force_x, fy + force_y));
                }
            }

            // Attractive spring forces along edges.
            for edge in graph.edge_indices() {
                let (source, target) = graph
                    .edge_endpoints(edge)
                    .expect("edge indices come from the graph itself");

                let (xs, ys) = positions[&source];
                let (xt, yt) = positions[&target];
                let dx = xs - xt;
                let dy = ys - yt;

                let distance = dx.hypot(dy).max(1.0);

                // Spring force proportional to distance
                let force = self.spring_constant * distance;
                let force_x = force * dx / distance;
                let force_y = force * dy / distance;

                let (fx_source, fy_source) = forces[&source];
                forces.insert(source, (fx_source - force_x, fy_source - force_y));

                let (fx_target, fy_target) = forces[&target];
                forces.insert(target, (fx_target + force_x, fy_target + force_y));
            }

            // Update velocities and positions.
            for &idx in &nodes {
                let (force_x, force_y) = forces[&idx];
                let (vel_x, vel_y) = velocities[&idx];

                let new_vel_x = (vel_x + force_x) * self.damping_factor;
                let new_vel_y = (vel_y + force_y) * self.damping_factor;
                velocities.insert(idx, (new_vel_x, new_vel_y));

                let (x, y) = positions[&idx];
                positions.insert(idx, (x + new_vel_x, y + new_vel_y));
            }
        }
    }

    /// Rescale positions so the farthest coordinate sits at ±scale.
    fn rescale_positions(&self, positions: &mut HashMap<NodeIndex, (f32, f32)>) {
        let max_extent = positions
            .values()
            .map(|(x, y)| x.abs().max(y.abs()))
            .fold(0.0_f32, f32::max);

        if max_extent > 0.0 {
            let factor = self.scale / max_extent;
            for (x, y) in positions.values_mut() {
                *x *= factor;
                *y *= factor;
            }
        }
    }
}

/// Build the undirected simplification of the diagram's edge set: every
/// relationship becomes one plain connection, parallel edges collapse, and
/// self-loops are dropped.
fn undirected_graph(diagram: &Diagram) -> UnGraph<Ptr, ()> {
    let mut graph = UnGraph::new_undirected();
    let mut indices: HashMap<Ptr, NodeIndex> = HashMap::new();

    for node in &diagram.nodes {
        indices
            .entry(node.id)
            .or_insert_with(|| graph.add_node(node.id));
    }

    let mut seen: HashSet<(Ptr, Ptr)> = HashSet::new();
    for edge in &diagram.edges {
        if edge.source_ptr == edge.target_ptr {
            continue;
        }
        let (Some(&source), Some(&target)) = (
            indices.get(&edge.source_ptr),
            indices.get(&edge.target_ptr),
        ) else {
            // Dangling edges are an integrity concern, not a layout concern.
            continue;
        };
        let key = if edge.source_ptr < edge.target_ptr {
            (edge.source_ptr, edge.target_ptr)
        } else {
            (edge.target_ptr, edge.source_ptr)
        };
        if seen.insert(key) {
            graph.add_edge(source, target, ());
        }
    }

    graph
}

/// Center positions on the origin by shifting the bounding-box midpoint.
fn center_positions(positions: &mut HashMap<NodeIndex, (f32, f32)>) {
    if positions.is_empty() {
        return;
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;

    for (x, y) in positions.values() {
        min_x = min_x.min(*x);
        min_y = min_y.min(*y);
        max_x = max_x.max(*x);
        max_y = max_y.max(*y);
    }

    let center_x = (min_x + max_x) / 2.0;
    let center_y = (min_y + max_y) / 2.0;

    for (x, y) in positions.values_mut() {
        *x -= center_x;
        *y -= center_y;
    }
}
