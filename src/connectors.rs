//! Connector routing for the node chain.
//!
//! Connectors are never authored by the user. They are derived from the
//! registry order: node `i` connects to node `i + 1`, so `N` nodes always
//! produce `max(0, N - 1)` connectors.
//!
//! # Example
//!
//! ```ignore
//! use policy_canvas::{ConnectorRouter, NodeRegistry};
//!
//! let mut router = ConnectorRouter::new((180.0, 40.0), (0.0, 40.0));
//!
//! // Bind once - auto-syncs on every update
//! let model = Rc::new(VecModel::<ConnectorPath>::default());
//! router.bind_model(model.clone(), |c| ConnectorPath { path_commands: c.path_commands().into() });
//! window.set_connectors(ModelRc::from(model));
//!
//! // After any registry change
//! router.update(&registry);
//! ```

use crate::path::CubicBezier;
use crate::registry::{Node, NodeId, NodeRegistry};
use crate::sync::{ConcreteModelSyncer, ModelSyncer};
use slint::VecModel;
use std::rc::Rc;

/// A derived curve between two consecutive nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    from: NodeId,
    to: NodeId,
    curve: CubicBezier,
    path_commands: String,
}

impl Connector {
    /// Node the connector leaves from.
    pub fn source(&self) -> NodeId {
        self.from
    }

    /// Node the connector enters.
    pub fn target(&self) -> NodeId {
        self.to
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// SVG path commands for rendering.
    pub fn path_commands(&self) -> &str {
        &self.path_commands
    }
}

/// Compute the connectors for nodes in chain order.
///
/// # Arguments
/// * `nodes` - Nodes in creation order
/// * `source_anchor` - Offset of the outgoing anchor from a node's origin
/// * `target_anchor` - Offset of the incoming anchor from a node's origin
pub fn route_connectors(
    nodes: &[Node],
    source_anchor: (f32, f32),
    target_anchor: (f32, f32),
) -> Vec<Connector> {
    nodes
        .windows(2)
        .map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            let start = anchor(from, source_anchor);
            let end = anchor(to, target_anchor);
            let curve = CubicBezier::from_anchors(start, end);
            Connector {
                from: from.id(),
                to: to.id(),
                curve,
                path_commands: curve.to_path_commands(),
            }
        })
        .collect()
}

fn anchor(node: &Node, offset: (f32, f32)) -> (f32, f32) {
    let position = node.position();
    (position.x as f32 + offset.0, position.y as f32 + offset.1)
}

/// Keeps the connector set in step with a [`NodeRegistry`].
///
/// The full set is recomputed whenever the registry revision moves; there is
/// no incremental diffing.
pub struct ConnectorRouter {
    source_anchor: (f32, f32),
    target_anchor: (f32, f32),
    connectors: Vec<Connector>,
    /// Registry revision the connectors were computed from
    revision: Option<u64>,
    /// Optional auto-sync to Slint model
    syncer: Option<Box<dyn ModelSyncer<Connector>>>,
}

impl ConnectorRouter {
    pub fn new(source_anchor: (f32, f32), target_anchor: (f32, f32)) -> Self {
        Self {
            source_anchor,
            target_anchor,
            connectors: Vec::new(),
            revision: None,
            syncer: None,
        }
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// The model is filled immediately and then refreshed on every update that
    /// recomputes the connectors.
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Connector) -> P + 'static,
    {
        let syncer = ConcreteModelSyncer { model, constructor };
        ModelSyncer::<Connector>::sync(&syncer, &self.connectors);
        self.syncer = Some(Box::new(syncer));
    }

    /// Recompute connectors if the registry changed since the last call.
    ///
    /// Returns `true` if the connectors were rebuilt.
    pub fn update(&mut self, registry: &NodeRegistry) -> bool {
        if self.revision == Some(registry.revision()) {
            return false;
        }
        self.connectors = route_connectors(registry.nodes(), self.source_anchor, self.target_anchor);
        self.revision = Some(registry.revision());

        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.connectors);
        }
        true
    }

    /// Change the anchors and force a rebuild on the next update.
    pub fn set_anchors(&mut self, source_anchor: (f32, f32), target_anchor: (f32, f32)) {
        self.source_anchor = source_anchor;
        self.target_anchor = target_anchor;
        self.revision = None;
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPoint;
    use crate::palette::{Category, Template};
    use slint::Model;

    const SOURCE: (f32, f32) = (180.0, 40.0);
    const TARGET: (f32, f32) = (0.0, 40.0);

    fn template() -> Template {
        Template::new(Category::Network, "VPC Network", "Network")
    }

    fn registry_with(positions: &[(i32, i32)]) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        for &(x, y) in positions {
            registry.insert(&template(), GridPoint::new(x, y));
        }
        registry
    }

    // ========================================================================
    // route_connectors() - Chain Derivation
    // ========================================================================

    #[test]
    fn test_no_connectors_below_two_nodes() {
        assert!(route_connectors(&[], SOURCE, TARGET).is_empty());
        let registry = registry_with(&[(0, 0)]);
        assert!(route_connectors(registry.nodes(), SOURCE, TARGET).is_empty());
    }

    #[test]
    fn test_connector_count_is_n_minus_one() {
        for n in 2..8 {
            let positions: Vec<(i32, i32)> = (0..n).map(|i| (i * 240, 0)).collect();
            let registry = registry_with(&positions);
            assert_eq!(route_connectors(registry.nodes(), SOURCE, TARGET).len(), n as usize - 1);
        }
    }

    #[test]
    fn test_connectors_follow_creation_order() {
        let registry = registry_with(&[(480, 0), (0, 0), (240, 0)]);
        let connectors = route_connectors(registry.nodes(), SOURCE, TARGET);
        let ids: Vec<NodeId> = registry.iter().map(|n| n.id()).collect();

        assert_eq!(connectors[0].source(), ids[0]);
        assert_eq!(connectors[0].target(), ids[1]);
        assert_eq!(connectors[1].source(), ids[1]);
        assert_eq!(connectors[1].target(), ids[2]);
    }

    #[test]
    fn test_reference_curve() {
        // 300 and 450 sit on a 30px grid, not the default 24px one
        let mut registry = NodeRegistry::with_grid_unit(30);
        registry.insert(&template(), GridPoint::new(240, 300));
        registry.insert(&template(), GridPoint::new(600, 450));
        let connectors = route_connectors(registry.nodes(), SOURCE, TARGET);
        assert_eq!(connectors.len(), 1);

        let curve = connectors[0].curve();
        assert_eq!(curve.p0, (420.0, 340.0));
        assert_eq!(curve.p3, (600.0, 490.0));
        // Each control point keeps its own anchor's y
        assert_eq!(curve.p1.1, curve.p0.1);
        assert_eq!(curve.p2.1, curve.p3.1);
        // Both sit at the horizontal midpoint
        assert_eq!(curve.p1.0, 510.0);
        assert_eq!(curve.p2.0, 510.0);
        assert_eq!(connectors[0].path_commands(), "M 420 340 C 510 340 510 490 600 490");
    }

    // ========================================================================
    // ConnectorRouter - Recompute On Change
    // ========================================================================

    #[test]
    fn test_router_recomputes_only_on_revision_change() {
        let mut registry = registry_with(&[(0, 0), (240, 0)]);
        let mut router = ConnectorRouter::new(SOURCE, TARGET);

        assert!(router.update(&registry));
        assert!(!router.update(&registry));
        assert_eq!(router.len(), 1);

        let id = registry.nodes()[1].id();
        registry.set_position(id, GridPoint::new(240, 96)).unwrap();
        assert!(router.update(&registry));
        assert_eq!(router.connectors()[0].curve().p3, (240.0, 136.0));
    }

    #[test]
    fn test_router_tracks_add_and_remove() {
        let mut registry = registry_with(&[(0, 0), (240, 0)]);
        let mut router = ConnectorRouter::new(SOURCE, TARGET);
        router.update(&registry);

        registry.insert(&template(), GridPoint::new(480, 0));
        router.update(&registry);
        assert_eq!(router.len(), 2);

        let first = registry.nodes()[0].id();
        registry.remove(first).unwrap();
        router.update(&registry);
        assert_eq!(router.len(), 1);

        let last = registry.nodes()[0].id();
        registry.remove(last).unwrap();
        router.update(&registry);
        assert!(router.is_empty());
    }

    #[test]
    fn test_router_removing_middle_node_relinks_neighbours() {
        let mut registry = registry_with(&[(0, 0), (240, 0), (480, 0)]);
        let ids: Vec<NodeId> = registry.iter().map(|n| n.id()).collect();
        let mut router = ConnectorRouter::new(SOURCE, TARGET);

        registry.remove(ids[1]).unwrap();
        router.update(&registry);

        assert_eq!(router.len(), 1);
        assert_eq!(router.connectors()[0].source(), ids[0]);
        assert_eq!(router.connectors()[0].target(), ids[2]);
    }

    #[test]
    fn test_set_anchors_forces_rebuild() {
        let registry = registry_with(&[(0, 0), (240, 0)]);
        let mut router = ConnectorRouter::new(SOURCE, TARGET);
        router.update(&registry);

        router.set_anchors((200.0, 45.0), (0.0, 45.0));
        assert!(router.update(&registry));
        assert_eq!(router.connectors()[0].curve().p0, (200.0, 45.0));
    }

    #[test]
    fn test_bound_model_follows_updates() {
        let mut registry = registry_with(&[(0, 0), (240, 0)]);
        let mut router = ConnectorRouter::new(SOURCE, TARGET);
        let model: Rc<VecModel<String>> = Rc::new(VecModel::default());
        router.bind_model(model.clone(), |c| c.path_commands().to_string());

        router.update(&registry);
        assert_eq!(model.row_count(), 1);

        registry.insert(&template(), GridPoint::new(480, 0));
        router.update(&registry);
        assert_eq!(model.row_count(), 2);
        assert_eq!(
            model.row_data(1).unwrap(),
            "M 420 40 C 450 40 450 40 480 40"
        );
    }
}
