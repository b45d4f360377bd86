//! Config model → abstract graph.
//!
//! Operators are processed in config order. For each one:
//! 1) register the operator node (its key must be new),
//! 2) wire trigger, input and latest channels into it (channels are created lazily),
//! 3) resolve each output to a node keyed by event name or, failing that, by hz,
//!    and wire the operator into it.

use super::{
    AbstractGraph, BuildError, Edge, EdgeKind, Lookup, Node, NodeId, NodeKey, NodeKind, NodeRegistry,
};
use crate::config::{DagConfig, OperatorConfig, OutputConfig};
use crate::style::{self, Label, StylePreset};

/// Build the abstract graph for `config`.
///
/// Pure: the same config always yields the same nodes and edges in the same order.
pub fn build(config: &DagConfig) -> Result<AbstractGraph, BuildError> {
    let mut builder = GraphBuilder::default();
    for op in &config.op {
        builder.add_operator(op)?;
    }

    let graph = AbstractGraph::from_parts(builder.nodes, builder.edges);
    tracing::info!(
        operators = config.op.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built DAG graph"
    );
    Ok(graph)
}

#[derive(Default)]
struct GraphBuilder {
    nodes: NodeRegistry,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    fn add_operator(&mut self, op: &OperatorConfig) -> Result<(), BuildError> {
        let key = op.node_key();
        let node = Node::new(
            NodeKey::Operator(key.clone()),
            NodeKind::Operator,
            style::operator_label(op),
            StylePreset::for_operator(op.is_bypassed()),
        );
        let op_id = self
            .nodes
            .insert_new(node)
            .map_err(|_| BuildError::DuplicateOperator {
                key: key.clone(),
                operator: op.name.clone(),
            })?;
        tracing::debug!(key = %key, bypass = op.is_bypassed(), "operator node");

        for name in &op.trigger {
            let channel = self.channel(name);
            self.edges.push(Edge::new(EdgeKind::Trigger, channel, op_id));
        }

        for (index, name) in op.input.iter().enumerate() {
            let channel = self.channel(name);
            let offset = op.input_offset_at(index);
            self.edges
                .push(Edge::new(EdgeKind::Input { offset }, channel, op_id));
        }

        for name in &op.latest {
            let channel = self.channel(name);
            self.edges.push(Edge::new(EdgeKind::Latest, channel, op_id));
        }

        for (index, output) in op.output.iter().enumerate() {
            let target = self.resolve_output(op, index, output)?;
            self.edges.push(Edge::new(EdgeKind::Output, op_id, target));
        }

        Ok(())
    }

    /// Channel node for `name`, created on first reference.
    fn channel(&mut self, name: &str) -> NodeId {
        let key = NodeKey::Channel(name.to_string());
        let lookup = self.nodes.lookup_or_create(&key, || {
            Node::new(
                key.clone(),
                NodeKind::Channel,
                Label::plain(name),
                StylePreset::Channel,
            )
        });
        if lookup.is_created() {
            tracing::debug!(channel = name, "channel node");
        }
        lookup.id()
    }

    fn resolve_output(
        &mut self,
        op: &OperatorConfig,
        index: usize,
        output: &OutputConfig,
    ) -> Result<NodeId, BuildError> {
        let (label, descriptor_count) = style::output_label(output);

        if !output.event.is_empty() {
            let key = NodeKey::Channel(output.event.clone());
            let preset = StylePreset::for_event_output(descriptor_count);
            return self.publish(key, label, preset, op, true);
        }

        if output.hz != 0 {
            let key = NodeKey::Channel(output.hz.to_string());
            return self.publish(key, label, StylePreset::OutputFrequency, op, false);
        }

        Err(BuildError::UnidentifiedOutput {
            operator: op.name.clone(),
            index,
        })
    }

    /// Register an output node under `key`.
    ///
    /// A plain channel already holding the key is upgraded in place. An existing
    /// output is reused only if it has the same preset; for event-keyed outputs
    /// (`strict`) the label must match as well. Event and frequency outputs never
    /// share a node, whichever comes first.
    fn publish(
        &mut self,
        key: NodeKey,
        label: Label,
        preset: StylePreset,
        producer: &OperatorConfig,
        strict: bool,
    ) -> Result<NodeId, BuildError> {
        let lookup = self.nodes.lookup_or_create(&key, || {
            Node::new(key.clone(), NodeKind::Output, label.clone(), preset)
        });

        let id = match lookup {
            Lookup::Created(id) => {
                tracing::debug!(output = %key, "output node");
                return Ok(id);
            }
            Lookup::Found(id) => id,
        };

        let node = self.nodes.get_mut(id);
        let kind = node.kind;
        match kind {
            NodeKind::Channel => {
                node.kind = NodeKind::Output;
                node.label = label;
                node.preset = preset;
                tracing::debug!(output = %key, "channel upgraded to output node");
            }
            NodeKind::Output if node.preset != preset || (strict && node.label != label) => {
                return Err(BuildError::ConflictingOutput {
                    key: key.to_string(),
                    operator: producer.name.clone(),
                });
            }
            _ => {}
        }
        Ok(id)
    }
}
