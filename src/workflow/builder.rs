/// Workflow graph construction and serialization
///
/// Nodes are appended to an ordered list owned by the builder; insertion
/// order is serialization order. `build` converts the list into a petgraph
/// DAG to enforce the structural invariants before anything is written:
/// unique names, no dangling transitions, a single entry point and no cycles.

use crate::error::GraphError;
use crate::workflow::types::{Node, DEFAULT_KILL_MESSAGE, END_NODE, KILL_NODE};
use crate::workflow::xml::XmlWriter;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

const WORKFLOW_NS: &str = "uri:oozie:workflow:0.4";

/// A validated workflow graph, ready to serialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    name: String,
    start: String,
    kill_message: String,
    nodes: Vec<Node>,
}

impl Workflow {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// `workflow-app` document
    pub fn to_xml(&self) -> String {
        let mut xml = XmlWriter::new();
        xml.open("workflow-app", &[("name", self.name.as_str()), ("xmlns", WORKFLOW_NS)])
            .empty("start", &[("to", self.start.as_str())]);

        for node in &self.nodes {
            node.write_xml(&mut xml);
        }

        xml.open("kill", &[("name", KILL_NODE)])
            .text("message", &[], &self.kill_message)
            .close()
            .empty("end", &[("name", END_NODE)]);

        let doc = xml.finish();
        tracing::debug!("📄 Workflow '{}' XML:\n{}", self.name, doc);
        doc
    }
}

/// Collects nodes and enforces graph invariants on build
#[derive(Debug, Default)]
pub struct WorkflowBuilder {
    name: Option<String>,
    start: Option<String>,
    kill_message: Option<String>,
    nodes: Vec<Node>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn start(mut self, node_name: impl Into<String>) -> Self {
        self.start = Some(node_name.into());
        self
    }

    pub fn kill_message(mut self, message: impl Into<String>) -> Self {
        self.kill_message = Some(message.into());
        self
    }

    pub fn node(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn build(self) -> Result<Workflow, GraphError> {
        let name = self.name.ok_or(GraphError::MissingField("name"))?;
        let start = self.start.ok_or(GraphError::MissingField("start"))?;
        let kill_message = self
            .kill_message
            .unwrap_or_else(|| DEFAULT_KILL_MESSAGE.to_string());

        validate_graph(&start, &self.nodes)?;

        Ok(Workflow {
            name,
            start,
            kill_message,
            nodes: self.nodes,
        })
    }
}

fn is_terminal(name: &str) -> bool {
    name == END_NODE || name == KILL_NODE
}

/// Builds a petgraph DAG over the non-terminal nodes and checks it
fn validate_graph(start: &str, nodes: &[Node]) -> Result<(), GraphError> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut index_of: HashMap<&str, NodeIndex> = HashMap::new();

    for node in nodes {
        let name = node.name();
        if is_terminal(name) {
            return Err(GraphError::ReservedName(name.to_string()));
        }
        if index_of.contains_key(name) {
            return Err(GraphError::DuplicateNode(name.to_string()));
        }
        index_of.insert(name, graph.add_node(name));
    }

    let start_index = *index_of
        .get(start)
        .ok_or_else(|| GraphError::UnknownStart(start.to_string()))?;

    for node in nodes {
        let from = index_of[node.name()];
        for to in node.successors() {
            if is_terminal(to) {
                continue;
            }
            let target = index_of.get(to).ok_or_else(|| GraphError::DanglingTransition {
                from: node.name().to_string(),
                to: to.to_string(),
            })?;
            graph.update_edge(from, *target, ());
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        return Err(GraphError::Cycle(graph[cycle.node_id()].to_string()));
    }

    for index in graph.node_indices() {
        let has_predecessor = graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
            .is_some();
        match (index == start_index, has_predecessor) {
            (true, true) => return Err(GraphError::StartHasPredecessor(start.to_string())),
            (false, false) => return Err(GraphError::Orphan(graph[index].to_string())),
            _ => {}
        }
    }

    Ok(())
}
