/// Workflow definition layer
///
/// Engine-facing definitions and their serialization:
/// - Node types (Sqoop action, decision, filesystem actions)
/// - Workflow graph builder with structural validation
/// - Coordinator builder for recurring triggers
/// - A small XML writer shared by both documents

pub mod builder;
pub mod coordinator;
pub mod types;
pub mod xml;

pub use builder::{Workflow, WorkflowBuilder};
pub use coordinator::{Coordinator, CoordinatorBuilder, DEFAULT_LIB_PATH};
pub use types::{ActionNode, DecisionNode, FsNode, Node, Predicate, END_NODE, KILL_NODE};
