/// The two workflow shapes submitted for imports
///
/// One-shot:  start -> import -> end
///
/// Recurring: start -> decision (flag file exists?)
///   yes: [cleanup ->] exec -> end
///   no:  create -> flag -> exec -> end
///
/// Every non-decision node routes errors to the kill node.

use crate::error::GraphError;
use crate::import::command::{SqoopCommand, DRIVER_PROPERTIES_FILE};
use crate::workflow::{ActionNode, DecisionNode, FsNode, Node, Workflow, WorkflowBuilder, END_NODE};

/// Marker file whose presence means the saved job already exists
pub const FLAG_FILE: &str = "sqoop-create";

/// Engine-resolved token standing in for the import target directory
pub const TARGET_DIR_PLACEHOLDER: &str = "${targetDir}";

pub fn one_shot_workflow(name: &str, import: &SqoopCommand) -> Result<Workflow, GraphError> {
    let import_node = format!("{}-import", name);

    WorkflowBuilder::new()
        .name(format!("{}-app", name))
        .start(&import_node)
        .node(
            ActionNode::new(&import_node, import.to_string())
                .with_file(DRIVER_PROPERTIES_FILE)
                .then(END_NODE),
        )
        .build()
}

/// Saved-job workflow guarded by a flag file at `flag_path`
///
/// With `overwrite` the previous import under the target directory is
/// deleted before each run of the saved job.
pub fn recurring_workflow(
    name: &str,
    flag_path: &str,
    overwrite: bool,
    create: &SqoopCommand,
    exec: &SqoopCommand,
) -> Result<Workflow, GraphError> {
    let decision = format!("{}-decision", name);
    let create_node = format!("{}-create", name);
    let flag = format!("{}-flag", name);
    let cleanup = format!("{}-cleanup", name);
    let exec_node = format!("{}-exec", name);

    let existing_job_next = if overwrite { &cleanup } else { &exec_node };

    let mut builder = WorkflowBuilder::new()
        .name(format!("{}-app", name))
        .start(&decision)
        .node(DecisionNode::path_exists(&decision, flag_path, existing_job_next, &create_node))
        .node(
            ActionNode::new(&create_node, create.to_string())
                .with_file(DRIVER_PROPERTIES_FILE)
                .then(&flag),
        )
        .node(Node::CreateFile(FsNode::new(&flag, flag_path, &exec_node)));

    if overwrite {
        builder = builder.node(Node::DeleteFile(FsNode::new(
            &cleanup,
            TARGET_DIR_PLACEHOLDER,
            &exec_node,
        )));
    }

    builder
        .node(
            ActionNode::new(&exec_node, exec.to_string())
                .with_file(DRIVER_PROPERTIES_FILE)
                .then(END_NODE),
        )
        .build()
}
