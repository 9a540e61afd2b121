/// Workflow node type definitions
///
/// The node set is closed: Sqoop actions, path-existence decisions and the
/// two filesystem actions. Each node is built on its own and handed to the
/// [`WorkflowBuilder`](crate::workflow::builder::WorkflowBuilder); nodes never
/// reference the graph that contains them.

use crate::workflow::xml::XmlWriter;

/// Name of the single node every error edge routes to
pub const KILL_NODE: &str = "fail";

/// Name of the implicit terminal node
pub const END_NODE: &str = "end";

/// Error message rendered inside the kill node
pub const DEFAULT_KILL_MESSAGE: &str = "Error message[${wf:errorMessage(wf:lastErrorNode())}]";

const SQOOP_ACTION_NS: &str = "uri:oozie:sqoop-action:0.3";

/// A workflow execution node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Runs one Sqoop command
    Action(ActionNode),
    /// Branches on a predicate
    Decision(DecisionNode),
    /// Creates an empty file (flag files)
    CreateFile(FsNode),
    /// Removes a path recursively
    DeleteFile(FsNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Action(n) => &n.name,
            Node::Decision(n) => &n.name,
            Node::CreateFile(n) | Node::DeleteFile(n) => &n.name,
        }
    }

    /// Every outgoing transition, error edges excluded
    pub fn successors(&self) -> Vec<&str> {
        match self {
            Node::Action(n) => vec![n.ok_to.as_str()],
            Node::Decision(n) => vec![n.then_to.as_str(), n.else_to.as_str()],
            Node::CreateFile(n) | Node::DeleteFile(n) => vec![n.ok_to.as_str()],
        }
    }

    /// Error transition; decisions cannot fail
    pub fn error_to(&self) -> Option<&str> {
        match self {
            Node::Decision(_) => None,
            _ => Some(KILL_NODE),
        }
    }

    pub(crate) fn write_xml(&self, xml: &mut XmlWriter) {
        match self {
            Node::Action(n) => {
                xml.open("action", &[("name", n.name.as_str())])
                    .open("sqoop", &[("xmlns", SQOOP_ACTION_NS)])
                    .text("job-tracker", &[], "${jobTracker}")
                    .text("name-node", &[], "${nameNode}")
                    .text("command", &[], &n.command);
                for file in &n.files {
                    xml.text("file", &[], file);
                }
                xml.close();
                write_transitions(xml, &n.ok_to);
                xml.close();
            }
            Node::Decision(n) => {
                xml.open("decision", &[("name", n.name.as_str())])
                    .open("switch", &[])
                    .text("case", &[("to", n.then_to.as_str())], &n.predicate.expression())
                    .empty("default", &[("to", n.else_to.as_str())])
                    .close()
                    .close();
            }
            Node::CreateFile(n) => write_fs(xml, n, "touchz"),
            Node::DeleteFile(n) => write_fs(xml, n, "delete"),
        }
    }
}

fn write_fs(xml: &mut XmlWriter, node: &FsNode, operation: &str) {
    xml.open("action", &[("name", node.name.as_str())])
        .open("fs", &[])
        .empty(operation, &[("path", node.path.as_str())])
        .close();
    write_transitions(xml, &node.ok_to);
    xml.close();
}

fn write_transitions(xml: &mut XmlWriter, ok_to: &str) {
    xml.empty("ok", &[("to", ok_to)])
        .empty("error", &[("to", KILL_NODE)]);
}

/// Sqoop action node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionNode {
    pub name: String,
    /// Full Sqoop command line, tool name first
    pub command: String,
    /// Files shipped to the action's working directory
    pub files: Vec<String>,
    pub ok_to: String,
}

impl ActionNode {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            files: Vec::new(),
            ok_to: END_NODE.to_string(),
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn then(mut self, to: impl Into<String>) -> Self {
        self.ok_to = to.into();
        self
    }
}

/// Boolean condition a decision branches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    PathExists(String),
}

impl Predicate {
    /// Engine expression language rendering
    pub fn expression(&self) -> String {
        match self {
            Predicate::PathExists(path) => format!("${{fs:exists(\"{}\") eq true}}", path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionNode {
    pub name: String,
    pub predicate: Predicate,
    pub then_to: String,
    pub else_to: String,
}

impl DecisionNode {
    pub fn path_exists(
        name: impl Into<String>,
        path: impl Into<String>,
        then_to: impl Into<String>,
        else_to: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Predicate::PathExists(path.into()),
            then_to: then_to.into(),
            else_to: else_to.into(),
        }
    }
}

/// Filesystem action on a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsNode {
    pub name: String,
    pub path: String,
    pub ok_to: String,
}

impl FsNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>, ok_to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ok_to: ok_to.into(),
        }
    }
}

impl From<ActionNode> for Node {
    fn from(node: ActionNode) -> Self {
        Node::Action(node)
    }
}

impl From<DecisionNode> for Node {
    fn from(node: DecisionNode) -> Self {
        Node::Decision(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_exists_expression() {
        let p = Predicate::PathExists("/org/1/oozie-jobs/j/sqoop-create".into());
        assert_eq!(
            p.expression(),
            "${fs:exists(\"/org/1/oozie-jobs/j/sqoop-create\") eq true}"
        );
    }

    #[test]
    fn decisions_have_no_error_edge() {
        let decision: Node = DecisionNode::path_exists("d", "/flag", "a", "b").into();
        assert_eq!(decision.error_to(), None);
        assert_eq!(decision.successors(), vec!["a", "b"]);

        let delete = Node::DeleteFile(FsNode::new("c", "/t", "a"));
        assert_eq!(delete.error_to(), Some(KILL_NODE));
    }

    #[test]
    fn action_xml_layout() {
        let node: Node = ActionNode::new("x-import", "import --table t")
            .with_file("driver.properties")
            .into();
        let mut xml = XmlWriter::new();
        node.write_xml(&mut xml);

        assert_eq!(
            xml.finish(),
            "<action name=\"x-import\">\n\
             \x20 <sqoop xmlns=\"uri:oozie:sqoop-action:0.3\">\n\
             \x20   <job-tracker>${jobTracker}</job-tracker>\n\
             \x20   <name-node>${nameNode}</name-node>\n\
             \x20   <command>import --table t</command>\n\
             \x20   <file>driver.properties</file>\n\
             \x20 </sqoop>\n\
             \x20 <ok to=\"end\"/>\n\
             \x20 <error to=\"fail\"/>\n\
             </action>\n"
        );
    }
}
