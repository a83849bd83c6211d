//! Retained widget tree backing the event table.
//!
//! An arena of nodes mirroring the structure the controller manipulates:
//! one table body holding rows, each row holding cells, each cell holding
//! text or an input, plus action-tagged buttons. Node ids stay valid for
//! the lifetime of the tree; detaching a node only unlinks it.

/// Index of a node within the tree arena
pub type NodeId = usize;

/// Interaction state of a row, carried explicitly alongside its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Display row with Edit and Delete buttons
    View,
    /// Input cells with a Save button; no Cancel in edit mode
    Editing,
    /// Blank input cells with Save and Cancel buttons; no identity marker
    AddingNew,
}

/// Role of a cell within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    EventName,
    StartDate,
    EndDate,
    Actions,
}

/// The UI action surface, one tag per interactive element.
///
/// Dispatch happens by inspecting the tag of the clicked element from a
/// single registration point, never by per-element handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddEvent,
    SaveAdd,
    CancelAdd,
    Delete,
    Edit,
    SaveEdit,
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    TableBody,
    AddEventButton,
    Row {
        /// `event_<id>` for rows backed by a confirmed event, absent for
        /// adding-new rows
        marker: Option<String>,
        state: RowState,
    },
    Cell(CellRole),
    Text(String),
    Input {
        value: String,
    },
    Button {
        action: Action,
        label: &'static str,
    },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The widget tree
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    body: NodeId,
    add_button: NodeId,
}

impl Tree {
    /// Create a tree with an empty table body and the add-event button
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            body: 0,
            add_button: 0,
        };
        tree.body = tree.alloc(NodeKind::TableBody, None);
        tree.add_button = tree.alloc(NodeKind::AddEventButton, None);
        tree
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// The table body node
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The add-event button, which lives outside the table
    pub fn add_button(&self) -> NodeId {
        self.add_button
    }

    /// Append a new node as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, Some(parent));
        self.nodes[parent].children.push(id);
        id
    }

    /// Unlink a node from its parent; the subtree stays intact but is no
    /// longer reachable from the body
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&child| child != id);
        }
    }

    /// Detach every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id].children);
        for child in children {
            self.nodes[child].parent = None;
        }
    }

    /// Replace a node's kind in place, keeping its position in the tree
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id].kind = kind;
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Rows currently attached to the table body, in display order
    pub fn rows(&self) -> Vec<NodeId> {
        self.nodes[self.body]
            .children
            .iter()
            .copied()
            .filter(|&id| matches!(self.nodes[id].kind, NodeKind::Row { .. }))
            .collect()
    }

    /// Walk up from any node to the nearest enclosing row.
    ///
    /// Replaces a fixed-depth parent hop so the lookup survives changes to
    /// the row's internal shape.
    pub fn enclosing_row(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if matches!(self.nodes[node].kind, NodeKind::Row { .. }) {
                return Some(node);
            }
            current = self.nodes[node].parent;
        }
        None
    }

    /// Find the attached row carrying the given identity marker
    pub fn find_row(&self, marker: &str) -> Option<NodeId> {
        self.rows().into_iter().find(|&row| {
            matches!(
                &self.nodes[row].kind,
                NodeKind::Row { marker: Some(m), .. } if m == marker
            )
        })
    }

    /// Find the first attached row in the given state
    pub fn find_row_in_state(&self, state: RowState) -> Option<NodeId> {
        self.rows().into_iter().find(|&row| {
            matches!(&self.nodes[row].kind, NodeKind::Row { state: s, .. } if *s == state)
        })
    }

    /// A row's identity marker, if it has one
    pub fn row_marker(&self, row: NodeId) -> Option<&str> {
        match &self.nodes[row].kind {
            NodeKind::Row { marker, .. } => marker.as_deref(),
            _ => None,
        }
    }

    /// A row's interaction state
    pub fn row_state(&self, row: NodeId) -> Option<RowState> {
        match &self.nodes[row].kind {
            NodeKind::Row { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// Move a row to a new interaction state, keeping its marker
    pub fn set_row_state(&mut self, row: NodeId, state: RowState) {
        if let NodeKind::Row { state: s, .. } = &mut self.nodes[row].kind {
            *s = state;
        }
    }

    /// The cell with the given role inside a row
    pub fn cell(&self, row: NodeId, role: CellRole) -> Option<NodeId> {
        self.nodes[row]
            .children
            .iter()
            .copied()
            .find(|&child| matches!(self.nodes[child].kind, NodeKind::Cell(r) if r == role))
    }

    /// Depth-first search for a button with the given action tag below `root`
    pub fn find_button(&self, root: NodeId, action: Action) -> Option<NodeId> {
        for &child in &self.nodes[root].children {
            if matches!(self.nodes[child].kind, NodeKind::Button { action: a, .. } if a == action) {
                return Some(child);
            }
            if let Some(found) = self.find_button(child, action) {
                return Some(found);
            }
        }
        None
    }

    /// The action tag of a node, if it is an interactive element
    pub fn action_of(&self, id: NodeId) -> Option<Action> {
        match self.nodes[id].kind {
            NodeKind::Button { action, .. } => Some(action),
            NodeKind::AddEventButton => Some(Action::AddEvent),
            _ => None,
        }
    }

    /// Concatenated text content of a node's children
    pub fn text_content(&self, id: NodeId) -> String {
        let mut content = String::new();
        for &child in &self.nodes[id].children {
            if let NodeKind::Text(text) = &self.nodes[child].kind {
                content.push_str(text);
            }
        }
        content
    }

    /// The value of the first input below `id`
    pub fn input_value(&self, id: NodeId) -> Option<&str> {
        self.nodes[id].children.iter().find_map(|&child| {
            match &self.nodes[child].kind {
                NodeKind::Input { value } => Some(value.as_str()),
                _ => None,
            }
        })
    }

    /// Overwrite the value of the first input below `id`
    pub fn set_input_value(&mut self, id: NodeId, value: &str) -> bool {
        let input = self
            .nodes[id]
            .children
            .iter()
            .copied()
            .find(|&child| matches!(self.nodes[child].kind, NodeKind::Input { .. }));
        match input {
            Some(input) => {
                self.nodes[input].kind = NodeKind::Input {
                    value: value.to_string(),
                };
                true
            }
            None => false,
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
