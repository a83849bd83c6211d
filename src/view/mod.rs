//! Rendering of events and editable row forms into the widget tree.

pub mod tree;

use crate::model::{Event, EventDraft};
use tree::{Action, CellRole, NodeId, NodeKind, RowState, Tree};

/// Builds and mutates the on-screen representation of events.
///
/// The renderer holds no state beyond the live widget tree and performs no
/// network calls; interpreting user actions is the controller's job.
#[derive(Debug, Default)]
pub struct EventRenderer {
    tree: Tree,
}

impl EventRenderer {
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Read access to the tree for lookups and hit-testing
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The add-event button outside the table
    pub fn add_event_button(&self) -> NodeId {
        self.tree.add_button()
    }

    /// Append a cell holding static text to a row
    fn text_cell(&mut self, row: NodeId, role: CellRole, value: &str) -> NodeId {
        let cell = self.tree.append(row, NodeKind::Cell(role));
        self.tree.append(cell, NodeKind::Text(value.to_string()));
        cell
    }

    /// Append a cell holding an input to a row
    fn input_cell(&mut self, row: NodeId, role: CellRole, value: &str) -> NodeId {
        let cell = self.tree.append(row, NodeKind::Cell(role));
        self.tree.append(
            cell,
            NodeKind::Input {
                value: value.to_string(),
            },
        );
        cell
    }

    /// Append one display row for a confirmed event
    pub fn render_event(&mut self, event: &Event) -> NodeId {
        let row = self.tree.append(
            self.tree.body(),
            NodeKind::Row {
                marker: Some(event.row_marker()),
                state: RowState::View,
            },
        );
        self.text_cell(row, CellRole::EventName, &event.event_name);
        self.text_cell(row, CellRole::StartDate, &event.start_date);
        self.text_cell(row, CellRole::EndDate, &event.end_date);
        let actions = self.tree.append(row, NodeKind::Cell(CellRole::Actions));
        self.tree.append(
            actions,
            NodeKind::Button {
                action: Action::Edit,
                label: "Edit",
            },
        );
        self.tree.append(
            actions,
            NodeKind::Button {
                action: Action::Delete,
                label: "Delete",
            },
        );
        row
    }

    /// Clear the table body and render every event in order.
    ///
    /// Calling this twice with the same collection yields the same table;
    /// it is the idempotent full refresh used at startup.
    pub fn render_events(&mut self, events: &[Event]) {
        let body = self.tree.body();
        self.tree.clear_children(body);
        for event in events {
            self.render_event(event);
        }
    }

    /// Append one blank editable row for new-event entry
    pub fn add_event(&mut self) -> NodeId {
        let row = self.tree.append(
            self.tree.body(),
            NodeKind::Row {
                marker: None,
                state: RowState::AddingNew,
            },
        );
        self.input_cell(row, CellRole::EventName, "");
        self.input_cell(row, CellRole::StartDate, "");
        self.input_cell(row, CellRole::EndDate, "");
        let actions = self.tree.append(row, NodeKind::Cell(CellRole::Actions));
        self.tree.append(
            actions,
            NodeKind::Button {
                action: Action::SaveAdd,
                label: "Save",
            },
        );
        self.tree.append(
            actions,
            NodeKind::Button {
                action: Action::CancelAdd,
                label: "Cancel",
            },
        );
        row
    }

    /// Detach a row or any other node from the tree
    pub fn remove_element(&mut self, id: NodeId) {
        self.tree.detach(id);
    }

    /// Swap a display row into its editing shape, in place.
    ///
    /// The three data cells get inputs pre-filled from their current text
    /// and the Edit button becomes Save. The Delete button stays where it
    /// is; it is simply not wired while the row is editing.
    pub fn begin_edit(&mut self, row: NodeId) {
        for role in [CellRole::EventName, CellRole::StartDate, CellRole::EndDate] {
            if let Some(cell) = self.tree.cell(row, role) {
                let current = self.tree.text_content(cell);
                self.tree.clear_children(cell);
                self.tree.append(cell, NodeKind::Input { value: current });
            }
        }
        if let Some(edit) = self.tree.find_button(row, Action::Edit) {
            self.tree.set_kind(
                edit,
                NodeKind::Button {
                    action: Action::SaveEdit,
                    label: "Save",
                },
            );
        }
        self.tree.set_row_state(row, RowState::Editing);
    }

    /// Return an editing row to its display shape with the server's values
    pub fn complete_edit(&mut self, row: NodeId, event: &Event) {
        let fields = [
            (CellRole::EventName, event.event_name.as_str()),
            (CellRole::StartDate, event.start_date.as_str()),
            (CellRole::EndDate, event.end_date.as_str()),
        ];
        for (role, value) in fields {
            if let Some(cell) = self.tree.cell(row, role) {
                self.tree.clear_children(cell);
                self.tree.append(cell, NodeKind::Text(value.to_string()));
            }
        }
        if let Some(save) = self.tree.find_button(row, Action::SaveEdit) {
            self.tree.set_kind(
                save,
                NodeKind::Button {
                    action: Action::Edit,
                    label: "Edit",
                },
            );
        }
        self.tree.set_row_state(row, RowState::View);
    }

    /// Collect the current input values of an editable row
    pub fn read_draft(&self, row: NodeId) -> EventDraft {
        let value = |role| {
            self.tree
                .cell(row, role)
                .and_then(|cell| self.tree.input_value(cell))
                .unwrap_or_default()
                .to_string()
        };
        EventDraft {
            event_name: value(CellRole::EventName),
            start_date: value(CellRole::StartDate),
            end_date: value(CellRole::EndDate),
        }
    }

    /// Type a value into one of a row's input fields
    pub fn set_field(&mut self, row: NodeId, role: CellRole, value: &str) -> bool {
        match self.tree.cell(row, role) {
            Some(cell) => self.tree.set_input_value(cell, value),
            None => false,
        }
    }

    /// Plain-text snapshot of the table for the terminal
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("  id | name                 | start      | end        | actions\n");
        out.push_str("-----+----------------------+------------+------------+-------------\n");
        for row in self.tree.rows() {
            let marker = self.tree.row_marker(row).unwrap_or("(new)");
            let id = crate::model::parse_row_marker(marker)
                .map(|id| id.to_string())
                .unwrap_or_else(|| "new".to_string());
            let field = |role| match self.tree.cell(row, role) {
                Some(cell) => match self.tree.input_value(cell) {
                    Some(value) => format!("[{}]", value),
                    None => self.tree.text_content(cell),
                },
                None => String::new(),
            };
            let actions = match self.tree.row_state(row) {
                Some(RowState::View) => "Edit Delete",
                Some(RowState::Editing) => "Save Delete",
                Some(RowState::AddingNew) => "Save Cancel",
                None => "",
            };
            out.push_str(&format!(
                "{:>4} | {:<20} | {:<10} | {:<10} | {}\n",
                id,
                field(CellRole::EventName),
                field(CellRole::StartDate),
                field(CellRole::EndDate),
                actions
            ));
        }
        if self.tree.rows().is_empty() {
            out.push_str("  (no events)\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Event;

    fn event(id: i64, name: &str) -> Event {
        Event {
            id,
            event_name: name.to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
        }
    }

    /// A full refresh is idempotent regardless of prior table contents
    #[test]
    fn render_events_twice_yields_same_table() {
        let mut renderer = EventRenderer::new();
        let events = vec![event(1, "a"), event(2, "b")];
        renderer.render_events(&events);
        renderer.add_event();
        renderer.render_events(&events);
        let rows = renderer.tree().rows();
        assert_eq!(rows.len(), 2);
        let markers: Vec<_> = rows
            .iter()
            .map(|&row| renderer.tree().row_marker(row).unwrap().to_string())
            .collect();
        assert_eq!(markers, vec!["event_1", "event_2"]);
    }

    #[test]
    fn display_row_has_view_shape() {
        let mut renderer = EventRenderer::new();
        let row = renderer.render_event(&event(7, "Standup"));
        let tree = renderer.tree();
        assert_eq!(tree.row_state(row), Some(RowState::View));
        assert_eq!(tree.row_marker(row), Some("event_7"));
        let name = tree.cell(row, CellRole::EventName).unwrap();
        assert_eq!(tree.text_content(name), "Standup");
        assert!(tree.find_button(row, Action::Edit).is_some());
        assert!(tree.find_button(row, Action::Delete).is_some());
        assert!(tree.find_button(row, Action::SaveEdit).is_none());
    }

    #[test]
    fn blank_row_has_adding_shape() {
        let mut renderer = EventRenderer::new();
        let row = renderer.add_event();
        let tree = renderer.tree();
        assert_eq!(tree.row_state(row), Some(RowState::AddingNew));
        assert_eq!(tree.row_marker(row), None);
        let name = tree.cell(row, CellRole::EventName).unwrap();
        assert_eq!(tree.input_value(name), Some(""));
        assert!(tree.find_button(row, Action::SaveAdd).is_some());
        assert!(tree.find_button(row, Action::CancelAdd).is_some());
    }

    /// Entering edit mode pre-fills inputs from the current text
    #[test]
    fn begin_edit_prefills_inputs() {
        let mut renderer = EventRenderer::new();
        let row = renderer.render_event(&event(5, "Retro"));
        renderer.begin_edit(row);
        let tree = renderer.tree();
        assert_eq!(tree.row_state(row), Some(RowState::Editing));
        let name = tree.cell(row, CellRole::EventName).unwrap();
        assert_eq!(tree.input_value(name), Some("Retro"));
        assert!(tree.find_button(row, Action::SaveEdit).is_some());
        assert!(tree.find_button(row, Action::Edit).is_none());
        // Delete stays present but inert while editing
        assert!(tree.find_button(row, Action::Delete).is_some());
    }

    #[test]
    fn complete_edit_restores_view_shape() {
        let mut renderer = EventRenderer::new();
        let row = renderer.render_event(&event(5, "Retro"));
        renderer.begin_edit(row);
        renderer.set_field(row, CellRole::EventName, "Retrospective");
        renderer.complete_edit(row, &event(5, "Retrospective"));
        let tree = renderer.tree();
        assert_eq!(tree.row_state(row), Some(RowState::View));
        let name = tree.cell(row, CellRole::EventName).unwrap();
        assert_eq!(tree.input_value(name), None);
        assert_eq!(tree.text_content(name), "Retrospective");
        assert!(tree.find_button(row, Action::Edit).is_some());
    }

    #[test]
    fn read_draft_collects_input_values() {
        let mut renderer = EventRenderer::new();
        let row = renderer.add_event();
        renderer.set_field(row, CellRole::EventName, "Standup");
        renderer.set_field(row, CellRole::StartDate, "2024-01-01");
        renderer.set_field(row, CellRole::EndDate, "2024-01-01");
        let draft = renderer.read_draft(row);
        assert_eq!(draft.event_name, "Standup");
        assert_eq!(draft.start_date, "2024-01-01");
        assert_eq!(draft.end_date, "2024-01-01");
    }
}
