//! The per-row interaction state machine.
//!
//! Every user action arrives as a click on a tree node and enters through
//! [`EventController::handle_click`], the single delegated registration
//! point. The handler inspects the node's action tag, resolves the nearest
//! enclosing row, and dispatches through one explicit match. After each
//! confirmed remote response the store and the renderer are updated next to
//! each other with no await in between, so the two never observably diverge
//! for longer than one in-flight request.

use crate::api::EventApi;
use crate::error::AppResult;
use crate::model::{parse_row_marker, EventId};
use crate::store::EventStore;
use crate::view::tree::{Action, NodeId, RowState};
use crate::view::EventRenderer;
use std::sync::Arc;
use tracing::{debug, error};

/// Owns the row state machine and keeps store and renderer in lockstep
pub struct EventController {
    api: Arc<dyn EventApi>,
    store: EventStore,
    renderer: EventRenderer,
}

impl EventController {
    /// Fetch the full collection once, load the store, and render all rows.
    ///
    /// No click is handled before this resolves. A list failure is not
    /// contained here; it propagates to the caller.
    pub async fn initialize(api: Arc<dyn EventApi>) -> AppResult<Self> {
        let events = api.get_events().await?;
        let mut store = EventStore::new();
        let mut renderer = EventRenderer::new();
        store.set_events(events);
        renderer.render_events(store.events());
        Ok(Self {
            api,
            store,
            renderer,
        })
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn renderer(&self) -> &EventRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut EventRenderer {
        &mut self.renderer
    }

    /// Dispatch a click on any tree node.
    ///
    /// Errors from the create path propagate to the caller's unhandled
    /// sink; update and delete failures are contained here and logged.
    pub async fn handle_click(&mut self, target: NodeId) -> AppResult<()> {
        let Some(action) = self.renderer.tree().action_of(target) else {
            debug!("Ignoring click on non-interactive element");
            return Ok(());
        };

        if action == Action::AddEvent {
            self.renderer.add_event();
            return Ok(());
        }

        let Some(row) = self.renderer.tree().enclosing_row(target) else {
            debug!(?action, "Ignoring click with no enclosing row");
            return Ok(());
        };

        match action {
            Action::AddEvent => unreachable!("handled above"),
            Action::CancelAdd => self.handle_cancel_add(row),
            Action::SaveAdd => self.handle_save_add(row).await,
            Action::Edit => self.handle_edit(row),
            Action::SaveEdit => self.handle_save_edit(row).await,
            Action::Delete => self.handle_delete(row).await,
        }
    }

    /// Cancel an adding-new row: detach it, nothing else changes
    fn handle_cancel_add(&mut self, row: NodeId) -> AppResult<()> {
        if self.renderer.tree().row_state(row) != Some(RowState::AddingNew) {
            debug!("Ignoring cancel on a row that is not adding");
            return Ok(());
        }
        self.renderer.remove_element(row);
        Ok(())
    }

    /// Save an adding-new row.
    ///
    /// The create failure is deliberately not contained: it propagates out
    /// of `handle_click` so the caller's unhandled sink sees it, and the
    /// blank row stays in place.
    async fn handle_save_add(&mut self, row: NodeId) -> AppResult<()> {
        if self.renderer.tree().row_state(row) != Some(RowState::AddingNew) {
            debug!("Ignoring save on a row that is not adding");
            return Ok(());
        }
        let draft = self.renderer.read_draft(row);
        let event = self.api.post_event(&draft).await?;
        self.renderer.remove_element(row);
        self.renderer.render_event(&event);
        self.store.add_event(event);
        Ok(())
    }

    /// Swap a display row into its editing shape
    fn handle_edit(&mut self, row: NodeId) -> AppResult<()> {
        if self.renderer.tree().row_state(row) != Some(RowState::View) {
            debug!("Ignoring edit on a row that is not in view state");
            return Ok(());
        }
        self.renderer.begin_edit(row);
        Ok(())
    }

    /// Save an editing row.
    ///
    /// On rejection the row stays in its editing shape and the error goes
    /// to the diagnostic log; no retry, no reversion.
    async fn handle_save_edit(&mut self, row: NodeId) -> AppResult<()> {
        if self.renderer.tree().row_state(row) != Some(RowState::Editing) {
            debug!("Ignoring save on a row that is not editing");
            return Ok(());
        }
        let Some(id) = self.row_id(row) else {
            debug!("Ignoring save on an editing row without a valid marker");
            return Ok(());
        };
        let draft = self.renderer.read_draft(row);
        match self.api.edit_event(id, &draft).await {
            Ok(event) => {
                self.renderer.complete_edit(row, &event);
                self.store.edit_event(id, event);
            }
            Err(e) => {
                error!("Failed to update event {}: {:?}", id, e);
            }
        }
        Ok(())
    }

    /// Delete a row's event.
    ///
    /// Only wired for rows in view state; a delete click on an editing row
    /// is ignored. On rejection the row remains visible and the error goes
    /// to the diagnostic log.
    async fn handle_delete(&mut self, row: NodeId) -> AppResult<()> {
        if self.renderer.tree().row_state(row) != Some(RowState::View) {
            debug!("Ignoring delete on a row that is not in view state");
            return Ok(());
        }
        let Some(id) = self.row_id(row) else {
            debug!("Ignoring delete on a row without a valid marker");
            return Ok(());
        };
        match self.api.remove_event(id).await {
            Ok(()) => {
                self.renderer.remove_element(row);
                self.store.remove_event(id);
            }
            Err(e) => {
                error!("Failed to delete event {}: {:?}", id, e);
            }
        }
        Ok(())
    }

    /// Numeric id recovered from a row's identity marker
    fn row_id(&self, row: NodeId) -> Option<EventId> {
        self.renderer
            .tree()
            .row_marker(row)
            .and_then(parse_row_marker)
    }
}
