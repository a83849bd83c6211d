use crate::model::{Event, EventId};

/// In-process mirror of the server's event collection.
///
/// Holds only server-confirmed events: entries are added after a create
/// response and removed after a delete response, never before. The store
/// performs no I/O and is rebuilt from the server only at startup.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Replace the entire collection; used only for the initial load
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// The current collection, insertion order preserved
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Append one event; the caller guarantees the id is unique and
    /// server-confirmed
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Replace the event matching `id` with `new_event`.
    ///
    /// Implemented as remove-then-append, so the replacement moves to the
    /// end of the collection. The reordering is an observable part of the
    /// contract.
    pub fn edit_event(&mut self, id: EventId, new_event: Event) {
        self.remove_event(id);
        self.events.push(new_event);
    }

    /// Remove the event matching `id`; removing a missing id is a no-op
    pub fn remove_event(&mut self, id: EventId) {
        self.events.retain(|event| event.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: EventId, name: &str) -> Event {
        Event {
            id,
            event_name: name.to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
        }
    }

    #[test]
    fn set_events_replaces_wholesale() {
        let mut store = EventStore::new();
        store.add_event(event(1, "old"));
        store.set_events(vec![event(2, "a"), event(3, "b")]);
        let ids: Vec<EventId> = store.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    /// Adding then removing a fresh id restores the prior collection
    #[test]
    fn add_then_remove_is_inverse() {
        let mut store = EventStore::new();
        store.set_events(vec![event(1, "a"), event(2, "b")]);
        store.add_event(event(3, "c"));
        store.remove_event(3);
        let ids: Vec<EventId> = store.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    /// Editing removes the old entry and appends the replacement at the end
    #[test]
    fn edit_reorders_to_end() {
        let mut store = EventStore::new();
        store.set_events(vec![event(1, "a"), event(2, "b")]);
        store.edit_event(1, event(1, "a-edited"));
        let names: Vec<&str> = store
            .events()
            .iter()
            .map(|e| e.event_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a-edited"]);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut store = EventStore::new();
        store.set_events(vec![event(1, "a")]);
        store.remove_event(99);
        assert_eq!(store.events().len(), 1);
    }

    /// Ids recovered from marker text reach the store as numbers
    #[test]
    fn remove_by_coerced_marker_id() {
        let mut store = EventStore::new();
        store.set_events(vec![event(3, "a"), event(4, "b")]);
        let id = crate::model::parse_row_marker("event_3").unwrap();
        store.remove_event(id);
        let ids: Vec<EventId> = store.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4]);
    }
}
