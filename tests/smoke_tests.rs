use eventlist::commands::{self, Command};
use eventlist::config::Config;
use eventlist::model::{parse_row_marker, Event};
use eventlist::store::EventStore;
use eventlist::view::EventRenderer;

fn event(id: i64, name: &str) -> Event {
    Event {
        id,
        event_name: name.to_string(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-01-02".to_string(),
    }
}

/// Smoke test to verify that a config can be constructed directly
#[tokio::test]
async fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.api_base_url, "http://localhost:3000");
    assert_eq!(config.request_timeout_secs, 30);
}

/// Store operations work through the public library API
#[tokio::test]
async fn test_store_basics() {
    let mut store = EventStore::new();
    store.set_events(vec![event(1, "a"), event(2, "b")]);

    store.add_event(event(3, "c"));
    assert_eq!(store.events().len(), 3);

    store.remove_event(3);
    let ids: Vec<i64> = store.events().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);

    // Editing replaces and moves to the end
    store.edit_event(1, event(1, "a2"));
    let ids: Vec<i64> = store.events().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

/// A marker recovered from the UI coerces to the numeric id
#[tokio::test]
async fn test_marker_coercion() {
    assert_eq!(parse_row_marker("event_3"), Some(3));
    let mut store = EventStore::new();
    store.set_events(vec![event(3, "a")]);
    store.remove_event(parse_row_marker("event_3").unwrap());
    assert!(store.events().is_empty());
}

/// A full refresh leaves exactly one row per event
#[tokio::test]
async fn test_renderer_refresh_is_idempotent() {
    let mut renderer = EventRenderer::new();
    let events = vec![event(1, "a"), event(2, "b"), event(3, "c")];
    renderer.render_events(&events);
    renderer.render_events(&events);
    assert_eq!(renderer.tree().rows().len(), 3);
}

/// The command parser covers the whole UI action surface
#[tokio::test]
async fn test_command_surface_parses() {
    assert_eq!(commands::parse("add"), Ok(Command::Add));
    assert_eq!(commands::parse("cancel"), Ok(Command::Cancel));
    assert_eq!(commands::parse("edit 5"), Ok(Command::Edit { id: 5 }));
    assert_eq!(commands::parse("delete 9"), Ok(Command::Delete { id: 9 }));
    assert!(matches!(
        commands::parse("save Standup 2024-01-01 2024-01-01"),
        Ok(Command::SaveNew { .. })
    ));
    assert!(matches!(
        commands::parse("save 5 Standup 2024-01-01 2024-01-01"),
        Ok(Command::SaveEdit { id: 5, .. })
    ));
}
