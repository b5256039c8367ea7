//! Persistence round trips through the public store API.

use hearth_core::{GridDensity, GridPosition, Widget, WidgetProps, WidgetSize};
use hearth_grid::allocate;
use hearth_store::{codec, default_widgets, FileStorage, LayoutStore, MemoryStorage, StoreOptions};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mixed_widgets() -> Vec<Widget> {
    vec![
        Widget::new("clock", "clock").with_size(WidgetSize::Wide).with_position(0, 0),
        Widget::new("porch", "light")
            .with_props(WidgetProps::new().with("entityId", "light.porch"))
            .with_position(3, 2),
        Widget::new("camera", "camera").with_custom_footprint(3, 2),
        Widget::new("lock", "lock"),
        // Collides with "clock" and is demoted.
        Widget::new("sensor", "sensor").with_size(WidgetSize::Tall).with_position(1, 0),
    ]
}

#[test]
fn encode_reload_allocate_reproduces_placement() {
    init_tracing();
    let widgets = mixed_widgets();
    let density = GridDensity::new(4, 3);

    let payload = codec::encode(&widgets).unwrap();
    let options = StoreOptions::default().with_density(density);
    let store = LayoutStore::new(MemoryStorage::with_payload(payload), options);

    assert_eq!(store.widgets(), widgets.as_slice());
    assert_eq!(store.layout(), allocate(&widgets, density));
}

#[test]
fn mutations_survive_a_restart() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let options = StoreOptions::default()
        .with_density(GridDensity::STANDARD)
        .with_default_widgets(Vec::new());

    let mut store = LayoutStore::new(FileStorage::new(&path), options.clone());
    let light = store.add_widget("light", WidgetProps::new().with("name", "Desk"));
    let lock = store.add_widget("lock", WidgetProps::new());
    store.move_widget(&light, 3, 2);
    store.set_widget_size(&lock, WidgetSize::Large);
    let before = store.layout();
    drop(store);

    let store = LayoutStore::new(FileStorage::new(&path), options);
    assert_eq!(store.widget(&light).unwrap().position, Some(GridPosition::new(3, 2)));
    assert_eq!(store.widget(&lock).unwrap().size, WidgetSize::Large);
    assert_eq!(store.layout(), before);
}

#[test]
fn malformed_payload_falls_back_to_defaults() {
    init_tracing();
    let duplicate_ids = r#"[{"id":"a","type":"light"},{"id":"a","type":"lock"}]"#;
    for payload in ["", "{}", "not json", duplicate_ids] {
        let store = LayoutStore::new(MemoryStorage::with_payload(payload), StoreOptions::default());
        assert_eq!(store.widgets(), default_widgets().as_slice(), "payload {payload:?}");
    }
}

#[test]
fn stored_json_uses_the_flat_list_format() {
    init_tracing();
    let options = StoreOptions::default().with_default_widgets(Vec::new());
    let mut store = LayoutStore::new(MemoryStorage::new(), options);
    let id = store.add_widget("scene", WidgetProps::new());
    store.move_widget(&id, 1, 2);

    let value: serde_json::Value =
        serde_json::from_str(store.storage().payload().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": id.as_str(),
            "type": "scene",
            "props": {},
            "size": "1x1",
            "position": { "col": 1, "row": 2 }
        }])
    );
}
