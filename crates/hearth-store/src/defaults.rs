//! Built-in widget set used on first run, after a reset, or when the
//! persisted layout cannot be read.

use hearth_core::{Widget, WidgetProps, WidgetSize};

/// The fixed default dashboard. Widgets carry no positions and are
/// auto-placed on first read.
pub fn default_widgets() -> Vec<Widget> {
    vec![
        Widget::new("default-clock", "clock").with_size(WidgetSize::Wide),
        Widget::new("default-weather", "weather")
            .with_size(WidgetSize::Wide)
            .with_props(WidgetProps::new().with("entityId", "weather.home")),
        Widget::new("default-living-room", "light")
            .with_props(entity("light.living_room", "Living Room")),
        Widget::new("default-kitchen", "light").with_props(entity("light.kitchen", "Kitchen")),
        Widget::new("default-thermostat", "thermostat")
            .with_size(WidgetSize::Large)
            .with_props(entity("climate.hallway", "Hallway")),
        Widget::new("default-front-door", "lock")
            .with_props(entity("lock.front_door", "Front Door")),
        Widget::new("default-bedroom-temp", "sensor")
            .with_props(entity("sensor.bedroom_temperature", "Bedroom")),
        Widget::new("default-driveway", "camera")
            .with_size(WidgetSize::Large)
            .with_props(entity("camera.driveway", "Driveway")),
        Widget::new("default-good-night", "scene")
            .with_props(entity("scene.good_night", "Good Night")),
    ]
}

fn entity(entity_id: &str, name: &str) -> WidgetProps {
    WidgetProps::new()
        .with("entityId", entity_id)
        .with("name", name)
}
