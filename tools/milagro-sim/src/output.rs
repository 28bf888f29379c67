use anyhow::{Context, Result};
use geo::Point;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use milagro_transit::map::{EdgeLine, MapScene, StopMarker, TripOverlay, TripStyle};
use std::path::Path;

fn point_value(p: Point) -> Value {
    Value::Point(vec![p.x(), p.y()])
}

fn line_value(start: Point, end: Point) -> Value {
    Value::LineString(vec![vec![start.x(), start.y()], vec![end.x(), end.y()]])
}

fn feature(value: Value, properties: serde_json::Map<String, serde_json::Value>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Create a GeoJSON Feature for a street line
fn edge_to_feature(edge: &EdgeLine) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("street"));
    properties.insert("name".to_string(), serde_json::json!(edge.name.as_str()));
    properties.insert("blocked".to_string(), serde_json::json!(edge.blocked));
    properties.insert(
        "label_anchor".to_string(),
        serde_json::json!([edge.label_anchor.x(), edge.label_anchor.y()]),
    );

    feature(line_value(edge.start, edge.end), properties)
}

/// Create a GeoJSON Feature for the selected trip
fn trip_to_feature(trip: &TripOverlay) -> Feature {
    let style = match trip.style {
        TripStyle::Direct => "direct",
        TripStyle::Alternative => "alternative",
    };

    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("trip"));
    properties.insert("style".to_string(), serde_json::json!(style));
    properties.insert(
        "bus_marker".to_string(),
        serde_json::json!([trip.bus_marker.x(), trip.bus_marker.y()]),
    );

    feature(line_value(trip.start, trip.end), properties)
}

/// Create a GeoJSON Feature for a stop
fn stop_to_feature(stop: &StopMarker) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("stop"));
    properties.insert("id".to_string(), serde_json::json!(stop.id.as_str()));
    properties.insert("name".to_string(), serde_json::json!(&*stop.name));
    properties.insert("color".to_string(), serde_json::json!(&*stop.color));

    feature(point_value(stop.position), properties)
}

/// Features in drawing order: streets, trip, then stops on top
pub fn scene_to_geojson(scene: &MapScene) -> GeoJson {
    let features: Vec<Feature> = scene
        .edges
        .iter()
        .map(edge_to_feature)
        .chain(scene.trip.iter().map(trip_to_feature))
        .chain(scene.stops.iter().map(stop_to_feature))
        .collect();

    GeoJson::from(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Write the map scene to a GeoJSON file
pub fn write_scene_geojson(scene: &MapScene, output_path: &Path) -> Result<()> {
    log::info!(
        "Writing {} streets and {} stops to {}",
        scene.edges.len(),
        scene.stops.len(),
        output_path.display()
    );

    let geojson = scene_to_geojson(scene);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
