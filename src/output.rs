use std::fs::File;
use std::io::{BufWriter, Write};

use geojson::{Feature, FeatureCollection, Geometry, Position, Value as GeoJsonValue};
use serde_json::{json, Map, Value};
use simplelog::warn;

use crate::error::RenderError;
use crate::render::{MarkerKind, RenderOptions, RenderPlan};

/// Basemap styles and the tile layers that back them.
const BASEMAPS: &[(&str, &str, &str)] = &[
  ("streets", "https://tile.openstreetmap.org/{z}/{x}/{y}.png", "&copy; OpenStreetMap contributors"),
  ("topo", "https://tile.opentopomap.org/{z}/{x}/{y}.png", "&copy; OpenTopoMap (CC-BY-SA)"),
  (
    "satellite",
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    "Tiles &copy; Esri",
  ),
  ("light", "https://basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png", "&copy; CARTO"),
  ("dark", "https://basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png", "&copy; CARTO"),
];

/// Look up a basemap style by name, case-insensitively.
pub fn basemap_layer(name: &str) -> Option<(&'static str, &'static str)> {
  BASEMAPS
    .iter()
    .find(|(style, _, _)| style.eq_ignore_ascii_case(name))
    .map(|(_, url, attribution)| (*url, *attribution))
}

/// Write the rendered map, dispatching on the output file extension:
/// `.geojson`/`.json` for a FeatureCollection, `.html` for an interactive
/// map page.
pub fn write_map(plan: &RenderPlan, options: &RenderOptions, file: &str) -> Result<(), RenderError> {
  // get file extension
  let extension = file.split('.').last().unwrap_or("");

  match extension {
    "geojson" | "json" => write_geojson(plan, options, file),
    "html" => write_html(plan, options, file),
    _ => Err(RenderError::Output(format!("Unsupported file extension: {}", extension))),
  }
}

/// Convert the drawing plan to a GeoJSON FeatureCollection with
/// simplestyle properties. GeoJSON positions are (lon, lat).
pub fn to_feature_collection(plan: &RenderPlan, options: &RenderOptions) -> FeatureCollection {
  let mut features = Vec::with_capacity(plan.polylines.len() + plan.markers.len());

  for line in &plan.polylines {
    let coordinates: Vec<Position> =
      line.points.iter().map(|&(lat, lon)| Position::from([lon, lat])).collect();

    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(line.id.as_ref()));
    properties.insert("stroke".to_string(), json!(options.line_color));
    properties.insert("stroke-width".to_string(), json!(options.line_width));

    features.push(Feature {
      bbox: None,
      geometry: Some(Geometry::new(GeoJsonValue::LineString { coordinates })),
      id: None,
      properties: Some(properties),
      foreign_members: None,
    });
  }

  for marker in &plan.markers {
    let (color, size, symbol, role) = match marker.kind {
      MarkerKind::Reservoir => (&options.reservoir_color, options.reservoir_size, "square", "reservoir"),
      MarkerKind::Junction => (&options.junction_color, options.junction_size, "circle", "junction"),
    };

    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(marker.id.as_ref()));
    properties.insert("role".to_string(), json!(role));
    properties.insert("marker-color".to_string(), json!(color));
    properties.insert("marker-size".to_string(), json!(size));
    properties.insert("marker-symbol".to_string(), json!(symbol));

    features.push(Feature {
      bbox: None,
      geometry: Some(Geometry::new(GeoJsonValue::Point {
        coordinates: Position::from([marker.lon, marker.lat]),
      })),
      id: None,
      properties: Some(properties),
      foreign_members: None,
    });
  }

  FeatureCollection { bbox: None, features, foreign_members: None }
}

fn write_geojson(plan: &RenderPlan, options: &RenderOptions, file: &str) -> Result<(), RenderError> {
  let collection = to_feature_collection(plan, options);

  let file = File::create(file)
    .map_err(|e| RenderError::Output(format!("Failed to create output file: {}", e)))?;
  let writer = BufWriter::new(file);

  serde_json::to_writer(writer, &collection)
    .map_err(|e| RenderError::Output(format!("Failed to write map to file: {}", e)))?;

  Ok(())
}

fn write_html(plan: &RenderPlan, options: &RenderOptions, file: &str) -> Result<(), RenderError> {
  let collection = to_feature_collection(plan, options);

  // a failed basemap lookup is a warning, not an error
  let tile = match basemap_layer(&options.basemap) {
    Some((url, attribution)) => json!({ "url": url, "attribution": attribution }),
    None => {
      warn!("Unknown basemap style '{}', rendering without a basemap", options.basemap);
      Value::Null
    }
  };

  let config = json!({ "tile": tile, "network": collection });
  let page = VIEWER_TEMPLATE.replace("__CONFIG__", &config.to_string());

  let file = File::create(file)
    .map_err(|e| RenderError::Output(format!("Failed to create output file: {}", e)))?;
  let mut writer = BufWriter::new(file);
  writer
    .write_all(page.as_bytes())
    .map_err(|e| RenderError::Output(format!("Failed to write map to file: {}", e)))?;

  Ok(())
}

/// Self-contained Leaflet page; the embedded config carries the tile layer
/// (or null) and the network FeatureCollection.
const VIEWER_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<title>inpmap</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var config = __CONFIG__;
var map = L.map('map');
if (config.tile) {
  L.tileLayer(config.tile.url, { attribution: config.tile.attribution }).addTo(map);
}
var layer = L.geoJSON(config.network, {
  style: function (feature) {
    return { color: feature.properties['stroke'], weight: feature.properties['stroke-width'] };
  },
  pointToLayer: function (feature, latlng) {
    var p = feature.properties;
    if (p.role === 'reservoir') {
      var s = p['marker-size'] * 2;
      var box = '<div style="width:' + s + 'px;height:' + s + 'px;background:' + p['marker-color'] + '"></div>';
      return L.marker(latlng, { icon: L.divIcon({ className: '', iconSize: [s, s], html: box }) });
    }
    return L.circleMarker(latlng, {
      radius: p['marker-size'],
      color: p['marker-color'],
      fillColor: p['marker-color'],
      fillOpacity: 1.0,
      weight: 1
    });
  },
  onEachFeature: function (feature, l) {
    if (feature.properties && feature.properties.id) {
      l.bindPopup(feature.properties.role
        ? feature.properties.role + ' ' + feature.properties.id
        : 'pipe ' + feature.properties.id);
    }
  }
}).addTo(map);
map.fitBounds(layer.getBounds(), { padding: [20, 20] });
</script>
</body>
</html>
"##;
