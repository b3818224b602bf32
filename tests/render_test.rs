//! Tests for display-option validation, plan building and the map writers

use geojson::Value as GeoJsonValue;

use inpmap::model::network::Network;
use inpmap::output::{basemap_layer, to_feature_collection, write_map};
use inpmap::render::{DisplayConfig, MarkerKind, RenderOptions, RenderPlan};

fn parse_str(content: &str) -> Network {
  let mut network = Network::default();
  network.parse(content.as_bytes()).expect("Parse failed");
  network
}

fn default_options() -> RenderOptions {
  DisplayConfig::default().validate().expect("Default options must validate")
}

/// Defaults: zone 14N, red pipes, blue junctions, green reservoirs
#[test]
fn test_default_options() {
  let options = default_options();
  assert_eq!(options.projection.epsg(), 32614);
  assert_eq!(options.line_width, 1.0);
  assert_eq!(options.line_color, "#ff0000");
  assert_eq!(options.junction_size, 4.0);
  assert_eq!(options.junction_color, "#0000ff");
  assert_eq!(options.reservoir_size, 5.0);
  assert_eq!(options.reservoir_color, "#008000");
  assert_eq!(options.basemap, "streets");
}

/// Invalid option values are rejected naming the offending parameter
#[test]
fn test_option_validation() {
  let bad_zone = DisplayConfig { zone: 0, ..DisplayConfig::default() };
  assert_eq!(bad_zone.validate().unwrap_err().parameter, "zone");

  let bad_hemisphere = DisplayConfig { hemisphere: "x".to_string(), ..DisplayConfig::default() };
  assert_eq!(bad_hemisphere.validate().unwrap_err().parameter, "hemisphere");

  let bad_width = DisplayConfig { line_width: -1.0, ..DisplayConfig::default() };
  assert_eq!(bad_width.validate().unwrap_err().parameter, "line_width");

  let bad_color = DisplayConfig { junction_color: "notacolor".to_string(), ..DisplayConfig::default() };
  let err = bad_color.validate().unwrap_err();
  assert_eq!(err.parameter, "junction_color");
  assert!(err.to_string().contains("junction_color"));

  let hex_color = DisplayConfig { line_color: "#A0B1C2".to_string(), ..DisplayConfig::default() };
  assert_eq!(hex_color.validate().unwrap().line_color, "#a0b1c2");
}

/// Pipes with an unresolved endpoint are skipped; others are unaffected
#[test]
fn test_plan_skips_unresolved_pipes() {
  let mut network = Network::default();
  network.read_inp("networks/demo.inp").expect("Failed to load demo.inp");

  let plan = RenderPlan::build(&network, &default_options());

  // P4 references GHOST and must be excluded
  let ids: Vec<&str> = plan.polylines.iter().map(|p| p.id.as_ref()).collect();
  assert_eq!(ids, vec!["P1", "P2", "P3"]);
}

/// A pipe polyline visits start, vertices in encounter order, end
#[test]
fn test_vertex_order_in_polyline() {
  let mut network = Network::default();
  network.read_inp("networks/demo.inp").expect("Failed to load demo.inp");

  let options = default_options();
  let plan = RenderPlan::build(&network, &options);
  let p2 = plan.polylines.iter().find(|p| p.id.as_ref() == "P2").expect("P2 not in plan");

  assert_eq!(p2.points.len(), 4);
  assert_eq!(p2.points[0], options.projection.to_latlon(501000.0, 2200500.0));
  assert_eq!(p2.points[1], options.projection.to_latlon(501200.0, 2200600.0));
  assert_eq!(p2.points[2], options.projection.to_latlon(501500.0, 2200800.0));
  assert_eq!(p2.points[3], options.projection.to_latlon(502000.0, 2201000.0));
}

/// A reservoir-listed node is a reservoir marker regardless of section order
#[test]
fn test_reservoir_precedence() {
  // reservoirs section before the coordinates section
  let network = parse_str(
    "[RESERVOIRS]\n\
     R1\n\
     [COORDINATES]\n\
     N1 500000 2200000\n\
     R1 501000 2200500\n\
     [PIPES]\n\
     P1 N1 R1\n",
  );

  let plan = RenderPlan::build(&network, &default_options());
  let r1 = plan.markers.iter().find(|m| m.id.as_ref() == "R1").unwrap();
  let n1 = plan.markers.iter().find(|m| m.id.as_ref() == "N1").unwrap();
  assert_eq!(r1.kind, MarkerKind::Reservoir);
  assert_eq!(n1.kind, MarkerKind::Junction);
}

/// The two-node example from the zone 14N network: one polyline, endpoints
/// inside valid geographic ranges, no reservoir markers
#[test]
fn test_two_node_network() {
  let network = parse_str(
    "[COORDINATES]\n\
     N1 500000 2200000\n\
     N2 501000 2200000\n\
     [PIPES]\n\
     P1 N1 N2\n",
  );

  let plan = RenderPlan::build(&network, &default_options());

  assert_eq!(plan.polylines.len(), 1);
  for &(lat, lon) in &plan.polylines[0].points {
    assert!((-90.0..=90.0).contains(&lat), "lat = {}", lat);
    assert!((-180.0..=180.0).contains(&lon), "lon = {}", lon);
  }
  assert!(plan.markers.iter().all(|m| m.kind == MarkerKind::Junction));
}

/// GeoJSON output carries one feature per polyline and marker with
/// simplestyle properties
#[test]
fn test_geojson_features() {
  let mut network = Network::default();
  network.read_inp("networks/demo.inp").expect("Failed to load demo.inp");

  let options = default_options();
  let plan = RenderPlan::build(&network, &options);
  let collection = to_feature_collection(&plan, &options);

  assert_eq!(collection.features.len(), plan.polylines.len() + plan.markers.len());

  let lines = collection
    .features
    .iter()
    .filter(|f| matches!(f.geometry.as_ref().unwrap().value, GeoJsonValue::LineString { .. }))
    .count();
  assert_eq!(lines, 3);

  let first = &collection.features[0];
  let properties = first.properties.as_ref().unwrap();
  assert_eq!(properties.get("stroke").unwrap(), "#ff0000");
  assert_eq!(properties.get("stroke-width").unwrap(), &1.0);

  let reservoir = collection
    .features
    .iter()
    .find(|f| {
      f.properties.as_ref().and_then(|p| p.get("role")).map(|r| r == "reservoir").unwrap_or(false)
    })
    .expect("No reservoir feature");
  let properties = reservoir.properties.as_ref().unwrap();
  assert_eq!(properties.get("marker-symbol").unwrap(), "square");
  assert_eq!(properties.get("marker-color").unwrap(), "#008000");
  assert_eq!(properties.get("id").unwrap(), "R1");

  // geometries serialize as GeoJSON (lon, lat) positions
  let r1 = plan.markers.iter().find(|m| m.id.as_ref() == "R1").unwrap();
  let geometry = serde_json::to_value(reservoir.geometry.as_ref().unwrap()).unwrap();
  assert_eq!(geometry["type"], "Point");
  assert_eq!(geometry["coordinates"][0], r1.lon);
  assert_eq!(geometry["coordinates"][1], r1.lat);
}

#[test]
fn test_basemap_lookup() {
  assert!(basemap_layer("streets").is_some());
  assert!(basemap_layer("SATELLITE").is_some());
  assert!(basemap_layer("not-a-style").is_none());
}

/// An unknown basemap style is a warning: the map is still written with
/// all graphics, just without a tile layer
#[test]
fn test_unknown_basemap_is_non_fatal() {
  let mut network = Network::default();
  network.read_inp("networks/demo.inp").expect("Failed to load demo.inp");

  let config = DisplayConfig { basemap: "not-a-style".to_string(), ..DisplayConfig::default() };
  let options = config.validate().expect("Basemap names are not validated");
  let plan = RenderPlan::build(&network, &options);

  let path = std::env::temp_dir().join("inpmap_basemap_test.html");
  let path = path.to_str().unwrap();
  write_map(&plan, &options, path).expect("Write must succeed without a basemap");

  let page = std::fs::read_to_string(path).unwrap();
  assert!(page.contains("\"tile\":null"));
  // the graphics are still embedded
  assert!(page.contains("\"R1\""));
  assert!(page.contains("LineString"));
}

/// Unsupported output extensions are a terminal error
#[test]
fn test_unsupported_extension() {
  let network = parse_str(
    "[COORDINATES]\n\
     N1 500000 2200000\n\
     N2 501000 2200000\n\
     [PIPES]\n\
     P1 N1 N2\n",
  );
  let options = default_options();
  let plan = RenderPlan::build(&network, &options);

  let err = write_map(&plan, &options, "map.pdf").unwrap_err();
  assert!(err.to_string().contains("pdf"), "unexpected error: {}", err);
}
