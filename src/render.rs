use std::str::FromStr;

use crate::error::OptionsError;
use crate::geo::{Hemisphere, Projection, UtmZone};
use crate::model::network::Network;

/// Named colors accepted by the display options, resolved to hex.
const NAMED_COLORS: &[(&str, &str)] = &[
  ("red", "#ff0000"),
  ("blue", "#0000ff"),
  ("green", "#008000"),
  ("black", "#000000"),
  ("white", "#ffffff"),
  ("yellow", "#ffff00"),
  ("orange", "#ffa500"),
  ("purple", "#800080"),
  ("gray", "#808080"),
  ("cyan", "#00ffff"),
  ("magenta", "#ff00ff"),
];

/// Resolve a color name or `#rrggbb` hex string to a hex string, or reject
/// it naming the parameter it was supplied for.
pub fn resolve_color(parameter: &'static str, value: &str) -> Result<String, OptionsError> {
  let lower = value.to_lowercase();
  for (name, hex) in NAMED_COLORS {
    if *name == lower {
      return Ok((*hex).to_string());
    }
  }
  let is_hex =
    lower.len() == 7 && lower.starts_with('#') && lower[1..].chars().all(|c| c.is_ascii_hexdigit());
  if is_hex {
    return Ok(lower);
  }
  Err(OptionsError::new(parameter, format!("unknown color '{}'", value)))
}

/// Raw display configuration as supplied on the call surface.
/// Validated into `RenderOptions` before any file I/O happens.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
  pub zone: u32,
  pub hemisphere: String,
  pub line_width: f64,
  pub line_color: String,
  pub junction_size: f64,
  pub junction_color: String,
  pub reservoir_size: f64,
  pub reservoir_color: String,
  pub basemap: String,
}

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      zone: 14,
      hemisphere: "N".to_string(),
      line_width: 1.0,
      line_color: "red".to_string(),
      junction_size: 4.0,
      junction_color: "blue".to_string(),
      reservoir_size: 5.0,
      reservoir_color: "green".to_string(),
      basemap: "streets".to_string(),
    }
  }
}

impl DisplayConfig {
  /// Validate all options, naming the offending parameter on failure.
  pub fn validate(&self) -> Result<RenderOptions, OptionsError> {
    let zone = UtmZone::new(self.zone)?;
    let hemisphere = Hemisphere::from_str(&self.hemisphere)?;

    check_positive("line_width", self.line_width)?;
    check_positive("junction_size", self.junction_size)?;
    check_positive("reservoir_size", self.reservoir_size)?;

    Ok(RenderOptions {
      projection: Projection::new(zone, hemisphere),
      line_width: self.line_width,
      line_color: resolve_color("line_color", &self.line_color)?,
      junction_size: self.junction_size,
      junction_color: resolve_color("junction_color", &self.junction_color)?,
      reservoir_size: self.reservoir_size,
      reservoir_color: resolve_color("reservoir_color", &self.reservoir_color)?,
      basemap: self.basemap.clone(),
    })
  }
}

fn check_positive(parameter: &'static str, value: f64) -> Result<(), OptionsError> {
  if value.is_finite() && value > 0.0 {
    Ok(())
  } else {
    Err(OptionsError::new(parameter, format!("must be a positive number, got {}", value)))
  }
}

/// Validated display options. Colors are resolved to hex strings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
  pub projection: Projection,
  pub line_width: f64,
  pub line_color: String,
  pub junction_size: f64,
  pub junction_color: String,
  pub reservoir_size: f64,
  pub reservoir_color: String,
  pub basemap: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
  Junction,
  Reservoir,
}

/// A node marker in geographic coordinates.
pub struct Marker {
  pub id: Box<str>,
  pub lat: f64,
  pub lon: f64,
  pub kind: MarkerKind,
}

/// A pipe's geometry in geographic coordinates: start node, intermediate
/// vertices in encounter order, end node. Points are (lat, lon) pairs.
pub struct Polyline {
  pub id: Box<str>,
  pub points: Vec<(f64, f64)>,
}

/// The fully projected drawing plan for a network.
pub struct RenderPlan {
  pub polylines: Vec<Polyline>,
  pub markers: Vec<Marker>,
}

impl RenderPlan {
  /// Project the network and assemble the drawing plan.
  ///
  /// Pipes whose endpoints do not both resolve against the node table are
  /// skipped without error. A node listed in the reservoirs section is
  /// always a reservoir marker, never a junction marker.
  pub fn build(network: &Network, options: &RenderOptions) -> RenderPlan {
    let projection = &options.projection;

    let mut polylines = Vec::with_capacity(network.pipes.len());
    for pipe in &network.pipes {
      let (Some(start), Some(end)) = (network.node(&pipe.start_node), network.node(&pipe.end_node))
      else {
        // unresolved endpoint, skip the pipe
        continue;
      };

      let mut points = Vec::new();
      points.push(projection.to_latlon(start.x, start.y));
      if let Some(vertices) = network.vertices.get(pipe.id.as_ref()) {
        for &(x, y) in vertices {
          points.push(projection.to_latlon(x, y));
        }
      }
      points.push(projection.to_latlon(end.x, end.y));

      polylines.push(Polyline { id: pipe.id.clone(), points });
    }

    let markers = network
      .nodes
      .iter()
      .map(|node| {
        let (lat, lon) = projection.to_latlon(node.x, node.y);
        let kind = if network.is_reservoir(&node.id) {
          MarkerKind::Reservoir
        } else {
          MarkerKind::Junction
        };
        Marker { id: node.id.clone(), lat, lon, kind }
      })
      .collect();

    RenderPlan { polylines, markers }
  }
}
