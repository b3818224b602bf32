/// A network node parsed from the [COORDINATES] section.
/// Coordinates are planar (easting/northing) in projected units.
pub struct Node {
  pub id: Box<str>,
  pub x: f64,
  pub y: f64,
}
