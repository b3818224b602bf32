use std::fmt;
use std::str::FromStr;

use crate::error::OptionsError;

// WGS84 ellipsoid parameters
const WGS84_A: f64 = 6378137.0; // semi-major axis (m)
const WGS84_F: f64 = 1.0 / 298.257223563; // flattening

const K0: f64 = 0.9996; // UTM scale factor at the central meridian
const FALSE_EASTING: f64 = 500_000.0; // m
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0; // m

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
  North,
  South,
}

impl FromStr for Hemisphere {
  type Err = OptionsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "N" | "NORTH" => Ok(Hemisphere::North),
      "S" | "SOUTH" => Ok(Hemisphere::South),
      _ => Err(OptionsError::new("hemisphere", format!("expected N or S, got '{}'", s))),
    }
  }
}

impl fmt::Display for Hemisphere {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Hemisphere::North => write!(f, "N"),
      Hemisphere::South => write!(f, "S"),
    }
  }
}

/// A UTM zone number, validated to 1-60 at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone(u8);

impl UtmZone {
  pub fn new(zone: u32) -> Result<Self, OptionsError> {
    if (1..=60).contains(&zone) {
      Ok(UtmZone(zone as u8))
    } else {
      Err(OptionsError::new("zone", format!("UTM zone must be between 1 and 60, got {}", zone)))
    }
  }

  pub fn number(&self) -> u32 {
    self.0 as u32
  }

  /// Central meridian of the zone in degrees.
  fn central_meridian(&self) -> f64 {
    self.0 as f64 * 6.0 - 183.0
  }
}

/// A UTM zone/hemisphere pair defining the planar coordinate system of the
/// network. The inverse transform is a pure per-point function using the
/// Krüger series for the transverse Mercator projection on WGS84.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
  zone: UtmZone,
  hemisphere: Hemisphere,
}

impl Projection {
  pub fn new(zone: UtmZone, hemisphere: Hemisphere) -> Self {
    Self { zone, hemisphere }
  }

  /// EPSG code of the coordinate reference system: 32600+zone in the
  /// northern hemisphere, 32700+zone in the southern.
  pub fn epsg(&self) -> u32 {
    match self.hemisphere {
      Hemisphere::North => 32600 + self.zone.number(),
      Hemisphere::South => 32700 + self.zone.number(),
    }
  }

  fn false_northing(&self) -> f64 {
    match self.hemisphere {
      Hemisphere::North => 0.0,
      Hemisphere::South => FALSE_NORTHING_SOUTH,
    }
  }

  // third flattening of the ellipsoid
  fn n3() -> f64 {
    WGS84_F / (2.0 - WGS84_F)
  }

  // rectifying radius: A = a/(1+n) (1 + n^2/4 + n^4/64 + ...)
  fn rectifying_radius() -> f64 {
    let n = Self::n3();
    WGS84_A / (1.0 + n) * (1.0 + n * n / 4.0 + n.powi(4) / 64.0)
  }

  /// Transform a planar UTM (easting, northing) to geographic (latitude,
  /// longitude) in degrees.
  pub fn to_latlon(&self, easting: f64, northing: f64) -> (f64, f64) {
    let n = Self::n3();
    let radius = Self::rectifying_radius();

    let xi = (northing - self.false_northing()) / (K0 * radius);
    let eta = (easting - FALSE_EASTING) / (K0 * radius);

    // series terms to n^3, sub-mm inside the zone
    let beta = [
      n / 2.0 - 2.0 * n * n / 3.0 + 37.0 * n.powi(3) / 96.0,
      n * n / 48.0 + n.powi(3) / 15.0,
      17.0 * n.powi(3) / 480.0,
    ];

    let mut xi_p = xi;
    let mut eta_p = eta;
    for (j, b) in beta.iter().enumerate() {
      let k = 2.0 * (j + 1) as f64;
      xi_p -= b * (k * xi).sin() * (k * eta).cosh();
      eta_p -= b * (k * xi).cos() * (k * eta).sinh();
    }

    // conformal latitude to geodetic latitude
    let chi = (xi_p.sin() / eta_p.cosh()).asin();
    let delta = [
      2.0 * n - 2.0 * n * n / 3.0 - 2.0 * n.powi(3),
      7.0 * n * n / 3.0 - 8.0 * n.powi(3) / 5.0,
      56.0 * n.powi(3) / 15.0,
    ];

    let mut lat = chi;
    for (j, d) in delta.iter().enumerate() {
      let k = 2.0 * (j + 1) as f64;
      lat += d * (k * chi).sin();
    }

    let lon = self.zone.central_meridian().to_radians() + eta_p.sinh().atan2(xi_p.cos());

    (lat.to_degrees(), lon.to_degrees())
  }

  /// Forward counterpart of `to_latlon`: geographic (latitude, longitude)
  /// in degrees to planar UTM (easting, northing).
  pub fn to_utm(&self, lat: f64, lon: f64) -> (f64, f64) {
    let n = Self::n3();
    let radius = Self::rectifying_radius();

    let phi = lat.to_radians();
    let dlam = (lon - self.zone.central_meridian()).to_radians();

    // conformal latitude
    let e2 = 2.0 * n.sqrt() / (1.0 + n);
    let t = (phi.sin().atanh() - e2 * (e2 * phi.sin()).atanh()).sinh();

    let xi_p = t.atan2(dlam.cos());
    let eta_p = (dlam.sin() / (1.0 + t * t).sqrt()).atanh();

    let alpha = [
      n / 2.0 - 2.0 * n * n / 3.0 + 5.0 * n.powi(3) / 16.0,
      13.0 * n * n / 48.0 - 3.0 * n.powi(3) / 5.0,
      61.0 * n.powi(3) / 240.0,
    ];

    let mut xi = xi_p;
    let mut eta = eta_p;
    for (j, a) in alpha.iter().enumerate() {
      let k = 2.0 * (j + 1) as f64;
      xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
      eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
    }

    let easting = FALSE_EASTING + K0 * radius * eta;
    let northing = self.false_northing() + K0 * radius * xi;

    (easting, northing)
  }
}
