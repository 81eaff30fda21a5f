use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

pub type RawCoord = i32;

// Assumption: 2-complement binary representation
const RAW_COORD_INVALID: RawCoord = RawCoord::MIN;
const RAW_COORD_MAX: RawCoord = RawCoord::MAX;
const RAW_COORD_MIN: RawCoord = -RAW_COORD_MAX;
const RAW_COORD_SPAN: f64 = RAW_COORD_MAX as f64 - RAW_COORD_MIN as f64;

/// Compact fixed-point integer representation of a geographical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoCoord(RawCoord);

impl GeoCoord {
    const INVALID: Self = Self(RAW_COORD_INVALID);

    pub const fn max() -> Self {
        Self(RAW_COORD_MAX)
    }

    pub const fn min() -> Self {
        Self(RAW_COORD_MIN)
    }

    pub const fn to_raw(self) -> RawCoord {
        self.0
    }

    pub const fn from_raw(raw: RawCoord) -> Self {
        Self(raw)
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for GeoCoord {
    fn default() -> Self {
        Self::INVALID
    }
}

impl PartialOrd for GeoCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self == other {
            Some(std::cmp::Ordering::Equal)
        } else if self.is_valid() && other.is_valid() {
            Some(self.to_raw().cmp(&other.to_raw()))
        } else {
            None
        }
    }
}

macro_rules! angular_coord {
    ($(#[$meta:meta])* $name:ident, $deg_max:expr, $rad_max:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Hash)]
        pub struct $name(GeoCoord);

        impl $name {
            const DEG_MAX: f64 = $deg_max;
            const DEG_MIN: f64 = -$deg_max;
            const TO_DEG: f64 = (Self::DEG_MAX - Self::DEG_MIN) / RAW_COORD_SPAN;
            const FROM_DEG: f64 = RAW_COORD_SPAN / (Self::DEG_MAX - Self::DEG_MIN);
            const TO_RAD: f64 = 2.0 * $rad_max / RAW_COORD_SPAN;

            pub const fn max() -> Self {
                Self(GeoCoord::max())
            }

            pub const fn min() -> Self {
                Self(GeoCoord::min())
            }

            pub const fn to_raw(self) -> RawCoord {
                self.0.to_raw()
            }

            pub const fn from_raw(raw: RawCoord) -> Self {
                Self(GeoCoord::from_raw(raw))
            }

            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }

            pub fn to_deg(self) -> f64 {
                if !self.is_valid() {
                    return f64::NAN;
                }
                f64::from(self.to_raw()) * Self::TO_DEG
            }

            pub fn to_rad(self) -> f64 {
                if !self.is_valid() {
                    return f64::NAN;
                }
                f64::from(self.to_raw()) * Self::TO_RAD
            }

            pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
                let deg = deg.into();
                debug_assert!((Self::DEG_MIN..=Self::DEG_MAX).contains(&deg));
                let res = Self::from_raw(f64::round(deg * Self::FROM_DEG) as RawCoord);
                debug_assert!(res.is_valid());
                res
            }

            pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
                let deg = deg.into();
                if (Self::DEG_MIN..=Self::DEG_MAX).contains(&deg) {
                    Some(Self::from_deg(deg))
                } else {
                    None
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.to_deg())
            }
        }
    };
}

angular_coord!(
    /// Latitude in the range [-90, 90] degrees.
    LatCoord,
    90.0,
    std::f64::consts::FRAC_PI_2
);

angular_coord!(
    /// Longitude in the range [-180, 180] degrees.
    LngCoord,
    180.0,
    std::f64::consts::PI
);

#[derive(Debug, Error, PartialEq)]
pub enum MapPointParseError {
    #[error("Invalid latitude degrees: {0}")]
    Latitude(f64),
    #[error("Invalid longitude degrees: {0}")]
    Longitude(f64),
    #[error("Invalid number '{0}'")]
    Number(String),
    #[error("Expected '<lat>,<lng>' but got '{0}'")]
    Format(String),
}

/// Compact internal representation of a geographical location on a (flat) map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_rad(), self.lng.to_rad())
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    fn parse_lat_lng_deg(lat_str: &str, lng_str: &str) -> Result<Self, MapPointParseError> {
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| MapPointParseError::Number(s.to_owned()))
        };
        let lat_deg = parse(lat_str)?;
        let lng_deg = parse(lng_str)?;
        let lat = LatCoord::try_from_deg(lat_deg).ok_or(MapPointParseError::Latitude(lat_deg))?;
        let lng = LngCoord::try_from_deg(lng_deg).ok_or(MapPointParseError::Longitude(lng_deg))?;
        Ok(Self::new(lat, lng))
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat, lng)) = s.split(',').collect_tuple() else {
            return Err(MapPointParseError::Format(s.to_owned()));
        };
        Self::parse_lat_lng_deg(lat, lng)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn infinite() -> Self {
        Self(f64::INFINITY)
    }

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

impl MapPoint {
    /// Great-circle distance on the surface of the earth, using the
    /// special case of the Vincenty formula for numerical accuracy.
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Option<Distance> {
        if !p1.is_valid() || !p2.is_valid() {
            return None;
        }

        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let (lat1_sin, lat1_cos) = lat1_rad.sin_cos();
        let (lat2_sin, lat2_cos) = lat2_rad.sin_cos();

        let dlng = (lng1_rad - lng2_rad).abs();
        let (dlng_sin, dlng_cos) = dlng.sin_cos();

        let nom1 = lat2_cos * dlng_sin;
        let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;

        let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
        let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

        Some(Distance::from_meters(
            MEAN_EARTH_RADIUS.to_meters() * nom.atan2(denom),
        ))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    /// The smallest box enclosing all valid points, or `None` if there are none.
    pub fn enclosing(points: impl IntoIterator<Item = MapPoint>) -> Option<Self> {
        points
            .into_iter()
            .filter(|p| p.is_valid())
            .fold(None, |bbox: Option<(RawCoord, RawCoord, RawCoord, RawCoord)>, p| {
                let (lat, lng) = (p.lat().to_raw(), p.lng().to_raw());
                Some(match bbox {
                    None => (lat, lng, lat, lng),
                    Some((s, w, n, e)) => (s.min(lat), w.min(lng), n.max(lat), e.max(lng)),
                })
            })
            .map(|(s, w, n, e)| {
                Self::new(
                    MapPoint::new(LatCoord::from_raw(s), LngCoord::from_raw(w)),
                    MapPoint::new(LatCoord::from_raw(n), LngCoord::from_raw(e)),
                )
            })
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.sw.lat() <= self.ne.lat()
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        debug_assert!(self.is_valid());
        if !pt.is_valid() || pt.lat() < self.sw.lat() || pt.lat() > self.ne.lat() {
            return false;
        }
        if self.sw.lng() <= self.ne.lng() {
            // regular (inclusive)
            pt.lng() >= self.sw.lng() && pt.lng() <= self.ne.lng()
        } else {
            // across the antimeridian (exclusive)
            !(pt.lng() > self.ne.lng() && pt.lng() < self.sw.lng())
        }
    }
}

impl fmt::Display for MapBbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.sw, self.ne)
    }
}

/// An ordered ring of vertices.
///
/// The ring is implicitly closed (the last vertex connects back to the
/// first) and only describes an area once it has at least
/// [`MapPolygon::MIN_VERTICES`] vertices. Insertion order defines the edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapPolygon(Vec<MapPoint>);

impl MapPolygon {
    pub const MIN_VERTICES: usize = 3;

    pub const fn new(vertices: Vec<MapPoint>) -> Self {
        Self(vertices)
    }

    pub fn vertices(&self) -> &[MapPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.0.len() >= Self::MIN_VERTICES
    }

    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|p| p.is_valid())
    }

    pub fn get(&self, index: usize) -> Option<MapPoint> {
        self.0.get(index).copied()
    }

    pub fn push(&mut self, vertex: MapPoint) {
        self.0.push(vertex);
    }

    pub fn pop(&mut self) -> Option<MapPoint> {
        self.0.pop()
    }

    pub fn remove(&mut self, index: usize) -> Option<MapPoint> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Replaces a vertex and returns the previous one.
    pub fn replace(&mut self, index: usize, vertex: MapPoint) -> Option<MapPoint> {
        self.0
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, vertex))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn bbox(&self) -> Option<MapBbox> {
        MapBbox::enclosing(self.0.iter().copied())
    }

    /// All edges as `(from, to)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (MapPoint, MapPoint)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[(i + n - 1) % n], self.0[i]))
    }

    pub fn into_vertices(self) -> Vec<MapPoint> {
        self.0
    }
}

impl From<Vec<MapPoint>> for MapPolygon {
    fn from(from: Vec<MapPoint>) -> Self {
        Self(from)
    }
}

impl FromIterator<MapPoint> for MapPolygon {
    fn from_iter<I: IntoIterator<Item = MapPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MapPolygon {
    type Item = &'a MapPoint;
    type IntoIter = std::slice::Iter<'a, MapPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
