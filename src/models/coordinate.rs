use crate::error::Result;
use crate::utils::coordinates::parse_coordinate;

/// WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a pair of raw cell values. Either failing fails the pair.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        Ok(Self::new(
            parse_coordinate(latitude)?,
            parse_coordinate(longitude)?,
        ))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
