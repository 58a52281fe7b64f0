//! Geodetic origin payload.
//!
//! [`SphericalCoordinates`] pins a world's local frame to a point on a
//! planetary surface. Angles are kept in degrees, exactly as they arrive from
//! scene descriptions and transport messages, so a value read in is always
//! written back unchanged. Radian accessors are provided for computation.

use serde::{Deserialize, Serialize};

/// Reference surface the coordinates are measured on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    /// WGS-84 Earth ellipsoid.
    #[default]
    EarthWgs84,
    /// Moon, selenographic coordinate system.
    MoonScs,
}

/// Reasons a set of geodetic values is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// Latitude outside [-90, 90] degrees.
    #[error("latitude {0} outside [-90, 90] degrees")]
    Latitude(f64),
    /// Longitude outside [-180, 180] degrees.
    #[error("longitude {0} outside [-180, 180] degrees")]
    Longitude(f64),
    /// A value was NaN or infinite.
    #[error("`{0}` is not finite")]
    NotFinite(&'static str),
}

/// The geodetic position of a world's origin.
///
/// Deserialization goes through [`SphericalCoordinates::new`], so decoded
/// values obey the same ranges as constructed ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSphericalCoordinates")]
pub struct SphericalCoordinates {
    surface: SurfaceType,
    latitude_deg: f64,
    longitude_deg: f64,
    elevation: f64,
    heading_deg: f64,
}

/// Unvalidated serde shape of [`SphericalCoordinates`].
#[derive(Deserialize)]
struct RawSphericalCoordinates {
    surface: SurfaceType,
    latitude_deg: f64,
    longitude_deg: f64,
    elevation: f64,
    heading_deg: f64,
}

impl TryFrom<RawSphericalCoordinates> for SphericalCoordinates {
    type Error = CoordinateError;

    fn try_from(raw: RawSphericalCoordinates) -> Result<Self, Self::Error> {
        Self::new(
            raw.surface,
            raw.latitude_deg,
            raw.longitude_deg,
            raw.elevation,
            raw.heading_deg,
        )
    }
}

impl SphericalCoordinates {
    /// Build a validated origin.
    ///
    /// # Errors
    ///
    /// Returns a [`CoordinateError`] if any value is not finite or an angle
    /// is out of range.
    pub fn new(
        surface: SurfaceType,
        latitude_deg: f64,
        longitude_deg: f64,
        elevation: f64,
        heading_deg: f64,
    ) -> Result<Self, CoordinateError> {
        for (name, value) in [
            ("latitude", latitude_deg),
            ("longitude", longitude_deg),
            ("elevation", elevation),
            ("heading", heading_deg),
        ] {
            if !value.is_finite() {
                return Err(CoordinateError::NotFinite(name));
            }
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(CoordinateError::Latitude(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(CoordinateError::Longitude(longitude_deg));
        }
        Ok(Self {
            surface,
            latitude_deg,
            longitude_deg,
            elevation,
            heading_deg,
        })
    }

    /// Reference surface.
    #[must_use]
    pub fn surface(&self) -> SurfaceType {
        self.surface
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    /// Elevation above the reference surface in metres.
    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Heading offset of the local frame in degrees.
    #[must_use]
    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    /// Latitude in radians.
    #[must_use]
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians.
    #[must_use]
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Heading offset in radians.
    #[must_use]
    pub fn heading_rad(&self) -> f64 {
        self.heading_deg.to_radians()
    }
}

impl Default for SphericalCoordinates {
    fn default() -> Self {
        Self {
            surface: SurfaceType::EarthWgs84,
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            elevation: 0.0,
            heading_deg: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin() {
        let origin = SphericalCoordinates::default();
        assert_eq!(origin.surface(), SurfaceType::EarthWgs84);
        assert_eq!(origin.latitude_deg(), 0.0);
        assert_eq!(origin.longitude_deg(), 0.0);
        assert_eq!(origin.elevation(), 0.0);
        assert_eq!(origin.heading_deg(), 0.0);
    }

    #[test]
    fn test_accessors_keep_degrees_exact() {
        let c = SphericalCoordinates::new(SurfaceType::EarthWgs84, 37.4, -122.1, 0.0, 0.0).unwrap();
        assert_eq!(c.latitude_deg(), 37.4);
        assert_eq!(c.longitude_deg(), -122.1);
        assert!((c.latitude_rad() - 37.4_f64.to_radians()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            SphericalCoordinates::new(SurfaceType::EarthWgs84, 91.0, 0.0, 0.0, 0.0),
            Err(CoordinateError::Latitude(91.0))
        );
        assert_eq!(
            SphericalCoordinates::new(SurfaceType::EarthWgs84, 0.0, -180.5, 0.0, 0.0),
            Err(CoordinateError::Longitude(-180.5))
        );
        assert_eq!(
            SphericalCoordinates::new(SurfaceType::MoonScs, 0.0, 0.0, f64::NAN, 0.0),
            Err(CoordinateError::NotFinite("elevation"))
        );
    }

    #[test]
    fn test_serde_roundtrip_keeps_value() {
        let c = SphericalCoordinates::new(SurfaceType::MoonScs, -12.5, 170.0, 3.0, 45.0).unwrap();
        let bytes = rmp_serde::to_vec_named(&c).unwrap();
        let restored: SphericalCoordinates = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(restored, c);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        #[derive(Serialize)]
        struct Unchecked {
            surface: SurfaceType,
            latitude_deg: f64,
            longitude_deg: f64,
            elevation: f64,
            heading_deg: f64,
        }

        let bytes = rmp_serde::to_vec_named(&Unchecked {
            surface: SurfaceType::EarthWgs84,
            latitude_deg: 500.0,
            longitude_deg: -999.0,
            elevation: 0.0,
            heading_deg: 0.0,
        })
        .unwrap();
        let result: Result<SphericalCoordinates, _> = rmp_serde::from_slice(&bytes);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("latitude 500"));
    }
}
