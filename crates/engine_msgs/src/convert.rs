//! Payload ⇄ message conversions.
//!
//! Every conversion here is exact: `from_message(to_message(p)) == p` holds
//! bit-for-bit for every valid payload. The only information dropped is
//! [`msgs::Pose::name`], which no payload carries.

use engine_component::{MessageConvert, SerializationError};
use engine_math::{CoordinateError, DQuat, DVec3, Pose3, SphericalCoordinates, SurfaceType};

use crate::messages as msgs;

fn finite(field: &'static str, value: f64) -> Result<f64, SerializationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SerializationError::out_of_domain(field, "not finite"))
    }
}

/// Largest accepted deviation of an orientation's squared norm from 1.
pub const UNIT_QUATERNION_TOLERANCE: f64 = 1e-6;

impl MessageConvert<msgs::Vector3d> for DVec3 {
    fn to_message(&self) -> msgs::Vector3d {
        msgs::Vector3d {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    fn from_message(message: msgs::Vector3d) -> Result<Self, SerializationError> {
        Ok(DVec3::new(
            finite("x", message.x)?,
            finite("y", message.y)?,
            finite("z", message.z)?,
        ))
    }
}

impl MessageConvert<msgs::Quaternion> for DQuat {
    fn to_message(&self) -> msgs::Quaternion {
        msgs::Quaternion {
            x: self.x,
            y: self.y,
            z: self.z,
            w: self.w,
        }
    }

    /// The quaternion is taken as-is. It must be unit length to within
    /// [`UNIT_QUATERNION_TOLERANCE`] of its squared norm.
    fn from_message(message: msgs::Quaternion) -> Result<Self, SerializationError> {
        let q = DQuat::from_xyzw(
            finite("x", message.x)?,
            finite("y", message.y)?,
            finite("z", message.z)?,
            finite("w", message.w)?,
        );
        let norm_squared = q.length_squared();
        if (norm_squared - 1.0).abs() > UNIT_QUATERNION_TOLERANCE {
            return Err(SerializationError::out_of_domain(
                "orientation",
                format!("not a unit quaternion (squared norm {norm_squared})"),
            ));
        }
        Ok(q)
    }
}

impl MessageConvert<msgs::Pose> for Pose3 {
    fn to_message(&self) -> msgs::Pose {
        msgs::Pose {
            name: None,
            position: Some(self.position.to_message()),
            orientation: Some(self.rotation.to_message()),
        }
    }

    fn from_message(message: msgs::Pose) -> Result<Self, SerializationError> {
        let position = message
            .position
            .map(DVec3::from_message)
            .transpose()?
            .unwrap_or(DVec3::ZERO);
        let rotation = message
            .orientation
            .map(DQuat::from_message)
            .transpose()?
            .unwrap_or(DQuat::IDENTITY);
        Ok(Pose3::new(position, rotation))
    }
}

impl From<SurfaceType> for msgs::SurfaceModel {
    fn from(surface: SurfaceType) -> Self {
        match surface {
            SurfaceType::EarthWgs84 => msgs::SurfaceModel::EarthWgs84,
            SurfaceType::MoonScs => msgs::SurfaceModel::MoonScs,
        }
    }
}

impl From<msgs::SurfaceModel> for SurfaceType {
    fn from(model: msgs::SurfaceModel) -> Self {
        match model {
            msgs::SurfaceModel::EarthWgs84 => SurfaceType::EarthWgs84,
            msgs::SurfaceModel::MoonScs => SurfaceType::MoonScs,
        }
    }
}

fn coordinate_error(err: CoordinateError) -> SerializationError {
    let field = match err {
        CoordinateError::Latitude(_) => "latitude",
        CoordinateError::Longitude(_) => "longitude",
        CoordinateError::NotFinite(field) => field,
    };
    SerializationError::out_of_domain(field, err.to_string())
}

impl MessageConvert<msgs::SphericalCoordinates> for SphericalCoordinates {
    fn to_message(&self) -> msgs::SphericalCoordinates {
        msgs::SphericalCoordinates {
            surface_model: Some(self.surface().into()),
            latitude: Some(self.latitude_deg()),
            longitude: Some(self.longitude_deg()),
            elevation: Some(self.elevation()),
            heading: Some(self.heading_deg()),
        }
    }

    fn from_message(message: msgs::SphericalCoordinates) -> Result<Self, SerializationError> {
        let latitude = message
            .latitude
            .ok_or(SerializationError::MissingField("latitude"))?;
        let longitude = message
            .longitude
            .ok_or(SerializationError::MissingField("longitude"))?;
        SphericalCoordinates::new(
            message.surface_model.unwrap_or_default().into(),
            latitude,
            longitude,
            message.elevation.unwrap_or(0.0),
            message.heading.unwrap_or(0.0),
        )
        .map_err(coordinate_error)
    }
}

impl MessageConvert<msgs::StringMsg> for String {
    fn to_message(&self) -> msgs::StringMsg {
        msgs::StringMsg { data: self.clone() }
    }

    fn from_message(message: msgs::StringMsg) -> Result<Self, SerializationError> {
        Ok(message.data)
    }
}

impl MessageConvert<msgs::Boolean> for bool {
    fn to_message(&self) -> msgs::Boolean {
        msgs::Boolean { data: *self }
    }

    fn from_message(message: msgs::Boolean) -> Result<Self, SerializationError> {
        Ok(message.data)
    }
}
