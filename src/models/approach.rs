//! Close approach records
//!
//! A [`CloseApproach`] is one pass of an NEO near Earth: the UTC time of
//! closest approach, the nominal distance in astronomical units and the
//! relative velocity in km/s. Until [`crate::link`] runs it only knows the
//! designation of its NEO; afterwards it holds a weak reference to it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Weak};

use super::neo::format_fullname;
use super::{FieldValue, NearEarthObject};
use crate::time::{format_datetime, parse_approach_time, ApproachTime};
use crate::{NeoError, Result};

/// Construction inputs for a [`CloseApproach`], apart from the time
#[derive(Debug, Clone, Default)]
pub struct ApproachInfo {
    /// Designation of the approaching NEO
    pub designation: String,
    /// Nominal approach distance in au; 0.0 when absent
    pub distance: Option<FieldValue>,
    /// Relative velocity in km/s; 0.0 when absent
    pub velocity: Option<FieldValue>,
    /// Owning NEO, if already known
    pub neo: Option<Weak<NearEarthObject>>,
}

impl ApproachInfo {
    /// Inputs for an approach by the NEO with this designation
    pub fn new(designation: impl Into<String>) -> Self {
        Self {
            designation: designation.into(),
            ..Default::default()
        }
    }

    /// Set the raw approach distance (au)
    pub fn with_distance(mut self, distance: impl Into<FieldValue>) -> Self {
        self.distance = Some(distance.into());
        self
    }

    /// Set the raw relative velocity (km/s)
    pub fn with_velocity(mut self, velocity: impl Into<FieldValue>) -> Self {
        self.velocity = Some(velocity.into());
        self
    }

    /// Point at an already-shared NEO
    pub fn with_neo(mut self, neo: &Arc<NearEarthObject>) -> Self {
        self.neo = Some(Arc::downgrade(neo));
        self
    }
}

/// A close approach to Earth by an NEO
#[derive(Clone)]
pub struct CloseApproach {
    designation: String,
    time: DateTime<Utc>,
    distance: f64,
    velocity: f64,
    pub(crate) neo: Option<Weak<NearEarthObject>>,
}

/// Flat export form of a [`CloseApproach`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
}

fn coerce_or_zero(value: Option<&FieldValue>, field: &'static str) -> Result<f64> {
    value.map_or(Ok(0.0), |v| v.to_f64(field))
}

impl CloseApproach {
    /// Build a close approach from its raw time and loader inputs
    pub fn new(time: impl Into<ApproachTime>, info: ApproachInfo) -> Result<Self> {
        let time = parse_approach_time(time.into())?;
        let distance = coerce_or_zero(info.distance.as_ref(), "distance")?;
        let velocity = coerce_or_zero(info.velocity.as_ref(), "velocity")?;

        Ok(Self {
            designation: info.designation,
            time,
            distance,
            velocity,
            neo: info.neo,
        })
    }

    /// Designation of the NEO this approach belongs to (the join key)
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Time of closest approach, UTC
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Approach time as `YYYY-MM-DD HH:MM`
    pub fn time_str(&self) -> String {
        format_datetime(&self.time)
    }

    /// Nominal approach distance in au
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Relative velocity in km/s
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The linked NEO, if linking has happened and its catalog is still alive
    pub fn neo(&self) -> Option<Arc<NearEarthObject>> {
        self.neo.as_ref().and_then(Weak::upgrade)
    }

    /// Whether the back-reference resolves to a live NEO
    pub fn is_linked(&self) -> bool {
        self.neo().is_some()
    }

    fn linked_neo(&self) -> Result<Arc<NearEarthObject>> {
        self.neo().ok_or_else(|| NeoError::NotLinked {
            designation: self.designation.clone(),
        })
    }

    /// Full name of the approaching NEO; requires linking
    pub fn fullname(&self) -> Result<String> {
        let neo = self.linked_neo()?;
        Ok(format_fullname(&self.designation, neo.name()))
    }

    /// Human-readable sentence describing the approach; requires linking
    pub fn describe(&self) -> Result<String> {
        let neo = self.linked_neo()?;
        Ok(format!(
            "At {}, '{}' approaches Earth, at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            neo.fullname(),
            self.distance,
            self.velocity
        ))
    }

    /// Flat record for export; the NEO is never included
    pub fn serialize(&self) -> ApproachRecord {
        ApproachRecord {
            datetime_utc: self.time_str(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
        }
    }
}

impl fmt::Debug for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseApproach")
            .field("designation", &self.designation)
            .field("time", &self.time_str())
            .field("distance", &self.distance)
            .field("velocity", &self.velocity)
            .field("neo", &self.neo())
            .finish()
    }
}
