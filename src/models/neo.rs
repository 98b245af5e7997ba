//! Near-Earth object records
//!
//! A [`NearEarthObject`] carries the identity and physical parameters of one
//! NEO: its primary designation, optional IAU name, diameter in kilometers
//! (often unknown), and whether it is flagged as potentially hazardous. It
//! also collects the close approaches attached to it by [`crate::link`].

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::{CloseApproach, FieldValue};
use crate::{NeoError, Result};

/// Construction inputs for a [`NearEarthObject`]
#[derive(Debug, Clone)]
pub struct NeoInfo {
    /// Primary designation, empty if the loader had none
    pub designation: String,
    /// IAU name, if any
    pub name: Option<String>,
    /// Diameter in kilometers; falsy values mean "unknown"
    pub diameter: FieldValue,
    /// Hazard flag: `"Y"`, `"N"`, `""` or `false`
    pub hazardous: FieldValue,
    /// Approaches already known at construction time; linked to this NEO by [`crate::link`]
    pub approaches: Vec<CloseApproach>,
}

impl NeoInfo {
    /// Create inputs with the required fields; everything else takes its default
    pub fn new(designation: impl Into<String>, diameter: impl Into<FieldValue>) -> Self {
        Self {
            designation: designation.into(),
            name: None,
            diameter: diameter.into(),
            hazardous: FieldValue::Bool(false),
            approaches: Vec::new(),
        }
    }

    /// Set the IAU name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the raw hazard flag
    pub fn with_hazardous(mut self, hazardous: impl Into<FieldValue>) -> Self {
        self.hazardous = hazardous.into();
        self
    }

    /// Seed the approach collection
    pub fn with_approaches(mut self, approaches: Vec<CloseApproach>) -> Self {
        self.approaches = approaches;
        self
    }
}

/// A near-Earth object (NEO)
#[derive(Clone)]
pub struct NearEarthObject {
    pub(crate) designation: String,
    pub(crate) name: Option<String>,
    pub(crate) diameter: f64,
    pub(crate) hazardous: bool,
    pub(crate) approaches: Vec<Arc<CloseApproach>>,
}

/// Flat export form of a [`NearEarthObject`]
///
/// An unknown diameter stays NaN here; `serde_json` writes it as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRecord {
    pub designation: String,
    pub name: Option<String>,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}

/// Map a raw hazard flag onto a strict boolean
///
/// Only `"Y"`, `"N"`, `""` and `false` are recognized.
pub fn parse_hazard_flag(value: &FieldValue) -> Result<bool> {
    match value {
        FieldValue::Text(s) if s == "Y" => Ok(true),
        FieldValue::Text(s) if s == "N" || s.is_empty() => Ok(false),
        FieldValue::Bool(false) => Ok(false),
        other => Err(NeoError::InvalidHazardFlag(other.to_string())),
    }
}

/// Coerce a raw diameter, mapping falsy values to NaN
pub fn parse_diameter(value: &FieldValue) -> Result<f64> {
    if value.is_falsy() {
        Ok(f64::NAN)
    } else {
        value.to_f64("diameter")
    }
}

/// `"{designation} ({name})"`, or the bare designation when the name is missing or empty
pub(crate) fn format_fullname(designation: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{} ({})", designation, name),
        _ => designation.to_string(),
    }
}

impl NearEarthObject {
    /// Build an NEO from loader inputs
    pub fn new(info: NeoInfo) -> Result<Self> {
        let diameter = parse_diameter(&info.diameter)?;
        let hazardous = parse_hazard_flag(&info.hazardous)?;

        Ok(Self {
            designation: info.designation,
            name: info.name,
            diameter,
            hazardous,
            approaches: info.approaches.into_iter().map(Arc::new).collect(),
        })
    }

    /// Primary designation
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// IAU name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometers; NaN when unknown
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Whether the diameter is a real value rather than the NaN sentinel
    pub fn has_known_diameter(&self) -> bool {
        !self.diameter.is_nan()
    }

    /// Whether the NEO is flagged as potentially hazardous
    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Close approaches attached to this NEO, in dataset order
    pub fn approaches(&self) -> &[Arc<CloseApproach>] {
        &self.approaches
    }

    /// `"433 (Eros)"`, or the bare designation for unnamed NEOs
    pub fn fullname(&self) -> String {
        format_fullname(&self.designation, self.name())
    }

    /// Flat record for export; approaches are never included
    pub fn serialize(&self) -> NeoRecord {
        NeoRecord {
            designation: self.designation.clone(),
            name: self.name.clone(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous {
            "is potentially hazardous"
        } else {
            "is not potentially hazardous"
        };
        write!(
            f,
            "NEO {} has a diameter of {:.3} km and {}.",
            self.fullname(),
            self.diameter,
            hazard
        )
    }
}

impl fmt::Debug for NearEarthObject {
    // Approaches point back at this NEO, so only their count is shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NearEarthObject")
            .field("designation", &self.designation)
            .field("name", &self.name)
            .field("diameter", &self.diameter)
            .field("hazardous", &self.hazardous)
            .field("approaches", &self.approaches.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn eros() -> NearEarthObject {
        NearEarthObject::new(
            NeoInfo::new("433", 16.84)
                .with_name("Eros")
                .with_hazardous("N"),
        )
        .unwrap()
    }

    #[rstest]
    #[case(FieldValue::from("Y"), true)]
    #[case(FieldValue::from("N"), false)]
    #[case(FieldValue::from(""), false)]
    #[case(FieldValue::from(false), false)]
    fn test_recognized_hazard_flags(#[case] flag: FieldValue, #[case] expected: bool) {
        let neo = NearEarthObject::new(NeoInfo::new("1", 1.0).with_hazardous(flag)).unwrap();
        assert_eq!(neo.hazardous(), expected);
    }

    #[rstest]
    #[case(FieldValue::from("maybe"))]
    #[case(FieldValue::from("y"))]
    #[case(FieldValue::from(true))]
    #[case(FieldValue::Null)]
    #[case(FieldValue::from(1))]
    #[case(FieldValue::from(0))]
    #[case(FieldValue::from(0.0))]
    fn test_unrecognized_hazard_flags(#[case] flag: FieldValue) {
        let result = NearEarthObject::new(NeoInfo::new("1", 1.0).with_hazardous(flag));
        assert!(matches!(result, Err(NeoError::InvalidHazardFlag(_))));
    }

    #[rstest]
    #[case(FieldValue::from(0))]
    #[case(FieldValue::from(0.0))]
    #[case(FieldValue::Null)]
    #[case(FieldValue::from(""))]
    #[case(FieldValue::from(false))]
    fn test_falsy_diameter_is_nan(#[case] diameter: FieldValue) {
        let neo = NearEarthObject::new(NeoInfo::new("1", diameter)).unwrap();
        assert!(neo.diameter().is_nan());
        assert!(!neo.has_known_diameter());
    }

    #[rstest]
    #[case(FieldValue::from(16.84), 16.84)]
    #[case(FieldValue::from("0.5"), 0.5)]
    #[case(FieldValue::from(" 2.25 "), 2.25)]
    #[case(FieldValue::from(7), 7.0)]
    fn test_numeric_diameter(#[case] diameter: FieldValue, #[case] expected: f64) {
        let neo = NearEarthObject::new(NeoInfo::new("1", diameter)).unwrap();
        assert_eq!(neo.diameter(), expected);
    }

    #[test]
    fn test_invalid_diameter() {
        let result = NearEarthObject::new(NeoInfo::new("1", "not-a-number"));
        match result {
            Err(NeoError::InvalidNumber { field, .. }) => assert_eq!(field, "diameter"),
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let neo = NearEarthObject::new(NeoInfo::new("2015 AB", FieldValue::Null)).unwrap();
        assert_eq!(neo.name(), None);
        assert!(!neo.hazardous());
        assert!(neo.approaches().is_empty());
    }

    #[test]
    fn test_fullname() {
        assert_eq!(eros().fullname(), "433 (Eros)");

        let unnamed = NearEarthObject::new(NeoInfo::new("2015 AB", 0.1)).unwrap();
        assert_eq!(unnamed.fullname(), "2015 AB");

        let empty_name =
            NearEarthObject::new(NeoInfo::new("2015 AB", 0.1).with_name("")).unwrap();
        assert_eq!(empty_name.fullname(), "2015 AB");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            eros().to_string(),
            "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous."
        );

        let hazardous = NearEarthObject::new(
            NeoInfo::new("99942", 0.325)
                .with_name("Apophis")
                .with_hazardous("Y"),
        )
        .unwrap();
        assert_eq!(
            hazardous.to_string(),
            "NEO 99942 (Apophis) has a diameter of 0.325 km and is potentially hazardous."
        );
    }

    #[test]
    fn test_debug_lists_fields() {
        let debug = format!("{:?}", eros());
        assert!(debug.starts_with("NearEarthObject"));
        assert!(debug.contains("designation: \"433\""));
        assert!(debug.contains("name: Some(\"Eros\")"));
        assert!(debug.contains("hazardous: false"));
    }

    #[test]
    fn test_serialize() {
        let record = eros().serialize();
        assert_eq!(record.designation, "433");
        assert_eq!(record.name.as_deref(), Some("Eros"));
        assert_relative_eq!(record.diameter_km, 16.84);
        assert!(!record.potentially_hazardous);
    }

    #[test]
    fn test_serialize_json_shape() {
        let info = NeoInfo::new("2015 AB", FieldValue::Null).with_hazardous("Y");
        let neo = NearEarthObject::new(info).unwrap();
        let value = serde_json::to_value(neo.serialize()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["designation", "diameter_km", "name", "potentially_hazardous"]
        );
        assert!(object["name"].is_null());
        assert!(object["diameter_km"].is_null());
        assert_eq!(object["potentially_hazardous"], serde_json::Value::Bool(true));
    }
}
