use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(OrganizationId);
id_newtype!(EventId);

/// Page sizes the events listing accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PerPage {
    #[default]
    Ten,
    TwentyFive,
    Hundred,
}

impl PerPage {
    pub const ALL: [PerPage; 3] = [PerPage::Ten, PerPage::TwentyFive, PerPage::Hundred];

    pub fn as_u32(self) -> u32 {
        match self {
            PerPage::Ten => 10,
            PerPage::TwentyFive => 25,
            PerPage::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for PerPage {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_u32() == value)
            .ok_or_else(|| format!("unsupported page size {value}; expected one of 10, 25, 100"))
    }
}

impl From<PerPage> for u32 {
    fn from(value: PerPage) -> Self {
        value.as_u32()
    }
}

impl fmt::Display for PerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Finite and inside the WGS84 ranges.
    pub fn is_usable(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// The listing nests the point under `location.location`. A point with a
    /// null or missing component decodes as `None`.
    #[serde(
        default,
        rename = "location",
        deserialize_with = "partial_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinate: Option<Coordinate>,
}

#[derive(Deserialize)]
struct PartialCoordinate {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

fn partial_coordinate<'de, D>(deserializer: D) -> Result<Option<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    let point = Option::<PartialCoordinate>::deserialize(deserializer)?;
    Ok(point.and_then(|point| {
        Some(Coordinate {
            latitude: point.latitude?,
            longitude: point.longitude?,
        })
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(
        default,
        rename = "featured_image_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Event {
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.location
            .as_ref()
            .and_then(|location| location.coordinate)
            .filter(Coordinate::is_usable)
    }

    pub fn venue(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|location| location.venue.as_deref())
            .filter(|venue| !venue.trim().is_empty())
    }
}
