use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Kind of dwelling offered by a listing.
///
/// Stored and compared as the type string. Strings outside the four the
/// filter sidebar offers are kept verbatim in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    House,
    Condo,
    Townhouse,
    Apartment,
    Other(String),
}

impl PropertyType {
    /// Types offered by the filter sidebar, in display order
    pub const SELECTABLE: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Apartment,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
            PropertyType::Other(name) => name,
        }
    }
}

impl From<String> for PropertyType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "House" => PropertyType::House,
            "Condo" => PropertyType::Condo,
            "Townhouse" => PropertyType::Townhouse,
            "Apartment" => PropertyType::Apartment,
            _ => PropertyType::Other(name),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        PropertyType::from(name.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl PartialEq for PropertyType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for PropertyType {}

impl Hash for PropertyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = std::convert::Infallible;

    /// Exact, case-sensitive match like the type strings in the data
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PropertyType::from(s))
    }
}

/// Postal address of a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub neighborhood: String,
    pub state: String,
    pub zip_code: String,
}

/// Map position of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Listing agent as embedded in a property record.
///
/// Linked to the agent directory by `name` only; nothing keeps the two in step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub photo: String,
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "Id")]
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub square_feet: u32,
    pub address: Address,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub listing_date: DateTime<Utc>,
    #[serde(default)]
    pub agent: AgentContact,
}

impl Property {
    /// Price per square foot, rounded, or `None` for listings without a size
    pub fn price_per_square_foot(&self) -> Option<u64> {
        if self.square_feet == 0 {
            return None;
        }
        Some((self.price as f64 / self.square_feet as f64).round() as u64)
    }
}

/// Bookmark of a listing.
///
/// `property_id` is the listing id in string form and is not checked against
/// the property collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedProperty {
    #[serde(rename = "Id")]
    pub id: u32,
    pub property_id: String,
    #[serde(default)]
    pub notes: String,
    pub saved_date: DateTime<Utc>,
}

/// Entry in the agent directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub photo: String,
}
