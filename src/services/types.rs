use crate::models::{
    Address, Agent, AgentContact, Coordinates, Property, PropertyType, SavedProperty,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

/// Order in which browse results are shown
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently listed first
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "price-low")]
    PriceLowToHigh,
    #[serde(rename = "price-high")]
    PriceHighToLow,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "price-low" => Ok(SortOrder::PriceLowToHigh),
            "price-high" => Ok(SortOrder::PriceHighToLow),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

impl SortOrder {
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortOrder::Newest => b.listing_date.cmp(&a.listing_date),
            SortOrder::Oldest => a.listing_date.cmp(&b.listing_date),
            SortOrder::PriceLowToHigh => a.price.cmp(&b.price),
            SortOrder::PriceHighToLow => b.price.cmp(&a.price),
        }
    }

    /// Stable sort: equal keys keep their input order
    pub fn sort(&self, properties: &mut [Property]) {
        properties.sort_by(|a, b| self.compare(a, b));
    }
}

/// Fields of a listing to be created; the store assigns the id and listing date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
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
    #[serde(default)]
    pub agent: AgentContact,
}

impl NewProperty {
    pub fn into_property(self, id: u32, listing_date: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            address: self.address,
            coordinates: self.coordinates,
            features: self.features,
            images: self.images,
            listing_date,
            agent: self.agent,
        }
    }
}

/// Partial listing update; `None` leaves a field untouched. There is no id field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f32>,
    pub square_feet: Option<u32>,
    pub address: Option<Address>,
    pub coordinates: Option<Coordinates>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub listing_date: Option<DateTime<Utc>>,
    pub agent: Option<AgentContact>,
}

impl PropertyUpdate {
    pub fn apply(self, target: &mut Property) {
        if let Some(v) = self.title {
            target.title = v;
        }
        if let Some(v) = self.description {
            target.description = v;
        }
        if let Some(v) = self.price {
            target.price = v;
        }
        if let Some(v) = self.property_type {
            target.property_type = v;
        }
        if let Some(v) = self.bedrooms {
            target.bedrooms = v;
        }
        if let Some(v) = self.bathrooms {
            target.bathrooms = v;
        }
        if let Some(v) = self.square_feet {
            target.square_feet = v;
        }
        if let Some(v) = self.address {
            target.address = v;
        }
        if let Some(v) = self.coordinates {
            target.coordinates = v;
        }
        if let Some(v) = self.features {
            target.features = v;
        }
        if let Some(v) = self.images {
            target.images = v;
        }
        if let Some(v) = self.listing_date {
            target.listing_date = v;
        }
        if let Some(v) = self.agent {
            target.agent = v;
        }
    }
}

/// A bookmark to be created
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedProperty {
    pub property_id: String,
    #[serde(default)]
    pub notes: String,
}

impl NewSavedProperty {
    pub fn new(property_id: impl ToString) -> Self {
        Self {
            property_id: property_id.to_string(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn into_saved(self, id: u32, saved_date: DateTime<Utc>) -> SavedProperty {
        SavedProperty {
            id,
            property_id: self.property_id,
            notes: self.notes,
            saved_date,
        }
    }
}

/// Bookmark update. Only the notes can change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SavedPropertyUpdate {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewAgent {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub license: String,
    pub photo: String,
}

impl NewAgent {
    pub fn into_agent(self, id: u32) -> Agent {
        Agent {
            id,
            name: self.name,
            company: self.company,
            phone: self.phone,
            email: self.email,
            license: self.license,
            photo: self.photo,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub license: Option<String>,
    pub photo: Option<String>,
}

impl AgentUpdate {
    pub fn apply(self, target: &mut Agent) {
        if let Some(v) = self.name {
            target.name = v;
        }
        if let Some(v) = self.company {
            target.company = v;
        }
        if let Some(v) = self.phone {
            target.phone = v;
        }
        if let Some(v) = self.email {
            target.email = v;
        }
        if let Some(v) = self.license {
            target.license = v;
        }
        if let Some(v) = self.photo {
            target.photo = v;
        }
    }
}
