use crate::models::{Property, PropertyType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Filter configuration for property queries.
///
/// Every field is optional and an absent field imposes no constraint. Numeric
/// bounds are inclusive; `Some(0.0)` is a real bound, not "unset". Deserializing
/// accepts the browser's form shape, where an empty string means the field is
/// not applied and numbers may arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFilters {
    /// Lowest accepted price
    #[serde(deserialize_with = "lenient_number")]
    pub price_min: Option<f64>,
    /// Highest accepted price
    #[serde(deserialize_with = "lenient_number")]
    pub price_max: Option<f64>,
    /// Accepted property types; empty accepts every type
    #[serde(deserialize_with = "lenient_types")]
    pub property_types: Vec<PropertyType>,
    #[serde(deserialize_with = "lenient_number")]
    pub bedrooms_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub bathrooms_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub square_feet_min: Option<f64>,
    /// Substring of city, neighborhood or street
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    /// Substring of title, description, street, city or any feature
    #[serde(deserialize_with = "lenient_text")]
    pub search: Option<String>,
}

/// Filter field a [`FilterPill`] stands for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Search,
    Price,
    PropertyTypes,
    BedroomsMin,
    BathroomsMin,
    SquareFeetMin,
    Location,
}

/// Human readable description of one active filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterPill {
    pub key: FilterKey,
    /// The property type this pill removes, for `PropertyTypes` pills
    pub value: Option<PropertyType>,
    pub label: String,
}

impl PropertyFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_type(mut self, property_type: PropertyType) -> Self {
        if !self.property_types.contains(&property_type) {
            self.property_types.push(property_type);
        }
        self
    }

    pub fn bedrooms_at_least(mut self, min: f64) -> Self {
        self.bedrooms_min = Some(min);
        self
    }

    pub fn bathrooms_at_least(mut self, min: f64) -> Self {
        self.bathrooms_min = Some(min);
        self
    }

    pub fn square_feet_at_least(mut self, min: f64) -> Self {
        self.square_feet_min = Some(min);
        self
    }

    pub fn location(mut self, term: impl Into<String>) -> Self {
        self.location = Some(term.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// True when no filter would constrain a query
    pub fn is_empty(&self) -> bool {
        self.price_min.is_none()
            && self.price_max.is_none()
            && self.property_types.is_empty()
            && self.bedrooms_min.is_none()
            && self.bathrooms_min.is_none()
            && self.square_feet_min.is_none()
            && text_term(&self.location).is_none()
            && text_term(&self.search).is_none()
    }

    /// Build the conjunction of all active filters.
    ///
    /// Search terms are lowercased once here rather than per record.
    pub fn predicate(&self) -> impl Fn(&Property) -> bool + '_ {
        let location = text_term(&self.location).map(str::to_lowercase);
        let search = text_term(&self.search).map(str::to_lowercase);

        move |p: &Property| {
            at_least(p.price as f64, self.price_min)
                && at_most(p.price as f64, self.price_max)
                && (self.property_types.is_empty()
                    || self.property_types.contains(&p.property_type))
                && at_least(p.bedrooms as f64, self.bedrooms_min)
                && at_least(p.bathrooms as f64, self.bathrooms_min)
                && at_least(p.square_feet as f64, self.square_feet_min)
                && location.as_deref().map_or(true, |term| matches_location(p, term))
                && search.as_deref().map_or(true, |term| matches_search(p, term))
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        (self.predicate())(property)
    }

    /// Describe the active filters, in the order the browser shows them
    pub fn pills(&self) -> Vec<FilterPill> {
        let mut pills = Vec::new();

        if let Some(search) = text_term(&self.search) {
            pills.push(FilterPill::new(FilterKey::Search, format!("Search: \"{}\"", search)));
        }

        let price = match (self.price_min, self.price_max) {
            (Some(min), Some(max)) => Some(format!("{} - {}", dollars(min), dollars(max))),
            (Some(min), None) => Some(format!("{}+", dollars(min))),
            (None, Some(max)) => Some(format!("Under {}", dollars(max))),
            (None, None) => None,
        };
        if let Some(price) = price {
            pills.push(FilterPill::new(FilterKey::Price, format!("Price: {}", price)));
        }

        for property_type in &self.property_types {
            pills.push(FilterPill {
                key: FilterKey::PropertyTypes,
                value: Some(property_type.clone()),
                label: property_type.to_string(),
            });
        }

        if let Some(min) = self.bedrooms_min {
            pills.push(FilterPill::new(FilterKey::BedroomsMin, format!("{}+ bedrooms", min)));
        }
        if let Some(min) = self.bathrooms_min {
            pills.push(FilterPill::new(FilterKey::BathroomsMin, format!("{}+ bathrooms", min)));
        }
        if let Some(min) = self.square_feet_min {
            pills.push(FilterPill::new(
                FilterKey::SquareFeetMin,
                format!("{}+ sqft", group_thousands(min)),
            ));
        }
        if let Some(location) = text_term(&self.location) {
            pills.push(FilterPill::new(FilterKey::Location, format!("Location: {}", location)));
        }

        pills
    }

    /// Drop one filter. For `PropertyTypes`, a value removes just that type.
    pub fn remove(&mut self, key: FilterKey, value: Option<PropertyType>) {
        match key {
            FilterKey::Search => self.search = None,
            FilterKey::Price => {
                self.price_min = None;
                self.price_max = None;
            }
            FilterKey::PropertyTypes => match value {
                Some(t) => self.property_types.retain(|existing| *existing != t),
                None => self.property_types.clear(),
            },
            FilterKey::BedroomsMin => self.bedrooms_min = None,
            FilterKey::BathroomsMin => self.bathrooms_min = None,
            FilterKey::SquareFeetMin => self.square_feet_min = None,
            FilterKey::Location => self.location = None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl FilterPill {
    fn new(key: FilterKey, label: String) -> Self {
        Self {
            key,
            value: None,
            label,
        }
    }
}

fn text_term(term: &Option<String>) -> Option<&str> {
    term.as_deref().filter(|t| !t.is_empty())
}

fn at_least(value: f64, bound: Option<f64>) -> bool {
    bound.map_or(true, |min| value >= min)
}

fn at_most(value: f64, bound: Option<f64>) -> bool {
    bound.map_or(true, |max| value <= max)
}

/// `term` must already be lowercase
fn contains_ci(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

fn matches_location(p: &Property, term: &str) -> bool {
    contains_ci(&p.address.city, term)
        || contains_ci(&p.address.neighborhood, term)
        || contains_ci(&p.address.street, term)
}

fn matches_search(p: &Property, term: &str) -> bool {
    contains_ci(&p.title, term)
        || contains_ci(&p.description, term)
        || contains_ci(&p.address.street, term)
        || contains_ci(&p.address.city, term)
        || p.features.iter().any(|f| contains_ci(f, term))
}

fn dollars(amount: f64) -> String {
    format!("${}", group_thousands(amount))
}

/// Whole part of `n` with comma thousands separators
fn group_thousands(n: f64) -> String {
    let whole = n.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_types<'de, D>(deserializer: D) -> Result<Vec<PropertyType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(PropertyType::from)
            .collect(),
        _ => Vec::new(),
    })
}
