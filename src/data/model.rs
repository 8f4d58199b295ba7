use std::collections::BTreeMap;
use std::fmt;

use crate::config::{FormLimits, CURRENCY};

// ---------------------------------------------------------------------------
// FeatureColumns – the model's input layout
// ---------------------------------------------------------------------------

/// Ordered names of every column the model was fitted on.
///
/// The order is the positional contract shared by the scaler and the model;
/// it is kept exactly as loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureColumns(Vec<String>);

impl FeatureColumns {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Category – one-hot encoded attributes
// ---------------------------------------------------------------------------

/// Categorical attributes that the model sees as one-hot indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Location,
    PropertyType,
    Furnishing,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Location,
        Category::PropertyType,
        Category::Furnishing,
    ];

    /// Column-name prefix of this category's indicator columns.
    pub const fn prefix(self) -> &'static str {
        match self {
            Category::Location => "Location_",
            Category::PropertyType => "Property Type_",
            Category::Furnishing => "Furnishing_",
        }
    }

    /// Label of the dropdown that selects this category.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Location => "Select Location",
            Category::PropertyType => "Property Type",
            Category::Furnishing => "Furnishing",
        }
    }
}

/// A selectable value of a category, e.g. `("Location_", "Mont Kiara")`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryOption {
    pub prefix: &'static str,
    pub suffix: String,
}

impl CategoryOption {
    /// The indicator column this option switches on.
    pub fn column_name(&self) -> String {
        format!("{}{}", self.prefix, self.suffix)
    }
}

impl fmt::Display for CategoryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix)
    }
}

/// Dropdown choices for every category, in feature-column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChoices(pub BTreeMap<Category, Vec<CategoryOption>>);

impl CategoryChoices {
    /// Options of `category`; empty when the feature list has none.
    pub fn for_category(&self, category: Category) -> &[CategoryOption] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// HouseInputs – what the user entered
// ---------------------------------------------------------------------------

pub const ROOMS: &str = "Rooms";
pub const BATHROOMS: &str = "Bathrooms";
pub const CAR_PARKS: &str = "Car Parks";
pub const SIZE: &str = "Size";

/// Current values of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseInputs {
    pub rooms: u32,
    pub bathrooms: u32,
    pub car_parks: u32,
    pub size: u32,
    pub location: Option<CategoryOption>,
    pub property_type: Option<CategoryOption>,
    pub furnishing: Option<CategoryOption>,
}

impl Default for HouseInputs {
    fn default() -> Self {
        Self {
            rooms: FormLimits::ROOMS.default,
            bathrooms: FormLimits::BATHROOMS.default,
            car_parks: FormLimits::CAR_PARKS.default,
            size: FormLimits::SIZE.default,
            location: None,
            property_type: None,
            furnishing: None,
        }
    }
}

impl HouseInputs {
    pub fn selection(&self, category: Category) -> Option<&CategoryOption> {
        match category {
            Category::Location => self.location.as_ref(),
            Category::PropertyType => self.property_type.as_ref(),
            Category::Furnishing => self.furnishing.as_ref(),
        }
    }

    pub fn selection_mut(&mut self, category: Category) -> &mut Option<CategoryOption> {
        match category {
            Category::Location => &mut self.location,
            Category::PropertyType => &mut self.property_type,
            Category::Furnishing => &mut self.furnishing,
        }
    }
}

// ---------------------------------------------------------------------------
// Encoded rows
// ---------------------------------------------------------------------------

/// A single row keyed by feature name, before alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord(pub BTreeMap<String, f64>);

impl InputRecord {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }
}

/// An [`InputRecord`] laid out in [`FeatureColumns`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow(pub Vec<f64>);

/// An [`AlignedRow`] after the scaler.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledVector(pub Vec<f64>);

// ---------------------------------------------------------------------------
// PredictedPrice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedPrice(pub f64);

impl fmt::Display for PredictedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY} {}", format_amount(self.0))
    }
}

/// Two decimals with `,` thousands separators, e.g. `1,234,567.89`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}
