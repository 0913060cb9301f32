//! Static country table shared by every climate data bank.

use serde::{Deserialize, Serialize};

/// World Bank income grouping used to bias generated indicators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    Low,
    LowerMiddle,
    UpperMiddle,
    High,
}

impl IncomeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeLevel::Low => "low",
            IncomeLevel::LowerMiddle => "lower_middle",
            IncomeLevel::UpperMiddle => "upper_middle",
            IncomeLevel::High => "high",
        }
    }
}

/// A covered country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code.
    pub code: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub income: IncomeLevel,
    pub population_millions: f64,
}

const fn country(
    code: &'static str,
    name: &'static str,
    region: &'static str,
    income: IncomeLevel,
    population_millions: f64,
) -> Country {
    Country {
        code,
        name,
        region,
        income,
        population_millions,
    }
}

use IncomeLevel::{High, Low, LowerMiddle, UpperMiddle};

/// Every country covered by the climate hub, in table order.
pub const COUNTRIES: &[Country] = &[
    country("BRA", "Brazil", "South America", UpperMiddle, 215.0),
    country("IND", "India", "South Asia", LowerMiddle, 1420.0),
    country("KEN", "Kenya", "East Africa", LowerMiddle, 54.0),
    country("SWE", "Sweden", "Europe", High, 10.0),
    country("DEU", "Germany", "Europe", High, 84.0),
    country("JPN", "Japan", "East Asia", High, 125.0),
    country("NGA", "Nigeria", "West Africa", LowerMiddle, 218.0),
    country("ZAF", "South Africa", "Southern Africa", UpperMiddle, 60.0),
    country("MEX", "Mexico", "North America", UpperMiddle, 128.0),
    country("IDN", "Indonesia", "Southeast Asia", UpperMiddle, 275.0),
    country("BGD", "Bangladesh", "South Asia", LowerMiddle, 170.0),
    country("ETH", "Ethiopia", "East Africa", Low, 120.0),
    country("PHL", "Philippines", "Southeast Asia", LowerMiddle, 115.0),
    country("VNM", "Vietnam", "Southeast Asia", LowerMiddle, 98.0),
    country("COL", "Colombia", "South America", UpperMiddle, 52.0),
    country("CAN", "Canada", "North America", High, 39.0),
    country("NZL", "New Zealand", "Pacific", High, 5.0),
    country("CHL", "Chile", "South America", High, 19.0),
    country("RWA", "Rwanda", "East Africa", Low, 13.0),
    country("NPL", "Nepal", "South Asia", LowerMiddle, 30.0),
    country("GHA", "Ghana", "West Africa", LowerMiddle, 33.0),
    country("PER", "Peru", "South America", UpperMiddle, 34.0),
    country("CRI", "Costa Rica", "Central America", UpperMiddle, 5.0),
    country("FJI", "Fiji", "Pacific", UpperMiddle, 0.9),
    country("MWI", "Malawi", "Southern Africa", Low, 20.0),
];

/// A scored dimension of the gender-climate scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub key: &'static str,
    pub label: &'static str,
}

/// Scorecard dimensions, in the order scores are stored.
pub const DIMENSIONS: [Dimension; 6] = [
    Dimension {
        key: "economic_security",
        label: "Economic security",
    },
    Dimension {
        key: "unpaid_care",
        label: "Unpaid care",
    },
    Dimension {
        key: "gender_based_violence",
        label: "Gender-based violence",
    },
    Dimension {
        key: "health",
        label: "Health",
    },
    Dimension {
        key: "participation",
        label: "Participation and leadership",
    },
    Dimension {
        key: "gender_mainstreaming",
        label: "Gender mainstreaming",
    },
];

/// Resolve a country by code or name.
///
/// Exact (case-insensitive) code or name matches win; otherwise the first
/// country whose name contains the query is returned.
pub fn find_country(query: &str) -> Option<&'static Country> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    COUNTRIES
        .iter()
        .find(|country| {
            country.code.to_lowercase() == needle || country.name.to_lowercase() == needle
        })
        .or_else(|| {
            COUNTRIES
                .iter()
                .find(|country| country.name.to_lowercase().contains(&needle))
        })
}

/// Countries whose region name contains `region` (case-insensitive).
pub fn countries_in_region(region: &str) -> Vec<&'static Country> {
    let needle = region.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    COUNTRIES
        .iter()
        .filter(|country| country.region.to_lowercase().contains(&needle))
        .collect()
}
