//! In-memory demo datasets read by the Insight tools.
//!
//! Both stores are generated once from a seed and are immutable afterwards,
//! so they can be shared as `Arc` across concurrent analyses.

mod banking;
mod climate;
mod countries;

pub use banking::{
    Account, AccountKind, BankingLedger, EUR_TO_CZK, INCOME_CATEGORY, SPENDING_CATEGORIES,
    Transaction,
};
pub use climate::{
    BankId, ClimateHub, ClimateRecord, CountryRecords, IloRecord, UndpRecord, UnWomenRecord,
    WhoRecord, WorldBankRecord,
};
pub use countries::{COUNTRIES, Country, DIMENSIONS, Dimension, IncomeLevel, countries_in_region, find_country};

/// Round a value to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
