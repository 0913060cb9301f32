//! Utility helpers shared by built-in tools.

use insight_rs_data::{Country, countries_in_region, find_country};
use insight_rs_protocol::ToolError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse JSON args into a typed struct for tool calls.
///
/// Models sometimes send `null` for tools without parameters; that is read
/// as an empty object.
pub(super) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

/// Resolve a country by code or name.
pub(super) fn resolve_country(query: &str) -> Result<&'static Country, ToolError> {
    if query.trim().is_empty() {
        return Err(ToolError::InvalidArguments(
            "country cannot be empty".to_string(),
        ));
    }
    find_country(query)
        .ok_or_else(|| ToolError::ExecutionFailed(format!("country '{query}' not found")))
}

/// Resolve a region filter to its countries.
pub(super) fn resolve_region(region: &str) -> Result<Vec<&'static Country>, ToolError> {
    if region.trim().is_empty() {
        return Err(ToolError::InvalidArguments(
            "region cannot be empty".to_string(),
        ));
    }
    let countries = countries_in_region(region);
    if countries.is_empty() {
        return Err(ToolError::ExecutionFailed(format!(
            "region '{region}' not found"
        )));
    }
    Ok(countries)
}

/// Format an amount the way the banking tools present currency.
pub(super) fn format_czk(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{:02} CZK", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::{format_czk, parse_args, resolve_country, resolve_region};
    use insight_rs_protocol::ToolError;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::{Value, json};

    #[derive(Debug, Deserialize)]
    struct Args {
        #[serde(default)]
        days: Option<u64>,
    }

    #[test]
    fn parse_args_accepts_null_as_empty_object() {
        let args: Args = parse_args(Value::Null).expect("null");
        assert_eq!(args.days, None);

        let err = parse_args::<Args>(json!({ "days": "ten" })).expect_err("bad type");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn lookups_distinguish_bad_input_from_missing_data() {
        assert_eq!(resolve_country("Kenya").expect("kenya").code, "KEN");
        assert!(matches!(
            resolve_country(" "),
            Err(ToolError::InvalidArguments(_))
        ));
        assert!(matches!(
            resolve_country("Atlantis"),
            Err(ToolError::ExecutionFailed(msg)) if msg.contains("Atlantis")
        ));
        assert_eq!(resolve_region("Europe").expect("europe").len(), 2);
        assert!(matches!(
            resolve_region("Antarctica"),
            Err(ToolError::ExecutionFailed(_))
        ));
    }

    #[test]
    fn format_czk_groups_thousands() {
        assert_eq!(format_czk(45_320.5), "45,320.50 CZK");
        assert_eq!(format_czk(-1_234_567.891), "-1,234,567.89 CZK");
        assert_eq!(format_czk(0.0), "0.00 CZK");
        assert_eq!(format_czk(999.0), "999.00 CZK");
    }
}
