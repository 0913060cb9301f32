//! Tools that read the gender and climate indicator banks.

use crate::builtins::stats::correlate;
use crate::builtins::utils::{parse_args, resolve_country, resolve_region};
use crate::output::ToolOutput;
use crate::schema::{ArgsSchema, ParamType};
use crate::{Tool, ToolContext};
use insight_rs_data::{
    BankId, COUNTRIES, ClimateHub, Country, CountryRecords, find_country, round_to,
};
use insight_rs_protocol::ToolError;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::cmp::Ordering;
use std::sync::Arc;

const BANK_CHOICES: [&str; 6] = ["unwomen", "worldbank", "undp", "climate", "who", "ilo"];
const ANALYSIS_TYPES: [&str; 4] = [
    "climate_gender_nexus",
    "economic_health_link",
    "care_climate_burden",
    "vulnerability_inequality",
];

fn parse_bank(value: &str) -> Result<BankId, ToolError> {
    value.parse().map_err(ToolError::InvalidArguments)
}

fn records<'a>(hub: &'a ClimateHub, country: &Country) -> Result<&'a CountryRecords, ToolError> {
    hub.records(country.code).ok_or_else(|| {
        ToolError::ExecutionFailed(format!("no records for country {}", country.code))
    })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Lists every configured data bank.
#[derive(Debug)]
pub struct ListDataSourcesTool {
    hub: Arc<ClimateHub>,
}

impl ListDataSourcesTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }
}

impl Tool for ListDataSourcesTool {
    fn name(&self) -> &str {
        "list_data_sources"
    }

    fn description(&self) -> &str {
        "List all available data sources."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new().build()
    }

    fn call(&self, _ctx: &ToolContext, _args: Value) -> Result<ToolOutput, ToolError> {
        Ok(json!({
            "sources": self.hub.sources(),
            "countries_covered": self.hub.all().len(),
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct CountryArgs {
    country: String,
}

/// Full country profile across all banks.
#[derive(Debug)]
pub struct CountryProfileTool {
    hub: Arc<ClimateHub>,
}

impl CountryProfileTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }
}

impl Tool for CountryProfileTool {
    fn name(&self) -> &str {
        "get_country_profile"
    }

    fn description(&self) -> &str {
        "Complete country profile from every data source."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("country", ParamType::String, "Country name or ISO code")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CountryArgs = parse_args(args)?;
        let country = resolve_country(&input.country)?;
        let profile = self.hub.country_profile(country.code).ok_or_else(|| {
            ToolError::ExecutionFailed(format!("no records for country {}", country.code))
        })?;
        Ok(profile.into())
    }
}

#[derive(Debug, Deserialize)]
struct QueryBankArgs {
    bank: String,
    country: String,
}

/// One bank's view of one country.
#[derive(Debug)]
pub struct QueryBankTool {
    hub: Arc<ClimateHub>,
}

impl QueryBankTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }
}

impl Tool for QueryBankTool {
    fn name(&self) -> &str {
        "query_bank"
    }

    fn description(&self) -> &str {
        "Query a specific data bank for one country."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .one_of("bank", &BANK_CHOICES, "Data bank identifier", true)
            .param("country", ParamType::String, "Country name or ISO code")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: QueryBankArgs = parse_args(args)?;
        let bank = parse_bank(&input.bank)?;
        let country = resolve_country(&input.country)?;
        let data = self.hub.country_data(bank, country.code).ok_or_else(|| {
            ToolError::ExecutionFailed(format!("no {bank} data for {}", country.name))
        })?;
        Ok(data.into())
    }
}

#[derive(Debug, Deserialize)]
struct CompareArgs {
    countries: Vec<String>,
    #[serde(default)]
    banks: Option<Vec<String>>,
}

/// Side-by-side data for several countries.
#[derive(Debug)]
pub struct CompareCountriesTool {
    hub: Arc<ClimateHub>,
}

impl CompareCountriesTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }
}

impl Tool for CompareCountriesTool {
    fn name(&self) -> &str {
        "compare_countries"
    }

    fn description(&self) -> &str {
        "Compare several countries across data banks."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("countries", ParamType::StringArray, "Country names or ISO codes")
            .optional(
                "banks",
                ParamType::StringArray,
                "Optional subset of banks (unwomen, worldbank, undp, climate, who, ilo)",
            )
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CompareArgs = parse_args(args)?;
        if input.countries.is_empty() {
            return Err(ToolError::InvalidArguments(
                "countries cannot be empty".to_string(),
            ));
        }
        let banks = match input.banks {
            Some(banks) if !banks.is_empty() => banks
                .iter()
                .map(|bank| parse_bank(bank))
                .collect::<Result<Vec<_>, _>>()?,
            _ => BankId::ALL.to_vec(),
        };

        let mut comparison = Map::new();
        let mut not_found = Vec::new();
        for query in &input.countries {
            let Some(country) = find_country(query) else {
                not_found.push(query.clone());
                continue;
            };
            let data: Map<String, Value> = banks
                .iter()
                .filter_map(|bank| {
                    self.hub
                        .country_data(*bank, country.code)
                        .map(|data| (bank.as_str().to_string(), data))
                })
                .collect();
            comparison.insert(
                country.name.to_string(),
                json!({ "code": country.code, "data": data }),
            );
        }
        if comparison.is_empty() {
            return Err(ToolError::ExecutionFailed(format!(
                "none of the countries were found: {}",
                not_found.join(", ")
            )));
        }
        debug!(
            "compared countries (found={}, missing={}, banks={})",
            comparison.len(),
            not_found.len(),
            banks.len()
        );
        Ok(json!({ "comparison": comparison, "not_found": not_found }).into())
    }
}

#[derive(Debug, Deserialize)]
struct RegionArgs {
    region: String,
}

/// Regional averages of headline indicators.
#[derive(Debug)]
pub struct RegionalDataTool {
    hub: Arc<ClimateHub>,
}

impl RegionalDataTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }
}

impl Tool for RegionalDataTool {
    fn name(&self) -> &str {
        "get_regional_data"
    }

    fn description(&self) -> &str {
        "Aggregated data for a whole region."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("region", ParamType::String, "Region name (Africa, Europe, Asia...)")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: RegionArgs = parse_args(args)?;
        let countries = resolve_region(&input.region)?;
        let rows = countries
            .iter()
            .map(|country| records(&self.hub, country))
            .collect::<Result<Vec<_>, _>>()?;

        let avg = |f: fn(&CountryRecords) -> f64, places| {
            round_to(mean(rows.iter().map(|r| f(r))), places)
        };
        let sample: Vec<&str> = countries.iter().take(5).map(|c| c.code).collect();
        let mut aggregated = Map::new();
        for bank in BankId::ALL {
            let averages = match bank {
                BankId::UnWomen => json!({
                    "avg_overall_score": avg(|r| r.unwomen.overall_score, 1),
                    "avg_women_in_delegation": avg(|r| r.unwomen.women_in_delegation, 1),
                }),
                BankId::WorldBank => json!({
                    "avg_female_labor_participation": avg(|r| r.worldbank.female_labor_force_participation, 1),
                    "avg_women_in_parliament": avg(|r| r.worldbank.women_in_parliament, 1),
                }),
                BankId::Undp => json!({
                    "avg_hdi": avg(|r| r.undp.hdi, 3),
                    "avg_gender_inequality_index": avg(|r| r.undp.gender_inequality_index, 3),
                }),
                BankId::Climate => json!({
                    "avg_vulnerability_index": avg(|r| r.climate.climate_vulnerability_index, 2),
                    "avg_renewable_share": avg(|r| r.climate.renewable_energy_share, 1),
                }),
                BankId::Who => json!({
                    "avg_maternal_mortality_ratio": avg(|r| f64::from(r.who.maternal_mortality_ratio), 1),
                }),
                BankId::Ilo => json!({
                    "avg_care_gap_hours": avg(|r| r.ilo.care_gap(), 1),
                }),
            };
            aggregated.insert(
                bank.as_str().to_string(),
                json!({
                    "sample_size": rows.len(),
                    "sample_countries": sample,
                    "averages": averages,
                }),
            );
        }
        Ok(json!({
            "region": input.region,
            "countries_count": countries.len(),
            "countries": countries.iter().map(|c| c.name).collect::<Vec<_>>(),
            "aggregated_data": aggregated,
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct CrossReferenceArgs {
    analysis_type: String,
    #[serde(default)]
    region: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct NexusPoint {
    country: &'static str,
    climate_vulnerability: f64,
    gender_climate_score: f64,
}

#[derive(Debug, Clone, Serialize)]
struct EconomicHealthPoint {
    country: &'static str,
    female_labor_participation: f64,
    maternal_mortality_ratio: u32,
}

#[derive(Debug, Clone, Serialize)]
struct CareBurdenPoint {
    country: &'static str,
    care_gap_hours: f64,
    climate_vulnerability: f64,
    double_burden_score: f64,
}

#[derive(Debug, Clone, Serialize)]
struct RiskPoint {
    country: &'static str,
    gender_inequality_index: f64,
    climate_vulnerability: f64,
    compound_risk: f64,
}

fn top<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items.iter().take(n).cloned().collect()
}

/// Cross-bank analyses over all or a region's countries.
#[derive(Debug)]
pub struct CrossReferenceTool {
    hub: Arc<ClimateHub>,
}

impl CrossReferenceTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }

    fn climate_gender_nexus(&self, rows: &[&CountryRecords]) -> Value {
        let mut points: Vec<_> = rows
            .iter()
            .map(|r| NexusPoint {
                country: r.country.name,
                climate_vulnerability: r.climate.climate_vulnerability_index,
                gender_climate_score: r.unwomen.overall_score,
            })
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.climate_vulnerability).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.gender_climate_score).collect();
        let correlation = correlate(&xs, &ys).ok();
        points.sort_by(|a, b| desc(a.climate_vulnerability, b.climate_vulnerability));
        let most_vulnerable = top(&points, 5);
        points.sort_by(|a, b| desc(a.gender_climate_score, b.gender_climate_score));
        json!({
            "analysis_type": "Climate-Gender Nexus",
            "countries_analyzed": points.len(),
            "correlation": correlation,
            "most_vulnerable": most_vulnerable,
            "best_performers": top(&points, 5),
        })
    }

    fn economic_health_link(&self, rows: &[&CountryRecords]) -> Value {
        let mut points: Vec<_> = rows
            .iter()
            .map(|r| EconomicHealthPoint {
                country: r.country.name,
                female_labor_participation: r.worldbank.female_labor_force_participation,
                maternal_mortality_ratio: r.who.maternal_mortality_ratio,
            })
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.female_labor_participation).collect();
        let ys: Vec<f64> = points
            .iter()
            .map(|p| f64::from(p.maternal_mortality_ratio))
            .collect();
        let correlation = correlate(&xs, &ys).ok();
        points.sort_by(|a, b| {
            a.female_labor_participation
                .total_cmp(&b.female_labor_participation)
        });
        let lowest_participation = top(&points, 5);
        points.sort_by(|a, b| b.maternal_mortality_ratio.cmp(&a.maternal_mortality_ratio));
        json!({
            "analysis_type": "Economic-Health Link",
            "countries_analyzed": points.len(),
            "correlation": correlation,
            "lowest_participation": lowest_participation,
            "highest_maternal_mortality": top(&points, 5),
        })
    }

    fn care_climate_burden(&self, rows: &[&CountryRecords]) -> Value {
        let mut points: Vec<_> = rows
            .iter()
            .map(|r| {
                let care_gap = r.ilo.care_gap();
                let vulnerability = r.climate.climate_vulnerability_index;
                CareBurdenPoint {
                    country: r.country.name,
                    care_gap_hours: care_gap,
                    climate_vulnerability: vulnerability,
                    double_burden_score: round_to(care_gap * vulnerability, 2),
                }
            })
            .collect();
        points.sort_by(|a, b| desc(a.double_burden_score, b.double_burden_score));
        let lowest = points[points.len().saturating_sub(5)..].to_vec();
        json!({
            "analysis_type": "Care-Climate Double Burden",
            "countries_analyzed": points.len(),
            "highest_burden": top(&points, 5),
            "lowest_burden": lowest,
        })
    }

    fn vulnerability_inequality(&self, rows: &[&CountryRecords]) -> Value {
        let mut points: Vec<_> = rows
            .iter()
            .map(|r| {
                let gii = r.undp.gender_inequality_index;
                let vulnerability = r.climate.climate_vulnerability_index;
                RiskPoint {
                    country: r.country.name,
                    gender_inequality_index: gii,
                    climate_vulnerability: vulnerability,
                    compound_risk: round_to(gii * vulnerability, 3),
                }
            })
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.climate_vulnerability).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.gender_inequality_index).collect();
        let correlation = correlate(&xs, &ys).ok();
        points.sort_by(|a, b| desc(a.compound_risk, b.compound_risk));
        json!({
            "analysis_type": "Vulnerability-Inequality",
            "countries_analyzed": points.len(),
            "correlation": correlation,
            "highest_risk": top(&points, 8),
        })
    }
}

impl Tool for CrossReferenceTool {
    fn name(&self) -> &str {
        "cross_reference_analysis"
    }

    fn description(&self) -> &str {
        "Cross-reference analysis across data banks, optionally filtered by region."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .one_of("analysis_type", &ANALYSIS_TYPES, "Kind of cross-reference", true)
            .optional("region", ParamType::String, "Optional region filter")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CrossReferenceArgs = parse_args(args)?;
        let countries: Vec<&Country> = match input.region.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => resolve_region(region)?,
            _ => COUNTRIES.iter().collect(),
        };
        let rows = countries
            .iter()
            .map(|country| records(&self.hub, country))
            .collect::<Result<Vec<_>, _>>()?;

        let value = match input.analysis_type.as_str() {
            "climate_gender_nexus" => self.climate_gender_nexus(&rows),
            "economic_health_link" => self.economic_health_link(&rows),
            "care_climate_burden" => self.care_climate_burden(&rows),
            "vulnerability_inequality" => self.vulnerability_inequality(&rows),
            other => {
                return Err(ToolError::InvalidArguments(format!(
                    "unknown analysis type: {other} (expected one of: {})",
                    ANALYSIS_TYPES.join(", ")
                )));
            }
        };
        Ok(value.into())
    }
}

/// Policy brief with recommendations for one country.
#[derive(Debug)]
pub struct PolicyBriefTool {
    hub: Arc<ClimateHub>,
}

impl PolicyBriefTool {
    pub fn new(hub: Arc<ClimateHub>) -> Self {
        Self { hub }
    }
}

impl Tool for PolicyBriefTool {
    fn name(&self) -> &str {
        "generate_policy_brief"
    }

    fn description(&self) -> &str {
        "Generate a policy brief with recommendations for a country."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("country", ParamType::String, "Country name or ISO code")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CountryArgs = parse_args(args)?;
        let country = resolve_country(&input.country)?;
        let r = records(&self.hub, country)?;
        let weakest = r.unwomen.weakest_dimensions();
        let priorities: Vec<&str> = weakest.iter().take(2).map(|(label, _)| *label).collect();
        let care_gap = r.ilo.care_gap();

        let mut recommendations = Vec::new();
        if let Some((label, score)) = weakest.first() {
            recommendations.push(format!("Strengthen {label} (current score {score}/100)"));
        }
        recommendations.push(format!(
            "Increase women's representation in climate delegations (currently {}%)",
            r.unwomen.women_in_delegation
        ));
        recommendations.push(format!(
            "Address unpaid care inequality ({care_gap:.1}h weekly gap)"
        ));
        recommendations.push(format!(
            "Integrate a gender perspective into the NDC (currently {} references)",
            r.unwomen.ndc_gender_references
        ));

        Ok(json!({
            "title": format!("Policy Brief: {}", country.name),
            "date": self.hub.as_of().to_string(),
            "key_indicators": {
                "gender_climate_score": r.unwomen.overall_score,
                "gender_inequality_index": r.undp.gender_inequality_index,
                "climate_vulnerability": r.climate.climate_vulnerability_index,
                "care_gap": care_gap,
            },
            "priority_dimensions": priorities,
            "recommendations": recommendations,
            "sdg_alignment": ["SDG 5 (Gender)", "SDG 13 (Climate)", "SDG 8 (Work)"],
        })
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn hub() -> Arc<ClimateHub> {
        Arc::new(ClimateHub::generate(
            42,
            NaiveDate::from_ymd_opt(2026, 3, 8).expect("date"),
        ))
    }

    fn call(tool: &dyn Tool, args: Value) -> Result<Value, ToolError> {
        tool.call(&ToolContext::new(Uuid::new_v4()), args)
            .map(|output| output.value)
    }

    #[test]
    fn list_sources_reports_six_banks() {
        let value = call(&ListDataSourcesTool::new(hub()), Value::Null).expect("sources");
        assert_eq!(value["sources"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["countries_covered"], json!(25));
    }

    #[test]
    fn country_profile_and_bank_query_resolve_names() {
        let hub = hub();
        let profile = call(
            &CountryProfileTool::new(hub.clone()),
            json!({ "country": "kenya" }),
        )
        .expect("profile");
        assert_eq!(profile["code"], json!("KEN"));

        let undp = call(
            &QueryBankTool::new(hub.clone()),
            json!({ "bank": "undp", "country": "SWE" }),
        )
        .expect("undp");
        assert_eq!(undp["country"], json!("Sweden"));
        assert_eq!(undp, hub.country_data(BankId::Undp, "SWE").expect("data"));

        let err = call(
            &QueryBankTool::new(hub.clone()),
            json!({ "bank": "imf", "country": "SWE" }),
        )
        .expect_err("bank");
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = call(&CountryProfileTool::new(hub), json!({ "country": "Narnia" }))
            .expect_err("country");
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[test]
    fn compare_skips_unknown_countries() {
        let value = call(
            &CompareCountriesTool::new(hub()),
            json!({ "countries": ["Kenya", "Sweden", "Narnia"], "banks": ["ilo"] }),
        )
        .expect("compare");
        let comparison = value["comparison"].as_object().expect("object");
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison["Kenya"]["data"].as_object().map(Map::len), Some(1));
        assert_eq!(value["not_found"], json!(["Narnia"]));

        let err = call(
            &CompareCountriesTool::new(hub()),
            json!({ "countries": ["Narnia"] }),
        )
        .expect_err("none found");
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[test]
    fn regional_data_aggregates_members() {
        let hub = hub();
        let value = call(
            &RegionalDataTool::new(hub.clone()),
            json!({ "region": "Europe" }),
        )
        .expect("europe");
        assert_eq!(value["countries"], json!(["Sweden", "Germany"]));
        let expected = round_to(
            (hub.records("SWE").expect("swe").undp.hdi + hub.records("DEU").expect("deu").undp.hdi)
                / 2.0,
            3,
        );
        assert_eq!(value["aggregated_data"]["undp"]["averages"]["avg_hdi"], json!(expected));
        assert_eq!(value["aggregated_data"]["ilo"]["sample_size"], json!(2));
    }

    #[test]
    fn cross_reference_supports_every_type() {
        let tool = CrossReferenceTool::new(hub());
        for kind in ANALYSIS_TYPES {
            let value = call(&tool, json!({ "analysis_type": kind })).expect(kind);
            assert_eq!(value["countries_analyzed"], json!(25), "{kind}");
        }

        let africa = call(
            &tool,
            json!({ "analysis_type": "vulnerability_inequality", "region": "Africa" }),
        )
        .expect("africa");
        assert_eq!(africa["countries_analyzed"], json!(7));
        let risks: Vec<f64> = africa["highest_risk"]
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|point| point["compound_risk"].as_f64())
            .collect();
        assert_eq!(risks.len(), 7);
        assert!(risks.windows(2).all(|pair| pair[0] >= pair[1]));

        let err = call(&tool, json!({ "analysis_type": "astrology" })).expect_err("type");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn care_burden_lists_both_ends() {
        let value = call(
            &CrossReferenceTool::new(hub()),
            json!({ "analysis_type": "care_climate_burden" }),
        )
        .expect("burden");
        let highest = value["highest_burden"][0]["double_burden_score"]
            .as_f64()
            .expect("highest");
        let lowest = value["lowest_burden"][4]["double_burden_score"]
            .as_f64()
            .expect("lowest");
        assert!(highest >= lowest);
    }

    #[test]
    fn policy_brief_uses_reference_date_and_weakest_dimensions() {
        let hub = hub();
        let value = call(
            &PolicyBriefTool::new(hub.clone()),
            json!({ "country": "Indonesia" }),
        )
        .expect("brief");
        assert_eq!(value["title"], json!("Policy Brief: Indonesia"));
        assert_eq!(value["date"], json!("2026-03-08"));
        let weakest = hub.records("IDN").expect("idn").unwomen.weakest_dimensions();
        assert_eq!(
            value["priority_dimensions"],
            json!([weakest[0].0, weakest[1].0])
        );
        assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn tools_are_idempotent() {
        let tool = CrossReferenceTool::new(hub());
        let args = json!({ "analysis_type": "climate_gender_nexus", "region": "Asia" });
        assert_eq!(
            call(&tool, args.clone()).expect("first"),
            call(&tool, args).expect("second")
        );
    }
}
