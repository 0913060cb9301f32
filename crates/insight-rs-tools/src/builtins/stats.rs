//! Statistical tools over numeric series supplied by the model.

use crate::builtins::utils::parse_args;
use crate::output::ToolOutput;
use crate::schema::{ArgsSchema, ParamType};
use crate::{Tool, ToolContext};
use insight_rs_data::round_to;
use insight_rs_protocol::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Descriptive statistics for a non-empty series.
pub(super) fn describe(values: &[f64]) -> Result<Value, ToolError> {
    if values.is_empty() {
        return Err(ToolError::InvalidArguments(
            "values cannot be empty".to_string(),
        ));
    }
    ensure_finite(values, "values")?;
    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };
    let min = sorted[0];
    let max = sorted[count - 1];
    let variance = if count > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
    } else {
        0.0
    };
    Ok(json!({
        "count": count,
        "sum": round_to(sum, 2),
        "mean": round_to(mean, 2),
        "median": round_to(median, 2),
        "min": round_to(min, 2),
        "max": round_to(max, 2),
        "range": round_to(max - min, 2),
        "std_dev": round_to(variance.sqrt(), 2),
        "variance": round_to(variance, 2),
    }))
}

/// Pearson correlation summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub(super) struct Correlation {
    pub correlation_coefficient: f64,
    pub strength: &'static str,
    pub direction: &'static str,
    pub interpretation: String,
    pub r_squared: f64,
    pub sample_size: usize,
}

/// Population Pearson correlation of two equally long series.
pub(super) fn correlate(xs: &[f64], ys: &[f64]) -> Result<Correlation, ToolError> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(ToolError::InvalidArguments(
            "need two equally long series with at least 2 values".to_string(),
        ));
    }
    ensure_finite(xs, "x_values")?;
    ensure_finite(ys, "y_values")?;
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let covariance = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>()
        / n;
    let std_x = (xs.iter().map(|x| (x - mean_x).powi(2)).sum::<f64>() / n).sqrt();
    let std_y = (ys.iter().map(|y| (y - mean_y).powi(2)).sum::<f64>() / n).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return Err(ToolError::ExecutionFailed(
            "cannot correlate a series with zero standard deviation".to_string(),
        ));
    }
    let r = covariance / (std_x * std_y);
    let strength = if r.abs() > 0.7 {
        "strong"
    } else if r.abs() > 0.4 {
        "moderate"
    } else {
        "weak"
    };
    let direction = if r > 0.0 { "positive" } else { "negative" };
    let mut label = strength.to_string();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Ok(Correlation {
        correlation_coefficient: round_to(r, 4),
        strength,
        direction,
        interpretation: format!("{label} {direction} correlation"),
        r_squared: round_to(r * r, 4),
        sample_size: xs.len(),
    })
}

fn composite(
    indicators: &BTreeMap<String, f64>,
    weights: Option<&BTreeMap<String, f64>>,
) -> Result<Value, ToolError> {
    if indicators.is_empty() {
        return Err(ToolError::InvalidArguments(
            "indicators cannot be empty".to_string(),
        ));
    }
    let weights: BTreeMap<String, f64> = match weights {
        Some(weights) if !weights.is_empty() => weights.clone(),
        _ => indicators.keys().map(|key| (key.clone(), 1.0)).collect(),
    };
    let total: f64 = weights.values().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ToolError::InvalidArguments(
            "weights must sum to a positive number".to_string(),
        ));
    }
    let normalized: BTreeMap<&str, f64> = weights
        .iter()
        .map(|(key, weight)| (key.as_str(), weight / total))
        .collect();

    let mut index = 0.0;
    let mut components = Map::new();
    for (key, value) in indicators {
        let weight = normalized.get(key.as_str()).copied().unwrap_or(0.0);
        index += value * weight;
        components.insert(
            key.clone(),
            json!({
                "value": value,
                "weight": round_to(weight, 3),
                "contribution": round_to(value * weight, 2),
            }),
        );
    }
    let weights_used: Map<String, Value> = normalized
        .iter()
        .map(|(key, weight)| (key.to_string(), json!(round_to(*weight, 3))))
        .collect();
    Ok(json!({
        "composite_index": round_to(index, 2),
        "indicators": indicators,
        "weights_used": weights_used,
        "components": components,
    }))
}

fn gap(current: f64, target: f64, baseline: Option<f64>) -> Value {
    let gap = target - current;
    let ratio = |num: f64, den: f64| if den != 0.0 { num / den * 100.0 } else { 0.0 };
    let mut result = json!({
        "current_value": current,
        "target_value": target,
        "absolute_gap": round_to(gap, 2),
        "gap_percentage": round_to(ratio(gap, target), 2),
        "achievement_rate": round_to(ratio(current, target), 2),
    });
    if let (Some(baseline), Some(object)) = (baseline, result.as_object_mut()) {
        let progress = current - baseline;
        object.insert("baseline".to_string(), json!(baseline));
        object.insert("progress_from_baseline".to_string(), json!(round_to(progress, 2)));
        object.insert(
            "progress_percentage".to_string(),
            json!(round_to(ratio(progress, target - baseline), 2)),
        );
    }
    result
}

fn trend(values: &[f64], years: &[i64]) -> Result<Value, ToolError> {
    if values.len() != years.len() || values.len() < 2 {
        return Err(ToolError::InvalidArguments(
            "need equally long values and years with at least 2 points".to_string(),
        ));
    }
    ensure_finite(values, "values")?;
    let n = values.len() as f64;
    let xs: Vec<f64> = years.iter().map(|year| *year as f64).collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = values.iter().sum::<f64>() / n;
    let numerator: f64 = xs
        .iter()
        .zip(values)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let denominator: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    if denominator == 0.0 {
        return Err(ToolError::ExecutionFailed(
            "cannot fit a trend when all years are equal".to_string(),
        ));
    }
    let slope = numerator / denominator;
    let intercept = mean_y - slope * mean_x;
    let trend_type = if slope.abs() < 0.1 {
        "stable"
    } else if slope > 0.0 {
        "increasing"
    } else {
        "decreasing"
    };
    let last_year = years.iter().copied().max().unwrap_or_default();
    let predictions: Map<String, Value> = [5, 10]
        .into_iter()
        .map(|ahead| {
            let year = last_year + ahead;
            (
                year.to_string(),
                json!(round_to(intercept + slope * year as f64, 2)),
            )
        })
        .collect();
    Ok(json!({
        "slope": round_to(slope, 4),
        "intercept": round_to(intercept, 2),
        "trend_type": trend_type,
        "annual_change": round_to(slope, 2),
        "predictions": predictions,
        "data_points": values.len(),
    }))
}

fn ensure_finite(values: &[f64], field: &str) -> Result<(), ToolError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ToolError::InvalidArguments(format!(
            "{field} must contain finite numbers"
        )))
    }
}

fn insert_label(value: &mut Value, key: &str, label: Option<String>) {
    if let (Some(label), Some(object)) = (label, value.as_object_mut()) {
        object.insert(key.to_string(), Value::String(label));
    }
}

/// Descriptive statistics tool.
#[derive(Debug, Default)]
pub struct StatisticsTool;

#[derive(Debug, Deserialize)]
struct StatisticsArgs {
    values: Vec<f64>,
    #[serde(default)]
    label: Option<String>,
}

impl Tool for StatisticsTool {
    fn name(&self) -> &str {
        "compute_statistics"
    }

    fn description(&self) -> &str {
        "Descriptive statistics: mean, median, standard deviation, range and more."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("values", ParamType::NumberArray, "Values to summarise")
            .optional("label", ParamType::String, "Description of the data")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: StatisticsArgs = parse_args(args)?;
        let mut value = describe(&input.values)?;
        insert_label(&mut value, "label", input.label);
        Ok(value.into())
    }
}

/// Pearson correlation tool.
#[derive(Debug, Default)]
pub struct CorrelationTool;

#[derive(Debug, Deserialize)]
struct CorrelationArgs {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    #[serde(default)]
    x_label: Option<String>,
    #[serde(default)]
    y_label: Option<String>,
}

impl Tool for CorrelationTool {
    fn name(&self) -> &str {
        "compute_correlation"
    }

    fn description(&self) -> &str {
        "Correlation between two variables."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("x_values", ParamType::NumberArray, "")
            .param("y_values", ParamType::NumberArray, "")
            .optional("x_label", ParamType::String, "")
            .optional("y_label", ParamType::String, "")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CorrelationArgs = parse_args(args)?;
        let correlation = correlate(&input.x_values, &input.y_values)?;
        let mut value = serde_json::to_value(correlation)
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        insert_label(&mut value, "x_variable", input.x_label);
        insert_label(&mut value, "y_variable", input.y_label);
        Ok(value.into())
    }
}

/// Weighted composite index tool.
#[derive(Debug, Default)]
pub struct CompositeIndexTool;

#[derive(Debug, Deserialize)]
struct CompositeIndexArgs {
    indicators: BTreeMap<String, f64>,
    #[serde(default)]
    weights: Option<BTreeMap<String, f64>>,
}

impl Tool for CompositeIndexTool {
    fn name(&self) -> &str {
        "compute_composite_index"
    }

    fn description(&self) -> &str {
        "Weighted composite index over several indicators."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("indicators", ParamType::Object, "Mapping of indicator name to value")
            .optional("weights", ParamType::Object, "Optional weights per indicator")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CompositeIndexArgs = parse_args(args)?;
        Ok(composite(&input.indicators, input.weights.as_ref())?.into())
    }
}

/// Gap between current value and target.
#[derive(Debug, Default)]
pub struct GapAnalysisTool;

#[derive(Debug, Deserialize)]
struct GapAnalysisArgs {
    current: f64,
    target: f64,
    #[serde(default)]
    baseline: Option<f64>,
}

impl Tool for GapAnalysisTool {
    fn name(&self) -> &str {
        "compute_gap_analysis"
    }

    fn description(&self) -> &str {
        "Gap between the current state and a target."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("current", ParamType::Number, "")
            .param("target", ParamType::Number, "")
            .optional("baseline", ParamType::Number, "Optional starting value")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: GapAnalysisArgs = parse_args(args)?;
        Ok(gap(input.current, input.target, input.baseline).into())
    }
}

/// Least-squares trend with short-range predictions.
#[derive(Debug, Default)]
pub struct TrendTool;

#[derive(Debug, Deserialize)]
struct TrendArgs {
    values: Vec<f64>,
    years: Vec<i64>,
}

impl Tool for TrendTool {
    fn name(&self) -> &str {
        "compute_trend"
    }

    fn description(&self) -> &str {
        "Linear trend over time with predictions five and ten years ahead."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("values", ParamType::NumberArray, "")
            .param("years", ParamType::IntegerArray, "")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: TrendArgs = parse_args(args)?;
        Ok(trend(&input.values, &input.years)?.into())
    }
}
