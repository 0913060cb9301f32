//! Tools that read the personal banking ledger.

use crate::builtins::utils::{format_czk, parse_args};
use crate::output::ToolOutput;
use crate::schema::{ArgsSchema, ParamType};
use crate::{Tool, ToolContext};
use chrono::Datelike;
use insight_rs_data::{BankingLedger, INCOME_CATEGORY, SPENDING_CATEGORIES, Transaction, round_to};
use insight_rs_protocol::ToolError;
use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_DAYS: u64 = 30;
const MAX_TRANSACTION_ROWS: usize = 20;
const ANOMALY_WINDOW: usize = 60;
const REPEAT_WINDOW: usize = 30;
const REPEAT_THRESHOLD: usize = 5;
const MAX_ANOMALIES: usize = 10;
const DISCRETIONARY: [&str; 2] = ["entertainment", "restaurants"];
const SAVINGS_SHARE: f64 = 0.3;

/// Keys holding account identifiers that should not reach the model verbatim.
pub const BANKING_REDACT_KEYS: [&str; 1] = ["iban"];

fn known_categories() -> impl Iterator<Item = &'static str> {
    SPENDING_CATEGORIES
        .iter()
        .map(|(name, _, _)| *name)
        .chain(std::iter::once(INCOME_CATEGORY))
}

fn positive_days(days: Option<u64>) -> Result<u64, ToolError> {
    match days.unwrap_or(DEFAULT_DAYS) {
        0 => Err(ToolError::InvalidArguments(
            "days must be at least 1".to_string(),
        )),
        days => Ok(days),
    }
}

fn txn_row(txn: &Transaction) -> Value {
    json!({
        "id": txn.id,
        "date": txn.date.to_string(),
        "amount": txn.amount,
        "display": format_czk(txn.amount),
        "category": txn.category,
        "merchant": txn.merchant,
    })
}

/// Totals per key, largest first; ties resolve by key.
fn ranked(totals: HashMap<&str, (f64, usize)>) -> Vec<(&str, f64, usize)> {
    let mut rows: Vec<_> = totals
        .into_iter()
        .map(|(key, (total, count))| (key, total, count))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

fn share(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round_to(100.0 * part / whole, 1)
    } else {
        0.0
    }
}

/// Overview of accounts and balances.
#[derive(Debug)]
pub struct AccountBalancesTool {
    ledger: Arc<BankingLedger>,
}

impl AccountBalancesTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for AccountBalancesTool {
    fn name(&self) -> &str {
        "get_account_balances"
    }

    fn description(&self) -> &str {
        "Overview of all accounts with type, current balance and currency."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new().build()
    }

    fn call(&self, _ctx: &ToolContext, _args: Value) -> Result<ToolOutput, ToolError> {
        let accounts: Vec<Value> = self
            .ledger
            .accounts()
            .iter()
            .map(|account| {
                json!({
                    "id": account.id,
                    "name": account.name,
                    "type": account.kind,
                    "balance": account.balance,
                    "currency": account.currency,
                    "iban": account.iban,
                })
            })
            .collect();
        let total = self.ledger.total_balance_czk();
        Ok(json!({
            "accounts": accounts,
            "total_czk": round_to(total, 2),
            "total_display": format_czk(total),
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct TransactionsArgs {
    #[serde(default)]
    days: Option<u64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    min_amount: Option<f64>,
    #[serde(default)]
    max_amount: Option<f64>,
}

/// Filtered transaction listing.
#[derive(Debug)]
pub struct TransactionsTool {
    ledger: Arc<BankingLedger>,
}

impl TransactionsTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for TransactionsTool {
    fn name(&self) -> &str {
        "get_transactions"
    }

    fn description(&self) -> &str {
        "List transactions filtered by period, category and amount range (at most 20 rows)."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .optional("days", ParamType::Integer, "Days back from today (default 30)")
            .optional(
                "category",
                ParamType::String,
                "Category filter (groceries, restaurants, transport, entertainment, shopping, housing, health, income)",
            )
            .optional("min_amount", ParamType::Number, "Minimum amount (negative for spending)")
            .optional("max_amount", ParamType::Number, "Maximum amount")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: TransactionsArgs = parse_args(args)?;
        let days = positive_days(input.days)?;
        let category = input
            .category
            .map(|category| category.trim().to_lowercase())
            .filter(|category| !category.is_empty());
        if let Some(category) = category.as_deref()
            && !known_categories().any(|known| known == category)
        {
            return Err(ToolError::InvalidArguments(format!(
                "unknown category: {category} (expected one of: {})",
                known_categories().collect::<Vec<_>>().join(", ")
            )));
        }

        let matched: Vec<&Transaction> = self
            .ledger
            .since(days)
            .filter(|txn| category.as_deref().is_none_or(|c| txn.category == c))
            .filter(|txn| input.min_amount.is_none_or(|min| txn.amount >= min))
            .filter(|txn| input.max_amount.is_none_or(|max| txn.amount <= max))
            .collect();
        debug!(
            "filtered transactions (days={}, matched={})",
            days,
            matched.len()
        );
        let rows: Vec<Value> = matched
            .iter()
            .take(MAX_TRANSACTION_ROWS)
            .map(|txn| txn_row(txn))
            .collect();
        Ok(json!({
            "period_days": days,
            "matched": matched.len(),
            "transactions": rows,
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct DaysArgs {
    #[serde(default)]
    days: Option<u64>,
}

/// Spending breakdown by category.
#[derive(Debug)]
pub struct AnalyzeSpendingTool {
    ledger: Arc<BankingLedger>,
}

impl AnalyzeSpendingTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for AnalyzeSpendingTool {
    fn name(&self) -> &str {
        "analyze_spending"
    }

    fn description(&self) -> &str {
        "Analyse spending over a period: category breakdown, totals and average daily spending."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .optional("days", ParamType::Integer, "Days to analyse (default 30)")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: DaysArgs = parse_args(args)?;
        let days = positive_days(input.days)?;
        let mut by_category: HashMap<&str, (f64, usize)> = HashMap::new();
        let mut expenses = 0.0;
        let mut income = 0.0;
        for txn in self.ledger.since(days) {
            if txn.is_expense() {
                expenses += txn.amount.abs();
                let entry = by_category.entry(txn.category.as_str()).or_default();
                entry.0 += txn.amount.abs();
                entry.1 += 1;
            } else {
                income += txn.amount;
            }
        }
        let categories: Vec<Value> = ranked(by_category)
            .into_iter()
            .map(|(category, total, count)| {
                json!({
                    "category": category,
                    "total": round_to(total, 2),
                    "transactions": count,
                    "share_pct": share(total, expenses),
                })
            })
            .collect();
        Ok(json!({
            "period_days": days,
            "total_expenses": round_to(expenses, 2),
            "total_income": round_to(income, 2),
            "balance": round_to(income - expenses, 2),
            "average_daily_expenses": round_to(expenses / days as f64, 2),
            "by_category": categories,
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct AnomalyArgs {
    #[serde(default)]
    sensitivity: Option<String>,
}

/// Flags unusually large or frequently repeated payments.
#[derive(Debug)]
pub struct DetectAnomaliesTool {
    ledger: Arc<BankingLedger>,
}

impl DetectAnomaliesTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for DetectAnomaliesTool {
    fn name(&self) -> &str {
        "detect_anomalies"
    }

    fn description(&self) -> &str {
        "Detect suspicious or unusual transactions such as high amounts or repeated payments."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .one_of(
                "sensitivity",
                &["low", "medium", "high"],
                "Detection sensitivity (default medium)",
                false,
            )
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: AnomalyArgs = parse_args(args)?;
        let sensitivity = input.sensitivity.unwrap_or_else(|| "medium".to_string());
        let threshold = match sensitivity.as_str() {
            "low" => 10_000.0,
            "medium" => 5_000.0,
            "high" => 2_000.0,
            other => {
                return Err(ToolError::InvalidArguments(format!(
                    "unknown sensitivity: {other} (expected one of: low, medium, high)"
                )));
            }
        };

        let recent = self.ledger.transactions();
        let mut anomalies: Vec<Value> = recent
            .iter()
            .take(ANOMALY_WINDOW)
            .filter(|txn| txn.amount.abs() > threshold)
            .map(|txn| {
                let mut row = txn_row(txn);
                if let Some(object) = row.as_object_mut() {
                    object.insert("reason".to_string(), json!("high amount"));
                }
                row
            })
            .collect();

        let mut merchant_counts: HashMap<&str, (f64, usize)> = HashMap::new();
        for txn in recent.iter().take(REPEAT_WINDOW) {
            let entry = merchant_counts.entry(txn.merchant.as_str()).or_default();
            entry.0 += 1.0;
            entry.1 += 1;
        }
        anomalies.extend(
            ranked(merchant_counts)
                .into_iter()
                .filter(|(_, _, count)| *count >= REPEAT_THRESHOLD)
                .map(|(merchant, _, count)| {
                    json!({
                        "merchant": merchant,
                        "transactions": count,
                        "reason": "frequent repeated payments",
                    })
                }),
        );
        let found = anomalies.len();
        anomalies.truncate(MAX_ANOMALIES);
        Ok(json!({
            "sensitivity": sensitivity,
            "threshold": threshold,
            "found": found,
            "anomalies": anomalies,
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct MerchantArgs {
    #[serde(default)]
    days: Option<u64>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Spending grouped by merchant.
#[derive(Debug)]
pub struct SpendingByMerchantTool {
    ledger: Arc<BankingLedger>,
}

impl SpendingByMerchantTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for SpendingByMerchantTool {
    fn name(&self) -> &str {
        "get_spending_by_merchant"
    }

    fn description(&self) -> &str {
        "Spending grouped by merchant, largest first."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .optional("days", ParamType::Integer, "Days back from today (default 30)")
            .optional("limit", ParamType::Integer, "Number of top merchants (default 10)")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: MerchantArgs = parse_args(args)?;
        let days = positive_days(input.days)?;
        let limit = input.limit.unwrap_or(10);
        let mut merchants: HashMap<&str, (f64, usize)> = HashMap::new();
        for txn in self.ledger.since(days).filter(|txn| txn.is_expense()) {
            let entry = merchants.entry(txn.merchant.as_str()).or_default();
            entry.0 += txn.amount.abs();
            entry.1 += 1;
        }
        let rows: Vec<Value> = ranked(merchants)
            .into_iter()
            .take(limit)
            .map(|(merchant, total, count)| {
                json!({
                    "merchant": merchant,
                    "total": round_to(total, 2),
                    "transactions": count,
                })
            })
            .collect();
        Ok(json!({ "period_days": days, "merchants": rows }).into())
    }
}

/// Estimates savings from cutting discretionary spending.
#[derive(Debug)]
pub struct SavingsPotentialTool {
    ledger: Arc<BankingLedger>,
}

impl SavingsPotentialTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for SavingsPotentialTool {
    fn name(&self) -> &str {
        "calculate_savings_potential"
    }

    fn description(&self) -> &str {
        "Estimate savings potential from discretionary spending over the last 30 days."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new().build()
    }

    fn call(&self, _ctx: &ToolContext, _args: Value) -> Result<ToolOutput, ToolError> {
        let (discretionary, total) = self
            .ledger
            .since(DEFAULT_DAYS)
            .filter(|txn| txn.is_expense())
            .fold((0.0, 0.0), |(discretionary, total), txn| {
                let amount = txn.amount.abs();
                if DISCRETIONARY.contains(&txn.category.as_str()) {
                    (discretionary + amount, total + amount)
                } else {
                    (discretionary, total + amount)
                }
            });
        let monthly = discretionary * SAVINGS_SHARE;
        Ok(json!({
            "discretionary_categories": DISCRETIONARY,
            "discretionary_monthly": round_to(discretionary, 2),
            "discretionary_share_pct": share(discretionary, total),
            "potential_monthly_savings": round_to(monthly, 2),
            "potential_yearly_savings": round_to(monthly * 12.0, 2),
            "recommendations": [
                "Cut restaurant visits by 30%",
                "Review streaming and gaming subscriptions",
                "Shop for groceries with a list",
            ],
        })
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct MonthlyReportArgs {
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    year: Option<i32>,
}

/// Income, spending and savings for one calendar month.
#[derive(Debug)]
pub struct MonthlyReportTool {
    ledger: Arc<BankingLedger>,
}

impl MonthlyReportTool {
    pub fn new(ledger: Arc<BankingLedger>) -> Self {
        Self { ledger }
    }
}

impl Tool for MonthlyReportTool {
    fn name(&self) -> &str {
        "generate_monthly_report"
    }

    fn description(&self) -> &str {
        "Monthly financial report with income, spending, savings rate and top categories."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .optional("month", ParamType::Integer, "Month (1-12), defaults to the current month")
            .optional("year", ParamType::Integer, "Year, defaults to the current year")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: MonthlyReportArgs = parse_args(args)?;
        let today = self.ledger.as_of();
        let month = input.month.unwrap_or_else(|| today.month());
        let year = input.year.unwrap_or_else(|| today.year());
        if !(1..=12).contains(&month) {
            return Err(ToolError::InvalidArguments(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        let mut income = 0.0;
        let mut expenses = 0.0;
        let mut count = 0usize;
        let mut by_category: HashMap<&str, (f64, usize)> = HashMap::new();
        for txn in self
            .ledger
            .transactions()
            .iter()
            .filter(|txn| txn.date.month() == month && txn.date.year() == year)
        {
            count += 1;
            if txn.is_expense() {
                expenses += txn.amount.abs();
                let entry = by_category.entry(txn.category.as_str()).or_default();
                entry.0 += txn.amount.abs();
                entry.1 += 1;
            } else {
                income += txn.amount;
            }
        }
        let savings = income - expenses;
        let savings_rate = (income > 0.0).then(|| round_to(100.0 * savings / income, 1));
        let rating = match savings_rate {
            _ if count == 0 => "no activity",
            Some(rate) if rate >= 30.0 => "excellent",
            Some(rate) if rate >= 15.0 => "good",
            Some(rate) if rate >= 0.0 => "tight",
            _ => "overspent",
        };
        let top_categories: Vec<Value> = ranked(by_category)
            .into_iter()
            .take(3)
            .map(|(category, total, _)| {
                json!({
                    "category": category,
                    "total": round_to(total, 2),
                    "share_pct": share(total, expenses),
                })
            })
            .collect();
        Ok(json!({
            "report": format!("Monthly financial report {month:02}/{year}"),
            "transactions": count,
            "income": round_to(income, 2),
            "expenses": round_to(expenses, 2),
            "savings": round_to(savings, 2),
            "savings_rate_pct": savings_rate,
            "top_categories": top_categories,
            "rating": rating,
        })
        .into())
    }
}
