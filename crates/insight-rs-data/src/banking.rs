//! Simulated personal banking ledger.

use chrono::{Days, NaiveDate};
use insight_rs_protocol::DataSource;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Approximate EUR to CZK rate used to total balances.
pub const EUR_TO_CZK: f64 = 25.2;

/// Category assigned to incoming payments.
pub const INCOME_CATEGORY: &str = "income";

/// Spending categories with their merchants and amount range in CZK.
pub const SPENDING_CATEGORIES: &[(&str, &[&str], (f64, f64))] = &[
    (
        "groceries",
        &["Albert", "Lidl", "Kaufland", "Billa", "Tesco"],
        (-2500.0, -150.0),
    ),
    (
        "restaurants",
        &["U Fleku", "Ambiente", "KFC", "McDonald's", "Starbucks"],
        (-1500.0, -120.0),
    ),
    (
        "transport",
        &["Czech Railways", "Bolt", "Uber", "Shell", "OMV"],
        (-800.0, -50.0),
    ),
    (
        "entertainment",
        &["Cinema City", "Spotify", "Netflix", "Steam", "PlayStation"],
        (-600.0, -99.0),
    ),
    (
        "shopping",
        &["Alza", "Mall.cz", "Notino", "Zara", "H&M"],
        (-15000.0, -200.0),
    ),
    (
        "housing",
        &["CEZ", "Prague Water", "T-Mobile", "O2", "Vodafone"],
        (-5000.0, -500.0),
    ),
    (
        "health",
        &["Dr.Max Pharmacy", "Benu", "FitPark", "Gym Beam", "Decathlon"],
        (-3000.0, -100.0),
    ),
];

const INCOME_SOURCES: &[&str] = &["Employer Ltd.", "Account transfer", "VAT refund"];
const INCOME_SHARE: f64 = 0.08;
const TRANSACTION_COUNT: usize = 150;
const HISTORY_DAYS: u64 = 90;
const PRIMARY_ACCOUNT: &str = "ACC001";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub kind: AccountKind,
    pub balance: f64,
    pub currency: String,
    pub iban: String,
}

impl Account {
    fn new(id: &str, name: &str, kind: AccountKind, balance: f64, currency: &str, iban: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            balance,
            currency: currency.to_string(),
            iban: iban.to_string(),
        }
    }

    /// Balance converted to CZK.
    pub fn balance_czk(&self) -> f64 {
        if self.currency == "CZK" {
            self.balance
        } else {
            self.balance * EUR_TO_CZK
        }
    }
}

/// A single ledger entry. Negative amounts are spending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub merchant: String,
    pub account_id: String,
    pub description: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

/// Accounts plus a 90-day transaction history, newest first.
#[derive(Debug, Clone)]
pub struct BankingLedger {
    as_of: NaiveDate,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl BankingLedger {
    /// Generate the demo ledger ending at `as_of`.
    pub fn generate(seed: u64, as_of: NaiveDate) -> Self {
        let accounts = vec![
            Account::new(
                "ACC001",
                "Current account",
                AccountKind::Checking,
                45_320.50,
                "CZK",
                "CZ6508000000192000145399",
            ),
            Account::new(
                "ACC002",
                "Savings account",
                AccountKind::Savings,
                250_000.00,
                "CZK",
                "CZ6508000000192000145400",
            ),
            Account::new(
                "ACC003",
                "EUR account",
                AccountKind::Checking,
                2_150.75,
                "EUR",
                "CZ6508000000192000145401",
            ),
        ];

        let mut rng = StdRng::seed_from_u64(seed);
        let mut transactions: Vec<_> = (0..TRANSACTION_COUNT)
            .map(|idx| generate_transaction(&mut rng, idx, as_of))
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        info!(
            "generated banking ledger (seed={}, accounts={}, transactions={})",
            seed,
            accounts.len(),
            transactions.len()
        );
        Self {
            as_of,
            accounts,
            transactions,
        }
    }

    /// Reference date; "today" for every relative window.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions dated within the last `days` days, newest first.
    pub fn since(&self, days: u64) -> impl Iterator<Item = &Transaction> {
        let cutoff = self
            .as_of
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN);
        self.transactions.iter().filter(move |txn| txn.date >= cutoff)
    }

    /// Sum of all balances in CZK.
    pub fn total_balance_czk(&self) -> f64 {
        self.accounts.iter().map(Account::balance_czk).sum()
    }

    /// Metadata for the ledger's data sets.
    pub fn sources(&self) -> Vec<DataSource> {
        vec![
            DataSource {
                id: "accounts".to_string(),
                name: "Accounts".to_string(),
                icon: "🏦".to_string(),
                color: "#1f6feb".to_string(),
                description: format!("{} accounts in CZK and EUR", self.accounts.len()),
            },
            DataSource {
                id: "transactions".to_string(),
                name: "Transactions".to_string(),
                icon: "💳".to_string(),
                color: "#2da44e".to_string(),
                description: format!(
                    "{} card and income transactions over {} days",
                    self.transactions.len(),
                    HISTORY_DAYS
                ),
            },
        ]
    }
}

fn generate_transaction(rng: &mut StdRng, idx: usize, as_of: NaiveDate) -> Transaction {
    let days_ago = rng.random_range(0..=HISTORY_DAYS);
    let date = as_of
        .checked_sub_days(Days::new(days_ago))
        .unwrap_or(as_of);
    let (category, merchants, (low, high)) =
        SPENDING_CATEGORIES[rng.random_range(0..SPENDING_CATEGORIES.len())];
    let merchant = merchants[rng.random_range(0..merchants.len())];
    let amount = rng.random_range(low..high);

    let (category, merchant, amount) = if rng.random_bool(INCOME_SHARE) {
        let source = INCOME_SOURCES[rng.random_range(0..INCOME_SOURCES.len())];
        (INCOME_CATEGORY, source, rng.random_range(25_000.0..65_000.0))
    } else {
        (category, merchant, amount)
    };

    Transaction {
        id: format!("TXN{idx:05}"),
        date,
        amount: crate::round_to(amount, 2),
        currency: "CZK".to_string(),
        category: category.to_string(),
        merchant: merchant.to_string(),
        account_id: PRIMARY_ACCOUNT.to_string(),
        description: format!("Card payment - {merchant}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).expect("date")
    }

    #[test]
    fn ledger_is_seeded_and_sorted_newest_first() {
        let ledger = BankingLedger::generate(42, as_of());
        assert_eq!(ledger.transactions().len(), 150);
        assert_eq!(ledger.transactions(), BankingLedger::generate(42, as_of()).transactions());
        assert!(
            ledger
                .transactions()
                .windows(2)
                .all(|pair| pair[0].date >= pair[1].date)
        );
        let oldest = as_of() - Days::new(90);
        assert!(ledger.transactions().iter().all(|txn| txn.date >= oldest && txn.date <= as_of()));
    }

    #[test]
    fn amounts_match_their_category() {
        let ledger = BankingLedger::generate(9, as_of());
        for txn in ledger.transactions() {
            if txn.category == INCOME_CATEGORY {
                assert!(txn.amount >= 25_000.0);
            } else {
                assert!(txn.is_expense(), "{txn:?}");
            }
        }
    }

    #[test]
    fn since_filters_by_reference_date() {
        let ledger = BankingLedger::generate(42, as_of());
        let cutoff = as_of() - Days::new(7);
        let recent: Vec<_> = ledger.since(7).collect();
        assert!(recent.iter().all(|txn| txn.date >= cutoff));
        assert_eq!(
            recent.len(),
            ledger.transactions().iter().filter(|txn| txn.date >= cutoff).count()
        );
        assert_eq!(ledger.since(90).count(), 150);
    }

    #[test]
    fn sources_describe_both_data_sets() {
        let ledger = BankingLedger::generate(42, as_of());
        let ids: Vec<_> = ledger.sources().into_iter().map(|source| source.id).collect();
        assert_eq!(ids, vec!["accounts".to_string(), "transactions".to_string()]);
    }

    #[test]
    fn total_balance_converts_eur() {
        let ledger = BankingLedger::generate(1, as_of());
        let expected = 45_320.50 + 250_000.00 + 2_150.75 * EUR_TO_CZK;
        assert!((ledger.total_balance_czk() - expected).abs() < 1e-6);
    }
}
