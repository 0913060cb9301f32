//! Shared router state.

use chrono::{DateTime, Utc};
use insight_rs_config::Domain;
use insight_rs_core::InsightHub;
use insight_rs_data::{BankingLedger, ClimateHub};
use insight_rs_protocol::DataSource;
use std::sync::Arc;

/// Dataset backing the active domain.
#[derive(Debug, Clone)]
pub enum Dataset {
    Climate(Arc<ClimateHub>),
    Banking(Arc<BankingLedger>),
}

impl Dataset {
    pub fn domain(&self) -> Domain {
        match self {
            Dataset::Climate(_) => Domain::Climate,
            Dataset::Banking(_) => Domain::Banking,
        }
    }

    /// Source metadata advertised for the dataset.
    pub fn sources(&self) -> Vec<DataSource> {
        match self {
            Dataset::Climate(hub) => hub.sources(),
            Dataset::Banking(ledger) => ledger.sources(),
        }
    }
}

/// State cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub hub: InsightHub,
    pub dataset: Dataset,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(hub: InsightHub, dataset: Dataset) -> Self {
        Self {
            hub,
            dataset,
            started_at: Utc::now(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.dataset.domain()
    }
}
