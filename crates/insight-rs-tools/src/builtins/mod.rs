//! Built-in tools bundled with Insight.

mod banking;
mod climate;
mod plan;
mod stats;
mod utils;

use crate::ToolRegistry;
use insight_rs_data::{BankingLedger, ClimateHub};
use log::info;
use std::sync::Arc;

pub use banking::{
    AccountBalancesTool, AnalyzeSpendingTool, BANKING_REDACT_KEYS, DetectAnomaliesTool,
    MonthlyReportTool, SavingsPotentialTool, SpendingByMerchantTool, TransactionsTool,
};
pub use climate::{
    CompareCountriesTool, CountryProfileTool, CrossReferenceTool, ListDataSourcesTool,
    PolicyBriefTool, QueryBankTool, RegionalDataTool,
};
pub use plan::{CreatePlanTool, UpdatePlanTool};
pub use stats::{CompositeIndexTool, CorrelationTool, GapAnalysisTool, StatisticsTool, TrendTool};

/// Register the plan creation and progress tools.
pub fn register_plan_tools(registry: &ToolRegistry) {
    registry.register(Arc::new(CreatePlanTool));
    registry.register(Arc::new(UpdatePlanTool));
}

/// Register the statistics tools.
pub fn register_stats_tools(registry: &ToolRegistry) {
    registry.register(Arc::new(StatisticsTool));
    registry.register(Arc::new(CorrelationTool));
    registry.register(Arc::new(CompositeIndexTool));
    registry.register(Arc::new(GapAnalysisTool));
    registry.register(Arc::new(TrendTool));
}

/// Register the tools that read the climate hub.
pub fn register_climate_tools(registry: &ToolRegistry, hub: Arc<ClimateHub>) {
    registry.register(Arc::new(ListDataSourcesTool::new(hub.clone())));
    registry.register(Arc::new(CountryProfileTool::new(hub.clone())));
    registry.register(Arc::new(QueryBankTool::new(hub.clone())));
    registry.register(Arc::new(CompareCountriesTool::new(hub.clone())));
    registry.register(Arc::new(RegionalDataTool::new(hub.clone())));
    registry.register(Arc::new(CrossReferenceTool::new(hub.clone())));
    registry.register(Arc::new(PolicyBriefTool::new(hub)));
}

/// Register the tools that read the banking ledger.
pub fn register_banking_tools(registry: &ToolRegistry, ledger: Arc<BankingLedger>) {
    registry.register(Arc::new(AccountBalancesTool::new(ledger.clone())));
    registry.register(Arc::new(TransactionsTool::new(ledger.clone())));
    registry.register(Arc::new(AnalyzeSpendingTool::new(ledger.clone())));
    registry.register(Arc::new(DetectAnomaliesTool::new(ledger.clone())));
    registry.register(Arc::new(SpendingByMerchantTool::new(ledger.clone())));
    registry.register(Arc::new(SavingsPotentialTool::new(ledger.clone())));
    registry.register(Arc::new(MonthlyReportTool::new(ledger)));
}

/// Build a registry with plan, statistics and climate tools.
pub fn climate_tool_registry(hub: Arc<ClimateHub>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_plan_tools(&registry);
    register_stats_tools(&registry);
    register_climate_tools(&registry, hub);
    info!("registered climate tools (count={})", registry.len());
    registry
}

/// Build a registry with plan, statistics and banking tools.
pub fn banking_tool_registry(ledger: Arc<BankingLedger>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_plan_tools(&registry);
    register_stats_tools(&registry);
    register_banking_tools(&registry, ledger);
    info!("registered banking tools (count={})", registry.len());
    registry
}
