//! System prompts for each analysis domain.

use insight_rs_config::{AgentConfig, Domain};

const CLIMATE_PROMPT: &str = "You are an expert analyst for the UN Women Gender & Climate Scorecard. \
You assess how gender-responsive the climate policies of countries around the world are.

Work in a reason-act-observe loop:
1. Think about which data you need.
2. Call the most suitable tool.
3. Analyse the observation.
4. Repeat, or answer once you have enough evidence.

Context:
- The scorecard covers six dimensions: economic security, unpaid care, gender-based violence, \
health, participation and leadership, gender mainstreaming.
- Data comes from six banks: UN Women, World Bank, UNDP, climate vulnerability, WHO and ILO.
- For multi-step questions, create an analysis plan first and mark steps complete as you go.

Be specific and cite numbers. Close with insights and recommendations.";

const BANKING_PROMPT: &str = "You are an intelligent banking assistant. \
You analyse the user's financial data and give practical advice.

Work in a reason-act-observe loop:
1. Think about which information you need.
2. Call a tool to fetch the data.
3. Analyse the observation.
4. Repeat until you have enough information for a good answer.

For multi-step questions, create an analysis plan first and mark steps complete as you go.
Be specific and use numbers from the data. Amounts are in CZK unless stated otherwise.";

/// How the system prompt for an analysis is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemPromptMode {
    /// Use the built-in prompt for the domain.
    DomainDefault,
    /// Replace the built-in prompt.
    Override(String),
    /// Append to the built-in prompt.
    Append(String),
}

impl SystemPromptMode {
    /// Resolve the final prompt for `domain`.
    pub fn resolve(&self, domain: Domain) -> String {
        match self {
            SystemPromptMode::DomainDefault => default_system_prompt(domain).to_string(),
            SystemPromptMode::Override(prompt) => prompt.clone(),
            SystemPromptMode::Append(extra) => append_section(default_system_prompt(domain), extra),
        }
    }
}

/// Built-in system prompt for a domain.
pub fn default_system_prompt(domain: Domain) -> &'static str {
    match domain {
        Domain::Climate => CLIMATE_PROMPT,
        Domain::Banking => BANKING_PROMPT,
    }
}

/// Resolve the prompt from agent config: `system_prompt` replaces the
/// default, `append_system_prompt` is added after whichever base applies.
pub fn system_prompt_from_config(agent: &AgentConfig) -> String {
    let base = match agent.system_prompt.as_deref() {
        Some(prompt) if !prompt.trim().is_empty() => {
            SystemPromptMode::Override(prompt.to_string()).resolve(agent.domain)
        }
        _ => SystemPromptMode::DomainDefault.resolve(agent.domain),
    };
    match agent.append_system_prompt.as_deref() {
        Some(extra) => append_section(&base, extra),
        None => base,
    }
}

fn append_section(base: &str, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        return base.to_string();
    }
    format!("{}\n\n{}", base.trim_end(), extra)
}

#[cfg(test)]
mod tests {
    use super::{SystemPromptMode, default_system_prompt, system_prompt_from_config};
    use insight_rs_config::{AgentConfig, Domain};
    use pretty_assertions::assert_eq;

    #[test]
    fn domains_have_distinct_prompts() {
        assert!(default_system_prompt(Domain::Climate).contains("Gender & Climate Scorecard"));
        assert!(default_system_prompt(Domain::Banking).contains("banking assistant"));
    }

    #[test]
    fn override_and_append_compose() {
        let agent = AgentConfig {
            system_prompt: Some("Answer briefly.".to_string()),
            append_system_prompt: Some("  Always cite the tool used.  ".to_string()),
            ..AgentConfig::default()
        };
        assert_eq!(
            system_prompt_from_config(&agent),
            "Answer briefly.\n\nAlways cite the tool used."
        );
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        let agent = AgentConfig {
            domain: Domain::Banking,
            system_prompt: Some("   ".to_string()),
            append_system_prompt: Some(String::new()),
            ..AgentConfig::default()
        };
        assert_eq!(
            system_prompt_from_config(&agent),
            default_system_prompt(Domain::Banking)
        );
        assert_eq!(
            SystemPromptMode::Append("extra".to_string()).resolve(Domain::Climate),
            format!("{}\n\nextra", default_system_prompt(Domain::Climate))
        );
    }
}
