//! Prompt manager (spec.md §4.4): named templates, variable
//! interpolation, and the fixed-order workflow generator.

use crate::error::PromptError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// A named, reusable prompt. `{key}` placeholders in `system_text` and
/// `user_template` are substituted from the caller-supplied variable
/// map at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub system_text: String,
    pub user_template: String,
    pub output_schema: Value,
    pub required_vars: Vec<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl PromptTemplate {
    fn new(name: &str, description: &str, system_text: &str, user_template: &str, output_schema: Value) -> Self {
        let required_vars = extract_placeholders(user_template)
            .into_iter()
            .chain(extract_placeholders(system_text))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            name: name.to_string(),
            description: description.to_string(),
            system_text: system_text.to_string(),
            user_template: user_template.to_string(),
            output_schema,
            required_vars,
            temperature: 0.1,
            max_tokens: 2000,
        }
    }
}

fn extract_placeholders(text: &str) -> Vec<String> {
    let mut placeholders = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        if let Some(end) = rest[start..].find('}') {
            placeholders.push(rest[start + 1..start + end].to_string());
            rest = &rest[start + end + 1..];
        } else {
            break;
        }
    }
    placeholders
}

fn substitute(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Context used to augment a template's `systemText` with
/// company-specific lines; fields are only appended when present.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub funding_stage: Option<String>,
    pub additional_instructions: Option<String>,
}

impl AnalysisContext {
    fn augment(&self, system_text: &str) -> String {
        let mut augmented = system_text.to_string();
        if let Some(name) = &self.company_name {
            augmented.push_str(&format!("\nCompany being analyzed: {name}"));
        }
        if let Some(sector) = &self.sector {
            augmented.push_str(&format!("\nSector: {sector}"));
        }
        if let Some(stage) = &self.funding_stage {
            augmented.push_str(&format!("\nFunding stage: {stage}"));
        }
        if let Some(instructions) = &self.additional_instructions {
            augmented.push_str(&format!("\nAdditional instructions: {instructions}"));
        }
        augmented
    }
}

#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub system_text: String,
    pub user_text: String,
    pub output_schema: Value,
    pub temperature: f32,
    pub max_tokens: u32,
}

static COMPANY_PROFILE: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::new(
        "company_profile",
        "Extract the company's identity and positioning",
        "You are an investment analyst. Extract structured company profile data as JSON. Do not fabricate fields you cannot support from the text.",
        "Documents:\n{documents}\n\nReturn JSON with fields name, oneLiner, sector, stage, foundedYear, location, website, description, socialLinks.",
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "oneLiner": {"type": "string"},
                "sector": {"type": "string"},
                "stage": {"type": "string"},
                "foundedYear": {"type": "integer"},
                "location": {"type": "string"},
                "website": {"type": "string"},
                "description": {"type": "string"}
            },
            "required": ["name"]
        }),
    )
});

static INVESTMENT_METRICS: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::new(
        "investment_metrics",
        "Extract revenue, traction, team, and funding metrics",
        "You are an investment analyst. Extract quantitative metrics as JSON, using null for anything not stated.",
        "Documents:\n{documents}\n\nReturn JSON with fields revenue, traction, team, funding.",
        json!({
            "type": "object",
            "properties": {
                "revenue": {"type": "object"},
                "traction": {"type": "object"},
                "team": {"type": "object"},
                "funding": {"type": "object"}
            }
        }),
    )
});

static MARKET_CLAIMS: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::new(
        "market_claims",
        "Extract market sizing claims and their source quality",
        "You are an investment analyst. Extract market-size claims (TAM/SAM/SOM) as JSON and note how well-sourced they appear.",
        "Documents:\n{documents}\n\nReturn JSON with fields tam, sam, som, marketGrowthRate, targetSegments, sourceQuality.",
        json!({
            "type": "object",
            "properties": {
                "tam": {"type": "number"},
                "sam": {"type": "number"},
                "som": {"type": "number"},
                "marketGrowthRate": {"type": "number"},
                "targetSegments": {"type": "array"},
                "sourceQuality": {"type": "string"}
            }
        }),
    )
});

static TEAM_ASSESSMENT: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::new(
        "team_assessment",
        "Assess founder and team strength",
        "You are an investment analyst. Assess the founding team's domain expertise and completeness as JSON.",
        "Documents:\n{documents}\n\nReturn JSON with fields founders, domainExpertiseYears, priorExits, notableAdvisors, teamCompleteness.",
        json!({
            "type": "object",
            "properties": {
                "founders": {"type": "array"},
                "domainExpertiseYears": {"type": "number"},
                "priorExits": {"type": "integer"},
                "notableAdvisors": {"type": "array"},
                "teamCompleteness": {"type": "string"}
            }
        }),
    )
});

/// Fixed order the LLM analyzer keys positional result handling off.
pub const WORKFLOW_TEMPLATES: [&str; 4] =
    ["company_profile", "investment_metrics", "market_claims", "team_assessment"];

/// Holds the named template table and resolves `Generate` calls.
pub struct PromptManager {
    templates: HashMap<String, PromptTemplate>,
}

impl Default for PromptManager {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert("company_profile".to_string(), COMPANY_PROFILE.clone());
        templates.insert("investment_metrics".to_string(), INVESTMENT_METRICS.clone());
        templates.insert("market_claims".to_string(), MARKET_CLAIMS.clone());
        templates.insert("team_assessment".to_string(), TEAM_ASSESSMENT.clone());
        Self { templates }
    }
}

impl PromptManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, template: PromptTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    pub fn generate(
        &self,
        name: &str,
        ctx: &AnalysisContext,
        vars: &HashMap<String, String>,
    ) -> Result<PreparedPrompt, PromptError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| PromptError::UnknownTemplate(name.to_string()))?;

        for required in &template.required_vars {
            if !vars.contains_key(required) {
                return Err(PromptError::MissingVariable {
                    template: name.to_string(),
                    var: required.clone(),
                });
            }
        }

        Ok(PreparedPrompt {
            system_text: ctx.augment(&substitute(&template.system_text, vars)),
            user_text: substitute(&template.user_template, vars),
            output_schema: template.output_schema.clone(),
            temperature: template.temperature,
            max_tokens: template.max_tokens,
        })
    }

    /// Returns the four standard prompts in the fixed order the
    /// analyzer keys positional result handling off.
    pub fn workflow(
        &self,
        ctx: &AnalysisContext,
        documents: &str,
    ) -> Result<Vec<PreparedPrompt>, PromptError> {
        let mut vars = HashMap::new();
        vars.insert("documents".to_string(), documents.to_string());

        WORKFLOW_TEMPLATES
            .iter()
            .map(|name| self.generate(name, ctx, &vars))
            .collect()
    }
}
