use crate::utils::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One pricing tier offered by a tool, exactly as the catalog source
/// delivers it. Prices are whole US dollars per month; `0` is a free tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub tool: String,
    pub plan_name: String,
    pub price_usd_monthly: u32,
    pub billing: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    pub url: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.price_usd_monthly == 0
    }

    /// Tags as a slice; absent and null both read as empty.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Monthly budget in whole dollars.
///
/// Negative and fractional amounts are unrepresentable, so the selection
/// engine never sees them. Untyped input goes through `TryFrom<i64>` or
/// `FromStr`, which reject instead of guessing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(u32);

impl Budget {
    pub const ZERO: Budget = Budget(0);

    pub const fn new(dollars: u32) -> Self {
        Self(dollars)
    }

    pub const fn dollars(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Budget {
    fn from(dollars: u32) -> Self {
        Self(dollars)
    }
}

impl TryFrom<i64> for Budget {
    type Error = CompareError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(CompareError::InvalidArgument {
                message: format!("budget must not be negative (got {})", value),
            });
        }
        u32::try_from(value)
            .map(Budget)
            .map_err(|_| CompareError::InvalidArgument {
                message: format!("budget {} is out of range", value),
            })
    }
}

impl std::str::FromStr for Budget {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('$');
        let value: i64 = trimmed.parse().map_err(|_| CompareError::InvalidArgument {
            message: format!("'{}' is not a whole dollar amount", s.trim()),
        })?;
        Budget::try_from(value)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}/mo", self.0)
    }
}

/// A configured tool column: catalog identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub id: String,
    pub name: String,
}

impl ToolEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered list of tools to display. Independent of which tools the
/// catalog actually contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolTable(Vec<ToolEntry>);

impl ToolTable {
    pub fn new(entries: Vec<ToolEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.0.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }
}

impl Default for ToolTable {
    fn default() -> Self {
        Self(vec![
            ToolEntry::new("github-copilot", "GitHub Copilot"),
            ToolEntry::new("cursor", "Cursor"),
            ToolEntry::new("claude", "Claude Code"),
            ToolEntry::new("kiro", "Kiro"),
            ToolEntry::new("codex-cli", "Codex CLI (OpenAI)"),
            ToolEntry::new("windsurf", "Windsurf"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_deserializes_catalog_shape() {
        let json = serde_json::json!({
            "tool": "cursor",
            "planName": "Pro",
            "priceUsdMonthly": 20,
            "billing": "monthly",
            "bullets": ["Unlimited completions"],
            "url": "https://cursor.com/pricing",
            "tags": null
        });

        let plan: Plan = serde_json::from_value(json).unwrap();
        assert_eq!(plan.plan_name, "Pro");
        assert_eq!(plan.price_usd_monthly, 20);
        assert!(plan.tags().is_empty());
        assert!(!plan.is_free());
    }

    #[test]
    fn test_plan_tolerates_missing_optional_fields() {
        let json = r#"{"tool":"kiro","planName":"Free","priceUsdMonthly":0,
                       "billing":"monthly","url":"https://kiro.dev/pricing"}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert!(plan.bullets.is_empty());
        assert_eq!(plan.tags, None);
        assert!(plan.is_free());
    }

    #[test]
    fn test_plan_rejects_negative_or_fractional_price() {
        let negative = r#"{"tool":"a","planName":"x","priceUsdMonthly":-1,
                           "billing":"monthly","bullets":[],"url":"https://a.dev"}"#;
        let fractional = r#"{"tool":"a","planName":"x","priceUsdMonthly":9.5,
                             "billing":"monthly","bullets":[],"url":"https://a.dev"}"#;
        assert!(serde_json::from_str::<Plan>(negative).is_err());
        assert!(serde_json::from_str::<Plan>(fractional).is_err());
    }

    #[test]
    fn test_budget_rejects_negative_input() {
        assert_eq!(Budget::try_from(30i64).unwrap(), Budget::new(30));
        assert!(matches!(
            Budget::try_from(-10i64),
            Err(CompareError::InvalidArgument { .. })
        ));
        assert!(Budget::try_from(i64::MAX).is_err());
    }

    #[test]
    fn test_budget_from_str() {
        assert_eq!("40".parse::<Budget>().unwrap(), Budget::new(40));
        assert_eq!(" $15 ".parse::<Budget>().unwrap(), Budget::new(15));
        assert!("-5".parse::<Budget>().is_err());
        assert!("12.5".parse::<Budget>().is_err());
        assert!("ten".parse::<Budget>().is_err());
    }

    #[test]
    fn test_budget_display() {
        assert_eq!(Budget::new(0).to_string(), "$0/mo");
        assert_eq!(Budget::new(200).to_string(), "$200/mo");
    }

    #[test]
    fn test_default_tool_table_order() {
        let table = ToolTable::default();
        let ids: Vec<&str> = table.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["github-copilot", "cursor", "claude", "kiro", "codex-cli", "windsurf"]
        );
        assert_eq!(table.display_name("codex-cli"), Some("Codex CLI (OpenAI)"));
        assert_eq!(table.display_name("unknown"), None);
    }
}
