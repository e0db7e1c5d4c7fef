use crate::core::budget::{format_budget, format_price, BudgetRange};
use crate::core::controller::{ComparisonView, ToolColumn};
use crate::domain::model::Plan;
use crate::utils::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const TITLE: &str = "AI Development Tools Plans Comparison";
pub const EMPTY_COLUMN: &str = "No plans available. Try increasing your budget.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(view: &ComparisonView, range: &BudgetRange, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(view, range)),
        OutputFormat::Json => render_json(view),
        OutputFormat::Csv => render_csv(view),
    }
}

pub fn plan_count_label(count: usize) -> String {
    if count == 1 {
        "1 plan".to_string()
    } else {
        format!("{} plans", count)
    }
}

pub fn render_text(view: &ComparisonView, range: &BudgetRange) -> String {
    let mut out = String::new();
    match view {
        ComparisonView::Loading => {
            out.push_str("Loading pricing data...\n");
        }
        ComparisonView::Failed { message } => {
            let _ = writeln!(out, "❌ {}", message);
            out.push_str("💡 Type 'reload' (or run again) to retry.\n");
        }
        ComparisonView::Ready { budget, columns } => {
            let _ = writeln!(out, "{}", TITLE);
            let _ = writeln!(
                out,
                "Monthly budget: {}  (range {} to {}, step ${})",
                format_budget(*budget),
                format_budget(range.jump_to_min()),
                format_budget(range.jump_to_max()),
                range.step()
            );
            for column in columns {
                out.push('\n');
                write_column(&mut out, column);
            }
        }
    }
    out
}

fn write_column(out: &mut String, column: &ToolColumn) {
    let _ = writeln!(
        out,
        "== {} ({})",
        column.display_name,
        plan_count_label(column.plans.len())
    );
    if column.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_COLUMN);
        return;
    }
    for plan in &column.plans {
        write_card(out, plan);
    }
}

fn write_card(out: &mut String, plan: &Plan) {
    let _ = write!(out, "  * {}", plan.plan_name);
    if !plan.tags().is_empty() {
        let _ = write!(out, "  [{}]", plan.tags().join(", "));
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "    {} ({})",
        format_price(plan.price_usd_monthly),
        plan.billing
    );
    for bullet in &plan.bullets {
        let _ = writeln!(out, "    - {}", bullet);
    }
    let _ = writeln!(out, "    -> {}", plan.url);
}

pub fn render_json(view: &ComparisonView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    tool: &'a str,
    tool_name: &'a str,
    plan_name: &'a str,
    price_usd_monthly: u32,
    billing: &'a str,
    url: &'a str,
    tags: String,
}

/// One row per visible plan, columns in display order. Non-ready views
/// produce only the header.
pub fn render_csv(view: &ComparisonView) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record([
        "tool",
        "toolName",
        "planName",
        "priceUsdMonthly",
        "billing",
        "url",
        "tags",
    ])?;

    if let ComparisonView::Ready { columns, .. } = view {
        for column in columns {
            for plan in &column.plans {
                writer.serialize(CsvRow {
                    tool: &column.tool_id,
                    tool_name: &column.display_name,
                    plan_name: &plan.plan_name,
                    price_usd_monthly: plan.price_usd_monthly,
                    billing: &plan.billing,
                    url: &plan.url,
                    tags: plan.tags().join(";"),
                })?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CompareError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CompareError::ConfigError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Budget;

    fn plan(tool: &str, name: &str, price: u32, tags: Option<Vec<&str>>) -> Plan {
        Plan {
            tool: tool.to_string(),
            plan_name: name.to_string(),
            price_usd_monthly: price,
            billing: "monthly".to_string(),
            bullets: vec!["Unlimited completions".to_string()],
            url: format!("https://{}.example/pricing", tool),
            tags: tags.map(|t| t.into_iter().map(String::from).collect()),
        }
    }

    fn ready_view() -> ComparisonView {
        ComparisonView::Ready {
            budget: Budget::new(20),
            columns: vec![
                ToolColumn {
                    tool_id: "cursor".to_string(),
                    display_name: "Cursor".to_string(),
                    plans: vec![plan("cursor", "Pro", 20, Some(vec!["popular", "best value"]))],
                },
                ToolColumn {
                    tool_id: "kiro".to_string(),
                    display_name: "Kiro".to_string(),
                    plans: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_text_ready_view() {
        let text = render_text(&ready_view(), &BudgetRange::default());

        assert!(text.starts_with(TITLE));
        assert!(text.contains("Monthly budget: $20/mo  (range $0/mo to $200/mo, step $10)"));
        assert!(text.contains("== Cursor (1 plan)"));
        assert!(text.contains("  * Pro  [popular, best value]"));
        assert!(text.contains("    $20/mo (monthly)"));
        assert!(text.contains("    - Unlimited completions"));
        assert!(text.contains("    -> https://cursor.example/pricing"));
        assert!(text.contains("== Kiro (0 plans)"));
        assert!(text.contains(EMPTY_COLUMN));

        // configured order is kept
        assert!(text.find("== Cursor").unwrap() < text.find("== Kiro").unwrap());
    }

    #[test]
    fn test_text_free_plan_price() {
        let view = ComparisonView::Ready {
            budget: Budget::ZERO,
            columns: vec![ToolColumn {
                tool_id: "kiro".to_string(),
                display_name: "Kiro".to_string(),
                plans: vec![plan("kiro", "Free", 0, None)],
            }],
        };
        let text = render_text(&view, &BudgetRange::default());
        assert!(text.contains("    Free (monthly)"));
        assert!(!text.contains('['));
    }

    #[test]
    fn test_text_loading_and_failed_views_show_no_plans() {
        let range = BudgetRange::default();
        assert_eq!(
            render_text(&ComparisonView::Loading, &range),
            "Loading pricing data...\n"
        );

        let failed = render_text(
            &ComparisonView::Failed {
                message: "Unable to load pricing data. Please reload.".to_string(),
            },
            &range,
        );
        assert!(failed.contains("Unable to load pricing data"));
        assert!(failed.contains("reload"));
        assert!(!failed.contains("=="));
    }

    #[test]
    fn test_json_output() {
        let json = render_json(&ready_view()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "ready");
        assert_eq!(value["budget"], 20);
        assert_eq!(value["columns"][0]["toolId"], "cursor");
        assert_eq!(value["columns"][0]["displayName"], "Cursor");
        assert_eq!(value["columns"][0]["plans"][0]["planName"], "Pro");
        assert_eq!(value["columns"][0]["plans"][0]["priceUsdMonthly"], 20);
        assert_eq!(value["columns"][1]["plans"].as_array().unwrap().len(), 0);

        let failed = render_json(&ComparisonView::Failed {
            message: "x".to_string(),
        })
        .unwrap();
        assert!(failed.contains("\"status\": \"failed\""));
    }

    #[test]
    fn test_csv_output() {
        let csv = render_csv(&ready_view()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "tool,toolName,planName,priceUsdMonthly,billing,url,tags");
        assert_eq!(
            lines[1],
            "cursor,Cursor,Pro,20,monthly,https://cursor.example/pricing,popular;best value"
        );

        let header_only = render_csv(&ComparisonView::Loading).unwrap();
        assert_eq!(header_only.lines().count(), 1);
    }

    #[test]
    fn test_plan_count_label() {
        assert_eq!(plan_count_label(0), "0 plans");
        assert_eq!(plan_count_label(1), "1 plan");
        assert_eq!(plan_count_label(3), "3 plans");
    }
}
