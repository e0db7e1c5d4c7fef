//! Session-scoped comparison state.
//!
//! The controller owns the catalog, the budget and the load status. It moves
//! through three states:
//!
//! ```text
//! Loading -> Ready    (fetch succeeded)
//! Loading -> Failed   (transport error, non-success status, bad payload)
//! Ready   -> Ready    (budget changed, view recomputed)
//! Failed  -> Loading  (explicit reload only)
//! ```
//!
//! Every budget write recomputes the per-tool groups synchronously and
//! wholesale. Load results carry a [`LoadTicket`]; a result whose ticket is
//! older than the current session generation, or that arrives after
//! [`ComparisonController::close`], is dropped.

use crate::core::budget::{BudgetInput, BudgetRange};
use crate::core::selection::{affordable_by_tool, ToolGroups};
use crate::domain::model::{Budget, Plan, ToolTable};
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

enum Phase {
    Loading,
    Ready { catalog: Vec<Plan>, groups: ToolGroups },
    Failed { message: String, detail: String },
}

/// Proof that a load was started in a given session generation.
#[derive(Debug)]
#[must_use = "pass the ticket to finish_load"]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One configured tool with the plans visible at the current budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolColumn {
    pub tool_id: String,
    pub display_name: String,
    pub plans: Vec<Plan>,
}

impl ToolColumn {
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// What the presentation layer gets: fully loading, fully failed, or fully
/// ready. Never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ComparisonView {
    Loading,
    Failed {
        message: String,
    },
    Ready {
        budget: Budget,
        columns: Vec<ToolColumn>,
    },
}

pub struct ComparisonController<S: CatalogSource> {
    source: S,
    tools: ToolTable,
    range: BudgetRange,
    budget: Budget,
    phase: Phase,
    generation: u64,
    closed: bool,
}

impl<S: CatalogSource> ComparisonController<S> {
    pub fn new(source: S, tools: ToolTable, range: BudgetRange) -> Self {
        Self {
            source,
            tools,
            budget: range.initial(),
            range,
            phase: Phase::Loading,
            generation: 0,
            closed: false,
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self::new(source, config.tools().clone(), config.budget_range())
    }

    pub fn status(&self) -> LoadStatus {
        match self.phase {
            Phase::Loading => LoadStatus::Loading,
            Phase::Ready { .. } => LoadStatus::Ready,
            Phase::Failed { .. } => LoadStatus::Failed,
        }
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn range(&self) -> &BudgetRange {
        &self.range
    }

    pub fn tools(&self) -> &ToolTable {
        &self.tools
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Full catalog, only once loaded.
    pub fn catalog(&self) -> Option<&[Plan]> {
        match &self.phase {
            Phase::Ready { catalog, .. } => Some(catalog),
            _ => None,
        }
    }

    /// Underlying error text of a failed load.
    pub fn failure_detail(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Enters `Loading` for a new generation. Results of earlier tickets
    /// will be discarded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        tracing::debug!(generation = self.generation, "catalog load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Applies a fetch result. Returns `false` when the result was stale and
    /// left the state untouched.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Plan>>) -> bool {
        if self.closed {
            tracing::debug!(generation = ticket.generation, "session closed, dropping load result");
            return false;
        }
        if ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale catalog load"
            );
            return false;
        }

        match result {
            Ok(catalog) => {
                tracing::info!("Loaded {} plans from {}", catalog.len(), self.source.describe());
                let groups = affordable_by_tool(&catalog, self.budget);
                self.phase = Phase::Ready { catalog, groups };
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load plans from {}: {} (severity: {:?})",
                    self.source.describe(),
                    e,
                    e.severity()
                );
                self.phase = Phase::Failed {
                    message: e.user_friendly_message(),
                    detail: e.to_string(),
                };
            }
        }
        true
    }

    /// Fetches the catalog once and settles in `Ready` or `Failed`.
    pub async fn load(&mut self) -> LoadStatus {
        let ticket = self.begin_load();
        let result = self.source.fetch_all().await;
        self.finish_load(ticket, result);
        self.status()
    }

    /// Starts over as a fresh session would: budget back to its initial
    /// value, state back to `Loading`.
    pub fn restart(&mut self) -> LoadTicket {
        self.budget = self.range.initial();
        self.closed = false;
        tracing::info!("Reloading plan catalog");
        self.begin_load()
    }

    pub async fn reload(&mut self) -> LoadStatus {
        let ticket = self.restart();
        let result = self.source.fetch_all().await;
        self.finish_load(ticket, result);
        self.status()
    }

    /// Tears the session down. Pending and future load results are dropped.
    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
    }

    /// Stores `budget` as given and recomputes the view. Values are expected
    /// to come from the bounded input surface; use [`Self::apply`] to go
    /// through range and step handling.
    pub fn set_budget(&mut self, budget: Budget) -> Budget {
        if self.closed {
            tracing::debug!("ignoring budget change on closed session");
            return self.budget;
        }
        self.budget = budget;
        if let Phase::Ready { catalog, groups } = &mut self.phase {
            *groups = affordable_by_tool(catalog, budget);
            tracing::debug!(
                budget = budget.dollars(),
                visible = groups.values().map(Vec::len).sum::<usize>(),
                "view recomputed"
            );
        }
        budget
    }

    pub fn apply(&mut self, input: BudgetInput) -> Budget {
        let next = self.range.apply(self.budget, input);
        self.set_budget(next)
    }

    /// One column per configured tool, in configured order. Tools with no
    /// visible plans come back as empty columns.
    pub fn columns(&self) -> Option<Vec<ToolColumn>> {
        let Phase::Ready { groups, .. } = &self.phase else {
            return None;
        };
        Some(
            self.tools
                .iter()
                .map(|tool| ToolColumn {
                    tool_id: tool.id.clone(),
                    display_name: tool.name.clone(),
                    plans: groups.get(&tool.id).cloned().unwrap_or_default(),
                })
                .collect(),
        )
    }

    pub fn view(&self) -> ComparisonView {
        match &self.phase {
            Phase::Loading => ComparisonView::Loading,
            Phase::Failed { message, .. } => ComparisonView::Failed {
                message: message.clone(),
            },
            Phase::Ready { .. } => ComparisonView::Ready {
                budget: self.budget,
                columns: self.columns().unwrap_or_default(),
            },
        }
    }
}
