//! Bounded, stepped budget input with range-slider semantics.

use crate::domain::model::Budget;
use crate::utils::error::{CompareError, Result};
use crate::utils::validation::{validate_positive_number, Validate};
use serde::Serialize;

pub const DEFAULT_MIN: u32 = 0;
pub const DEFAULT_MAX: u32 = 200;
pub const DEFAULT_STEP: u32 = 10;

/// A validated slider range. Construct through [`BudgetRange::new`] so
/// `min <= max` and `step >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetRange {
    min: u32,
    max: u32,
    step: u32,
}

/// A discrete budget interaction, mirroring range-input keyboard handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetInput {
    StepUp,
    StepDown,
    JumpToMin,
    JumpToMax,
    Set(Budget),
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

impl BudgetRange {
    pub fn new(min: u32, max: u32, step: u32) -> Result<Self> {
        let range = Self { min, max, step };
        range.validate()?;
        Ok(range)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Budget a fresh session starts with.
    pub fn initial(&self) -> Budget {
        Budget::new(self.min)
    }

    pub fn contains(&self, budget: Budget) -> bool {
        (self.min..=self.max).contains(&budget.dollars())
    }

    /// Highest value on the step grid that does not pass `max`.
    fn top(&self) -> u32 {
        let span = self.max - self.min;
        self.min + span - span % self.step
    }

    /// Next on-step value above `current`. Off-step budgets move to the
    /// grid point right above them.
    pub fn step_up(&self, current: Budget) -> Budget {
        let current = current.dollars();
        if current < self.min {
            return Budget::new(self.min);
        }
        let offset = current - self.min;
        let next = (offset / self.step)
            .saturating_add(1)
            .saturating_mul(self.step)
            .saturating_add(self.min);
        Budget::new(next.min(self.top()))
    }

    /// Previous on-step value below `current`, never under `min`.
    pub fn step_down(&self, current: Budget) -> Budget {
        let current = current.dollars();
        if current <= self.min {
            return Budget::new(self.min);
        }
        let offset = current - self.min;
        let prev = match offset % self.step {
            0 => offset - self.step,
            rem => offset - rem,
        };
        Budget::new((self.min + prev).min(self.top()))
    }

    pub fn jump_to_min(&self) -> Budget {
        Budget::new(self.min)
    }

    /// Highest reachable value: `max` itself when it sits on a step.
    pub fn jump_to_max(&self) -> Budget {
        self.set(Budget::new(self.max))
    }

    /// Clamps into `[min, max]` and snaps to the nearest step counted from
    /// `min`. Halfway values round up unless that would pass `max`.
    pub fn set(&self, requested: Budget) -> Budget {
        let clamped = requested.dollars().clamp(self.min, self.max);
        let step = self.step;
        let offset = clamped - self.min;
        let below = offset - offset % step;
        let above = below.saturating_add(step);
        let snapped = if offset % step >= step - step / 2 && above <= self.max - self.min {
            above
        } else {
            below
        };
        Budget::new(self.min + snapped)
    }

    pub fn apply(&self, current: Budget, input: BudgetInput) -> Budget {
        match input {
            BudgetInput::StepUp => self.step_up(current),
            BudgetInput::StepDown => self.step_down(current),
            BudgetInput::JumpToMin => self.jump_to_min(),
            BudgetInput::JumpToMax => self.jump_to_max(),
            BudgetInput::Set(value) => self.set(value),
        }
    }
}

impl Validate for BudgetRange {
    fn validate(&self) -> Result<()> {
        validate_positive_number("budget.step", self.step, 1)?;
        if self.min > self.max {
            return Err(CompareError::InvalidConfigValueError {
                field: "budget.min".to_string(),
                value: self.min.to_string(),
                reason: format!("Minimum must not exceed maximum ({})", self.max),
            });
        }
        Ok(())
    }
}

pub fn format_budget(budget: Budget) -> String {
    budget.to_string()
}

pub fn format_price(price_usd_monthly: u32) -> String {
    if price_usd_monthly == 0 {
        "Free".to_string()
    } else {
        format!("${}/mo", price_usd_monthly)
    }
}
