//! Expense records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
    pub spent_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
    pub spent_on: NaiveDate,
}

impl ExpenseDraft {
    pub fn into_expense(self, id: u64) -> Expense {
        Expense {
            id,
            category: self.category,
            description: self.description,
            amount_cents: self.amount_cents,
            spent_on: self.spent_on,
        }
    }

    pub fn apply_to(self, expense: &mut Expense) {
        expense.category = self.category;
        expense.description = self.description;
        expense.amount_cents = self.amount_cents;
        expense.spent_on = self.spent_on;
    }
}
