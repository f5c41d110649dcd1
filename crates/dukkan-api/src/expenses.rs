//! # Expense Endpoints
//!
//! Remote operations for expenses. The `date` field is the day the expense
//! applies to, sent as `YYYY-MM-DD`; an expense can optionally point at a
//! product when it was a restock purchase.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use dukkan_core::types::{Expense, ListQuery};
use dukkan_core::validation::{validate_name, validate_positive_amount};

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

/// Fields the operator fills in when recording or editing an expense.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub title: String,
    pub category: Option<String>,
    pub amount: f64,
    pub description: Option<String>,
    pub date: NaiveDate,
    /// Set when this expense restocked a specific product.
    pub linked_product_id: Option<String>,
}

impl ExpenseInput {
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.title)?;
        validate_positive_amount(self.amount, "amount")?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpensePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    linked_product_id: Option<&'a str>,
}

impl<'a> ExpensePayload<'a> {
    fn new(id: Option<&'a str>, input: &'a ExpenseInput) -> Self {
        ExpensePayload {
            id,
            title: input.title.trim(),
            category: input.category.as_deref(),
            amount: input.amount,
            description: input.description.as_deref(),
            date: input.date.format("%Y-%m-%d").to_string(),
            linked_product_id: input.linked_product_id.as_deref(),
        }
    }
}

/// Remote API for expenses.
#[derive(Debug, Clone)]
pub struct ExpensesApi {
    gateway: ApiGateway,
}

impl ExpensesApi {
    pub fn new(gateway: ApiGateway) -> Self {
        ExpensesApi { gateway }
    }

    /// Fetches one page of expenses.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Expense>> {
        self.gateway.get_page("/Expense/getallexpenses", query).await
    }

    /// Fetches a single expense by id.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<Expense> {
        self.gateway.get_json(&format!("/Expense/{id}")).await
    }

    /// Records an expense, returning it with the server message.
    pub async fn add(&self, input: &ExpenseInput) -> ApiResult<(Expense, String)> {
        debug!(title = %input.title, amount = input.amount, "Adding expense");
        input.validate()?;
        self.gateway
            .post_json("/Expense/addexpense", &ExpensePayload::new(None, input))
            .await
    }

    /// Updates an expense. The backend acknowledges with a boolean.
    pub async fn update(&self, id: &str, input: &ExpenseInput) -> ApiResult<String> {
        debug!(%id, "Updating expense");
        input.validate()?;
        let (_, message): (bool, String) = self
            .gateway
            .patch_json(
                "/Expense/updateexpense",
                &ExpensePayload::new(Some(id), input),
            )
            .await?;
        Ok(message)
    }

    /// Deletes an expense.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting expense");
        self.gateway.delete_message(&format!("/Expense/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ExpenseInput {
        ExpenseInput {
            title: "فاتورة كهرباء".into(),
            category: Some("مرافق".into()),
            amount: 450.0,
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            linked_product_id: None,
        }
    }

    #[test]
    fn test_input_validation() {
        assert!(sample_input().validate().is_ok());

        let mut input = sample_input();
        input.amount = 0.0;
        assert!(input.validate().is_err());

        let mut input = sample_input();
        input.amount = -10.0;
        assert!(input.validate().is_err());

        let mut input = sample_input();
        input.title = " ".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_payload_date_format() {
        let value = serde_json::to_value(ExpensePayload::new(None, &sample_input())).unwrap();
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["amount"], 450.0);
        assert!(value.get("linkedProductId").is_none());
    }

    #[test]
    fn test_restock_expense_links_product() {
        let mut input = sample_input();
        input.linked_product_id = Some("p-3".into());
        let value = serde_json::to_value(ExpensePayload::new(Some("e-1"), &input)).unwrap();
        assert_eq!(value["id"], "e-1");
        assert_eq!(value["linkedProductId"], "p-3");
    }
}
