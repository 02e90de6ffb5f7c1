// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Supplement intake, plan, and recommendation endpoints.

use cookus_client::ApiClient;
use cookus_core::CookusError;
use serde::{Deserialize, Serialize};

use crate::items_or_empty;

#[derive(Debug, Clone, Deserialize)]
pub struct SupplementIntake {
    pub intake_id: i64,
    pub user_id: i64,
    pub supplement_name: String,
    pub dosage: f64,
    pub unit: String,
    pub taken_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateIntake {
    pub supplement_name: String,
    pub dosage: f64,
    pub unit: String,
    pub taken_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub reason: String,
}

/// A daily supplement plan slot. `time_slot` is a combined label such as
/// "morning-after-meal"; the backend treats it as opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplementPlan {
    pub plan_id: i64,
    pub supplement_name: String,
    pub time_slot: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayStatus {
    pub date: String,
    pub total: u32,
    pub taken: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayPlan {
    #[serde(flatten)]
    pub plan: SupplementPlan,
    pub taken: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendFilters {
    pub age_band: String,
    pub sex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnant_possible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendedItem {
    pub category: String,
    pub product_name: String,
    pub function: String,
    pub shape: String,
    #[serde(default)]
    pub timing: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendGroup {
    pub goal: String,
    pub items: Vec<RecommendedItem>,
}

#[derive(Debug, Serialize)]
struct PlanRequest<'a> {
    supplement_name: &'a str,
    time_slot: &'a str,
}

#[derive(Debug, Serialize)]
struct SetTakenRequest<'a> {
    plan_id: i64,
    date: &'a str,
    taken: bool,
}

#[derive(Debug, Clone)]
pub struct NutritionApi {
    client: ApiClient,
}

impl NutritionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_intakes(&self) -> Result<Vec<SupplementIntake>, CookusError> {
        let value = self.client.get_json("/nutrition/supplements").await?;
        items_or_empty(value)
    }

    pub async fn add_intake(&self, body: &CreateIntake) -> Result<SupplementIntake, CookusError> {
        self.client.post_json("/nutrition/supplements", body).await
    }

    pub async fn delete_intake(&self, intake_id: i64) -> Result<(), CookusError> {
        self.client
            .delete(&format!("/nutrition/supplements/{intake_id}"))
            .await
    }

    pub async fn recommendations(&self) -> Result<Vec<Recommendation>, CookusError> {
        let value = self.client.get_json("/nutrition/recommendations").await?;
        items_or_empty(value)
    }

    pub async fn recommend(
        &self,
        filters: &RecommendFilters,
    ) -> Result<Vec<RecommendGroup>, CookusError> {
        self.client.post_json("/nutrition/recommend", filters).await
    }

    pub async fn list_plans(&self) -> Result<Vec<SupplementPlan>, CookusError> {
        let value = self.client.get_json("/nutrition/plans").await?;
        items_or_empty(value)
    }

    pub async fn create_plan(
        &self,
        name: &str,
        time_slot: &str,
    ) -> Result<SupplementPlan, CookusError> {
        self.client
            .post_json(
                "/nutrition/plans",
                &PlanRequest {
                    supplement_name: name,
                    time_slot,
                },
            )
            .await
    }

    pub async fn update_plan(
        &self,
        plan_id: i64,
        name: &str,
        time_slot: &str,
    ) -> Result<SupplementPlan, CookusError> {
        self.client
            .put_json(
                &format!("/nutrition/plans/{plan_id}"),
                &PlanRequest {
                    supplement_name: name,
                    time_slot,
                },
            )
            .await
    }

    pub async fn delete_plan(&self, plan_id: i64) -> Result<(), CookusError> {
        self.client
            .delete(&format!("/nutrition/plans/{plan_id}"))
            .await
    }

    /// Per-day totals for one month (`ym` is `YYYY-MM`).
    pub async fn month_status(&self, ym: &str) -> Result<Vec<DayStatus>, CookusError> {
        let value = self
            .client
            .get_json_with_query("/nutrition/calendar", &[("month", ym)])
            .await?;
        items_or_empty(value)
    }

    pub async fn daily(&self, date: &str) -> Result<Vec<DayPlan>, CookusError> {
        let value = self
            .client
            .get_json_with_query("/nutrition/daily", &[("date", date)])
            .await?;
        items_or_empty(value)
    }

    pub async fn set_taken(
        &self,
        plan_id: i64,
        date: &str,
        taken: bool,
    ) -> Result<(), CookusError> {
        self.client
            .post_unit(
                "/nutrition/take",
                &SetTakenRequest {
                    plan_id,
                    date,
                    taken,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookus_client::SessionStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(base_url: &str) -> NutritionApi {
        let config = cookus_config::load_config_from_str(&format!(
            "[api]\nbase_url = \"{base_url}\"\n"
        ))
        .unwrap();
        let session = SessionStore::new();
        session.set_token("tok-1");
        NutritionApi::new(ApiClient::new(&config, session).unwrap())
    }

    #[tokio::test]
    async fn list_intakes_accepts_items_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/nutrition/supplements"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "intake_id": 1,
                    "user_id": 9,
                    "supplement_name": "omega-3",
                    "dosage": 1000.0,
                    "unit": "mg",
                    "taken_at": "2025-03-01T08:00:00Z",
                }]
            })))
            .mount(&server)
            .await;

        let intakes = test_api(&server.uri()).list_intakes().await.unwrap();
        assert_eq!(intakes.len(), 1);
        assert_eq!(intakes[0].supplement_name, "omega-3");
    }

    #[tokio::test]
    async fn daily_plans_flatten_the_plan_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/nutrition/daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"plan_id": 3, "supplement_name": "vitamin d", "time_slot": "morning", "taken": true}
            ])))
            .mount(&server)
            .await;

        let plans = test_api(&server.uri()).daily("2025-03-01").await.unwrap();
        assert_eq!(plans[0].plan.plan_id, 3);
        assert!(plans[0].taken);
    }
}
