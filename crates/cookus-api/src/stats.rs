// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard statistics endpoints.
//!
//! All of these accept an optional `selected_date` query parameter that
//! anchors the reporting window.

use cookus_client::ApiClient;
use cookus_core::CookusError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressStat {
    #[serde(rename = "weeklyRate")]
    pub weekly_rate: f64,
    #[serde(rename = "cookedCount")]
    pub cooked_count: i64,
    #[serde(rename = "avgDifficulty")]
    pub avg_difficulty: Option<f64>,
    #[serde(rename = "avgMinutes")]
    pub avg_minutes: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressTrendWeek {
    pub week: String,
    pub rate: f64,
    pub cooked: i64,
    pub goal: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressTrend {
    #[serde(rename = "monthRate")]
    pub month_rate: f64,
    pub weeks: Vec<ProgressTrendWeek>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountRow {
    pub label: String,
    pub count: i64,
    #[serde(default)]
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct StatsApi {
    client: ApiClient,
}

impl StatsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn progress(&self, selected: Option<&str>) -> Result<ProgressStat, CookusError> {
        self.get("/me/stats/progress", selected).await
    }

    pub async fn progress_trend(
        &self,
        selected: Option<&str>,
    ) -> Result<ProgressTrend, CookusError> {
        self.get("/me/stats/progress-trend", selected).await
    }

    pub async fn level_distribution(
        &self,
        selected: Option<&str>,
    ) -> Result<Vec<CountRow>, CookusError> {
        self.get("/me/stats/recipe-logs-level", selected).await
    }

    pub async fn category_monthly(
        &self,
        selected: Option<&str>,
    ) -> Result<Vec<CountRow>, CookusError> {
        self.get("/me/stats/recipe-logs-category", selected).await
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        selected: Option<&str>,
    ) -> Result<T, CookusError> {
        match selected {
            Some(date) => {
                self.client
                    .get_json_with_query(path, &[("selected_date", date)])
                    .await
            }
            None => self.client.get_json(path).await,
        }
    }
}
