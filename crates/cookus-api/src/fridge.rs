// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fridge (owned ingredients) endpoints.

use cookus_client::ApiClient;
use cookus_core::CookusError;
use serde::{Deserialize, Serialize};

/// One ingredient in the user's fridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// How a fridge save merges with server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    Merge,
    Replace,
}

#[derive(Debug, Deserialize)]
pub struct IngredientName {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct SaveFridgeRequest<'a> {
    items: &'a [Ingredient],
    mode: SaveMode,
    #[serde(rename = "purgeMissing")]
    purge_missing: bool,
}

#[derive(Debug, Clone)]
pub struct FridgeApi {
    client: ApiClient,
}

impl FridgeApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_fridge(&self) -> Result<Vec<Ingredient>, CookusError> {
        self.client.get_json("/me/ingredients").await
    }

    pub async fn search_ingredients(&self, q: &str) -> Result<Vec<IngredientName>, CookusError> {
        self.client
            .get_json_with_query("/ingredients/search", &[("q", q)])
            .await
    }

    /// Registers a new ingredient name in the global catalogue.
    ///
    /// Returns `false` without calling the server for blank names, and also
    /// when the server has no register endpoint (404), which some
    /// deployments lack.
    pub async fn add_ingredient_name(&self, name: &str) -> Result<bool, CookusError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        match self
            .client
            .post_unit("/ingredients", &serde_json::json!({"name": trimmed}))
            .await
        {
            Ok(()) => Ok(true),
            Err(err) if err.status() == Some(404) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub async fn save_fridge(
        &self,
        items: &[Ingredient],
        mode: SaveMode,
        purge_missing: bool,
    ) -> Result<(), CookusError> {
        self.client
            .post_unit(
                "/me/ingredients",
                &SaveFridgeRequest {
                    items,
                    mode,
                    purge_missing,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookus_client::SessionStore;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(base_url: &str) -> FridgeApi {
        let config = cookus_config::load_config_from_str(&format!(
            "[api]\nbase_url = \"{base_url}\"\n"
        ))
        .unwrap();
        let session = SessionStore::new();
        session.set_token("tok-1");
        FridgeApi::new(ApiClient::new(&config, session).unwrap())
    }

    #[tokio::test]
    async fn list_fridge_decodes_ingredients() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/ingredients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "egg", "quantity": 6.0, "unit": "ea"},
                {"name": "milk"},
            ])))
            .mount(&server)
            .await;

        let items = test_api(&server.uri()).list_fridge().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "egg");
        assert_eq!(items[1].quantity, None);
    }

    #[tokio::test]
    async fn search_passes_query_parameter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ingredients/search"))
            .and(query_param("q", "car"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"name": "carrot"}])),
            )
            .mount(&server)
            .await;

        let hits = test_api(&server.uri())
            .search_ingredients("car")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "carrot");
    }

    #[tokio::test]
    async fn add_ingredient_swallows_missing_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/ingredients"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = test_api(&server.uri());
        assert!(!api.add_ingredient_name("durian").await.unwrap());
        // Blank names never reach the server.
        assert!(!api.add_ingredient_name("   ").await.unwrap());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }
}
