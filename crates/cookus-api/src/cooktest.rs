// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cooking-contest (cook-test) endpoints: events, posts, likes, uploads.

use cookus_client::ApiClient;
use cookus_core::CookusError;
use serde::{Deserialize, Serialize};

use crate::items_or_empty;

#[derive(Debug, Clone, Deserialize)]
pub struct EventSummary {
    pub event_id: i64,
    pub event_name: String,
    #[serde(default)]
    pub event_description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub post_count: i64,
    #[serde(default)]
    pub participated: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    pub event_id: i64,
    pub event_name: String,
    pub event_description: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CookPost {
    pub post_id: i64,
    pub event_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub content_title: String,
    pub content_text: String,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub img_urls: Option<Vec<String>>,
    pub likes: i64,
    pub created_at: String,
}

/// Which slice of an event's posts to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostView {
    All,
    Mine,
    Liked,
}

impl PostView {
    fn as_query(self) -> Option<&'static str> {
        match self {
            PostView::All => None,
            PostView::Mine => Some("mine"),
            PostView::Liked => Some("liked"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePost {
    pub content_title: String,
    pub content_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePost {
    pub content_title: String,
    pub content_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeCount {
    pub likes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub file_url: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresignedUploads {
    pub upload_list: Vec<PresignedUpload>,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserCookPosts {
    #[serde(default)]
    pub posts: Vec<CookPost>,
    #[serde(default)]
    pub events: Vec<UserCookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCookEvent {
    pub event_id: i64,
    pub event_name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Strips a display handle down to the raw user id.
///
/// Handles look like `name#1234`; everything after the last `#` is the id.
pub fn extract_cook_user_id(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.rfind('#') {
        Some(idx) => trimmed[idx + 1..].trim(),
        None => trimmed,
    }
}

#[derive(Debug, Clone)]
pub struct CooktestApi {
    client: ApiClient,
}

impl CooktestApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_events(&self) -> Result<Vec<EventSummary>, CookusError> {
        let value = self.client.get_json("/events").await?;
        items_or_empty(value)
    }

    pub async fn event(&self, event_id: i64) -> Result<EventDetail, CookusError> {
        self.client.get_json(&format!("/events/{event_id}")).await
    }

    pub async fn list_posts(
        &self,
        event_id: i64,
        view: PostView,
    ) -> Result<Vec<CookPost>, CookusError> {
        let path = format!("/events/{event_id}/posts");
        match view.as_query() {
            Some(view) => {
                self.client
                    .get_json_with_query(&path, &[("view", view)])
                    .await
            }
            None => self.client.get_json(&path).await,
        }
    }

    pub async fn post(&self, event_id: i64, post_id: i64) -> Result<CookPost, CookusError> {
        self.client
            .get_json(&format!("/events/{event_id}/posts/{post_id}"))
            .await
    }

    pub async fn post_global(&self, post_id: i64) -> Result<CookPost, CookusError> {
        self.client.get_json(&format!("/posts/{post_id}")).await
    }

    pub async fn create_post(
        &self,
        event_id: i64,
        body: &CreatePost,
    ) -> Result<CookPost, CookusError> {
        self.client
            .post_json(&format!("/events/{event_id}/posts"), body)
            .await
    }

    pub async fn update_post(
        &self,
        event_id: i64,
        post_id: i64,
        body: &UpdatePost,
    ) -> Result<CookPost, CookusError> {
        self.client
            .put_json(&format!("/events/{event_id}/posts/{post_id}"), body)
            .await
    }

    pub async fn delete_post(&self, event_id: i64, post_id: i64) -> Result<(), CookusError> {
        self.client
            .delete(&format!("/events/{event_id}/posts/{post_id}"))
            .await
    }

    pub async fn like_post(&self, post_id: i64) -> Result<LikeCount, CookusError> {
        self.client
            .post_json_empty(&format!("/posts/{post_id}/like"))
            .await
    }

    pub async fn unlike_post(&self, post_id: i64) -> Result<LikeCount, CookusError> {
        self.client
            .delete_json(&format!("/posts/{post_id}/like"))
            .await
    }

    /// Post ids the current user has liked within one event.
    pub async fn my_likes(&self, event_id: i64) -> Result<Vec<i64>, CookusError> {
        #[derive(Deserialize)]
        struct Liked {
            #[serde(default)]
            liked_post_ids: Vec<i64>,
        }
        let liked: Liked = self
            .client
            .get_json(&format!("/events/{event_id}/likes/me"))
            .await?;
        Ok(liked.liked_post_ids)
    }

    pub async fn presign_uploads(
        &self,
        event_id: i64,
        file_exts: &[&str],
    ) -> Result<PresignedUploads, CookusError> {
        self.client
            .post_json(
                &format!("/events/{event_id}/presigned-urls"),
                &serde_json::json!({ "file_exts": file_exts }),
            )
            .await
    }

    /// A user's contest post history.
    ///
    /// Older deployments only know the legacy route, so a 404 on the
    /// canonical one falls back to `/cooktest/users/{id}/posts`.
    pub async fn user_posts(&self, user_id: &str) -> Result<UserCookPosts, CookusError> {
        let clean_id = extract_cook_user_id(user_id);
        match self
            .client
            .get_json(&format!("/users/{clean_id}/cooktest-posts"))
            .await
        {
            Ok(posts) => Ok(posts),
            Err(err) if err.status() == Some(404) => {
                self.client
                    .get_json(&format!("/cooktest/users/{clean_id}/posts"))
                    .await
            }
            Err(err) => Err(err),
        }
    }
}
