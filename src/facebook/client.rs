//! Facebook Pages client
//!
//! One method per tool. Each method performs exactly one Graph request and
//! returns the response body unchanged.

use super::credential::Credential;
use super::transport::{is_path_segment, GraphRequest, GraphTransport, Method};
use crate::error::AppError;
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_PAGE_FIELDS: &str = "id,name,about,category,fan_count,followers_count,link,website";
const DEFAULT_POST_FIELDS: &str = "id,message,created_time,permalink_url,shares";
const CONVERSATION_FIELDS: &str = "id,updated_time,message_count,unread_count,participants";
const MESSAGE_FIELDS: &str = "id,message,from,to,created_time";

/// Query/form parameters for a Graph request
#[derive(Default)]
struct Params(Vec<(String, String)>);

impl Params {
    fn new() -> Self {
        Self::default()
    }

    fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    fn opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }
}

/// Caller-supplied ids become URL path segments, so only plain Graph ids pass
fn checked_id<'a>(field: &str, id: &'a str) -> Result<&'a str, AppError> {
    if is_path_segment(id) {
        Ok(id)
    } else {
        Err(AppError::validation(
            "",
            format!("{} '{}' is not a valid Graph object id", field, id),
        ))
    }
}

/// Graph API client bound to a single credential
#[derive(Clone)]
pub struct FacebookClient {
    transport: Arc<dyn GraphTransport>,
    credential: Credential,
}

impl FacebookClient {
    /// Build a client, rejecting malformed tokens up front
    pub fn new(
        credential: Credential,
        transport: Arc<dyn GraphTransport>,
    ) -> Result<Self, AppError> {
        credential.validate()?;
        Ok(Self {
            transport,
            credential,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Explicit page id, or the page this client was scoped to
    fn page<'a>(&'a self, page_id: Option<&'a str>) -> Result<&'a str, AppError> {
        let page = page_id
            .filter(|p| !p.is_empty())
            .or(self.credential.page_id.as_deref().filter(|p| !p.is_empty()))
            .ok_or_else(|| {
                AppError::validation(
                    "",
                    "page_id is required when FACEBOOK_PAGE_ID is not configured",
                )
            })?;
        checked_id("page_id", page)
    }

    async fn call(&self, method: Method, path: String, params: Params) -> Result<Value, AppError> {
        let request = GraphRequest {
            method,
            path,
            params: params.0,
            access_token: self.credential.access_token.clone(),
        };
        self.transport.send(request).await
    }

    async fn get(&self, path: String, params: Params) -> Result<Value, AppError> {
        self.call(Method::Get, path, params).await
    }

    async fn post(&self, path: String, params: Params) -> Result<Value, AppError> {
        self.call(Method::Post, path, params).await
    }

    async fn delete(&self, path: String) -> Result<Value, AppError> {
        self.call(Method::Delete, path, Params::new()).await
    }

    // Pages

    pub async fn list_pages(&self) -> Result<Value, AppError> {
        self.get(
            "me/accounts".to_string(),
            Params::new().set("fields", "id,name,category,tasks"),
        )
        .await
    }

    pub async fn get_page(
        &self,
        page_id: Option<&str>,
        fields: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            page.to_string(),
            Params::new().set("fields", fields.unwrap_or(DEFAULT_PAGE_FIELDS)),
        )
        .await
    }

    pub async fn get_page_token(&self, page_id: Option<&str>) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(page.to_string(), Params::new().set("fields", "id,name,access_token"))
            .await
    }

    // Posts

    pub async fn list_posts(
        &self,
        page_id: Option<&str>,
        limit: Option<u32>,
        fields: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/posts", page),
            Params::new()
                .set("fields", fields.unwrap_or(DEFAULT_POST_FIELDS))
                .opt("limit", limit),
        )
        .await
    }

    pub async fn get_post(&self, post_id: &str, fields: Option<&str>) -> Result<Value, AppError> {
        let post_id = checked_id("post_id", post_id)?;
        self.get(
            post_id.to_string(),
            Params::new().set("fields", fields.unwrap_or(DEFAULT_POST_FIELDS)),
        )
        .await
    }

    pub async fn create_post(
        &self,
        page_id: Option<&str>,
        message: Option<&str>,
        link: Option<&str>,
        published: Option<bool>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.post(
            format!("{}/feed", page),
            Params::new()
                .opt("message", message)
                .opt("link", link)
                .opt("published", published),
        )
        .await
    }

    pub async fn update_post(&self, post_id: &str, message: &str) -> Result<Value, AppError> {
        let post_id = checked_id("post_id", post_id)?;
        self.post(post_id.to_string(), Params::new().set("message", message))
            .await
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<Value, AppError> {
        let post_id = checked_id("post_id", post_id)?;
        self.delete(post_id.to_string()).await
    }

    /// `scheduled_time` is a Unix timestamp; Graph requires 10 minutes to 75 days ahead
    pub async fn schedule_post(
        &self,
        page_id: Option<&str>,
        message: &str,
        scheduled_time: i64,
        link: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.post(
            format!("{}/feed", page),
            Params::new()
                .set("message", message)
                .set("published", false)
                .set("scheduled_publish_time", scheduled_time)
                .opt("link", link),
        )
        .await
    }

    // Comments

    pub async fn list_comments(
        &self,
        object_id: &str,
        limit: Option<u32>,
    ) -> Result<Value, AppError> {
        let object_id = checked_id("object_id", object_id)?;
        self.get(
            format!("{}/comments", object_id),
            Params::new()
                .set("fields", "id,message,from,created_time,like_count,is_hidden")
                .opt("limit", limit),
        )
        .await
    }

    pub async fn create_comment(&self, object_id: &str, message: &str) -> Result<Value, AppError> {
        let object_id = checked_id("object_id", object_id)?;
        self.post(
            format!("{}/comments", object_id),
            Params::new().set("message", message),
        )
        .await
    }

    pub async fn reply_comment(&self, comment_id: &str, message: &str) -> Result<Value, AppError> {
        let comment_id = checked_id("comment_id", comment_id)?;
        self.post(
            format!("{}/comments", comment_id),
            Params::new().set("message", message),
        )
        .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<Value, AppError> {
        let comment_id = checked_id("comment_id", comment_id)?;
        self.delete(comment_id.to_string()).await
    }

    pub async fn hide_comment(&self, comment_id: &str, is_hidden: bool) -> Result<Value, AppError> {
        let comment_id = checked_id("comment_id", comment_id)?;
        self.post(comment_id.to_string(), Params::new().set("is_hidden", is_hidden))
            .await
    }

    // Photos

    pub async fn upload_photo(
        &self,
        page_id: Option<&str>,
        url: &str,
        caption: Option<&str>,
        published: Option<bool>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.post(
            format!("{}/photos", page),
            Params::new()
                .set("url", url)
                .opt("caption", caption)
                .opt("published", published),
        )
        .await
    }

    pub async fn list_photos(
        &self,
        page_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/photos", page),
            Params::new()
                .set("type", "uploaded")
                .set("fields", "id,name,created_time,link,images")
                .opt("limit", limit),
        )
        .await
    }

    pub async fn delete_photo(&self, photo_id: &str) -> Result<Value, AppError> {
        let photo_id = checked_id("photo_id", photo_id)?;
        self.delete(photo_id.to_string()).await
    }

    // Videos

    pub async fn upload_video(
        &self,
        page_id: Option<&str>,
        file_url: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.post(
            format!("{}/videos", page),
            Params::new()
                .set("file_url", file_url)
                .opt("title", title)
                .opt("description", description),
        )
        .await
    }

    pub async fn list_videos(
        &self,
        page_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/videos", page),
            Params::new()
                .set("fields", "id,title,description,created_time,length,permalink_url")
                .opt("limit", limit),
        )
        .await
    }

    pub async fn delete_video(&self, video_id: &str) -> Result<Value, AppError> {
        let video_id = checked_id("video_id", video_id)?;
        self.delete(video_id.to_string()).await
    }

    // Insights

    pub async fn get_page_insights(
        &self,
        page_id: Option<&str>,
        metric: &str,
        period: Option<&str>,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/insights", page),
            Params::new()
                .set("metric", metric)
                .set("period", period.unwrap_or("day"))
                .opt("since", since)
                .opt("until", until),
        )
        .await
    }

    pub async fn get_post_insights(&self, post_id: &str, metric: &str) -> Result<Value, AppError> {
        let post_id = checked_id("post_id", post_id)?;
        self.get(
            format!("{}/insights", post_id),
            Params::new().set("metric", metric),
        )
        .await
    }

    pub async fn get_page_fans(&self, page_id: Option<&str>) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/insights", page),
            Params::new().set("metric", "page_fans").set("period", "day"),
        )
        .await
    }

    pub async fn get_page_views(
        &self,
        page_id: Option<&str>,
        period: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/insights", page),
            Params::new()
                .set("metric", "page_views_total")
                .set("period", period.unwrap_or("day")),
        )
        .await
    }

    // Conversations

    pub async fn list_conversations(
        &self,
        page_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.get(
            format!("{}/conversations", page),
            Params::new()
                .set("fields", CONVERSATION_FIELDS)
                .opt("limit", limit),
        )
        .await
    }

    pub async fn get_messages(
        &self,
        conversation_id: &str,
        limit: Option<u32>,
    ) -> Result<Value, AppError> {
        let conversation_id = checked_id("conversation_id", conversation_id)?;
        self.get(
            format!("{}/messages", conversation_id),
            Params::new().set("fields", MESSAGE_FIELDS).opt("limit", limit),
        )
        .await
    }

    pub async fn send_message(
        &self,
        page_id: Option<&str>,
        recipient_id: &str,
        text: &str,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.post(
            format!("{}/messages", page),
            Params::new()
                .set("recipient", json!({ "id": recipient_id }))
                .set("message", json!({ "text": text }))
                .set("messaging_type", "RESPONSE"),
        )
        .await
    }

    /// `action` is one of `typing_on`, `typing_off`, `mark_seen`
    pub async fn send_typing(
        &self,
        page_id: Option<&str>,
        recipient_id: &str,
        action: Option<&str>,
    ) -> Result<Value, AppError> {
        let page = self.page(page_id)?;
        self.post(
            format!("{}/messages", page),
            Params::new()
                .set("recipient", json!({ "id": recipient_id }))
                .set("sender_action", action.unwrap_or("typing_on")),
        )
        .await
    }
}
