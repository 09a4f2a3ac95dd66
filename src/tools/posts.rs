//! Post tools: list, read, publish, edit, delete and schedule page posts

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ListPostsArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Number of posts to return (default 25, max 100)
    pub limit: Option<u32>,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct GetPostArgs {
    /// Post ID (format: {page_id}_{post_id})
    pub post_id: String,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct CreatePostArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Post text
    pub message: Option<String>,
    /// URL to attach to the post
    pub link: Option<String>,
    /// Publish immediately (default true). Set false to create an unpublished post.
    pub published: Option<bool>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct UpdatePostArgs {
    /// Post ID
    pub post_id: String,
    /// New post text
    pub message: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct DeletePostArgs {
    /// Post ID
    pub post_id: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct SchedulePostArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Post text
    pub message: String,
    /// Unix timestamp to publish at (10 minutes to 75 days from now)
    pub scheduled_time: i64,
    /// URL to attach to the post
    pub link: Option<String>,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_list_posts",
            Category::Posts,
            "List recent posts on a Facebook Page",
            ToolAnnotations::read_only("List Posts"),
            |client, args: ListPostsArgs| async move {
                client
                    .list_posts(args.page_id.as_deref(), args.limit, args.fields.as_deref())
                    .await
            },
        ),
        tool(
            "fb_get_post",
            Category::Posts,
            "Get a single post by ID",
            ToolAnnotations::read_only("Get Post"),
            |client, args: GetPostArgs| async move {
                client.get_post(&args.post_id, args.fields.as_deref()).await
            },
        ),
        tool(
            "fb_create_post",
            Category::Posts,
            "Publish a new post on a Facebook Page. Provide a message, a link, or both.",
            ToolAnnotations::write("Create Post"),
            |client, args: CreatePostArgs| async move {
                client
                    .create_post(
                        args.page_id.as_deref(),
                        args.message.as_deref(),
                        args.link.as_deref(),
                        args.published,
                    )
                    .await
            },
        ),
        tool(
            "fb_update_post",
            Category::Posts,
            "Edit the text of an existing post",
            ToolAnnotations::idempotent_write("Update Post"),
            |client, args: UpdatePostArgs| async move {
                client.update_post(&args.post_id, &args.message).await
            },
        ),
        tool(
            "fb_delete_post",
            Category::Posts,
            "Permanently delete a post",
            ToolAnnotations::destructive("Delete Post"),
            |client, args: DeletePostArgs| async move { client.delete_post(&args.post_id).await },
        ),
        tool(
            "fb_schedule_post",
            Category::Posts,
            "Schedule a post to be published at a future time (Unix timestamp)",
            ToolAnnotations::write("Schedule Post"),
            |client, args: SchedulePostArgs| async move {
                client
                    .schedule_post(
                        args.page_id.as_deref(),
                        &args.message,
                        args.scheduled_time,
                        args.link.as_deref(),
                    )
                    .await
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::facebook::mock::MockTransport;
    use crate::facebook::transport::Method;
    use crate::facebook::{Credential, FacebookClient};
    use serde_json::json;
    use std::sync::Arc;

    fn client(mock: &Arc<MockTransport>) -> FacebookClient {
        FacebookClient::new(Credential::new("tok", None), mock.clone()).unwrap()
    }

    fn find(name: &str) -> Tool {
        tools().into_iter().find(|t| t.name() == name).unwrap()
    }

    #[tokio::test]
    async fn test_update_post_requires_message() {
        let mock = Arc::new(MockTransport::new());
        let result = find("fb_update_post")
            .invoke(client(&mock), json!({ "post_id": "1_2" }))
            .await;

        match result {
            Err(AppError::Validation { tool, message }) => {
                assert_eq!(tool, "fb_update_post");
                assert!(message.contains("message"), "got: {}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_post_rejects_string_timestamp() {
        let mock = Arc::new(MockTransport::new());
        let result = find("fb_schedule_post")
            .invoke(
                client(&mock),
                json!({ "page_id": "1", "message": "m", "scheduled_time": "tomorrow" }),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_post_request() {
        let mock = Arc::new(MockTransport::with_default(json!({ "success": true })));
        let value = find("fb_delete_post")
            .invoke(client(&mock), json!({ "post_id": "1_2" }))
            .await
            .unwrap();

        assert_eq!(value, json!({ "success": true }));
        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "1_2");
    }

    #[tokio::test]
    async fn test_create_post_without_page_names_tool() {
        let mock = Arc::new(MockTransport::new());
        let err = find("fb_create_post")
            .invoke(client(&mock), json!({ "message": "hi" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("fb_create_post"));
        assert!(err.to_string().contains("page_id"));
    }
}
