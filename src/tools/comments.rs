//! Comment tools: list, create, reply, delete and moderate comments

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ListCommentsArgs {
    /// Post, photo or video ID to list comments for
    pub object_id: String,
    /// Number of comments to return
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct CreateCommentArgs {
    /// Post, photo or video ID to comment on
    pub object_id: String,
    /// Comment text
    pub message: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ReplyCommentArgs {
    /// Comment ID to reply to
    pub comment_id: String,
    /// Reply text
    pub message: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct DeleteCommentArgs {
    /// Comment ID
    pub comment_id: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct HideCommentArgs {
    /// Comment ID
    pub comment_id: String,
    /// true to hide, false to unhide
    pub is_hidden: bool,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_list_comments",
            Category::Comments,
            "List comments on a post, photo or video",
            ToolAnnotations::read_only("List Comments"),
            |client, args: ListCommentsArgs| async move {
                client.list_comments(&args.object_id, args.limit).await
            },
        ),
        tool(
            "fb_create_comment",
            Category::Comments,
            "Comment on a post, photo or video as the Page",
            ToolAnnotations::write("Create Comment"),
            |client, args: CreateCommentArgs| async move {
                client.create_comment(&args.object_id, &args.message).await
            },
        ),
        tool(
            "fb_reply_comment",
            Category::Comments,
            "Reply to an existing comment as the Page",
            ToolAnnotations::write("Reply to Comment"),
            |client, args: ReplyCommentArgs| async move {
                client.reply_comment(&args.comment_id, &args.message).await
            },
        ),
        tool(
            "fb_delete_comment",
            Category::Comments,
            "Permanently delete a comment",
            ToolAnnotations::destructive("Delete Comment"),
            |client, args: DeleteCommentArgs| async move {
                client.delete_comment(&args.comment_id).await
            },
        ),
        tool(
            "fb_hide_comment",
            Category::Comments,
            "Hide or unhide a comment. Hidden comments stay visible to their author and friends.",
            ToolAnnotations::idempotent_write("Hide Comment"),
            |client, args: HideCommentArgs| async move {
                client.hide_comment(&args.comment_id, args.is_hidden).await
            },
        ),
    ]
}
