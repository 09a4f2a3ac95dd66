//! Video tools

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct UploadVideoArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Public URL of the video file
    pub file_url: String,
    /// Video title
    pub title: Option<String>,
    /// Video description
    pub description: Option<String>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ListVideosArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Number of videos to return
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct DeleteVideoArgs {
    /// Video ID
    pub video_id: String,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_upload_video",
            Category::Videos,
            "Upload a video to a Facebook Page from a public URL. Processing continues after the call returns.",
            ToolAnnotations::write("Upload Video"),
            |client, args: UploadVideoArgs| async move {
                client
                    .upload_video(
                        args.page_id.as_deref(),
                        &args.file_url,
                        args.title.as_deref(),
                        args.description.as_deref(),
                    )
                    .await
            },
        ),
        tool(
            "fb_list_videos",
            Category::Videos,
            "List videos on a Facebook Page",
            ToolAnnotations::read_only("List Videos"),
            |client, args: ListVideosArgs| async move {
                client.list_videos(args.page_id.as_deref(), args.limit).await
            },
        ),
        tool(
            "fb_delete_video",
            Category::Videos,
            "Permanently delete a video",
            ToolAnnotations::destructive("Delete Video"),
            |client, args: DeleteVideoArgs| async move {
                client.delete_video(&args.video_id).await
            },
        ),
    ]
}
