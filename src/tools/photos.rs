//! Photo tools

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct UploadPhotoArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Public URL of the image
    pub url: String,
    /// Photo caption
    pub caption: Option<String>,
    /// Publish immediately (default true)
    pub published: Option<bool>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ListPhotosArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Number of photos to return
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct DeletePhotoArgs {
    /// Photo ID
    pub photo_id: String,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_upload_photo",
            Category::Photos,
            "Upload a photo to a Facebook Page from a public URL",
            ToolAnnotations::write("Upload Photo"),
            |client, args: UploadPhotoArgs| async move {
                client
                    .upload_photo(
                        args.page_id.as_deref(),
                        &args.url,
                        args.caption.as_deref(),
                        args.published,
                    )
                    .await
            },
        ),
        tool(
            "fb_list_photos",
            Category::Photos,
            "List photos uploaded to a Facebook Page",
            ToolAnnotations::read_only("List Photos"),
            |client, args: ListPhotosArgs| async move {
                client.list_photos(args.page_id.as_deref(), args.limit).await
            },
        ),
        tool(
            "fb_delete_photo",
            Category::Photos,
            "Permanently delete a photo",
            ToolAnnotations::destructive("Delete Photo"),
            |client, args: DeletePhotoArgs| async move {
                client.delete_photo(&args.photo_id).await
            },
        ),
    ]
}
