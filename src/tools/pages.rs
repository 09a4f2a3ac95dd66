//! Page tools: list managed pages, page details, page tokens

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ListPagesArgs {}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct GetPageArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Comma-separated fields to return (e.g. "id,name,fan_count")
    pub fields: Option<String>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct GetPageTokenArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_list_pages",
            Category::Pages,
            "List all Facebook Pages the access token can manage, with IDs, names and categories",
            ToolAnnotations::read_only("List Pages"),
            |client, _args: ListPagesArgs| async move { client.list_pages().await },
        ),
        tool(
            "fb_get_page",
            Category::Pages,
            "Get details of a Facebook Page (name, about, category, fan count, link, website)",
            ToolAnnotations::read_only("Get Page"),
            |client, args: GetPageArgs| async move {
                client
                    .get_page(args.page_id.as_deref(), args.fields.as_deref())
                    .await
            },
        ),
        tool(
            "fb_get_page_token",
            Category::Pages,
            "Get the Page access token for a Page the user manages",
            ToolAnnotations::read_only("Get Page Token"),
            |client, args: GetPageTokenArgs| async move {
                client.get_page_token(args.page_id.as_deref()).await
            },
        ),
    ]
}
