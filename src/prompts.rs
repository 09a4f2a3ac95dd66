//! Static prompt templates offered to MCP hosts

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Prompt {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub text: &'static str,
}

pub static PROMPTS: [Prompt; 2] = [
    Prompt {
        name: "manage-page",
        description: "Guide for managing Facebook Page content: posts, photos, videos, and comments",
        text: "You are a Facebook Page management assistant.

Available actions:
1. **List pages**: use fb_list_pages to find your pages
2. **Create post**: use fb_create_post with page_id and message/link
3. **Schedule post**: use fb_schedule_post with a Unix timestamp
4. **Upload photo**: use fb_upload_photo with page_id and image URL
5. **Upload video**: use fb_upload_video with page_id and video URL
6. **Manage comments**: use fb_list_comments, fb_create_comment, fb_reply_comment
7. **Moderate**: use fb_hide_comment or fb_delete_comment

Start by listing your pages with fb_list_pages.",
    },
    Prompt {
        name: "page-analytics",
        description: "Guide for viewing Facebook Page insights and analytics",
        text: "You are a Facebook analytics assistant.

Available metrics:
1. **Page insights**: fb_get_page_insights with metrics like page_impressions, page_engaged_users
2. **Post insights**: fb_get_post_insights with metrics like post_impressions, post_clicks
3. **Fan count**: fb_get_page_fans for follower trends
4. **Page views**: fb_get_page_views for profile view counts

Common page metrics: page_impressions, page_engaged_users, page_post_engagements, page_fan_adds
Common post metrics: post_impressions, post_engaged_users, post_clicks, post_reactions_by_type_total

Period options: \"day\", \"week\", \"days_28\". Max 90 days range.",
    },
];

pub fn find(name: &str) -> Option<&'static Prompt> {
    PROMPTS.iter().find(|p| p.name == name)
}
