//! Insight tools: page and post metrics

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct PageInsightsArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Comma-separated metrics (e.g. "page_impressions,page_engaged_users")
    pub metric: String,
    /// Aggregation period: day, week or days_28 (default day)
    pub period: Option<String>,
    /// Range start (Unix timestamp or YYYY-MM-DD)
    pub since: Option<String>,
    /// Range end (Unix timestamp or YYYY-MM-DD), at most 90 days after since
    pub until: Option<String>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct PostInsightsArgs {
    /// Post ID
    pub post_id: String,
    /// Comma-separated metrics (e.g. "post_impressions,post_clicks")
    pub metric: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct PageFansArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct PageViewsArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Aggregation period: day, week or days_28 (default day)
    pub period: Option<String>,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_get_page_insights",
            Category::Insights,
            "Get Page-level insight metrics over a period",
            ToolAnnotations::read_only("Page Insights"),
            |client, args: PageInsightsArgs| async move {
                client
                    .get_page_insights(
                        args.page_id.as_deref(),
                        &args.metric,
                        args.period.as_deref(),
                        args.since.as_deref(),
                        args.until.as_deref(),
                    )
                    .await
            },
        ),
        tool(
            "fb_get_post_insights",
            Category::Insights,
            "Get insight metrics for a single post",
            ToolAnnotations::read_only("Post Insights"),
            |client, args: PostInsightsArgs| async move {
                client.get_post_insights(&args.post_id, &args.metric).await
            },
        ),
        tool(
            "fb_get_page_fans",
            Category::Insights,
            "Get the Page's follower (fan) count trend",
            ToolAnnotations::read_only("Page Fans"),
            |client, args: PageFansArgs| async move {
                client.get_page_fans(args.page_id.as_deref()).await
            },
        ),
        tool(
            "fb_get_page_views",
            Category::Insights,
            "Get the number of times the Page profile was viewed",
            ToolAnnotations::read_only("Page Views"),
            |client, args: PageViewsArgs| async move {
                client
                    .get_page_views(args.page_id.as_deref(), args.period.as_deref())
                    .await
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facebook::mock::MockTransport;
    use crate::facebook::{Credential, FacebookClient};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_page_insights_passes_range() {
        let mock = Arc::new(MockTransport::new());
        let client = FacebookClient::new(Credential::new("tok", None), mock.clone()).unwrap();

        tools()[0]
            .invoke(
                client,
                json!({
                    "page_id": "123",
                    "metric": "page_impressions",
                    "period": "week",
                    "since": "2024-01-01",
                    "until": "2024-02-01"
                }),
            )
            .await
            .unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.path, "123/insights");
        assert_eq!(req.param("metric"), Some("page_impressions"));
        assert_eq!(req.param("period"), Some("week"));
        assert_eq!(req.param("since"), Some("2024-01-01"));
        assert_eq!(req.param("until"), Some("2024-02-01"));
    }

    #[tokio::test]
    async fn test_page_views_defaults_to_daily() {
        let mock = Arc::new(MockTransport::new());
        let client = FacebookClient::new(Credential::new("tok", None), mock.clone()).unwrap();

        tools()[3]
            .invoke(client, json!({ "page_id": "123" }))
            .await
            .unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.param("metric"), Some("page_views_total"));
        assert_eq!(req.param("period"), Some("day"));
    }
}
