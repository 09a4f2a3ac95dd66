//! End-to-end invocation tests against a mock Graph transport

#[cfg(test)]
mod tests {
    use crate::facebook::mock::MockTransport;
    use crate::facebook::transport::Method;
    use crate::facebook::GraphTransport;
    use crate::server::FacebookServer;
    use crate::tools::Catalog;
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    fn server_with(
        token: Option<&str>,
        page: Option<&str>,
        mock: &Arc<MockTransport>,
    ) -> FacebookServer {
        let transport: Arc<dyn GraphTransport> = mock.clone();
        FacebookServer::new(token.map(str::to_string), page.map(str::to_string), transport)
    }

    /// Minimal valid arguments for every tool, built from the schema's
    /// required list
    fn sample_args(schema: &Value) -> Value {
        let props = schema.get("properties").and_then(|p| p.as_object()).unwrap();
        let required: Vec<&str> = schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        let mut args = Map::new();
        for key in required {
            let ty = props[key].get("type").cloned().unwrap_or(Value::Null);
            let value = match ty.as_str() {
                Some("boolean") => json!(true),
                Some("integer") | Some("number") => json!(1_900_000_000),
                _ => json!("123"),
            };
            args.insert(key.to_string(), value);
        }
        args.insert("page_id".to_string(), json!("123"));
        Value::Object(args)
    }

    #[tokio::test]
    async fn test_every_tool_passes_result_through() {
        let payload = json!({ "id": "123_456", "nested": { "list": [1, 2, 3] } });
        let mock = Arc::new(MockTransport::with_default(payload.clone()));
        let server = server_with(Some("static-token"), None, &mock);

        let descriptors: Vec<_> = server.list_tools().into_iter().cloned().collect();
        for descriptor in &descriptors {
            let args = sample_args(&descriptor.input_schema);
            let envelope = server.call_tool(descriptor.name, args).await;
            assert!(
                !envelope.is_error,
                "{} failed: {}",
                descriptor.name,
                envelope.text
            );
            let parsed: Value = serde_json::from_str(&envelope.text).unwrap();
            assert_eq!(parsed, payload, "{} payload", descriptor.name);
        }

        // Exactly one outbound request per invocation
        assert_eq!(mock.requests().len(), descriptors.len());
        assert!(mock
            .requests()
            .iter()
            .all(|r| r.access_token == "static-token"));
    }

    #[tokio::test]
    async fn test_unknown_tool_named_in_error() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(None, None, &mock);

        let envelope = server.call_tool("not_a_tool", json!({})).await;
        assert!(envelope.is_error);
        assert!(envelope.text.contains("not_a_tool"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_for_every_tool() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(None, None, &mock);
        let catalog = Catalog::new();

        for descriptor in catalog.descriptors() {
            let envelope = server
                .call_tool(descriptor.name, sample_args(&descriptor.input_schema))
                .await;
            assert!(envelope.is_error, "{}", descriptor.name);
            assert!(
                envelope.text.contains("FACEBOOK_PAGE_ACCESS_TOKEN is required"),
                "{}: {}",
                descriptor.name,
                envelope.text
            );
        }
        assert!(mock.requests().is_empty(), "no network call without a token");
    }

    #[tokio::test]
    async fn test_list_tools_is_stable() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(None, None, &mock);

        let first = serde_json::to_value(server.list_tools()).unwrap();
        let second = serde_json::to_value(server.list_tools()).unwrap();
        assert_eq!(first, second);

        let catalog: Vec<&str> = Catalog::new().descriptors().map(|d| d.name).collect();
        let listed: Vec<&str> = server.list_tools().iter().map(|d| d.name).collect();
        assert_eq!(listed, catalog);
    }

    #[tokio::test]
    async fn test_rebinding_with_override_credentials() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(None, None, &mock);

        let envelope = server
            .call_tool(
                "fb_list_pages",
                json!({ "FACEBOOK_PAGE_ACCESS_TOKEN": "first-token" }),
            )
            .await;
        assert!(!envelope.is_error);
        assert_eq!(
            server.binder().bound_credential().unwrap().access_token,
            "first-token"
        );

        let envelope = server
            .call_tool(
                "fb_get_post",
                json!({ "post_id": "1_2", "FACEBOOK_PAGE_ACCESS_TOKEN": "second-token" }),
            )
            .await;
        assert!(!envelope.is_error);
        assert_eq!(
            server.binder().bound_credential().unwrap().access_token,
            "second-token"
        );

        let tokens: Vec<String> = mock
            .requests()
            .into_iter()
            .map(|r| r.access_token)
            .collect();
        assert_eq!(tokens, vec!["first-token", "second-token"]);
    }

    #[tokio::test]
    async fn test_static_credential_beats_override() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(Some("static-token"), None, &mock);

        server
            .call_tool(
                "fb_list_pages",
                json!({ "FACEBOOK_PAGE_ACCESS_TOKEN": "override-token" }),
            )
            .await;
        assert_eq!(mock.last_request().unwrap().access_token, "static-token");
    }

    #[tokio::test]
    async fn test_list_pages_scenario() {
        let pages = json!({ "data": [{ "id": "1", "name": "Cafe" }] });
        let mock = Arc::new(MockTransport::with_default(pages.clone()));
        let server = server_with(Some("tok"), None, &mock);

        let envelope = server.call_tool("fb_list_pages", json!({})).await;
        assert!(!envelope.is_error);
        let parsed: Value = serde_json::from_str(&envelope.text).unwrap();
        assert!(parsed["data"].is_array());
        assert_eq!(parsed, pages);
    }

    #[tokio::test]
    async fn test_create_post_scenario() {
        let mock = Arc::new(MockTransport::with_default(json!({ "id": "123_999" })));
        let server = server_with(Some("tok"), None, &mock);

        let envelope = server
            .call_tool("fb_create_post", json!({ "page_id": "123", "message": "hi" }))
            .await;
        assert!(!envelope.is_error);
        assert!(envelope.text.contains("123_999"));

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "123/feed");
        assert_eq!(req.param("message"), Some("hi"));
    }

    #[tokio::test]
    async fn test_create_post_without_token_scenario() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(None, None, &mock);

        let envelope = server
            .call_tool("fb_create_post", json!({ "page_id": "123", "message": "hi" }))
            .await;
        assert!(envelope.is_error);
        assert!(envelope.text.contains("FACEBOOK_PAGE_ACCESS_TOKEN"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_error_envelope() {
        let mock = Arc::new(MockTransport::new());
        mock.push_error(crate::facebook::transport::remote_error(
            403,
            r#"{"error":{"message":"(#200) Requires pages_manage_posts permission","type":"OAuthException","code":200}}"#,
        ));
        let server = server_with(Some("tok"), None, &mock);

        let envelope = server
            .call_tool("fb_delete_post", json!({ "post_id": "1_2" }))
            .await;
        assert!(envelope.is_error);
        assert!(envelope.text.starts_with("Error: Facebook API error (permission)"));
        assert!(envelope.text.contains("pages_manage_posts"));
    }

    #[tokio::test]
    async fn test_validation_error_skips_network() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(Some("tok"), None, &mock);

        let envelope = server
            .call_tool("fb_list_comments", json!({ "limit": 5 }))
            .await;
        assert!(envelope.is_error);
        assert!(envelope.text.contains("Invalid arguments for fb_list_comments"));
        assert!(envelope.text.contains("object_id"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_configured_page_fills_missing_page_id() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(Some("tok"), Some("777"), &mock);

        let envelope = server.call_tool("fb_list_posts", json!({ "limit": 3 })).await;
        assert!(!envelope.is_error, "{}", envelope.text);
        assert_eq!(mock.last_request().unwrap().path, "777/posts");
    }

    #[tokio::test]
    async fn test_server_info_without_static_token() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(None, None, &mock);
        let info = server.server_info();
        assert_eq!(info["connected"], false);
        assert_eq!(info["tools_available"], 28);
        assert_eq!(info["tool_categories"]["pages"], 3);
        assert_eq!(info["tool_categories"]["comments"], 5);
        assert_eq!(info["tool_categories"]["insights"], 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_invocations_keep_their_credentials() {
        const CALLS: usize = 8;
        // No reply is released until every invocation has bound its client
        // and sent its request, so all rebindings overlap in-flight calls
        let mock = Arc::new(MockTransport::new().gated(CALLS));
        let server = Arc::new(server_with(None, None, &mock));

        let mut handles = Vec::new();
        for i in 0..CALLS {
            let server = server.clone();
            handles.push(tokio::spawn(async move {
                server
                    .call_tool(
                        "fb_get_post",
                        json!({
                            "post_id": format!("p{}", i),
                            "FACEBOOK_PAGE_ACCESS_TOKEN": format!("token-{}", i)
                        }),
                    )
                    .await
            }));
        }

        let all = futures::future::join_all(handles);
        let results = tokio::time::timeout(std::time::Duration::from_secs(10), all)
            .await
            .expect("invocations should not deadlock");
        for result in results {
            let envelope = result.unwrap();
            assert!(!envelope.is_error, "{}", envelope.text);
        }

        let requests = mock.requests();
        assert_eq!(requests.len(), CALLS);
        for req in requests {
            let i = req.path.trim_start_matches('p');
            assert_eq!(req.access_token, format!("token-{}", i));
        }
    }

    #[tokio::test]
    async fn test_url_shaped_id_is_rejected() {
        let mock = Arc::new(MockTransport::new());
        let server = server_with(Some("static-token"), None, &mock);

        for post_id in ["http://127.0.0.1:9/steal", "../me", "//evil.example/x"] {
            let envelope = server
                .call_tool("fb_get_post", json!({ "post_id": post_id }))
                .await;
            assert!(envelope.is_error, "{}", post_id);
            assert!(
                envelope.text.contains("Invalid arguments for fb_get_post"),
                "{}",
                envelope.text
            );
        }
        assert!(mock.requests().is_empty());
    }
}
