//! Messenger conversation tools

use super::{tool, Category, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct ListConversationsArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Number of conversations to return
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct GetMessagesArgs {
    /// Conversation ID (from fb_list_conversations)
    pub conversation_id: String,
    /// Number of messages to return
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct SendMessageArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Page-scoped ID of the recipient
    pub recipient_id: String,
    /// Message text
    pub text: String,
}

#[derive(JsonSchema, Deserialize, Clone, Debug)]
pub struct SendTypingArgs {
    /// Page ID (defaults to the configured FACEBOOK_PAGE_ID)
    pub page_id: Option<String>,
    /// Page-scoped ID of the recipient
    pub recipient_id: String,
    /// typing_on, typing_off or mark_seen (default typing_on)
    pub action: Option<String>,
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "fb_list_conversations",
            Category::Conversations,
            "List Messenger conversations for a Facebook Page",
            ToolAnnotations::read_only("List Conversations"),
            |client, args: ListConversationsArgs| async move {
                client
                    .list_conversations(args.page_id.as_deref(), args.limit)
                    .await
            },
        ),
        tool(
            "fb_get_messages",
            Category::Conversations,
            "Get messages in a Messenger conversation",
            ToolAnnotations::read_only("Get Messages"),
            |client, args: GetMessagesArgs| async move {
                client.get_messages(&args.conversation_id, args.limit).await
            },
        ),
        tool(
            "fb_send_message",
            Category::Conversations,
            "Send a Messenger reply from the Page. Only allowed within 24 hours of the user's last message.",
            ToolAnnotations::write("Send Message"),
            |client, args: SendMessageArgs| async move {
                client
                    .send_message(args.page_id.as_deref(), &args.recipient_id, &args.text)
                    .await
            },
        ),
        tool(
            "fb_send_typing",
            Category::Conversations,
            "Show or hide the typing indicator, or mark the conversation as seen",
            ToolAnnotations::idempotent_write("Send Typing Indicator"),
            |client, args: SendTypingArgs| async move {
                client
                    .send_typing(
                        args.page_id.as_deref(),
                        &args.recipient_id,
                        args.action.as_deref(),
                    )
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
    async fn test_send_typing_action() {
        let mock = Arc::new(MockTransport::new());
        let client = FacebookClient::new(Credential::new("tok", None), mock.clone()).unwrap();

        tools()[3]
            .invoke(
                client,
                json!({ "page_id": "1", "recipient_id": "42", "action": "mark_seen" }),
            )
            .await
            .unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.path, "1/messages");
        assert_eq!(req.param("sender_action"), Some("mark_seen"));
        assert_eq!(req.param("message"), None);
    }
}
