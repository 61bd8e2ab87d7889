use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::configuration::LineSettings;

type HmacSha256 = Hmac<Sha256>;

const MAX_TEXT_CHARS: usize = 5000;

/// Reply side of the messaging-bot webhook.
pub struct LineClient {
    client: Client,
    access_token: String,
    channel_secret: String,
    reply_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyBody<'a> {
    reply_token: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    #[serde(rename_all = "camelCase")]
    Message {
        reply_token: String,
        message: EventMessage,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventMessage {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl LineClient {
    pub fn new(settings: &LineSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.reply_timeout())
            .build()?;

        Ok(LineClient {
            client,
            access_token: settings.channel_access_token.clone(),
            channel_secret: settings.channel_secret.clone(),
            reply_url: format!(
                "{}/v2/bot/message/reply",
                settings.api_base_url.trim_end_matches('/')
            ),
        })
    }

    /// Checks `X-Line-Signature`: base64 HMAC-SHA256 of the raw body keyed by
    /// the channel secret.
    pub fn verify_signature(&self, body: &[u8], signature: &str) -> bool {
        let Ok(expected) = STANDARD.decode(signature.trim()) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.channel_secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    pub async fn reply_text(&self, reply_token: &str, text: &str) -> bool {
        let text = truncate_chars(text, MAX_TEXT_CHARS);
        let body = ReplyBody {
            reply_token,
            messages: vec![TextMessage { kind: "text", text }],
        };

        match self
            .client
            .post(&self.reply_url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                log::error!("Reply api answered with status {}", res.status());
                false
            }
            Err(e) => {
                log::error!("Failed to deliver reply: {:?}", e);
                false
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use hmac::Mac;

    use super::{truncate_chars, EventMessage, HmacSha256, LineClient, WebhookBody, WebhookEvent};
    use crate::configuration::LineSettings;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    fn client() -> LineClient {
        LineClient::new(&LineSettings {
            channel_access_token: "token".to_string(),
            channel_secret: "secret".to_string(),
            api_base_url: "https://api.line.me/".to_string(),
            reply_timeout_secs: 10,
        })
        .unwrap()
    }

    #[test]
    fn signature_round_trip() {
        let client = client();
        let body = br#"{"events":[]}"#;
        let signature = sign("secret", body);

        assert!(client.verify_signature(body, &signature));
        assert!(!client.verify_signature(br#"{"events":[{}]}"#, &signature));
        assert!(!client.verify_signature(body, "not base64 !!"));
        assert!(!client.verify_signature(body, ""));
        assert!(!client.verify_signature(body, &sign("other-secret", body)));
    }

    #[test]
    fn parse_webhook_events() {
        let body = r#"{
            "destination": "U123",
            "events": [
                {"type": "message", "replyToken": "r1", "message": {"type": "text", "id": "1", "text": "沙丘"}},
                {"type": "message", "replyToken": "r2", "message": {"type": "sticker", "id": "2"}},
                {"type": "follow", "replyToken": "r3"}
            ]
        }"#;
        let parsed: WebhookBody = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.events.len(), 3);
        assert!(matches!(
            &parsed.events[0],
            WebhookEvent::Message { reply_token, message: EventMessage::Text { text } }
                if reply_token == "r1" && text == "沙丘"
        ));
        assert!(matches!(
            &parsed.events[1],
            WebhookEvent::Message { message: EventMessage::Other, .. }
        ));
        assert!(matches!(&parsed.events[2], WebhookEvent::Other));
    }

    #[test]
    fn truncate_on_char_boundary() {
        assert_eq!(truncate_chars("好評負評", 2), "好評");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
