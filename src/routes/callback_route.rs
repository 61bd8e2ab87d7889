use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::services::{EventMessage, LineClient, Summarizer, WebhookBody, WebhookEvent};

const SIGNATURE_HEADER: &str = "X-Line-Signature";

#[post("/callback")]
pub async fn callback(
    req: HttpRequest,
    body: web::Bytes,
    summarizer: web::Data<Summarizer>,
    line_client: web::Data<LineClient>,
) -> HttpResponse {
    let Some(signature) = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return HttpResponse::BadRequest().body("Missing signature");
    };

    log::info!("Request body: {}", String::from_utf8_lossy(&body));

    if !line_client.verify_signature(&body, signature) {
        log::warn!("Rejected webhook call with invalid signature");
        return HttpResponse::BadRequest().body("Invalid signature");
    }

    let webhook_body: WebhookBody = match serde_json::from_slice(&body) {
        Ok(webhook_body) => webhook_body,
        Err(e) => {
            log::error!("Failed to parse webhook body: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid body");
        }
    };

    for event in webhook_body.events {
        if let WebhookEvent::Message {
            reply_token,
            message: EventMessage::Text { text },
        } = event
        {
            actix_web::rt::spawn(reply_with_summary(
                summarizer.clone(),
                line_client.clone(),
                reply_token,
                text,
            ));
        }
    }

    HttpResponse::Ok().body("OK")
}

async fn reply_with_summary(
    summarizer: web::Data<Summarizer>,
    line_client: web::Data<LineClient>,
    reply_token: String,
    text: String,
) {
    let keyword = text.trim();

    let reply = match summarizer.summarize(keyword).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("Failed to summarize {}: {}", keyword, e);
            fallback_reply(keyword)
        }
    };

    line_client.reply_text(&reply_token, &reply).await;
}

pub fn fallback_reply(keyword: &str) -> String {
    format!("查詢「{}」失敗，請稍後再試", keyword)
}
