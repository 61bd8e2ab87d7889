use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::services::Summarizer;

#[derive(Deserialize)]
struct SummaryQuery {
    q: String,
}

#[get("/summary")]
pub async fn summary(
    summarizer: web::Data<Summarizer>,
    query: web::Query<SummaryQuery>,
) -> HttpResponse {
    let keyword = query.q.trim();

    match summarizer.summarize(keyword).await {
        Ok(report) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(report),
        Err(e) => {
            log::error!("Failed to summarize {}: {}", keyword, e);
            HttpResponse::BadGateway().body(e.to_string())
        }
    }
}
