use crate::page::{render_page, Notice, PageView};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use bookrec_core::{submit_feedback, Error, Recommendation, Recommender};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Deserialize)]
struct PageQuery {
    title: Option<String>,
}

#[derive(Deserialize)]
struct FeedbackForm {
    comment: String,
    title: Option<String>,
}

#[derive(Deserialize)]
struct RecommendRequest {
    title: String,
}

#[derive(Serialize)]
struct RecommendResponse {
    title: String,
    result: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    comment: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(recommender: Arc<Recommender>, bind: String, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(Self::configure)
        })
        .bind((bind, port))?
        .run()
        .await
    }

    /// Register every route. Shared by the server and tests.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(index_page))
            .route("/feedback", web::post().to(feedback_page))
            .route("/health", web::get().to(health))
            .route("/api/titles", web::get().to(list_titles))
            .route("/api/recommend", web::post().to(recommend))
            .route("/api/feedback", web::post().to(feedback));
    }
}

fn html(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn error_json(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::UnknownTitle(_) => HttpResponse::NotFound().json(body),
        Error::EmptyFeedback => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn index_page(
    recommender: web::Data<Arc<Recommender>>,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    use actix_web::http::StatusCode;

    let titles = recommender.titles();
    let mut view = PageView {
        titles,
        selected: query.title.as_deref(),
        ..Default::default()
    };

    let Some(title) = query.title.as_deref() else {
        return Ok(html(StatusCode::OK, render_page(&view)));
    };

    let status = match recommender.cards_with(title, &mut rand::rng()) {
        Ok(cards) => {
            info!(title, shown = cards.len(), "recommendations served");
            view.cards = cards;
            StatusCode::OK
        }
        Err(Error::UnknownTitle(_)) => {
            warn!(title, "recommendation requested for unknown title");
            view.notice = Some(Notice::Warning(format!("Title not found: {}", title)));
            StatusCode::NOT_FOUND
        }
        Err(e) => {
            warn!(title, error = %e, "recommendation failed");
            view.notice = Some(Notice::Warning(e.to_string()));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    Ok(html(status, render_page(&view)))
}

async fn feedback_page(
    recommender: web::Data<Arc<Recommender>>,
    form: web::Form<FeedbackForm>,
) -> ActixResult<HttpResponse> {
    use actix_web::http::StatusCode;

    let notice = match submit_feedback(&form.comment) {
        Ok(ack) => {
            info!(chars = ack.chars, "feedback received");
            Notice::Success(format!("{} 💡", ack.message))
        }
        Err(e) => {
            warn!("empty feedback submitted");
            Notice::Warning(e.to_string())
        }
    };

    let view = PageView {
        titles: recommender.titles(),
        selected: form.title.as_deref(),
        feedback_notice: Some(notice),
        ..Default::default()
    };
    Ok(html(StatusCode::OK, render_page(&view)))
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "title": "bookrec",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

async fn list_titles(recommender: web::Data<Arc<Recommender>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": recommender.titles()
    })))
}

async fn recommend(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    match recommender.cards_with(&req.title, &mut rand::rng()) {
        Ok(cards) => Ok(HttpResponse::Ok().json(RecommendResponse {
            title: req.title.clone(),
            result: cards,
        })),
        Err(e) => {
            warn!(title = %req.title, error = %e, "recommendation failed");
            Ok(error_json(&e))
        }
    }
}

async fn feedback(req: web::Json<FeedbackRequest>) -> ActixResult<HttpResponse> {
    match submit_feedback(&req.comment) {
        Ok(ack) => {
            info!(chars = ack.chars, "feedback received");
            Ok(HttpResponse::Ok().json(serde_json::json!({ "result": ack })))
        }
        Err(e) => Ok(error_json(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use bookrec_core::{Artifacts, Distance, PivotMatrix, RatingRow, RatingsTable, RecommenderConfig};

    const BOOKS: [&str; 6] = ["Dune", "Foundation", "Neuromancer", "Snow Crash", "1984", "Brave New World"];

    fn recommender() -> Arc<Recommender> {
        let mut cells = Vec::new();
        for (i, title) in BOOKS.iter().enumerate() {
            for u in 0..3 {
                cells.push((*title, format!("u{}", u), ((i + u) % 5) as f32 + 1.0));
            }
        }
        let pivot = PivotMatrix::from_ratings(cells).unwrap();
        let ratings = RatingsTable::new(
            BOOKS
                .iter()
                .map(|t| RatingRow::new(*t, format!("http://img/{}.jpg", t), 8.0))
                .collect(),
        );
        let artifacts = Artifacts::from_pivot(pivot, ratings, Distance::Cosine);
        Arc::new(Recommender::new(artifacts, RecommenderConfig::default()).unwrap())
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(recommender()))
                    .configure(RestApi::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_recommend_returns_five_aligned_cards() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/recommend")
            .set_json(serde_json::json!({ "title": "Dune" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let cards = body["result"].as_array().unwrap();
        assert_eq!(cards.len(), 5);
        for card in cards {
            let title = card["title"].as_str().unwrap();
            assert_eq!(card["poster_url"], format!("http://img/{}.jpg", title));
            assert!(card["link"].as_str().unwrap().starts_with("https://www.goodreads.com/search?q="));
        }
    }

    #[actix_web::test]
    async fn test_recommend_unknown_title_is_404() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/recommend")
            .set_json(serde_json::json!({ "title": "NonexistentBook" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Title not found: NonexistentBook");
    }

    #[actix_web::test]
    async fn test_feedback_validation() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({ "comment": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({ "comment": "great picks" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["message"], "Thanks for your feedback!");
    }

    #[actix_web::test]
    async fn test_titles_listing() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/titles").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"].as_array().unwrap().len(), 6);
    }

    #[actix_web::test]
    async fn test_index_page_renders_cards() {
        let app = app!();
        let req = test::TestRequest::get().uri("/?title=Snow+Crash").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert_eq!(html.matches("class='book-card'").count(), 5);
        assert!(html.contains("<option value='Snow Crash' selected>"));
    }

    #[actix_web::test]
    async fn test_index_page_without_selection() {
        let app = app!();
        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Show Recommendations"));
        assert!(!html.contains("class='book-card'"));
    }

    #[actix_web::test]
    async fn test_feedback_page_messages() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/feedback")
            .set_form([("comment", ""), ("title", "Dune")])
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Please enter your comment before submitting."));
        assert!(!html.contains("Thanks for your feedback!"));

        let req = test::TestRequest::post()
            .uri("/feedback")
            .set_form([("comment", "more sci-fi please")])
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Thanks for your feedback!"));
    }
}
