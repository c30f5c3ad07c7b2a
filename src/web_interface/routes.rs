use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use crate::online::{Online, OnlineDirectory, SearchCategory};

/// API error payload
#[derive(Serialize)]
pub struct ApiError {
    pub message: String,
}

/// Query string of `GET /online`. Every parameter is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OnlineQuery {
    pub search_cate: String,
    pub search_text: String,
    pub show_sleeper: bool,
}

#[derive(Serialize)]
pub struct OnlineResponse {
    pub count: usize,
    pub datas: Vec<Online>,
}

/// GET /
pub fn dashboard_route() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(|| async move {
        let html = r#"<html><head><title>Vigil</title></head>
                <body><h1>Vigil is running</h1><p>See /online for JSON.</p></body></html>"#;
        Ok::<_, Rejection>(reply::html(html))
    })
}

/// GET /online?search_cate=&search_text=&show_sleeper=
pub fn list_online_route(
    online: Arc<OnlineDirectory>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("online")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<OnlineQuery>())
        .and_then(move |query: OnlineQuery| {
            let online = online.clone();
            async move { Ok::<_, Rejection>(list_online(online, query).await) }
        })
}

/// Runs the listing on a blocking thread, the directory store may block.
pub async fn list_online(online: Arc<OnlineDirectory>, query: OnlineQuery) -> reply::Response {
    let listing = tokio::task::spawn_blocking(move || {
        online.list_sessions(
            SearchCategory::parse(&query.search_cate),
            &query.search_text,
            query.show_sleeper,
        )
    })
    .await;

    match listing {
        Ok(datas) => reply::with_status(
            reply::json(&OnlineResponse {
                count: datas.len(),
                datas,
            }),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => {
            error!("Online listing task failed: {}", e);
            reply::with_status(
                reply::json(&ApiError {
                    message: "Failed to list online sessions".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}
