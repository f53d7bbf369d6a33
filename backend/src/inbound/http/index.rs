//! Service root.

use actix_web::{HttpResponse, get};

/// Plain-text greeting served at the root path.
pub const GREETING: &str = "Let's park vessels at berths!";

/// Greeting endpoint, handy as a smoke test.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain"))
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}
