pub use super::routes::todos;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/", get(read_root))
        .merge(router)
}

async fn read_root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}
