use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// `GET /user` and `GET /users`, merged at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(user::me))
        .route("/users", get(user::list))
}
