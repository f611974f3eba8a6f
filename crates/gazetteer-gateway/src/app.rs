use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_city_handler, delete_city_handler, get_city_handler, health_handler,
    list_capitals_handler, list_cities_by_state_handler, list_cities_handler,
    update_city_handler, upload_csv_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/cities",
                Router::new()
                    .route("/", get(list_cities_handler).post(create_city_handler))
                    .route("/capitals", get(list_capitals_handler))
                    .route("/state/{state}", get(list_cities_by_state_handler))
                    .route("/upload", post(upload_csv_handler))
                    .route(
                        "/{id}",
                        get(get_city_handler)
                            .put(update_city_handler)
                            .delete(delete_city_handler),
                    ),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
