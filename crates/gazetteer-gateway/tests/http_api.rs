use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use gazetteer_gateway::app::App;
use gazetteer_gateway::state::AppState;
use gazetteer_service::CityService;
use gazetteer_storage::InMemoryRepository;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn app() -> Router {
    let service = CityService::new(InMemoryRepository::new());
    App::router(AppState::new(Arc::new(service)))
}

fn payload(ibge_id: i32, name: &str, state: &str, capital: bool) -> Value {
    json!({
        "ibgeId": ibge_id,
        "name": name,
        "state": state,
        "capital": capital,
        "latitude": -23.55,
        "longitude": -46.63,
    })
}

async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

fn multipart_upload(csv: &str) -> Request<Body> {
    let boundary = "gazetteer-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"cities.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{boundary}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/cities/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check() {
    let app = app();

    let response = send(&app, "GET", "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let app = app();

    let response = send_json(&app, "POST", "/cities", &payload(3550308, "Sao Paulo", "SP", true)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_str().expect("id assigned").to_string();
    assert_eq!(created["ibgeId"], 3550308);
    assert_eq!(created["name"], "Sao Paulo");
    assert_eq!(created["state"], "SP");
    assert_eq!(created["capital"], true);

    let response = send(&app, "GET", &format!("/cities/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = send(&app, "GET", "/cities").await;
    assert_eq!(response.status(), StatusCode::OK);
    let all = body_json(response).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_with_missing_field_returns_400() {
    let app = app();

    let mut incomplete = payload(3550308, "Sao Paulo", "SP", true);
    incomplete.as_object_mut().unwrap().remove("latitude");

    let response = send_json(&app, "POST", "/cities", &incomplete).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("latitude"));
}

#[tokio::test]
async fn create_with_duplicate_ibge_id_returns_400() {
    let app = app();

    let response = send_json(&app, "POST", "/cities", &payload(3550308, "Sao Paulo", "SP", true)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(&app, "POST", "/cities", &payload(3550308, "Impostor", "RJ", false)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("3550308"));
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cities")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let app = app();

    let response = send(&app, "GET", "/cities/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn update_overwrites_record() {
    let app = app();

    let response = send_json(&app, "POST", "/cities", &payload(3550308, "Sao Paulo", "SP", true)).await;
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = send_json(
        &app,
        "PUT",
        &format!("/cities/{}", id),
        &payload(3550308, "Sao Paulo do Norte", "SP", false),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Sao Paulo do Norte");
    assert_eq!(updated["capital"], false);
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let app = app();

    let response = send_json(
        &app,
        "PUT",
        "/cities/does-not-exist",
        &payload(3550308, "Sao Paulo", "SP", true),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/cities").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app();

    let response = send_json(&app, "POST", "/cities", &payload(3550308, "Sao Paulo", "SP", true)).await;
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = send(&app, "DELETE", &format!("/cities/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/cities/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/cities/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn capital_and_state_lookups() {
    let app = app();

    for body in [
        payload(3550308, "Sao Paulo", "SP", true),
        payload(3304557, "Rio de Janeiro", "RJ", true),
        payload(3509502, "Campinas", "SP", false),
    ] {
        let response = send_json(&app, "POST", "/cities", &body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send(&app, "GET", "/cities/capitals").await;
    assert_eq!(response.status(), StatusCode::OK);
    let capitals = body_json(response).await;
    assert_eq!(capitals.as_array().unwrap().len(), 2);

    let response = send(&app, "GET", "/cities/state/SP").await;
    assert_eq!(response.status(), StatusCode::OK);
    let sp = body_json(response).await;
    let mut names: Vec<&str> = sp
        .as_array()
        .unwrap()
        .iter()
        .map(|city| city["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["Campinas", "Sao Paulo"]);
}

#[tokio::test]
async fn upload_csv_inserts_cities() {
    let app = app();

    let csv = "ibge_id,name,uf,capital,lat,lon\n\
               3550308,Sao Paulo,SP,1,-23.55,-46.63\n\
               3304557,Rio de Janeiro,RJ,0,-22.90,-43.17";

    let response = app.clone().oneshot(multipart_upload(csv)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_text(response).await, "2 cities inserted successfully!");

    let response = send(&app, "GET", "/cities").await;
    let all = body_json(response).await;
    let cities = all.as_array().unwrap();
    assert_eq!(cities.len(), 2);

    let sao_paulo = cities
        .iter()
        .find(|city| city["ibgeId"] == 3550308)
        .unwrap();
    assert_eq!(sao_paulo["capital"], true);
    assert_eq!(sao_paulo["latitude"], -23.55);

    let rio = cities.iter().find(|city| city["ibgeId"] == 3304557).unwrap();
    assert_eq!(rio["capital"], false);
}

#[tokio::test]
async fn upload_csv_skips_already_registered_ibge_ids() {
    let app = app();

    let response = send_json(&app, "POST", "/cities", &payload(3550308, "Sao Paulo", "SP", true)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let csv = "ibge_id,name,uf,capital,lat,lon\n\
               3550308,Sao Paulo again,SP,1,-23.55,-46.63\n\
               3304557,Rio de Janeiro,RJ,0,-22.90,-43.17";

    let response = app.clone().oneshot(multipart_upload(csv)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    // The count reports parsed rows; skipped duplicates are not broken out.
    assert_eq!(body_text(response).await, "2 cities inserted successfully!");

    let response = send(&app, "GET", "/cities").await;
    let all = body_json(response).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let response = send(&app, "GET", "/cities/state/SP").await;
    let sp = body_json(response).await;
    assert_eq!(sp.as_array().unwrap()[0]["name"], "Sao Paulo");
}

#[tokio::test]
async fn upload_empty_file_returns_400() {
    let app = app();

    let response = app.clone().oneshot(multipart_upload("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "The CSV file is empty.");
}

#[tokio::test]
async fn upload_header_only_returns_400() {
    let app = app();

    let response = app
        .clone()
        .oneshot(multipart_upload("ibge_id,name,uf,capital,lat,lon"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "The CSV file contains no data.");
}

#[tokio::test]
async fn upload_malformed_row_returns_500() {
    let app = app();

    let csv = "ibge_id,name,uf,capital,lat,lon\n\
               3550308,Sao Paulo,SP,1,not-a-number,-46.63";

    let response = app.clone().oneshot(multipart_upload(csv)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Error processing the CSV file:"));

    let response = send(&app, "GET", "/cities").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}
