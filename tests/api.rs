use std::sync::Arc;

use property_analyzer::config::AppConfig;
use property_analyzer::models::HorizonInput;
use property_analyzer::routes::routes;
use property_analyzer::services::calculations::analyze_horizon;
use property_analyzer::services::report::report_lines;
use property_analyzer::state::AppState;
use serde_json::{json, Value};
use warp::http::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_with(config: AppConfig) -> Arc<AppState> {
    Arc::new(AppState::new(&config).unwrap())
}

fn offline_state() -> Arc<AppState> {
    state_with(AppConfig::default())
}

fn austin_input() -> Value {
    json!({
        "purchase_price": 300000,
        "monthly_rent": 2500,
        "expenses": { "amount": 8000, "period": "annual" },
        "downpayment": { "amount": 60000 },
        "location": "Austin, TX",
        "size_sqft": 1200
    })
}

fn tulsa_input() -> Value {
    json!({
        "purchase_price": 280000,
        "monthly_rent": 2400,
        "expenses": { "amount": 625, "period": "monthly" },
        "downpayment": { "percent": 20 },
        "location": "Tulsa, OK",
        "size_sqft": 1100
    })
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_noi_analysis_is_recorded_in_history() {
    let state = offline_state();
    let api = routes(state.clone());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/analysis/noi")
        .json(&austin_input())
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp.body());
    assert_eq!(body["market_tier"], "High");
    assert_eq!(body["estimated_monthly_rent"], 3000.0);
    assert_eq!(body["estimated_market_price"], 420000.0);
    assert_eq!(body["net_operating_income"], 22000.0);
    assert_eq!(body["cap_rate_pct"], 7.33);
    assert_eq!(body["roi_pct"], 7.33);
    assert_eq!(body["cash_on_cash_pct"], 36.67);
    assert_eq!(body["recommendation"], "Buy");

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/history")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let history = body_json(resp.body());
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["analysis"]["strategy"], "noi");
    assert_eq!(history[0]["analysis"]["recommendation"], "Buy");
    assert!(history[0]["recorded_at"].is_string());
}

#[tokio::test]
async fn test_horizon_analysis_with_risk_rating() {
    let api = routes(offline_state());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/analysis/horizon")
        .json(&json!({
            "purchase_price": 100000,
            "monthly_rent": 1000,
            "expenses": { "amount": 300, "period": "monthly" },
            "downpayment": { "percent": 20 },
            "duration_years": 10,
            "risk_rating": 4
        }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp.body());
    assert_eq!(body["downpayment"], 20000.0);
    assert_eq!(body["total_income"], 120000.0);
    assert_eq!(body["total_expense"], 36000.0);
    assert_eq!(body["net_profit"], 84000.0);
    assert_eq!(body["roi_pct"], 420.0);
    assert_eq!(body["verdict"], "Good");
}

#[tokio::test]
async fn test_compare_records_only_first_property() {
    let state = offline_state();
    let api = routes(state.clone());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/analysis/compare")
        .json(&json!({ "first": austin_input(), "second": tulsa_input() }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp.body());
    assert_eq!(body["first"]["market_tier"], "High");
    assert_eq!(body["second"]["market_tier"], "Medium");
    // 28800 income - 7500 expenses against a 56000 downpayment
    assert_eq!(body["second"]["net_operating_income"], 21300.0);
    assert_eq!(body["second"]["cash_on_cash_pct"], 38.04);

    let history = state.session.history().await;
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let api = routes(offline_state());
    let mut input = austin_input();
    input["purchase_price"] = json!(0);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/analysis/noi")
        .json(&input)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp.body());
    assert!(body["error"].as_str().unwrap().contains("purchase_price"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let api = routes(offline_state());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/analysis/noi")
        .header("content-type", "application/json")
        .body("{\"purchase_price\": \"lots\"}")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let api = routes(offline_state());

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/nothing-here")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp.body())["error"], "Not Found");
}

#[tokio::test]
async fn test_market_profile_lookup() {
    let api = routes(offline_state());

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/market?location=Tulsa%2C%20OK")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["tier"], "Medium");
    assert_eq!(body["rent_per_sqft"], 1.8);

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/market")
        .reply(&api)
        .await;
    assert_eq!(body_json(resp.body())["tier"], "Low");
}

#[tokio::test]
async fn test_csv_upload() {
    let api = routes(offline_state());
    let csv = "price,expected_rent,annual_expenses,downpayment,location,sqft\n\
               300000,2500,8000,60000,\"Austin, TX\",1200\n\
               -1,2400,7500,56000,Fresno,1100\n";

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/upload")
        .body(csv)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let rows = body_json(resp.body());
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["row"], 1);
    assert_eq!(rows[0]["result"]["cash_on_cash_pct"], 36.67);
    assert!(rows[1]["error"].is_string());
}

#[tokio::test]
async fn test_csv_upload_without_required_columns() {
    let api = routes(offline_state());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/upload")
        .body("name,value\nx,1\n")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pdf_report_download() {
    let api = routes(offline_state());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/report")
        .json(&austin_input())
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/pdf");
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"investment_report.pdf\""
    );
    assert!(resp.body().starts_with(b"%PDF-"));
    let pdf = lopdf::Document::load_mem(resp.body()).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[tokio::test]
async fn test_currency_conversion_live_and_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "rates": { "USD": 1.0, "EUR": 0.9 }
        })))
        .mount(&server)
        .await;

    let mut config = AppConfig::default();
    config.exchange_rates.base_url = server.uri();
    let api = routes(state_with(config));

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/currency/convert?amount=1000&from=USD&to=EUR")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["source"], "live");
    assert_eq!(body["converted"], 900.0);

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&down)
        .await;
    let mut config = AppConfig::default();
    config.exchange_rates.base_url = down.uri();
    let api = routes(state_with(config));

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/currency/convert?amount=100&to=GBP")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["from"], "USD");
    assert_eq!(body["converted"], 79.0);

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/currency/convert?amount=100&to=XYZ")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_geocode_falls_back_to_static_pin() {
    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;

    let mut config = AppConfig::default();
    config.geocoding.base_url = down.uri();
    let api = routes(state_with(config));

    let resp = warp::test::request()
        .method("GET")
        .path("/api/v1/geocode?location=Charlotte")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["latitude"], 35.2271);
    assert_eq!(body["longitude"], -80.8431);
}

#[tokio::test]
async fn test_contact_and_subscribe_forms() {
    let state = offline_state();
    let api = routes(state.clone());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/contact")
        .json(&json!({ "email": "owner@example.com" }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp.body())["error"],
        "Please fill in both email and message fields."
    );

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/contact")
        .json(&json!({ "email": "owner@example.com", "message": "Interested in the Austin report" }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/subscribe")
        .json(&json!({ "email": "reader@example.com" }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let contacts = state.session.contacts().await;
    assert_eq!(contacts.len(), 2);
    assert!(contacts[1].message.is_none());
}

#[tokio::test]
async fn test_horizon_pdf_report_download() {
    let api = routes(offline_state());

    let input = json!({
        "purchase_price": 100000,
        "monthly_rent": 1000,
        "expenses": { "amount": 300, "period": "monthly" },
        "downpayment": { "percent": 20 },
        "duration_years": 10,
        "risk_rating": 6
    });

    let resp = warp::test::request()
        .method("POST")
        .path("/api/v1/report/horizon")
        .json(&input)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/pdf");
    let pdf = lopdf::Document::load_mem(resp.body()).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);

    let input: HorizonInput = serde_json::from_value(input).unwrap();
    let lines = report_lines(&analyze_horizon(&input).unwrap().rows());
    assert!(lines.contains(&"ROI %: 420.00".to_string()));
    assert!(lines.contains(&"Investment Verdict: Moderate".to_string()));
}
