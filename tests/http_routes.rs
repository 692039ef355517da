// tests/http_routes.rs

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{add_product, register_user, test_state, test_state_with_images, TEST_PASSWORD};
use storefront::{build_router, config::AppState};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "XBOUNDARYX";

// Formulário multipart só com campos de texto
fn multipart_request(token: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = fields
        .iter()
        .map(|(name, value)| {
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
        })
        .collect::<String>();
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/add-product")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn logged_in(state: &AppState, phone: &str) -> String {
    let user = register_user(state, phone).await;
    state.auth_service.create_token(user.id).unwrap()
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = build_router(test_state().await);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, doc) = send(
        &app,
        Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/checkout"].is_object());
    assert!(doc["paths"]["/add-to-cart"].is_object());
}

#[tokio::test]
async fn products_listing_applies_weight_limits() {
    let state = test_state().await;
    add_product(&state, "Light", 5.0, 4.0, 0.5).await;
    add_product(&state, "Heavy", 5.0, 4.0, 10.0).await;
    let app = build_router(state);

    let (status, body) = send(
        &app,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/products?lower_limit=1&upper_limit=")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lowerLimit"], json!(1.0));
    assert!(body["upperLimit"].is_null());
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Heavy");

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/products?lower_limit=heavy")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = build_router(test_state().await);

    for uri in ["/basket", "/checkout", "/orders", "/add-product"] {
        let (status, body) = send(
            &app,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["success"], false);
    }

    let (status, _) = send(&app, get_with_token("/basket", "not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_then_login_sets_the_session_cookie() {
    let app = build_router(test_state().await);

    let (status, body) = send(
        &app,
        form_request(
            "/auth/register",
            "firstName=Jane&lastName=Doe&phone=0711111111&password=hunter22&repeatPassword=hunter22",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");

    let response = app
        .clone()
        .oneshot(form_request(
            "/auth/login",
            &format!("phone=0711111111&password={TEST_PASSWORD}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Welcome Doe!");

    // O cookie sozinho já autentica
    let session = cookie.split(';').next().unwrap().to_string();
    let (status, basket) = send(
        &app,
        Request::builder()
            .uri("/basket")
            .header(header::COOKIE, session)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(basket["items"], json!([]));
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = build_router(test_state().await);

    let (status, body) = send(
        &app,
        form_request("/auth/register", "firstName=Jane&phone=0722222222&password=hunter22&repeatPassword=hunter22"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing some required parameters");

    let (status, body) = send(
        &app,
        form_request(
            "/auth/register",
            "firstName=Jane&lastName=Doe&phone=0722222222&password=hunter22&repeatPassword=hunter23",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Passwords don't match");

    let registration =
        "firstName=Jane&lastName=Doe&phone=0722222222&password=hunter22&repeatPassword=hunter22";
    let (status, _) = send(&app, form_request("/auth/register", registration)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, form_request("/auth/register", registration)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let state = test_state().await;
    register_user(&state, "0733333333").await;
    let app = build_router(state);

    let (status, body) = send(
        &app,
        form_request("/auth/login", "phone=0733333333&password=nope-nope"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn add_to_cart_validates_the_payload() {
    let state = test_state().await;
    let token = logged_in(&state, "0744444444").await;
    let widget = add_product(&state, "Widget", 20.0, 15.0, 1.0).await;
    let app = build_router(state);

    let (status, body) = send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": widget.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing some required parameters");

    let (status, _) = send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": 0, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": 9999, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to add to cart");

    let (status, body) = send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": widget.id, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn remove_from_cart_of_missing_line_is_not_found() {
    let state = test_state().await;
    let token = logged_in(&state, "0755555555").await;
    let widget = add_product(&state, "Widget", 20.0, 15.0, 1.0).await;
    let app = build_router(state);

    let (status, _) = send(
        &app,
        json_request("POST", "/remove-from-cart", &token, json!({ "productId": widget.id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": widget.id, "quantity": 1 })),
    )
    .await;
    let (status, _) = send(
        &app,
        json_request("POST", "/remove-from-cart", &token, json!({ "productId": widget.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn checkout_flow_over_http() {
    let state = test_state().await;
    let token = logged_in(&state, "0766666666").await;
    let widget = add_product(&state, "Widget", 20.0, 15.0, 1.0).await;
    let app = build_router(state);

    let (status, _) = send(&app, get_with_token("/checkout", &token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": widget.id, "quantity": 2 })),
    )
    .await;
    send(
        &app,
        json_request("POST", "/add-to-cart", &token, json!({ "productId": widget.id, "quantity": 1 })),
    )
    .await;

    let (status, basket) = send(&app, get_with_token("/basket", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(basket["items"][0]["quantity"], 3);
    assert_eq!(basket["totalWithPromotion"], json!(45.0));

    let (status, _) = send(&app, get_with_token("/checkout?payment=Cash", &token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get_with_token("/checkout?payment=bank", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sale"]["total"], json!(15.0));
    assert_eq!(body["sale"]["paymentMode"], "Bank");

    let (_, basket) = send(&app, get_with_token("/basket", &token)).await;
    assert_eq!(basket["items"], json!([]));

    let (status, orders) = send(&app, get_with_token("/orders", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["products"][0]["quantity"], 3);
}

#[tokio::test]
async fn add_product_accepts_an_uploaded_image() {
    let images = tempfile::tempdir().unwrap();
    let state = test_state_with_images(images.path().join("uploads")).await;
    let token = logged_in(&state, "0777777777").await;
    let app = build_router(state);

    let boundary = "XBOUNDARYX";
    let part = |name: &str, value: &str| {
        format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
    };
    let mut body = String::new();
    body.push_str(&part("name", "Blue Widget"));
    body.push_str(&part("weight", "1.5"));
    body.push_str(&part("price", "20"));
    body.push_str(&part("promotional_price", "15"));
    body.push_str(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"image_file\"; filename=\"widget.png\"\r\nContent-Type: image/png\r\n\r\nPNGDATA\r\n--{boundary}--\r\n"
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/add-product")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, product) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["slug"], "Blue-Widget");
    assert_eq!(product["quantity"], 1);

    let image_url = product["imageUrl"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("/static/images/"));
    assert!(image_url.ends_with(".png"));

    let stored = images
        .path()
        .join("uploads")
        .join(image_url.trim_start_matches("/static/images/"));
    assert_eq!(std::fs::read(stored).unwrap(), b"PNGDATA");

    let served = app
        .clone()
        .oneshot(Request::builder().uri(&image_url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_product_rejects_promotion_above_price() {
    let state = test_state().await;
    let token = logged_in(&state, "0788888888").await;
    let app = build_router(state);

    let fields = [
        ("name", "Gadget"),
        ("image_url", "/static/images/gadget.png"),
        ("weight", "1"),
        ("price", "10"),
        ("promotional_price", "12"),
    ];
    let (status, body) = send(&app, multipart_request(&token, &fields)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Promotion price must be less than original price");
}

#[tokio::test]
async fn add_product_rejects_zero_weight_or_price() {
    let state = test_state().await;
    let token = logged_in(&state, "0799999990").await;
    let app = build_router(state);

    let zero_weight = [
        ("name", "Gadget"),
        ("image_url", "/static/images/gadget.png"),
        ("weight", "0"),
        ("price", "10"),
        ("promotional_price", "8"),
    ];
    let (status, body) = send(&app, multipart_request(&token, &zero_weight)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing some required parameters");

    let zero_price = [
        ("name", "Gadget"),
        ("image_url", "/static/images/gadget.png"),
        ("weight", "1"),
        ("price", "0"),
        ("promotional_price", "0"),
    ];
    let (status, body) = send(&app, multipart_request(&token, &zero_price)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing some required parameters");

    let (_, products) = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
    assert_eq!(products, json!([]));
}
