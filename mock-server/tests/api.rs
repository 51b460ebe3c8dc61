use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Item, ItemList, BIG_NAME_LEN, RAW_BODY};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- items ---

#[tokio::test]
async fn list_items_empty() {
    let resp = app().oneshot(empty_get("/items?limit=10")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], br#"{"items":[]}"#);
}

#[tokio::test]
async fn create_item_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(
        item,
        Item {
            id: 1,
            name: "x".to_string()
        }
    );
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_item_not_found() {
    let resp = app().oneshot(empty_get("/items/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_respects_limit() {
    use tower::Service;

    let mut app = app().into_service();
    for name in ["a", "b", "c"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/items", &format!(r#"{{"name":"{name}"}}"#)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_get("/items?limit=2"))
        .await
        .unwrap();
    let list: ItemList = body_json(resp).await;
    let names: Vec<_> = list.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_get("/items/3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let item: Item = body_json(resp).await;
    assert_eq!(item.name, "c");
}

// --- echo ---

#[tokio::test]
async fn echo_reports_headers_query_and_body() {
    let req = Request::builder()
        .method("POST")
        .uri("/echo?b=2&a=1")
        .header("x-trace", "one")
        .header("x-trace", "two")
        .body(r#"{"k":"v"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.query.get("a").map(String::as_str), Some("1"));
    assert_eq!(echo.query.get("b").map(String::as_str), Some("2"));
    let traces: Vec<_> = echo
        .headers
        .iter()
        .filter(|(name, _)| name == "x-trace")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(traces, ["one", "two"]);
    assert_eq!(echo.body, r#"{"k":"v"}"#);
}

// --- misc ---

#[tokio::test]
async fn text_is_not_json() {
    let resp = app().oneshot(empty_get("/text")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

#[tokio::test]
async fn slow_returns_empty_list() {
    let resp = app().oneshot(empty_get("/slow?ms=5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: ItemList = body_json(resp).await;
    assert!(list.items.is_empty());
}

#[tokio::test]
async fn raw_serves_latin1_under_the_requested_status() {
    let resp = app().oneshot(empty_get("/raw?status=500")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], RAW_BODY);
}

#[tokio::test]
async fn raw_accepts_statuses_without_a_reason_phrase() {
    let resp = app().oneshot(empty_get("/raw?status=499")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 499);

    let resp = app().oneshot(empty_get("/raw?status=1000")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn big_returns_count_items() {
    let resp = app().oneshot(empty_get("/big?count=3&status=503")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let list: ItemList = body_json(resp).await;
    let ids: Vec<_> = list.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert!(list.items.iter().all(|item| item.name.len() == BIG_NAME_LEN));
}
