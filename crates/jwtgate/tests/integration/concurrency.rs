//! Many requests through one shared layer.

use http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{bearer_request, read_response, sign, TestApp};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_isolated() {
    let app = TestApp::new();

    let mut handles = Vec::new();
    for i in 0..32 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            let value = if i % 2 == 0 {
                format!("Bearer {}", sign(json!({ "sub": format!("user-{i}") })))
            } else {
                "Bearer garbage".to_string()
            };
            let resp = router.oneshot(bearer_request(&value)).await.unwrap();
            (i, read_response(resp).await)
        }));
    }

    for handle in handles {
        let (i, (status, body)) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["sub"], format!("user-{i}"));
        } else {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }
    assert_eq!(app.calls(), 16);
}
