//! Cross-crate integration flows.

pub mod flows;
pub mod rpc_node;

#[cfg(test)]
pub(crate) mod support {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Send a GET through the router and decode the JSON body.
    pub async fn get(router: &Router, uri: &str, principal: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(principal) = principal {
            request = request.header(lf_04_api_gateway::routes::PRINCIPAL_HEADER, principal);
        }
        let response = router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub fn hashes_of(body: &Value) -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|r| r["hash"].as_str().unwrap().to_string())
            .collect()
    }
}
