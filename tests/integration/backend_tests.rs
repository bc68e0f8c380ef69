//! Backend client integration tests
//!
//! Runs the HTTP client and role source against a wiremock server.

#[cfg(test)]
mod tests {
    use crate::common::backend_config;
    use crate::common::fixtures::principal;
    use library_access::backend::BackendClient;
    use library_access::config::BackendConfig;
    use library_access::{AccessError, BackendRoleSource, RemoteCall, RoleSource};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ROLES_PATH: &str = "/api/method/library_app.api.get_current_user_roles";

    async fn role_source(server: &MockServer) -> BackendRoleSource {
        let config = backend_config(&server.uri());
        let client = BackendClient::new(&config).expect("client should build");
        BackendRoleSource::from_config(Arc::new(client), &config)
    }

    // ==================== Remote calls ====================

    /// Test that the client posts JSON with token credentials and unwraps the envelope
    #[tokio::test]
    async fn test_call_unwraps_message_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/method/library_app.api.get_book"))
            .and(header("authorization", "token test-key:test-secret"))
            .and(body_json(json!({ "name": "HP-001" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": { "title": "Dune" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(&backend_config(&server.uri())).unwrap();
        let message = client
            .call("library_app.api.get_book", json!({ "name": "HP-001" }))
            .await
            .unwrap();
        assert_eq!(message, json!({ "title": "Dune" }));
    }

    /// Test that a session id is sent as the sid cookie
    #[tokio::test]
    async fn test_call_sends_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("cookie", "sid=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let config = BackendConfig {
            base_url: server.uri(),
            session_id: Some("abc123".to_string()),
            ..BackendConfig::default()
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.call("ping", json!({})).await.unwrap(), json!("ok"));
    }

    /// Test that a missing message field yields null
    #[tokio::test]
    async fn test_call_without_message_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = BackendClient::new(&backend_config(&server.uri())).unwrap();
        assert!(client.call("noop", json!({})).await.unwrap().is_null());
    }

    /// Test that error bodies become remote errors with the backend's message
    #[tokio::test]
    async fn test_call_error_status_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "exc_type": "PermissionError",
                "exception": "frappe.exceptions.PermissionError: Not permitted"
            })))
            .mount(&server)
            .await;

        let client = BackendClient::new(&backend_config(&server.uri())).unwrap();
        match client.call("library_app.api.delete_book", json!({})).await {
            Err(AccessError::Remote { endpoint, message }) => {
                assert_eq!(endpoint, "library_app.api.delete_book");
                assert_eq!(message, "frappe.exceptions.PermissionError: Not permitted");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    /// Test that an error without a body falls back to the status text
    #[tokio::test]
    async fn test_call_error_without_body_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = BackendClient::new(&backend_config(&server.uri())).unwrap();
        let err = client.call("broken", json!({})).await.unwrap_err();
        assert_eq!(err.user_message(), "Internal Server Error");
        assert!(!err.is_transport());
    }

    /// Test that a slow backend surfaces as a timeout
    #[tokio::test]
    async fn test_call_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": {} }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = BackendClient::new(&backend_config(&server.uri())).unwrap();
        let err = client.call("slow", json!({})).await.unwrap_err();
        assert!(matches!(err, AccessError::Timeout(_)), "got {:?}", err);
        assert!(err.is_transport());
    }

    // ==================== Role source ====================

    /// Test fetching roles through the configured endpoint
    #[tokio::test]
    async fn test_fetch_roles() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ROLES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "roles": ["Librarian", "Library Member"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let roles = role_source(&server)
            .await
            .fetch_roles(&principal("lib@example.org"))
            .await
            .unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.contains("Librarian"));
        assert!(roles.contains("Library Member"));
    }

    /// Test that an in-body error degrades to zero roles
    #[tokio::test]
    async fn test_fetch_roles_in_body_error_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ROLES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "error": "User not found", "roles": [] }
            })))
            .mount(&server)
            .await;

        let roles = role_source(&server)
            .await
            .fetch_roles(&principal("ghost@example.org"))
            .await
            .unwrap();
        assert!(roles.is_empty());
    }

    /// Test that a non-JSON body degrades to zero roles
    #[tokio::test]
    async fn test_fetch_roles_malformed_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ROLES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let roles = role_source(&server)
            .await
            .fetch_roles(&principal("a@example.org"))
            .await
            .unwrap();
        assert!(roles.is_empty());
    }

    /// Test that transport failures are propagated, not swallowed
    #[tokio::test]
    async fn test_fetch_roles_network_failure() {
        // Nothing listens on this port once the server is dropped
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let config = backend_config(&uri);
        let client = BackendClient::new(&config).unwrap();
        let source = BackendRoleSource::from_config(Arc::new(client), &config);

        let err = source
            .fetch_roles(&principal("a@example.org"))
            .await
            .unwrap_err();
        assert!(err.is_transport(), "got {:?}", err);
    }
}
