//! Session and resolver integration tests
//!
//! Drives sign-in, role resolution and sign-out through the public API.

#[cfg(test)]
mod tests {
    use crate::common::{FailingRoleSource, StaticRoleSource, backend_config, principal, resolver};
    use library_access::{
        AuthState, BackendClient, BackendRoleSource, CapabilityTable, GateOutcome,
        NavigationFilter, RoleResolver, RoleState, RouteGate, Session,
    };
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Test that a session resolves roles once at sign-in
    #[tokio::test]
    async fn test_session_start_resolves_roles() {
        let source =
            Arc::new(StaticRoleSource::new().with_roles("lib@example.org", &["Librarian"]));
        let session = Session::start(principal("lib@example.org"), resolver(source.clone())).await;

        let state = session.roles();
        assert!(state.is_settled_ok());
        assert!(state.is_librarian());
        assert!(state.is_member());
        assert!(!state.is_admin());
        assert_eq!(source.calls(), 1);
        assert_eq!(session.principal().id.as_str(), "lib@example.org");
    }

    /// Test that ending a session returns the resolver to idle
    #[tokio::test]
    async fn test_session_end_resets_resolver() {
        let source =
            Arc::new(StaticRoleSource::new().with_roles("m@example.org", &["Library Member"]));
        let resolver = resolver(source);
        let session = Session::start(principal("m@example.org"), Arc::clone(&resolver)).await;
        assert!(session.roles().is_member());

        session.end();
        assert_eq!(resolver.current(), RoleState::idle());
    }

    /// Test that observers see the settled state
    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let source =
            Arc::new(StaticRoleSource::new().with_roles("a@example.org", &["System Manager"]));
        let resolver = resolver(source);
        let mut rx = resolver.subscribe();

        resolver
            .sync(&AuthState::signed_in(principal("a@example.org")))
            .await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_admin());
    }

    /// Test that refresh picks up a fresh answer
    #[tokio::test]
    async fn test_session_refresh() {
        let source = Arc::new(StaticRoleSource::new().with_roles("a@example.org", &["Librarian"]));
        let session = Session::start(principal("a@example.org"), resolver(source.clone())).await;

        let refreshed = session.refresh().await;
        assert!(refreshed.is_librarian());
        assert_eq!(source.calls(), 2);
    }

    /// Test that a failed fetch leaves the session fail-closed
    #[tokio::test]
    async fn test_failed_fetch_is_fail_closed() {
        let source = Arc::new(FailingRoleSource::new("network timeout"));
        let session = Session::start(principal("a@example.org"), resolver(source)).await;

        let state = session.roles();
        assert_eq!(state.error.as_deref(), Some("network timeout"));
        assert!(!state.is_loading);
        assert!(state.roles.is_empty());
        assert!(NavigationFilter::library().view(&state).is_empty());
        assert!(matches!(
            RouteGate::authenticated().evaluate(&state),
            GateOutcome::Error { .. }
        ));
    }

    /// Test that switching principals replaces the previous principal's roles
    #[tokio::test]
    async fn test_principal_switch() {
        let source = Arc::new(
            StaticRoleSource::new()
                .with_roles("admin@example.org", &["System Manager"])
                .with_roles("m@example.org", &["Library Member"]),
        );
        let resolver = resolver(source);

        let admin = resolver
            .sync(&AuthState::signed_in(principal("admin@example.org")))
            .await;
        assert!(admin.is_admin());

        let member = resolver
            .sync(&AuthState::signed_in(principal("m@example.org")))
            .await;
        assert!(!member.is_admin());
        assert!(member.is_member());
    }

    /// Test the full path from HTTP response to navigation menu
    #[tokio::test]
    async fn test_backend_roles_drive_navigation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "roles": ["Library Manager"] }
            })))
            .mount(&server)
            .await;

        let config = backend_config(&server.uri());
        let client = Arc::new(BackendClient::new(&config).unwrap());
        let source = Arc::new(BackendRoleSource::from_config(client, &config));
        let resolver = Arc::new(RoleResolver::new(source, CapabilityTable::default()));
        let session = Session::start(principal("mgr@example.org"), resolver).await;

        let view = NavigationFilter::library().view(&session.roles());
        let labels: Vec<_> = view.all().iter().map(|item| item.label).collect();
        assert!(labels.contains(&"Add Book"));
        assert!(labels.contains(&"My Loans"));
        assert!(!labels.contains(&"Create Test Users"));
    }
}
