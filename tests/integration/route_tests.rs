//! Route table integration tests

#[cfg(test)]
mod tests {
    use crate::common::{StaticRoleSource, principal, resolver};
    use library_access::config::{AccessConfig, DenialMode};
    use library_access::{
        AuthState, DenialReason, GateOutcome, PrincipalId, RoleState, RouteTable,
    };
    use std::sync::Arc;

    fn table() -> RouteTable {
        RouteTable::library(&AccessConfig::default()).expect("library routes should parse")
    }

    async fn roles_for(id: &str, names: &[&str]) -> (AuthState, RoleState) {
        let source = Arc::new(StaticRoleSource::new().with_roles(id, names));
        let auth = AuthState::signed_in(principal(id));
        let state = resolver(source).sync(&auth).await;
        (auth, state)
    }

    /// Test that the login page is reachable while signed out
    #[test]
    fn test_login_is_public() {
        let decision = table().evaluate("/login", &AuthState::signed_out(), &RoleState::idle());
        assert_eq!(decision.outcome, GateOutcome::Content);
    }

    /// Test that protected routes send signed-out visitors to login
    #[test]
    fn test_signed_out_redirects_to_login() {
        let decision = table().evaluate("/books", &AuthState::signed_out(), &RoleState::idle());
        let redirect = decision.outcome.redirect().expect("expected redirect");
        assert_eq!(redirect.to, "/login");
        assert_eq!(redirect.reason, Some(DenialReason::Unauthenticated));
    }

    /// Test that nothing renders while auth is still settling
    #[test]
    fn test_auth_loading_renders_loading() {
        let decision = table().evaluate("/books", &AuthState::loading(), &RoleState::idle());
        assert_eq!(decision.outcome, GateOutcome::Loading);
    }

    /// Test that unknown paths redirect to login
    #[test]
    fn test_unknown_route() {
        let decision = table().evaluate("/nowhere", &AuthState::signed_out(), &RoleState::idle());
        assert!(decision.matched.is_none());
        assert_eq!(
            decision.outcome.redirect().and_then(|r| r.reason.clone()),
            Some(DenialReason::UnknownRoute)
        );
    }

    /// Test that roles resolved for another principal are not trusted
    #[test]
    fn test_role_state_for_other_principal_is_loading() {
        let auth = AuthState::signed_in(principal("b@example.org"));
        let stale = RoleState::loading(PrincipalId::new("a@example.org"));
        let decision = table().evaluate("/books", &auth, &stale);
        assert_eq!(decision.outcome, GateOutcome::Loading);

        let decision = table().evaluate("/books", &auth, &RoleState::idle());
        assert_eq!(decision.outcome, GateOutcome::Loading);
    }

    /// Test the member's view of the route table
    #[tokio::test]
    async fn test_member_routes() {
        let (auth, state) = roles_for("m@example.org", &["Library Member"]).await;
        let routes = table();

        for path in ["/", "/books", "/reservations", "/my-loans", "/my-reservations"] {
            assert!(
                routes.evaluate(path, &auth, &state).outcome.is_content(),
                "member should open {}",
                path
            );
        }
        for path in ["/books/new", "/members", "/loans/new", "/create-test-users"] {
            let outcome = routes.evaluate(path, &auth, &state).outcome;
            assert_eq!(
                outcome.redirect().map(|r| r.to.as_str()),
                Some("/"),
                "member should be sent home from {}",
                path
            );
        }
    }

    /// Test that librarians open management routes with parameters
    #[tokio::test]
    async fn test_librarian_edit_route() {
        let (auth, state) = roles_for("lib@example.org", &["Librarian"]).await;
        let decision = table().evaluate("/members/edit/MEM-0001", &auth, &state);

        assert!(decision.outcome.is_content());
        let matched = decision.matched.expect("route should match");
        assert_eq!(matched.pattern(), "/members/edit/:name");
        assert_eq!(matched.param("name"), Some("MEM-0001"));
    }

    /// Test that only admins open the test-user tool
    #[tokio::test]
    async fn test_admin_route() {
        let (auth, state) = roles_for("lib@example.org", &["Librarian"]).await;
        let outcome = table().evaluate("/create-test-users", &auth, &state).outcome;
        assert_eq!(
            outcome.redirect().and_then(|r| r.reason.clone()),
            Some(DenialReason::NotAdmin)
        );

        let (auth, state) = roles_for("root@example.org", &["System Manager"]).await;
        assert!(
            table()
                .evaluate("/create-test-users", &auth, &state)
                .outcome
                .is_content()
        );
    }

    /// Test that configured fallback and forbidden mode apply to every route
    #[tokio::test]
    async fn test_configured_denial() {
        let config = AccessConfig {
            fallback_path: "/books".to_string(),
            denial_mode: DenialMode::Forbidden,
            fallback_message: "Librarians only".to_string(),
            ..AccessConfig::default()
        };
        let routes = RouteTable::library(&config).unwrap();
        let (auth, state) = roles_for("m@example.org", &["Library Member"]).await;

        match routes.evaluate("/loans", &auth, &state).outcome {
            GateOutcome::Forbidden { message, reason } => {
                assert_eq!(message, "Librarians only");
                assert_eq!(reason, DenialReason::NotLibrarian);
            }
            other => panic!("expected forbidden, got {:?}", other),
        }
    }

    /// Test that a failed resolution shows the error with the fallback
    #[test]
    fn test_failed_resolution() {
        let auth = AuthState::signed_in(principal("a@example.org"));
        let failed = RoleState::failed(PrincipalId::new("a@example.org"), "network timeout");

        match table().evaluate("/", &auth, &failed).outcome {
            GateOutcome::Error { message, fallback } => {
                assert_eq!(message, "network timeout");
                assert_eq!(fallback.to, "/");
            }
            other => panic!("expected error, got {:?}", other),
        }
    }
}
