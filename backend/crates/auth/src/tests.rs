//! Scenario and HTTP tests for the auth crate
//!
//! Repositories are replaced with an in-memory fake; routers are driven
//! with `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use kernel::id::UserId;

    use crate::domain::entity::user::User;
    use crate::domain::repository::{RegisterOutcome, UserRepository};
    use crate::domain::value_object::{
        user_name::UserName, user_password::UserPassword, user_role::UserRole,
    };
    use crate::error::AuthResult;

    /// Mirrors the stored functions: sequential ids, exact-match names
    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl InMemoryUserRepository {
        pub fn count(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn get(&self, name: &str) -> Option<User> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.user_name.as_str() == name)
                .cloned()
        }

        fn next_id(users: &[User]) -> UserId {
            UserId::new(users.len() as i64 + 1)
        }
    }

    impl UserRepository for InMemoryUserRepository {
        async fn register(
            &self,
            user_name: &UserName,
            password_hash: &UserPassword,
        ) -> AuthResult<RegisterOutcome> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| &u.user_name == user_name) {
                return Ok(RegisterOutcome::UserNameTaken);
            }

            let user = User {
                user_id: Self::next_id(&users),
                user_name: user_name.clone(),
                password_hash: password_hash.clone(),
                user_role: UserRole::default(),
            };
            users.push(user.clone());
            Ok(RegisterOutcome::Created(user))
        }

        async fn upsert_admin(
            &self,
            user_name: &UserName,
            password_hash: &UserPassword,
        ) -> AuthResult<User> {
            let mut users = self.users.lock().unwrap();
            if let Some(existing) = users.iter_mut().find(|u| &u.user_name == user_name) {
                existing.user_role = UserRole::Admin;
                existing.password_hash = password_hash.clone();
                return Ok(existing.clone());
            }

            let user = User {
                user_id: Self::next_id(&users),
                user_name: user_name.clone(),
                password_hash: password_hash.clone(),
                user_role: UserRole::Admin,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| &u.user_name == user_name)
                .cloned())
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use chrono::Utc;
    use kernel::id::UserId;

    use super::support::InMemoryUserRepository;
    use crate::application::{
        AuthConfig, AuthenticateInput, AuthenticateOutput, AuthenticateUseCase, CreateAdminInput,
        CreateAdminUseCase, RegisterInput, RegisterUseCase, TokenCodec,
    };
    use crate::domain::User;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        config: Arc<AuthConfig>,
        codec: Arc<TokenCodec>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = Arc::new(AuthConfig::with_random_secret());
            Self {
                repo: Arc::new(InMemoryUserRepository::default()),
                codec: Arc::new(TokenCodec::new(&config)),
                config,
            }
        }

        async fn register(&self, user_name: &str, password: &str) -> Result<User, AuthError> {
            RegisterUseCase::new(self.repo.clone(), self.config.clone())
                .execute(RegisterInput {
                    user_name: user_name.to_string(),
                    password: password.to_string(),
                })
                .await
        }

        async fn login(
            &self,
            user_name: &str,
            password: &str,
        ) -> Result<AuthenticateOutput, AuthError> {
            AuthenticateUseCase::new(self.repo.clone(), self.config.clone(), self.codec.clone())
                .execute(AuthenticateInput {
                    user_name: user_name.to_string(),
                    password: password.to_string(),
                })
                .await
        }

        async fn create_admin(&self, user_name: &str, password: &str) -> Result<User, AuthError> {
            CreateAdminUseCase::new(self.repo.clone(), self.config.clone())
                .execute(CreateAdminInput {
                    user_name: user_name.to_string(),
                    password: password.to_string(),
                })
                .await
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let fx = Fixture::new();

        let user = fx.register("alice", "secret1").await.unwrap();
        assert_eq!(user.user_id, UserId::new(1));
        assert_eq!(user.user_role, UserRole::Supplier);

        let before = Utc::now().timestamp();
        let output = fx.login("alice", "secret1").await.unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(output.role, UserRole::Supplier);
        assert_eq!(output.user_name, "alice");
        let exp = output.expires_at.timestamp();
        assert!(exp >= before + 3 * 3600 && exp <= after + 3 * 3600);

        let principal = fx.codec.validate(&output.token).unwrap();
        assert_eq!(principal.user_id, UserId::new(1));
        assert_eq!(principal.role, UserRole::Supplier);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let fx = Fixture::new();

        assert!(fx.register("alice", "secret1").await.is_ok());
        let second = fx.register("alice", "another1").await;

        assert!(matches!(second, Err(AuthError::UserNameTaken)));
        assert_eq!(fx.repo.count(), 1);
    }

    #[tokio::test]
    async fn test_registration_validation() {
        let fx = Fixture::new();

        assert!(matches!(
            fx.register("al", "secret1").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            fx.register("alice", "12345").await,
            Err(AuthError::Validation(_))
        ));
        assert_eq!(fx.repo.count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let fx = Fixture::new();
        fx.register("alice", "secret1").await.unwrap();

        let wrong_password = fx.login("alice", "wrong-password").await;
        let unknown_user = fx.login("mallory", "secret1").await;
        let malformed = fx.login("", "").await;

        for result in [wrong_password, unknown_user, malformed] {
            let err = result.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "Invalid credentials.");
        }
    }

    #[tokio::test]
    async fn test_create_admin_is_idempotent() {
        let fx = Fixture::new();

        let first = fx.create_admin("root", "pw").await.unwrap();
        let second = fx.create_admin("root", "pw").await.unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert_eq!(fx.repo.count(), 1);
        assert_eq!(fx.repo.get("root").unwrap().user_role, UserRole::Admin);

        let output = fx.login("root", "pw").await.unwrap();
        assert_eq!(output.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_create_admin_promotes_and_rehashes() {
        let fx = Fixture::new();
        fx.register("bob_supplier", "secret1").await.unwrap();

        let promoted = fx.create_admin("bob_supplier", "new-secret").await.unwrap();

        assert_eq!(promoted.user_role, UserRole::Admin);
        assert_eq!(fx.repo.count(), 1);
        assert!(fx.login("bob_supplier", "secret1").await.is_err());
        assert!(fx.login("bob_supplier", "new-secret").await.is_ok());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::InMemoryUserRepository;
    use crate::application::{AuthConfig, TokenCodec};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use crate::presentation::router::auth_router_generic;

    struct App {
        router: Router,
        repo: InMemoryUserRepository,
    }

    fn app() -> App {
        let config = Arc::new(AuthConfig::with_random_secret());
        let codec = Arc::new(TokenCodec::new(&config));
        let repo = InMemoryUserRepository::default();
        App {
            router: auth_router_generic(repo.clone(), config, codec),
            repo,
        }
    }

    fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn login_token(app: &App, username: &str, password: &str) -> String {
        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/login",
                json!({ "username": username, "password": password }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_and_login_over_http() {
        let app = app();

        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/register",
                json!({ "username": "alice", "password": "secret1" }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "userID": 1, "username": "alice", "role": "Supplier" })
        );

        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/login",
                json!({ "username": "alice", "password": "secret1" }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "Supplier");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_duplicate_register_is_bad_request() {
        let app = app();
        let req = || {
            json_request(
                Method::POST,
                "/register",
                json!({ "username": "alice", "password": "secret1" }),
                None,
            )
        };

        send(&app.router, req()).await;
        let (status, body) = send(&app.router, req()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "statusCode": 400, "message": "Username already exists." })
        );
        assert_eq!(app.repo.count(), 1);
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let app = app();
        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/login",
                json!({ "username": "nobody", "password": "secret1" }),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({ "statusCode": 401, "message": "Invalid credentials." })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app.router, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_guarded_route_without_token_is_unauthorized() {
        let app = app();

        for (method, uri) in [(Method::GET, "/me"), (Method::POST, "/create-admin")] {
            let (status, body) =
                send(&app.router, json_request(method, uri, json!({}), None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(
                body,
                json!({
                    "statusCode": 401,
                    "message": "You need to log in to access this resource."
                })
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized_not_forbidden() {
        let app = app();
        let (status, _) = send(
            &app.router,
            json_request(Method::GET, "/me", json!({}), Some("not.a.token")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_supplier_cannot_create_admin() {
        let app = app();
        send(
            &app.router,
            json_request(
                Method::POST,
                "/register",
                json!({ "username": "alice", "password": "secret1" }),
                None,
            ),
        )
        .await;
        let token = login_token(&app, "alice", "secret1").await;

        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/create-admin",
                json!({ "username": "eve", "password": "pw" }),
                Some(&token),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({
                "statusCode": 403,
                "message": "Access Denied. This resource requires the following role(s): 'Admin'."
            })
        );
        assert!(app.repo.get("eve").is_none());
    }

    #[tokio::test]
    async fn test_admin_can_create_admin_and_read_me() {
        let app = app();

        // seed an admin directly through the fake
        let hash = UserPassword::from_raw(&RawPassword::new("pw".to_string()).unwrap(), None)
            .unwrap();
        app.repo
            .upsert_admin(&UserName::new("root").unwrap(), &hash)
            .await
            .unwrap();

        let token = login_token(&app, "root", "pw").await;

        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/create-admin",
                json!({ "username": "ops", "password": "pw" }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "Admin user 'ops' created/updated successfully." })
        );

        let (status, body) = send(
            &app.router,
            json_request(Method::GET, "/me", json!({}), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "userId": 1, "username": "root", "role": "Admin" })
        );
    }
}
