//! Authentication API handlers.
//!
//! ```text
//! POST /signup {"username":"ada","password":"pw","bio":"..."}
//! POST /login {"username":"ada","password":"pw"}
//! DELETE /logout
//! GET /check_session
//! ```
//!
//! Each handler owns its wire contract: Signup folds every failure into a
//! single 422 `{"error": msg}`, Login distinguishes 400 from 401, and the
//! session-guarded handlers each return their own 401 message.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SignupRequest, UserDirectory};
use crate::domain::{Error, LoginCredentials, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupBody {
    /// Requested unique login name.
    pub username: String,
    /// Plaintext password; digested before storage.
    pub password: String,
    /// Optional profile image URL.
    pub image_url: Option<String>,
    /// Optional short biography.
    pub bio: Option<String>,
}

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// Public profile payload returned by signup, login, and session checks.
///
/// The password digest is never serialized; absent optionals serialize as
/// explicit `null`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileBody {
    /// Stable user identifier.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Profile image URL, or `null`.
    pub image_url: Option<String>,
    /// Short biography, or `null`.
    pub bio: Option<String>,
}

impl From<&User> for ProfileBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            image_url: user.image_url().map(ToOwned::to_owned),
            bio: user.bio().map(ToOwned::to_owned),
        }
    }
}

const LOGIN_REQUIRED_MESSAGE: &str = "Username and password are required";
const LOGIN_REJECTED_MESSAGE: &str = "Invalid username or password";

/// Register a new user and establish a session.
///
/// Every client-side failure shares the 422 status: malformed bodies,
/// validation failures, and username conflicts all answer with a single
/// `{"error": msg}` body.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "User created", body = ProfileBody, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 422, description = "Invalid or conflicting signup data", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<SignupBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let body = payload
        .map_err(|error| Error::unprocessable(error.to_string()))?
        .into_inner();
    let user = state
        .directory
        .signup(SignupRequest {
            username: body.username,
            password: body.password,
            image_url: body.image_url,
            bio: body.bio,
        })
        .await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(ProfileBody::from(&user)))
}

/// Authenticate a user and bind the session to their identity.
///
/// Re-login overwrites any previously bound identity. Lookup and password
/// failures share one message so the response does not reveal whether the
/// username exists.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = ProfileBody, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing username or password", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<LoginBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let body = payload
        .map_err(|_| Error::invalid_request(LOGIN_REQUIRED_MESSAGE))?
        .into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.username, &body.password)
        .map_err(|_| Error::invalid_request(LOGIN_REQUIRED_MESSAGE))?;

    let user = authenticate(state.directory.as_ref(), &credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(ProfileBody::from(&user)))
}

/// Resolve credentials to a user, verifying the password digest.
async fn authenticate(
    directory: &dyn UserDirectory,
    credentials: &LoginCredentials,
) -> Result<User, Error> {
    let user = directory
        .find_by_username(credentials.username())
        .await?
        .ok_or_else(|| Error::unauthorized(LOGIN_REJECTED_MESSAGE))?;
    if !user.verify_password(credentials.password()) {
        return Err(Error::unauthorized(LOGIN_REJECTED_MESSAGE));
    }
    Ok(user)
}

/// Clear the session's identity slot.
#[utoipa::path(
    delete,
    path = "/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "No active session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[delete("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session
        .user_id()?
        .ok_or_else(|| Error::unauthorized("Unauthorized: No active session"))?;
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// Return the profile bound to the current session.
///
/// A bound identity that no longer resolves to a user answers with the same
/// 401 body as an anonymous request.
#[utoipa::path(
    get,
    path = "/check_session",
    responses(
        (status = 200, description = "Active session", body = ProfileBody),
        (status = 401, description = "No active session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "checkSession"
)]
#[get("/check_session")]
pub async fn check_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let not_authorized = || Error::unauthorized("401 Not authorized");
    let user_id = session.user_id()?.ok_or_else(not_authorized)?;
    let user = state
        .directory
        .find_by_id(&user_id)
        .await?
        .ok_or_else(not_authorized)?;
    Ok(HttpResponse::Ok().json(ProfileBody::from(&user)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(signup)
            .service(login)
            .service(logout)
            .service(check_session)
    }

    fn signup_body(username: &str) -> Value {
        json!({
            "username": username,
            "password": "secret",
            "image_url": null,
            "bio": "makes pasta"
        })
    }

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> Option<actix_web::cookie::Cookie<'static>> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(actix_web::cookie::Cookie::into_owned)
    }

    async fn body_json(res: actix_web::dev::ServiceResponse) -> Value {
        let bytes = actix_test::read_body(res).await;
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[actix_web::test]
    async fn signup_creates_a_user_and_binds_the_session() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(signup_body("ada"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = session_cookie(&res).expect("session cookie set");
        let profile = body_json(res).await;
        assert_eq!(profile.get("username"), Some(&json!("ada")));
        assert_eq!(profile.get("image_url"), Some(&Value::Null));
        assert_eq!(profile.get("bio"), Some(&json!("makes pasta")));
        assert!(profile.get("password").is_none());
        assert!(profile.get("password_digest").is_none());

        let check = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/check_session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(check.status(), StatusCode::OK);
        let checked = body_json(check).await;
        assert_eq!(checked.get("id"), profile.get("id"));
    }

    #[actix_web::test]
    async fn duplicate_username_is_unprocessable() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(signup_body("ada"))
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(signup_body("ada"))
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(second).await,
            json!({ "error": "Username must be unique" })
        );
    }

    #[rstest]
    #[case(json!({ "username": "", "password": "pw" }), "Username must be present")]
    #[actix_web::test]
    async fn signup_validation_failures_use_a_single_error_body(
        #[case] body: Value,
        #[case] expected: &str,
    ) {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(res).await, json!({ "error": expected }));
    }

    #[actix_web::test]
    async fn malformed_signup_body_is_unprocessable() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(res).await;
        assert!(body.get("error").is_some());
    }

    #[actix_web::test]
    async fn signup_accepts_an_empty_password() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(json!({ "username": "ada", "password": "" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn login_round_trips_through_check_session() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state)).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(signup_body("ada"))
                .to_request(),
        )
        .await;
        let profile = body_json(created).await;

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "ada", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = session_cookie(&login_res).expect("session cookie set");
        assert_eq!(body_json(login_res).await.get("id"), profile.get("id"));

        let check = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/check_session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(check.status(), StatusCode::OK);
        assert_eq!(body_json(check).await.get("id"), profile.get("id"));
    }

    #[actix_web::test]
    async fn wrong_password_is_rejected_without_binding_the_session() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(signup_body("ada"))
                .to_request(),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "ada", "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            session_cookie(&res),
            None,
            "failed login must not bind an identity"
        );
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Invalid username or password" })
        );
    }

    #[actix_web::test]
    async fn unknown_username_shares_the_rejection_message() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "nobody", "password": "pw" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Invalid username or password" })
        );
    }

    #[rstest]
    #[case(json!({ "username": "", "password": "pw" }))]
    #[case(json!({ "username": "ada", "password": "" }))]
    #[case(json!({ "username": "ada" }))]
    #[actix_web::test]
    async fn login_requires_both_fields(#[case] body: Value) {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Username and password are required" })
        );
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(signup_body("ada"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&created).expect("session cookie set");

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&logout_res).expect("updated session cookie");

        let check = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/check_session")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(check.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(check).await,
            json!({ "error": "401 Not authorized" })
        );
    }

    #[actix_web::test]
    async fn logout_without_a_session_is_unauthorized() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Unauthorized: No active session" })
        );
    }

    #[actix_web::test]
    async fn anonymous_check_session_is_unauthorized() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/check_session")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "401 Not authorized" })
        );
    }
}
