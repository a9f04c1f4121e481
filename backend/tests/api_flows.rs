//! End-to-end HTTP flows over the full handler wiring.
//!
//! Exercises signup, login, session checks, logout, and recipe management
//! through the same routes and session middleware the server mounts, backed
//! by in-memory repositories.

use actix_http::Request;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::inbound::http::auth::{check_session, login, logout, signup};
use backend::inbound::http::recipes::{create_recipe, list_recipes};
use backend::inbound::http::state::HttpState;
use backend::Trace;

const FIFTY_CHARS: usize = 50;

async fn spawn_app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build();

    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::in_memory()))
            .wrap(Trace)
            .service(
                web::scope("")
                    .wrap(session)
                    .service(signup)
                    .service(login)
                    .service(logout)
                    .service(check_session)
                    .service(list_recipes)
                    .service(create_recipe),
            ),
    )
    .await
}

fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn body_json(res: ServiceResponse) -> Value {
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("json body")
}

async fn signup_user<S>(app: &S, username: &str) -> (Cookie<'static>, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({
                "username": username,
                "password": "secret",
                "bio": "home cook"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = session_cookie(&res).expect("session cookie set");
    let profile = body_json(res).await;
    (cookie, profile)
}

#[actix_web::test]
async fn duplicate_signup_creates_no_second_record() {
    let app = spawn_app().await;
    let (cookie, _) = signup_user(&app, "ada").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "username": "ada", "password": "other" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(res).await, json!({ "error": "Username must be unique" }));

    // The original account still logs in with its original password.
    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "ada", "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    drop(cookie);
}

#[actix_web::test]
async fn empty_username_signup_is_rejected() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "username": "", "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(res).await, json!({ "error": "Username must be present" }));

    // The rejected signup left no account behind to authenticate.
    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": " ", "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn login_binds_the_session_to_the_same_profile() {
    let app = spawn_app().await;
    let (_, profile) = signup_user(&app, "ada").await;

    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "ada", "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = session_cookie(&login_res).expect("session cookie set");

    let check = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/check_session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(check.status(), StatusCode::OK);
    assert_eq!(body_json(check).await, profile);
}

#[actix_web::test]
async fn wrong_password_leaves_the_session_unbound() {
    let app = spawn_app().await;
    signup_user(&app, "ada").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "ada", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
    assert_eq!(
        body_json(res).await,
        json!({ "error": "Invalid username or password" })
    );

    let check = test::call_service(
        &app,
        test::TestRequest::get().uri("/check_session").to_request(),
    )
    .await;
    assert_eq!(check.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_immediately_invalidates_the_session() {
    let app = spawn_app().await;
    let (cookie, _) = signup_user(&app, "ada").await;

    let logout_res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&logout_res).expect("updated session cookie");

    let check = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/check_session")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(check.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(check).await, json!({ "error": "401 Not authorized" }));
}

#[actix_web::test]
async fn instructions_length_boundary_is_exact() {
    let app = spawn_app().await;
    let (cookie, _) = signup_user(&app, "ada").await;

    let short = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/recipes")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Toast",
                "instructions": "x".repeat(FIFTY_CHARS - 1)
            }))
            .to_request(),
    )
    .await;
    assert_eq!(short.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(short).await,
        json!({ "errors": ["Instructions should be atleast 50 characters long."] })
    );

    let exact = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/recipes")
            .cookie(cookie)
            .set_json(json!({
                "title": "Toast",
                "instructions": "x".repeat(FIFTY_CHARS)
            }))
            .to_request(),
    )
    .await;
    assert_eq!(exact.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn empty_recipe_list_is_a_valid_response() {
    let app = spawn_app().await;
    let (cookie, _) = signup_user(&app, "ada").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recipes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!([]));
}

#[actix_web::test]
async fn signup_create_list_round_trip() {
    let app = spawn_app().await;
    let (cookie, profile) = signup_user(&app, "ada").await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/recipes")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Carbonara",
                "instructions": "x".repeat(FIFTY_CHARS),
                "minutes_to_complete": 25
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let recipe = body_json(created).await;
    assert_eq!(recipe.get("title"), Some(&json!("Carbonara")));
    assert_eq!(recipe.get("user_id"), profile.get("id"));
    assert!(recipe.get("user").is_none());

    let listed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recipes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(body_json(listed).await, json!([recipe]));
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/check_session").to_request(),
    )
    .await;
    assert!(res.headers().contains_key("trace-id"));
}
