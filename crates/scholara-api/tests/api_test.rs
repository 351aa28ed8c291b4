//! End-to-end HTTP tests: the full router over in-memory SurrealDB.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Local};
use http_body_util::BodyExt;
use scholara_api::{AppState, build_router};
use scholara_auth::{AuthConfig, AuthService, ProfileService};
use scholara_catalog::CatalogService;
use scholara_core::models::scholarship::{CreateScholarship, Eligibility};
use scholara_core::repository::{ScholarshipRepository, UserProfileRepository};
use scholara_db::repository::{SurrealScholarshipRepository, SurrealUserProfileRepository};
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    db: Surreal<Db>,
}

async fn setup() -> TestApp {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    scholara_db::run_migrations(&db).await.unwrap();

    let catalog = Arc::new(CatalogService::new(SurrealScholarshipRepository::new(
        db.clone(),
    )));
    let auth = AuthService::new(
        SurrealUserProfileRepository::new(db.clone()),
        AuthConfig::new("api-test-secret-api-test-secret-123"),
    );
    let profiles = ProfileService::new(
        SurrealUserProfileRepository::new(db.clone()),
        SurrealScholarshipRepository::new(db.clone()),
    );

    TestApp {
        router: build_router(AppState::new(catalog, auth, profiles)),
        db,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn seed(&self, title: &str, amount: &str, deadline_offset: Option<i64>) -> String {
        let deadline = deadline_offset
            .map(|days| (Local::now().date_naive() + Duration::days(days)).to_string());
        SurrealScholarshipRepository::new(self.db.clone())
            .create(CreateScholarship {
                title: Some(title.into()),
                amount: Some(amount.into()),
                eligibility: Some(Eligibility {
                    deadline_date: deadline,
                    eligibility_summary: Some(format!("{title} summary")),
                    criteria: vec!["Students from Kerala pursuing bachelor degrees".into()],
                }),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    async fn signup(&self, email: &str) -> Uuid {
        let (status, _) = self
            .post(
                "/api/user-profile/signup",
                json!({"name": "Asha", "email_id": email, "password": "s3cret-pass"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = self
            .post(
                "/api/user-profile/signin",
                json!({"email_id": email, "password": "s3cret-pass"}),
            )
            .await;
        body["userId"].as_str().unwrap().parse().unwrap()
    }
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn listing_returns_only_active_scholarships() {
    let app = setup().await;
    app.seed("A", "$100", Some(-1)).await;
    app.seed("B", "$200", Some(0)).await;
    app.seed("C", "$300", Some(10)).await;
    app.seed("D", "$400", None).await;

    let (status, body) = app.get("/api/scholarships").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["B", "C"]);
    assert!(body[0]["_id"].is_string());
}

#[tokio::test]
async fn listing_sorts_by_amount() {
    let app = setup().await;
    app.seed("small", "$500", Some(3)).await;
    app.seed("big", "$1,000", Some(3)).await;
    app.seed("none", "abc", Some(3)).await;

    let (_, body) = app
        .get("/api/scholarships?sortBy=amount&order=desc")
        .await;
    assert_eq!(titles(&body), ["big", "small", "none"]);

    let (_, body) = app.get("/api/scholarships?sortBy=amount").await;
    assert_eq!(titles(&body), ["small", "big", "none"]);
}

#[tokio::test]
async fn listing_rejects_unknown_education_level() {
    let app = setup().await;
    let (status, body) = app.get("/api/scholarships?education=Diploma").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Diploma"));
}

#[tokio::test]
async fn malformed_query_string_gets_json_error() {
    let app = setup().await;
    for uri in [
        "/api/scholarships?tags=a&tags=b",
        "/api/scholarships/search?query=x&query=y",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn listing_applies_criteria_filters() {
    let app = setup().await;
    app.seed("Kerala", "$1", Some(5)).await;

    let (_, body) = app
        .get("/api/scholarships?state=kerala&education=UG")
        .await;
    assert_eq!(titles(&body), ["Kerala"]);

    let (_, body) = app.get("/api/scholarships?state=Goa").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_and_hides_expired() {
    let app = setup().await;
    app.seed("Merit Award", "$100", Some(5)).await;
    app.seed("Merit Legacy", "$100", Some(-5)).await;
    app.seed("Sports Grant", "$100", Some(5)).await;

    let (status, body) = app.get("/api/scholarships/search?query=MERIT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Merit Award"]);

    let (_, body) = app.get("/api/scholarships/search?query=").await;
    assert_eq!(titles(&body), ["Merit Award", "Sports Grant"]);

    let (_, body) = app.get("/api/scholarships/search").await;
    assert_eq!(titles(&body), ["Merit Award", "Sports Grant"]);
}

#[tokio::test]
async fn detail_not_found_and_expired() {
    let app = setup().await;
    let active = app.seed("Live", "$1", Some(1)).await;
    let expired = app.seed("Old", "$1", Some(-1)).await;

    let (status, body) = app.get(&format!("/api/scholarships/{active}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Live");

    let (status, body) = app.get(&format!("/api/scholarships/{expired}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "This scholarship has expired");

    let (status, body) = app.get("/api/scholarships/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Scholarship not found");
}

#[tokio::test]
async fn tags_endpoint_lists_criteria_words() {
    let app = setup().await;
    app.seed("Kerala", "$1", Some(5)).await;

    let (status, body) = app.get("/api/scholarships/tags").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!(["bachelor", "degrees", "from", "kerala", "pursuing", "students"])
    );
}

#[tokio::test]
async fn cleanup_endpoint_reports_deleted_count() {
    let app = setup().await;
    app.seed("A", "$1", Some(-1)).await;
    app.seed("B", "$1", None).await;
    app.seed("C", "$1", Some(1)).await;

    let (status, body) = app
        .post("/api/scholarships/cleanup-expired", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Cleanup completed", "deletedCount": 2})
    );

    let (_, body) = app
        .post("/api/scholarships/cleanup-expired", json!({}))
        .await;
    assert_eq!(body["deletedCount"], 0);
}

#[tokio::test]
async fn signup_and_duplicate() {
    let app = setup().await;

    let (status, body) = app
        .post(
            "/api/user-profile/signup",
            json!({"name": "Asha", "email_id": "A@B.com", "password": "pw-123456"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");

    let (status, body) = app
        .post(
            "/api/user-profile/signup",
            json!({"name": "Other", "email_id": "a@b.com", "password": "pw-654321"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn signup_validates_and_rejects_bad_json() {
    let app = setup().await;

    let (status, _) = app
        .post("/api/user-profile/signup", json!({"email_id": "a@b.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Request::post("/api/user-profile/signup")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn signin_response_shape_and_failures() {
    let app = setup().await;
    app.post(
        "/api/user-profile/signup",
        json!({"name": "Asha", "email_id": "asha@example.com", "password": "pw-123456"}),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/user-profile/signin",
            json!({"email_id": "asha@example.com", "password": "pw-123456"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
    assert_eq!(body["user"]["name"], "Asha");
    assert_eq!(body["user"]["email_id"], "asha@example.com");
    assert_eq!(body["user"]["_id"], body["userId"]);
    assert!(body["user"].get("password_hash").is_none());

    let (status, wrong) = app
        .post(
            "/api/user-profile/signin",
            json!({"email_id": "asha@example.com", "password": "nope"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, unknown) = app
        .post(
            "/api/user-profile/signin",
            json!({"email_id": "ghost@example.com", "password": "nope"}),
        )
        .await;
    assert_eq!(wrong, json!({"message": "Invalid credentials"}));
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn signout_acknowledges() {
    let app = setup().await;
    let (status, body) = app.post("/api/user-profile/signout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Signed out successfully"}));
}

#[tokio::test]
async fn complete_profile_and_read_back() {
    let app = setup().await;
    let user_id = app.signup("asha@example.com").await;

    let (status, body) = app
        .post(
            "/api/user-profile/complete-profile",
            json!({
                "userId": user_id,
                "course": "B.Tech",
                "location": "Kerala",
                "categories": ["OBC"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["course"], "B.Tech");

    let (status, body) = app.get(&format!("/api/user-profile/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Kerala");
    assert_eq!(body["categories"], json!(["OBC"]));
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn unknown_or_malformed_user_ids() {
    let app = setup().await;
    let ghost = Uuid::new_v4();

    let (status, body) = app.get(&format!("/api/user-profile/{ghost}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = app
        .post(
            "/api/user-profile/complete-profile",
            json!({"userId": ghost, "course": "x"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = app.get("/api/user-profile/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recommended_scholarships_resolve() {
    let app = setup().await;
    let user_id = app.signup("asha@example.com").await;
    let first = app.seed("First", "$1", Some(5)).await;
    let second = app.seed("Second", "$1", Some(5)).await;

    SurrealUserProfileRepository::new(app.db.clone())
        .set_recommendations(user_id, vec![second, "dangling".into(), first])
        .await
        .unwrap();

    let (status, body) = app
        .get(&format!(
            "/api/user-profile/{user_id}/recommended-scholarships"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles(&body["recommended_scholarships"]),
        ["Second", "First"]
    );
}
