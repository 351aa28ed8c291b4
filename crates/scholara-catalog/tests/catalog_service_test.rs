//! Integration tests for listing, search, detail and cleanup over an
//! in-memory SurrealDB store.

use std::sync::Arc;

use chrono::{Duration, Local};
use scholara_catalog::{CatalogService, CriteriaFilter, EducationLevel, SortSpec};
use scholara_core::error::ScholaraError;
use scholara_core::models::scholarship::{CreateScholarship, Eligibility};
use scholara_core::repository::ScholarshipRepository;
use scholara_db::repository::SurrealScholarshipRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

type Service = CatalogService<SurrealScholarshipRepository<Db>>;

async fn setup() -> Service {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    scholara_db::run_migrations(&db).await.unwrap();
    CatalogService::new(SurrealScholarshipRepository::new(db))
}

/// Deadline `offset` days from today, formatted `YYYY-MM-DD`.
fn days_from_today(offset: i64) -> String {
    (Local::now().date_naive() + Duration::days(offset)).to_string()
}

fn scholarship(title: &str, amount: &str, deadline: Option<String>) -> CreateScholarship {
    CreateScholarship {
        title: Some(title.into()),
        amount: Some(amount.into()),
        eligibility: Some(Eligibility {
            deadline_date: deadline,
            eligibility_summary: Some(format!("Support for {title} applicants")),
            criteria: vec![],
        }),
        ..Default::default()
    }
}

fn with_criteria(mut input: CreateScholarship, criteria: &[&str]) -> CreateScholarship {
    if let Some(eligibility) = input.eligibility.as_mut() {
        eligibility.criteria = criteria.iter().map(|c| c.to_string()).collect();
    }
    input
}

async fn seed(service: &Service, items: Vec<CreateScholarship>) {
    for item in items {
        service.repository().create(item).await.unwrap();
    }
}

/// A (yesterday), B (today), C (+10 days), D (no deadline).
async fn seed_scenario(service: &Service) {
    seed(
        service,
        vec![
            scholarship("A", "$100", Some(days_from_today(-1))),
            scholarship("B", "$200", Some(days_from_today(0))),
            scholarship("C", "$300", Some(days_from_today(10))),
            scholarship("D", "$400", None),
        ],
    )
    .await;
}

fn titles(items: &[scholara_core::models::scholarship::Scholarship]) -> Vec<&str> {
    items.iter().filter_map(|s| s.title.as_deref()).collect()
}

#[tokio::test]
async fn listing_hides_expired_and_undated() {
    let service = setup().await;
    seed_scenario(&service).await;

    let listed = service
        .list_active(None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert_eq!(titles(&listed), ["B", "C"]);
}

#[tokio::test]
async fn listing_empty_store() {
    let service = setup().await;
    let listed = service
        .list_active(None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn listing_sorts_after_filtering() {
    let service = setup().await;
    seed(
        &service,
        vec![
            scholarship("small", "$500", Some(days_from_today(3))),
            scholarship("big", "$1,000", Some(days_from_today(5))),
            scholarship("unknown", "abc", Some(days_from_today(1))),
            scholarship("expired-huge", "$9,999,999", Some(days_from_today(-3))),
        ],
    )
    .await;

    let by_amount = service
        .list_active(
            SortSpec::from_params(Some("amount"), Some("desc")),
            &CriteriaFilter::default(),
        )
        .await
        .unwrap();
    assert_eq!(titles(&by_amount), ["big", "small", "unknown"]);

    let by_date = service
        .list_active(
            SortSpec::from_params(Some("date"), Some("asc")),
            &CriteriaFilter::default(),
        )
        .await
        .unwrap();
    assert_eq!(titles(&by_date), ["unknown", "small", "big"]);
}

#[tokio::test]
async fn search_empty_query_returns_all_active() {
    let service = setup().await;
    seed_scenario(&service).await;

    let all = service
        .search(Some(""), None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert_eq!(titles(&all), ["B", "C"]);

    let missing = service
        .search(None, None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert_eq!(titles(&missing), ["B", "C"]);
}

#[tokio::test]
async fn search_matches_title_summary_and_amount() {
    let service = setup().await;
    seed(
        &service,
        vec![
            scholarship("Women in STEM", "$2,500", Some(days_from_today(30))),
            scholarship("Arts Grant", "Rs. 50,000", Some(days_from_today(30))),
            scholarship("STEM Legacy", "$1", Some(days_from_today(-30))),
        ],
    )
    .await;

    let stem = service
        .search(Some("stem"), None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert_eq!(titles(&stem), ["Women in STEM"]);

    let by_summary = service
        .search(Some("ARTS GRANT APPLICANTS"), None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert_eq!(titles(&by_summary), ["Arts Grant"]);

    let by_amount = service
        .search(Some("50,000"), None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert_eq!(titles(&by_amount), ["Arts Grant"]);

    let none = service
        .search(Some("medicine"), None, &CriteriaFilter::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn criteria_refinement_applies_to_listing_and_search() {
    let service = setup().await;
    seed(
        &service,
        vec![
            with_criteria(
                scholarship("Kerala UG", "$100", Some(days_from_today(5))),
                &["Domicile of Kerala", "Pursuing a bachelor degree"],
            ),
            with_criteria(
                scholarship("Goa PhD", "$100", Some(days_from_today(5))),
                &["Domicile of Goa", "PhD research scholar"],
            ),
        ],
    )
    .await;

    let ug = CriteriaFilter {
        education: Some(EducationLevel::Undergraduate),
        ..Default::default()
    };
    let listed = service.list_active(None, &ug).await.unwrap();
    assert_eq!(titles(&listed), ["Kerala UG"]);

    let goa = CriteriaFilter {
        state: Some("goa".into()),
        ..Default::default()
    };
    let found = service.search(Some(""), None, &goa).await.unwrap();
    assert_eq!(titles(&found), ["Goa PhD"]);
}

#[tokio::test]
async fn detail_distinguishes_missing_and_expired() {
    let service = setup().await;
    let expired = service
        .repository()
        .create(scholarship("Old", "$1", Some(days_from_today(-1))))
        .await
        .unwrap();
    let active = service
        .repository()
        .create(scholarship("New", "$1", Some(days_from_today(1))))
        .await
        .unwrap();

    assert_eq!(
        service.get_active(&active.id).await.unwrap().title.as_deref(),
        Some("New")
    );
    assert!(matches!(
        service.get_active(&expired.id).await,
        Err(ScholaraError::Expired { .. })
    ));
    assert!(matches!(
        service.get_active("does-not-exist").await,
        Err(ScholaraError::NotFound { .. })
    ));
}

#[tokio::test]
async fn tags_come_from_active_criteria() {
    let service = setup().await;
    seed(
        &service,
        vec![
            with_criteria(
                scholarship("live", "$1", Some(days_from_today(2))),
                &["Girls from Kerala"],
            ),
            with_criteria(
                scholarship("gone", "$1", Some(days_from_today(-2))),
                &["Veterans only"],
            ),
        ],
    )
    .await;

    assert_eq!(
        service.tags().await.unwrap(),
        ["from", "girls", "kerala"]
    );
}

#[tokio::test]
async fn cleanup_deletes_expired_once() {
    let service = setup().await;
    seed_scenario(&service).await;

    let first = service.run_cleanup().await.unwrap();
    assert_eq!(first.scanned, 4);
    assert_eq!(first.identified, 2);
    assert_eq!(first.deleted, 2);

    let second = service.run_cleanup().await.unwrap();
    assert_eq!(second.scanned, 2);
    assert_eq!(second.identified, 0);
    assert_eq!(second.deleted, 0);

    let remaining = service.repository().list_all().await.unwrap();
    assert_eq!(titles(&remaining), ["B", "C"]);
}

#[tokio::test]
async fn concurrent_cleanups_delete_each_record_once() {
    let service = Arc::new(setup().await);
    seed_scenario(&service).await;

    let (a, b) = tokio::join!(service.run_cleanup(), service.run_cleanup());
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.deleted + b.deleted, 2);
    let remaining = service.repository().list_all().await.unwrap();
    assert_eq!(titles(&remaining), ["B", "C"]);

    let after = service.run_cleanup().await.unwrap();
    assert_eq!(after.deleted, 0);
}
