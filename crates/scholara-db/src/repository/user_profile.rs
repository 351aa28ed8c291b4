//! SurrealDB implementation of [`UserProfileRepository`].
//!
//! Emails are normalized before every write and lookup; the unique
//! index on `email_id` is the final arbiter when two signups race.

use chrono::{DateTime, Utc};
use scholara_core::error::ScholaraResult;
use scholara_core::models::user_profile::{
    CompleteProfile, CreateUserProfile, UserProfile, normalize_email,
};
use scholara_core::repository::UserProfileRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct UserProfileRow {
    record_id: String,
    name: String,
    email_id: String,
    password_hash: String,
    course: Option<String>,
    location: Option<String>,
    citizenship: Option<String>,
    degree_level: Option<String>,
    start_date: Option<String>,
    income_status: Option<String>,
    current_status: Option<String>,
    categories: Vec<String>,
    interests: Vec<String>,
    recommended_scholarships: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfileRow {
    fn try_into_profile(self) -> Result<UserProfile, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Encoding(format!("invalid UUID: {e}")))?;
        Ok(UserProfile {
            id,
            name: self.name,
            email_id: self.email_id,
            password_hash: self.password_hash,
            course: self.course,
            location: self.location,
            citizenship: self.citizenship,
            degree_level: self.degree_level,
            start_date: self.start_date,
            income_status: self.income_status,
            current_status: self.current_status,
            categories: self.categories,
            interests: self.interests,
            recommended_scholarships: self.recommended_scholarships,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn first_profile(rows: Vec<UserProfileRow>, id: String) -> Result<UserProfile, DbError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound {
            entity: "user_profile".into(),
            id,
        })?
        .try_into_profile()
}

/// Unique index violations surface as plain query errors.
fn is_unique_violation(message: &str) -> bool {
    message.contains("already contains")
}

const SELECT_BY_ID: &str = "SELECT meta::id(id) AS record_id, * \
     FROM type::record('user_profile', $id)";

/// SurrealDB implementation of the UserProfile repository.
#[derive(Clone)]
pub struct SurrealUserProfileRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserProfileRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserProfileRepository for SurrealUserProfileRepository<C> {
    async fn create(&self, input: CreateUserProfile) -> ScholaraResult<UserProfile> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(format!(
                "CREATE type::record('user_profile', $id) SET \
                 name = $name, email_id = $email_id, \
                 password_hash = $password_hash; \
                 {SELECT_BY_ID};"
            ))
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email_id", normalize_email(&input.email_id)))
            .bind(("password_hash", input.password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            let message = e.to_string();
            if is_unique_violation(&message) {
                DbError::Conflict {
                    entity: "user_profile".into(),
                }
            } else {
                DbError::Query(message)
            }
        })?;

        let rows: Vec<UserProfileRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_profile(rows, id_str)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ScholaraResult<UserProfile> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(SELECT_BY_ID)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserProfileRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_profile(rows, id_str)?)
    }

    async fn get_by_email(&self, email: &str) -> ScholaraResult<UserProfile> {
        let email = normalize_email(email);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user_profile \
                 WHERE email_id = $email_id",
            )
            .bind(("email_id", email.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserProfileRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_profile(rows, format!("email_id={email}"))?)
    }

    async fn complete_profile(
        &self,
        id: Uuid,
        input: CompleteProfile,
    ) -> ScholaraResult<UserProfile> {
        let id_str = id.to_string();

        let name_clause = if input.name.is_some() {
            "name = $name, "
        } else {
            ""
        };
        let query = format!(
            "UPDATE type::record('user_profile', $id) SET {name_clause}\
             course = $course, location = $location, \
             citizenship = $citizenship, degree_level = $degree_level, \
             start_date = $start_date, income_status = $income_status, \
             current_status = $current_status, \
             categories = $categories, interests = $interests, \
             updated_at = time::now(); \
             {SELECT_BY_ID};"
        );

        let mut builder = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("course", input.course))
            .bind(("location", input.location))
            .bind(("citizenship", input.citizenship))
            .bind(("degree_level", input.degree_level))
            .bind(("start_date", input.start_date))
            .bind(("income_status", input.income_status))
            .bind(("current_status", input.current_status))
            .bind(("categories", input.categories))
            .bind(("interests", input.interests));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserProfileRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_profile(rows, id_str)?)
    }

    async fn set_recommendations(
        &self,
        id: Uuid,
        scholarship_ids: Vec<String>,
    ) -> ScholaraResult<UserProfile> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('user_profile', $id) SET \
                 recommended_scholarships = $ids, \
                 updated_at = time::now(); \
                 {SELECT_BY_ID};"
            ))
            .bind(("id", id_str.clone()))
            .bind(("ids", scholarship_ids))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserProfileRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_profile(rows, id_str)?)
    }
}
