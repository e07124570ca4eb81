//! PostgreSQL Repository Implementations
//!
//! Every call goes through a stored function; see `database/migrations`.

use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::{RegisterOutcome, UserRepository};
use crate::domain::value_object::{
    user_name::UserName, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Id returned by `sp_register_user` when the user name is taken
const USER_NAME_TAKEN_SENTINEL: i64 = -1;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    async fn register(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<RegisterOutcome> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, user_name, password_hash, user_role FROM sp_register_user($1, $2)",
        )
        .bind(user_name.as_str())
        .bind(password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await?;

        if row.user_id == USER_NAME_TAKEN_SENTINEL {
            return Ok(RegisterOutcome::UserNameTaken);
        }

        row.into_user().map(RegisterOutcome::Created)
    }

    async fn upsert_admin(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, user_name, password_hash, user_role FROM sp_create_admin($1, $2)",
        )
        .bind(user_name.as_str())
        .bind(password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, user_name, password_hash, user_role FROM sp_get_user_by_username($1)",
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    password_hash: String,
    user_role: String,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_code(&self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::new(self.user_id),
            user_name: UserName::from_db(self.user_name),
            password_hash: UserPassword::from_db(self.password_hash)?,
            user_role,
        })
    }
}
