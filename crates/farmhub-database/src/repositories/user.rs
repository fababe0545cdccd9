//! User repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{Predicate, ResourceKind, UserId};
use farmhub_entity::user::{NewUser, User, UserChanges, UserFilter};

use super::{ScopeSql, push_scope, read_error, write_error};

/// An agent sees itself and every FARMER account; anyone else only itself.
const SCOPE: ScopeSql = ScopeSql {
    managed: ("(u.id = ", " OR u.role = 'FARMER')"),
    owned: Some(("u.id = ", "")),
};

const CONSTRAINTS: &[(&str, &str)] = &[(
    "users_username_key",
    "A user with that username already exists.",
)];

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select<'a>(predicate: &Predicate<UserFilter>, head: &str) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" FROM users u WHERE TRUE");
        push_scope(&mut qb, &predicate.scope, &SCOPE);
        let filter = &predicate.filter;
        if let Some(id) = filter.id {
            qb.push(" AND u.id = ").push_bind(id);
        }
        if let Some(username) = &filter.username {
            qb.push(" AND u.username = ").push_bind(username.clone());
        }
        if let Some(role) = filter.role {
            qb.push(" AND u.role = ").push_bind(role);
        }
        qb
    }
}

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find(&self, predicate: &Predicate<UserFilter>) -> AppResult<Vec<User>> {
        let mut qb = Self::select(predicate, "SELECT u.*");
        qb.push(" ORDER BY u.date_joined DESC, u.id DESC");
        qb.build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to list users"))
    }

    async fn find_one(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to find user by id"))
    }

    async fn exists(&self, predicate: &Predicate<UserFilter>) -> AppResult<bool> {
        let mut qb = Self::select(predicate, "SELECT EXISTS (SELECT 1");
        qb.push(")");
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to check user visibility"))
    }

    async fn insert(&self, new: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users \
             (username, email, first_name, last_name, role, password_hash, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.role)
        .bind(&new.password_hash)
        .bind(new.is_staff)
        .bind(new.is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create user", CONSTRAINTS))
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> AppResult<User> {
        let mut qb = QueryBuilder::new("UPDATE users SET ");
        let mut set = qb.separated(", ");
        let mut touched = false;
        if let Some(email) = &changes.email {
            set.push("email = ").push_bind_unseparated(email.clone());
            touched = true;
        }
        if let Some(first_name) = &changes.first_name {
            set.push("first_name = ").push_bind_unseparated(first_name.clone());
            touched = true;
        }
        if let Some(last_name) = &changes.last_name {
            set.push("last_name = ").push_bind_unseparated(last_name.clone());
            touched = true;
        }
        if let Some(role) = changes.role {
            set.push("role = ").push_bind_unseparated(role);
            touched = true;
        }
        if let Some(is_active) = changes.is_active {
            set.push("is_active = ").push_bind_unseparated(is_active);
            touched = true;
        }
        if let Some(hash) = &changes.password_hash {
            set.push("password_hash = ").push_bind_unseparated(hash.clone());
            touched = true;
        }
        if let Some(last_login) = changes.last_login {
            set.push("last_login = ").push_bind_unseparated(last_login);
            touched = true;
        }
        if !touched {
            return self
                .find_one(id)
                .await?
                .ok_or_else(|| AppError::not_found(ResourceKind::User.not_found_message()));
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update user", CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(ResourceKind::User.not_found_message()))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
