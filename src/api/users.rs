/**
 * User Resource Handlers
 *
 * - GET /api/users/me     - profile of the authenticated account
 * - GET /api/admin/users  - identity listing, admin only
 *
 * Both routes sit behind the global authentication gate plus the
 * active-account gate; the admin listing additionally requires the admin
 * role.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::{find_user_by_id, list_users};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// Pagination query parameters for listings
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Profile handler
pub async fn get_profile(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = find_user_by_id(&pool, user.user_id)
        .await?
        .ok_or(ApiError::IdentityRevoked)?;

    Ok(Json(UserResponse::from(user)))
}

/// Admin identity listing
pub async fn list_all_users(
    State(pool): State<PgPool>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = list_users(&pool, pagination.limit(), pagination.offset()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_pagination_is_clamped() {
        let pagination = Pagination {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(pagination.limit(), MAX_PAGE_SIZE);
        assert_eq!(pagination.offset(), 0);

        let pagination = Pagination {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(pagination.limit(), 1);
    }
}
