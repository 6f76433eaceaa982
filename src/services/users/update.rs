use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole},
        requests::UpdateUserRequest,
        responses::UserResponse,
    },
};
use crate::storage::Storage;
use crate::utils::validate::validate_email;

// 角色变更前的关系占用检查：仍被引用的用户不允许直接改角色
fn role_change_conflict(
    current_role: &UserRole,
    new_role: &UserRole,
    has_links: bool,
) -> Option<&'static str> {
    if current_role == new_role || !has_links {
        return None;
    }
    match current_role {
        UserRole::Student => {
            Some("Cannot change role: student is still assigned to teachers, parents or groups")
        }
        UserRole::Teacher => {
            Some("Cannot change role: teacher still has groups, lessons or assigned students")
        }
        UserRole::Parent => Some("Cannot change role: parent still has linked students"),
        UserRole::Admin => None,
    }
}

// 用户当前角色下是否仍被关系表引用
async fn has_role_links(storage: &dyn Storage, user: &User) -> crate::errors::Result<bool> {
    match user.role {
        UserRole::Student => Ok(storage.count_student_links(user.id).await? > 0),
        UserRole::Teacher => {
            let total = storage.count_groups(Some(user.id)).await?
                + storage.count_lessons(Some(user.id)).await?
                + storage.count_teacher_students(user.id).await?;
            Ok(total > 0)
        }
        UserRole::Parent => Ok(!storage.list_parent_students(user.id).await?.is_empty()),
        UserRole::Admin => Ok(false),
    }
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref email) = update_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidParameters, msg)));
        }
    }

    if let Some(ref new_role) = update_data.role {
        let existing = match storage.get_user_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "User not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve user: {e}"),
                    )),
                );
            }
        };

        if existing.role != *new_role {
            let has_links = match has_role_links(storage.as_ref(), &existing).await {
                Ok(has_links) => has_links,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to check user relationships: {e}"),
                        ),
                    ));
                }
            };

            if let Some(msg) = role_change_conflict(&existing.role, new_role, has_links) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::InvalidParameters, msg)));
            }
        }
    }

    if let Some(password) = update_data.password {
        match crate::utils::password::hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Password hashing failed: {e}"),
                    )),
                );
            }
        }
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "User information updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            format!("Failed to update user information: {e}"),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_change_blocked_for_referenced_student() {
        assert!(role_change_conflict(&UserRole::Student, &UserRole::Teacher, true).is_some());
        assert!(role_change_conflict(&UserRole::Student, &UserRole::Parent, true).is_some());
    }

    #[test]
    fn test_role_change_blocked_for_teacher_with_groups_or_lessons() {
        assert!(role_change_conflict(&UserRole::Teacher, &UserRole::Admin, true).is_some());
    }

    #[test]
    fn test_role_change_blocked_for_parent_with_children() {
        assert!(role_change_conflict(&UserRole::Parent, &UserRole::Teacher, true).is_some());
    }

    #[test]
    fn test_role_change_allowed_without_references() {
        assert!(role_change_conflict(&UserRole::Student, &UserRole::Teacher, false).is_none());
        assert!(role_change_conflict(&UserRole::Teacher, &UserRole::Parent, false).is_none());
    }

    #[test]
    fn test_same_role_update_is_not_a_change() {
        assert!(role_change_conflict(&UserRole::Student, &UserRole::Student, true).is_none());
    }
}
