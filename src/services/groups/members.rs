//! 小组成员管理
//!
//! 只有管理员和负责教师可以增删成员；被添加的用户必须是学生角色。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, can_manage_group, current_user};
use crate::errors::EduAdminError;
use crate::models::{
    ApiResponse, ErrorCode,
    groups::{entities::Group, requests::AddGroupStudentRequest},
    users::entities::UserRole,
};
use crate::storage::Storage;

// 取出小组并校验管理权限
async fn load_managed_group(
    storage: &dyn Storage,
    group_id: i64,
    request: &HttpRequest,
) -> Result<Group, HttpResponse> {
    let current_user = current_user(request)?;

    let group = match storage.get_group_by_id(group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GroupNotFound,
                "Group not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve group: {e}"),
                )),
            );
        }
    };

    if !can_manage_group(&current_user, &group) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::GroupPermissionDenied,
            "No permission to manage this group's students",
        )));
    }

    Ok(group)
}

// 入组前置校验：目标必须是学生角色，且尚未在组内
pub(crate) fn check_membership(
    target_role: &UserRole,
    already_member: bool,
) -> Result<(), ErrorCode> {
    if *target_role != UserRole::Student {
        return Err(ErrorCode::NotAStudent);
    }
    if already_member {
        return Err(ErrorCode::StudentAlreadyInGroup);
    }
    Ok(())
}

pub async fn add_student(
    service: &GroupService,
    group_id: i64,
    add_data: AddGroupStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = add_data.student_id;

    if let Err(response) = load_managed_group(storage.as_ref(), group_id, request).await {
        return Ok(response);
    }

    // 被添加的用户必须存在
    let student = match storage.get_user_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve student: {e}"),
                )),
            );
        }
    };

    let already = match storage.is_group_student(group_id, student_id).await {
        Ok(already) => already,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check group membership: {e}"),
                )),
            );
        }
    };

    match check_membership(&student.role, already) {
        Err(ErrorCode::NotAStudent) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NotAStudent,
                "Group members must have the student role",
            )));
        }
        Err(_) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyInGroup,
                "Student is already in this group",
            )));
        }
        Ok(()) => {}
    }

    match storage.add_group_student(group_id, student_id).await {
        Ok(membership) => Ok(HttpResponse::Created().json(ApiResponse::success(
            membership,
            "Student added to group successfully",
        ))),
        // 并发重复添加时由唯一索引兜底
        Err(EduAdminError::UniqueViolation(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyInGroup,
                "Student is already in this group",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to add student to group: {e}"),
            )),
        ),
    }
}

pub async fn remove_student(
    service: &GroupService,
    group_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_managed_group(storage.as_ref(), group_id, request).await {
        return Ok(response);
    }

    match storage.remove_group_student(group_id, student_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Student removed from group successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotInGroup,
            "Student is not in this group",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to remove student from group: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adding_non_student_is_rejected() {
        assert_eq!(
            check_membership(&UserRole::Teacher, false),
            Err(ErrorCode::NotAStudent)
        );
    }

    #[test]
    fn test_duplicate_membership_is_rejected() {
        assert_eq!(
            check_membership(&UserRole::Student, true),
            Err(ErrorCode::StudentAlreadyInGroup)
        );
    }

    #[test]
    fn test_new_student_member_passes_checks() {
        assert_eq!(check_membership(&UserRole::Student, false), Ok(()));
    }
}
