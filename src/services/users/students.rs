//! 教师/家长名下学生的分配管理
//!
//! 同一组端点同时服务教师与家长：owner 为教师时维护授课学生名单，
//! owner 为家长时维护子女关联。管理员可以操作任意 owner，
//! 教师/家长只能操作自己名下的名单。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::EduAdminError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole},
        requests::AssignStudentRequest,
        responses::AssignedStudentsResponse,
    },
};
use crate::storage::Storage;

// owner 角色与操作者权限校验，通过时返回 owner 用户
async fn resolve_owner(
    storage: &dyn Storage,
    owner_id: i64,
    request: &HttpRequest,
) -> Result<User, HttpResponse> {
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Err(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 管理员可操作任意 owner；教师/家长只能操作自己
    if current_user.role != UserRole::Admin && current_user.id != owner_id {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "Only the owner or an admin can manage this student list",
        )));
    }

    let owner = match storage.get_user_by_id(owner_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve user: {e}"),
                )),
            );
        }
    };

    // 只有教师和家长可以持有学生名单
    if !UserRole::student_owner_roles().contains(&&owner.role) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            "Only teachers and parents can have assigned students",
        )));
    }

    Ok(owner)
}

// 分配前置校验：目标必须是学生角色，且尚未在名单中
pub(crate) fn check_assignment(
    target_role: &UserRole,
    already_assigned: bool,
) -> Result<(), ErrorCode> {
    if *target_role != UserRole::Student {
        return Err(ErrorCode::NotAStudent);
    }
    if already_assigned {
        return Err(ErrorCode::StudentAlreadyAssigned);
    }
    Ok(())
}

pub async fn list_assigned_students(
    service: &UserService,
    owner_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let owner = match resolve_owner(storage.as_ref(), owner_id, request).await {
        Ok(owner) => owner,
        Err(response) => return Ok(response),
    };

    let result = match owner.role {
        UserRole::Teacher => storage.list_teacher_students(owner_id).await,
        _ => storage.list_parent_students(owner_id).await,
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignedStudentsResponse { items },
            "Assigned students retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve assigned students: {e}"),
            )),
        ),
    }
}

pub async fn assign_student(
    service: &UserService,
    owner_id: i64,
    assign_data: AssignStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = assign_data.student_id;

    let owner = match resolve_owner(storage.as_ref(), owner_id, request).await {
        Ok(owner) => owner,
        Err(response) => return Ok(response),
    };

    // 被分配的用户必须存在
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

    let already = match owner.role {
        UserRole::Teacher => storage.is_teacher_student(owner_id, student_id).await,
        _ => storage.is_parent_student(owner_id, student_id).await,
    };
    let already = match already {
        Ok(already) => already,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check assignment: {e}"),
                )),
            );
        }
    };

    match check_assignment(&student.role, already) {
        Err(ErrorCode::NotAStudent) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NotAStudent,
                "Assigned user must have the student role",
            )));
        }
        Err(_) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyAssigned,
                "Student is already assigned",
            )));
        }
        Ok(()) => {}
    }

    let result = match owner.role {
        UserRole::Teacher => storage.assign_student_to_teacher(owner_id, student_id).await,
        _ => storage.assign_student_to_parent(owner_id, student_id).await,
    };

    match result {
        Ok(()) => Ok(HttpResponse::Created()
            .json(ApiResponse::<()>::success_empty("Student assigned successfully"))),
        // 并发重复分配时由唯一索引兜底
        Err(EduAdminError::UniqueViolation(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyAssigned,
                "Student is already assigned",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to assign student: {e}"),
            )),
        ),
    }
}

pub async fn unassign_student(
    service: &UserService,
    owner_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let owner = match resolve_owner(storage.as_ref(), owner_id, request).await {
        Ok(owner) => owner,
        Err(response) => return Ok(response),
    };

    let result = match owner.role {
        UserRole::Teacher => {
            storage
                .unassign_student_from_teacher(owner_id, student_id)
                .await
        }
        _ => {
            storage
                .unassign_student_from_parent(owner_id, student_id)
                .await
        }
    };

    match result {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::<()>::success_empty("Student unassigned successfully"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotAssigned,
            "Student is not assigned",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to unassign student: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigning_non_student_is_rejected() {
        assert_eq!(
            check_assignment(&UserRole::Teacher, false),
            Err(ErrorCode::NotAStudent)
        );
        assert_eq!(
            check_assignment(&UserRole::Parent, false),
            Err(ErrorCode::NotAStudent)
        );
    }

    #[test]
    fn test_duplicate_assignment_is_rejected() {
        assert_eq!(
            check_assignment(&UserRole::Student, true),
            Err(ErrorCode::StudentAlreadyAssigned)
        );
    }

    #[test]
    fn test_unassigned_student_passes_checks() {
        assert_eq!(check_assignment(&UserRole::Student, false), Ok(()));
    }
}
