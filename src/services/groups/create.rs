use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    groups::{entities::Group, requests::CreateGroupRequest},
    users::entities::UserRole,
};

pub async fn create_group(
    service: &GroupService,
    group_data: CreateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 确定负责教师：教师只能指定自己，管理员必须显式指定
    let teacher_id = match current_user.role {
        UserRole::Teacher => {
            if let Some(requested) = group_data.teacher_id
                && requested != current_user.id
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::GroupPermissionDenied,
                    "Teachers can only create groups for themselves",
                )));
            }
            current_user.id
        }
        UserRole::Admin => match group_data.teacher_id {
            Some(teacher_id) => teacher_id,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParameters,
                    "teacher_id is required when an admin creates a group",
                )));
            }
        },
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::GroupPermissionDenied,
                "Only teachers and admins can create groups",
            )));
        }
    };

    // 负责教师必须存在且为教师角色
    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(teacher)) => {
            if teacher.role != UserRole::Teacher {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParameters,
                    "Group teacher must have the teacher role",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve teacher: {e}"),
                )),
            );
        }
    }

    if group_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            "Group name cannot be empty",
        )));
    }

    // 名称唯一性检查（唯一索引兜底）
    match storage.get_group_by_name(&group_data.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::GroupAlreadyExists,
                "Group name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check group name: {e}"),
                )),
            );
        }
    }

    match storage.create_group(teacher_id, group_data).await {
        Ok(group) => Ok(HttpResponse::Created().json(ApiResponse::<Group>::success(
            group,
            "Group created successfully",
        ))),
        // 并发创建同名小组时由唯一索引兜底
        Err(crate::errors::EduAdminError::UniqueViolation(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::GroupAlreadyExists,
                "Group name already exists",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to create group: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::GroupCreationFailed,
                    format!("Failed to create group: {e}"),
                )),
            )
        }
    }
}
