use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, can_manage_group, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    groups::responses::GroupDetailResponse,
    users::entities::{User, UserRole},
};

pub async fn get_group(
    service: &GroupService,
    group_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let group = match storage.get_group_by_id(group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GroupNotFound,
                "Group not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve group: {e}"),
                )),
            );
        }
    };

    let students = match storage.list_group_students(group_id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve group students: {e}"),
                )),
            );
        }
    };

    // 访问范围：管理员、负责教师、组内学生、组内学生的家长
    let allowed = if can_manage_group(&current_user, &group) {
        true
    } else {
        match current_user.role {
            UserRole::Student => students.iter().any(|s| s.id == current_user.id),
            UserRole::Parent => {
                match storage.list_parent_students(current_user.id).await {
                    Ok(children) => has_child_in(&children, &students),
                    Err(e) => {
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("Failed to retrieve children: {e}"),
                            ),
                        ));
                    }
                }
            }
            _ => false,
        }
    };

    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::GroupPermissionDenied,
            "No permission to view this group",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GroupDetailResponse { group, students },
        "Group retrieved successfully",
    )))
}

fn has_child_in(children: &[User], students: &[User]) -> bool {
    children
        .iter()
        .any(|child| students.iter().any(|s| s.id == child.id))
}
