use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, can_manage_group, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    groups::{entities::Group, requests::UpdateGroupRequest},
};

pub async fn update_group(
    service: &GroupService,
    group_id: i64,
    update_data: UpdateGroupRequest,
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

    if !can_manage_group(&current_user, &group) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::GroupPermissionDenied,
            "No permission to update this group",
        )));
    }

    // 改名时保持名称唯一
    if let Some(ref name) = update_data.name
        && *name != group.group_name
    {
        match storage.get_group_by_name(name).await {
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
    }

    match storage.update_group(group_id, update_data).await {
        Ok(Some(group)) => Ok(HttpResponse::Ok().json(ApiResponse::<Group>::success(
            group,
            "Group updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GroupNotFound,
            "Group not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            format!("Failed to update group: {e}"),
        ))),
    }
}
