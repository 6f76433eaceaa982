use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, can_manage_lesson, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    lessons::{entities::LessonParticipant, responses::LessonDetailResponse},
    users::entities::{User, UserRole},
};

pub async fn get_lesson(
    service: &LessonService,
    lesson_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let lesson = match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::LessonNotFound,
                "Lesson not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve lesson: {e}"),
                )),
            );
        }
    };

    let participants = match storage.list_lesson_participants(lesson_id).await {
        Ok(participants) => participants,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve lesson participants: {e}"),
                )),
            );
        }
    };

    // 访问范围：管理员、授课教师、参与学生、参与学生的家长
    let allowed = if can_manage_lesson(&current_user, &lesson) {
        true
    } else {
        match current_user.role {
            UserRole::Student => participants.iter().any(|p| p.student_id == current_user.id),
            UserRole::Parent => {
                match storage.list_parent_students(current_user.id).await {
                    Ok(children) => has_child_participating(&children, &participants),
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
            ErrorCode::LessonPermissionDenied,
            "No permission to view this lesson",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LessonDetailResponse {
            lesson,
            participants,
        },
        "Lesson retrieved successfully",
    )))
}

fn has_child_participating(children: &[User], participants: &[LessonParticipant]) -> bool {
    children
        .iter()
        .any(|child| participants.iter().any(|p| p.student_id == child.id))
}
