use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, can_manage_lesson, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    lessons::{entities::Lesson, requests::UpdateLessonRequest},
};

pub async fn update_lesson(
    service: &LessonService,
    lesson_id: i64,
    update_data: UpdateLessonRequest,
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

    if !can_manage_lesson(&current_user, &lesson) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::LessonPermissionDenied,
            "No permission to update this lesson",
        )));
    }

    if let Some(duration) = update_data.duration_minutes
        && duration <= 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            "Lesson duration must be positive",
        )));
    }

    match storage.update_lesson(lesson_id, update_data).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::<Lesson>::success(
            lesson,
            "Lesson updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            format!("Failed to update lesson: {e}"),
        ))),
    }
}
