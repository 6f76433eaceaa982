//! 出勤与作业记录的批量更新
//!
//! 每条记录必须指向该课程的参与学生；任何一条不匹配则整个请求被拒绝，
//! 不做部分写入。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::{LessonService, can_manage_lesson, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    lessons::{requests::UpdateAttendanceRequest, responses::LessonDetailResponse},
};

pub async fn update_attendance(
    service: &LessonService,
    lesson_id: i64,
    attendance_data: UpdateAttendanceRequest,
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
            "No permission to update attendance for this lesson",
        )));
    }

    if attendance_data.records.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            "Attendance records cannot be empty",
        )));
    }

    // 每条记录都必须指向课程的参与学生
    let participant_ids: HashSet<i64> = match storage.list_lesson_participants(lesson_id).await {
        Ok(participants) => participants.iter().map(|p| p.student_id).collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve lesson participants: {e}"),
                )),
            );
        }
    };

    for record in &attendance_data.records {
        if !participant_ids.contains(&record.student_id) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ParticipantNotInLesson,
                format!(
                    "Student {} is not a participant of this lesson",
                    record.student_id
                ),
            )));
        }
    }

    match storage
        .update_lesson_attendance(lesson_id, &attendance_data.records)
        .await
    {
        Ok(participants) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LessonDetailResponse {
                lesson,
                participants,
            },
            "Attendance updated successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update attendance: {e}"),
            )),
        ),
    }
}
