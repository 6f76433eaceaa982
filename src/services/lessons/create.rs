use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, current_user};
use crate::models::{
    ApiResponse, ErrorCode,
    lessons::{entities::Lesson, requests::CreateLessonRequest},
    users::entities::UserRole,
};

// 课程对象：整个小组或单个学生
#[derive(Debug, PartialEq)]
pub(crate) enum LessonTarget {
    Group(i64),
    Student(i64),
}

// group_id 与 student_id 必须恰好提供其一
pub(crate) fn resolve_lesson_target(
    group_id: Option<i64>,
    student_id: Option<i64>,
) -> Option<LessonTarget> {
    match (group_id, student_id) {
        (Some(group_id), None) => Some(LessonTarget::Group(group_id)),
        (None, Some(student_id)) => Some(LessonTarget::Student(student_id)),
        _ => None,
    }
}

pub async fn create_lesson(
    service: &LessonService,
    lesson_data: CreateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 确定授课教师：教师只能指定自己，管理员必须显式指定
    let teacher_id = match current_user.role {
        UserRole::Teacher => {
            if let Some(requested) = lesson_data.teacher_id
                && requested != current_user.id
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::LessonPermissionDenied,
                    "Teachers can only create lessons for themselves",
                )));
            }
            current_user.id
        }
        UserRole::Admin => match lesson_data.teacher_id {
            Some(teacher_id) => teacher_id,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParameters,
                    "teacher_id is required when an admin creates a lesson",
                )));
            }
        },
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::LessonPermissionDenied,
                "Only teachers and admins can create lessons",
            )));
        }
    };

    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(teacher)) => {
            if teacher.role != UserRole::Teacher {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParameters,
                    "Lesson teacher must have the teacher role",
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

    if lesson_data.topic.trim().is_empty() || lesson_data.duration_minutes <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParameters,
            "Lesson topic cannot be empty and duration must be positive",
        )));
    }

    let target = match resolve_lesson_target(lesson_data.group_id, lesson_data.student_id) {
        Some(target) => target,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::LessonTargetInvalid,
                "Exactly one of group_id or student_id must be provided",
            )));
        }
    };

    let participant_ids = match target {
        LessonTarget::Group(group_id) => {
            let group = match storage.get_group_by_id(group_id).await {
                Ok(Some(group)) => group,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::GroupNotFound,
                        "Group not found",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to retrieve group: {e}"),
                        ),
                    ));
                }
            };

            // 小组课程只能由负责教师授课
            if group.teacher_id != teacher_id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::LessonPermissionDenied,
                    "Lessons for a group can only be taught by its teacher",
                )));
            }

            // 参与记录快照：以创建时的小组成员为准
            match storage.list_group_students(group_id).await {
                Ok(students) => students.into_iter().map(|s| s.id).collect(),
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to retrieve group students: {e}"),
                        ),
                    ));
                }
            }
        }
        LessonTarget::Student(student_id) => {
            match storage.get_user_by_id(student_id).await {
                Ok(Some(student)) => {
                    if student.role != UserRole::Student {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::NotAStudent,
                            "Lesson target must have the student role",
                        )));
                    }
                }
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::UserNotFound,
                        "Student not found",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to retrieve student: {e}"),
                        ),
                    ));
                }
            }

            // 单人课程要求学生已分配给该教师
            match storage.is_teacher_student(teacher_id, student_id).await {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::LessonPermissionDenied,
                        "Student is not assigned to this teacher",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to check assignment: {e}"),
                        ),
                    ));
                }
            }

            vec![student_id]
        }
    };

    match storage
        .create_lesson(teacher_id, lesson_data, participant_ids)
        .await
    {
        Ok(lesson) => Ok(HttpResponse::Created().json(ApiResponse::<Lesson>::success(
            lesson,
            "Lesson created successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to create lesson: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::LessonCreationFailed,
                    format!("Failed to create lesson: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_cannot_target_both_group_and_student() {
        assert_eq!(resolve_lesson_target(Some(1), Some(2)), None);
    }

    #[test]
    fn test_lesson_must_target_group_or_student() {
        assert_eq!(resolve_lesson_target(None, None), None);
    }

    #[test]
    fn test_lesson_targeting_group_only() {
        assert_eq!(
            resolve_lesson_target(Some(7), None),
            Some(LessonTarget::Group(7))
        );
    }

    #[test]
    fn test_lesson_targeting_student_only() {
        assert_eq!(
            resolve_lesson_target(None, Some(42)),
            Some(LessonTarget::Student(42))
        );
    }
}
