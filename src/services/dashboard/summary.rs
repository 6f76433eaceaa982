//! 角色仪表盘聚合
//!
//! 同一个端点按登录角色返回不同的聚合视图：
//! - 管理员：全站用户/小组/课程统计
//! - 教师：自己名下的小组、学生、课程统计
//! - 学生：自己的出勤统计与近期课程
//! - 家长：每个子女一份学生视图

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::DashboardService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    dashboard::responses::{
        AdminDashboard, ChildSummary, ParentDashboard, StudentDashboard, TeacherDashboard,
    },
    lessons::{entities::Lesson, requests::LessonListQuery},
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

// 仪表盘中展示的近期课程条数
const UPCOMING_LESSON_LIMIT: i64 = 5;

// 自当前时刻起的近期课程，按角色过滤
async fn upcoming_lessons(
    storage: &Arc<dyn Storage>,
    teacher_id: Option<i64>,
    participant_id: Option<i64>,
) -> Result<Vec<Lesson>> {
    let query = LessonListQuery {
        page: Some(1),
        size: Some(UPCOMING_LESSON_LIMIT),
        teacher_id,
        participant_id,
        from: Some(chrono::Utc::now()),
        ..Default::default()
    };

    Ok(storage.list_lessons_with_pagination(query).await?.items)
}

async fn admin_dashboard(storage: &Arc<dyn Storage>) -> Result<AdminDashboard> {
    Ok(AdminDashboard {
        users: storage.count_users_by_role().await?,
        group_count: storage.count_groups(None).await?,
        lesson_count: storage.count_lessons(None).await?,
        upcoming_lessons: upcoming_lessons(storage, None, None).await?,
    })
}

async fn teacher_dashboard(storage: &Arc<dyn Storage>, teacher_id: i64) -> Result<TeacherDashboard> {
    Ok(TeacherDashboard {
        group_count: storage.count_groups(Some(teacher_id)).await?,
        student_count: storage.count_teacher_students(teacher_id).await?,
        lesson_count: storage.count_lessons(Some(teacher_id)).await?,
        upcoming_lessons: upcoming_lessons(storage, Some(teacher_id), None).await?,
    })
}

async fn student_dashboard(storage: &Arc<dyn Storage>, student_id: i64) -> Result<StudentDashboard> {
    Ok(StudentDashboard {
        attendance: storage.attendance_summary(student_id).await?,
        upcoming_lessons: upcoming_lessons(storage, None, Some(student_id)).await?,
    })
}

async fn parent_dashboard(storage: &Arc<dyn Storage>, parent_id: i64) -> Result<ParentDashboard> {
    let mut children = Vec::new();

    for student in storage.list_parent_students(parent_id).await? {
        let attendance = storage.attendance_summary(student.id).await?;
        let upcoming = upcoming_lessons(storage, None, Some(student.id)).await?;
        children.push(ChildSummary {
            student,
            attendance,
            upcoming_lessons: upcoming,
        });
    }

    Ok(ParentDashboard { children })
}

pub async fn get_summary(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user: User = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let response = match current_user.role {
        UserRole::Admin => admin_dashboard(&storage).await.map(|dashboard| {
            HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))
        }),
        UserRole::Teacher => teacher_dashboard(&storage, current_user.id)
            .await
            .map(|dashboard| {
                HttpResponse::Ok().json(ApiResponse::success(
                    dashboard,
                    "Dashboard retrieved successfully",
                ))
            }),
        UserRole::Student => student_dashboard(&storage, current_user.id)
            .await
            .map(|dashboard| {
                HttpResponse::Ok().json(ApiResponse::success(
                    dashboard,
                    "Dashboard retrieved successfully",
                ))
            }),
        UserRole::Parent => parent_dashboard(&storage, current_user.id)
            .await
            .map(|dashboard| {
                HttpResponse::Ok().json(ApiResponse::success(
                    dashboard,
                    "Dashboard retrieved successfully",
                ))
            }),
    };

    match response {
        Ok(response) => Ok(response),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to build dashboard: {e}"),
            )),
        ),
    }
}
