pub mod attendance;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::lessons::entities::Lesson;
use crate::models::lessons::requests::{
    CreateLessonRequest, LessonQueryParams, UpdateAttendanceRequest, UpdateLessonRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建课程（参与记录在同一事务内写入）
    pub async fn create_lesson(
        &self,
        lesson_data: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, lesson_data, request).await
    }

    // 列出课程（按角色过滤）
    pub async fn list_lessons(
        &self,
        query: LessonQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, query, request).await
    }

    // 获取课程详情（含参与记录）
    pub async fn get_lesson(
        &self,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_lesson(self, lesson_id, request).await
    }

    // 更新课程信息
    pub async fn update_lesson(
        &self,
        lesson_id: i64,
        update_data: UpdateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, lesson_id, update_data, request).await
    }

    // 删除课程
    pub async fn delete_lesson(
        &self,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, lesson_id, request).await
    }

    // 批量更新出勤/作业记录
    pub async fn update_attendance(
        &self,
        lesson_id: i64,
        attendance_data: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::update_attendance(self, lesson_id, attendance_data, request).await
    }
}

// 从请求扩展中取当前用户，未登录时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录"))
    })
}

// 课程管理权限：管理员或授课教师本人
pub(crate) fn can_manage_lesson(user: &User, lesson: &Lesson) -> bool {
    user.role == UserRole::Admin
        || (user.role == UserRole::Teacher && lesson.teacher_id == user.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserProfile, UserStatus};

    fn make_user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            profile: UserProfile {
                profile_name: String::new(),
                avatar_url: None,
            },
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn make_lesson(teacher_id: i64) -> Lesson {
        Lesson {
            id: 1,
            teacher_id,
            group_id: Some(1),
            student_id: None,
            topic: "fractions".to_string(),
            scheduled_at: chrono::Utc::now(),
            duration_minutes: 45,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admin_can_manage_any_lesson() {
        assert!(can_manage_lesson(
            &make_user(1, UserRole::Admin),
            &make_lesson(42)
        ));
    }

    #[test]
    fn test_teacher_can_manage_only_own_lesson() {
        let teacher = make_user(2, UserRole::Teacher);
        assert!(can_manage_lesson(&teacher, &make_lesson(2)));
        assert!(!can_manage_lesson(&teacher, &make_lesson(3)));
    }

    #[test]
    fn test_parent_cannot_manage_lesson() {
        assert!(!can_manage_lesson(
            &make_user(4, UserRole::Parent),
            &make_lesson(4)
        ));
    }
}
