pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::groups::entities::Group;
use crate::models::groups::requests::{
    AddGroupStudentRequest, CreateGroupRequest, GroupQueryParams, UpdateGroupRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct GroupService {
    storage: Option<Arc<dyn Storage>>,
}

impl GroupService {
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

    // 创建小组
    pub async fn create_group(
        &self,
        group_data: CreateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_group(self, group_data, request).await
    }

    // 列出小组（按角色过滤）
    pub async fn list_groups(
        &self,
        query: GroupQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_groups(self, query, request).await
    }

    // 获取小组详情（含成员）
    pub async fn get_group(
        &self,
        group_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_group(self, group_id, request).await
    }

    // 更新小组信息
    pub async fn update_group(
        &self,
        group_id: i64,
        update_data: UpdateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_group(self, group_id, update_data, request).await
    }

    // 删除小组
    pub async fn delete_group(
        &self,
        group_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_group(self, group_id, request).await
    }

    // 向小组添加学生
    pub async fn add_student(
        &self,
        group_id: i64,
        add_data: AddGroupStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_student(self, group_id, add_data, request).await
    }

    // 从小组移除学生
    pub async fn remove_student(
        &self,
        group_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::remove_student(self, group_id, student_id, request).await
    }
}

// 从请求扩展中取当前用户，未登录时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录"))
    })
}

// 小组管理权限：管理员或该组的负责教师
pub(crate) fn can_manage_group(user: &User, group: &Group) -> bool {
    user.role == UserRole::Admin
        || (user.role == UserRole::Teacher && group.teacher_id == user.id)
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

    fn make_group(teacher_id: i64) -> Group {
        Group {
            id: 1,
            group_name: "algebra".to_string(),
            description: None,
            teacher_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admin_can_manage_any_group() {
        let admin = make_user(1, UserRole::Admin);
        assert!(can_manage_group(&admin, &make_group(42)));
    }

    #[test]
    fn test_teacher_can_manage_only_own_group() {
        let teacher = make_user(2, UserRole::Teacher);
        assert!(can_manage_group(&teacher, &make_group(2)));
        assert!(!can_manage_group(&teacher, &make_group(3)));
    }

    #[test]
    fn test_student_cannot_manage_group() {
        let student = make_user(5, UserRole::Student);
        assert!(!can_manage_group(&student, &make_group(5)));
    }
}
