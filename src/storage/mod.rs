use std::sync::Arc;

use crate::models::{
    dashboard::responses::{AttendanceSummary, RoleCounts},
    groups::{
        entities::{Group, GroupStudent},
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
    lessons::{
        entities::{Lesson, LessonParticipant},
        requests::{AttendanceRecord, CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
        responses::LessonListResponse,
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段必须已由服务层替换为哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 更新用户密码哈希
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;

    /// 学生分配方法（教师/家长名下的学生）
    // 将学生分配给教师
    async fn assign_student_to_teacher(&self, teacher_id: i64, student_id: i64) -> Result<()>;
    // 解除教师与学生的分配关系
    async fn unassign_student_from_teacher(&self, teacher_id: i64, student_id: i64)
    -> Result<bool>;
    // 学生是否已分配给教师
    async fn is_teacher_student(&self, teacher_id: i64, student_id: i64) -> Result<bool>;
    // 列出教师名下的学生
    async fn list_teacher_students(&self, teacher_id: i64) -> Result<Vec<User>>;
    // 将学生（子女）关联到家长
    async fn assign_student_to_parent(&self, parent_id: i64, student_id: i64) -> Result<()>;
    // 解除家长与学生的关联关系
    async fn unassign_student_from_parent(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 学生是否已关联到家长
    async fn is_parent_student(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 列出家长名下的学生
    async fn list_parent_students(&self, parent_id: i64) -> Result<Vec<User>>;
    // 统计学生被引用的关系数量（师生分配、家长关联、小组成员）
    async fn count_student_links(&self, student_id: i64) -> Result<i64>;

    /// 小组管理方法
    // 创建小组（teacher_id 已由服务层解析校验）
    async fn create_group(&self, teacher_id: i64, group: CreateGroupRequest) -> Result<Group>;
    // 通过ID获取小组信息
    async fn get_group_by_id(&self, group_id: i64) -> Result<Option<Group>>;
    // 通过名称获取小组信息
    async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>>;
    // 列出小组
    async fn list_groups_with_pagination(&self, query: GroupListQuery)
    -> Result<GroupListResponse>;
    // 更新小组信息
    async fn update_group(&self, group_id: i64, update: UpdateGroupRequest)
    -> Result<Option<Group>>;
    // 删除小组
    async fn delete_group(&self, group_id: i64) -> Result<bool>;
    // 向小组添加学生
    async fn add_group_student(&self, group_id: i64, student_id: i64) -> Result<GroupStudent>;
    // 从小组移除学生
    async fn remove_group_student(&self, group_id: i64, student_id: i64) -> Result<bool>;
    // 学生是否在小组中
    async fn is_group_student(&self, group_id: i64, student_id: i64) -> Result<bool>;
    // 列出小组成员
    async fn list_group_students(&self, group_id: i64) -> Result<Vec<User>>;

    /// 课程管理方法
    // 创建课程并在同一事务内写入参与记录快照
    async fn create_lesson(
        &self,
        teacher_id: i64,
        lesson: CreateLessonRequest,
        participant_ids: Vec<i64>,
    ) -> Result<Lesson>;
    // 通过ID获取课程信息
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // 列出课程
    async fn list_lessons_with_pagination(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse>;
    // 更新课程信息
    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    // 删除课程
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;
    // 列出课程参与记录
    async fn list_lesson_participants(&self, lesson_id: i64) -> Result<Vec<LessonParticipant>>;
    // 批量更新出勤/作业记录（记录归属已由服务层校验）
    async fn update_lesson_attendance(
        &self,
        lesson_id: i64,
        records: &[AttendanceRecord],
    ) -> Result<Vec<LessonParticipant>>;

    /// 仪表盘统计方法
    // 按角色统计用户数量
    async fn count_users_by_role(&self) -> Result<RoleCounts>;
    // 统计指定角色的用户数量
    async fn count_users_with_role(&self, role: UserRole) -> Result<i64>;
    // 统计小组数量（teacher_id 为 None 时统计全部）
    async fn count_groups(&self, teacher_id: Option<i64>) -> Result<i64>;
    // 统计课程数量（teacher_id 为 None 时统计全部）
    async fn count_lessons(&self, teacher_id: Option<i64>) -> Result<i64>;
    // 统计教师名下的学生数量
    async fn count_teacher_students(&self, teacher_id: i64) -> Result<i64>;
    // 统计学生的出勤情况
    async fn attendance_summary(&self, student_id: i64) -> Result<AttendanceSummary>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
