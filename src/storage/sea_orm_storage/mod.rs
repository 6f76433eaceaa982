//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod dashboard;
mod groups;
mod lessons;
mod relations;
mod users;

use crate::config::AppConfig;
use crate::errors::{EduAdminError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

// 插入错误归一化：唯一约束冲突映射为 UniqueViolation，其余保持数据库操作错误
pub(crate) fn map_insert_err(context: &str, e: sea_orm::DbErr) -> EduAdminError {
    match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
            EduAdminError::unique_violation(msg)
        }
        _ => EduAdminError::database_operation(format!("{context}: {e}")),
    }
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduAdminError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduAdminError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EduAdminError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduAdminError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    // 学生分配模块
    async fn assign_student_to_teacher(&self, teacher_id: i64, student_id: i64) -> Result<()> {
        self.assign_student_to_teacher_impl(teacher_id, student_id)
            .await
    }

    async fn unassign_student_from_teacher(
        &self,
        teacher_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        self.unassign_student_from_teacher_impl(teacher_id, student_id)
            .await
    }

    async fn is_teacher_student(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        self.is_teacher_student_impl(teacher_id, student_id).await
    }

    async fn list_teacher_students(&self, teacher_id: i64) -> Result<Vec<User>> {
        self.list_teacher_students_impl(teacher_id).await
    }

    async fn assign_student_to_parent(&self, parent_id: i64, student_id: i64) -> Result<()> {
        self.assign_student_to_parent_impl(parent_id, student_id)
            .await
    }

    async fn unassign_student_from_parent(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.unassign_student_from_parent_impl(parent_id, student_id)
            .await
    }

    async fn is_parent_student(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.is_parent_student_impl(parent_id, student_id).await
    }

    async fn list_parent_students(&self, parent_id: i64) -> Result<Vec<User>> {
        self.list_parent_students_impl(parent_id).await
    }

    async fn count_student_links(&self, student_id: i64) -> Result<i64> {
        self.count_student_links_impl(student_id).await
    }

    // 小组模块
    async fn create_group(&self, teacher_id: i64, group: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(teacher_id, group).await
    }

    async fn get_group_by_id(&self, group_id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(group_id).await
    }

    async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.get_group_by_name_impl(name).await
    }

    async fn list_groups_with_pagination(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        self.list_groups_with_pagination_impl(query).await
    }

    async fn update_group(
        &self,
        group_id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        self.update_group_impl(group_id, update).await
    }

    async fn delete_group(&self, group_id: i64) -> Result<bool> {
        self.delete_group_impl(group_id).await
    }

    async fn add_group_student(&self, group_id: i64, student_id: i64) -> Result<GroupStudent> {
        self.add_group_student_impl(group_id, student_id).await
    }

    async fn remove_group_student(&self, group_id: i64, student_id: i64) -> Result<bool> {
        self.remove_group_student_impl(group_id, student_id).await
    }

    async fn is_group_student(&self, group_id: i64, student_id: i64) -> Result<bool> {
        self.is_group_student_impl(group_id, student_id).await
    }

    async fn list_group_students(&self, group_id: i64) -> Result<Vec<User>> {
        self.list_group_students_impl(group_id).await
    }

    // 课程模块
    async fn create_lesson(
        &self,
        teacher_id: i64,
        lesson: CreateLessonRequest,
        participant_ids: Vec<i64>,
    ) -> Result<Lesson> {
        self.create_lesson_impl(teacher_id, lesson, participant_ids)
            .await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_lessons_with_pagination(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse> {
        self.list_lessons_with_pagination_impl(query).await
    }

    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(lesson_id, update).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    async fn list_lesson_participants(&self, lesson_id: i64) -> Result<Vec<LessonParticipant>> {
        self.list_lesson_participants_impl(lesson_id).await
    }

    async fn update_lesson_attendance(
        &self,
        lesson_id: i64,
        records: &[AttendanceRecord],
    ) -> Result<Vec<LessonParticipant>> {
        self.update_lesson_attendance_impl(lesson_id, records).await
    }

    // 仪表盘模块
    async fn count_users_by_role(&self) -> Result<RoleCounts> {
        self.count_users_by_role_impl().await
    }

    async fn count_users_with_role(&self, role: UserRole) -> Result<i64> {
        self.count_users_with_role_impl(role).await
    }

    async fn count_groups(&self, teacher_id: Option<i64>) -> Result<i64> {
        self.count_groups_impl(teacher_id).await
    }

    async fn count_lessons(&self, teacher_id: Option<i64>) -> Result<i64> {
        self.count_lessons_impl(teacher_id).await
    }

    async fn count_teacher_students(&self, teacher_id: i64) -> Result<i64> {
        self.count_teacher_students_impl(teacher_id).await
    }

    async fn attendance_summary(&self, student_id: i64) -> Result<AttendanceSummary> {
        self.attendance_summary_impl(student_id).await
    }
}
