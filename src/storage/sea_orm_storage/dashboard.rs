//! 仪表盘统计存储操作

use super::SeaOrmStorage;
use crate::entity::lesson_participants::Column as ParticipantColumn;
use crate::entity::prelude::{LessonParticipants, Users};
use crate::entity::users::Column as UserColumn;
use crate::errors::{EduAdminError, Result};
use crate::models::{
    dashboard::responses::{AttendanceSummary, RoleCounts},
    lessons::entities::Presence,
    users::entities::UserRole,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 按角色统计用户数量
    pub async fn count_users_by_role_impl(&self) -> Result<RoleCounts> {
        Ok(RoleCounts {
            admins: self.count_users_with_role_impl(UserRole::Admin).await?,
            teachers: self.count_users_with_role_impl(UserRole::Teacher).await?,
            students: self.count_users_with_role_impl(UserRole::Student).await?,
            parents: self.count_users_with_role_impl(UserRole::Parent).await?,
        })
    }

    /// 统计指定角色的用户数量
    pub async fn count_users_with_role_impl(&self, role: UserRole) -> Result<i64> {
        let count = Users::find()
            .filter(UserColumn::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 统计学生的出勤情况
    pub async fn attendance_summary_impl(&self, student_id: i64) -> Result<AttendanceSummary> {
        Ok(AttendanceSummary {
            present: self
                .count_presence_impl(student_id, Presence::Present)
                .await?,
            absent: self
                .count_presence_impl(student_id, Presence::Absent)
                .await?,
            excused: self
                .count_presence_impl(student_id, Presence::Excused)
                .await?,
        })
    }

    async fn count_presence_impl(&self, student_id: i64, presence: Presence) -> Result<i64> {
        let count = LessonParticipants::find()
            .filter(
                Condition::all()
                    .add(ParticipantColumn::StudentId.eq(student_id))
                    .add(ParticipantColumn::Presence.eq(presence.to_string())),
            )
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("统计出勤情况失败: {e}")))?;

        Ok(count as i64)
    }
}
