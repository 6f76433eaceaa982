//! 教师/家长与学生的分配关系存储操作

use super::SeaOrmStorage;
use crate::entity::group_students::{Column as GroupStudentColumn, Entity as GroupStudents};
use crate::entity::parent_students::{
    ActiveModel as ParentStudentActiveModel, Column as ParentStudentColumn,
    Entity as ParentStudents,
};
use crate::entity::teacher_students::{
    ActiveModel as TeacherStudentActiveModel, Column as TeacherStudentColumn,
    Entity as TeacherStudents,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduAdminError, Result};
use crate::models::users::entities::User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 将学生分配给教师
    ///
    /// 重复分配由唯一索引拒绝，调用方需先行检查
    pub async fn assign_student_to_teacher_impl(
        &self,
        teacher_id: i64,
        student_id: i64,
    ) -> Result<()> {
        let model = TeacherStudentActiveModel {
            teacher_id: Set(teacher_id),
            student_id: Set(student_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| super::map_insert_err("分配学生失败", e))?;

        Ok(())
    }

    /// 解除教师与学生的分配关系
    pub async fn unassign_student_from_teacher_impl(
        &self,
        teacher_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let result = TeacherStudents::delete_many()
            .filter(
                Condition::all()
                    .add(TeacherStudentColumn::TeacherId.eq(teacher_id))
                    .add(TeacherStudentColumn::StudentId.eq(student_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("解除学生分配失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生是否已分配给教师
    pub async fn is_teacher_student_impl(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        let count = TeacherStudents::find()
            .filter(
                Condition::all()
                    .add(TeacherStudentColumn::TeacherId.eq(teacher_id))
                    .add(TeacherStudentColumn::StudentId.eq(student_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询学生分配失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出教师名下的学生
    pub async fn list_teacher_students_impl(&self, teacher_id: i64) -> Result<Vec<User>> {
        let records = TeacherStudents::find()
            .filter(TeacherStudentColumn::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询学生分配失败: {e}")))?;

        let student_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
        self.load_users_by_ids(student_ids).await
    }

    /// 将学生（子女）关联到家长
    pub async fn assign_student_to_parent_impl(
        &self,
        parent_id: i64,
        student_id: i64,
    ) -> Result<()> {
        let model = ParentStudentActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| super::map_insert_err("关联子女失败", e))?;

        Ok(())
    }

    /// 解除家长与学生的关联关系
    pub async fn unassign_student_from_parent_impl(
        &self,
        parent_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let result = ParentStudents::delete_many()
            .filter(
                Condition::all()
                    .add(ParentStudentColumn::ParentId.eq(parent_id))
                    .add(ParentStudentColumn::StudentId.eq(student_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("解除子女关联失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生是否已关联到家长
    pub async fn is_parent_student_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let count = ParentStudents::find()
            .filter(
                Condition::all()
                    .add(ParentStudentColumn::ParentId.eq(parent_id))
                    .add(ParentStudentColumn::StudentId.eq(student_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询子女关联失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出家长名下的学生
    pub async fn list_parent_students_impl(&self, parent_id: i64) -> Result<Vec<User>> {
        let records = ParentStudents::find()
            .filter(ParentStudentColumn::ParentId.eq(parent_id))
            .all(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询子女关联失败: {e}")))?;

        let student_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
        self.load_users_by_ids(student_ids).await
    }

    /// 统计学生被引用的关系数量
    ///
    /// 覆盖师生分配、家长关联和小组成员三张关系表
    pub async fn count_student_links_impl(&self, student_id: i64) -> Result<i64> {
        let teachers = TeacherStudents::find()
            .filter(TeacherStudentColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询学生分配失败: {e}")))?;

        let parents = ParentStudents::find()
            .filter(ParentStudentColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询子女关联失败: {e}")))?;

        let groups = GroupStudents::find()
            .filter(GroupStudentColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok((teachers + parents + groups) as i64)
    }

    /// 统计教师名下的学生数量
    pub async fn count_teacher_students_impl(&self, teacher_id: i64) -> Result<i64> {
        let count = TeacherStudents::find()
            .filter(TeacherStudentColumn::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 按 ID 列表批量加载用户
    pub(crate) async fn load_users_by_ids(&self, ids: Vec<i64>) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(ids))
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("批量查询用户失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }
}
