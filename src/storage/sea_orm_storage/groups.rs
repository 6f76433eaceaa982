//! 小组及小组成员存储操作

use super::SeaOrmStorage;
use crate::entity::group_students::{
    ActiveModel as GroupStudentActiveModel, Column as GroupStudentColumn, Entity as GroupStudents,
};
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::errors::{EduAdminError, Result};
use crate::models::{
    PaginationInfo,
    groups::{
        entities::{Group, GroupStudent},
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
    users::entities::User,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建小组
    pub async fn create_group_impl(
        &self,
        teacher_id: i64,
        req: CreateGroupRequest,
    ) -> Result<Group> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            group_name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| super::map_insert_err("创建小组失败", e))?;

        Ok(result.into_group())
    }

    /// 通过 ID 获取小组
    pub async fn get_group_by_id_impl(&self, group_id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(group_id)
            .one(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 通过名称获取小组
    pub async fn get_group_by_name_impl(&self, name: &str) -> Result<Option<Group>> {
        let result = Groups::find()
            .filter(Column::GroupName.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 分页列出小组
    pub async fn list_groups_with_pagination_impl(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Groups::find();

        // 教师视角：只看自己负责的小组
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 成员视角：只看指定学生所在的小组
        let mut member_ids: Vec<i64> = Vec::new();
        if let Some(student_id) = query.student_id {
            member_ids.push(student_id);
        }
        if let Some(ref ids) = query.student_ids {
            member_ids.extend(ids.iter().copied());
        }
        if !member_ids.is_empty() {
            let memberships = GroupStudents::find()
                .filter(GroupStudentColumn::StudentId.is_in(member_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    EduAdminError::database_operation(format!("查询小组成员关联失败: {e}"))
                })?;

            let group_ids: Vec<i64> = memberships.iter().map(|m| m.group_id).collect();

            if group_ids.is_empty() {
                return Ok(GroupListResponse {
                    items: vec![],
                    pagination: PaginationInfo {
                        page: page as i64,
                        page_size: size as i64,
                        total: 0,
                        total_pages: 0,
                    },
                });
            }

            select = select.filter(Column::Id.is_in(group_ids));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::GroupName.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组页数失败: {e}")))?;

        let groups = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组列表失败: {e}")))?;

        Ok(GroupListResponse {
            items: groups.into_iter().map(|m| m.into_group()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新小组信息
    pub async fn update_group_impl(
        &self,
        group_id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        // 先检查小组是否存在
        let existing = self.get_group_by_id_impl(group_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(group_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.group_name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("更新小组失败: {e}")))?;

        Ok(Some(result.into_group()))
    }

    /// 删除小组（成员关联与课程由外键级联删除）
    pub async fn delete_group_impl(&self, group_id: i64) -> Result<bool> {
        let result = Groups::delete_by_id(group_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("删除小组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 向小组添加学生
    ///
    /// 重复添加由唯一索引拒绝，调用方需先行检查
    pub async fn add_group_student_impl(
        &self,
        group_id: i64,
        student_id: i64,
    ) -> Result<GroupStudent> {
        let model = GroupStudentActiveModel {
            group_id: Set(group_id),
            student_id: Set(student_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| super::map_insert_err("添加小组成员失败", e))?;

        Ok(result.into_group_student())
    }

    /// 从小组移除学生
    pub async fn remove_group_student_impl(&self, group_id: i64, student_id: i64) -> Result<bool> {
        let result = GroupStudents::delete_many()
            .filter(
                Condition::all()
                    .add(GroupStudentColumn::GroupId.eq(group_id))
                    .add(GroupStudentColumn::StudentId.eq(student_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("移除小组成员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生是否在小组中
    pub async fn is_group_student_impl(&self, group_id: i64, student_id: i64) -> Result<bool> {
        let count = GroupStudents::find()
            .filter(
                Condition::all()
                    .add(GroupStudentColumn::GroupId.eq(group_id))
                    .add(GroupStudentColumn::StudentId.eq(student_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出小组成员
    pub async fn list_group_students_impl(&self, group_id: i64) -> Result<Vec<User>> {
        let memberships = GroupStudents::find()
            .filter(GroupStudentColumn::GroupId.eq(group_id))
            .all(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询小组成员失败: {e}")))?;

        let student_ids: Vec<i64> = memberships.iter().map(|m| m.student_id).collect();
        self.load_users_by_ids(student_ids).await
    }

    /// 统计小组数量
    pub async fn count_groups_impl(&self, teacher_id: Option<i64>) -> Result<i64> {
        let mut select = Groups::find();
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("统计小组数量失败: {e}")))?;

        Ok(count as i64)
    }
}
