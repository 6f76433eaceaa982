//! 课程及参与记录存储操作

use super::SeaOrmStorage;
use crate::entity::lesson_participants::{
    ActiveModel as ParticipantActiveModel, Column as ParticipantColumn,
    Entity as LessonParticipants,
};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{EduAdminError, Result};
use crate::models::{
    PaginationInfo,
    lessons::{
        entities::{HomeworkState, Lesson, LessonParticipant, Presence},
        requests::{AttendanceRecord, CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
        responses::LessonListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程并在同一事务内写入参与记录快照
    ///
    /// participant_ids 由服务层根据课程对象（小组成员或单个学生）解析
    pub async fn create_lesson_impl(
        &self,
        teacher_id: i64,
        req: CreateLessonRequest,
        participant_ids: Vec<i64>,
    ) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            group_id: Set(req.group_id),
            student_id: Set(req.student_id),
            topic: Set(req.topic),
            scheduled_at: Set(req.scheduled_at.timestamp()),
            duration_minutes: Set(req.duration_minutes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let lesson = model
            .insert(&txn)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("创建课程失败: {e}")))?;

        if !participant_ids.is_empty() {
            let participants: Vec<ParticipantActiveModel> = participant_ids
                .into_iter()
                .map(|student_id| ParticipantActiveModel {
                    lesson_id: Set(lesson.id),
                    student_id: Set(student_id),
                    presence: Set(Presence::Present.to_string()),
                    homework: Set(HomeworkState::NotAssigned.to_string()),
                    note: Set(None),
                    updated_at: Set(now),
                    ..Default::default()
                })
                .collect();

            LessonParticipants::insert_many(participants)
                .exec(&txn)
                .await
                .map_err(|e| {
                    EduAdminError::database_operation(format!("写入课程参与记录失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(lesson.into_lesson())
    }

    /// 通过 ID 获取课程
    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 分页列出课程
    pub async fn list_lessons_with_pagination_impl(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Lessons::find();

        // 教师视角：只看自己授课的课程
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 小组筛选
        if let Some(group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }

        // 参与学生视角：学生本人或家长的多个子女
        let mut participant_ids: Vec<i64> = Vec::new();
        if let Some(participant_id) = query.participant_id {
            participant_ids.push(participant_id);
        }
        if let Some(ref ids) = query.participant_ids {
            participant_ids.extend(ids.iter().copied());
        }
        if !participant_ids.is_empty() {
            let records = LessonParticipants::find()
                .filter(ParticipantColumn::StudentId.is_in(participant_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    EduAdminError::database_operation(format!("查询课程参与记录失败: {e}"))
                })?;

            let lesson_ids: Vec<i64> = records.iter().map(|r| r.lesson_id).collect();

            if lesson_ids.is_empty() {
                return Ok(LessonListResponse {
                    items: vec![],
                    pagination: PaginationInfo {
                        page: page as i64,
                        page_size: size as i64,
                        total: 0,
                        total_pages: 0,
                    },
                });
            }

            select = select.filter(Column::Id.is_in(lesson_ids));
        }

        // 起止时间过滤
        if let Some(from) = query.from {
            select = select.filter(Column::ScheduledAt.gte(from.timestamp()));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::ScheduledAt.lte(to.timestamp()));
        }

        // 按上课时间升序（日程视角）
        select = select.order_by_asc(Column::ScheduledAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询课程页数失败: {e}")))?;

        let lessons = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(LessonListResponse {
            items: lessons.into_iter().map(|m| m.into_lesson()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程信息
    pub async fn update_lesson_impl(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        // 先检查课程是否存在
        let existing = self.get_lesson_by_id_impl(lesson_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(lesson_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(topic) = update.topic {
            model.topic = Set(topic);
        }

        if let Some(scheduled_at) = update.scheduled_at {
            model.scheduled_at = Set(scheduled_at.timestamp());
        }

        if let Some(duration_minutes) = update.duration_minutes {
            model.duration_minutes = Set(duration_minutes);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(result.into_lesson()))
    }

    /// 删除课程（参与记录由外键级联删除）
    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(lesson_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程参与记录
    pub async fn list_lesson_participants_impl(
        &self,
        lesson_id: i64,
    ) -> Result<Vec<LessonParticipant>> {
        let records = LessonParticipants::find()
            .filter(ParticipantColumn::LessonId.eq(lesson_id))
            .order_by_asc(ParticipantColumn::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| {
                EduAdminError::database_operation(format!("查询课程参与记录失败: {e}"))
            })?;

        Ok(records.into_iter().map(|m| m.into_participant()).collect())
    }

    /// 批量更新出勤/作业记录
    ///
    /// 记录归属已由服务层校验，整批在同一事务内写入
    pub async fn update_lesson_attendance_impl(
        &self,
        lesson_id: i64,
        records: &[AttendanceRecord],
    ) -> Result<Vec<LessonParticipant>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("开启事务失败: {e}")))?;

        for record in records {
            LessonParticipants::update_many()
                .col_expr(
                    ParticipantColumn::Presence,
                    sea_orm::sea_query::Expr::value(record.presence.to_string()),
                )
                .col_expr(
                    ParticipantColumn::Homework,
                    sea_orm::sea_query::Expr::value(record.homework.to_string()),
                )
                .col_expr(
                    ParticipantColumn::Note,
                    sea_orm::sea_query::Expr::value(record.note.clone()),
                )
                .col_expr(
                    ParticipantColumn::UpdatedAt,
                    sea_orm::sea_query::Expr::value(now),
                )
                .filter(
                    Condition::all()
                        .add(ParticipantColumn::LessonId.eq(lesson_id))
                        .add(ParticipantColumn::StudentId.eq(record.student_id)),
                )
                .exec(&txn)
                .await
                .map_err(|e| {
                    EduAdminError::database_operation(format!("更新出勤记录失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| EduAdminError::database_operation(format!("提交事务失败: {e}")))?;

        self.list_lesson_participants_impl(lesson_id).await
    }

    /// 统计课程数量
    pub async fn count_lessons_impl(&self, teacher_id: Option<i64>) -> Result<i64> {
        let mut select = Lessons::find();
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| EduAdminError::database_operation(format!("统计课程数量失败: {e}")))?;

        Ok(count as i64)
    }
}
