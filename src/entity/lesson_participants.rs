//! 课程参与记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson_participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub lesson_id: i64,
    pub student_id: i64,
    pub presence: String,
    pub homework: String,
    pub note: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lessons::Entity",
        from = "Column::LessonId",
        to = "super::lessons::Column::Id"
    )]
    Lesson,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_participant(self) -> crate::models::lessons::entities::LessonParticipant {
        use crate::models::lessons::entities::{HomeworkState, LessonParticipant, Presence};
        use chrono::{DateTime, Utc};

        LessonParticipant {
            id: self.id,
            lesson_id: self.lesson_id,
            student_id: self.student_id,
            presence: self.presence.parse::<Presence>().unwrap_or(Presence::Absent),
            homework: self
                .homework
                .parse::<HomeworkState>()
                .unwrap_or(HomeworkState::NotAssigned),
            note: self.note,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
