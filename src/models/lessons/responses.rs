use super::entities::{Lesson, LessonParticipant};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Lesson>,
}

// 课程详情响应（含参与记录）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonDetailResponse {
    pub lesson: Lesson,
    pub participants: Vec<LessonParticipant>,
}
