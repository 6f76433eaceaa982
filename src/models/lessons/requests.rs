use super::entities::{HomeworkState, Presence};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    // 起止时间过滤（RFC 3339）
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub group_id: Option<i64>,
}

// 创建课程请求
//
// # teacher_id 字段说明
// - **教师创建**：可选字段，不填写则自动使用当前登录教师的 ID
// - **管理员创建**：必填字段，用于指定授课教师
//
// # 课程对象
// group_id 与 student_id 必须恰好填写其一
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct CreateLessonRequest {
    pub teacher_id: Option<i64>,
    pub group_id: Option<i64>,
    pub student_id: Option<i64>,
    pub topic: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
}

// 更新课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct UpdateLessonRequest {
    pub topic: Option<String>,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_minutes: Option<i32>,
}

// 单个参与记录更新
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct AttendanceRecord {
    pub student_id: i64,
    pub presence: Presence,
    pub homework: HomeworkState,
    pub note: Option<String>,
}

// 出勤/作业批量更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct UpdateAttendanceRequest {
    pub records: Vec<AttendanceRecord>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub group_id: Option<i64>,
    // 按参与学生筛选（学生视角）
    pub participant_id: Option<i64>,
    // 按多个参与学生筛选（家长视角）
    pub participant_ids: Option<Vec<i64>>,
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
}
