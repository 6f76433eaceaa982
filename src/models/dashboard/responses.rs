use crate::models::lessons::entities::Lesson;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 按角色统计的用户数
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RoleCounts {
    pub admins: i64,
    pub teachers: i64,
    pub students: i64,
    pub parents: i64,
}

// 出勤统计
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AttendanceSummary {
    pub present: i64,
    pub absent: i64,
    pub excused: i64,
}

// 管理员仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboard {
    pub users: RoleCounts,
    pub group_count: i64,
    pub lesson_count: i64,
    pub upcoming_lessons: Vec<Lesson>,
}

// 教师仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub group_count: i64,
    pub student_count: i64,
    pub lesson_count: i64,
    pub upcoming_lessons: Vec<Lesson>,
}

// 学生仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub attendance: AttendanceSummary,
    pub upcoming_lessons: Vec<Lesson>,
}

// 家长仪表盘中的单个子女
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ChildSummary {
    pub student: User,
    pub attendance: AttendanceSummary,
    pub upcoming_lessons: Vec<Lesson>,
}

// 家长仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ParentDashboard {
    pub children: Vec<ChildSummary>,
}
