use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 出勤状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub enum Presence {
    Present, // 出席
    Absent,  // 缺席
    Excused, // 请假
}

impl<'de> Deserialize<'de> for Presence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "present" => Ok(Presence::Present),
            "absent" => Ok(Presence::Absent),
            "excused" => Ok(Presence::Excused),
            _ => Err(serde::de::Error::custom(format!(
                "无效的出勤状态: '{s}'. 支持的状态: present, absent, excused"
            ))),
        }
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Presence::Present => write!(f, "present"),
            Presence::Absent => write!(f, "absent"),
            Presence::Excused => write!(f, "excused"),
        }
    }
}

impl std::str::FromStr for Presence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Presence::Present),
            "absent" => Ok(Presence::Absent),
            "excused" => Ok(Presence::Excused),
            _ => Err(format!("Invalid presence: {s}")),
        }
    }
}

// 作业完成状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub enum HomeworkState {
    Done,        // 已完成
    Partial,     // 部分完成
    Missing,     // 未完成
    NotAssigned, // 未布置
}

impl<'de> Deserialize<'de> for HomeworkState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "done" => Ok(HomeworkState::Done),
            "partial" => Ok(HomeworkState::Partial),
            "missing" => Ok(HomeworkState::Missing),
            "not_assigned" => Ok(HomeworkState::NotAssigned),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: done, partial, missing, not_assigned"
            ))),
        }
    }
}

impl std::fmt::Display for HomeworkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkState::Done => write!(f, "done"),
            HomeworkState::Partial => write!(f, "partial"),
            HomeworkState::Missing => write!(f, "missing"),
            HomeworkState::NotAssigned => write!(f, "not_assigned"),
        }
    }
}

impl std::str::FromStr for HomeworkState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(HomeworkState::Done),
            "partial" => Ok(HomeworkState::Partial),
            "missing" => Ok(HomeworkState::Missing),
            "not_assigned" => Ok(HomeworkState::NotAssigned),
            _ => Err(format!("Invalid homework state: {s}")),
        }
    }
}

// 课程实体
//
// group_id 与 student_id 二者有且仅有其一（由服务层校验）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub teacher_id: i64,
    pub group_id: Option<i64>,
    pub student_id: Option<i64>,
    pub topic: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程参与记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonParticipant {
    pub id: i64,
    pub lesson_id: i64,
    pub student_id: i64,
    pub presence: Presence,
    pub homework: HomeworkState,
    pub note: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_presence_round_trip() {
        for s in ["present", "absent", "excused"] {
            assert_eq!(Presence::from_str(s).unwrap().to_string(), s);
        }
        assert!(Presence::from_str("late").is_err());
    }

    #[test]
    fn test_homework_state_round_trip() {
        for s in ["done", "partial", "missing", "not_assigned"] {
            assert_eq!(HomeworkState::from_str(s).unwrap().to_string(), s);
        }
        assert!(HomeworkState::from_str("graded").is_err());
    }
}
