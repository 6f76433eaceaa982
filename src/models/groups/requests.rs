use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 小组查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建小组请求
//
// # teacher_id 字段说明
// - **教师创建**：可选字段，不填写则自动使用当前登录教师的 ID
// - **管理员创建**：必填字段，用于指定负责该小组的教师
//
// # 权限验证
// - 教师：如果指定 teacher_id，必须等于自己的 ID
// - 管理员：必须指定 teacher_id，且该用户必须是教师角色
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct CreateGroupRequest {
    pub teacher_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

// 更新小组请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 添加小组成员请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct AddGroupStudentRequest {
    pub student_id: i64,
}

// 小组列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    // 按成员筛选：只返回该学生所在的小组
    pub student_id: Option<i64>,
    // 按多个成员筛选：返回任一学生所在的小组（家长视角）
    pub student_ids: Option<Vec<i64>>,
    pub search: Option<String>,
}
