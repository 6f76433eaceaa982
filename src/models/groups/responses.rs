use super::entities::Group;
use crate::models::common::PaginationInfo;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 小组列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Group>,
}

// 小组详情响应（含成员列表）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupDetailResponse {
    pub group: Group,
    pub students: Vec<User>,
}
