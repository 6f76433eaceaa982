use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, current_user};
use crate::models::{
    ApiResponse, ErrorCode, PaginationInfo,
    groups::{
        requests::{GroupListQuery, GroupQueryParams},
        responses::GroupListResponse,
    },
    users::entities::{User, UserRole},
};

// 按当前用户角色构造存储层查询；家长视角需要先解析子女列表
fn scoped_query(user: &User, children_ids: Vec<i64>, params: GroupQueryParams) -> GroupListQuery {
    let mut query = GroupListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        search: params.search,
        ..Default::default()
    };

    match user.role {
        UserRole::Admin => {}
        UserRole::Teacher => query.teacher_id = Some(user.id),
        UserRole::Student => query.student_id = Some(user.id),
        UserRole::Parent => query.student_ids = Some(children_ids),
    }

    query
}

pub async fn list_groups(
    service: &GroupService,
    params: GroupQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 家长：先取子女名单，没有子女时直接返回空列表
    let children_ids = if current_user.role == UserRole::Parent {
        match storage.list_parent_students(current_user.id).await {
            Ok(children) => {
                if children.is_empty() {
                    return Ok(HttpResponse::Ok().json(ApiResponse::success(
                        GroupListResponse {
                            items: vec![],
                            pagination: PaginationInfo {
                                page: params.pagination.page,
                                page_size: params.pagination.size,
                                total: 0,
                                total_pages: 0,
                            },
                        },
                        "Groups retrieved successfully",
                    )));
                }
                children.into_iter().map(|c| c.id).collect()
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve children: {e}"),
                    )),
                );
            }
        }
    } else {
        Vec::new()
    };

    let query = scoped_query(&current_user, children_ids, params);

    match storage.list_groups_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Groups retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve groups: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use crate::models::users::entities::{UserProfile, UserStatus};

    fn make_user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            profile: UserProfile {
                profile_name: String::new(),
                avatar_url: None,
            },
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn make_params() -> GroupQueryParams {
        GroupQueryParams {
            pagination: PaginationQuery { page: 2, size: 20 },
            search: Some("math".to_string()),
        }
    }

    #[test]
    fn test_admin_query_is_unscoped() {
        let query = scoped_query(&make_user(1, UserRole::Admin), vec![], make_params());
        assert!(query.teacher_id.is_none());
        assert!(query.student_id.is_none());
        assert!(query.student_ids.is_none());
        assert_eq!(query.page, Some(2));
        assert_eq!(query.search.as_deref(), Some("math"));
    }

    #[test]
    fn test_teacher_query_scoped_to_self() {
        let query = scoped_query(&make_user(7, UserRole::Teacher), vec![], make_params());
        assert_eq!(query.teacher_id, Some(7));
        assert!(query.student_id.is_none());
    }

    #[test]
    fn test_student_query_scoped_to_membership() {
        let query = scoped_query(&make_user(9, UserRole::Student), vec![], make_params());
        assert_eq!(query.student_id, Some(9));
        assert!(query.teacher_id.is_none());
    }

    #[test]
    fn test_parent_query_scoped_to_children() {
        let query = scoped_query(&make_user(3, UserRole::Parent), vec![11, 12], make_params());
        assert_eq!(query.student_ids, Some(vec![11, 12]));
        assert!(query.student_id.is_none());
    }
}
