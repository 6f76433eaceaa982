use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, current_user};
use crate::models::{
    ApiResponse, ErrorCode, PaginationInfo,
    lessons::{
        requests::{LessonListQuery, LessonQueryParams},
        responses::LessonListResponse,
    },
    users::entities::{User, UserRole},
};

// 按当前用户角色构造存储层查询；家长视角需要先解析子女列表
fn scoped_query(user: &User, children_ids: Vec<i64>, params: LessonQueryParams) -> LessonListQuery {
    let mut query = LessonListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        group_id: params.group_id,
        from: params.from,
        to: params.to,
        ..Default::default()
    };

    match user.role {
        UserRole::Admin => {}
        UserRole::Teacher => query.teacher_id = Some(user.id),
        UserRole::Student => query.participant_id = Some(user.id),
        UserRole::Parent => query.participant_ids = Some(children_ids),
    }

    query
}

pub async fn list_lessons(
    service: &LessonService,
    params: LessonQueryParams,
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
                        LessonListResponse {
                            items: vec![],
                            pagination: PaginationInfo {
                                page: params.pagination.page,
                                page_size: params.pagination.size,
                                total: 0,
                                total_pages: 0,
                            },
                        },
                        "Lessons retrieved successfully",
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

    match storage.list_lessons_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lessons retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve lessons: {e}"),
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

    fn make_params() -> LessonQueryParams {
        LessonQueryParams {
            pagination: PaginationQuery { page: 1, size: 10 },
            from: None,
            to: Some(chrono::Utc::now()),
            group_id: Some(6),
        }
    }

    #[test]
    fn test_admin_query_is_unscoped() {
        let query = scoped_query(&make_user(1, UserRole::Admin), vec![], make_params());
        assert!(query.teacher_id.is_none());
        assert!(query.participant_id.is_none());
        assert_eq!(query.group_id, Some(6));
        assert!(query.to.is_some());
    }

    #[test]
    fn test_teacher_query_scoped_to_self() {
        let query = scoped_query(&make_user(7, UserRole::Teacher), vec![], make_params());
        assert_eq!(query.teacher_id, Some(7));
    }

    #[test]
    fn test_student_query_scoped_to_participation() {
        let query = scoped_query(&make_user(9, UserRole::Student), vec![], make_params());
        assert_eq!(query.participant_id, Some(9));
        assert!(query.teacher_id.is_none());
    }

    #[test]
    fn test_parent_query_scoped_to_children() {
        let query = scoped_query(&make_user(3, UserRole::Parent), vec![11, 12], make_params());
        assert_eq!(query.participant_ids, Some(vec![11, 12]));
    }
}
