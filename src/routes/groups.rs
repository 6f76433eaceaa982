use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::{
    AddGroupStudentRequest, CreateGroupRequest, GroupQueryParams, UpdateGroupRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GroupService;
use crate::utils::{SafeGroupIdI64, SafeStudentIdI64};

// 懒加载的全局 GroupService 实例
static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

// HTTP处理程序
pub async fn create_group(
    req: HttpRequest,
    group_data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .create_group(group_data.into_inner(), &req)
        .await
}

pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupQueryParams>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(query.into_inner(), &req).await
}

pub async fn get_group(req: HttpRequest, group_id: SafeGroupIdI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(group_id.0, &req).await
}

pub async fn update_group(
    req: HttpRequest,
    group_id: SafeGroupIdI64,
    update_data: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .update_group(group_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_group(req: HttpRequest, group_id: SafeGroupIdI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(group_id.0, &req).await
}

pub async fn add_group_student(
    req: HttpRequest,
    group_id: SafeGroupIdI64,
    add_data: web::Json<AddGroupStudentRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .add_student(group_id.0, add_data.into_inner(), &req)
        .await
}

pub async fn remove_group_student(
    req: HttpRequest,
    group_id: SafeGroupIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .remove_student(group_id.0, student_id.0, &req)
        .await
}

// 配置路由
//
// 创建与成员管理仅限教师/管理员进入，归属校验在服务层完成；
// 列表与详情对所有登录角色开放，按角色过滤可见范围。
pub fn configure_group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/groups")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("/{group_id}/students")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(add_group_student))
                    .route("/{student_id}", web::delete().to(remove_group_student)),
            )
            .service(
                web::resource("")
                    .route(web::get().to(list_groups))
                    .route(
                        web::post()
                            .to(create_group)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{group_id}")
                    .route(web::get().to(get_group))
                    .route(web::put().to(update_group))
                    .route(web::delete().to(delete_group)),
            ),
    );
}
