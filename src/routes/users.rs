use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    AssignStudentRequest, CreateUserRequest, UpdateUserRequest, UserListParams,
};
use crate::services::UserService;
use crate::utils::{SafeStudentIdI64, SafeUserIdI64};

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeUserIdI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(user_id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: SafeUserIdI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeUserIdI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.0, &req).await
}

pub async fn list_assigned_students(
    req: HttpRequest,
    owner_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_assigned_students(owner_id.0, &req).await
}

pub async fn assign_student(
    req: HttpRequest,
    owner_id: SafeUserIdI64,
    assign_data: web::Json<AssignStudentRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .assign_student(owner_id.0, assign_data.into_inner(), &req)
        .await
}

pub async fn unassign_student(
    req: HttpRequest,
    owner_id: SafeUserIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .unassign_student(owner_id.0, student_id.0, &req)
        .await
}

// 配置路由
//
// 用户的增删改与列表仅限管理员；单个用户详情和名下学生管理
// 由服务层按「管理员 / 本人 / 名下关系」校验。
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("/{user_id}/students")
                    .route("", web::get().to(list_assigned_students))
                    .route("", web::post().to(assign_student))
                    .route("/{student_id}", web::delete().to(unassign_student)),
            )
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_users)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_user)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{user_id}")
                    .route(web::get().to(get_user))
                    .route(
                        web::put()
                            .to(update_user)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_user)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
