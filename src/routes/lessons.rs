use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lessons::requests::{
    CreateLessonRequest, LessonQueryParams, UpdateAttendanceRequest, UpdateLessonRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LessonService;
use crate::utils::SafeLessonIdI64;

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

// HTTP处理程序
pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(lesson_data.into_inner(), &req)
        .await
}

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonQueryParams>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(query.into_inner(), &req).await
}

pub async fn get_lesson(req: HttpRequest, lesson_id: SafeLessonIdI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(lesson_id.0, &req).await
}

pub async fn update_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
    update_data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(lesson_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(lesson_id.0, &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
    attendance_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_attendance(lesson_id.0, attendance_data.into_inner(), &req)
        .await
}

// 配置路由
//
// 创建与出勤登记仅限教师/管理员进入，归属校验在服务层完成；
// 列表与详情对所有登录角色开放，按角色过滤可见范围。
pub fn configure_lesson_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lessons")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{lesson_id}/attendance")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(update_attendance)),
            )
            .service(
                web::resource("")
                    .route(web::get().to(list_lessons))
                    .route(
                        web::post()
                            .to(create_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{lesson_id}")
                    .route(web::get().to(get_lesson))
                    .route(web::put().to(update_lesson))
                    .route(web::delete().to(delete_lesson)),
            ),
    );
}
