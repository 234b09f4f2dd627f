use actix_web::{web, HttpResponse, Result};

use crate::services::SquareService;

pub async fn get_square_timers(
    path: web::Path<i64>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let timers = service.get_square_timers(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(timers))
}

pub async fn get_timer_details(
    path: web::Path<(i64, i64)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, timer_id) = path.into_inner();
    let details = service.get_timer_details(square_id, timer_id).await?;
    Ok(HttpResponse::Ok().json(details))
}

pub async fn recreate_timers(
    path: web::Path<i64>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    service.recreate_timers(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn set_all_timer_count(
    path: web::Path<(i64, i64)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, count) = path.into_inner();
    service.set_timer_count(square_id, count, None).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn set_timer_count(
    path: web::Path<(i64, i64, i64)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, timer_id, count) = path.into_inner();
    service
        .set_timer_count(square_id, count, Some(timer_id))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
