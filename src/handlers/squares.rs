use actix_web::{web, HttpResponse, Result};

use crate::{
    database::models::SqrSquareInput,
    handlers::shared::parse_id_list,
    services::{SquareService, UserContext},
};

pub async fn get_squares(
    ctx: UserContext,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let squares = service.get_squares(&ctx).await?;
    Ok(HttpResponse::Ok().json(squares))
}

pub async fn get_square(
    path: web::Path<i64>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let square = service.get_square(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(square))
}

pub async fn create_square(
    input: web::Json<SqrSquareInput>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let square = service.create_square(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(square))
}

pub async fn update_square(
    path: web::Path<i64>,
    input: web::Json<SqrSquareInput>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let square = service
        .update_square(path.into_inner(), input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(square))
}

pub async fn delete_squares(
    path: web::Path<String>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let ids = parse_id_list(&path.into_inner())?;
    service.delete_squares(&ids).await?;
    Ok(HttpResponse::NoContent().finish())
}
