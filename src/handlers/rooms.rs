use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::{ApiError, ApiResult};
use crate::models::room::{CreateRoom, CreateRoomType, Room, RoomFilter, RoomStatus, RoomType};
use crate::services::pricing;

/// Public availability search by capacity and bed type.
pub async fn filter_rooms(
    pool: web::Data<SqlitePool>,
    params: web::Query<RoomFilter>,
) -> ApiResult<HttpResponse> {
    let (adults, children, bed_type) = match (params.adults, params.children, params.bed_type) {
        (Some(a), Some(c), Some(b)) => (a, c, b),
        _ => {
            return Err(ApiError::Validation(
                "Please provide capacity (adults and children) and bed type.".to_string(),
            ))
        }
    };

    let rooms = sqlx::query_as::<_, Room>(
        r#"
        SELECT * FROM rooms
        WHERE adults >= ? AND children >= ? AND bed_type = ? AND status = ?
        ORDER BY room_number
        "#,
    )
    .bind(adults)
    .bind(children)
    .bind(bed_type)
    .bind(RoomStatus::Available)
    .fetch_all(pool.get_ref())
    .await?;

    if rooms.is_empty() {
        return Err(ApiError::NotFound(
            "No rooms available with the specified capacity and bed type.".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true, "rooms": rooms })))
}

pub async fn create_room_type(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateRoomType>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let inserted = sqlx::query("INSERT INTO room_types (type_name, description) VALUES (?, ?)")
        .bind(&body.type_name)
        .bind(&body.description)
        .execute(pool.get_ref())
        .await
        .map_err(|e| conflict_on_unique(e, "Room type already exists."))?;

    let room_type = sqlx::query_as::<_, RoomType>("SELECT * FROM room_types WHERE id = ?")
        .bind(inserted.last_insert_rowid())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Created().json(json!({ "success": true, "roomType": room_type })))
}

pub async fn list_room_types(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let room_types = sqlx::query_as::<_, RoomType>("SELECT * FROM room_types ORDER BY type_name")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "roomTypes": room_types })))
}

pub async fn create_room(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateRoom>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let type_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM room_types WHERE id = ?")
        .bind(body.room_type_id)
        .fetch_optional(pool.get_ref())
        .await?;
    if type_exists.is_none() {
        return Err(ApiError::NotFound("Room type not found".to_string()));
    }

    let total_price = pricing::room_total_price(body.price_per_night, body.tax);

    let inserted = sqlx::query(
        r#"
        INSERT INTO rooms (room_type_id, room_number, floor, bed_type, adults, children,
                           price_per_night, tax, total_price, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(body.room_type_id)
    .bind(&body.room_number)
    .bind(&body.floor)
    .bind(body.bed_type)
    .bind(body.adults)
    .bind(body.children)
    .bind(body.price_per_night)
    .bind(body.tax)
    .bind(total_price)
    .bind(RoomStatus::Available)
    .execute(pool.get_ref())
    .await
    .map_err(|e| conflict_on_unique(e, "Room number already exists."))?;

    let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
        .bind(inserted.last_insert_rowid())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Created().json(json!({ "success": true, "room": room })))
}

pub async fn list_rooms(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let rooms = sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY room_number")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "rooms": rooms })))
}

fn conflict_on_unique(e: sqlx::Error, message: &str) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict(message.to_string())
        }
        _ => ApiError::from(e),
    }
}
