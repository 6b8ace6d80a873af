use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum RoomStatus {
    Available,
    Occupied,
    UnderMaintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BedType {
    Single,
    Double,
    Queen,
    King,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: i64,
    pub room_type_id: i64,
    pub room_number: String,
    pub floor: String,
    pub bed_type: BedType,
    pub adults: i64,
    pub children: i64,
    pub price_per_night: f64,
    pub tax: f64,
    /// Nightly price with tax folded in: `price_per_night * (1 + tax/100)`.
    pub total_price: f64,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoomType {
    pub id: i64,
    pub type_name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateRoomType {
    #[validate(length(min = 1, message = "type name is required"))]
    pub type_name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateRoom {
    pub room_type_id: i64,
    #[validate(length(min = 1, message = "room number is required"))]
    pub room_number: String,
    #[validate(length(min = 1, message = "floor is required"))]
    pub floor: String,
    pub bed_type: BedType,
    #[validate(range(min = 1))]
    pub adults: i64,
    #[validate(range(min = 0))]
    pub children: i64,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub tax: f64,
}

#[derive(Debug, Deserialize)]
pub struct RoomFilter {
    pub adults: Option<i64>,
    pub children: Option<i64>,
    pub bed_type: Option<BedType>,
}
