use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable};
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::books;
use crate::schema::genres;
use crate::schema::orders;
use crate::schema::users;

// Role / status / book type columns are stored as plain text; the enums below
// own the wire values and the text mapping

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role{
    User,
    Manager,
    Admin
}

impl Role {
    pub fn as_str(&self) -> &'static str{
        match self {
            Role::User => "USER",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN"
        }
    }

    pub fn parse(value: &str) -> Result<Role, String>{
        match value {
            "USER" => Ok(Role::User),
            "MANAGER" => Ok(Role::Manager),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("{} is not a valid role", other))
        }
    }

    pub fn is_staff(&self) -> bool{
        matches!(self, Role::Manager | Role::Admin)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus{
    Pending,
    Confirmed,
    Shipped,
    Cancelled
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str{
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Cancelled => "CANCELLED"
        }
    }

    pub fn parse(value: &str) -> Result<OrderStatus, String>{
        match value {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("{} is not a valid order status", other))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookType{
    Paper,
    Electronic,
    Audio
}

impl BookType {
    pub fn as_str(&self) -> &'static str{
        match self {
            BookType::Paper => "PAPER",
            BookType::Electronic => "ELECTRONIC",
            BookType::Audio => "AUDIO"
        }
    }
}

#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = books)]
pub struct Book{
    pub book_id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre_id: Uuid,
    pub book_type: String,
    pub price: f64,
    pub slug: String,
    pub isbn: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub rating: Option<f64>
}

#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = genres)]
pub struct Genre{
    pub genre_id: Uuid,
    pub name: String
}

// Full user row; carries the password hash and is never serialized out
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct User{
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub password: String,
    pub image: String,
    pub created_at: DateTime<Utc>
}

// Client-facing projection of a user, selected without the password column
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct UserView{
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub image: String
}

#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct Order{
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>
}

// One checkout line as returned to the buyer: the order row joined with the
// book it covers and the buyer it belongs to
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderReceipt{
    pub order: Order,
    pub book: Book,
    pub buyer: UserView
}
