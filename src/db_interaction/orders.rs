use std::collections::HashMap;
use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::Utc;
use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Book, Order, OrderReceipt, OrderStatus, UserView};
use crate::schema::{books, orders, users};
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::{error_fmt_chain, DbConnection};

type UserViewColumns = (
    users::user_id,
    users::email,
    users::first_name,
    users::last_name,
    users::role,
    users::image
);

const BUYER_COLUMNS: UserViewColumns = (
    users::user_id,
    users::email,
    users::first_name,
    users::last_name,
    users::role,
    users::image
);

// Errors associated with materializing a cart into order rows
#[derive(Error)]
pub enum CheckoutError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("checkout stopped after {created} of {requested} orders were committed")]
    PartialFailure{
        created: usize,
        requested: usize,
        #[source]
        source: diesel::result::Error
    },
    #[error("buyer account doesn't exist")]
    NoBuyerError,
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

/// Creates one PENDING order row per submitted book id, duplicates included.
/// The inserts are deliberately issued one by one with no wrapping
/// transaction: a failure partway through leaves the earlier rows committed
/// and is reported via `PartialFailure` with the committed count.
#[tracing::instrument(
    "Creating order rows for checkout",
    skip(conn, book_ids)
)]
pub async fn create_orders(
    mut conn: DbConnection,
    book_ids: Vec<Uuid>,
    user_id: Uuid
) -> Result<Vec<OrderReceipt>, CheckoutError>{
    let requested = book_ids.len();

    let receipts = spawn_blocking_with_tracing(move || {
        let buyer: UserView = users::table
            .select(BUYER_COLUMNS)
            .filter(users::user_id.eq(user_id))
            .first::<UserView>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => CheckoutError::NoBuyerError,
                other => CheckoutError::RunQueryError(other)
            })?;

        let mut receipts: Vec<OrderReceipt> = Vec::with_capacity(requested);
        let mut resolved_books: HashMap<Uuid, Book> = HashMap::new();
        let mut created = 0_usize;

        for book_id in book_ids {
            let order = Order{
                order_id: Uuid::new_v4(),
                book_id,
                user_id,
                status: OrderStatus::Pending.as_str().to_string(),
                created_at: Utc::now()
            };

            let order: Order = diesel::insert_into(orders::table)
                .values(&order)
                .get_result::<Order>(&mut conn)
                .map_err(|e| CheckoutError::PartialFailure{
                    created,
                    requested,
                    source: e
                })?;
            created += 1;

            let book = match resolved_books.get(&book_id) {
                Some(book) => book.clone(),
                None => {
                    let book = books::table
                        .find(book_id)
                        .first::<Book>(&mut conn)
                        .map_err(|e| CheckoutError::PartialFailure{
                            created,
                            requested,
                            source: e
                        })?;
                    resolved_books.insert(book_id, book.clone());
                    book
                }
            };

            receipts.push(OrderReceipt{
                order,
                book,
                buyer: buyer.clone()
            });
        }

        Ok::<Vec<OrderReceipt>, CheckoutError>(receipts)
    })
    .await??;

    Ok(receipts)
}

// Errors associated with updating order status
#[derive(Error)]
pub enum UpdateOrderStatusError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("order_id: {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for UpdateOrderStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Unconditional overwrite; no transition table is enforced, any staff role
// may set any status value
#[tracing::instrument(
    "Updating order status",
    skip(conn)
)]
pub async fn update_order_status(
    mut conn: DbConnection,
    order_id: Uuid,
    status: OrderStatus
) -> Result<OrderReceipt, UpdateOrderStatusError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderReceipt, UpdateOrderStatusError, _>(|conn| {
            let order: Order = diesel::update(orders::table)
                .filter(orders::order_id.eq(order_id))
                .set(orders::status.eq(status.as_str()))
                .get_result::<Order>(conn)
                .optional()?
                .ok_or(UpdateOrderStatusError::NoOrderIdError(order_id))?;

            let book = books::table
                .find(order.book_id)
                .first::<Book>(conn)?;

            let buyer = users::table
                .select(BUYER_COLUMNS)
                .filter(users::user_id.eq(order.user_id))
                .first::<UserView>(conn)?;

            Ok(OrderReceipt{ order, book, buyer })
        })
    })
    .await??;

    Ok(res)
}

// Error associated with deleting orders
#[derive(Error)]
pub enum DeleteOrderError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("order_id: {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for DeleteOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Deleting order by id",
    skip(conn)
)]
pub async fn delete_order(
    mut conn: DbConnection,
    order_id: Uuid
) -> Result<(), DeleteOrderError>{
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::delete(orders::table)
            .filter(orders::order_id.eq(order_id))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(DeleteOrderError::NoOrderIdError(order_id));
        }

        Ok(())
    })
    .await??;

    Ok(())
}

#[tracing::instrument(
    "Getting order with book and buyer",
    skip(conn)
)]
pub async fn get_order(
    mut conn: DbConnection,
    order_id: Uuid
) -> Result<Option<OrderReceipt>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        orders::table
            .inner_join(books::table)
            .inner_join(users::table)
            .filter(orders::order_id.eq(order_id))
            .select((
                orders::all_columns,
                books::all_columns,
                BUYER_COLUMNS
            ))
            .first::<(Order, Book, UserView)>(&mut conn)
            .optional()
            .context("Failed to get order")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res.map(|(order, book, buyer)| OrderReceipt{ order, book, buyer }))
}

// A regular USER only ever sees their own orders; MANAGER / ADMIN list the
// whole system
#[tracing::instrument(
    "Listing orders",
    skip(conn)
)]
pub async fn get_orders(
    mut conn: DbConnection,
    user_id: Uuid,
    is_staff: bool
) -> Result<Vec<OrderReceipt>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = orders::table
            .inner_join(books::table)
            .inner_join(users::table)
            .into_boxed();

        if !is_staff {
            query = query.filter(orders::user_id.eq(user_id));
        }

        query
            .order(orders::created_at.desc())
            .select((
                orders::all_columns,
                books::all_columns,
                BUYER_COLUMNS
            ))
            .load::<(Order, Book, UserView)>(&mut conn)
            .context("Failed to load orders")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res
        .into_iter()
        .map(|(order, book, buyer)| OrderReceipt{ order, book, buyer })
        .collect())
}
