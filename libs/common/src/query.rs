//! Parameterized statements for the `users` table
//!
//! Each function renders one statement with `?` positional placeholders and
//! returns it together with the values to bind in order. Rendering is pure; no
//! function here touches the database.
//!
//! ```rust
//! use common::query;
//!
//! let (sql, values) = query::select_user_by_id(7);
//!
//! assert_eq!(
//!     sql,
//!     r#"SELECT "user_id", "name", "created_at" FROM "users" WHERE "user_id" = ?"#
//! );
//! assert_eq!(values.0.0.len(), 1);
//! ```

use sea_query::{Asterisk, Expr, Func, Iden, Order, Query, SqliteQueryBuilder};
use sea_query_binder::{SqlxBinder, SqlxValues};

/// Rendered SQL plus its ordered arguments
pub type Statement = (String, SqlxValues);

/// Identifiers of the `users` table
#[derive(Iden, Clone, Copy)]
pub enum Users {
    Table,
    UserId,
    Name,
    CreatedAt,
}

const USER_COLUMNS: [Users; 3] = [Users::UserId, Users::Name, Users::CreatedAt];

/// `INSERT` a user with the given name
pub fn insert_user(name: &str) -> Statement {
    Query::insert()
        .into_table(Users::Table)
        .columns([Users::Name])
        .values_panic([name.into()])
        .build_sqlx(SqliteQueryBuilder)
}

/// `SELECT` the user with the given id
pub fn select_user_by_id(user_id: i64) -> Statement {
    Query::select()
        .columns(USER_COLUMNS)
        .from(Users::Table)
        .and_where(Expr::col(Users::UserId).eq(user_id))
        .build_sqlx(SqliteQueryBuilder)
}

/// `SELECT` every user, newest first; the id breaks timestamp ties
pub fn select_all_users() -> Statement {
    Query::select()
        .columns(USER_COLUMNS)
        .from(Users::Table)
        .order_by(Users::CreatedAt, Order::Desc)
        .order_by(Users::UserId, Order::Desc)
        .build_sqlx(SqliteQueryBuilder)
}

/// `UPDATE` the name of the user with the given id
pub fn update_user_name(user_id: i64, name: &str) -> Statement {
    Query::update()
        .table(Users::Table)
        .values([(Users::Name, name.into())])
        .and_where(Expr::col(Users::UserId).eq(user_id))
        .build_sqlx(SqliteQueryBuilder)
}

/// `DELETE` the user with the given id
pub fn delete_user(user_id: i64) -> Statement {
    Query::delete()
        .from_table(Users::Table)
        .and_where(Expr::col(Users::UserId).eq(user_id))
        .build_sqlx(SqliteQueryBuilder)
}

/// `SELECT COUNT(*)` over the users table
pub fn count_users() -> Statement {
    Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(Users::Table)
        .build_sqlx(SqliteQueryBuilder)
}
