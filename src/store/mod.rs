//! Data store operations over the sqlite pool. One module per entity;
//! constraint violations bubble up as `sqlx::Error` database errors and are
//! classified by the error layer.

pub mod attendance;
pub mod employee;
