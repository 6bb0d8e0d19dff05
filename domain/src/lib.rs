//! Pure state for the table-side ordering client and the admin dashboard.
//!
//! Nothing in this crate performs I/O. The HTTP seam is described by the
//! [`gateway`] traits and implemented in `infrastructure`.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notification;
pub mod session;

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{Catalog, CategoryFilter};
pub use error::ApiError;
pub use models::{MenuItem, Order, OrderLine, OrderStatus, Statistics, Table, TableStatus};
pub use notification::{Notification, NotificationKind, Notifications};
pub use session::{OrderingState, Screen, Session};
