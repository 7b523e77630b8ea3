// core/src/models/mod.rs

//! Row types for every stored entity, plus the `New*` inputs used to insert
//! them.

pub mod order;
pub mod order_item;
pub mod product;
pub mod review;
pub mod shipping_address;
pub mod user;

pub use order::{NewOrder, Order};
pub use order_item::{NewOrderItem, OrderItem};
pub use product::{NewProduct, Product};
pub use review::{NewReview, Review};
pub use shipping_address::{NewShippingAddress, ShippingAddress};
pub use user::{NewUser, User};
