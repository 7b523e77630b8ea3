// core/src/serializers/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal2;
use crate::error::StoreResult;
use crate::models::{NewShippingAddress, Order, OrderItem, ShippingAddress, User};
use crate::repo::orders::{OrderDetail, OrderLine, PlaceOrder};
use crate::serializers::{check_optional_max_length, UserRepr};

/// How an order's owner is rendered. List and detail views use `Name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserField {
  Name(String),
  Nested(UserRepr),
}

impl UserField {
  pub fn name(user: &User) -> Self {
    UserField::Name(user.to_string())
  }

  pub fn nested(user: &User) -> Self {
    UserField::Nested(UserRepr::from_model(user))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemRepr {
  pub id: i64,
  pub product: Option<i64>,
  pub order: i64,
  pub name: String,
  pub qty: i32,
  pub price: Decimal2,
  pub image: Option<String>,
}

impl OrderItemRepr {
  pub fn from_model(item: &OrderItem) -> Self {
    Self {
      id: item.id,
      product: item.product_id,
      order: item.order_id,
      name: item.name.clone(),
      qty: item.qty,
      price: item.price,
      image: item.image.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingAddressRepr {
  pub id: i64,
  pub order: Option<i64>,
  pub address: Option<String>,
  pub city: Option<String>,
  #[serde(rename = "postalCode")]
  pub postal_code: Option<String>,
  pub country: Option<String>,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl ShippingAddressRepr {
  pub fn from_model(address: &ShippingAddress) -> Self {
    Self {
      id: address.id,
      order: address.order_id,
      address: address.address.clone(),
      city: address.city.clone(),
      postal_code: address.postal_code.clone(),
      country: address.country.clone(),
      created_at: address.created_at,
      updated_at: address.updated_at,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRepr {
  pub id: i64,
  #[serde(rename = "orderItems")]
  pub order_items: Vec<OrderItemRepr>,
  #[serde(rename = "shippingAddress")]
  pub shipping_address: Option<ShippingAddressRepr>,
  /// `null` once the owning user has been deleted.
  pub user: Option<UserField>,
  #[serde(rename = "paymentMethod")]
  pub payment_method: Option<String>,
  #[serde(rename = "itemsPrice")]
  pub items_price: Option<Decimal2>,
  #[serde(rename = "taxPrice")]
  pub tax_price: Option<Decimal2>,
  #[serde(rename = "shippingPrice")]
  pub shipping_price: Option<Decimal2>,
  #[serde(rename = "totalPrice")]
  pub total_price: Option<Decimal2>,
  #[serde(rename = "isPaid")]
  pub is_paid: bool,
  #[serde(rename = "paidAt")]
  pub paid_at: Option<DateTime<Utc>>,
  #[serde(rename = "isDelivered")]
  pub is_delivered: bool,
  #[serde(rename = "deliveredAt")]
  pub delivered_at: Option<DateTime<Utc>>,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
  #[serde(rename = "createdBy")]
  pub created_by: Option<String>,
  #[serde(rename = "updatedBy")]
  pub updated_by: Option<String>,
}

impl OrderRepr {
  pub fn from_detail(detail: &OrderDetail) -> Self {
    Self::build(
      &detail.order,
      detail.owner.as_ref().map(UserField::name),
      &detail.items,
      detail.shipping_address.as_ref(),
    )
  }

  pub fn build(
    order: &Order,
    user: Option<UserField>,
    items: &[OrderItem],
    shipping_address: Option<&ShippingAddress>,
  ) -> Self {
    Self {
      id: order.id,
      order_items: items.iter().map(OrderItemRepr::from_model).collect(),
      shipping_address: shipping_address.map(ShippingAddressRepr::from_model),
      user,
      payment_method: order.payment_method.clone(),
      items_price: order.items_price,
      tax_price: order.tax_price,
      shipping_price: order.shipping_price,
      total_price: order.total_price,
      is_paid: order.is_paid,
      paid_at: order.paid_at,
      is_delivered: order.is_delivered,
      delivered_at: order.delivered_at,
      created_at: order.created_at,
      updated_at: order.updated_at,
      created_by: order.created_by.clone(),
      updated_by: order.updated_by.clone(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineInput {
  pub product: i64,
  pub qty: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingAddressInput {
  pub address: Option<String>,
  pub city: Option<String>,
  #[serde(rename = "postalCode")]
  pub postal_code: Option<String>,
  pub country: Option<String>,
}

/// Order placement payload. Item prices and totals are computed from the
/// products, so any client-sent `itemsPrice`/`totalPrice` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInput {
  #[serde(rename = "orderItems", default)]
  pub order_items: Vec<OrderLineInput>,
  #[serde(rename = "shippingAddress", default)]
  pub shipping_address: ShippingAddressInput,
  #[serde(rename = "paymentMethod")]
  pub payment_method: Option<String>,
  #[serde(rename = "taxPrice")]
  pub tax_price: Option<Decimal>,
  #[serde(rename = "shippingPrice")]
  pub shipping_price: Option<Decimal>,
}

impl OrderInput {
  pub fn into_place_order(self) -> StoreResult<PlaceOrder> {
    check_optional_max_length("paymentMethod", self.payment_method.as_deref(), Order::PAYMENT_METHOD_MAX_LENGTH)?;
    let address = self.shipping_address;
    for (field, value) in [
      ("address", &address.address),
      ("city", &address.city),
      ("postalCode", &address.postal_code),
      ("country", &address.country),
    ] {
      check_optional_max_length(field, value.as_deref(), ShippingAddress::FIELD_MAX_LENGTH)?;
    }

    let tax_price = self
      .tax_price
      .map(|v| Decimal2::parse_field("taxPrice", v, Order::PRICE_MAX_DIGITS))
      .transpose()?;
    let shipping_price = self
      .shipping_price
      .map(|v| Decimal2::parse_field("shippingPrice", v, Order::PRICE_MAX_DIGITS))
      .transpose()?;

    Ok(PlaceOrder {
      lines: self
        .order_items
        .into_iter()
        .map(|line| OrderLine {
          product_id: line.product,
          qty: line.qty,
        })
        .collect(),
      payment_method: self.payment_method,
      tax_price,
      shipping_price,
      shipping_address: NewShippingAddress {
        address: address.address,
        city: address.city,
        postal_code: address.postal_code,
        country: address.country,
      },
    })
  }
}
