//! Concrete adapters, one per entity type.

use chrono::{Local, NaiveDateTime};

use crate::{
  Error, Result,
  adapter::{Binding, EntityAdapter},
  schema::ColumnSpec,
  value::Value,
};

/// Format of `Orders.placed_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

macro_rules! entity {
  ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
    $(
      $(#[$meta])*
      #[derive(Debug, Clone)]
      pub struct $name(pub(crate) Binding);
    )+
  };
}

entity! {
  Order,
  OrderDish,
  Ingredient,
  Dish,
  DishIngredient,
  DishType,
  Cook,
  Waiter,
  Unit,
  /// A seating table in the restaurant, not a database table.
  RestaurantTable,
}

fn real(value: &Value) -> Option<f64> {
  match value {
    Value::Real(r) => Some(*r),
    Value::Integer(i) => Some(*i as f64),
    _ => None,
  }
}

fn at_least(column: &ColumnSpec, value: &Value, min: i64) -> Result<()> {
  match value.as_integer() {
    Some(v) if v < min => Err(Error::invalid(column.name, format!("must be at least {min}"))),
    _ => Ok(()),
  }
}

fn non_negative(column: &ColumnSpec, value: &Value) -> Result<()> {
  match real(value) {
    Some(v) if v < 0.0 => Err(Error::invalid(column.name, "must not be negative")),
    _ => Ok(()),
  }
}

impl EntityAdapter for Order {
  fn binding(&self) -> &Binding { &self.0 }

  fn default_value(&self, column: &ColumnSpec) -> Option<String> {
    (column.name == "placed_at").then(|| Local::now().format(TIMESTAMP_FORMAT).to_string())
  }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    if let ("placed_at", Value::Text(text)) = (column.name, value) {
      NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|_| Error::invalid(column.name, "expected YYYY-MM-DD HH:MM"))?;
    }
    Ok(())
  }
}

impl EntityAdapter for OrderDish {
  fn binding(&self) -> &Binding { &self.0 }

  fn default_value(&self, column: &ColumnSpec) -> Option<String> {
    (column.name == "count").then(|| "1".to_owned())
  }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    if column.name == "count" { at_least(column, value, 1) } else { Ok(()) }
  }
}

impl EntityAdapter for Ingredient {
  fn binding(&self) -> &Binding { &self.0 }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    if column.name == "price" { non_negative(column, value) } else { Ok(()) }
  }
}

impl EntityAdapter for Dish {
  fn binding(&self) -> &Binding { &self.0 }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    if column.name == "price" { non_negative(column, value) } else { Ok(()) }
  }
}

impl EntityAdapter for DishIngredient {
  fn binding(&self) -> &Binding { &self.0 }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    match real(value) {
      Some(q) if column.name == "quantity" && q <= 0.0 => {
        Err(Error::invalid(column.name, "must be positive"))
      }
      _ => Ok(()),
    }
  }
}

impl EntityAdapter for DishType {
  fn binding(&self) -> &Binding { &self.0 }
}

impl EntityAdapter for Cook {
  fn binding(&self) -> &Binding { &self.0 }

  fn default_value(&self, column: &ColumnSpec) -> Option<String> {
    (column.name == "experience").then(|| "0".to_owned())
  }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    if column.name == "experience" { at_least(column, value, 0) } else { Ok(()) }
  }
}

impl EntityAdapter for Waiter {
  fn binding(&self) -> &Binding { &self.0 }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    if let ("phone", Value::Text(phone)) = (column.name, value) {
      let ok = phone.chars().all(|c| c.is_ascii_digit() || " +-()".contains(c));
      if !ok {
        return Err(Error::invalid(column.name, "may only contain digits, spaces and + - ( )"));
      }
    }
    Ok(())
  }
}

impl EntityAdapter for Unit {
  fn binding(&self) -> &Binding { &self.0 }
}

impl EntityAdapter for RestaurantTable {
  fn binding(&self) -> &Binding { &self.0 }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    at_least(column, value, 1)
  }
}
