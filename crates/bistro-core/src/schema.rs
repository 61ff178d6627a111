//! Static entity registry for the restaurant database.
//!
//! Every editable table is described once here. The order of [`REGISTRY`]
//! is the tab order of the editor.

/// One variant per editable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Order,
  OrderDish,
  Ingredient,
  Dish,
  DishIngredient,
  DishType,
  Cook,
  Waiter,
  Unit,
  RestaurantTable,
}

#[derive(Debug, Clone, Copy)]
pub enum ColumnKind {
  Text,
  Integer,
  Real,
  /// References the `id` of another entity; displayed through the target's
  /// label column.
  ForeignKey(&'static EntityDescriptor),
}

#[derive(Debug)]
pub struct ColumnSpec {
  pub name:     &'static str,
  pub kind:     ColumnKind,
  pub nullable: bool,
}

impl ColumnSpec {
  const fn new(name: &'static str, kind: ColumnKind) -> Self {
    Self { name, kind, nullable: false }
  }

  const fn nullable(name: &'static str, kind: ColumnKind) -> Self {
    Self { name, kind, nullable: true }
  }

  pub fn target(&self) -> Option<&'static EntityDescriptor> {
    match self.kind {
      ColumnKind::ForeignKey(target) => Some(target),
      _ => None,
    }
  }

  /// Result-column alias: foreign keys drop their `_id` suffix.
  pub fn display_name(&self) -> &'static str {
    match self.kind {
      ColumnKind::ForeignKey(_) => self.name.strip_suffix("_id").unwrap_or(self.name),
      _ => self.name,
    }
  }
}

#[derive(Debug)]
pub struct EntityDescriptor {
  pub kind:           EntityKind,
  /// Table name the schema is written against; the live database may use
  /// different casing.
  pub canonical_name: &'static str,
  /// Human-readable name shown on the tab.
  pub title:          &'static str,
  /// Column other tables display when they reference this entity.
  pub label:          &'static str,
  /// Every column except the implicit integer `id`.
  pub columns:        &'static [ColumnSpec],
}

impl EntityDescriptor {
  /// Entities this one references, in column order, without duplicates.
  pub fn relations(&self) -> Vec<&'static EntityDescriptor> {
    let mut out: Vec<&'static EntityDescriptor> = Vec::new();
    for target in self.columns.iter().filter_map(ColumnSpec::target) {
      if !out.iter().any(|d| d.kind == target.kind) {
        out.push(target);
      }
    }
    out
  }
}

use ColumnKind::{ForeignKey, Integer, Real, Text};

pub static UNIT: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::Unit,
  canonical_name: "Unit",
  title:          "Unit",
  label:          "name",
  columns:        &[ColumnSpec::new("name", Text)],
};

pub static DISH_TYPE: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::DishType,
  canonical_name: "DishType",
  title:          "Dish type",
  label:          "name",
  columns:        &[ColumnSpec::new("name", Text)],
};

pub static RESTAURANT_TABLE: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::RestaurantTable,
  canonical_name: "RestaurantTable",
  title:          "Table",
  label:          "number",
  columns:        &[
    ColumnSpec::new("number", Integer),
    ColumnSpec::new("seats", Integer),
  ],
};

pub static WAITER: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::Waiter,
  canonical_name: "Waiter",
  title:          "Waiter",
  label:          "name",
  columns:        &[
    ColumnSpec::new("name", Text),
    ColumnSpec::nullable("phone", Text),
  ],
};

pub static COOK: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::Cook,
  canonical_name: "Cook",
  title:          "Cook",
  label:          "name",
  columns:        &[
    ColumnSpec::new("name", Text),
    ColumnSpec::new("experience", Integer),
    ColumnSpec::nullable("specialty_id", ForeignKey(&DISH_TYPE)),
  ],
};

pub static INGREDIENT: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::Ingredient,
  canonical_name: "Ingredient",
  title:          "Ingredient",
  label:          "name",
  columns:        &[
    ColumnSpec::new("name", Text),
    ColumnSpec::new("unit_id", ForeignKey(&UNIT)),
    ColumnSpec::new("price", Real),
  ],
};

pub static DISH: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::Dish,
  canonical_name: "Dish",
  title:          "Dish",
  label:          "name",
  columns:        &[
    ColumnSpec::new("name", Text),
    ColumnSpec::new("dish_type_id", ForeignKey(&DISH_TYPE)),
    ColumnSpec::new("main_ingredient_id", ForeignKey(&INGREDIENT)),
    ColumnSpec::new("price", Real),
  ],
};

pub static DISH_INGREDIENT: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::DishIngredient,
  canonical_name: "DishIngredient",
  title:          "Dish ingredient",
  label:          "id",
  columns:        &[
    ColumnSpec::new("dish_id", ForeignKey(&DISH)),
    ColumnSpec::new("ingredient_id", ForeignKey(&INGREDIENT)),
    ColumnSpec::new("quantity", Real),
  ],
};

pub static ORDER: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::Order,
  canonical_name: "Orders",
  title:          "Order",
  label:          "id",
  columns:        &[
    ColumnSpec::new("table_id", ForeignKey(&RESTAURANT_TABLE)),
    ColumnSpec::new("waiter_id", ForeignKey(&WAITER)),
    ColumnSpec::new("placed_at", Text),
  ],
};

pub static ORDER_DISH: EntityDescriptor = EntityDescriptor {
  kind:           EntityKind::OrderDish,
  canonical_name: "OrderDish",
  title:          "Order dish",
  label:          "id",
  columns:        &[
    ColumnSpec::new("order_id", ForeignKey(&ORDER)),
    ColumnSpec::new("dish_id", ForeignKey(&DISH)),
    ColumnSpec::new("count", Integer),
  ],
};

/// All editable entities in tab order.
pub static REGISTRY: [&EntityDescriptor; 10] = [
  &ORDER,
  &ORDER_DISH,
  &INGREDIENT,
  &DISH,
  &DISH_INGREDIENT,
  &DISH_TYPE,
  &COOK,
  &WAITER,
  &UNIT,
  &RESTAURANT_TABLE,
];
