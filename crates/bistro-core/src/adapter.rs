//! The per-entity SQL adapter.
//!
//! [`EntityAdapter`] turns an entity descriptor plus its resolved table
//! names into statements and form fields. Entities only supply their
//! [`Binding`] and, where they need them, defaults and validation rules; the
//! statement shapes are shared.

use std::collections::{BTreeSet, HashMap};

use crate::{
  Error, Result,
  entities::{
    Cook, Dish, DishIngredient, DishType, Ingredient, Order, OrderDish, RestaurantTable, Unit,
    Waiter,
  },
  resolve::{Catalog, ResolvedTable},
  schema::{ColumnKind, ColumnSpec, EntityDescriptor, EntityKind},
  sql::{Ident, Statement, placeholders},
  value::{ResultSet, Row, Value},
};

// ─── Binding ─────────────────────────────────────────────────────────────────

/// An entity's own table plus the physical names of the tables its foreign
/// keys point at.
#[derive(Debug, Clone)]
pub struct Binding {
  table:   ResolvedTable,
  /// One entry per column; `Some` for foreign keys.
  targets: Vec<Option<Ident>>,
}

impl Binding {
  pub fn new(table: ResolvedTable, catalog: &Catalog) -> Self {
    let targets = table
      .descriptor
      .columns
      .iter()
      .map(|c| c.target().map(|t| catalog.physical_name(t)))
      .collect();
    Self { table, targets }
  }
}

// ─── Form fields ─────────────────────────────────────────────────────────────

/// A referencable row offered by a foreign-key field.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
  pub id:    i64,
  pub label: String,
}

/// Live choices per foreign-key column, fetched by the caller from
/// [`EntityAdapter::choice_queries`].
#[derive(Debug, Clone, Default)]
pub struct ChoiceSet(HashMap<&'static str, Vec<Choice>>);

impl ChoiceSet {
  pub fn insert(&mut self, column: &'static str, result: ResultSet) {
    let choices = result
      .rows
      .iter()
      .filter_map(|row| {
        let id = row.id()?;
        let label = row.fields().first().map(Value::to_field_text).unwrap_or_default();
        Some(Choice { id, label })
      })
      .collect();
    self.0.insert(column, choices);
  }

  pub fn get(&self, column: &str) -> &[Choice] {
    self.0.get(column).map(Vec::as_slice).unwrap_or_default()
  }
}

/// One input of an add/edit form.
#[derive(Debug, Clone)]
pub struct FieldSpec {
  pub column:  &'static ColumnSpec,
  pub label:   String,
  /// Initial text. For foreign keys this is the chosen id, or empty.
  pub value:   String,
  /// Referencable rows; empty unless the column is a foreign key.
  pub choices: Vec<Choice>,
}

impl FieldSpec {
  pub fn is_choice(&self) -> bool { matches!(self.column.kind, ColumnKind::ForeignKey(_)) }

  pub fn required(&self) -> bool { !self.column.nullable }

  /// Label of the choice whose id matches `raw`, if any.
  pub fn choice_label(&self, raw: &str) -> Option<&str> {
    let id: i64 = raw.trim().parse().ok()?;
    self.choices.iter().find(|c| c.id == id).map(|c| c.label.as_str())
  }
}

/// `dish_type` → `Dish type`.
pub fn heading(name: &str) -> String {
  let spaced = name.replace('_', " ");
  let mut chars = spaced.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

// ─── Adapter trait ───────────────────────────────────────────────────────────

/// SQL generation and form handling for one entity type.
///
/// Every method is pure: statements are returned, never executed.
pub trait EntityAdapter {
  fn binding(&self) -> &Binding;

  /// Initial text for `column` in an add form.
  fn default_value(&self, _column: &ColumnSpec) -> Option<String> { None }

  /// Entity-specific validation of a parsed, non-null value.
  fn check(&self, _column: &ColumnSpec, _value: &Value) -> Result<()> { Ok(()) }

  fn descriptor(&self) -> &'static EntityDescriptor { self.binding().table.descriptor }

  fn table_name(&self) -> &Ident { &self.binding().table.physical_name }

  /// Display query: the id first, then one column per descriptor column with
  /// foreign keys replaced by the referenced row's label.
  fn build_select(&self) -> Statement {
    let binding = self.binding();
    let mut projection = vec![r#"t."id" AS "id""#.to_owned()];
    let mut joins = Vec::new();

    for (i, (column, target)) in
      self.descriptor().columns.iter().zip(&binding.targets).enumerate()
    {
      let alias = Ident::from_static(column.display_name());
      let own = Ident::from_static(column.name);
      match (column.kind, target) {
        (ColumnKind::ForeignKey(desc), Some(target)) => {
          let label = Ident::from_static(desc.label);
          let joined = format!("j{i}.{label}");
          let expr = if column.nullable {
            format!("CASE WHEN t.{own} IS NULL THEN '' ELSE {joined} END")
          } else {
            joined
          };
          projection.push(format!("{expr} AS {alias}"));
          joins.push(format!(r#"LEFT JOIN {target} AS j{i} ON j{i}."id" = t.{own}"#));
        }
        _ => projection.push(format!("t.{own} AS {alias}")),
      }
    }

    let mut sql = format!("SELECT {} FROM {} AS t", projection.join(", "), self.table_name());
    for join in joins {
      sql.push(' ');
      sql.push_str(&join);
    }
    sql.push_str(r#" ORDER BY t."id""#);
    Statement::bare(sql)
  }

  /// Positions in [`build_select`](Self::build_select)'s projection that
  /// come from a joined table.
  fn joined_positions(&self) -> Vec<usize> {
    self
      .descriptor()
      .columns
      .iter()
      .enumerate()
      .filter(|(_, c)| c.target().is_some())
      .map(|(i, _)| i + 1)
      .collect()
  }

  /// Raw stored values of one record, id first, in column order.
  fn build_fetch(&self, id: i64) -> Statement {
    Statement::new(
      format!(r#"SELECT "id", {} FROM {} WHERE "id" = ?1"#, self.column_list(), self.table_name()),
      vec![Value::Integer(id)],
    )
  }

  /// `(column, statement)` pairs listing `(id, label)` for every foreign
  /// key.
  fn choice_queries(&self) -> Vec<(&'static str, Statement)> {
    self
      .descriptor()
      .columns
      .iter()
      .zip(&self.binding().targets)
      .filter_map(|(column, target)| {
        let desc = column.target()?;
        let target = target.as_ref()?;
        let label = Ident::from_static(desc.label);
        let sql = format!(r#"SELECT "id", {label} FROM {target} ORDER BY "id""#);
        Some((column.name, Statement::bare(sql)))
      })
      .collect()
  }

  /// Form inputs in column order, pre-filled from `existing` (a
  /// [`build_fetch`](Self::build_fetch) row) when editing.
  fn dialog_fields(&self, existing: Option<&Row>, choices: &ChoiceSet) -> Vec<FieldSpec> {
    self
      .descriptor()
      .columns
      .iter()
      .enumerate()
      .map(|(i, column)| {
        let value = match existing {
          Some(row) => row.fields().get(i).map(Value::to_field_text).unwrap_or_default(),
          None => self.default_value(column).unwrap_or_default(),
        };
        FieldSpec {
          column,
          label: heading(column.display_name()),
          value,
          choices: choices.get(column.name).to_vec(),
        }
      })
      .collect()
  }

  /// Validate form text into values, in the same order as `fields`.
  fn parse_values(&self, fields: &[FieldSpec], raw: &[String]) -> Result<Vec<Value>> {
    if fields.len() != raw.len() {
      return Err(Error::Arity {
        entity:   self.descriptor().canonical_name,
        expected: fields.len(),
        got:      raw.len(),
      });
    }

    fields
      .iter()
      .zip(raw)
      .map(|(field, text)| {
        let text = text.trim();
        if text.is_empty() {
          return if field.required() {
            Err(Error::MissingField(field.label.clone()))
          } else {
            Ok(Value::Null)
          };
        }
        let value = parse_field(field, text)?;
        self.check(field.column, &value)?;
        Ok(value)
      })
      .collect()
  }

  fn build_insert(&self, values: &[Value]) -> Result<Statement> {
    let columns = self.descriptor().columns;
    self.expect_arity(columns.len(), values.len())?;
    let sql = format!(
      "INSERT INTO {} ({}) VALUES ({})",
      self.table_name(),
      self.column_list(),
      placeholders(1, columns.len()),
    );
    Ok(Statement::new(sql, values.to_vec()))
  }

  /// `values[0]` is the target id; the rest follow column order.
  fn build_update(&self, values: &[Value]) -> Result<Statement> {
    let columns = self.descriptor().columns;
    self.expect_arity(columns.len() + 1, values.len())?;
    if values[0].as_integer().is_none() {
      return Err(Error::MissingId);
    }
    let assignments = columns
      .iter()
      .enumerate()
      .map(|(i, c)| format!("{} = ?{}", Ident::from_static(c.name), i + 2))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(r#"UPDATE {} SET {assignments} WHERE "id" = ?1"#, self.table_name());
    Ok(Statement::new(sql, values.to_vec()))
  }

  /// Deletes exactly `ids`. Rows elsewhere that referenced them are left for
  /// integrity repair.
  fn build_delete(&self, ids: &BTreeSet<i64>) -> Statement {
    let sql = format!(
      r#"DELETE FROM {} WHERE "id" IN ({})"#,
      self.table_name(),
      placeholders(1, ids.len()),
    );
    Statement::new(sql, ids.iter().copied().map(Value::Integer).collect())
  }

  #[doc(hidden)]
  fn column_list(&self) -> String {
    self
      .descriptor()
      .columns
      .iter()
      .map(|c| Ident::from_static(c.name).to_string())
      .collect::<Vec<_>>()
      .join(", ")
  }

  #[doc(hidden)]
  fn expect_arity(&self, expected: usize, got: usize) -> Result<()> {
    if expected == got {
      Ok(())
    } else {
      Err(Error::Arity { entity: self.descriptor().canonical_name, expected, got })
    }
  }
}

fn parse_field(field: &FieldSpec, text: &str) -> Result<Value> {
  match field.column.kind {
    ColumnKind::Text => Ok(Value::Text(text.to_owned())),
    ColumnKind::Integer => text
      .parse::<i64>()
      .map(Value::Integer)
      .map_err(|_| Error::invalid(&field.label, "expected a whole number")),
    ColumnKind::Real => match text.parse::<f64>() {
      Ok(r) if r.is_finite() => Ok(Value::Real(r)),
      _ => Err(Error::invalid(&field.label, "expected a number")),
    },
    ColumnKind::ForeignKey(_) => text
      .parse::<i64>()
      .ok()
      .filter(|id| field.choices.iter().any(|c| c.id == *id))
      .map(Value::Integer)
      .ok_or_else(|| Error::UnknownChoice { field: field.label.clone(), value: text.to_owned() }),
  }
}

// ─── Static dispatch ─────────────────────────────────────────────────────────

/// One adapter per entity type.
#[derive(Debug, Clone)]
pub enum Adapter {
  Order(Order),
  OrderDish(OrderDish),
  Ingredient(Ingredient),
  Dish(Dish),
  DishIngredient(DishIngredient),
  DishType(DishType),
  Cook(Cook),
  Waiter(Waiter),
  Unit(Unit),
  RestaurantTable(RestaurantTable),
}

macro_rules! dispatch {
  ($self:ident, $a:ident => $body:expr) => {
    match $self {
      Adapter::Order($a) => $body,
      Adapter::OrderDish($a) => $body,
      Adapter::Ingredient($a) => $body,
      Adapter::Dish($a) => $body,
      Adapter::DishIngredient($a) => $body,
      Adapter::DishType($a) => $body,
      Adapter::Cook($a) => $body,
      Adapter::Waiter($a) => $body,
      Adapter::Unit($a) => $body,
      Adapter::RestaurantTable($a) => $body,
    }
  };
}

impl Adapter {
  pub fn bind(table: ResolvedTable, catalog: &Catalog) -> Self {
    let kind = table.descriptor.kind;
    let b = Binding::new(table, catalog);
    match kind {
      EntityKind::Order => Adapter::Order(Order(b)),
      EntityKind::OrderDish => Adapter::OrderDish(OrderDish(b)),
      EntityKind::Ingredient => Adapter::Ingredient(Ingredient(b)),
      EntityKind::Dish => Adapter::Dish(Dish(b)),
      EntityKind::DishIngredient => Adapter::DishIngredient(DishIngredient(b)),
      EntityKind::DishType => Adapter::DishType(DishType(b)),
      EntityKind::Cook => Adapter::Cook(Cook(b)),
      EntityKind::Waiter => Adapter::Waiter(Waiter(b)),
      EntityKind::Unit => Adapter::Unit(Unit(b)),
      EntityKind::RestaurantTable => Adapter::RestaurantTable(RestaurantTable(b)),
    }
  }

  /// One adapter per table in `catalog`, in catalog order.
  pub fn bind_all(catalog: &Catalog) -> Vec<Self> {
    catalog.tables().iter().map(|t| Self::bind(t.clone(), catalog)).collect()
  }

  pub fn kind(&self) -> EntityKind { self.descriptor().kind }
}

impl EntityAdapter for Adapter {
  fn binding(&self) -> &Binding { dispatch!(self, a => a.binding()) }

  fn default_value(&self, column: &ColumnSpec) -> Option<String> {
    dispatch!(self, a => a.default_value(column))
  }

  fn check(&self, column: &ColumnSpec, value: &Value) -> Result<()> {
    dispatch!(self, a => a.check(column, value))
  }
}
