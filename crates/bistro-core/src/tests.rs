//! Unit tests for the registry, resolver and adapters.

use std::collections::BTreeSet;

use crate::{
  Adapter, Catalog, ChoiceSet, EntityAdapter, EntityDescriptor, EntityKind, Error, Ident, REGISTRY,
  ResultSet, Row, Value, adapter::heading, schema::ColumnKind,
};

fn catalog(live: &[&str]) -> Catalog {
  let live: Vec<String> = live.iter().map(|s| (*s).to_owned()).collect();
  Catalog::resolve(&REGISTRY, &live)
}

fn adapter(kind: EntityKind) -> Adapter {
  let catalog = catalog(&[]);
  let table = catalog.get(kind).cloned().expect("registered");
  Adapter::bind(table, &catalog)
}

fn descriptor(kind: EntityKind) -> &'static EntityDescriptor {
  REGISTRY.iter().copied().find(|d| d.kind == kind).expect("registered")
}

fn strings(raw: &[&str]) -> Vec<String> { raw.iter().map(|s| (*s).to_owned()).collect() }

// ─── Registry ────────────────────────────────────────────────────────────────

#[test]
fn registry_names_are_plain_identifiers() {
  for desc in REGISTRY {
    assert!(Ident::new(desc.canonical_name).is_ok(), "{}", desc.canonical_name);
    assert!(Ident::new(desc.label).is_ok());
    for column in desc.columns {
      assert!(Ident::new(column.name).is_ok(), "{}.{}", desc.canonical_name, column.name);
      assert_ne!(column.name, "id");
    }
  }
}

#[test]
fn registry_covers_every_kind_once() {
  let kinds: Vec<_> = REGISTRY.iter().map(|d| d.kind).collect();
  for (i, kind) in kinds.iter().enumerate() {
    assert!(!kinds[i + 1..].contains(kind), "{kind:?} listed twice");
    assert_eq!(descriptor(*kind).kind, *kind);
  }
  assert_eq!(kinds.len(), 10);
}

#[test]
fn relations_follow_foreign_keys() {
  let dish = descriptor(EntityKind::Dish);
  let kinds: Vec<_> = dish.relations().iter().map(|d| d.kind).collect();
  assert_eq!(kinds, [EntityKind::DishType, EntityKind::Ingredient]);
  assert!(descriptor(EntityKind::Unit).relations().is_empty());
}

#[test]
fn foreign_key_labels_exist_on_target() {
  for desc in REGISTRY {
    for column in desc.columns {
      if let ColumnKind::ForeignKey(target) = column.kind {
        assert!(
          target.label == "id" || target.columns.iter().any(|c| c.name == target.label),
          "{} has no label column {}",
          target.canonical_name,
          target.label
        );
      }
    }
  }
}

// ─── Resolver ────────────────────────────────────────────────────────────────

#[test]
fn resolver_matches_case_insensitively() {
  let catalog = catalog(&["dish", "UNIT", "Orders"]);
  let dish = catalog.get(EntityKind::Dish).unwrap();
  assert_eq!(dish.physical_name.as_str(), "dish");
  assert!(dish.present);
  assert_eq!(catalog.get(EntityKind::Unit).unwrap().physical_name.as_str(), "UNIT");
  assert_eq!(catalog.get(EntityKind::Order).unwrap().physical_name.as_str(), "Orders");
}

#[test]
fn resolver_falls_back_to_canonical_name() {
  let catalog = catalog(&["dish"]);
  let cook = catalog.get(EntityKind::Cook).unwrap();
  assert_eq!(cook.physical_name.as_str(), "Cook");
  assert!(!cook.present);
}

#[test]
fn resolver_keeps_registry_order() {
  let catalog = catalog(&["unit", "dish", "orders"]);
  let order: Vec<_> = catalog.tables().iter().map(|t| t.descriptor.kind).collect();
  let expected: Vec<_> = REGISTRY.iter().map(|d| d.kind).collect();
  assert_eq!(order, expected);
}

#[test]
fn resolver_ignores_unsafe_names() {
  let catalog = catalog(&["Dish\"; DROP TABLE Unit; --"]);
  assert_eq!(catalog.get(EntityKind::Dish).unwrap().physical_name.as_str(), "Dish");
}

#[test]
fn joins_use_resolved_names_of_targets() {
  let catalog = catalog(&["ingredient", "unit"]);
  let adapter = Adapter::bind(catalog.get(EntityKind::Ingredient).cloned().unwrap(), &catalog);
  let sql = adapter.build_select().sql;
  assert!(sql.contains(r#"FROM "ingredient" AS t"#), "{sql}");
  assert!(sql.contains(r#"LEFT JOIN "unit" AS j1"#), "{sql}");
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[test]
fn select_projects_id_first_and_labels_for_foreign_keys() {
  let stmt = adapter(EntityKind::Ingredient).build_select();
  assert_eq!(
    stmt.sql,
    r#"SELECT t."id" AS "id", t."name" AS "name", j1."name" AS "unit", t."price" AS "price" FROM "Ingredient" AS t LEFT JOIN "Unit" AS j1 ON j1."id" = t."unit_id" ORDER BY t."id""#
  );
  assert!(stmt.params.is_empty());
}

#[test]
fn select_for_nullable_foreign_key_blanks_unset_values() {
  let sql = adapter(EntityKind::Cook).build_select().sql;
  assert!(
    sql.contains(r#"CASE WHEN t."specialty_id" IS NULL THEN '' ELSE j2."name" END AS "specialty""#),
    "{sql}"
  );
}

#[test]
fn joined_positions_skip_id_and_plain_columns() {
  assert_eq!(adapter(EntityKind::Dish).joined_positions(), [2, 3]);
  assert_eq!(adapter(EntityKind::Order).joined_positions(), [1, 2]);
  assert!(adapter(EntityKind::Unit).joined_positions().is_empty());
}

#[test]
fn insert_omits_id_and_binds_values() {
  let stmt = adapter(EntityKind::Unit).build_insert(&["kg".into()]).unwrap();
  assert_eq!(stmt.sql, r#"INSERT INTO "Unit" ("name") VALUES (?1)"#);
  assert_eq!(stmt.params, [Value::from("kg")]);
}

#[test]
fn insert_rejects_wrong_arity() {
  let err = adapter(EntityKind::Dish).build_insert(&["Soup".into()]).unwrap_err();
  assert!(matches!(err, Error::Arity { expected: 4, got: 1, .. }));
}

#[test]
fn update_targets_leading_id() {
  let values = [Value::Integer(3), "Soup".into(), Value::Integer(1), Value::Integer(2), 4.5.into()];
  let stmt = adapter(EntityKind::Dish).build_update(&values).unwrap();
  assert_eq!(
    stmt.sql,
    r#"UPDATE "Dish" SET "name" = ?2, "dish_type_id" = ?3, "main_ingredient_id" = ?4, "price" = ?5 WHERE "id" = ?1"#
  );
  assert_eq!(stmt.params, values);
}

#[test]
fn update_requires_integer_id() {
  let err = adapter(EntityKind::Unit).build_update(&["x".into(), "kg".into()]).unwrap_err();
  assert!(matches!(err, Error::MissingId));
}

#[test]
fn delete_binds_every_id_without_cascading() {
  let ids: BTreeSet<i64> = [7, 2, 5].into();
  let stmt = adapter(EntityKind::Ingredient).build_delete(&ids);
  assert_eq!(stmt.sql, r#"DELETE FROM "Ingredient" WHERE "id" IN (?1, ?2, ?3)"#);
  assert_eq!(stmt.params, [Value::Integer(2), Value::Integer(5), Value::Integer(7)]);
}

#[test]
fn choice_queries_cover_each_foreign_key() {
  let queries = adapter(EntityKind::OrderDish).choice_queries();
  let columns: Vec<_> = queries.iter().map(|(c, _)| *c).collect();
  assert_eq!(columns, ["order_id", "dish_id"]);
  assert_eq!(queries[0].1.sql, r#"SELECT "id", "id" FROM "Orders" ORDER BY "id""#);
  assert_eq!(queries[1].1.sql, r#"SELECT "id", "name" FROM "Dish" ORDER BY "id""#);
}

// ─── Form fields ─────────────────────────────────────────────────────────────

fn unit_choices() -> ChoiceSet {
  let mut choices = ChoiceSet::default();
  choices.insert("unit_id", ResultSet {
    head: vec!["id".into(), "name".into()],
    rows: vec![
      Row(vec![Value::Integer(1), "kg".into()]),
      Row(vec![Value::Integer(4), "l".into()]),
    ],
  });
  choices
}

#[test]
fn dialog_fields_for_add_are_empty_with_choices() {
  let fields = adapter(EntityKind::Ingredient).dialog_fields(None, &unit_choices());
  let labels: Vec<_> = fields.iter().map(|f| f.label.as_str()).collect();
  assert_eq!(labels, ["Name", "Unit", "Price"]);
  assert!(fields.iter().all(|f| f.value.is_empty()));
  assert!(fields[1].is_choice());
  assert_eq!(fields[1].choices.len(), 2);
  assert_eq!(fields[1].choice_label("4"), Some("l"));
}

#[test]
fn dialog_fields_for_edit_are_prefilled_without_id() {
  let existing = Row(vec![Value::Integer(9), "Flour".into(), Value::Integer(1), 0.5.into()]);
  let fields = adapter(EntityKind::Ingredient).dialog_fields(Some(&existing), &unit_choices());
  let values: Vec<_> = fields.iter().map(|f| f.value.as_str()).collect();
  assert_eq!(values, ["Flour", "1", "0.5"]);
}

#[test]
fn order_defaults_placed_at_to_now() {
  let fields = adapter(EntityKind::Order).dialog_fields(None, &ChoiceSet::default());
  let placed = &fields[2];
  assert_eq!(placed.label, "Placed at");
  assert!(
    chrono::NaiveDateTime::parse_from_str(&placed.value, crate::entities::TIMESTAMP_FORMAT).is_ok()
  );
}

#[test]
fn parse_values_converts_by_kind() {
  let adapter = adapter(EntityKind::Ingredient);
  let fields = adapter.dialog_fields(None, &unit_choices());
  let values = adapter.parse_values(&fields, &strings(&[" Flour ", "4", "2.25"])).unwrap();
  assert_eq!(values, [Value::from("Flour"), Value::Integer(4), Value::Real(2.25)]);
}

#[test]
fn parse_values_rejects_unknown_choice() {
  let adapter = adapter(EntityKind::Ingredient);
  let fields = adapter.dialog_fields(None, &unit_choices());
  let err = adapter.parse_values(&fields, &strings(&["Flour", "3", "1"])).unwrap_err();
  assert!(matches!(err, Error::UnknownChoice { ref field, .. } if field == "Unit"));
}

#[test]
fn parse_values_requires_non_nullable_fields() {
  let adapter = adapter(EntityKind::Unit);
  let fields = adapter.dialog_fields(None, &ChoiceSet::default());
  let err = adapter.parse_values(&fields, &strings(&["  "])).unwrap_err();
  assert!(matches!(err, Error::MissingField(ref f) if f == "Name"));
  assert_eq!(err.to_string(), "Name is required");
}

#[test]
fn parse_values_allows_empty_nullable_fields() {
  let adapter = adapter(EntityKind::Waiter);
  let fields = adapter.dialog_fields(None, &ChoiceSet::default());
  let values = adapter.parse_values(&fields, &strings(&["Ann", ""])).unwrap();
  assert_eq!(values, [Value::from("Ann"), Value::Null]);
}

#[test]
fn parse_values_applies_entity_rules() {
  let ingredient = adapter(EntityKind::Ingredient);
  let fields = ingredient.dialog_fields(None, &unit_choices());
  assert!(ingredient.parse_values(&fields, &strings(&["Salt", "1", "-1"])).is_err());

  let table = adapter(EntityKind::RestaurantTable);
  let fields = table.dialog_fields(None, &ChoiceSet::default());
  assert!(table.parse_values(&fields, &strings(&["3", "0"])).is_err());
  assert!(table.parse_values(&fields, &strings(&["3", "4"])).is_ok());

  let waiter = adapter(EntityKind::Waiter);
  let fields = waiter.dialog_fields(None, &ChoiceSet::default());
  assert!(waiter.parse_values(&fields, &strings(&["Bob", "call me"])).is_err());
  assert!(waiter.parse_values(&fields, &strings(&["Bob", "+1 (555) 010-2000"])).is_ok());
}

#[test]
fn parse_values_rejects_bad_numbers_and_timestamps() {
  let cook = adapter(EntityKind::Cook);
  let fields = cook.dialog_fields(None, &ChoiceSet::default());
  assert!(matches!(
    cook.parse_values(&fields, &strings(&["Jo", "two", ""])),
    Err(Error::InvalidField { .. })
  ));

  let order = adapter(EntityKind::Order);
  let mut choices = ChoiceSet::default();
  for column in ["table_id", "waiter_id"] {
    choices.insert(column, ResultSet {
      head: vec![],
      rows: vec![Row(vec![Value::Integer(1), Value::Integer(1)])],
    });
  }
  let fields = order.dialog_fields(None, &choices);
  assert!(order.parse_values(&fields, &strings(&["1", "1", "yesterday"])).is_err());
  assert!(order.parse_values(&fields, &strings(&["1", "1", "2024-03-01 19:30"])).is_ok());
}

#[test]
fn heading_capitalizes_like_a_title() {
  assert_eq!(heading("name"), "Name");
  assert_eq!(heading("main_ingredient"), "Main ingredient");
  assert_eq!(heading("ID"), "Id");
  assert_eq!(heading(""), "");
}
