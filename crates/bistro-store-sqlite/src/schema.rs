//! SQL schema for a fresh restaurant database.
//!
//! The editor normally opens an existing file; this DDL is only applied when
//! asked to (`--init-schema`). Foreign keys are declared but not enforced so
//! that dangling references reach integrity repair instead of failing the
//! delete.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = OFF;

CREATE TABLE IF NOT EXISTS Unit (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS DishType (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS RestaurantTable (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    number  INTEGER NOT NULL,
    seats   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS Waiter (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT NOT NULL,
    phone  TEXT
);

CREATE TABLE IF NOT EXISTS Cook (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL,
    experience    INTEGER NOT NULL DEFAULT 0,
    specialty_id  INTEGER REFERENCES DishType(id)
);

CREATE TABLE IF NOT EXISTS Ingredient (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT    NOT NULL,
    unit_id  INTEGER NOT NULL REFERENCES Unit(id),
    price    REAL    NOT NULL
);

CREATE TABLE IF NOT EXISTS Dish (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT    NOT NULL,
    dish_type_id        INTEGER NOT NULL REFERENCES DishType(id),
    main_ingredient_id  INTEGER NOT NULL REFERENCES Ingredient(id),
    price               REAL    NOT NULL
);

CREATE TABLE IF NOT EXISTS DishIngredient (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    dish_id        INTEGER NOT NULL REFERENCES Dish(id),
    ingredient_id  INTEGER NOT NULL REFERENCES Ingredient(id),
    quantity       REAL    NOT NULL
);

-- `Order` is a keyword; the table is plural.
CREATE TABLE IF NOT EXISTS Orders (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    table_id   INTEGER NOT NULL REFERENCES RestaurantTable(id),
    waiter_id  INTEGER NOT NULL REFERENCES Waiter(id),
    placed_at  TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS OrderDish (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id  INTEGER NOT NULL REFERENCES Orders(id),
    dish_id   INTEGER NOT NULL REFERENCES Dish(id),
    count     INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS ingredient_unit_idx     ON Ingredient(unit_id);
CREATE INDEX IF NOT EXISTS dish_type_idx           ON Dish(dish_type_id);
CREATE INDEX IF NOT EXISTS dish_ingredient_dish_idx ON DishIngredient(dish_id);
CREATE INDEX IF NOT EXISTS order_dish_order_idx    ON OrderDish(order_id);

PRAGMA user_version = 1;
";
