//! The boundary between controllers and whatever draws dialogs.

use bistro_core::FieldSpec;

pub const NO_SELECTION: &str = "No selected rows";

pub const DELETE_WARNING: &str = "All records with this item will be removed.\nContinue?";

/// First of the two delete prompts.
pub fn delete_question(rows: usize) -> String {
  let plural = if rows > 1 { "s" } else { "" };
  format!("Are you sure you want to delete {rows} selected row{plural}\nand all records with this item?")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Question,
  Warning,
}

/// Modal user interaction. Every call blocks until the user answers.
pub trait Presenter {
  fn info(&mut self, title: &str, message: &str);

  /// A yes/no prompt; `true` means yes.
  fn confirm(&mut self, severity: Severity, title: &str, message: &str) -> bool;

  /// Collect one string per field, in field order. `None` means cancelled.
  fn form(&mut self, title: &str, fields: &[FieldSpec]) -> Option<Vec<String>>;

  /// A failed operation the user must acknowledge.
  fn error(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_pluralises() {
    assert_eq!(
      delete_question(1),
      "Are you sure you want to delete 1 selected row\nand all records with this item?"
    );
    assert!(delete_question(3).starts_with("Are you sure you want to delete 3 selected rows\n"));
  }
}
