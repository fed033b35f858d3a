//! Builders for SQL statement text
//!
//! Text generation only; the statements use named `:column`
//! placeholders and are meant to be handed to whatever database layer
//! actually executes them. Identifiers are validated, values never
//! appear in the text, so there is nothing to quote.

use sundry_core::{Error, Result};

/// `INSERT INTO <table> (...) VALUES (:..., ...)`
///
/// ```
/// use sundry::sql::insert;
///
/// assert_eq!(
///     insert("users", &["name", "email"]).unwrap(),
///     "INSERT INTO users (name, email) VALUES (:name, :email)"
/// );
/// ```
pub fn insert(table: &str, columns: &[&str]) -> Result<String> {
    check_identifier(table)?;
    if columns.is_empty() {
        return Err(Error::invalid_value("columns", "nothing to insert"));
    }
    for column in columns {
        check_identifier(column)?;
    }
    let placeholders: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
    Ok(format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    ))
}

/// `UPDATE <table> SET ... WHERE ...`
///
/// An empty `where_columns` list is refused: the statement would hit
/// every row of the table.
///
/// ```
/// use sundry::sql::update;
///
/// assert_eq!(
///     update("users", &["email"], &["id"]).unwrap(),
///     "UPDATE users SET email = :email WHERE id = :id"
/// );
/// ```
pub fn update(table: &str, set_columns: &[&str], where_columns: &[&str]) -> Result<String> {
    check_identifier(table)?;
    if set_columns.is_empty() {
        return Err(Error::invalid_value("set_columns", "nothing to update"));
    }
    let assignments = placeholder_pairs(set_columns)?;
    Ok(format!(
        "UPDATE {table} SET {} WHERE {}",
        assignments.join(", "),
        where_clause(table, where_columns)?
    ))
}

/// `DELETE FROM <table> WHERE ...`
///
/// The same empty-filter guard as for [`update`] applies.
pub fn delete(table: &str, where_columns: &[&str]) -> Result<String> {
    check_identifier(table)?;
    Ok(format!(
        "DELETE FROM {table} WHERE {}",
        where_clause(table, where_columns)?
    ))
}

/// `SELECT ... FROM <table> [WHERE ...] [ORDER BY ...]`
///
/// An empty column list selects `*`; unlike [`update`] and [`delete`],
/// an unfiltered select is legitimate.
///
/// ```
/// use sundry::sql::select;
///
/// assert_eq!(
///     select("users", &["id", "name"], &["group_id"], &["name"]).unwrap(),
///     "SELECT id, name FROM users WHERE group_id = :group_id ORDER BY name"
/// );
/// assert_eq!(select("users", &[], &[], &[]).unwrap(), "SELECT * FROM users");
/// ```
pub fn select(
    table: &str,
    columns: &[&str],
    where_columns: &[&str],
    order_by: &[&str],
) -> Result<String> {
    check_identifier(table)?;
    for column in columns.iter().chain(order_by) {
        check_identifier(column)?;
    }
    let what = if columns.is_empty() {
        "*".to_string()
    } else {
        columns.join(", ")
    };
    let mut stmt = format!("SELECT {what} FROM {table}");
    if !where_columns.is_empty() {
        let conditions = placeholder_pairs(where_columns)?;
        stmt.push_str(" WHERE ");
        stmt.push_str(&conditions.join(" AND "));
    }
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY ");
        stmt.push_str(&order_by.join(", "));
    }
    Ok(stmt)
}

/// `column = :column` for each column
fn placeholder_pairs(columns: &[&str]) -> Result<Vec<String>> {
    columns
        .iter()
        .map(|column| {
            check_identifier(column)?;
            Ok(format!("{column} = :{}", placeholder_name(column)))
        })
        .collect()
}

fn where_clause(table: &str, where_columns: &[&str]) -> Result<String> {
    if where_columns.is_empty() {
        return Err(Error::InsufficientQuery {
            data: format!("empty filter for table {table}"),
        });
    }
    Ok(placeholder_pairs(where_columns)?.join(" AND "))
}

/// Qualified columns like `users.id` bind as `:users_id`
fn placeholder_name(column: &str) -> String {
    column.replace('.', "_")
}

/// Letters, digits and underscores, possibly dot-qualified
fn check_identifier(name: &str) -> Result<()> {
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    };
    if !name.is_empty() && name.split('.').all(valid_part) {
        return Ok(());
    }
    Err(Error::InvalidIdentifier {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        assert_eq!(
            insert("groupmemberships", &["group_id", "member_id"]).unwrap(),
            "INSERT INTO groupmemberships (group_id, member_id) \
             VALUES (:group_id, :member_id)"
        );
        assert!(insert("t", &[]).is_err());
    }

    #[test]
    fn test_update_requires_filter() {
        assert_eq!(
            update("users", &["email", "name"], &["id"]).unwrap(),
            "UPDATE users SET email = :email, name = :name WHERE id = :id"
        );
        let err = update("users", &["email"], &[]).unwrap_err();
        assert!(matches!(err, Error::InsufficientQuery { .. }));
    }

    #[test]
    fn test_delete_requires_filter() {
        assert_eq!(
            delete("sessions", &["user_id", "expired"]).unwrap(),
            "DELETE FROM sessions WHERE user_id = :user_id AND expired = :expired"
        );
        assert!(delete("sessions", &[]).is_err());
    }

    #[test]
    fn test_select_variants() {
        assert_eq!(select("users", &[], &[], &[]).unwrap(), "SELECT * FROM users");
        assert_eq!(
            select("users", &["id"], &[], &["id"]).unwrap(),
            "SELECT id FROM users ORDER BY id"
        );
    }

    #[test]
    fn test_qualified_identifiers() {
        assert_eq!(
            select("public.users", &["users.id"], &["users.group_id"], &[]).unwrap(),
            "SELECT users.id FROM public.users WHERE users.group_id = :users_group_id"
        );
    }

    #[test]
    fn test_evil_identifiers_refused() {
        for name in ["users; DROP TABLE x", "", "1abc", "a-b", "a..b", "users."] {
            let err = select(name, &[], &[], &[]).unwrap_err();
            assert!(matches!(err, Error::InvalidIdentifier { .. }), "{name}");
        }
        assert!(insert("t", &["va lue"]).is_err());
    }
}
