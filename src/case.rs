//! Property name conversion between the client (camelCase) and album table columns (snake_case).

/// e.g. "releaseDate" -> "release_date"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Sortable album columns.
const SORTABLE_COLUMNS: &[&str] = &["id", "title", "artist", "release_date"];

/// Map a client sort property to its column, or None when the album has no such column.
pub fn sort_column(property: &str) -> Option<&'static str> {
    let snake = to_snake_case(property);
    SORTABLE_COLUMNS.iter().copied().find(|c| *c == snake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_to_snake() {
        assert_eq!(to_snake_case("releaseDate"), "release_date");
        assert_eq!(to_snake_case("id"), "id");
    }

    #[test]
    fn sort_column_rejects_unknown_properties() {
        assert_eq!(sort_column("releaseDate"), Some("release_date"));
        assert_eq!(sort_column("title"), Some("title"));
        assert_eq!(sort_column("title; DROP TABLE album"), None);
    }
}
