//! Rendering of the typed filter specification to a LanceDB predicate.
//!
//! `VectorFilter` is a closed set; anything the engine can't express as one
//! of its variants simply cannot reach the index, which replaces the
//! stringly-typed filter building the original flow used.

use wsic_core::types::VectorFilter;

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn render_one(filter: &VectorFilter) -> String {
    match filter {
        VectorFilter::DifficultyEquals(d) => format!("difficulty = {}", quote(d.as_str())),
        VectorFilter::ContentTypeEquals(ct) => format!("content_type = {}", quote(ct)),
        VectorFilter::PublishedOnly => "is_published = true".to_string(),
    }
}

/// AND-combine filters into one `only_if` predicate. `None` when the filter
/// list is empty.
pub fn render_predicate(filters: &[VectorFilter]) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    Some(
        filters
            .iter()
            .map(render_one)
            .collect::<Vec<_>>()
            .join(" AND "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsic_core::types::Difficulty;

    #[test]
    fn empty_filter_list_renders_nothing() {
        assert_eq!(render_predicate(&[]), None);
    }

    #[test]
    fn filters_combine_with_and() {
        let predicate = render_predicate(&[
            VectorFilter::PublishedOnly,
            VectorFilter::DifficultyEquals(Difficulty::Beginner),
        ])
        .expect("predicate");
        assert_eq!(
            predicate,
            "is_published = true AND difficulty = 'beginner'"
        );
    }

    #[test]
    fn content_type_quotes_are_escaped() {
        let predicate =
            render_predicate(&[VectorFilter::ContentTypeEquals("it's".to_string())])
                .expect("predicate");
        assert_eq!(predicate, "content_type = 'it''s'");
    }
}
