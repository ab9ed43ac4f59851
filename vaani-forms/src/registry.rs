//! Lookup of the shipped schemas by slug.

use vaani_form_types::FormSchema;

use crate::{bank_account, consumer, pan, rti, voter_id};

/// All shipped schemas, in menu order.
pub fn all() -> Vec<FormSchema> {
    vec![
        voter_id::schema(),
        pan::schema(),
        rti::schema(),
        consumer::schema(),
        bank_account::schema(),
    ]
}

/// Find a schema by its slug.
pub fn by_slug(slug: &str) -> Option<FormSchema> {
    all().into_iter().find(|schema| schema.slug() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_unique_and_resolvable() {
        let schemas = all();
        for schema in &schemas {
            let found = by_slug(schema.slug()).unwrap();
            assert_eq!(found.title(), schema.title());
        }

        let mut slugs: Vec<_> = schemas.iter().map(|schema| schema.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), schemas.len());
    }

    #[test]
    fn unknown_slug_resolves_to_none() {
        assert!(by_slug("marriage-certificate").is_none());
    }
}
