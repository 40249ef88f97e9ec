use std::convert::TryFrom;

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;

use crate::movie::Category;
use crate::person::Role;
use crate::validation::integer_value;

/// An entity ID. Always positive.
pub type Id = u64;

/// A label for a choice, numbered from 1 in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Label(Id, &'static str);

impl Label {
    pub fn new(id: Id, label: &'static str) -> Self {
        Label(id, label)
    }
}

/// A closed set of named values that may be given either by name or
/// by 1-based index.
pub trait Enumeration: Copy + Sized + 'static {
    /// Every value, in index order.
    const VALUES: &'static [Self];

    /// The name used in persisted documents.
    fn name(self) -> &'static str;

    fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Self::VALUES.get(i).copied())
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();

        Self::VALUES
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    /// Parses a name, an index or an index string.
    fn from_value(value: &Value) -> Option<Self> {
        if let Some(index) = integer_value(value) {
            return Self::from_index(index);
        }

        value.as_str().and_then(Self::from_name)
    }

    fn labels() -> Vec<Label> {
        Self::VALUES
            .iter()
            .zip(1..)
            .map(|(v, i)| Label::new(i, v.name()))
            .collect()
    }
}

lazy_static! {
    static ref ROLE_LABELS: Vec<Label> = Role::labels();
    static ref CATEGORY_LABELS: Vec<Label> = Category::labels();
}

/// Returns the labels of the person roles.
pub fn roles() -> &'static [Label] {
    &ROLE_LABELS
}

/// Returns the labels of the movie categories.
pub fn categories() -> &'static [Label] {
    &CATEGORY_LABELS
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn labels_are_numbered_from_one() {
        assert_eq!(
            roles(),
            &[Label::new(1, "director"), Label::new(2, "actor")][..]
        );
        assert_eq!(
            categories(),
            &[Label::new(1, "tvSeriesEpisode"), Label::new(2, "biography")][..]
        );
    }

    #[test]
    fn values_parse_from_names_and_indices() {
        assert_eq!(Role::from_value(&json!("actor")), Some(Role::Actor));
        assert_eq!(Role::from_value(&json!("Director")), Some(Role::Director));
        assert_eq!(Role::from_value(&json!(1)), Some(Role::Director));
        assert_eq!(Role::from_value(&json!("2")), Some(Role::Actor));
        assert_eq!(Category::from_value(&json!(2)), Some(Category::Biography));

        assert_eq!(Role::from_value(&json!(0)), None);
        assert_eq!(Role::from_value(&json!(3)), None);
        assert_eq!(Role::from_value(&json!("producer")), None);
        assert_eq!(Role::from_value(&json!(null)), None);
    }
}
