use crate::condition::{Column, Condition};

///
/// ColumnConditions
///
/// All conditions referencing one column, in statement order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnConditions<'a> {
    pub column: &'a Column,
    pub conditions: Vec<&'a Condition>,
}

///
/// ConditionsMap
///
/// Insertion-ordered `Column -> [Condition]` mapping.
///
/// Column order is the order of first occurrence. Conjunctions are short,
/// so lookups scan linearly instead of hashing.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionsMap<'a> {
    entries: Vec<ColumnConditions<'a>>,
}

impl<'a> ConditionsMap<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a condition to its column group, opening the group if needed.
    pub fn push(&mut self, condition: &'a Condition) {
        match self.position(condition.column()) {
            Some(index) => self.entries[index].conditions.push(condition),
            None => self.entries.push(ColumnConditions {
                column: condition.column(),
                conditions: vec![condition],
            }),
        }
    }

    /// Insert a whole column group unless the column is already present.
    /// Returns false when an existing group was kept.
    pub fn insert_if_absent(&mut self, column: &'a Column, conditions: Vec<&'a Condition>) -> bool {
        if self.contains(column) {
            return false;
        }
        self.entries.push(ColumnConditions { column, conditions });

        true
    }

    /// Merge `other` into a copy of `self`; groups already in `self` win.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        let mut merged = Self::with_capacity(self.len() + other.len());
        merged.entries.extend(self.entries.iter().cloned());
        for entry in &other.entries {
            merged.insert_if_absent(entry.column, entry.conditions.clone());
        }

        merged
    }

    #[must_use]
    pub fn get(&self, column: &Column) -> Option<&[&'a Condition]> {
        self.position(column)
            .map(|index| self.entries[index].conditions.as_slice())
    }

    #[must_use]
    pub fn contains(&self, column: &Column) -> bool {
        self.position(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'a Column> + '_ {
        self.entries.iter().map(|entry| entry.column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnConditions<'a>> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, column: &Column) -> Option<usize> {
        self.entries.iter().position(|entry| entry.column == column)
    }
}

impl<'a> FromIterator<&'a Condition> for ConditionsMap<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Condition>>(iter: I) -> Self {
        let mut map = Self::new();
        for condition in iter {
            map.push(condition);
        }

        map
    }
}

impl<'m, 'a> IntoIterator for &'m ConditionsMap<'a> {
    type Item = &'m ColumnConditions<'a>;
    type IntoIter = std::slice::Iter<'m, ColumnConditions<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
