use std::collections::HashMap;

use itertools::Itertools;

use super::tag::{Category, Tag};

/// Occurrence counts per distinct tag, split into the four fixed categories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    pub positive: HashMap<Tag, usize>,
    pub negative: HashMap<Tag, usize>,
    pub neutral: HashMap<Tag, usize>,
    pub other: HashMap<Tag, usize>,
}

impl CategoryTable {
    pub fn bucket(&self, category: Category) -> &HashMap<Tag, usize> {
        match category {
            Category::Positive => &self.positive,
            Category::Negative => &self.negative,
            Category::Neutral => &self.neutral,
            Category::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut HashMap<Tag, usize> {
        match category {
            Category::Positive => &mut self.positive,
            Category::Negative => &mut self.negative,
            Category::Neutral => &mut self.neutral,
            Category::Other => &mut self.other,
        }
    }

    pub fn category_sum(&self, category: Category) -> usize {
        self.bucket(category).values().sum()
    }

    /// Entries of one category, highest count first, ties broken by tag text.
    pub fn sorted_entries(&self, category: Category) -> Vec<(&Tag, usize)> {
        self.bucket(category)
            .iter()
            .map(|(tag, count)| (tag, *count))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }
}

/// Groups the flattened tag sequence by value and files each distinct tag
/// under exactly one category. Returns the table and the total tag count.
pub fn aggregate(tags: &[Tag]) -> (CategoryTable, usize) {
    let mut table = CategoryTable::default();

    for (tag, count) in tags.iter().counts() {
        table
            .bucket_mut(Category::classify(tag))
            .insert(tag.clone(), count);
    }

    (table, tags.len())
}
