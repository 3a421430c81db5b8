// ABOUTME: Repeatable work-experience blocks with never-reused display indices

use super::field::{Field, FieldKind};

/// Sub-field prefixes; the submitted names are `{prefix}_{index}`
pub const EXPERIENCE_PREFIXES: [&str; 5] = [
    "job_title",
    "company",
    "start_date",
    "end_date",
    "responsibilities",
];

/// Highest index a block can carry. Generated names beyond it are ignored.
pub const MAX_EXPERIENCE_INDEX: u32 = 999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceBlock {
    pub index: u32,
    pub fields: Vec<Field>,
}

impl ExperienceBlock {
    pub fn new(index: u32) -> Self {
        let fields = vec![
            Field::text(&format!("job_title_{index}"), "Job Title"),
            Field::text(&format!("company_{index}"), "Company/Organization"),
            Field::new(format!("start_date_{index}"), "Start Date", FieldKind::Date),
            Field::new(format!("end_date_{index}"), "End Date", FieldKind::Date),
            Field::new(
                format!("responsibilities_{index}"),
                "Responsibilities",
                FieldKind::TextArea,
            ),
        ];
        Self { index, fields }
    }

    pub fn title(&self) -> String {
        format!("Experience {}", self.index)
    }

    /// Value of a sub-field by prefix, e.g. `value("company")`
    pub fn value(&self, prefix: &str) -> &str {
        let key = format!("{prefix}_{}", self.index);
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.trimmed())
            .unwrap_or("")
    }
}

/// Experience blocks. Block 1 exists from the start; added blocks take the
/// next counter value and removed indices are never handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceList {
    blocks: Vec<ExperienceBlock>,
    counter: u32,
}

impl ExperienceList {
    pub fn new() -> Self {
        Self {
            blocks: vec![ExperienceBlock::new(1)],
            counter: 1,
        }
    }

    /// Start empty with a given counter; used when rebuilding from form data
    pub(crate) fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            counter: 0,
        }
    }

    /// Append a fresh block and return its index, or `None` once the
    /// counter has reached `MAX_EXPERIENCE_INDEX`
    pub fn add(&mut self) -> Option<u32> {
        let index = self
            .counter
            .checked_add(1)
            .filter(|n| *n <= MAX_EXPERIENCE_INDEX)?;
        self.counter = index;
        self.blocks.push(ExperienceBlock::new(index));
        Some(index)
    }

    /// Insert a block with an explicit index, keeping the counter ahead of it.
    /// Indices outside `1..=MAX_EXPERIENCE_INDEX` are rejected.
    pub(crate) fn insert_with_index(&mut self, index: u32) -> Option<&mut ExperienceBlock> {
        if index == 0 || index > MAX_EXPERIENCE_INDEX {
            return None;
        }
        self.counter = self.counter.max(index);
        let pos = self
            .blocks
            .iter()
            .position(|b| b.index > index)
            .unwrap_or(self.blocks.len());
        self.blocks.insert(pos, ExperienceBlock::new(index));
        self.blocks.get_mut(pos)
    }

    /// Remove exactly the block with this index
    pub fn remove(&mut self, index: u32) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.index != index);
        self.blocks.len() != before
    }

    pub fn blocks(&self) -> &[ExperienceBlock] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [ExperienceBlock] {
        &mut self.blocks
    }

    pub fn block(&self, index: u32) -> Option<&ExperienceBlock> {
        self.blocks.iter().find(|b| b.index == index)
    }

    /// Highest index handed out so far
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for ExperienceList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_block_pre_exists() {
        let list = ExperienceList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.blocks()[0].index, 1);
        assert_eq!(list.blocks()[0].fields[0].key, "job_title_1");
    }

    #[test]
    fn test_generated_blocks_start_at_two() {
        let mut list = ExperienceList::new();
        assert_eq!(list.add(), Some(2));
        let keys: Vec<&str> = list.blocks()[1].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            ["job_title_2", "company_2", "start_date_2", "end_date_2", "responsibilities_2"]
        );
    }

    #[test]
    fn test_indices_never_reused() {
        let mut list = ExperienceList::new();
        let mut last = list.counter();
        for _ in 0..3 {
            let idx = list.add().unwrap();
            assert!(idx > last);
            last = idx;
        }
        assert!(list.remove(3));
        assert!(!list.remove(3));
        assert_eq!(list.add(), Some(5));
        let indices: Vec<u32> = list.blocks().iter().map(|b| b.index).collect();
        assert_eq!(indices, [1, 2, 4, 5]);
    }

    #[test]
    fn test_insert_with_index_keeps_order_and_counter() {
        let mut list = ExperienceList::empty();
        list.insert_with_index(4);
        list.insert_with_index(2);
        assert_eq!(list.counter(), 4);
        assert_eq!(list.add(), Some(5));
        let indices: Vec<u32> = list.blocks().iter().map(|b| b.index).collect();
        assert_eq!(indices, [2, 4, 5]);
    }

    #[test]
    fn test_counter_stops_at_max_index() {
        let mut list = ExperienceList::empty();
        assert!(list.insert_with_index(MAX_EXPERIENCE_INDEX).is_some());
        assert!(list.insert_with_index(MAX_EXPERIENCE_INDEX + 1).is_none());
        assert!(list.insert_with_index(u32::MAX).is_none());
        assert_eq!(list.add(), None);
        assert_eq!(list.len(), 1);
        assert_eq!(list.counter(), MAX_EXPERIENCE_INDEX);
    }
}
