// ABOUTME: Tag-style picker for skills and languages - ordered, duplicate-free list mirrored
// into one hidden value

/// Skill list with the input box that feeds it.
///
/// Every mutation re-serializes the whole sequence into `hidden`, so the
/// hidden value always equals the skills joined by commas in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillList {
    skills: Vec<String>,
    hidden: String,
    /// Contents of the "add a skill" input
    pub draft: String,
}

pub const SKILLS_FIELD: &str = "skills";
pub const LANGUAGES_FIELD: &str = "languages";

impl SkillList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed, non-empty skill that is not already present
    pub fn add(&mut self, text: &str) -> bool {
        let skill = text.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        self.sync_hidden();
        true
    }

    /// Remove the (single) entry equal to `text`
    pub fn remove(&mut self, text: &str) -> bool {
        let Some(pos) = self.skills.iter().position(|s| s == text) else {
            return false;
        };
        self.skills.remove(pos);
        self.sync_hidden();
        true
    }

    /// Add whatever is typed in the input box. The box is cleared only when
    /// the skill was actually added.
    pub fn commit_draft(&mut self) -> Option<String> {
        let skill = self.draft.trim().to_string();
        if self.add(&skill) {
            self.draft.clear();
            Some(skill)
        } else {
            None
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        self.skills.iter().any(|s| s == text)
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.skills.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Comma-joined mirror consumed by the flat form data
    pub fn hidden_value(&self) -> &str {
        &self.hidden
    }

    fn sync_hidden(&mut self) {
        self.hidden = self.skills.join(",");
    }
}
