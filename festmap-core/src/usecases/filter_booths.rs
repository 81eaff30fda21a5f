use super::prelude::*;

#[derive(Debug, Clone)]
pub struct BoothFilter {
    /// Case-insensitive match against name, description and tags.
    pub text: Option<String>,
    /// Empty means any category.
    pub categories: Vec<BoothCategory>,
    pub congestion: Option<CongestionLevel>,
    pub only_active: bool,
}

impl Default for BoothFilter {
    fn default() -> Self {
        Self {
            text: None,
            categories: vec![],
            congestion: None,
            only_active: true,
        }
    }
}

impl BoothFilter {
    pub fn matches(&self, booth: &Booth) -> bool {
        if self.only_active && !booth.is_active {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&booth.category) {
            return false;
        }
        if self.congestion.is_some() && booth.congestion() != self.congestion {
            return false;
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let text = text.to_lowercase();
                booth.name.to_lowercase().contains(&text)
                    || booth.description.to_lowercase().contains(&text)
                    || booth.tags.iter().any(|t| t.to_lowercase().contains(&text))
            }
        }
    }
}

pub fn filter_booths<'a>(booths: &'a [Booth], filter: &BoothFilter) -> Vec<&'a Booth> {
    booths.iter().filter(|b| filter.matches(b)).collect()
}
