use serde::Serialize;

use crate::types::external::GqlCountry;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub capital: Option<String>,
    pub emoji: String,
    pub languages: Vec<Language>,
}

impl Country {
    /// A country can carry every question type only with a capital and a language.
    pub fn is_playable(&self) -> bool {
        self.capital.is_some() && !self.languages.is_empty()
    }
}

impl From<GqlCountry> for Country {
    fn from(c: GqlCountry) -> Self {
        Country {
            code: c.code.trim().to_string(),
            name: c.name.trim().to_string(),
            capital: c
                .capital
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            emoji: c.emoji,
            languages: c
                .languages
                .into_iter()
                .map(|l| Language { code: l.code, name: l.name })
                .collect(),
        }
    }
}
