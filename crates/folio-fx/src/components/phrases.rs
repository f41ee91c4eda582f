use crate::api::error::ConfigError;

/// One phrase with its character boundaries precomputed, so prefixes can be
/// sliced by character count without rescanning UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    /// `bounds[n]` is the byte offset just past the first `n` chars.
    bounds: Vec<usize>,
}

impl Phrase {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut bounds = Vec::with_capacity(text.len() + 1);
        bounds.push(0);
        bounds.extend(text.char_indices().map(|(i, c)| i + c.len_utf8()));
        Self { text, bounds }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first `chars` characters. Counts past the end give the whole phrase.
    pub fn prefix(&self, chars: usize) -> &str {
        let end = self.bounds[chars.min(self.len())];
        &self.text[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Fixed, non-empty, cyclic list of phrases for the typewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseList {
    phrases: Vec<Phrase>,
}

impl PhraseList {
    /// Build from any list of strings. Rejects an empty list.
    pub fn new<I, S>(phrases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<Phrase> = phrases.into_iter().map(Phrase::new).collect();
        if phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        Ok(Self { phrases })
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let phrases: Vec<String> = serde_json::from_str(json)?;
        Self::new(phrases)
    }

    /// Phrase at `index`, wrapping around the list.
    pub fn get(&self, index: usize) -> &Phrase {
        &self.phrases[index % self.phrases.len()]
    }

    /// Index following `index`, wrapping after the last phrase.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phrases.len()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phrase> {
        self.phrases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrillic_prefixes_split_on_chars() {
        let p = Phrase::new("Ксения Новикова");
        assert_eq!(p.len(), 15);
        assert_eq!(p.prefix(0), "");
        assert_eq!(p.prefix(1), "К");
        assert_eq!(p.prefix(6), "Ксения");
        assert_eq!(p.prefix(15), "Ксения Новикова");
        assert_eq!(p.prefix(99), "Ксения Новикова");
    }

    #[test]
    fn empty_phrase() {
        let p = Phrase::new("");
        assert!(p.is_empty());
        assert_eq!(p.prefix(3), "");
    }

    #[test]
    fn parse_and_wrap() {
        let list = PhraseList::from_json(r#"["alpha", "beta", "gamma"]"#).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(5).as_str(), "gamma");
        assert_eq!(list.next_index(0), 1);
        assert_eq!(list.next_index(2), 0);
    }

    #[test]
    fn empty_list_rejected() {
        assert!(matches!(PhraseList::from_json("[]"), Err(ConfigError::NoPhrases)));
        assert!(matches!(
            PhraseList::new(Vec::<String>::new()),
            Err(ConfigError::NoPhrases)
        ));
    }
}
