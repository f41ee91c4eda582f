use folio_fx::FxConfig;

const PHRASES_JSON: &str = include_str!("../phrases.json");

/// Default effects with this page's phrases.
pub fn page_config() -> FxConfig {
    match serde_json::from_str::<Vec<String>>(PHRASES_JSON) {
        Ok(phrases) => FxConfig::default().with_phrases(phrases).or_default(),
        Err(err) => {
            log::error!("bundled phrases.json is invalid: {}", err);
            FxConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_phrases_load() {
        let config = page_config();
        assert_eq!(
            config.typewriter.phrases,
            vec!["Ксения Новикова", "будущий разработчик", "и да, я боюсь пауков :)"]
        );
        assert!(config.validate().is_ok());
    }
}
