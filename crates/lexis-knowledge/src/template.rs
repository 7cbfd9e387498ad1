use lexis_types::{Definition, GroupedCategory};

/// Text layout for the nodes created from a saved category.
///
/// Placeholders: `{word}`, `{part_of_speech}`, `{phonetic}`, `{definition}`, `{example}`.
#[derive(Debug, Clone)]
pub struct NodeTemplate {
    pub word_template: String,
    pub definition_template: String,
}

impl NodeTemplate {
    /// Word node holds the bare word, each child a bare definition
    pub fn default_vocabulary() -> Self {
        Self {
            word_template: "{word}".to_string(),
            definition_template: "{definition}".to_string(),
        }
    }

    pub fn new(word: String, definition: String) -> Self {
        Self {
            word_template: word,
            definition_template: definition,
        }
    }

    pub fn format_word(&self, category: &GroupedCategory) -> String {
        fill(&self.word_template, category, None)
    }

    pub fn format_definition(&self, category: &GroupedCategory, definition: &Definition) -> String {
        fill(&self.definition_template, category, Some(definition))
    }
}

impl Default for NodeTemplate {
    fn default() -> Self {
        Self::default_vocabulary()
    }
}

fn fill(template: &str, category: &GroupedCategory, definition: Option<&Definition>) -> String {
    let phonetic = category
        .phonetic
        .as_ref()
        .and_then(|p| p.text())
        .unwrap_or_default();

    template
        .replace("{word}", &category.word)
        .replace("{part_of_speech}", &category.part_of_speech)
        .replace("{phonetic}", phonetic)
        .replace("{definition}", definition.map(|d| d.definition.as_str()).unwrap_or_default())
        .replace(
            "{example}",
            definition.and_then(|d| d.example.as_deref()).unwrap_or_default(),
        )
}
