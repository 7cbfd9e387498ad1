use std::fmt;

use serde::{Deserialize, Serialize};

/// Single-word lookup key, always non-empty ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LookupKey(String);

impl LookupKey {
    /// Accepts an already cleaned token, rejects anything else
    pub fn new(token: &str) -> Option<Self> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic()) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LookupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags a lookup with the generation it was issued under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub key: LookupKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

impl Phonetic {
    /// The API sends `""` for missing recordings
    pub fn audio_url(&self) -> Option<&str> {
        self.audio.as_deref().filter(|a| !a.is_empty())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// One part-of-speech group, the unit a user saves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedCategory {
    pub word: String,
    pub phonetic: Option<Phonetic>,
    pub part_of_speech: String,
    pub meanings: Vec<Meaning>,
}

impl GroupedCategory {
    /// Definition texts across all meanings, in order
    pub fn flattened_definitions(&self) -> Vec<&Definition> {
        self.meanings
            .iter()
            .flat_map(|m| m.definitions.iter())
            .collect()
    }
}

/// Display-ready shape of a word record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionView {
    pub word: String,
    pub phonetic: Option<Phonetic>,
    pub categories: Vec<GroupedCategory>,
}
