use serde::{Deserialize, Serialize};

/// Current selection in the host editor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Selection {
    Text {
        #[serde(rename = "richText")]
        rich_text: RichText,
    },
    /// Node selections, empty selections and anything else
    #[default]
    #[serde(other)]
    Other,
}

impl Selection {
    pub fn text(text: impl Into<String>) -> Self {
        Selection::Text {
            rich_text: RichText::plain(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextElement>);

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self(vec![RichTextElement::Plain(text.into())])
    }

    pub fn elements(&self) -> &[RichTextElement] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichTextElement {
    Plain(String),
    Inline(InlineElement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "i")]
pub enum InlineElement {
    /// Formatted text span
    #[serde(rename = "m")]
    Text { text: String },
    #[serde(rename = "q")]
    Reference {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    #[serde(rename = "x")]
    Latex { text: String },
    #[serde(other)]
    Unknown,
}
