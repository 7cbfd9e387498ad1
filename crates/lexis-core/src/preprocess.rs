use lexis_types::{InlineElement, LookupKey, RichText, RichTextElement, Selection};

use crate::token::extract;

pub trait RichTextConverter {
    // Default host rich text to plain text conversion
    fn to_plain_text(&self, rich_text: &RichText) -> String {
        let mut text = String::new();

        for element in rich_text.elements() {
            match element {
                RichTextElement::Plain(s) => text.push_str(s),
                RichTextElement::Inline(InlineElement::Text { text: s })
                | RichTextElement::Inline(InlineElement::Latex { text: s }) => text.push_str(s),
                // Unresolved references have no label to contribute
                RichTextElement::Inline(InlineElement::Reference { text: label, .. }) => {
                    if let Some(label) = label {
                        text.push_str(label);
                    }
                }
                RichTextElement::Inline(InlineElement::Unknown) => {}
            }
        }

        text
    }
}

pub struct DefaultConverter;
impl RichTextConverter for DefaultConverter {}

/// Lookup key for a selection; only text selections produce one
pub fn selection_key(selection: &Selection, converter: &dyn RichTextConverter) -> Option<LookupKey> {
    match selection {
        Selection::Text { rich_text } => extract(Some(&converter.to_plain_text(rich_text))),
        Selection::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_text_bearing_elements() {
        let rich_text = RichText(vec![
            RichTextElement::Plain("  ".to_string()),
            RichTextElement::Inline(InlineElement::Text {
                text: "ephemeral".to_string(),
            }),
            RichTextElement::Inline(InlineElement::Reference {
                id: "r1".to_string(),
                text: Some(" note".to_string()),
            }),
            RichTextElement::Inline(InlineElement::Reference {
                id: "r2".to_string(),
                text: None,
            }),
            RichTextElement::Inline(InlineElement::Unknown),
        ]);

        assert_eq!(DefaultConverter.to_plain_text(&rich_text), "  ephemeral note");
    }

    #[test]
    fn only_text_selections_yield_keys() {
        let key = selection_key(&Selection::text(" Serendipity! is"), &DefaultConverter);
        assert_eq!(key.map(|k| k.to_string()).as_deref(), Some("Serendipity"));

        assert_eq!(selection_key(&Selection::Other, &DefaultConverter), None);
        assert_eq!(selection_key(&Selection::text("?!"), &DefaultConverter), None);
    }
}
