use std::fmt::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use lexis_config::Config;
use lexis_types::{AppEvent, DefinitionView, NotificationLevel};
use tokio::sync::RwLock;

/// Terminal presenter
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::ShowDefinitions(view) => {
                let show_examples = config.read().await.ui.show_examples;
                println!("{}", render_view(&view, show_examples));
            }
            AppEvent::ClearDefinitions => println!("No definitions found\n"),
            AppEvent::Notify(notification) => match notification.level {
                NotificationLevel::Info => println!("✓ {}", notification.message),
                NotificationLevel::Error => println!("✗ {}", notification.message),
            },
            AppEvent::Shutdown => break,
            _ => {}
        }
    }

    Ok(())
}

pub fn render_view(view: &DefinitionView, show_examples: bool) -> String {
    let mut out = capitalize(&view.word);

    if let Some(phonetic) = &view.phonetic {
        if let Some(text) = phonetic.text() {
            let _ = write!(out, " {text}");
        }
        if phonetic.audio_url().is_some() {
            out.push_str(" 🔊");
        }
    }
    out.push('\n');

    for (index, category) in view.categories.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n[{}] {}  (:save {})",
            index + 1,
            category.part_of_speech,
            index + 1
        );

        for (number, definition) in category.flattened_definitions().into_iter().enumerate() {
            let text = definition
                .definition
                .strip_suffix('.')
                .unwrap_or(&definition.definition);
            let _ = write!(out, "  {}. {}", number + 1, text);

            if show_examples && let Some(example) = &definition.example {
                let _ = write!(out, ": {example}");
            }
            out.push('\n');
        }
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use lexis_types::{Definition, GroupedCategory, Meaning, Phonetic};

    use super::*;

    fn definition(text: &str, example: Option<&str>) -> Definition {
        Definition {
            definition: text.to_string(),
            example: example.map(str::to_string),
        }
    }

    fn view() -> DefinitionView {
        let phonetic = Phonetic {
            text: Some("/həˈləʊ/".to_string()),
            audio: Some("https://example.org/hello.mp3".to_string()),
        };
        let meanings = |pos: &str, defs: Vec<Definition>| Meaning {
            part_of_speech: pos.to_string(),
            definitions: defs,
        };

        DefinitionView {
            word: "hello".to_string(),
            phonetic: Some(phonetic.clone()),
            categories: vec![
                GroupedCategory {
                    word: "hello".to_string(),
                    phonetic: Some(phonetic.clone()),
                    part_of_speech: "noun".to_string(),
                    meanings: vec![
                        meanings("noun", vec![definition("A greeting.", None)]),
                        meanings(
                            "noun",
                            vec![definition("An expression of surprise..", Some("Hello, what's this?"))],
                        ),
                    ],
                },
                GroupedCategory {
                    word: "hello".to_string(),
                    phonetic: Some(phonetic),
                    part_of_speech: "verb".to_string(),
                    meanings: vec![meanings("verb", vec![definition("To greet with \"hello\".", None)])],
                },
            ],
        }
    }

    #[test]
    fn renders_header_and_numbered_categories() {
        let rendered = render_view(&view(), true);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Hello /həˈləʊ/ 🔊");
        assert_eq!(lines[2], "[1] noun  (:save 1)");
        assert_eq!(lines[3], "  1. A greeting");
        // only one trailing period is removed
        assert_eq!(lines[4], "  2. An expression of surprise.: Hello, what's this?");
        assert_eq!(lines[6], "[2] verb  (:save 2)");
        assert_eq!(lines[7], "  1. To greet with \"hello\"");
    }

    #[test]
    fn examples_can_be_hidden() {
        let rendered = render_view(&view(), false);
        assert!(!rendered.contains("what's this"));
    }

    #[test]
    fn missing_phonetic_renders_word_only() {
        let mut view = view();
        view.phonetic = None;
        view.categories.clear();
        assert_eq!(render_view(&view, true), "Hello\n");
    }
}
