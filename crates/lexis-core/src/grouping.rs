use lexis_types::{DefinitionView, GroupedCategory, Meaning, WordRecord};

/// Groups meanings by part of speech.
///
/// Categories keep the order they are first seen in; meanings keep their
/// original relative order inside each category.
pub fn group(record: &WordRecord) -> Vec<(String, Vec<Meaning>)> {
    let mut groups: Vec<(String, Vec<Meaning>)> = Vec::new();

    for meaning in &record.meanings {
        match groups
            .iter_mut()
            .find(|(part_of_speech, _)| *part_of_speech == meaning.part_of_speech)
        {
            Some((_, meanings)) => meanings.push(meaning.clone()),
            None => groups.push((meaning.part_of_speech.clone(), vec![meaning.clone()])),
        }
    }

    groups
}

/// Saveable categories for a record, sharing the record's first phonetic
pub fn group_categories(record: &WordRecord) -> Vec<GroupedCategory> {
    let phonetic = record.phonetics.first().cloned();

    group(record)
        .into_iter()
        .map(|(part_of_speech, meanings)| GroupedCategory {
            word: record.word.clone(),
            phonetic: phonetic.clone(),
            part_of_speech,
            meanings,
        })
        .collect()
}

pub fn definition_view(record: &WordRecord) -> DefinitionView {
    DefinitionView {
        word: record.word.clone(),
        phonetic: record.phonetics.first().cloned(),
        categories: group_categories(record),
    }
}

#[cfg(test)]
mod tests {
    use lexis_types::{Definition, Phonetic};

    use super::*;

    fn meaning(part_of_speech: &str, defs: &[&str]) -> Meaning {
        Meaning {
            part_of_speech: part_of_speech.to_string(),
            definitions: defs
                .iter()
                .map(|d| Definition {
                    definition: d.to_string(),
                    example: None,
                })
                .collect(),
        }
    }

    fn record(meanings: Vec<Meaning>) -> WordRecord {
        WordRecord {
            word: "set".to_string(),
            phonetics: vec![
                Phonetic {
                    text: Some("/sɛt/".to_string()),
                    audio: None,
                },
                Phonetic::default(),
            ],
            meanings,
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let record = record(vec![
            meaning("noun", &["d1", "d2"]),
            meaning("verb", &["d3"]),
            meaning("noun", &["d4"]),
        ]);

        let groups = group(&record);
        let order: Vec<_> = groups.iter().map(|(pos, _)| pos.as_str()).collect();
        assert_eq!(order, ["noun", "verb"]);

        let (_, nouns) = &groups[0];
        assert_eq!(nouns, &[meaning("noun", &["d1", "d2"]), meaning("noun", &["d4"])]);
    }

    #[test]
    fn categories_are_not_sorted() {
        let record = record(vec![
            meaning("verb", &["v"]),
            meaning("adjective", &["a"]),
            meaning("noun", &["n"]),
        ]);

        let order: Vec<_> = group_categories(&record)
            .into_iter()
            .map(|c| c.part_of_speech)
            .collect();
        assert_eq!(order, ["verb", "adjective", "noun"]);
    }

    #[test]
    fn categories_carry_word_and_first_phonetic() {
        let record = record(vec![meaning("noun", &["d1"]), meaning("verb", &["d2", "d3"])]);

        let categories = group_categories(&record);
        assert_eq!(categories.len(), 2);
        for category in &categories {
            assert_eq!(category.word, "set");
            assert_eq!(category.phonetic, record.phonetics.first().cloned());
        }
        assert_eq!(categories[1].flattened_definitions().len(), 2);
    }

    #[test]
    fn empty_record_has_no_categories() {
        let view = definition_view(&record(vec![]));
        assert!(view.categories.is_empty());
        assert_eq!(view.word, "set");
    }
}
