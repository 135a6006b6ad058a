use memo_fiche::{highlight, Fragment, Glossary};

fn glossary_of(entries: &[(&str, &str)]) -> Glossary {
    let mut glossary = Glossary::new();
    for (term, definition) in entries {
        glossary.upsert(term, definition.to_string());
    }
    glossary
}

fn annotated(fragments: &[Fragment]) -> Vec<&str> {
    fragments
        .iter()
        .filter(|fragment| fragment.is_term())
        .map(Fragment::text)
        .collect()
}

#[test]
fn empty_glossary_returns_input_as_single_fragment() {
    let glossary = Glossary::new();
    let fragments = highlight("Prurit vulvaire intense", &glossary);
    assert_eq!(
        fragments,
        vec![Fragment::Text {
            text: "Prurit vulvaire intense".to_string()
        }]
    );
}

#[test]
fn empty_input_returns_single_empty_fragment() {
    let glossary = glossary_of(&[("candida", "a yeast")]);
    let fragments = highlight("", &glossary);
    assert_eq!(
        fragments,
        vec![Fragment::Text {
            text: String::new()
        }]
    );
}

#[test]
fn matches_whole_words_case_insensitively() {
    let glossary = glossary_of(&[("candida", "a yeast")]);
    let text = "Candida albicans causes candidosis, and candida thrives in moisture";
    let fragments = highlight(text, &glossary);

    // Both surface forms are annotated; "candidosis" is not a whole-word
    // match and stays plain.
    assert_eq!(annotated(&fragments), vec!["Candida", "candida"]);
    let rebuilt: String = fragments.iter().map(Fragment::text).collect::<String>();
    assert_eq!(rebuilt, text);

    for fragment in &fragments {
        if let Fragment::Term { definition, term, .. } = fragment {
            assert_eq!(term, "candida");
            assert_eq!(definition, "a yeast");
        }
    }
}

#[test]
fn earlier_registered_terms_win_on_overlap() {
    let text = "Candida albicans est une levure.";

    let phrase_first = glossary_of(&[
        ("candida albicans", "the species"),
        ("candida", "the genus"),
    ]);
    let fragments = highlight(text, &phrase_first);
    assert_eq!(annotated(&fragments), vec!["Candida albicans"]);

    let word_first = glossary_of(&[
        ("candida", "the genus"),
        ("candida albicans", "the species"),
    ]);
    let fragments = highlight(text, &word_first);
    // "candida" claimed its match first; the phrase matcher never sees a
    // plain fragment containing the full phrase.
    assert_eq!(annotated(&fragments), vec!["Candida"]);
}

#[test]
fn special_characters_in_terms_are_matched_literally() {
    let glossary = glossary_of(&[("candida?", "never matches literally here")]);
    // An unescaped pattern would make the trailing character optional and
    // match "candid".
    let fragments = highlight("a candid remark", &glossary);
    assert!(annotated(&fragments).is_empty());
}

#[test]
fn full_match_produces_no_empty_fragments() {
    let glossary = glossary_of(&[("candida", "a yeast")]);
    let fragments = highlight("candida", &glossary);
    assert_eq!(fragments.len(), 1);
    assert!(fragments[0].is_term());
}

#[test]
fn output_is_deterministic_for_identical_inputs() {
    let glossary = glossary_of(&[
        ("prurit vulvaire", "démangeaisons"),
        ("leucorrhées", "pertes vaginales"),
        ("candida", "levure"),
    ]);
    let text = "Le prurit vulvaire accompagne les leucorrhées dues à Candida.";
    assert_eq!(highlight(text, &glossary), highlight(text, &glossary));
}

#[test]
fn accented_terms_match_in_prose() {
    let glossary = glossary_of(&[("leucorrhées", "pertes vaginales")]);
    let fragments = highlight("Des leucorrhées blanchâtres grumeleuses.", &glossary);
    assert_eq!(annotated(&fragments), vec!["leucorrhées"]);
}
