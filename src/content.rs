use crate::models::{Flashcard, MediaLinks, MemoSection, QuizItem};
use serde::Serialize;

/// The static content feed: memo sections, flashcards, quiz items, the
/// preload term list and the embedded media links. Read-only after
/// construction; the interactive state machines never mutate it.
#[derive(Debug, Clone, Serialize)]
pub struct ContentLibrary {
    pub memo_sections: Vec<MemoSection>,
    pub flashcards: Vec<Flashcard>,
    pub quiz: Vec<QuizItem>,
    pub preload_terms: Vec<String>,
    pub media: MediaLinks,
}

impl ContentLibrary {
    /// The bundled "Candidose Vaginale" counter-advice dataset.
    pub fn bundled() -> Self {
        Self {
            memo_sections: memo_sections(),
            flashcards: flashcards(),
            quiz: quiz_items(),
            preload_terms: preload_terms(),
            media: media_links(),
        }
    }
}

fn memo_sections() -> Vec<MemoSection> {
    vec![
        MemoSection {
            title: "Cas comptoir".to_string(),
            content: "Une femme de 26 ans se présente à l'officine :\n\n\
                      « J'ai des brûlures et des démangeaisons vaginales »\n\n\
                      Signes associés :\n\
                      - Pertes blanchâtres grumeleuses\n\
                      - Dyspareunie (douleurs lors des rapports)\n\
                      - Érythème vulvaire"
                .to_string(),
        },
        MemoSection {
            title: "Questions à poser".to_string(),
            content: "1. Depuis combien de temps ces symptômes ?\n\
                      2. Nature des pertes (couleur, odeur) ?\n\
                      3. Brûlures mictionnelles associées ?\n\
                      4. Grossesse ou contraception hormonale ?\n\
                      5. Fièvre/douleurs pelviennes ?\n\
                      6. Premier épisode ou récidive ?\n\
                      7. Traitements en cours (antibiotiques, corticoïdes) ?\n\
                      8. Antécédents de mycoses ?"
                .to_string(),
        },
        MemoSection {
            title: "Quand orienter vers le médecin".to_string(),
            content: "Orientation nécessaire si :\n\n\
                      - Patiente enceinte\n\
                      - Symptômes persistants sous traitement\n\
                      - Récidives fréquentes (>4 épisodes/an)\n\
                      - Signes généraux (fièvre, frissons)\n\
                      - Douleurs pelviennes\n\
                      - Pertes purulentes/malodorantes\n\
                      - Échec de 2 traitements bien conduits"
                .to_string(),
        },
        MemoSection {
            title: "Pathologie et signes typiques".to_string(),
            content: "Candidose vulvo-vaginale :\n\n\
                      - Agent : Candida albicans (90%)\n\
                      - Signes pathognomoniques :\n  \
                      • Prurit vulvaire intense\n  \
                      • Leucorrhées blanchâtres « fromage blanc »\n  \
                      • Brûlures mictionnelles terminales\n  \
                      • Vulve érythèmeuse\n\n\
                      Facteurs favorisants :\n\
                      - Antibiotiques, diabète\n\
                      - Grossesse, œstrogènes\n\
                      - Immunodépression"
                .to_string(),
        },
        MemoSection {
            title: "Conseils produits".to_string(),
            content: "Traitements antifongiques :\n\n\
                      - Ovule éconazole 150mg (1/j le soir au coucher pendant 3 à 6 jours)\n\
                      - Crème antifongique 2x/j (7j)\n\n\
                      Produits associés :\n\
                      - Gel lavant pH alcalin (max 14j)\n\
                      - Probiotiques vaginaux\n\
                      - Ovules hydratantes (post-traitement)\n\n\
                      NB : Pas de traitement systématique du partenaire"
                .to_string(),
        },
        MemoSection {
            title: "Hygiène de vie".to_string(),
            content: "Conseils à dispenser :\n\n\
                      - Sous-vêtements 100% coton\n\
                      - Éviter vêtements serrés\n\
                      - Hygiène douce sans savon parfumé\n\
                      - Séchage minutieux après toilette\n\
                      - Essuyage antéro-postérieur\n\
                      - Éviter bains/jacuzzi prolongés\n\
                      - Changement fréquent des protège-slips\n\
                      - Lavage du linge à 60°C minimum"
                .to_string(),
        },
    ]
}

fn flashcards() -> Vec<Flashcard> {
    let cards = [
        (
            "Agent principal responsable ?",
            "Candida albicans (90% des cas)",
        ),
        (
            "Signe le plus spécifique ?",
            "Pertes blanchâtres grumeleuses 'fromage blanc'",
        ),
        (
            "Durée traitement local standard ?",
            "3 jours (ovule) ou 7 jours (crème)",
        ),
        (
            "Quand traiter le partenaire ?",
            "Uniquement s'il est symptomatique",
        ),
        (
            "Gel lavant pH alcalin : durée max ?",
            "14 jours maximum",
        ),
        (
            "Critère d'orientation médicale ?",
            "Grossesse, fièvre, échec thérapeutique",
        ),
        (
            "Conseil vestimentaire clé ?",
            "Sous-vêtements 100% coton, éviter les serrages",
        ),
    ];
    cards
        .into_iter()
        .map(|(question, answer)| Flashcard {
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect()
}

fn quiz_items() -> Vec<QuizItem> {
    vec![
        QuizItem {
            question: "Quel est le principal agent pathogène responsable de la candidose vulvo-vaginale ?".to_string(),
            options: vec![
                "Gardnerella vaginalis".to_string(),
                "Candida albicans".to_string(),
                "Trichomonas vaginalis".to_string(),
                "Escherichia coli".to_string(),
            ],
            correct_index: 1,
            explanation: "La candidose vulvo-vaginale est principalement causée par la levure Candida albicans dans 90% des cas.".to_string(),
        },
        QuizItem {
            question: "Quel symptôme est le plus fréquemment associé à la candidose vulvo-vaginale ?".to_string(),
            options: vec![
                "Douleur pelvienne intense".to_string(),
                "Fièvre et frissons".to_string(),
                "Prurit vulvaire intense".to_string(),
                "Pertes jaunes malodorantes".to_string(),
            ],
            correct_index: 2,
            explanation: "Le prurit vulvaire intense (démangeaisons) est l'un des symptômes les plus fréquents et caractéristiques de la candidose vulvo-vaginale.".to_string(),
        },
        QuizItem {
            question: "Quelle est l'apparence typique des pertes vaginales en cas de candidose ?".to_string(),
            options: vec![
                "Fluides et transparentes".to_string(),
                "Blanchâtres grumeleuses 'fromage blanc'".to_string(),
                "Jaunes mousseuses".to_string(),
                "Grises et homogènes".to_string(),
            ],
            correct_index: 1,
            explanation: "Les pertes blanchâtres grumeleuses, souvent décrites comme ayant l'aspect de 'fromage blanc', sont très évocatrices d'une candidose vulvo-vaginale.".to_string(),
        },
        QuizItem {
            question: "Dans quel cas une patiente doit-elle être systématiquement orientée vers un médecin ?".to_string(),
            options: vec![
                "Symptômes modérés".to_string(),
                "Premier épisode de mycose".to_string(),
                "Patiente enceinte".to_string(),
                "si elle a des pertes blanchâtres".to_string(),
            ],
            correct_index: 2,
            explanation: "Une patiente enceinte doit toujours être orientée vers une consultation médicale en cas de candidose, car le choix du traitement nécessite un avis médical spécialisé.".to_string(),
        },
        QuizItem {
            question: "Quelle est la durée recommandée pour un traitement par ovule antifongique local (ex: éconazole) ?".to_string(),
            options: vec![
                "1 jour".to_string(),
                "3 à 6 jours".to_string(),
                "14 jours".to_string(),
                "Un mois".to_string(),
            ],
            correct_index: 1,
            explanation: "Le traitement par ovule ou capsule vaginale à base d'imidazolés est généralement d'un ovule le soir pendant 3 à 6 jours.".to_string(),
        },
        QuizItem {
            question: "Le traitement du partenaire est-il systématique en cas de candidose vulvo-vaginale ?".to_string(),
            options: vec![
                "Oui, toujours".to_string(),
                "Non, uniquement s'il est symptomatique".to_string(),
                "Oui, si la patiente est enceinte".to_string(),
                "Non, jamais".to_string(),
            ],
            correct_index: 1,
            explanation: "Le traitement du partenaire n'est pas systématique et ne se fait qu'en présence de symptômes chez ce dernier.".to_string(),
        },
        QuizItem {
            question: "Pourquoi ne faut-il pas dépasser 14 jours d'utilisation d'un gel lavant intime à pH alcalin ?".to_string(),
            options: vec![
                "Pour éviter une irritation cutanée".to_string(),
                "Pour protéger l'équilibre naturel de la flore vaginale".to_string(),
                "Pour augmenter l'efficacité du traitement".to_string(),
                "Pour des raisons économiques".to_string(),
            ],
            correct_index: 1,
            explanation: "Il ne faut pas dépasser 14 jours d'utilisation d'un gel à pH alcalin afin de protéger l'équilibre naturel de la flore vaginale, car il peut réduire l'acidité protectrice du vagin.".to_string(),
        },
        QuizItem {
            question: "Une candidose est considérée comme récidivante à partir de combien d'épisodes par an ?".to_string(),
            options: vec![
                "2 épisodes".to_string(),
                "3 épisodes".to_string(),
                "4 épisodes ou plus".to_string(),
                "6 épisodes ou plus".to_string(),
            ],
            correct_index: 2,
            explanation: "Une candidose récidivante est définie par au moins quatre épisodes par an.".to_string(),
        },
        QuizItem {
            question: "Quel conseil d'hygiène est recommandé pour prévenir les récidives ?".to_string(),
            options: vec![
                "Utiliser des savons parfumés".to_string(),
                "Porter des sous-vêtements synthétiques".to_string(),
                "S'essuyer et sécher parfaitement après chaque hygiène intime".to_string(),
                "Éviter les sous-vêtements en coton".to_string(),
            ],
            correct_index: 2,
            explanation: "S'essuyer et sécher parfaitement après chaque hygiène intime est une règle d'hygiène importante pour éviter l'humidité, propice à la prolifération de Candida.".to_string(),
        },
        QuizItem {
            question: "Quel type de vêtement est déconseillé en cas de candidose ou pour la prévenir ?".to_string(),
            options: vec![
                "Vêtements amples en coton".to_string(),
                "Vêtements serrés ou synthétiques".to_string(),
                "Jupes et robes".to_string(),
                "Vêtements en lin".to_string(),
            ],
            correct_index: 1,
            explanation: "Le port de vêtements serrés ou synthétiques est un facteur de risque car ils favorisent l'humidité et la chaleur, propices à la prolifération de Candida.".to_string(),
        },
    ]
}

/// Terms defined automatically on first session start; they seed the
/// glossary used for memo highlighting.
fn preload_terms() -> Vec<String> {
    [
        "Candidose vulvo-vaginale",
        "Candida albicans",
        "Prurit vulvaire",
        "Leucorrhées",
        "Dyspareunie",
        "Brûlures mictionnelles",
        "Antifongiques",
        "Probiotiques vaginaux",
        "pH alcalin",
        "Récidives fréquentes",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn media_links() -> MediaLinks {
    MediaLinks {
        video_url: "https://www.youtube.com/embed/xtMbZ1IbDjM".to_string(),
        kahoot_url: "https://kahoot.it/challenge/001115080?challenge-id=ce72474c-f579-45bb-9168-e288af0db70d_1723784845005".to_string(),
        podcast_audio_url: "https://pharmaconseilbmb.com/podcast/femme/M%C3%A9mo-candidose-vaginale.mp3".to_string(),
        podcast_image_url: "https://pharmaconseilbmb.com/podcast/femme/candidose-vaginale.jpg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_datasets_have_expected_shape() {
        let content = ContentLibrary::bundled();
        assert_eq!(content.memo_sections.len(), 6);
        assert_eq!(content.flashcards.len(), 7);
        assert_eq!(content.quiz.len(), 10);
        assert_eq!(content.preload_terms.len(), 10);
    }

    #[test]
    fn quiz_correct_indices_are_in_range() {
        for item in ContentLibrary::bundled().quiz {
            assert!(
                item.correct_index < item.options.len(),
                "correct index out of range for question '{}'",
                item.question
            );
        }
    }
}
