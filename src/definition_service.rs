use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::LLMConfig;
use crate::llm_providers::{JsonResponseParser, LLMProviderFactory, TextGenerator};
use crate::log_llm_operation;
use crate::models::GlossaryDefinition;

/// Prefix carried by every in-band failure message from [`DefinitionService::explain_term`].
/// Results starting with it are shown to the user but never cached.
pub const ERROR_PREFIX: &str = "Erreur :";

/// Fixed degraded result when no service credential was configured.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Erreur : Le service IA n'est pas disponible (clé API manquante).";

/// Thin client around the generative-language service. Every failure mode
/// is absorbed here: the bulk path degrades to an empty list, the explain
/// path to an in-band `Erreur :`-prefixed message. Neither returns `Err`.
#[derive(Clone)]
pub struct DefinitionService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl DefinitionService {
    /// Build the service from configuration. Credential absence is decided
    /// here, once, and logged once.
    pub fn new(config: &LLMConfig) -> Self {
        match &config.api_key {
            Some(api_key) => {
                let provider = LLMProviderFactory::create_provider(
                    config.provider,
                    api_key.clone(),
                    config.base_url.clone(),
                    config.model.clone(),
                );
                info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    "Definition service initialized"
                );
                Self::with_generator(Arc::new(provider))
            }
            None => {
                warn!("LLM_API_KEY is not set; glossary definitions will be unavailable");
                Self { generator: None }
            }
        }
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A client with no remote backend; both operations degrade.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Request concise definitions for all `terms` in one call. Returns the
    /// parsed pairs in response order, term keys lowercased. Transport or
    /// parse failures yield an empty list; individually malformed entries
    /// are dropped while the rest of the batch is kept.
    pub async fn fetch_definitions(&self, terms: &[String]) -> Vec<GlossaryDefinition> {
        let Some(generator) = &self.generator else {
            return Vec::new();
        };
        if terms.is_empty() {
            return Vec::new();
        }

        let prompt = format!(
            "Définis les termes médicaux suivants de manière concise et claire, adaptés à un \
             professionnel de santé en officine. Retourne le résultat sous forme d'un tableau \
             JSON d'objets, où chaque objet a les clés \"term\" et \"definition\". Les termes \
             sont : {}. Assure-toi que la réponse est uniquement le tableau JSON.",
            terms.join(", ")
        );

        log_llm_operation!(
            start,
            "fetch_definitions",
            provider = generator.provider_name(),
            term_count = terms.len()
        );

        let response = match generator.generate(&prompt, true).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    provider = generator.provider_name(),
                    term_count = terms.len(),
                    error = %e,
                    "Bulk definition request failed"
                );
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match JsonResponseParser::parse_json_response(&response) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(
                    error = %e,
                    response_length = response.len(),
                    "Failed to parse bulk definition response"
                );
                return Vec::new();
            }
        };

        let mut definitions = Vec::new();
        for entry in entries {
            let term = entry.get("term").and_then(Value::as_str);
            let definition = entry.get("definition").and_then(Value::as_str);
            match (term, definition) {
                (Some(term), Some(definition)) => definitions.push(GlossaryDefinition {
                    term: term.to_lowercase(),
                    definition: definition.to_string(),
                }),
                _ => warn!(entry = %entry, "Dropping malformed term/definition object"),
            }
        }

        log_llm_operation!(
            success,
            "fetch_definitions",
            provider = generator.provider_name(),
            term_count = definitions.len()
        );
        definitions
    }

    /// Request a single free-form definition. Any failure is converted to a
    /// human-readable message carrying [`ERROR_PREFIX`].
    pub async fn explain_term(&self, term: &str) -> String {
        let Some(generator) = &self.generator else {
            debug!(term = %term, "Explain requested while service is unavailable");
            return SERVICE_UNAVAILABLE_MESSAGE.to_string();
        };

        let prompt = format!(
            "Expliquez le terme médical suivant de manière concise et claire, adaptée à un \
             professionnel de santé en officine : \"{}\".",
            term
        );

        match generator.generate(&prompt, false).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    provider = generator.provider_name(),
                    term = %term,
                    error = %e,
                    "Term explanation request failed"
                );
                format!("{ERROR_PREFIX} Impossible d'obtenir l'explication du terme : {e}")
            }
        }
    }
}
