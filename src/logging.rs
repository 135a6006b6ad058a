// Macros file - tracing macros are imported within the macro definitions

/// Standardized logging macros for consistent field names and message
/// patterns across the application.

// ============================================================================
// API Operation Logging Macros
// ============================================================================

/// Log the start of an API operation with consistent fields
#[macro_export]
macro_rules! log_api_start {
    ($operation:expr, term = $term:expr) => {
        tracing::debug!(
            operation = $operation,
            term = %$term,
            "API operation started"
        );
    };
    ($operation:expr, view = $view:expr) => {
        tracing::debug!(
            operation = $operation,
            view = %$view,
            "API operation started"
        );
    };
    ($operation:expr, index = $index:expr) => {
        tracing::debug!(
            operation = $operation,
            index = $index,
            "API operation started"
        );
    };
    ($operation:expr) => {
        tracing::debug!(
            operation = $operation,
            "API operation started"
        );
    };
}

/// Log successful completion of an API operation
#[macro_export]
macro_rules! log_api_success {
    ($operation:expr, term = $term:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            term = %$term,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, count = $count:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            count = $count,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            "API operation completed: {}", $msg
        );
    };
}

/// Log API warnings with context
#[macro_export]
macro_rules! log_api_warn {
    ($operation:expr, term = $term:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            term = %$term,
            "API operation warning: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            "API operation warning: {}", $msg
        );
    };
}

// ============================================================================
// LLM Service Logging Macros
// ============================================================================

/// Log definition-service operations with provider context
#[macro_export]
macro_rules! log_llm_operation {
    (start, $operation:expr, provider = $provider:expr, term_count = $count:expr) => {
        tracing::info!(
            component = "definition_service",
            operation = $operation,
            provider = %$provider,
            term_count = $count,
            "LLM operation started"
        );
    };
    (success, $operation:expr, provider = $provider:expr, term_count = $count:expr) => {
        tracing::info!(
            component = "definition_service",
            operation = $operation,
            provider = %$provider,
            term_count = $count,
            "LLM operation completed successfully"
        );
    };
    (error, $operation:expr, provider = $provider:expr, error = $error:expr) => {
        tracing::error!(
            component = "definition_service",
            operation = $operation,
            provider = %$provider,
            error = %$error,
            "LLM operation failed"
        );
    };
    (warn, $operation:expr, $msg:expr) => {
        tracing::warn!(
            component = "definition_service",
            operation = $operation,
            "LLM operation warning: {}", $msg
        );
    };
}

// ============================================================================
// System Event Logging Macros
// ============================================================================

/// Log system startup and configuration events
#[macro_export]
macro_rules! log_system_event {
    (startup, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "startup",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (config, $msg:expr) => {
        tracing::info!(event_type = "configuration", "System event: {}", $msg);
    };
}

// ============================================================================
// Validation Logging Macros
// ============================================================================

/// Log validation results consistently
#[macro_export]
macro_rules! log_validation {
    (success, $component:expr, $msg:expr) => {
        tracing::debug!(
            event_type = "validation",
            component = $component,
            result = "success",
            "Validation completed: {}", $msg
        );
    };
    (failure, $component:expr, error = $error:expr) => {
        tracing::warn!(
            event_type = "validation",
            component = $component,
            result = "failure",
            error = %$error,
            "Validation failed"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_logging_macros_compile() {
        let _error = anyhow::anyhow!("test error");

        // Test that all macro variants compile successfully
        log_api_start!("explain_term", term = "dyspareunie");
        log_api_start!("select_view", view = "glossary");
        log_api_start!("toggle_section", index = 2);
        log_api_start!("reset_quiz");

        log_api_success!("explain_term", term = "dyspareunie", "definition cached");
        log_api_success!("preload_glossary", count = 10, "terms defined");
        log_api_success!("reset_quiz", "quiz reset");

        log_api_warn!("explain_term", term = "", "blank term submitted");
        log_api_warn!("preload_glossary", "preload already in flight");

        log_llm_operation!(
            start,
            "fetch_definitions",
            provider = "Gemini",
            term_count = 10
        );
        log_llm_operation!(
            success,
            "fetch_definitions",
            provider = "Gemini",
            term_count = 10
        );
        log_llm_operation!(
            error,
            "explain_term",
            provider = "Gemini",
            error = _error
        );
        log_llm_operation!(warn, "fetch_definitions", "empty response");

        log_system_event!(startup, component = "server", "server starting");
        log_system_event!(config, "configuration loaded successfully");

        log_validation!(success, "configuration", "configuration validated");
        log_validation!(failure, "configuration", error = _error);
    }
}
