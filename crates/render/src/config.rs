use crate::utils::VALIDATION_LAYERS;

/// Settings for [`crate::GraphicsContext::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub application_name: String,
    /// Enables the layers in [`ContextConfig::layers`].
    pub validation: bool,
    /// Chains and registers the `VK_EXT_debug_report` callback.
    pub debug_report: bool,
    pub layers: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            application_name: String::from("huigame"),
            validation: cfg!(debug_assertions),
            debug_report: cfg!(debug_assertions),
            layers: VALIDATION_LAYERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ContextConfig {
    /// No layers, no debug report.
    pub fn quiet() -> Self {
        Self {
            validation: false,
            debug_report: false,
            ..Default::default()
        }
    }
}
