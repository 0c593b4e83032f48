use serde::{Deserialize, Serialize};

use crate::core::{DuplicatePolicy, Viewport};
use crate::error::{ChartError, ChartResult};

use super::validation::{validate_layout, validate_render_style};
use super::{AxisLabelLocale, ChartLayout, RenderStyle};

/// Public dashboard bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in a JSON file; every field
/// falls back to the reference dashboard when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub viewport: Viewport,
    pub layout: ChartLayout,
    pub style: RenderStyle,
    pub locale: AxisLabelLocale,
    pub duplicate_policy: DuplicatePolicy,
    /// Replaces the locale's default caption when set.
    pub caption: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::REFERENCE,
            layout: ChartLayout::default(),
            style: RenderStyle::default(),
            locale: AxisLabelLocale::default(),
            duplicate_policy: DuplicatePolicy::default(),
            caption: None,
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        validate_layout(self.layout)?;
        validate_render_style(self.style)?;
        if self.caption.as_deref().is_some_and(str::is_empty) {
            return Err(ChartError::InvalidData(
                "caption override must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config json: {e}")))
    }
}
