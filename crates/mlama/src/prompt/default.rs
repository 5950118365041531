use super::RenderedInstance;
use super::engine::Fill;

/// Plain substitution of `[X]` and `[Y]`, for languages without inflection.
#[derive(Debug, Clone)]
pub struct DefaultPrompt {
    language: String,
}

impl DefaultPrompt {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Replaces every `[X]` with the label.
    pub fn fill_x(&self, template: &str, label: &str) -> RenderedInstance {
        RenderedInstance {
            text: template.replace("[X]", label),
            label: label.to_string(),
        }
    }

    /// Replaces every `[Y]` with `num_mask` mask symbols, or with the label
    /// when `num_mask` is zero.
    pub fn fill_y(
        &self,
        template: &str,
        label: &str,
        num_mask: usize,
        mask_symbol: &str,
    ) -> RenderedInstance {
        let fill = Fill::for_object(num_mask, mask_symbol);
        RenderedInstance {
            text: template.replace("[Y]", &fill.text(label)),
            label: label.to_string(),
        }
    }
}
