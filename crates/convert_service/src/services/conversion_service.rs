use std::sync::Arc;

use html2go_core::generator::{DEFAULT_PRIMARY_PREFIX, DEFAULT_SECONDARY_PREFIX};
use html2go_core::{CodeGenerator, ConversionError, GeneratorOptions, HtmlGoGenerator, NormalizePipeline};

use crate::dto::{ConversionRequest, Direction};
use crate::error::{AppError, Result};

/// Validates a conversion request and runs generator plus normalizer.
///
/// Holds no per-request state; one instance is shared by every worker.
#[derive(Clone)]
pub struct ConversionService {
    generator: Arc<dyn CodeGenerator>,
    pipeline: NormalizePipeline,
}

impl ConversionService {
    pub fn new(generator: Arc<dyn CodeGenerator>, pipeline: NormalizePipeline) -> Self {
        Self {
            generator,
            pipeline,
        }
    }

    pub fn with_default_generator(pipeline: NormalizePipeline) -> Self {
        Self::new(Arc::new(HtmlGoGenerator::new()), pipeline)
    }

    pub fn pipeline(&self) -> NormalizePipeline {
        self.pipeline
    }

    pub fn convert(&self, request: &ConversionRequest) -> Result<String> {
        if request.html.is_empty() {
            return Err(AppError::Validation("HTML content is required".to_string()));
        }

        let direction: Direction = request
            .direction
            .parse()
            .map_err(|_| AppError::Validation("Invalid conversion direction".to_string()))?;

        match direction {
            Direction::Html2Go => self.html_to_go(request),
            Direction::Go2Html => Err(AppError::NotImplemented(
                "Go to HTML conversion is not implemented yet".to_string(),
            )),
        }
    }

    fn html_to_go(&self, request: &ConversionRequest) -> Result<String> {
        let options = GeneratorOptions {
            package_prefix: request.package_prefix.clone(),
            primary_prefix: non_empty_or(&request.vuetify_prefix, DEFAULT_PRIMARY_PREFIX),
            secondary_prefix: non_empty_or(&request.vuetify_x_prefix, DEFAULT_SECONDARY_PREFIX),
            children_mode: request.children_mode,
        };

        let generated = self
            .generator
            .generate(&request.html, &options)
            .map_err(ConversionError::from)?;
        let code = self
            .pipeline
            .run(&generated)
            .map_err(ConversionError::from)?;

        tracing::debug!(
            markup_bytes = request.html.len(),
            code_bytes = code.len(),
            children_mode = options.children_mode,
            "converted html to go"
        );
        Ok(code)
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
