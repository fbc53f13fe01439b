/// Errors from the conversion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("No markdown provided")]
    EmptyInput,

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors from a render adapter.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Export(String),
}
