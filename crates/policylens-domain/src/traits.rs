//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for text generation (the model call)
///
/// Implemented by the infrastructure layer (policylens-llm). Implementations
/// own transport, authentication, timeouts and cancellation; an expired or
/// failed call is reported through `Self::Error` and never as text.
pub trait TextGenerator {
    /// Error type for generation operations
    type Error;

    /// Generate a completion for `prompt`
    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    type Error = T::Error;

    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error> {
        (**self).generate(prompt, max_tokens, temperature)
    }
}
