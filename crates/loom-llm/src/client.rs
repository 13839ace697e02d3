use crate::config::LlmConfig;
use crate::error::LlmResult;

/// Something that completes a chat exchange.
pub trait LlmClient {
    /// Send `system_prompt` and `user_message` to the model described by
    /// `config` and return the reply text.
    fn complete(&self, system_prompt: &str, user_message: &str, config: &LlmConfig)
    -> LlmResult<String>;
}

impl<T: LlmClient + ?Sized> LlmClient for &T {
    fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        config: &LlmConfig,
    ) -> LlmResult<String> {
        (**self).complete(system_prompt, user_message, config)
    }
}

impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        config: &LlmConfig,
    ) -> LlmResult<String> {
        (**self).complete(system_prompt, user_message, config)
    }
}
