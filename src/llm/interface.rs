use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::llm::model::Prompt;

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Assistant reply to `prompt`, or `None` when the API gave no usable answer.
    async fn complete(&self, prompt: &Prompt) -> Option<String>;

    /// Reply delivered as incremental text chunks. `None` when the request itself failed;
    /// dropping the stream closes the connection.
    async fn complete_stream(&self, prompt: &Prompt) -> Option<BoxStream<'static, String>>;
}
