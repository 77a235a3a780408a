mod aggregate;
pub mod config;
pub mod difficulty;
mod model;
pub mod mutation;
pub mod session;
mod store;
pub mod transport;
pub mod validate;

pub use config::ClientConfig;
pub use difficulty::{classify, DifficultyClass};
pub use model::{
    Definition, DefinitionId, PartOfSpeech, UnknownPartOfSpeech, VocabId, Word, WordId,
};
pub use mutation::{DefinitionWrite, DefinitionWriteError, MutationError, SubmitReport, WriteKind};
pub use session::{DraftDefinition, EditSession, SessionError};
pub use store::VocabStore;
pub use transport::{Envelope, HttpTransport, Method, Transport, TransportError};
pub use validate::ValidationError;

pub struct VocabClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl VocabClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: HttpTransport::new(&config),
            config,
        }
    }
}

impl<T: Transport> VocabClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the word list and, per word, its definitions and difficulty.
    ///
    /// Independent calls may overlap; nothing is cancelled, so callers keep
    /// only the latest result.
    pub async fn load_vocabulary(&self, vocab_id: VocabId) -> Vec<Word> {
        aggregate::load_vocabulary(&self.transport, vocab_id).await
    }

    /// Re-aggregates the store's vocabulary after the configured settle delay.
    ///
    /// If the word list cannot be fetched the current view is kept and
    /// `false` is returned.
    pub async fn refresh(&self, store: &mut VocabStore) -> bool {
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
        match aggregate::try_load_vocabulary(&self.transport, store.vocab_id()).await {
            Some(words) => {
                store.replace_words(words);
                true
            }
            None => {
                log::warn!(
                    "event=vocab_refresh status=stale vocab_id={} words={}",
                    store.vocab_id(),
                    store.words().len()
                );
                false
            }
        }
    }
}
