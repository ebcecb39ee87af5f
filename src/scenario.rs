//! End-to-end linkage scenario: one simulated user-day driven through the
//! whole pipeline, from key generation to identity disclosure.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::channel::{ChannelError, KeyTransmission, PublicationChannel};
use crate::identity::{IdentityFixture, UserIdentity};
use crate::interceptor::{shared_table, Interceptor, SharedTable};
use crate::keys::{KeyError, KeyGenerator};
use crate::matcher::Matcher;
use crate::publication::KeyPublicationService;

/// Lifecycle of a single key as it moves through the simulation. Linear,
/// no branching or retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeState {
    /// Fresh key drawn from the CSPRNG.
    Generated,
    /// Uploaded over the publication channel.
    Transmitted,
    /// Observed and logged by the co-located adversary.
    Intercepted,
    /// Released in the public diagnosis-key feed.
    Published,
    /// Terminal: the adversary linked the published key to an identity.
    Resolved,
    /// Terminal: the published key was never captured.
    Unresolved,
}

/// Outcome of one simulated user-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub final_state: ExchangeState,
    /// Present exactly when the run ended in [`ExchangeState::Resolved`];
    /// its presence is the privacy failure this simulation demonstrates.
    pub disclosed_identity: Option<UserIdentity>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("key upload failed: {0}")]
    Upload(#[from] ChannelError),
}

/// Wires generator, fixture, channel, adversary and release service around
/// one shared interception table.
pub struct LinkageScenario {
    generator: KeyGenerator,
    fixture: IdentityFixture,
    channel: Box<dyn PublicationChannel + Send>,
    interceptor: Interceptor,
    publication: KeyPublicationService,
    matcher: Matcher,
    table: SharedTable,
}

impl LinkageScenario {
    pub fn new(channel: Box<dyn PublicationChannel + Send>, fixture_seed: u64) -> Self {
        let table = shared_table();
        Self {
            generator: KeyGenerator::new(),
            fixture: IdentityFixture::seeded(fixture_seed),
            channel,
            interceptor: Interceptor::new(Arc::clone(&table)),
            publication: KeyPublicationService::new(),
            matcher: Matcher::new(Arc::clone(&table)),
            table,
        }
    }

    pub fn table(&self) -> SharedTable {
        Arc::clone(&self.table)
    }

    /// Pre-populates the observation window with `count` bystander uploads,
    /// all captured by the adversary. Mirrors a shared office or campus
    /// network where many devices upload alongside the victim.
    pub fn seed_bystanders(&mut self, count: usize) -> Result<(), ScenarioError> {
        for _ in 0..count {
            let key = self.generator.generate()?;
            let identity = self.fixture.next_identity();
            self.interceptor
                .capture(&[KeyTransmission::new(key, identity)]);
        }
        info!(count, "seeded bystander uploads into the observation window");
        Ok(())
    }

    /// Drives one user through the full pipeline and reports whether the
    /// key published for them discloses their identity.
    pub async fn run_user_day(
        &mut self,
        identity: UserIdentity,
    ) -> Result<ScenarioReport, ScenarioError> {
        let key = self.generator.generate()?;
        info!(?key, "generated temporary exposure key");

        let batch = vec![KeyTransmission::new(key, identity)];
        self.channel.send(&batch).await?;
        info!("uploaded daily key batch");

        self.interceptor.capture(&batch);
        info!("adversary captured the upload");

        let diagnosis_key = self.publication.publish_as_diagnosis_key(key);
        info!(?diagnosis_key, "diagnosis key released to the public feed");

        match self.matcher.resolve(&diagnosis_key) {
            Some(disclosed) => {
                warn!(
                    name = %disclosed.display_name,
                    address = %disclosed.network_address,
                    "identity disclosed from published key"
                );
                Ok(ScenarioReport {
                    final_state: ExchangeState::Resolved,
                    disclosed_identity: Some(disclosed),
                })
            }
            None => Ok(ScenarioReport {
                final_state: ExchangeState::Unresolved,
                disclosed_identity: None,
            }),
        }
    }
}
