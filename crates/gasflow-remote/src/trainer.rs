//! RemoteTrainer: the trainer service seen through the model traits.
//!
//! | Trait call | Endpoint | Failure |
//! |------------|----------|---------|
//! | `is_available` | `GET /check_ML` | `false` |
//! | `ILinearModel::train` | `GET /train` | `None` |
//! | `IFallbackModel::predict` | `POST /MR_predict` | `None` (also for a `0` answer) |
//! | `ITrainingSink::record` | `POST /newdata` | `false` |
//! | `ITrainingSink::finish` | `GET /finishdata/<name>` | `false` |
//!
//! Cloning is cheap and shares the connection pool, so one trainer can back
//! the linear model, fallback model and sink of a single control loop.

use gasflow_core::config::RemoteConfig;
use gasflow_core::errors::{ErrorCode, TransportError};
use gasflow_core::models::{LinearCoefficients, Observation};
use gasflow_core::traits::{IFallbackModel, ILinearModel, ITrainingSink};

use crate::transport::protocol::{self, LinearFit, NewDataRequest, PredictRequest};
use crate::transport::{HttpClient, HttpClientConfig};

#[derive(Debug, Clone)]
pub struct RemoteTrainer {
    client: HttpClient,
}

impl RemoteTrainer {
    pub fn new(config: &RemoteConfig) -> Result<Self, TransportError> {
        Ok(Self::with_client(HttpClient::new(HttpClientConfig::from(
            config,
        ))?))
    }

    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// Reset the trainer's data store for a new run.
    pub fn initialise(&self) -> bool {
        self.degrade("initialise", self.client.get(protocol::INITIALISE))
            .is_some()
    }

    /// Whether the trainer has any data to fit.
    pub fn check_models(&self) -> bool {
        self.degrade("check_models", self.client.get(protocol::CHECK_MODELS))
            .is_some()
    }

    pub fn train_linear(&self) -> Option<LinearCoefficients> {
        self.degrade(
            "train",
            self.client.get_json::<LinearFit>(protocol::TRAIN),
        )?
        .into_coefficients()
    }

    pub fn predict_fallback(
        &self,
        supply_pressure: f64,
        air_aperture: f64,
        output: f64,
    ) -> Option<f64> {
        let request = PredictRequest {
            supply_pressure,
            air_aperture,
            output,
        };
        let url = format!("{}{}", self.client.base_url(), protocol::FALLBACK_PREDICT);
        let text = self.client.post_text(protocol::FALLBACK_PREDICT, &request);
        let parsed = text.and_then(|body| {
            body.trim()
                .parse::<f64>()
                .map_err(|e| TransportError::Decode {
                    url,
                    reason: format!("{e}: {body:?}"),
                })
        });
        self.degrade("predict", parsed)
            .filter(|position| *position != 0.0)
    }

    pub fn send_observation(&self, observation: &Observation) -> bool {
        let body = NewDataRequest::from(observation);
        self.degrade("newdata", self.client.post(protocol::NEW_DATA, &body))
            .is_some()
    }

    pub fn finish_dataset(&self, dataset_name: &str) -> bool {
        self.degrade(
            "finishdata",
            self.client.get(&protocol::finish_data(dataset_name)),
        )
        .is_some()
    }

    fn degrade<T>(&self, call: &str, result: Result<T, TransportError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let unavailable = err.into_unavailable("trainer");
                tracing::warn!(call, error = %unavailable.coded_string(), "trainer call failed");
                None
            }
        }
    }
}

impl ILinearModel for RemoteTrainer {
    fn is_available(&mut self) -> bool {
        self.check_models()
    }

    fn train(&mut self) -> Option<LinearCoefficients> {
        self.train_linear()
    }
}

impl IFallbackModel for RemoteTrainer {
    fn is_available(&mut self) -> bool {
        self.check_models()
    }

    fn predict(&mut self, supply_pressure: f64, air_aperture: f64, output: f64) -> Option<f64> {
        self.predict_fallback(supply_pressure, air_aperture, output)
    }
}

impl ITrainingSink for RemoteTrainer {
    fn record(&mut self, observation: &Observation) -> bool {
        self.send_observation(observation)
    }

    fn finish(&mut self, dataset_name: &str) -> bool {
        self.finish_dataset(dataset_name)
    }
}
