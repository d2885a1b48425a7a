//! Deterministic identification providers for tests.

#![allow(dead_code)]

use async_trait::async_trait;
use florascan_core::models::{
    RawClassification, RawDescription, RawDetails, RawIdentification, RawIsPlant, RawResultBody,
    RawSuggestion,
};
use florascan_core::AppError;
use florascan_services::IdentificationProvider;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Always identifies the image as a dandelion and counts how many times it
/// was called, so tests can assert on cache behavior.
pub struct FakePlantProvider {
    calls: AtomicUsize,
}

impl FakePlantProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentificationProvider for FakePlantProvider {
    async fn identify(&self, _image: &[u8]) -> Result<RawIdentification, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawIdentification {
            result: Some(RawResultBody {
                is_plant: Some(RawIsPlant {
                    binary: Some(true),
                    probability: Some(0.98),
                    threshold: Some(0.5),
                }),
                classification: Some(RawClassification {
                    suggestions: vec![RawSuggestion {
                        name: Some("Taraxacum officinale".to_string()),
                        probability: Some(0.93),
                        details: Some(RawDetails {
                            url: Some("https://en.wikipedia.org/wiki/Taraxacum_officinale".to_string()),
                            edible_parts: Some(vec!["leaves".to_string(), "flowers".to_string()]),
                            description: Some(RawDescription {
                                value: Some("A common dandelion.".to_string()),
                            }),
                            common_names: Some(vec!["dandelion".to_string()]),
                        }),
                    }],
                }),
            }),
        })
    }

    fn name(&self) -> &'static str {
        "fake-plant"
    }
}

/// Always reports "not a plant".
pub struct NonPlantProvider;

#[async_trait]
impl IdentificationProvider for NonPlantProvider {
    async fn identify(&self, _image: &[u8]) -> Result<RawIdentification, AppError> {
        Ok(RawIdentification {
            result: Some(RawResultBody {
                is_plant: Some(RawIsPlant {
                    binary: Some(false),
                    probability: Some(0.02),
                    threshold: Some(0.5),
                }),
                classification: None,
            }),
        })
    }

    fn name(&self) -> &'static str {
        "non-plant"
    }
}

/// Always fails with an upstream service error.
pub struct FailingProvider;

#[async_trait]
impl IdentificationProvider for FailingProvider {
    async fn identify(&self, _image: &[u8]) -> Result<RawIdentification, AppError> {
        Err(AppError::ExternalService {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
