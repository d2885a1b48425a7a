//! Synthetic identification provider for demo mode
//!
//! Produces payloads in the exact shape of the real API so downstream
//! normalization, caching, and history behave identically offline. Roughly
//! one call in ten returns "not a plant".

use async_trait::async_trait;
use florascan_core::models::{
    RawClassification, RawDescription, RawDetails, RawIdentification, RawIsPlant, RawResultBody,
    RawSuggestion,
};
use florascan_core::AppError;
use rand::Rng;

use super::IdentificationProvider;

const NOT_A_PLANT_RATE: f64 = 0.1;

struct Archetype {
    name: &'static str,
    probability: f64,
    common_names: &'static [&'static str],
    url: &'static str,
    description: &'static str,
    edible_parts: Option<&'static [&'static str]>,
}

const ARCHETYPES: &[Archetype] = &[
    Archetype {
        name: "Taraxacum officinale",
        probability: 0.92,
        common_names: &["common dandelion", "dandelion"],
        url: "https://en.wikipedia.org/wiki/Taraxacum_officinale",
        description: "A widespread flowering herb with a basal rosette of toothed leaves and \
                      bright yellow composite flower heads that mature into spherical seed heads.",
        edible_parts: Some(&["leaves", "flowers", "roots"]),
    },
    Archetype {
        name: "Monstera deliciosa",
        probability: 0.88,
        common_names: &["Swiss cheese plant", "split-leaf philodendron"],
        url: "https://en.wikipedia.org/wiki/Monstera_deliciosa",
        description: "A tropical climbing plant known for its large, glossy, perforated leaves, \
                      commonly grown as a houseplant.",
        edible_parts: Some(&["fruit"]),
    },
    Archetype {
        name: "Ficus elastica",
        probability: 0.85,
        common_names: &["rubber fig", "rubber plant"],
        url: "https://en.wikipedia.org/wiki/Ficus_elastica",
        description: "An evergreen tree in the fig family with thick, leathery, dark green \
                      leaves, popular as an ornamental plant.",
        edible_parts: None,
    },
    Archetype {
        name: "Ocimum basilicum",
        probability: 0.9,
        common_names: &["basil", "sweet basil"],
        url: "https://en.wikipedia.org/wiki/Basil",
        description: "A culinary herb of the mint family with aromatic green leaves used fresh \
                      or dried in cuisines worldwide.",
        edible_parts: Some(&["leaves"]),
    },
];

pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }

    fn not_a_plant() -> RawIdentification {
        RawIdentification {
            result: Some(RawResultBody {
                is_plant: Some(RawIsPlant {
                    binary: Some(false),
                    probability: Some(0.02),
                    threshold: Some(0.5),
                }),
                classification: Some(RawClassification {
                    suggestions: Vec::new(),
                }),
            }),
        }
    }

    fn plant(archetype: &Archetype) -> RawIdentification {
        RawIdentification {
            result: Some(RawResultBody {
                is_plant: Some(RawIsPlant {
                    binary: Some(true),
                    probability: Some(0.97),
                    threshold: Some(0.5),
                }),
                classification: Some(RawClassification {
                    suggestions: vec![RawSuggestion {
                        name: Some(archetype.name.to_string()),
                        probability: Some(archetype.probability),
                        details: Some(RawDetails {
                            url: Some(archetype.url.to_string()),
                            edible_parts: archetype
                                .edible_parts
                                .map(|parts| parts.iter().map(|p| p.to_string()).collect()),
                            description: Some(RawDescription {
                                value: Some(archetype.description.to_string()),
                            }),
                            common_names: Some(
                                archetype
                                    .common_names
                                    .iter()
                                    .map(|n| n.to_string())
                                    .collect(),
                            ),
                        }),
                    }],
                }),
            }),
        }
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentificationProvider for DemoProvider {
    async fn identify(&self, _image: &[u8]) -> Result<RawIdentification, AppError> {
        let mut rng = rand::rng();

        if rng.random_bool(NOT_A_PLANT_RATE) {
            tracing::debug!("Demo provider: not a plant");
            return Ok(Self::not_a_plant());
        }

        let archetype = &ARCHETYPES[rng.random_range(0..ARCHETYPES.len())];
        tracing::debug!(name = archetype.name, "Demo provider: synthesized result");
        Ok(Self::plant(archetype))
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}
