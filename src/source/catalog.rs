//! Brokerage entity catalog.
//!
//! Holds the candidate entities (agents, cities, clients) that selectors pick
//! from, plus the seed campaign and agent records. Loaded from a JSON file
//! when one is configured, otherwise built in.
//!
//! # Example catalog file
//!
//! ```json
//! {
//!   "cities": [{ "id": 1, "label": "Riyadh", "secondary_label": "RUH" }],
//!   "agents": [{ "id": "ag-1", "label": "Sara Al-Harbi", "secondary_label": "sara@example.com" }],
//!   "clients": [],
//!   "records": [
//!     { "id": 1, "name": "Spring launch", "kind": "campaign", "status": "draft",
//!       "agent": "ag-1", "city": 1 }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::lifecycle::RecordStatus;
use crate::records::{Assignment, Record, RecordKind};
use crate::selector::{ItemId, SelectableItem};

use super::{InMemorySource, ListDataSource};

/// Kinds of entity a record field can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Agent,
    City,
    Client,
}

impl EntityKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Agent => "Agent",
            EntityKind::City => "City",
            EntityKind::Client => "Client",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            EntityKind::Agent => "agents",
            EntityKind::City => "cities",
            EntityKind::Client => "clients",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SeedKind {
    Campaign,
    Agent,
}

#[derive(Debug, Deserialize)]
struct SeedRecord {
    id: i64,
    name: String,
    kind: SeedKind,
    status: String,
    #[serde(default)]
    agent: Option<ItemId>,
    #[serde(default)]
    city: Option<ItemId>,
    #[serde(default)]
    client: Option<ItemId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    agents: Vec<SelectableItem>,
    cities: Vec<SelectableItem>,
    clients: Vec<SelectableItem>,
    records: Vec<SeedRecord>,
}

/// Entity lists and seed records.
#[derive(Debug, Clone)]
pub struct Catalog {
    agents: Vec<SelectableItem>,
    cities: Vec<SelectableItem>,
    clients: Vec<SelectableItem>,
    records: Vec<Record>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Read(path.to_path_buf(), e))?;
        let file: CatalogFile = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Parse(path.to_path_buf(), e))?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            agents: file.agents,
            cities: file.cities,
            clients: file.clients,
            records: vec![],
        };

        for kind in [EntityKind::Agent, EntityKind::City, EntityKind::Client] {
            let mut seen = HashSet::new();
            for item in catalog.items(kind) {
                if !seen.insert(&item.id) {
                    return Err(CatalogError::DuplicateId {
                        kind: kind.plural(),
                        id: item.id.to_string(),
                    });
                }
            }
        }

        let mut seen_records = HashSet::new();
        for seed in file.records {
            if !seen_records.insert(seed.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "records",
                    id: seed.id.to_string(),
                });
            }
            let record = catalog.build_record(seed)?;
            catalog.records.push(record);
        }

        Ok(catalog)
    }

    fn build_record(&self, seed: SeedRecord) -> Result<Record, CatalogError> {
        let kind = match seed.kind {
            SeedKind::Campaign => RecordKind::Campaign,
            SeedKind::Agent => RecordKind::Agent,
        };
        let status = RecordStatus::parse(kind, &seed.status).ok_or_else(|| {
            CatalogError::InvalidStatus {
                record: seed.id,
                status: seed.status.clone(),
            }
        })?;

        let mut record = Record::new(seed.id, seed.name, status);
        for (field, id) in [
            (EntityKind::Agent, seed.agent),
            (EntityKind::City, seed.city),
            (EntityKind::Client, seed.client),
        ] {
            let Some(id) = id else { continue };
            // Unknown ids are kept with the raw id as label
            let assignment = self
                .find(field, &id)
                .map(Assignment::from)
                .unwrap_or_else(|| Assignment {
                    label: id.to_string(),
                    id,
                });
            record.assign(field, Some(assignment));
        }
        Ok(record)
    }

    pub fn items(&self, kind: EntityKind) -> &[SelectableItem] {
        match kind {
            EntityKind::Agent => &self.agents,
            EntityKind::City => &self.cities,
            EntityKind::Client => &self.clients,
        }
    }

    pub fn find(&self, kind: EntityKind, id: &ItemId) -> Option<&SelectableItem> {
        self.items(kind).iter().find(|item| &item.id == id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Data source over one entity list.
    pub fn source(
        &self,
        kind: EntityKind,
        latency: Duration,
        failing_pages: &[u32],
    ) -> Arc<dyn ListDataSource> {
        Arc::new(
            InMemorySource::new(self.items(kind).to_vec())
                .with_latency(latency)
                .with_failing_pages(failing_pages.iter().copied()),
        )
    }

    /// Built-in demo data.
    pub fn seed() -> Result<Self, CatalogError> {
        let cities = [
            ("Riyadh", "RUH"),
            ("Jeddah", "JED"),
            ("Mecca", "MKK"),
            ("Medina", "MED"),
            ("Dammam", "DMM"),
            ("Khobar", "KHB"),
            ("Taif", "TIF"),
            ("Tabuk", "TUU"),
            ("Abha", "AHB"),
            ("Buraidah", "BUR"),
            ("Hail", "HAS"),
            ("Najran", "EAM"),
            ("Jazan", "GIZ"),
            ("Yanbu", "YNB"),
            ("AlUla", "ULH"),
            ("Khamis Mushait", "KMX"),
            ("Qatif", "QTF"),
            ("Jubail", "JUB"),
            ("Al Ahsa", "HOF"),
            ("Arar", "RAE"),
            ("Sakaka", "AJF"),
            ("Al Baha", "ABT"),
            ("Hafar Al Batin", "HBT"),
            ("Unaizah", "UZH"),
        ];
        let cities = cities
            .iter()
            .zip(1_i64..)
            .map(|((name, code), id)| SelectableItem::new(id, *name).with_secondary(*code))
            .collect();

        let first_names = [
            "Ahmed", "Sara", "Omar", "Layla", "Khalid", "Noura", "Faisal", "Huda", "Yousef",
            "Reem", "Majed", "Lina",
        ];
        let family_names = ["Al-Harbi", "Al-Qahtani", "Al-Otaibi", "Al-Zahrani", "Al-Ghamdi"];

        let people = |offset: usize, prefix: &str, domain: &str| -> Vec<SelectableItem> {
            family_names
                .iter()
                .flat_map(|family| first_names.iter().map(move |first| (*first, *family)))
                .enumerate()
                .skip(offset)
                .take(40)
                .map(|(n, (first, family))| {
                    let handle = format!("{}.{}", first, family).to_lowercase();
                    SelectableItem::new(format!("{}-{}", prefix, n + 1), format!("{} {}", first, family))
                        .with_secondary(format!("{}@{}", handle, domain))
                        .with_image(format!("avatars/{}.png", handle))
                })
                .collect()
        };

        let agents = people(0, "ag", "brokerage.example");
        let clients = people(10, "cl", "mail.example");

        let file = CatalogFile {
            agents,
            cities,
            clients,
            records: vec![
                seed_record(1, "Spring launch", SeedKind::Campaign, "draft"),
                SeedRecord {
                    city: Some(ItemId::Int(1)),
                    agent: Some(ItemId::from("ag-2")),
                    ..seed_record(2, "Riyadh towers open house", SeedKind::Campaign, "running")
                },
                SeedRecord {
                    city: Some(ItemId::Int(2)),
                    ..seed_record(3, "Jeddah waterfront", SeedKind::Campaign, "scheduled")
                },
                seed_record(4, "Ramadan offers", SeedKind::Campaign, "paused"),
                seed_record(5, "Winter villas", SeedKind::Campaign, "completed"),
                SeedRecord {
                    city: Some(ItemId::Int(5)),
                    ..seed_record(6, "Sara Al-Harbi", SeedKind::Agent, "active")
                },
                seed_record(7, "Omar Al-Qahtani", SeedKind::Agent, "pending"),
                seed_record(8, "Layla Al-Otaibi", SeedKind::Agent, "suspended"),
            ],
        };

        Self::from_file(file)
    }
}

fn seed_record(id: i64, name: &str, kind: SeedKind, status: &str) -> SeedRecord {
    SeedRecord {
        id,
        name: name.to_string(),
        kind,
        status: status.to_string(),
        agent: None,
        city: None,
        client: None,
    }
}
