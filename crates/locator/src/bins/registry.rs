use std::collections::HashMap;

use bevy::prelude::*;

use super::types::{Bin, BinRecord, RegistryError};

/// Ordered, read-only set of known bins with O(1) lookup by id.
///
/// Construction validates every bin; a registry that exists is internally
/// consistent. The host inserts it as a resource before the first frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct BinRegistry {
    bins: Vec<Bin>,
    index: HashMap<String, usize>,
}

impl BinRegistry {
    pub fn new(bins: Vec<Bin>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(bins.len());
        for (i, bin) in bins.iter().enumerate() {
            validate_bin(bin)?;
            if index.insert(bin.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateId(bin.id.clone()));
            }
        }
        Ok(Self { bins, index })
    }

    /// Build from string-tagged records, rejecting unknown status/category tags.
    pub fn from_records(records: Vec<BinRecord>) -> Result<Self, RegistryError> {
        let bins = records
            .into_iter()
            .map(Bin::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(bins)
    }

    /// Build from a JSON array of [`BinRecord`]s.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let records: Vec<BinRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn get(&self, id: &str) -> Option<&Bin> {
        self.index.get(id).map(|&i| &self.bins[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Serialize back to the JSON record format.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let records: Vec<BinRecord> = self.bins.iter().map(BinRecord::from).collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

fn validate_bin(bin: &Bin) -> Result<(), RegistryError> {
    if bin.categories.is_empty() {
        return Err(RegistryError::NoCategories(bin.id.clone()));
    }
    if let Some(level) = bin.fill_level {
        if level > 100 {
            return Err(RegistryError::InvalidFillLevel {
                id: bin.id.clone(),
                level,
            });
        }
    }
    if !bin.position.is_valid() {
        return Err(RegistryError::InvalidPosition {
            id: bin.id.clone(),
            position: bin.position,
        });
    }
    Ok(())
}
