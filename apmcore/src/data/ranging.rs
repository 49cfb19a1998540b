use std::collections::HashMap;

use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::algorithm::molecular_ion::MolecularIonBuilder;
use crate::chemistry::constants::MAX_NUMBER_OF_ION_SPECIES;
use crate::chemistry::formula::{composition_hash, IonLabel, NuclideHint};
use crate::chemistry::isotopes::IsotopeTable;
use crate::chemistry::nuclide::NuclideHash;
use crate::data::ion::{Ion, MassToChargeRange, RangeInsertion};
use crate::error::{RangeEntryError, RangingError};

/// One line of a range file: an ion label with its mass-to-charge interval
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeDefinition {
    pub label: String,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl RangeDefinition {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        RangeDefinition { label: label.into(), min, max, color: None, volume: None }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// run the molecular ion builder on the composition hint and first interval of an ion
///
/// An ion without composition or without intervals is an unlabeled peak and is marked
/// unresolved. Otherwise the charge state model is attached and the charge state taken
/// from its top pick, or reset to 0 when there is none.
pub fn resolve_ambiguous(ion: &mut Ion, builder: &MolecularIonBuilder<'_>) -> Result<(), RangingError> {
    let range = match ion.ranges().first() {
        Some(range) if !ion.nuclide_hash.is_empty() => *range,
        _ => {
            ion.mark_unresolved();
            return Ok(());
        }
    };
    let model = builder.resolve_with_charge(ion.nuclide_hash.as_slice(), range.min, range.max, ion.charge_hint)?;
    debug!("{} resolved as {:?} with {} candidates", ion.key(), model.resolution, model.candidates.len());
    ion.attach_charge_state_model(model);
    Ok(())
}

/// Ordered collection of ranged ions, one per (composition hint, charge hint)
#[derive(Clone, Debug)]
pub struct RangeRegistry<'t> {
    table: &'t IsotopeTable,
    ions: Vec<Ion>,
    index: HashMap<String, usize>,
}

impl RangeRegistry<'static> {
    pub fn with_nist() -> Self {
        RangeRegistry::new(IsotopeTable::nist())
    }
}

impl<'t> RangeRegistry<'t> {
    pub fn new(table: &'t IsotopeTable) -> Self {
        RangeRegistry { table, ions: Vec::new(), index: HashMap::new() }
    }

    /// parse a range label and add its interval to the matching ion
    ///
    /// Arguments:
    ///
    /// * `label` - ion label, e.g. `"Cr2O"` or `"2Fe16O3++"`, empty for an unlabeled peak
    /// * `min` - lower mass-to-charge bound in Da
    /// * `max` - upper mass-to-charge bound in Da
    ///
    /// Returns:
    ///
    /// * `Result<&Ion, RangingError>` - the ion now holding the interval
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::data::ranging::RangeRegistry;
    ///
    /// let mut registry = RangeRegistry::with_nist();
    /// registry.register("Al+", 26.9, 27.1).unwrap();
    /// registry.register("Al+", 26.9, 27.1).unwrap();
    /// assert_eq!(registry.len(), 1);
    /// assert_eq!(registry.iter().next().unwrap().ranges().len(), 1);
    /// assert!(registry.register("Fe", 27.0, 27.5).is_err());
    /// ```
    pub fn register(&mut self, label: &str, min: f64, max: f64) -> Result<&Ion, RangingError> {
        let index = self.register_label(label, min, max)?;
        Ok(&self.ions[index])
    }

    /// add an interval for a composition already split into element and isotope hints
    pub fn register_hint(
        &mut self,
        hints: &[NuclideHint],
        charge_hint: Option<i8>,
        min: f64,
        max: f64,
    ) -> Result<&Ion, RangingError> {
        let nuclide_hash = composition_hash(hints, self.table)?;
        let index = self.insert(nuclide_hash, charge_hint, min, max)?;
        Ok(&self.ions[index])
    }

    /// register a range definition, display metadata of the definition is copied onto the ion
    pub fn register_definition(&mut self, definition: &RangeDefinition) -> Result<&Ion, RangingError> {
        let index = self.register_label(&definition.label, definition.min, definition.max)?;
        let ion = &mut self.ions[index];
        if let Some(color) = &definition.color {
            ion.color = color.clone();
        }
        if let Some(volume) = definition.volume {
            ion.volume = volume;
        }
        Ok(&self.ions[index])
    }

    /// register every definition, a failing entry does not stop the others
    pub fn register_all(&mut self, definitions: &[RangeDefinition]) -> Vec<RangeEntryError> {
        let mut errors = Vec::new();
        for (index, definition) in definitions.iter().enumerate() {
            if let Err(source) = self.register_definition(definition) {
                warn!("skipping range entry {} ({:?}): {}", index, definition.label, source);
                errors.push(RangeEntryError { index, label: definition.label.clone(), source });
            }
        }
        errors
    }

    pub fn resolve_ion(&mut self, key: &str, builder: &MolecularIonBuilder<'_>) -> Result<&Ion, RangingError> {
        let index = *self.index.get(key).ok_or_else(|| RangingError::UnknownIon(key.to_string()))?;
        resolve_ambiguous(&mut self.ions[index], builder)?;
        Ok(&self.ions[index])
    }

    /// resolve all ions in registration order, failures are collected per ion
    pub fn resolve_all(&mut self, builder: &MolecularIonBuilder<'_>) -> Vec<RangeEntryError> {
        let mut errors = Vec::new();
        for (index, ion) in self.ions.iter_mut().enumerate() {
            if let Err(source) = resolve_ambiguous(ion, builder) {
                warn!("cannot resolve ion {} ({}): {}", index, ion.name, source);
                errors.push(RangeEntryError { index, label: ion.name.clone(), source });
            }
        }
        errors
    }

    /// resolve all ions on a dedicated pool of `num_threads` workers
    pub fn resolve_all_parallel(
        &mut self,
        builder: &MolecularIonBuilder<'_>,
        num_threads: usize,
    ) -> Result<Vec<RangeEntryError>, RangingError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| RangingError::ThreadPool(e.to_string()))?;

        let errors: Vec<RangeEntryError> = pool.install(|| {
            self.ions
                .par_iter_mut()
                .enumerate()
                .filter_map(|(index, ion)| {
                    resolve_ambiguous(ion, builder)
                        .err()
                        .map(|source| RangeEntryError { index, label: ion.name.clone(), source })
                })
                .collect()
        });

        for error in &errors {
            warn!("cannot resolve ion {} ({}): {}", error.index, error.label, error.source);
        }
        Ok(errors)
    }

    pub fn get(&self, key: &str) -> Option<&Ion> {
        self.index.get(key).map(|&index| &self.ions[index])
    }

    /// ion whose intervals cover a mass-to-charge value
    pub fn find(&self, mass_to_charge: f64) -> Option<&Ion> {
        self.ions
            .iter()
            .find(|ion| ion.ranges().iter().any(|range| range.contains_value(mass_to_charge)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ion> {
        self.ions.iter()
    }

    pub fn ions(&self) -> &[Ion] {
        &self.ions
    }

    pub fn len(&self) -> usize {
        self.ions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ions.is_empty()
    }

    fn register_label(&mut self, label: &str, min: f64, max: f64) -> Result<usize, RangingError> {
        let parsed = IonLabel::parse(label, self.table)?;
        let nuclide_hash = parsed.nuclide_hash(self.table)?;
        self.insert(nuclide_hash, parsed.charge_state, min, max)
    }

    fn insert(
        &mut self,
        nuclide_hash: NuclideHash,
        charge_hint: Option<i8>,
        min: f64,
        max: f64,
    ) -> Result<usize, RangingError> {
        let range = MassToChargeRange::new(min, max)?;
        let key = nuclide_hash.unique_keyword(charge_hint.unwrap_or(0));
        let existing = self.index.get(&key).copied();

        for (index, ion) in self.ions.iter().enumerate() {
            if Some(index) == existing {
                continue;
            }
            if let Some(claimed) = ion.overlapping_range(&range) {
                return Err(range.overlap_error(claimed).into());
            }
        }

        let index = match existing {
            Some(index) => index,
            None => {
                if self.ions.len() >= MAX_NUMBER_OF_ION_SPECIES {
                    return Err(RangingError::TooManyIonSpecies(MAX_NUMBER_OF_ION_SPECIES));
                }
                self.ions.push(Ion::new(nuclide_hash, charge_hint));
                self.index.insert(key, self.ions.len() - 1);
                self.ions.len() - 1
            }
        };

        match self.ions[index].insert_range(range)? {
            RangeInsertion::Inserted => debug!("added {} to {}", range, self.ions[index].name),
            RangeInsertion::AlreadyCovered => debug!("{} already covered by {}", range, self.ions[index].name),
        }
        Ok(index)
    }
}
