use std::collections::HashSet;
use std::path::Path;

use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::chemistry::constants::{
    MAX_CHARGE_STATE, MAX_NUMBER_OF_ATOMS_PER_ION, MAX_NUMBER_OF_CANDIDATES, PRACTICAL_ABUNDANCE_PRODUCT,
    PRACTICAL_MIN_HALF_LIFE, SACRIFICE_ISOTOPIC_UNIQUENESS,
};
use crate::chemistry::isotopes::{Isotope, IsotopeTable};
use crate::chemistry::nuclide::{composition_to_label, decode_nuclide, is_element_level, NuclideHash};
use crate::error::{BuilderError, ConfigError, NuclideError, RangeError};

macro_rules! diagnostic {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+)
        } else {
            debug!($($arg)+)
        }
    };
}

fn stable_isotopes_only() -> f64 {
    PRACTICAL_MIN_HALF_LIFE
}

/// Thresholds for the molecular ion search
///
/// A TOML file must set every field. Only `min_half_life` may be left out, it then keeps
/// stable isotopes only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// lower bound on the natural abundance product of a candidate, in [0, 1]
    pub min_abundance: f64,
    /// lower bound on the shortest constituent half-life in seconds, infinity keeps stable isotopes only
    #[serde(default = "stable_isotopes_only")]
    pub min_half_life: f64,
    /// keep several coexisting candidates instead of reporting an ambiguity
    pub sacrifice_uniqueness: bool,
    /// raise search diagnostics from debug to info level
    pub verbose: bool,
    /// highest charge state tried, in 1..=7
    pub max_charge_state: i8,
}

impl BuilderConfig {
    pub fn new(
        min_abundance: f64,
        min_half_life: f64,
        sacrifice_uniqueness: bool,
        verbose: bool,
        max_charge_state: i8,
    ) -> Self {
        BuilderConfig { min_abundance, min_half_life, sacrifice_uniqueness, verbose, max_charge_state }
    }

    /// Settings used for routine ranging: any abundance, stable isotopes, coexisting candidates allowed.
    pub fn practical() -> Self {
        BuilderConfig::new(
            PRACTICAL_ABUNDANCE_PRODUCT,
            PRACTICAL_MIN_HALF_LIFE,
            SACRIFICE_ISOTOPIC_UNIQUENESS,
            false,
            MAX_CHARGE_STATE,
        )
    }

    /// Practical thresholds, but several matching candidates are reported as ambiguous.
    pub fn strict() -> Self {
        BuilderConfig { sacrifice_uniqueness: false, ..BuilderConfig::practical() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_abundance) {
            return Err(ConfigError::Invalid {
                parameter: "min_abundance",
                reason: format!("{} is outside [0, 1]", self.min_abundance),
            });
        }
        if self.min_half_life.is_nan() || self.min_half_life < 0.0 {
            return Err(ConfigError::Invalid {
                parameter: "min_half_life",
                reason: format!("{} is not a non-negative duration", self.min_half_life),
            });
        }
        if !(1..=MAX_CHARGE_STATE).contains(&self.max_charge_state) {
            return Err(ConfigError::Invalid {
                parameter: "max_charge_state",
                reason: format!("{} is outside 1..={}", self.max_charge_state, MAX_CHARGE_STATE),
            });
        }
        Ok(())
    }

    /// parse and validate a TOML configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::algorithm::molecular_ion::BuilderConfig;
    ///
    /// let toml = r#"
    ///     min_abundance = 0.0
    ///     sacrifice_uniqueness = true
    ///     verbose = false
    ///     max_charge_state = 3
    /// "#;
    /// let config = BuilderConfig::from_toml_str(toml).unwrap();
    /// assert_eq!(config.max_charge_state, 3);
    /// assert!(config.min_half_life.is_infinite());
    /// assert!(BuilderConfig::from_toml_str("max_charge_state = 3").is_err());
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BuilderConfig = toml::from_str(content).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// A composition and charge state whose mass-to-charge lies in the target interval
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MolecularIonCandidate {
    pub nuclide_hash: NuclideHash,
    pub charge_state: i8,
    /// sum of the constituent atomic masses in Da
    pub mass: f64,
    pub predicted_mass_to_charge: f64,
    pub natural_abundance_product: f64,
    /// shortest constituent half-life in seconds
    pub shortest_half_life: f64,
}

impl MolecularIonCandidate {
    pub fn unique_keyword(&self) -> String {
        self.nuclide_hash.unique_keyword(self.charge_state)
    }

    pub fn label(&self) -> String {
        composition_to_label(&self.nuclide_hash)
    }
}

/// Outcome of applying the uniqueness policy to the ranked candidates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    NoCandidate,
    Unique,
    /// several candidates are kept, the first ranked one stands for the ion
    Coexisting,
    /// several candidates match and the configuration forbids picking one
    Ambiguous,
}

/// Record of one builder run: thresholds, ranked candidates and the resolution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeStateModel {
    pub config: BuilderConfig,
    pub range_min: f64,
    pub range_max: f64,
    pub charge_hint: Option<i8>,
    pub candidates: Vec<MolecularIonCandidate>,
    pub resolution: Resolution,
}

impl ChargeStateModel {
    /// the candidate that represents the ion, `None` unless the resolution is unique or coexisting
    pub fn top_pick(&self) -> Option<&MolecularIonCandidate> {
        match self.resolution {
            Resolution::Unique | Resolution::Coexisting => self.candidates.first(),
            Resolution::NoCandidate | Resolution::Ambiguous => None,
        }
    }

    /// charge state all candidates agree on
    pub fn shared_charge_state(&self) -> Option<i8> {
        let first = self.candidates.first()?.charge_state;
        self.candidates
            .iter()
            .all(|candidate| candidate.charge_state == first)
            .then_some(first)
    }

    pub fn is_resolved(&self) -> bool {
        self.top_pick().is_some()
    }
}

struct Slot<'t> {
    hash: u32,
    /// most abundant first
    isotopes: Vec<&'t Isotope>,
    min_mass: f64,
    max_mass: f64,
    max_abundance: f64,
}

struct Partial {
    indices: Vec<usize>,
    mass: f64,
    abundance: f64,
    half_life: f64,
}

/// Enumerates isotopic compositions of a composition hint that explain a mass-to-charge interval
#[derive(Clone, Debug)]
pub struct MolecularIonBuilder<'a> {
    table: &'a IsotopeTable,
    config: BuilderConfig,
}

impl MolecularIonBuilder<'static> {
    pub fn with_nist(config: BuilderConfig) -> Result<Self, BuilderError> {
        MolecularIonBuilder::new(IsotopeTable::nist(), config)
    }
}

impl<'a> MolecularIonBuilder<'a> {
    pub fn new(table: &'a IsotopeTable, config: BuilderConfig) -> Result<Self, BuilderError> {
        config.validate()?;
        Ok(MolecularIonBuilder { table, config })
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn table(&self) -> &'a IsotopeTable {
        self.table
    }

    /// find all isotopic compositions and charge states of a composition hint inside an interval
    ///
    /// Arguments:
    ///
    /// * `candidate` - nuclide hash values, one per atom, element-level values leave the isotope open, 0 is padding
    /// * `range_min` - lower mass-to-charge bound, inclusive
    /// * `range_max` - upper mass-to-charge bound, inclusive
    ///
    /// Returns:
    ///
    /// * `Result<Vec<MolecularIonCandidate>, BuilderError>` - ranked candidates, empty if nothing matches,
    ///   `TooManyCandidates` beyond `MAX_NUMBER_OF_CANDIDATES`
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::algorithm::molecular_ion::{BuilderConfig, MolecularIonBuilder};
    /// use apmcore::chemistry::nuclide::element_hash;
    ///
    /// let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
    /// let chromium = element_hash(24).unwrap();
    /// let oxygen = element_hash(8).unwrap();
    /// let candidates = builder.combinatorics(&[chromium, chromium, oxygen], 57.819, 61.159).unwrap();
    /// assert!(candidates.iter().all(|candidate| candidate.charge_state == 2));
    /// assert_eq!(candidates[0].label(), "16O52Cr2");
    /// ```
    pub fn combinatorics(
        &self,
        candidate: &[u32],
        range_min: f64,
        range_max: f64,
    ) -> Result<Vec<MolecularIonCandidate>, BuilderError> {
        check_target_range(range_min, range_max)?;

        let mut hashes: Vec<u32> = candidate.iter().copied().filter(|&hash| hash != 0).collect();
        if hashes.is_empty() {
            return Err(BuilderError::EmptyComposition);
        }
        if hashes.len() > MAX_NUMBER_OF_ATOMS_PER_ION {
            return Err(BuilderError::CompositionTooLarge {
                atoms: hashes.len(),
                max: MAX_NUMBER_OF_ATOMS_PER_ION,
            });
        }
        hashes.sort_unstable();

        let slots = match self.slots(&hashes)? {
            Some(slots) => slots,
            None => {
                diagnostic!(
                    self.config.verbose,
                    "no isotope of {:?} passes the half-life threshold {}",
                    hashes,
                    self.config.min_half_life
                );
                return Ok(Vec::new());
            }
        };

        let n = slots.len();
        let mut rest_min_mass = vec![0.0; n + 1];
        let mut rest_max_mass = vec![0.0; n + 1];
        let mut rest_abundance = vec![1.0; n + 1];
        for i in (0..n).rev() {
            rest_min_mass[i] = rest_min_mass[i + 1] + slots[i].min_mass;
            rest_max_mass[i] = rest_max_mass[i + 1] + slots[i].max_mass;
            rest_abundance[i] = rest_abundance[i + 1] * slots[i].max_abundance;
        }

        // total mass windows, widened slightly since bound sums round differently than full sums
        let windows: Vec<(f64, f64)> = (1..=self.config.max_charge_state)
            .map(|z| {
                let z = f64::from(z);
                let tolerance = range_max * z * 1e-12;
                (range_min * z - tolerance, range_max * z + tolerance)
            })
            .collect();
        let reachable = |lo: f64, hi: f64| windows.iter().any(|&(w_min, w_max)| hi >= w_min && lo <= w_max);

        let mut seen: HashSet<(NuclideHash, i8)> = HashSet::new();
        let mut candidates = Vec::new();
        let mut explored = 0usize;
        let mut stack = vec![Partial {
            indices: Vec::with_capacity(n),
            mass: 0.0,
            abundance: 1.0,
            half_life: f64::INFINITY,
        }];

        while let Some(partial) = stack.pop() {
            explored += 1;
            let depth = partial.indices.len();
            if depth == n {
                self.accept(&slots, &partial, range_min, range_max, &mut seen, &mut candidates)?;
                continue;
            }

            let slot = &slots[depth];
            // identical slots take non-decreasing isotope indices
            let start = match depth.checked_sub(1) {
                Some(previous) if slots[previous].hash == slot.hash => partial.indices[previous],
                _ => 0,
            };
            for index in (start..slot.isotopes.len()).rev() {
                let isotope = slot.isotopes[index];
                let mass = partial.mass + isotope.atomic_mass;
                let abundance = partial.abundance * isotope.natural_abundance;
                if !reachable(mass + rest_min_mass[depth + 1], mass + rest_max_mass[depth + 1]) {
                    continue;
                }
                if abundance * rest_abundance[depth + 1] < self.config.min_abundance {
                    continue;
                }
                let mut indices = partial.indices.clone();
                indices.push(index);
                stack.push(Partial {
                    indices,
                    mass,
                    abundance,
                    half_life: partial.half_life.min(isotope.half_life),
                });
            }
        }

        candidates.sort_by(|a, b| {
            OrderedFloat(b.natural_abundance_product)
                .cmp(&OrderedFloat(a.natural_abundance_product))
                .then_with(|| OrderedFloat(b.shortest_half_life).cmp(&OrderedFloat(a.shortest_half_life)))
                .then_with(|| a.charge_state.cmp(&b.charge_state))
                .then_with(|| a.nuclide_hash.cmp(&b.nuclide_hash))
        });

        diagnostic!(
            self.config.verbose,
            "{} candidates for {:?} in [{}, {}] after {} partial assignments",
            candidates.len(),
            hashes,
            range_min,
            range_max,
            explored
        );
        Ok(candidates)
    }

    /// run the search and apply the uniqueness policy
    pub fn resolve(
        &self,
        candidate: &[u32],
        range_min: f64,
        range_max: f64,
    ) -> Result<ChargeStateModel, BuilderError> {
        self.resolve_with_charge(candidate, range_min, range_max, None)
    }

    /// like [`resolve`](Self::resolve), keeping only candidates of the hinted charge state
    pub fn resolve_with_charge(
        &self,
        candidate: &[u32],
        range_min: f64,
        range_max: f64,
        charge_hint: Option<i8>,
    ) -> Result<ChargeStateModel, BuilderError> {
        let mut candidates = self.combinatorics(candidate, range_min, range_max)?;
        if let Some(charge_state) = charge_hint {
            candidates.retain(|candidate| candidate.charge_state == charge_state);
        }

        let resolution = match candidates.len() {
            0 => Resolution::NoCandidate,
            1 => Resolution::Unique,
            _ if self.config.sacrifice_uniqueness => Resolution::Coexisting,
            _ => Resolution::Ambiguous,
        };
        if resolution == Resolution::Ambiguous {
            warn!(
                "{} molecular ions match [{}, {}], composition left unresolved: {}",
                candidates.len(),
                range_min,
                range_max,
                candidates.iter().map(MolecularIonCandidate::unique_keyword).collect::<Vec<_>>().join(", ")
            );
        }

        Ok(ChargeStateModel {
            config: self.config,
            range_min,
            range_max,
            charge_hint,
            candidates,
            resolution,
        })
    }

    /// per-atom isotope choices, `None` if some atom has no admissible isotope
    fn slots(&self, hashes: &[u32]) -> Result<Option<Vec<Slot<'a>>>, BuilderError> {
        let mut slots = Vec::with_capacity(hashes.len());
        for &hash in hashes {
            let (proton_count, neutron_count) = decode_nuclide(hash)?;
            let mut isotopes: Vec<&Isotope> = if is_element_level(hash) {
                self.table.isotopes_of(proton_count).iter().collect()
            } else {
                let isotope = self.table.get(proton_count, neutron_count).ok_or(NuclideError::UnknownIsotope {
                    proton_count,
                    mass_number: proton_count + neutron_count,
                })?;
                vec![isotope]
            };
            isotopes.retain(|isotope| isotope.half_life >= self.config.min_half_life);
            if isotopes.is_empty() {
                return Ok(None);
            }
            isotopes.sort_by(|a, b| {
                b.natural_abundance
                    .total_cmp(&a.natural_abundance)
                    .then(a.neutron_count.cmp(&b.neutron_count))
            });

            let masses = isotopes.iter().map(|isotope| isotope.atomic_mass);
            slots.push(Slot {
                hash,
                min_mass: masses.clone().fold(f64::INFINITY, f64::min),
                max_mass: masses.fold(f64::NEG_INFINITY, f64::max),
                max_abundance: isotopes[0].natural_abundance,
                isotopes,
            });
        }
        Ok(Some(slots))
    }

    fn accept(
        &self,
        slots: &[Slot<'a>],
        partial: &Partial,
        range_min: f64,
        range_max: f64,
        seen: &mut HashSet<(NuclideHash, i8)>,
        candidates: &mut Vec<MolecularIonCandidate>,
    ) -> Result<(), BuilderError> {
        if partial.abundance < self.config.min_abundance || partial.half_life < self.config.min_half_life {
            return Ok(());
        }
        let nuclide_hash = NuclideHash::from_hashes(
            partial
                .indices
                .iter()
                .zip(slots)
                .map(|(&index, slot)| slot.isotopes[index].hash()),
        )?;

        for charge_state in 1..=self.config.max_charge_state {
            let predicted_mass_to_charge = partial.mass / f64::from(charge_state);
            if predicted_mass_to_charge < range_min {
                break;
            }
            if predicted_mass_to_charge > range_max {
                continue;
            }
            if seen.insert((nuclide_hash.clone(), charge_state)) {
                if candidates.len() >= MAX_NUMBER_OF_CANDIDATES {
                    return Err(BuilderError::TooManyCandidates { max: MAX_NUMBER_OF_CANDIDATES });
                }
                candidates.push(MolecularIonCandidate {
                    nuclide_hash: nuclide_hash.clone(),
                    charge_state,
                    mass: partial.mass,
                    predicted_mass_to_charge,
                    natural_abundance_product: partial.abundance,
                    shortest_half_life: partial.half_life,
                });
            }
        }
        Ok(())
    }
}

fn check_target_range(range_min: f64, range_max: f64) -> Result<(), RangeError> {
    let reason = if !range_min.is_finite() || !range_max.is_finite() {
        "bounds must be finite"
    } else if range_min < 0.0 {
        "bounds must not be negative"
    } else if range_min > range_max {
        "lower bound exceeds upper bound"
    } else {
        return Ok(());
    };
    Err(RangeError::InvalidRange { min: range_min, max: range_max, reason: reason.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::nuclide::{element_hash, encode_composition, encode_nuclide};

    fn fe2o5() -> Vec<u32> {
        let iron = element_hash(26).unwrap();
        let oxygen = element_hash(8).unwrap();
        vec![iron, iron, oxygen, oxygen, oxygen, oxygen, oxygen]
    }

    fn cr2o() -> Vec<u32> {
        let chromium = element_hash(24).unwrap();
        vec![chromium, chromium, element_hash(8).unwrap()]
    }

    #[test]
    fn test_fe2o5_example() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        let candidates = builder.combinatorics(&fe2o5(), 187.48, 190.256).unwrap();
        assert!(!candidates.is_empty());
        for candidate in &candidates {
            assert_eq!(candidate.charge_state, 1);
            assert!(candidate.shortest_half_life.is_infinite());
            assert!(candidate.predicted_mass_to_charge >= 187.48);
            assert!(candidate.predicted_mass_to_charge <= 190.256);
            assert_eq!(candidate.nuclide_hash.len(), 7);
        }
        let expected = encode_composition(&[(26, 28), (26, 30), (8, 8), (8, 8), (8, 8), (8, 8), (8, 8)]).unwrap();
        assert_eq!(candidates[0].nuclide_hash, expected);
    }

    #[test]
    fn test_ranking_and_uniqueness() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        let candidates = builder.combinatorics(&fe2o5(), 187.48, 190.256).unwrap();
        for pair in candidates.windows(2) {
            assert!(pair[0].natural_abundance_product >= pair[1].natural_abundance_product);
        }
        let keys: HashSet<String> = candidates.iter().map(MolecularIonCandidate::unique_keyword).collect();
        assert_eq!(keys.len(), candidates.len());
    }

    #[test]
    fn test_deterministic() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        let first = builder.combinatorics(&fe2o5(), 187.48, 190.256).unwrap();
        let second = builder.combinatorics(&fe2o5(), 187.48, 190.256).unwrap();
        assert_eq!(first, second);

        let mut shuffled = fe2o5();
        shuffled.reverse();
        assert_eq!(builder.combinatorics(&shuffled, 187.48, 190.256).unwrap(), first);
    }

    #[test]
    fn test_abundance_threshold_filters_everything() {
        let config = BuilderConfig { min_abundance: 0.9, ..BuilderConfig::practical() };
        let builder = MolecularIonBuilder::with_nist(config).unwrap();
        assert!(builder.combinatorics(&fe2o5(), 187.48, 190.256).unwrap().is_empty());
        let model = builder.resolve(&fe2o5(), 187.48, 190.256).unwrap();
        assert_eq!(model.resolution, Resolution::NoCandidate);
        assert!(model.top_pick().is_none());
    }

    #[test]
    fn test_half_life_threshold() {
        let technetium = vec![element_hash(43).unwrap()];
        let stable_only = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        assert!(stable_only.combinatorics(&technetium, 97.5, 98.5).unwrap().is_empty());

        let builder = MolecularIonBuilder::with_nist(BuilderConfig::new(0.0, 0.0, true, false, 7)).unwrap();
        let model = builder.resolve(&technetium, 97.5, 98.5).unwrap();
        assert_eq!(model.resolution, Resolution::Unique);
        let tc98 = model.top_pick().unwrap();
        assert_eq!(tc98.nuclide_hash.as_slice(), &[encode_nuclide(43, 55).unwrap()]);
        assert!(tc98.shortest_half_life.is_finite());
    }

    #[test]
    fn test_cr2o_doubly_charged() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        let model = builder.resolve(&cr2o(), 57.819, 61.159).unwrap();
        assert_eq!(model.resolution, Resolution::Coexisting);
        assert_eq!(model.shared_charge_state(), Some(2));
        let top = model.top_pick().unwrap();
        assert_eq!(top.charge_state, 2);
        assert_eq!(top.nuclide_hash, encode_composition(&[(24, 28), (24, 28), (8, 8)]).unwrap());

        let hinted = builder.resolve_with_charge(&cr2o(), 57.819, 61.159, Some(1)).unwrap();
        assert_eq!(hinted.resolution, Resolution::NoCandidate);
    }

    #[test]
    fn test_strict_config_reports_ambiguity() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::strict()).unwrap();
        let model = builder.resolve(&cr2o(), 57.819, 61.159).unwrap();
        assert_eq!(model.resolution, Resolution::Ambiguous);
        assert!(model.top_pick().is_none());
        assert!(model.candidates.len() > 1);
    }

    #[test]
    fn test_fixed_isotope_and_padding() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::strict()).unwrap();
        let o16 = encode_nuclide(8, 8).unwrap();
        let model = builder.resolve(&[0, o16, 0], 15.9, 16.1).unwrap();
        assert_eq!(model.resolution, Resolution::Unique);
        assert_eq!(model.top_pick().unwrap().charge_state, 1);
        // the interval bounds are inclusive
        let mass = builder.table().get(8, 8).unwrap().atomic_mass;
        assert_eq!(builder.combinatorics(&[o16], mass, mass).unwrap().len(), 1);
    }

    #[test]
    fn test_input_errors() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        assert_eq!(builder.combinatorics(&[0, 0], 10.0, 20.0), Err(BuilderError::EmptyComposition));

        let oxygen = element_hash(8).unwrap();
        assert_eq!(
            builder.combinatorics(&[oxygen; 33], 10.0, 20.0),
            Err(BuilderError::CompositionTooLarge { atoms: 33, max: 32 })
        );
        assert!(matches!(builder.combinatorics(&[oxygen], 20.0, 10.0), Err(BuilderError::Range(_))));
        assert!(matches!(builder.combinatorics(&[oxygen], f64::NAN, 10.0), Err(BuilderError::Range(_))));
        assert!(matches!(builder.combinatorics(&[131072], 10.0, 20.0), Err(BuilderError::Nuclide(_))));
        // O-30 is not in the table
        let o30 = encode_nuclide(8, 22).unwrap();
        assert!(matches!(
            builder.combinatorics(&[o30], 10.0, 40.0),
            Err(BuilderError::Nuclide(NuclideError::UnknownIsotope { proton_count: 8, mass_number: 30 }))
        ));
    }

    #[test]
    fn test_candidate_cap() {
        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        let tin = element_hash(50).unwrap();
        assert_eq!(
            builder.combinatorics(&[tin; 12], 200.0, 700.0),
            Err(BuilderError::TooManyCandidates { max: MAX_NUMBER_OF_CANDIDATES })
        );
        assert!(builder.combinatorics(&[tin; 2], 200.0, 700.0).unwrap().len() < MAX_NUMBER_OF_CANDIDATES);
    }

    #[test]
    fn test_config_validation() {
        assert!(BuilderConfig::practical().validate().is_ok());
        assert!(BuilderConfig::strict().validate().is_ok());
        assert!(BuilderConfig::new(1.5, 0.0, true, false, 7).validate().is_err());
        assert!(BuilderConfig::new(0.0, -1.0, true, false, 7).validate().is_err());
        assert!(BuilderConfig::new(0.0, 0.0, true, false, 0).validate().is_err());
        assert!(matches!(
            MolecularIonBuilder::with_nist(BuilderConfig::new(0.0, 0.0, true, false, 8)),
            Err(BuilderError::Config(ConfigError::Invalid { parameter: "max_charge_state", .. }))
        ));
    }

    #[test]
    fn test_config_from_toml() {
        let config = BuilderConfig::from_toml_str(
            r#"
            min_abundance = 0.01
            min_half_life = inf
            sacrifice_uniqueness = false
            verbose = true
            max_charge_state = 3
            "#,
        )
        .unwrap();
        assert_eq!(config, BuilderConfig::new(0.01, f64::INFINITY, false, true, 3));

        let without_half_life = BuilderConfig::from_toml_str(
            "min_abundance = 0.0\nsacrifice_uniqueness = true\nverbose = false\nmax_charge_state = 7",
        )
        .unwrap();
        assert_eq!(without_half_life, BuilderConfig::practical());

        // every other field has to be spelled out
        assert!(matches!(BuilderConfig::from_toml_str(""), Err(ConfigError::Toml(_))));
        assert!(matches!(
            BuilderConfig::from_toml_str("min_abundance = 0.0\nsacrifice_uniqueness = true\nmax_charge_state = 7"),
            Err(ConfigError::Toml(message)) if message.contains("verbose")
        ));
        assert!(matches!(
            BuilderConfig::from_toml_str(
                "min_abundance = 0.0\nsacrifice_uniqueness = true\nverbose = false\nmax_charge_state = 9"
            ),
            Err(ConfigError::Invalid { parameter: "max_charge_state", .. })
        ));
        assert!(matches!(BuilderConfig::from_toml_str("min_abundance = "), Err(ConfigError::Toml(_))));
        assert!(matches!(
            BuilderConfig::from_file("/nonexistent/builder.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
