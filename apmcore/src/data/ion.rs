use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::algorithm::molecular_ion::ChargeStateModel;
use crate::chemistry::constants::{MQ_EPSILON, MQ_MAX_RANGE_WIDTH};
use crate::chemistry::nuclide::{composition_to_label, human_readable_name, NuclideHash};
use crate::error::RangeError;

/// Closed mass-to-charge interval in Da
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MassToChargeRange {
    pub min: f64,
    pub max: f64,
}

impl MassToChargeRange {
    /// validated interval
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::data::ion::MassToChargeRange;
    ///
    /// assert!(MassToChargeRange::new(26.9, 27.1).is_ok());
    /// assert!(MassToChargeRange::new(27.1, 26.9).is_err());
    /// assert!(MassToChargeRange::new(27.0, 27.0001).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        let reason = if !min.is_finite() || !max.is_finite() {
            "bounds must be finite".to_string()
        } else if min < 0.0 {
            "bounds must not be negative".to_string()
        } else if min >= max {
            "lower bound must be below upper bound".to_string()
        } else if max - min > MQ_MAX_RANGE_WIDTH {
            format!("width exceeds {} Da", MQ_MAX_RANGE_WIDTH)
        } else if max - min < MQ_EPSILON {
            format!("width below the mass resolution of {} Da", MQ_EPSILON)
        } else {
            return Ok(MassToChargeRange { min, max });
        };
        Err(RangeError::InvalidRange { min, max, reason })
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// `other` lies inside this interval
    pub fn contains(&self, other: &MassToChargeRange) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// intervals share more than an endpoint
    pub fn overlaps(&self, other: &MassToChargeRange) -> bool {
        other.min < self.max && other.max > self.min
    }

    pub fn contains_value(&self, mass_to_charge: f64) -> bool {
        (self.min..=self.max).contains(&mass_to_charge)
    }

    pub(crate) fn overlap_error(&self, existing: &MassToChargeRange) -> RangeError {
        RangeError::Overlapping {
            min: self.min,
            max: self.max,
            existing_min: existing.min,
            existing_max: existing.max,
        }
    }
}

impl fmt::Display for MassToChargeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeInsertion {
    Inserted,
    /// interval already lies inside a stored interval, nothing changed
    AlreadyCovered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IonStatus {
    /// composition not yet checked by the molecular ion builder
    Pending,
    Resolved,
    /// no plausible or no unique molecular ion, charge state left at 0
    Unresolved,
}

impl fmt::Display for IonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            IonStatus::Pending => "pending",
            IonStatus::Resolved => "resolved",
            IonStatus::Unresolved => "unresolved",
        };
        write!(f, "{}", status)
    }
}

/// An ion species with its ranged mass-to-charge intervals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ion {
    /// composition hint, element-level entries leave the isotope open
    pub nuclide_hash: NuclideHash,
    /// 0 as long as the charge state is not recovered
    pub charge_state: i8,
    /// charge given by the range label, if any
    pub charge_hint: Option<i8>,
    /// disjoint, sorted by lower bound
    ranges: Vec<MassToChargeRange>,
    pub name: String,
    pub comment: String,
    pub color: String,
    pub volume: f64,
    pub status: IonStatus,
    pub charge_state_model: Option<ChargeStateModel>,
}

impl Ion {
    pub fn new(nuclide_hash: NuclideHash, charge_hint: Option<i8>) -> Self {
        let charge_state = charge_hint.unwrap_or(0);
        Ion {
            name: human_readable_name(&nuclide_hash, charge_state),
            nuclide_hash,
            charge_state,
            charge_hint,
            ranges: Vec::new(),
            comment: String::new(),
            color: String::new(),
            volume: 0.0,
            status: IonStatus::Pending,
            charge_state_model: None,
        }
    }

    /// registry key, fixed by the composition hint and the charge hint
    pub fn key(&self) -> String {
        self.nuclide_hash.unique_keyword(self.charge_hint.unwrap_or(0))
    }

    pub fn label(&self) -> String {
        composition_to_label(&self.nuclide_hash)
    }

    pub fn ranges(&self) -> &[MassToChargeRange] {
        &self.ranges
    }

    /// add an interval, keeping the stored intervals disjoint
    ///
    /// Arguments:
    ///
    /// * `min` - lower mass-to-charge bound in Da
    /// * `max` - upper mass-to-charge bound in Da
    ///
    /// Returns:
    ///
    /// * `Result<RangeInsertion, RangeError>` - whether the interval was stored or already covered
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::chemistry::nuclide::NuclideHash;
    /// use apmcore::data::ion::{Ion, RangeInsertion};
    ///
    /// let mut ion = Ion::new(NuclideHash::default(), None);
    /// assert_eq!(ion.add_range(26.5, 27.5).unwrap(), RangeInsertion::Inserted);
    /// assert_eq!(ion.add_range(26.8, 27.2).unwrap(), RangeInsertion::AlreadyCovered);
    /// assert!(ion.add_range(27.0, 28.0).is_err());
    /// assert_eq!(ion.add_range(27.5, 28.0).unwrap(), RangeInsertion::Inserted);
    /// assert_eq!(ion.ranges().len(), 2);
    /// ```
    pub fn add_range(&mut self, min: f64, max: f64) -> Result<RangeInsertion, RangeError> {
        self.insert_range(MassToChargeRange::new(min, max)?)
    }

    pub(crate) fn insert_range(&mut self, range: MassToChargeRange) -> Result<RangeInsertion, RangeError> {
        if let Some(existing) = self.ranges.iter().find(|existing| existing.overlaps(&range)) {
            if existing.contains(&range) {
                return Ok(RangeInsertion::AlreadyCovered);
            }
            return Err(range.overlap_error(existing));
        }
        let position = self.ranges.partition_point(|existing| existing.min < range.min);
        self.ranges.insert(position, range);
        Ok(RangeInsertion::Inserted)
    }

    /// first stored interval overlapping `range`
    pub(crate) fn overlapping_range(&self, range: &MassToChargeRange) -> Option<&MassToChargeRange> {
        self.ranges.iter().find(|existing| existing.overlaps(range))
    }

    /// store a builder run and take the charge state of its top pick
    pub fn attach_charge_state_model(&mut self, model: ChargeStateModel) {
        match model.top_pick() {
            Some(top_pick) => {
                self.charge_state = top_pick.charge_state;
                self.status = IonStatus::Resolved;
            }
            None => {
                self.charge_state = 0;
                self.status = IonStatus::Unresolved;
            }
        }
        self.charge_state_model = Some(model);
        self.update_name();
    }

    pub fn mark_unresolved(&mut self) {
        self.charge_state = 0;
        self.status = IonStatus::Unresolved;
        self.update_name();
    }

    pub fn update_name(&mut self) {
        self.name = human_readable_name(&self.nuclide_hash, self.charge_state);
    }

    pub fn report(&self) -> IonReport {
        IonReport {
            label: self.label(),
            name: self.name.clone(),
            keyword: self.key(),
            charge_state: self.charge_state,
            ranges: self.ranges.clone(),
            comment: self.comment.clone(),
            color: self.color.clone(),
            volume: self.volume,
            status: self.status,
            candidates: self
                .charge_state_model
                .as_ref()
                .map(|model| model.candidates.len())
                .unwrap_or(0),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Summary of an ion for display and export
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IonReport {
    pub label: String,
    pub name: String,
    pub keyword: String,
    pub charge_state: i8,
    pub ranges: Vec<MassToChargeRange>,
    pub comment: String,
    pub color: String,
    pub volume: f64,
    pub status: IonStatus,
    pub candidates: usize,
}

impl fmt::Display for IonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label.is_empty() { "unlabeled" } else { self.label.as_str() };
        write!(
            f,
            "{} ({}, key {}): charge {}, {}, {} candidates, ranges {}",
            self.name,
            label,
            self.keyword,
            self.charge_state,
            self.status,
            self.candidates,
            self.ranges.iter().join(" ")
        )?;
        if !self.comment.is_empty() {
            write!(f, ", {}", self.comment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::molecular_ion::{BuilderConfig, MolecularIonBuilder};
    use crate::chemistry::nuclide::{element_hash, encode_composition};

    fn cr2o() -> Ion {
        let chromium = element_hash(24).unwrap();
        let oxygen = element_hash(8).unwrap();
        Ion::new(NuclideHash::from_hashes([chromium, chromium, oxygen]).unwrap(), None)
    }

    #[test]
    fn test_range_validation() {
        assert!(MassToChargeRange::new(f64::NAN, 1.0).is_err());
        assert!(MassToChargeRange::new(-1.0, 1.0).is_err());
        assert!(MassToChargeRange::new(1.0, 1.0).is_err());
        assert!(MassToChargeRange::new(1.0, 502.0).is_err());
        assert!(MassToChargeRange::new(1.0, 1.0004).is_err());
        assert!(MassToChargeRange::new(1.0, 501.0).is_ok());
    }

    #[test]
    fn test_containment_is_noop() {
        let mut ion = cr2o();
        assert_eq!(ion.add_range(57.819, 61.159).unwrap(), RangeInsertion::Inserted);
        assert_eq!(ion.add_range(57.819, 61.159).unwrap(), RangeInsertion::AlreadyCovered);
        assert_eq!(ion.add_range(58.0, 60.0).unwrap(), RangeInsertion::AlreadyCovered);
        assert_eq!(ion.ranges(), &[MassToChargeRange { min: 57.819, max: 61.159 }]);
    }

    #[test]
    fn test_overlap_rejected() {
        let mut ion = cr2o();
        ion.add_range(57.819, 61.159).unwrap();
        let error = ion.add_range(61.0, 62.0).unwrap_err();
        assert_eq!(
            error,
            RangeError::Overlapping { min: 61.0, max: 62.0, existing_min: 57.819, existing_max: 61.159 }
        );
        // a superset is not a subset
        assert!(ion.add_range(57.0, 62.0).is_err());
        assert_eq!(ion.ranges().len(), 1);
    }

    #[test]
    fn test_ranges_stay_sorted() {
        let mut ion = cr2o();
        ion.add_range(30.0, 31.0).unwrap();
        ion.add_range(10.0, 11.0).unwrap();
        ion.add_range(20.0, 21.0).unwrap();
        let lower: Vec<f64> = ion.ranges().iter().map(|range| range.min).collect();
        assert_eq!(lower, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_attach_model_sets_charge_and_name() {
        let mut ion = cr2o();
        ion.add_range(57.819, 61.159).unwrap();
        assert_eq!(ion.name, "O Cr Cr");
        assert_eq!(ion.status, IonStatus::Pending);

        let builder = MolecularIonBuilder::with_nist(BuilderConfig::practical()).unwrap();
        let model = builder.resolve(ion.nuclide_hash.as_slice(), 57.819, 61.159).unwrap();
        ion.attach_charge_state_model(model);
        assert_eq!(ion.charge_state, 2);
        assert_eq!(ion.status, IonStatus::Resolved);
        assert_eq!(ion.name, "O Cr Cr ++");
        // the key stays with the composition hint
        assert!(ion.key().ends_with("__0"));

        let strict = MolecularIonBuilder::with_nist(BuilderConfig::strict()).unwrap();
        ion.attach_charge_state_model(strict.resolve(ion.nuclide_hash.as_slice(), 57.819, 61.159).unwrap());
        assert_eq!(ion.charge_state, 0);
        assert_eq!(ion.status, IonStatus::Unresolved);
    }

    #[test]
    fn test_report_and_json() {
        let mut ion = Ion::new(encode_composition(&[(13, 14)]).unwrap(), Some(1));
        ion.add_range(26.9, 27.1).unwrap();
        ion.comment = "aluminium".to_string();
        let report = ion.report();
        assert_eq!(report.label, "27Al");
        assert_eq!(report.keyword, "3597__1");
        assert_eq!(report, ion.report());
        assert_eq!(
            report.to_string(),
            "27Al + (27Al, key 3597__1): charge 1, pending, 0 candidates, ranges [26.9000, 27.1000], aluminium"
        );

        let json = ion.to_json().unwrap();
        let restored: Ion = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.key(), ion.key());
        assert_eq!(restored.name, ion.name);
        assert_eq!(restored.ranges().len(), 1);
    }
}
