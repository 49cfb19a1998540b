use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chemistry::constants::OBSERVATIONALLY_STABLE_HALF_LIFE;
use crate::chemistry::isotope_data::{HALF_LIVES, ISOTOPES};
use crate::chemistry::nuclide::pack_nuclide;

static NIST_ISOTOPE_TABLE: Lazy<IsotopeTable> = Lazy::new(|| {
    IsotopeTable::new(ISOTOPES.iter().map(|&(proton_count, mass_number, atomic_mass, natural_abundance)| {
        let half_life = HALF_LIVES
            .iter()
            .find(|&&(p, a, _)| p == proton_count && a == mass_number)
            .map(|&(_, _, seconds)| seconds)
            .filter(|&seconds| seconds <= OBSERVATIONALLY_STABLE_HALF_LIFE)
            .unwrap_or(f64::INFINITY);
        Isotope {
            proton_count,
            neutron_count: mass_number - proton_count,
            atomic_mass,
            natural_abundance,
            half_life,
        }
    }))
});

/// A single nuclide with its reference data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Isotope {
    pub proton_count: u16,
    pub neutron_count: u16,
    /// relative atomic mass in Da
    pub atomic_mass: f64,
    /// natural abundance fraction in [0, 1]
    pub natural_abundance: f64,
    /// half-life in seconds, infinite for stable isotopes
    pub half_life: f64,
}

impl Isotope {
    pub fn mass_number(&self) -> u16 {
        self.proton_count + self.neutron_count
    }

    pub fn is_stable(&self) -> bool {
        self.half_life.is_infinite()
    }

    /// nuclide hash of this isotope, table entries always lie inside the encoding space
    pub fn hash(&self) -> u32 {
        pack_nuclide(self.proton_count, self.neutron_count)
    }
}

/// Read-only isotope reference table keyed by (proton count, neutron count)
///
/// Isotopes of an element are kept sorted by ascending neutron count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IsotopeTable {
    by_element: BTreeMap<u16, Vec<Isotope>>,
}

impl IsotopeTable {
    pub fn new(isotopes: impl IntoIterator<Item = Isotope>) -> Self {
        let mut by_element: BTreeMap<u16, Vec<Isotope>> = BTreeMap::new();
        for isotope in isotopes {
            by_element.entry(isotope.proton_count).or_default().push(isotope);
        }
        for isotopes in by_element.values_mut() {
            isotopes.sort_by_key(|isotope| isotope.neutron_count);
            isotopes.dedup_by_key(|isotope| isotope.neutron_count);
        }
        IsotopeTable { by_element }
    }

    /// process-wide table built from NIST isotopic compositions on first use
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::chemistry::isotopes::IsotopeTable;
    ///
    /// let table = IsotopeTable::nist();
    /// let fe56 = table.get(26, 30).unwrap();
    /// assert_eq!(fe56.mass_number(), 56);
    /// assert!(fe56.is_stable());
    /// ```
    pub fn nist() -> &'static IsotopeTable {
        &NIST_ISOTOPE_TABLE
    }

    pub fn get(&self, proton_count: u16, neutron_count: u16) -> Option<&Isotope> {
        self.isotopes_of(proton_count)
            .iter()
            .find(|isotope| isotope.neutron_count == neutron_count)
    }

    pub fn get_by_mass_number(&self, proton_count: u16, mass_number: u16) -> Option<&Isotope> {
        mass_number
            .checked_sub(proton_count)
            .and_then(|neutron_count| self.get(proton_count, neutron_count))
    }

    pub fn has_mass_number(&self, proton_count: u16, mass_number: u16) -> bool {
        self.get_by_mass_number(proton_count, mass_number).is_some()
    }

    /// all known isotopes of an element, empty for elements without table entries
    pub fn isotopes_of(&self, proton_count: u16) -> &[Isotope] {
        self.by_element
            .get(&proton_count)
            .map(|isotopes| isotopes.as_slice())
            .unwrap_or(&[])
    }

    /// isotope with the highest natural abundance, the lighter one on ties
    pub fn most_abundant(&self, proton_count: u16) -> Option<&Isotope> {
        self.isotopes_of(proton_count)
            .iter()
            .rev()
            .max_by(|a, b| a.natural_abundance.total_cmp(&b.natural_abundance))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Isotope> {
        self.by_element.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_element.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nist_table_abundances_sum_to_one() {
        let table = IsotopeTable::nist();
        for (&proton_count, isotopes) in &table.by_element {
            let total: f64 = isotopes.iter().map(|isotope| isotope.natural_abundance).sum();
            assert!(
                total == 0.0 || (total - 1.0).abs() < 2e-3,
                "abundances of element {} sum to {}",
                proton_count,
                total
            );
        }
    }

    #[test]
    fn test_nist_table_half_lives() {
        let table = IsotopeTable::nist();
        assert!(table.get_by_mass_number(26, 54).unwrap().is_stable());
        assert!(!table.get_by_mass_number(19, 40).unwrap().is_stable());
        assert!(table.isotopes_of(43).iter().all(|isotope| !isotope.is_stable()));
        assert!(table.isotopes_of(118).is_empty());
    }

    #[test]
    fn test_observationally_stable_nuclides() {
        let table = IsotopeTable::nist();
        for (proton_count, mass_number) in [(83, 209), (52, 130), (49, 115), (20, 48), (32, 76), (42, 100), (54, 136)] {
            assert!(table.get_by_mass_number(proton_count, mass_number).unwrap().is_stable());
        }
        for (proton_count, mass_number) in [(19, 40), (37, 87), (75, 187), (90, 232), (92, 238)] {
            assert!(!table.get_by_mass_number(proton_count, mass_number).unwrap().is_stable());
        }
    }

    #[test]
    fn test_most_abundant() {
        let table = IsotopeTable::nist();
        assert_eq!(table.most_abundant(26).unwrap().mass_number(), 56);
        assert_eq!(table.most_abundant(8).unwrap().mass_number(), 16);
        assert_eq!(table.most_abundant(1).unwrap().mass_number(), 1);
        assert!(table.most_abundant(118).is_none());
    }

    #[test]
    fn test_isotopes_sorted_by_neutron_count() {
        let table = IsotopeTable::nist();
        let iron: Vec<u16> = table.isotopes_of(26).iter().map(Isotope::mass_number).collect();
        assert_eq!(iron, vec![54, 56, 57, 58]);
    }

    #[test]
    fn test_custom_table() {
        let table = IsotopeTable::new(vec![
            Isotope { proton_count: 1, neutron_count: 1, atomic_mass: 2.014, natural_abundance: 0.5, half_life: f64::INFINITY },
            Isotope { proton_count: 1, neutron_count: 0, atomic_mass: 1.008, natural_abundance: 0.5, half_life: f64::INFINITY },
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.isotopes_of(1)[0].neutron_count, 0);
        // ties resolve to the lighter isotope
        assert_eq!(table.most_abundant(1).unwrap().neutron_count, 0);
    }
}
