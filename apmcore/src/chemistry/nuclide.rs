//! Nuclide hash codec.
//!
//! A nuclide (proton count, neutron count) is packed into one integer with the
//! proton count in the low [`PROTON_BITS`] bits and the neutron count above them,
//! i.e. `hash = protons + 256 * neutrons`. A composition is the ascending sorted
//! sequence of its per-atom hashes, so two compositions are equal iff their
//! hash vectors are equal element-wise.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::chemistry::constants::{
    MAX_CHARGE_STATE, MAX_NEUTRON_COUNT, MAX_NUCLIDE_HASH, MAX_NUMBER_OF_ATOMS_PER_ION, MAX_PROTON_COUNT,
    NEUTRON_COUNT_FOR_ELEMENT, PROTON_BITS,
};
use crate::chemistry::elements::chemical_symbol;
use crate::error::NuclideError;

pub(crate) fn pack_nuclide(proton_count: u16, neutron_count: u16) -> u32 {
    u32::from(proton_count) | (u32::from(neutron_count) << PROTON_BITS)
}

/// encode a nuclide into its hash value
///
/// Arguments:
///
/// * `proton_count` - number of protons, at most 255
/// * `neutron_count` - number of neutrons, at most 511 (511 marks an element-level nuclide)
///
/// Returns:
///
/// * `Result<u32, NuclideError>` - hash value
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::nuclide::encode_nuclide;
///
/// assert_eq!(encode_nuclide(1, 1).unwrap(), 257);
/// assert_eq!(encode_nuclide(43, 56).unwrap(), 14379);
/// assert!(encode_nuclide(256, 0).is_err());
/// ```
pub fn encode_nuclide(proton_count: u16, neutron_count: u16) -> Result<u32, NuclideError> {
    if proton_count > MAX_PROTON_COUNT || neutron_count > MAX_NEUTRON_COUNT {
        return Err(NuclideError::OutOfRange { proton_count, neutron_count });
    }
    Ok(pack_nuclide(proton_count, neutron_count))
}

/// decode a hash value into (proton count, neutron count)
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::nuclide::decode_nuclide;
///
/// assert_eq!(decode_nuclide(65281).unwrap(), (1, 255));
/// assert!(decode_nuclide(1 << 17).is_err());
/// ```
pub fn decode_nuclide(hash: u32) -> Result<(u16, u16), NuclideError> {
    if hash > MAX_NUCLIDE_HASH {
        return Err(NuclideError::InvalidHash(hash));
    }
    let proton_count = (hash & u32::from(MAX_PROTON_COUNT)) as u16;
    let neutron_count = (hash >> PROTON_BITS) as u16;
    Ok((proton_count, neutron_count))
}

/// hash of an element irrespective of its isotope
pub fn element_hash(proton_count: u16) -> Result<u32, NuclideError> {
    encode_nuclide(proton_count, NEUTRON_COUNT_FOR_ELEMENT)
}

/// true if the hash names an element rather than a specific isotope
pub fn is_element_level(hash: u32) -> bool {
    hash <= MAX_NUCLIDE_HASH && (hash >> PROTON_BITS) as u16 == NEUTRON_COUNT_FOR_ELEMENT
}

/// Canonical, order independent identity of an ion's atomic composition
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NuclideHash(Vec<u32>);

impl NuclideHash {
    /// build from raw per-atom hashes, validating every value and the atom count
    pub fn from_hashes(hashes: impl IntoIterator<Item = u32>) -> Result<Self, NuclideError> {
        let mut values = Vec::new();
        for hash in hashes {
            decode_nuclide(hash)?;
            values.push(hash);
        }
        if values.len() > MAX_NUMBER_OF_ATOMS_PER_ION {
            return Err(NuclideError::CompositionTooLarge {
                atoms: values.len(),
                max: MAX_NUMBER_OF_ATOMS_PER_ION,
            });
        }
        values.sort_unstable();
        Ok(NuclideHash(values))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// decoded (proton count, neutron count) per atom, in hash order
    pub fn nuclides(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.0.iter().map(|&hash| unpack(hash))
    }

    /// stable mapping key, hash values joined by `_`, `"0"` for the empty composition
    ///
    /// Keys of specific isotopes match the legacy 16-bit exports. Element-level atoms differ:
    /// they carry neutron count 511 here, while legacy exports wrote them as neutron count 0,
    /// so iron without isotope is `"130842"` and not `"26"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::chemistry::nuclide::{element_hash, encode_composition, NuclideHash};
    ///
    /// let hash = encode_composition(&[(8, 8), (1, 0)]).unwrap();
    /// assert_eq!(hash.dict_keyword(), "1_2056");
    /// assert_eq!(NuclideHash::default().dict_keyword(), "0");
    /// let iron = NuclideHash::from_hashes([element_hash(26).unwrap()]).unwrap();
    /// assert_eq!(iron.dict_keyword(), "130842");
    /// ```
    pub fn dict_keyword(&self) -> String {
        if self.0.is_empty() {
            return "0".to_string();
        }
        self.0.iter().join("_")
    }

    /// key of one (composition, charge state) ion species, e.g. `"1_1_2056__1"`
    pub fn unique_keyword(&self, charge_state: i8) -> String {
        format!("{}__{}", self.dict_keyword(), charge_state)
    }
}

impl fmt::Display for NuclideHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", composition_to_label(self))
    }
}

// values inside a NuclideHash are validated on construction
fn unpack(hash: u32) -> (u16, u16) {
    ((hash & u32::from(MAX_PROTON_COUNT)) as u16, (hash >> PROTON_BITS) as u16)
}

/// encode a composition into its canonical nuclide hash
///
/// Arguments:
///
/// * `nuclides` - (proton count, neutron count) per atom, in any order
///
/// Returns:
///
/// * `Result<NuclideHash, NuclideError>` - ascending sorted per-atom hashes
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::nuclide::encode_composition;
///
/// let a = encode_composition(&[(26, 30), (8, 8)]).unwrap();
/// let b = encode_composition(&[(8, 8), (26, 30)]).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn encode_composition(nuclides: &[(u16, u16)]) -> Result<NuclideHash, NuclideError> {
    if nuclides.len() > MAX_NUMBER_OF_ATOMS_PER_ION {
        return Err(NuclideError::CompositionTooLarge {
            atoms: nuclides.len(),
            max: MAX_NUMBER_OF_ATOMS_PER_ION,
        });
    }
    let hashes = nuclides
        .iter()
        .map(|&(proton_count, neutron_count)| encode_nuclide(proton_count, neutron_count))
        .collect::<Result<Vec<_>, _>>()?;
    NuclideHash::from_hashes(hashes)
}

fn nuclide_name(proton_count: u16, neutron_count: u16) -> String {
    let symbol = chemical_symbol(proton_count).unwrap_or("X");
    if neutron_count == NEUTRON_COUNT_FOR_ELEMENT {
        symbol.to_string()
    } else {
        format!("{}{}", proton_count + neutron_count, symbol)
    }
}

/// human-readable sum formula of a composition
///
/// Identical nuclides are grouped and counts above one appended. Groups are
/// ordered by ascending proton count, then neutron count; specific isotopes
/// carry their mass number as prefix, element-level atoms the bare symbol.
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::nuclide::{composition_to_label, element_hash, encode_nuclide, NuclideHash};
///
/// let fe = element_hash(26).unwrap();
/// let o16 = encode_nuclide(8, 8).unwrap();
/// let hash = NuclideHash::from_hashes([fe, o16, fe, o16, o16]).unwrap();
/// assert_eq!(composition_to_label(&hash), "16O3Fe2");
/// ```
pub fn composition_to_label(hash: &NuclideHash) -> String {
    hash.nuclides()
        .sorted()
        .dedup_with_count()
        .map(|(count, (proton_count, neutron_count))| {
            let name = nuclide_name(proton_count, neutron_count);
            if count > 1 {
                format!("{}{}", name, count)
            } else {
                name
            }
        })
        .collect()
}

/// space separated per-atom name with trailing charge marks, e.g. `"O Cr Cr ++"`
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::nuclide::{element_hash, human_readable_name, NuclideHash};
///
/// let cr = element_hash(24).unwrap();
/// let o = element_hash(8).unwrap();
/// let hash = NuclideHash::from_hashes([cr, cr, o]).unwrap();
/// assert_eq!(human_readable_name(&hash, 2), "O Cr Cr ++");
/// assert_eq!(human_readable_name(&hash, 0), "O Cr Cr");
/// assert_eq!(human_readable_name(&NuclideHash::default(), 1), "unknown_iontype");
/// ```
pub fn human_readable_name(hash: &NuclideHash, charge_state: i8) -> String {
    if hash.is_empty() || !(-MAX_CHARGE_STATE..=MAX_CHARGE_STATE).contains(&charge_state) {
        return "unknown_iontype".to_string();
    }
    let atoms = hash
        .nuclides()
        .sorted()
        .map(|(proton_count, neutron_count)| nuclide_name(proton_count, neutron_count))
        .join(" ");
    match charge_state {
        0 => atoms,
        c if c > 0 => format!("{} {}", atoms, "+".repeat(c as usize)),
        c => format!("{} {}", atoms, "-".repeat(c.unsigned_abs() as usize)),
    }
}

/// (mass number, proton count) per atom for NXion nuclide lists, mass number 0 for element-level atoms
pub fn nuclide_list(hash: &NuclideHash) -> Vec<[u16; 2]> {
    hash.nuclides()
        .map(|(proton_count, neutron_count)| {
            if neutron_count == NEUTRON_COUNT_FOR_ELEMENT {
                [0, proton_count]
            } else {
                [proton_count + neutron_count, proton_count]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::isotopes::IsotopeTable;
    use proptest::prelude::*;

    #[test]
    fn test_legacy_hash_values() {
        assert_eq!(encode_nuclide(0, 0).unwrap(), 0);
        assert_eq!(encode_nuclide(1, 255).unwrap(), 65281);
        assert_eq!(encode_nuclide(1, 0).unwrap(), 1);
        assert_eq!(encode_nuclide(1, 2).unwrap(), 513);
        assert_eq!(decode_nuclide(14379).unwrap(), (43, 56));
    }

    #[test]
    fn test_round_trip_every_table_isotope() {
        for isotope in IsotopeTable::nist().iter() {
            let hash = encode_nuclide(isotope.proton_count, isotope.neutron_count).unwrap();
            assert_eq!(decode_nuclide(hash).unwrap(), (isotope.proton_count, isotope.neutron_count));
            assert_eq!(hash, isotope.hash());
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            encode_nuclide(1, 512),
            Err(NuclideError::OutOfRange { proton_count: 1, neutron_count: 512 })
        );
        assert_eq!(decode_nuclide(MAX_NUCLIDE_HASH + 1), Err(NuclideError::InvalidHash(MAX_NUCLIDE_HASH + 1)));
    }

    #[test]
    fn test_element_level() {
        let fe = element_hash(26).unwrap();
        assert!(is_element_level(fe));
        assert!(!is_element_level(encode_nuclide(26, 30).unwrap()));
        assert_eq!(decode_nuclide(fe).unwrap(), (26, NEUTRON_COUNT_FOR_ELEMENT));
    }

    #[test]
    fn test_element_level_keywords() {
        let iron = element_hash(26).unwrap();
        let hash = NuclideHash::from_hashes([iron, encode_nuclide(8, 8).unwrap()]).unwrap();
        assert_eq!(hash.dict_keyword(), "2056_130842");
        assert_eq!(hash.unique_keyword(2), "2056_130842__2");
        // the legacy element-level form (26, 0) is a different nuclide
        assert_ne!(iron, encode_nuclide(26, 0).unwrap());
    }

    #[test]
    fn test_composition_too_large() {
        let atoms = vec![(8, 8); MAX_NUMBER_OF_ATOMS_PER_ION + 1];
        assert!(matches!(
            encode_composition(&atoms),
            Err(NuclideError::CompositionTooLarge { atoms: 33, max: 32 })
        ));
        assert!(encode_composition(&atoms[1..]).is_ok());
    }

    #[test]
    fn test_labels() {
        let fe = element_hash(26).unwrap();
        let o = element_hash(8).unwrap();
        let hash = NuclideHash::from_hashes([fe, fe, o, o, o, o, o]).unwrap();
        assert_eq!(composition_to_label(&hash), "O5Fe2");
        assert_eq!(hash.to_string(), "O5Fe2");

        let d2o = encode_composition(&[(1, 1), (1, 1), (8, 8)]).unwrap();
        assert_eq!(composition_to_label(&d2o), "2H216O");
        assert_eq!(nuclide_list(&d2o), vec![[2, 1], [2, 1], [16, 8]]);
        assert_eq!(human_readable_name(&d2o, -1), "2H 2H 16O -");
    }

    proptest! {
        #[test]
        fn prop_round_trip(p in 0u16..=MAX_PROTON_COUNT, n in 0u16..=MAX_NEUTRON_COUNT) {
            let hash = encode_nuclide(p, n).unwrap();
            prop_assert_eq!(decode_nuclide(hash).unwrap(), (p, n));
        }

        #[test]
        fn prop_order_independence(mut atoms in prop::collection::vec((1u16..119, 0u16..300), 1..MAX_NUMBER_OF_ATOMS_PER_ION)) {
            let forward = encode_composition(&atoms).unwrap();
            atoms.reverse();
            let backward = encode_composition(&atoms).unwrap();
            prop_assert_eq!(&forward, &backward);
            prop_assert!(forward.as_slice().windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
