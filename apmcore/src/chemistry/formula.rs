use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chemistry::constants::{MAX_CHARGE_STATE, MAX_NUMBER_OF_ATOMS_PER_ION};
use crate::chemistry::elements::{chemical_symbol, proton_count};
use crate::chemistry::isotopes::{Isotope, IsotopeTable};
use crate::chemistry::nuclide::{element_hash, encode_nuclide, NuclideHash};
use crate::error::{LabelParseError, NuclideError};

static LABEL_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<symbol>[A-Z][a-z]?)|(?P<isotope>-\d+)|(?P<digits>\d+)|(?P<space>\s+)")
        .expect("label token pattern is valid")
});

/// One element or isotope of a composition hint together with its multiplicity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuclideHint {
    pub proton_count: u16,
    /// `None` when the label names the element without a specific isotope
    pub mass_number: Option<u16>,
    pub count: u32,
}

impl NuclideHint {
    pub fn element(proton_count: u16, count: u32) -> Self {
        NuclideHint { proton_count, mass_number: None, count }
    }

    pub fn isotope(proton_count: u16, mass_number: u16, count: u32) -> Self {
        NuclideHint { proton_count, mass_number: Some(mass_number), count }
    }

    /// per-atom hash, element-level when no mass number is given
    pub fn hash(&self, table: &IsotopeTable) -> Result<u32, NuclideError> {
        match self.mass_number {
            None => element_hash(self.proton_count),
            Some(mass_number) => {
                let isotope = table
                    .get_by_mass_number(self.proton_count, mass_number)
                    .ok_or(NuclideError::UnknownIsotope { proton_count: self.proton_count, mass_number })?;
                encode_nuclide(isotope.proton_count, isotope.neutron_count)
            }
        }
    }

    /// the named isotope, or the most abundant one when the label left it open
    pub fn default_isotope<'a>(&self, table: &'a IsotopeTable) -> Option<&'a Isotope> {
        match self.mass_number {
            Some(mass_number) => table.get_by_mass_number(self.proton_count, mass_number),
            None => table.most_abundant(self.proton_count),
        }
    }
}

/// encode composition hints into a nuclide hash, one hash value per atom
pub fn composition_hash(hints: &[NuclideHint], table: &IsotopeTable) -> Result<NuclideHash, NuclideError> {
    let atoms: u64 = hints.iter().map(|hint| u64::from(hint.count)).sum();
    if atoms > MAX_NUMBER_OF_ATOMS_PER_ION as u64 {
        return Err(NuclideError::CompositionTooLarge {
            atoms: usize::try_from(atoms).unwrap_or(usize::MAX),
            max: MAX_NUMBER_OF_ATOMS_PER_ION,
        });
    }
    let mut hashes = Vec::with_capacity(atoms as usize);
    for hint in hints {
        let hash = hint.hash(table)?;
        hashes.extend(std::iter::repeat(hash).take(hint.count as usize));
    }
    NuclideHash::from_hashes(hashes)
}

/// A parsed range-file ion label
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IonLabel {
    pub label: String,
    pub composition: Vec<NuclideHint>,
    /// charge encoded by trailing `+`/`-` marks, `None` without marks
    pub charge_state: Option<i8>,
}

#[derive(Debug)]
struct Group {
    proton_count: u16,
    mass_number: Option<u16>,
    leading: Option<u32>,
    trailing: Option<u32>,
}

impl IonLabel {
    /// parse a label such as `"2Fe16O3++"`, `"Cr Cr O ++"` or `"O-16 H2 -"`
    ///
    /// A group is `[digits] Symbol [-mass] [digits]`. A single digit directly behind a group
    /// without a count is the count of that group, so `"C2H2"` is two carbon and two hydrogen
    /// atoms. For other digits in front of a symbol the longest suffix that is a known mass
    /// number of that element becomes its isotope, the rest is the count of the preceding
    /// group (or of this group when it opens the label or follows whitespace). Digits behind
    /// the last symbol are its count. An empty label is an unlabeled ion.
    ///
    /// # Examples
    ///
    /// ```
    /// use apmcore::chemistry::formula::{IonLabel, NuclideHint};
    /// use apmcore::chemistry::isotopes::IsotopeTable;
    ///
    /// let label = IonLabel::parse("2Fe16O3++", IsotopeTable::nist()).unwrap();
    /// assert_eq!(label.composition, vec![NuclideHint::element(26, 2), NuclideHint::isotope(8, 16, 3)]);
    /// assert_eq!(label.charge_state, Some(2));
    /// ```
    pub fn parse(label: &str, table: &IsotopeTable) -> Result<Self, LabelParseError> {
        let trimmed = label.trim();
        let (body, charge_state) = split_charge_marks(label, trimmed)?;

        let mut groups: Vec<Group> = Vec::new();
        // digits waiting for the next token, flagged if they follow whitespace or open the label
        let mut pending: Option<(&str, bool)> = None;
        let mut after_space = true;
        let mut after_symbol = false;
        let mut position = 0;

        for captures in LABEL_TOKEN.captures_iter(body) {
            let token = captures.get(0).map(|m| (m.start(), m.end())).unwrap_or((position, position));
            if token.0 != position {
                return Err(LabelParseError::new(
                    label,
                    format!("unexpected character {:?}", &body[position..token.0]),
                ));
            }
            position = token.1;

            if let Some(symbol) = captures.name("symbol") {
                let symbol = symbol.as_str();
                let proton_count = proton_count(symbol)
                    .ok_or_else(|| LabelParseError::new(label, format!("unknown element {:?}", symbol)))?;
                let mut group = Group { proton_count, mass_number: None, leading: None, trailing: None };
                if let Some((digits, opens)) = pending.take() {
                    if counts_previous_group(digits, opens, &groups) {
                        trailing_count(label, &mut groups, digits, opens)?;
                    } else {
                        let (prefix, mass_number) = split_mass_number(digits, proton_count, table);
                        group.mass_number = mass_number;
                        if !prefix.is_empty() {
                            let count = parse_count(label, prefix)?;
                            match groups.last_mut() {
                                Some(previous) if !opens => set_trailing(label, previous, count)?,
                                _ => group.leading = Some(count),
                            }
                        }
                    }
                }
                groups.push(group);
                after_space = false;
                after_symbol = true;
            } else if let Some(isotope) = captures.name("isotope") {
                let group = match groups.last_mut() {
                    Some(group) if after_symbol && group.mass_number.is_none() => group,
                    _ => return Err(LabelParseError::new(label, format!("misplaced mass number {:?}", isotope.as_str()))),
                };
                let mass_number = isotope.as_str()[1..]
                    .parse::<u16>()
                    .map_err(|_| LabelParseError::new(label, format!("invalid mass number {:?}", isotope.as_str())))?;
                if !table.has_mass_number(group.proton_count, mass_number) {
                    return Err(LabelParseError::new(
                        label,
                        format!(
                            "no isotope {}-{} known",
                            chemical_symbol(group.proton_count).unwrap_or("X"),
                            mass_number
                        ),
                    ));
                }
                group.mass_number = Some(mass_number);
                after_symbol = false;
            } else if let Some(digits) = captures.name("digits") {
                pending = Some((digits.as_str(), after_space || groups.is_empty()));
                after_symbol = false;
            } else {
                if let Some((digits, opens)) = pending.take() {
                    trailing_count(label, &mut groups, digits, opens)?;
                }
                after_space = true;
                after_symbol = false;
            }
        }
        if position != body.len() {
            return Err(LabelParseError::new(
                label,
                format!("unexpected character {:?}", &body[position..]),
            ));
        }
        if let Some((digits, opens)) = pending.take() {
            trailing_count(label, &mut groups, digits, opens)?;
        }
        if groups.is_empty() && charge_state.is_some() {
            return Err(LabelParseError::new(label, "charge marks without composition"));
        }

        let mut composition: Vec<NuclideHint> = Vec::new();
        for group in groups {
            let count = group.leading.or(group.trailing).unwrap_or(1);
            match composition
                .iter_mut()
                .find(|hint| hint.proton_count == group.proton_count && hint.mass_number == group.mass_number)
            {
                Some(hint) => {
                    hint.count = hint
                        .count
                        .checked_add(count)
                        .ok_or_else(|| LabelParseError::new(label, "atom count overflow"))?
                }
                None => composition.push(NuclideHint {
                    proton_count: group.proton_count,
                    mass_number: group.mass_number,
                    count,
                }),
            }
        }

        Ok(IonLabel { label: trimmed.to_string(), composition, charge_state })
    }

    pub fn is_unlabeled(&self) -> bool {
        self.composition.is_empty()
    }

    pub fn atom_count(&self) -> u64 {
        self.composition.iter().map(|hint| u64::from(hint.count)).sum()
    }

    pub fn nuclide_hash(&self, table: &IsotopeTable) -> Result<NuclideHash, NuclideError> {
        composition_hash(&self.composition, table)
    }
}

fn split_charge_marks<'a>(label: &str, trimmed: &'a str) -> Result<(&'a str, Option<i8>), LabelParseError> {
    let mark = match trimmed.chars().last() {
        Some(c @ ('+' | '-')) => c,
        _ => return Ok((trimmed, None)),
    };
    let body = trimmed.trim_end_matches(mark);
    let marks = trimmed.len() - body.len();
    if body.ends_with(['+', '-']) {
        return Err(LabelParseError::new(label, "mixed charge marks"));
    }
    if marks > MAX_CHARGE_STATE as usize {
        return Err(LabelParseError::new(
            label,
            format!("{} charge marks exceed the maximum charge state {}", marks, MAX_CHARGE_STATE),
        ));
    }
    let magnitude = marks as i8;
    let charge_state = if mark == '+' { magnitude } else { -magnitude };
    Ok((body.trim_end(), Some(charge_state)))
}

// a lone digit right behind an uncounted group counts that group, "C2H2" is no deuteride
fn counts_previous_group(digits: &str, opens: bool, groups: &[Group]) -> bool {
    !opens
        && digits.len() == 1
        && groups
            .last()
            .is_some_and(|previous| previous.leading.is_none() && previous.trailing.is_none())
}

fn split_mass_number<'a>(digits: &'a str, proton_count: u16, table: &IsotopeTable) -> (&'a str, Option<u16>) {
    (0..digits.len())
        .filter(|&start| !digits[start..].starts_with('0'))
        .find_map(|start| {
            digits[start..]
                .parse::<u16>()
                .ok()
                .filter(|&mass_number| table.has_mass_number(proton_count, mass_number))
                .map(|mass_number| (&digits[..start], Some(mass_number)))
        })
        .unwrap_or((digits, None))
}

fn parse_count(label: &str, digits: &str) -> Result<u32, LabelParseError> {
    match digits.parse::<u32>() {
        Ok(0) => Err(LabelParseError::new(label, "zero atom count")),
        Ok(count) => Ok(count),
        Err(_) => Err(LabelParseError::new(label, format!("invalid atom count {:?}", digits))),
    }
}

fn set_trailing(label: &str, group: &mut Group, count: u32) -> Result<(), LabelParseError> {
    if group.leading.is_some() || group.trailing.is_some() {
        return Err(LabelParseError::new(label, "atom count given twice for one element"));
    }
    group.trailing = Some(count);
    Ok(())
}

fn trailing_count(label: &str, groups: &mut [Group], digits: &str, opens: bool) -> Result<(), LabelParseError> {
    let count = parse_count(label, digits)?;
    match groups.last_mut() {
        Some(group) if !opens => set_trailing(label, group, count),
        _ => Err(LabelParseError::new(label, format!("dangling number {:?}", digits))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(label: &str) -> Result<IonLabel, LabelParseError> {
        IonLabel::parse(label, IsotopeTable::nist())
    }

    #[test]
    fn test_grammar_example() {
        let label = parse("2Fe16O3++").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(26, 2), NuclideHint::isotope(8, 16, 3)]);
        assert_eq!(label.charge_state, Some(2));
        let fe = label.composition[0].default_isotope(IsotopeTable::nist()).unwrap();
        assert_eq!(fe.mass_number(), 56);
    }

    #[test]
    fn test_plain_sum_formulas() {
        let label = parse("Fe2O3").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(26, 2), NuclideHint::element(8, 3)]);
        assert_eq!(label.charge_state, None);

        let label = parse("H2O+").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(1, 2), NuclideHint::element(8, 1)]);
        assert_eq!(label.charge_state, Some(1));

        assert_eq!(parse("Co").unwrap().composition, vec![NuclideHint::element(27, 1)]);
        assert_eq!(
            parse("CO").unwrap().composition,
            vec![NuclideHint::element(6, 1), NuclideHint::element(8, 1)]
        );
    }

    #[test]
    fn test_digits_between_symbols() {
        // 216 splits into a count for Fe and the O-16 mass number
        let label = parse("Fe216O3").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(26, 2), NuclideHint::isotope(8, 16, 3)]);
        // 12 is no oxygen mass number, so all of it counts carbon atoms
        let label = parse("C12O").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(6, 12), NuclideHint::element(8, 1)]);
        let label = parse("12C2").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::isotope(6, 12, 2)]);
    }

    #[test]
    fn test_single_digit_counts_previous_atom() {
        let label = parse("C2H2").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(6, 2), NuclideHint::element(1, 2)]);
        let label = parse("Ti2H").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(22, 2), NuclideHint::element(1, 1)]);
        let label = parse("2Fe16O3++").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(26, 2), NuclideHint::isotope(8, 16, 3)]);
        // after whitespace or behind a counted group the digit is a mass number
        let label = parse("Ti 2H").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(22, 1), NuclideHint::isotope(1, 2, 1)]);
        let label = parse("2Ti2H").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(22, 2), NuclideHint::isotope(1, 2, 1)]);
    }

    #[test]
    fn test_spaced_and_hyphenated_forms() {
        let label = parse("Cr Cr O ++").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(24, 2), NuclideHint::element(8, 1)]);
        assert_eq!(label.charge_state, Some(2));

        let label = parse("O-16 H2 -").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::isotope(8, 16, 1), NuclideHint::element(1, 2)]);
        assert_eq!(label.charge_state, Some(-1));

        let label = parse("Fe 2O").unwrap();
        assert_eq!(label.composition, vec![NuclideHint::element(26, 1), NuclideHint::element(8, 2)]);
    }

    #[test]
    fn test_unlabeled() {
        let label = parse("   ").unwrap();
        assert!(label.is_unlabeled());
        assert_eq!(label.charge_state, None);
        assert!(label.nuclide_hash(IsotopeTable::nist()).unwrap().is_empty());
    }

    #[test]
    fn test_rejections() {
        for bad in ["Xy", "Fe$", "++", "Fe+-", "Fe0", "2Fe3", "O-99", "Fe++++++++", "Fe 3", "Name:AlO", "-16O"] {
            assert!(parse(bad).is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_composition_hash() {
        let table = IsotopeTable::nist();
        let label = parse("2Fe16O3").unwrap();
        let hash = label.nuclide_hash(table).unwrap();
        assert_eq!(hash.len(), 5);
        assert_eq!(label.atom_count(), 5);

        let too_large = composition_hash(&[NuclideHint::element(8, 33)], table);
        assert!(matches!(too_large, Err(NuclideError::CompositionTooLarge { atoms: 33, .. })));
    }
}
