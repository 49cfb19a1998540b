use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Chemical symbols indexed by proton count, index 0 is the placeholder `X`
pub const CHEMICAL_SYMBOLS: [&str; 119] = [
    "X",
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra",
    "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

static SYMBOL_TO_PROTON_COUNT: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    CHEMICAL_SYMBOLS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(proton_count, symbol)| (*symbol, proton_count as u16))
        .collect()
});

/// get the proton count of an element symbol
///
/// Arguments:
///
/// * `symbol` - chemical symbol, case sensitive
///
/// Returns:
///
/// * `Option<u16>` - proton count, `None` for unknown symbols and the placeholder `X`
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::elements::proton_count;
///
/// assert_eq!(proton_count("Fe"), Some(26));
/// assert_eq!(proton_count("X"), None);
/// assert_eq!(proton_count("Xy"), None);
/// ```
pub fn proton_count(symbol: &str) -> Option<u16> {
    SYMBOL_TO_PROTON_COUNT.get(symbol).copied()
}

/// get the chemical symbol for a proton count
///
/// # Examples
///
/// ```
/// use apmcore::chemistry::elements::chemical_symbol;
///
/// assert_eq!(chemical_symbol(8), Some("O"));
/// assert_eq!(chemical_symbol(0), None);
/// ```
pub fn chemical_symbol(proton_count: u16) -> Option<&'static str> {
    match proton_count {
        0 => None,
        p => CHEMICAL_SYMBOLS.get(p as usize).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup_is_inverse() {
        for (p, symbol) in CHEMICAL_SYMBOLS.iter().enumerate().skip(1) {
            assert_eq!(proton_count(symbol), Some(p as u16));
            assert_eq!(chemical_symbol(p as u16), Some(*symbol));
        }
    }

    #[test]
    fn test_symbol_lookup_is_case_sensitive() {
        assert_eq!(proton_count("CO"), None);
        assert_eq!(proton_count("Co"), Some(27));
        assert_eq!(chemical_symbol(119), None);
    }
}
