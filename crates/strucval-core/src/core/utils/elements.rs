use phf::{Set, phf_set};

static ELEMENT_SYMBOLS: Set<&'static str> = phf_set! {
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
    "D", "LP", "X",
};

/// Returns true if `symbol` is a conventionally capitalised element symbol.
///
/// Deuterium ("D"), lone pairs ("LP") and dummy atoms ("X") are accepted as well, since
/// modelling tools routinely emit them.
pub fn is_known_element(symbol: &str) -> bool {
    ELEMENT_SYMBOLS.contains(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_elements() {
        for symbol in ["H", "C", "N", "O", "S", "Cl", "Fe", "Zn", "Og"] {
            assert!(is_known_element(symbol), "{symbol} should be known");
        }
    }

    #[test]
    fn is_case_sensitive() {
        assert!(!is_known_element("CL"));
        assert!(!is_known_element("fe"));
    }

    #[test]
    fn rejects_unknown_symbols() {
        assert!(!is_known_element(""));
        assert!(!is_known_element("Xx"));
        assert!(!is_known_element("CA "));
    }
}
