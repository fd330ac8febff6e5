//! Per-element data, indexed by atomic number.

/// Data for a single element
#[derive(Debug, Clone, Copy)]
pub struct Element {
    /// Symbol as it's written in a bracket atom
    pub sym: &'static str,
    /// Average atomic mass, in daltons
    pub mass: f32,
    /// Allowed valences for implicit hydrogen assignment, lowest first.
    /// Only the SMILES organic subset has any.
    pub valences: &'static [u8],
}
impl Element {
    pub const fn new(sym: &'static str, mass: f32, valences: &'static [u8]) -> Self {
        Self {
            sym,
            mass,
            valences,
        }
    }
}

/// Look up an element by its symbol, case-sensitively.
pub fn element_by_symbol(sym: &[u8]) -> Option<u8> {
    ELEMENTS
        .iter()
        .skip(1)
        .position(|e| e.sym.as_bytes() == sym)
        .map(|i| (i + 1) as u8)
}

/// All of the elements, index the array by the atomic number. Index 0 is the wildcard atom.
pub static ELEMENTS: &[Element] = &[
    Element::new("*",  0.0000,  &[]),
    Element::new("H",  1.0078,  &[]),
    Element::new("He", 4.0026,  &[]),
    Element::new("Li", 6.9410,  &[]),
    Element::new("Be", 9.0122,  &[]),
    Element::new("B",  10.811,  &[3]),
    Element::new("C",  12.011,  &[4]),
    Element::new("N",  14.007,  &[3, 5]),
    Element::new("O",  15.999,  &[2]),
    Element::new("F",  18.998,  &[1]),
    Element::new("Ne", 20.180,  &[]),
    Element::new("Na", 22.990,  &[]),
    Element::new("Mg", 24.305,  &[]),
    Element::new("Al", 26.982,  &[]),
    Element::new("Si", 28.086,  &[]),
    Element::new("P",  30.974,  &[3, 5]),
    Element::new("S",  32.065,  &[2, 4, 6]),
    Element::new("Cl", 35.453,  &[1]),
    Element::new("Ar", 39.948,  &[]),
    Element::new("K",  39.098,  &[]),
    Element::new("Ca", 40.078,  &[]),
    Element::new("Sc", 44.956,  &[]),
    Element::new("Ti", 47.867,  &[]),
    Element::new("V",  50.942,  &[]),
    Element::new("Cr", 51.996,  &[]),
    Element::new("Mn", 54.938,  &[]),
    Element::new("Fe", 55.845,  &[]),
    Element::new("Co", 58.933,  &[]),
    Element::new("Ni", 58.693,  &[]),
    Element::new("Cu", 63.546,  &[]),
    Element::new("Zn", 65.380,  &[]),
    Element::new("Ga", 69.723,  &[]),
    Element::new("Ge", 72.640,  &[]),
    Element::new("As", 74.992,  &[]),
    Element::new("Se", 78.960,  &[]),
    Element::new("Br", 79.904,  &[1]),
    Element::new("Kr", 83.798,  &[]),
    Element::new("Rb", 85.468,  &[]),
    Element::new("Sr", 87.620,  &[]),
    Element::new("Y",  88.906,  &[]),
    Element::new("Zr", 91.224,  &[]),
    Element::new("Nb", 92.906,  &[]),
    Element::new("Mo", 95.950,  &[]),
    Element::new("Tc", 98.000,  &[]),
    Element::new("Ru", 101.07,  &[]),
    Element::new("Rh", 102.91,  &[]),
    Element::new("Pd", 106.42,  &[]),
    Element::new("Ag", 107.87,  &[]),
    Element::new("Cd", 112.41,  &[]),
    Element::new("In", 114.82,  &[]),
    Element::new("Sn", 118.71,  &[]),
    Element::new("Sb", 121.76,  &[]),
    Element::new("Te", 127.60,  &[]),
    Element::new("I",  126.90,  &[1]),
    Element::new("Xe", 131.29,  &[]),
    Element::new("Cs", 132.91,  &[]),
    Element::new("Ba", 137.33,  &[]),
    Element::new("La", 138.91,  &[]),
    Element::new("Ce", 140.12,  &[]),
    Element::new("Pr", 140.91,  &[]),
    Element::new("Nd", 144.24,  &[]),
    Element::new("Pm", 145.00,  &[]),
    Element::new("Sm", 150.36,  &[]),
    Element::new("Eu", 151.96,  &[]),
    Element::new("Gd", 157.25,  &[]),
    Element::new("Tb", 158.93,  &[]),
    Element::new("Dy", 162.50,  &[]),
    Element::new("Ho", 164.93,  &[]),
    Element::new("Er", 167.26,  &[]),
    Element::new("Tm", 168.93,  &[]),
    Element::new("Yb", 173.04,  &[]),
    Element::new("Lu", 174.97,  &[]),
    Element::new("Hf", 178.49,  &[]),
    Element::new("Ta", 180.95,  &[]),
    Element::new("W",  183.84,  &[]),
    Element::new("Re", 186.21,  &[]),
    Element::new("Os", 190.23,  &[]),
    Element::new("Ir", 192.22,  &[]),
    Element::new("Pt", 195.08,  &[]),
    Element::new("Au", 196.97,  &[]),
    Element::new("Hg", 200.59,  &[]),
    Element::new("Tl", 204.38,  &[]),
    Element::new("Pb", 207.20,  &[]),
    Element::new("Bi", 208.98,  &[]),
    Element::new("Po", 209.00,  &[]),
    Element::new("At", 210.00,  &[]),
    Element::new("Rn", 222.00,  &[]),
    Element::new("Fr", 223.00,  &[]),
    Element::new("Ra", 226.00,  &[]),
    Element::new("Ac", 227.00,  &[]),
    Element::new("Th", 232.04,  &[]),
    Element::new("Pa", 231.04,  &[]),
    Element::new("U",  238.03,  &[]),
    Element::new("Np", 237.05,  &[]),
    Element::new("Pu", 244.00,  &[]),
    Element::new("Am", 243.00,  &[]),
    Element::new("Cm", 247.00,  &[]),
    Element::new("Bk", 247.00,  &[]),
    Element::new("Cf", 251.00,  &[]),
    Element::new("Es", 252.00,  &[]),
    Element::new("Fm", 257.00,  &[]),
    Element::new("Md", 258.00,  &[]),
    Element::new("No", 259.00,  &[]),
    Element::new("Lr", 262.00,  &[]),
    Element::new("Rf", 267.00,  &[]),
    Element::new("Db", 262.00,  &[]),
    Element::new("Sg", 269.00,  &[]),
    Element::new("Bh", 264.00,  &[]),
    Element::new("Hs", 269.00,  &[]),
    Element::new("Mt", 278.00,  &[]),
    Element::new("Ds", 281.00,  &[]),
    Element::new("Rg", 282.00,  &[]),
    Element::new("Cn", 285.00,  &[]),
    Element::new("Nh", 286.00,  &[]),
    Element::new("Fl", 289.00,  &[]),
    Element::new("Mc", 289.00,  &[]),
    Element::new("Lv", 293.00,  &[]),
    Element::new("Ts", 294.00,  &[]),
    Element::new("Og", 294.00,  &[]),
];
