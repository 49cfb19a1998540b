// Purpose: To store constants that are used in the program
pub const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0; // Julian year
// half-lives beyond this count as stable, Bi-209 and double-beta emitters are observationally stable
pub const OBSERVATIONALLY_STABLE_HALF_LIFE: f64 = 1.0e14 * SECONDS_PER_YEAR;

// Ranging
pub const MAX_NUMBER_OF_ION_SPECIES: usize = 256;
pub const MAX_NUMBER_OF_ATOMS_PER_ION: usize = 32;
pub const MAX_CHARGE_STATE: i8 = 7;
pub const MAX_NUMBER_OF_CANDIDATES: usize = 100_000; // per builder run
pub const MQ_EPSILON: f64 = 1.0 / 2000.0; // Da, practical minimum mass resolution
pub const MQ_MAX_RANGE_WIDTH: f64 = 500.0; // Da

// Nuclide hash bit layout
pub const PROTON_BITS: u32 = 8;
pub const NEUTRON_BITS: u32 = 9;
pub const MAX_PROTON_COUNT: u16 = (1 << PROTON_BITS) - 1;
pub const MAX_NEUTRON_COUNT: u16 = (1 << NEUTRON_BITS) - 1;
// neutron count reserved for "element, isotope unspecified"
pub const NEUTRON_COUNT_FOR_ELEMENT: u16 = MAX_NEUTRON_COUNT;
pub const MAX_NUCLIDE_HASH: u32 = (1 << (PROTON_BITS + NEUTRON_BITS)) - 1;

// Practical defaults for charge-state recovery
pub const PRACTICAL_ABUNDANCE_PRODUCT: f64 = 0.0;
pub const PRACTICAL_MIN_HALF_LIFE: f64 = f64::INFINITY;
pub const SACRIFICE_ISOTOPIC_UNIQUENESS: bool = true;
