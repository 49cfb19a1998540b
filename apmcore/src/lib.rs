// chemistry module
pub mod chemistry {
    pub mod constants;
    pub mod elements;
    pub mod formula;
    pub(crate) mod isotope_data;
    pub mod isotopes;
    pub mod nuclide;
}

// algorithm module
pub mod algorithm {
    pub mod molecular_ion;
}

// data module
pub mod data {
    pub mod ion;
    pub mod ranging;
}

pub mod error;
