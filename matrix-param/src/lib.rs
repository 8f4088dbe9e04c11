pub mod dvector_gamma;
pub mod io;
pub mod traits;
