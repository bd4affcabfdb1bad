//! PERT three-point estimates as rescaled Beta distributions.

pub mod beta;

pub use beta::PertBeta;
