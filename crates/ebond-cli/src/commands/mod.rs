//! CLI subcommands.

pub mod analyze;
pub mod config;
pub mod convert;

use ebond_core::Variant;

/// Pipeline variant as a CLI value.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum VariantArg {
    /// Bond purchasers
    Purchaser,
    /// Encashing political parties
    Encasher,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Purchaser => Variant::Purchaser,
            VariantArg::Encasher => Variant::Encasher,
        }
    }
}
