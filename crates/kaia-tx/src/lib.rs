//! The transaction layer of the Kaia chain: transaction types, intrinsic gas, fee delegation and
//! the code-delegation account-shape guard.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod account_key;
pub use account_key::*;

mod error;
pub use error::*;

mod fee;
pub use fee::*;

mod fields;
pub use fields::*;

mod gas;
pub use gas::*;

mod hardfork;
pub use hardfork::*;

mod signature;
pub use signature::*;

mod spec;
pub use spec::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod transaction;
pub use transaction::*;

mod tx_type;
pub use tx_type::*;

mod validation;
pub use validation::*;
