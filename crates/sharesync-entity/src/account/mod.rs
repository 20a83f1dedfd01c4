//! Remote account entities.

pub mod account_type;
pub mod model;

pub use account_type::AccountType;
pub use model::Account;
