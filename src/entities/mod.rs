// Entity Models
//
// Each entity has:
// - Stable identity assigned by storage
// - Typed request shapes for creation and partial update

pub mod account;

pub use account::{Account, AccountUpdate, NewAccount, ACCOUNT_NUMBER_LEN, DEFAULT_STATUS};
