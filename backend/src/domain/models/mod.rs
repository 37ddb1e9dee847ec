pub mod crypto_currency;

pub use crypto_currency::{CryptoCurrency, VoteKind};
