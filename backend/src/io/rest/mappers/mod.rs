pub mod crypto_currency_mapper;
