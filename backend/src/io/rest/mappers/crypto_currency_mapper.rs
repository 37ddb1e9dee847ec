use crate::domain::commands::CreateCryptoCurrencyCommand;
use crate::domain::models::CryptoCurrency as DomainCryptoCurrency;
use shared::{CreateCryptoCurrencyRequest, CryptoCurrency as SharedCryptoCurrency};

/// Mapper between the shared cryptocurrency DTOs and the domain model.
pub struct CryptoCurrencyMapper;

impl CryptoCurrencyMapper {
    /// Converts a domain record to its wire form, deriving `total_votes`.
    pub fn to_dto(domain: DomainCryptoCurrency) -> SharedCryptoCurrency {
        let total_votes = domain.total_votes();
        SharedCryptoCurrency {
            id: domain.id,
            name: domain.name,
            up_vote: domain.up_vote,
            down_vote: domain.down_vote,
            total_votes,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainCryptoCurrency>) -> Vec<SharedCryptoCurrency> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateCryptoCurrencyRequest) -> CreateCryptoCurrencyCommand {
        CreateCryptoCurrencyCommand { name: request.name }
    }
}
