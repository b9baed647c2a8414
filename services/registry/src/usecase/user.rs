use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{RitoAccountRepository, UserRepository};
use crate::domain::types::User;
use crate::error::RegistryServiceError;
use crate::usecase::account::EnsureDefaultAccountUseCase;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
}

pub struct CreateUserOutput {
    pub user: User,
    pub rito_id: String,
}

/// Create a user and its default Rito account. The account creation is an
/// explicit step of this workflow rather than a storage-side hook, so the
/// dependency stays visible and testable.
pub struct CreateUserUseCase<U, A>
where
    U: UserRepository,
    A: RitoAccountRepository,
{
    pub users: U,
    pub accounts: A,
}

impl<U, A> CreateUserUseCase<U, A>
where
    U: UserRepository,
    A: RitoAccountRepository + Clone,
{
    pub async fn execute(
        &self,
        input: CreateUserInput,
    ) -> Result<CreateUserOutput, RegistryServiceError> {
        if input.username.is_empty() {
            return Err(RegistryServiceError::MissingData);
        }
        if self
            .users
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(RegistryServiceError::UserAlreadyExists);
        }

        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        let ensure = EnsureDefaultAccountUseCase {
            accounts: self.accounts.clone(),
        };
        let account = ensure.execute(&user).await?;

        Ok(CreateUserOutput {
            user,
            rito_id: account.rito_id,
        })
    }
}
