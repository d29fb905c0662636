//! User Repository - read-only lookup of actors

use super::task_repository::RepositoryError;
use crate::model::id::UserId;
use crate::model::user::User;

pub trait UserRepository: Send + Sync {
    fn find(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
