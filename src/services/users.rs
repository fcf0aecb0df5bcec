//! User service

use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{CreateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        self.repository.users.create(data).await
    }
}
