use crate::errors::AppError;
use crate::models::employee::{Employee, NewEmployee};
use crate::repositories::employee::EmployeeRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Business rules for employees go here, not in the handlers or the repository.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Employee>, AppError>;
    async fn add(&self, employee: NewEmployee) -> Result<Employee, AppError>;
}

pub struct DefaultEmployeeService {
    repository: Arc<dyn EmployeeRepository>,
}

impl DefaultEmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        DefaultEmployeeService { repository }
    }
}

#[async_trait]
impl EmployeeService for DefaultEmployeeService {
    async fn get_all(&self) -> Result<Vec<Employee>, AppError> {
        self.repository.get_all().await
    }

    async fn add(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        self.repository.add(employee).await
    }
}
