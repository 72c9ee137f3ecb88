use crate::db::DbContext;
use crate::errors::AppError;
use crate::models::employee::{Employee, NewEmployee};
use async_trait::async_trait;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Employee>, AppError>;

    /// Stores the employee and returns it with the id the store assigned.
    async fn add(&self, employee: NewEmployee) -> Result<Employee, AppError>;
}

pub struct DbEmployeeRepository {
    ctx: DbContext,
}

impl DbEmployeeRepository {
    pub fn new(ctx: DbContext) -> Self {
        DbEmployeeRepository { ctx }
    }
}

#[async_trait]
impl EmployeeRepository for DbEmployeeRepository {
    async fn get_all(&self) -> Result<Vec<Employee>, AppError> {
        self.ctx.fetch_all().await
    }

    async fn add(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        if let Some(id) = employee.id {
            log::debug!("Ignoring client-supplied employee id {}", id);
        }
        self.ctx.insert(employee).await
    }
}
