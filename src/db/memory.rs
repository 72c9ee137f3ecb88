use crate::models::employee::{Employee, NewEmployee};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug)]
struct Table {
    rows: Vec<Employee>,
    next_id: i32,
}

/// Volatile employee table. Nothing survives a restart.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    table: Arc<Mutex<Table>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            table: Arc::new(Mutex::new(Table { rows: Vec::new(), next_id: 1 })),
        }
    }

    pub async fn has_employees(&self) -> bool {
        !self.table.lock().await.rows.is_empty()
    }

    pub async fn fetch_all(&self) -> Vec<Employee> {
        self.table.lock().await.rows.clone()
    }

    pub async fn insert(&self, draft: NewEmployee) -> Employee {
        let mut table = self.table.lock().await;
        Self::push(&mut table, draft)
    }

    pub async fn insert_many(&self, drafts: Vec<NewEmployee>) -> Vec<Employee> {
        let mut table = self.table.lock().await;
        drafts.into_iter().map(|draft| Self::push(&mut table, draft)).collect()
    }

    fn push(table: &mut Table, draft: NewEmployee) -> Employee {
        let employee = draft.with_id(table.next_id);
        table.next_id += 1;
        table.rows.push(employee.clone());
        employee
    }
}
