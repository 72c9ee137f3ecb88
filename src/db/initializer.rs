use crate::db::DbContext;
use crate::errors::AppError;
use crate::models::employee::NewEmployee;
use chrono::NaiveDate;
use log::info;

const SEED: [(&str, i32, u32, u32); 5] = [
    ("Alice", 2011, 1, 1),
    ("Bob", 2012, 2, 2),
    ("Charlie", 2013, 3, 3),
    ("Diana", 2014, 4, 4),
    ("Eve", 2015, 5, 5),
];

pub fn seed_employees() -> Vec<NewEmployee> {
    SEED.iter()
        .filter_map(|(name, y, m, d)| {
            NaiveDate::from_ymd_opt(*y, *m, *d).map(|date| NewEmployee::new(*name, date))
        })
        .collect()
}

/// Migrates (relational only) and seeds an empty employee table. Returns how many rows were seeded.
pub async fn initialize(ctx: &DbContext) -> Result<usize, AppError> {
    if ctx.is_relational() {
        ctx.migrate().await?;
        info!("Database migrations applied");
    }

    if ctx.has_employees().await? {
        info!("Employee table already populated, skipping seed");
        return Ok(0);
    }

    let seeded = ctx.insert_many(seed_employees()).await?;
    info!("Seeded {} employees", seeded.len());
    Ok(seeded.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_an_empty_store() {
        let ctx = DbContext::in_memory();
        assert_eq!(initialize(&ctx).await.unwrap(), 5);

        let stored = ctx.fetch_all().await.unwrap();
        let rows: Vec<(String, NaiveDate)> = stored
            .iter()
            .map(|e| (e.name.clone(), e.joining_date))
            .collect();
        let expected: Vec<(String, NaiveDate)> = SEED
            .iter()
            .map(|(n, y, m, d)| (n.to_string(), NaiveDate::from_ymd_opt(*y, *m, *d).unwrap()))
            .collect();
        assert_eq!(rows, expected);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let ctx = DbContext::in_memory();
        initialize(&ctx).await.unwrap();
        assert_eq!(initialize(&ctx).await.unwrap(), 0);
        assert_eq!(ctx.fetch_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn never_seeds_over_existing_rows() {
        let ctx = DbContext::in_memory();
        ctx.insert(NewEmployee::new("Oscar", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()))
            .await
            .unwrap();
        assert_eq!(initialize(&ctx).await.unwrap(), 0);

        let stored = ctx.fetch_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Oscar");
    }
}
