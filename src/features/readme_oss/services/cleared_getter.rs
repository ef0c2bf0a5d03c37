use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::readme_oss::models::{ClearedStatements, Statement};

/// Source of cleared statements for one upload, license or copyright alike
#[async_trait]
pub trait ClearedGetter<T>: Send + Sync {
    async fn get_cleared(&self, upload_id: i32, group_id: i32) -> Result<ClearedStatements<T>>;
}

/// Fold rows carrying the same statement into one, keeping first-seen order
pub fn group_statements<T, I>(rows: I) -> Vec<T>
where
    T: Statement,
    I: IntoIterator<Item = T>,
{
    let mut grouped: Vec<T> = Vec::new();
    let mut index: HashMap<T::Key, usize> = HashMap::new();

    for row in rows {
        let key = row.key();
        match index.get(&key) {
            Some(&position) => grouped[position].merge(row),
            None => {
                index.insert(key, grouped.len());
                grouped.push(row);
            }
        }
    }

    grouped
}
