use sqlx::FromRow;

/// Upload metadata row, only the columns the report needs
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
#[allow(dead_code)]
pub struct Upload {
    pub upload_pk: i32,
    pub upload_filename: String,
}
