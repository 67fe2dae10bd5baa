use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::UploadRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "uploaded_files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sub_folder_name: String,
    pub file_name: String,
    #[sea_orm(column_type = "Text")]
    pub location: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&UploadRecord> for ActiveModel {
    fn from(record: &UploadRecord) -> Self {
        Self {
            id: Set(record.id.clone()),
            sub_folder_name: Set(record.sub_folder_name.clone()),
            file_name: Set(record.file_name.clone()),
            location: Set(record.location.clone()),
            created_at: Set(record.created_at),
        }
    }
}
