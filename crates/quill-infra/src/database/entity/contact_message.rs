use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{ContactMessage, NewContactMessage};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactMessage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            subject: model.subject,
            message: model.message,
        }
    }
}

impl From<NewContactMessage> for ActiveModel {
    fn from(message: NewContactMessage) -> Self {
        Self {
            id: NotSet,
            name: Set(message.name),
            email: Set(message.email),
            phone: Set(message.phone),
            subject: Set(message.subject),
            message: Set(message.message),
        }
    }
}
