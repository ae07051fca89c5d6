//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{NewPost, Post, PostContent};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category: String,
    pub created_at: Date,
    pub title: String,
    pub image1: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub intro_content: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content1: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub quote: Option<String>,
    pub quote_author: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub main_content: Option<String>,
    pub image2: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub final_content: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Overwrite every content column, nulls included.
    pub fn apply_content(&mut self, content: PostContent) {
        self.category = Set(content.category);
        self.title = Set(content.title);
        self.image1 = Set(content.image1);
        self.intro_content = Set(content.intro_content);
        self.content1 = Set(content.content1);
        self.quote = Set(content.quote);
        self.quote_author = Set(content.quote_author);
        self.main_content = Set(content.main_content);
        self.image2 = Set(content.image2);
        self.final_content = Set(content.final_content);
    }
}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            content: PostContent {
                category: model.category,
                title: model.title,
                image1: model.image1,
                intro_content: model.intro_content,
                content1: model.content1,
                quote: model.quote,
                quote_author: model.quote_author,
                main_content: model.main_content,
                image2: model.image2,
                final_content: model.final_content,
            },
            created_at: model.created_at,
        }
    }
}

impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        let mut active = Self {
            id: NotSet,
            created_at: Set(post.created_at),
            ..Default::default()
        };
        active.apply_content(post.content);
        active
    }
}
