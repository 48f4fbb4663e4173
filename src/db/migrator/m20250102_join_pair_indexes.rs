use crate::schema::JoinTable;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn index_name(join: JoinTable) -> String {
    format!("idx_{}_pair_unique", join.table().name())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A film is linked to a given genre, actor, country... at most once.
        for join in JoinTable::ALL {
            manager
                .create_index(
                    Index::create()
                        .name(index_name(join))
                        .table(Alias::new(join.table().name()))
                        .col(Alias::new("film_id"))
                        .col(Alias::new(join.lookup_key()))
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for join in JoinTable::ALL {
            manager
                .drop_index(
                    Index::drop()
                        .name(index_name(join))
                        .table(Alias::new(join.table().name()))
                        .if_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
