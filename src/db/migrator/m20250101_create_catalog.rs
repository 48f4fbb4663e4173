use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so every foreign key has its target.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Tests)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Ages)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(RatingsMpaa)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Films)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmsWithIndexSites)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmNames)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmRatings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(RatingCounts)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Country)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmCountry)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Genres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Actors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmActors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Keywords)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmKeywords)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Screenwriters)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmScreenwriters)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Producers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmProducers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(StageDirectors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmStageDirectors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Operators)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmOperators)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Composers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmComposers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Painters)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmPainters)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Editors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmEditors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FilmEditors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Editors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmPainters).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Painters).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmComposers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Composers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmOperators).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Operators).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmStageDirectors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StageDirectors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmProducers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Producers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmScreenwriters).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Screenwriters).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmKeywords).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Keywords).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmActors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmGenres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmCountry).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Country).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingCounts).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmRatings).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmNames).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmsWithIndexSites).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Films).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingsMpaa).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ages).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tests).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
