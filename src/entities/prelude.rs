pub use super::actors::Entity as Actors;
pub use super::ages::Entity as Ages;
pub use super::composers::Entity as Composers;
pub use super::country::Entity as Country;
pub use super::editors::Entity as Editors;
pub use super::film_actors::Entity as FilmActors;
pub use super::film_composers::Entity as FilmComposers;
pub use super::film_country::Entity as FilmCountry;
pub use super::film_editors::Entity as FilmEditors;
pub use super::film_genres::Entity as FilmGenres;
pub use super::film_keywords::Entity as FilmKeywords;
pub use super::film_names::Entity as FilmNames;
pub use super::film_operators::Entity as FilmOperators;
pub use super::film_painters::Entity as FilmPainters;
pub use super::film_producers::Entity as FilmProducers;
pub use super::film_ratings::Entity as FilmRatings;
pub use super::film_screenwriters::Entity as FilmScreenwriters;
pub use super::film_stage_directors::Entity as FilmStageDirectors;
pub use super::films::Entity as Films;
pub use super::films_with_index_sites::Entity as FilmsWithIndexSites;
pub use super::genres::Entity as Genres;
pub use super::keywords::Entity as Keywords;
pub use super::operators::Entity as Operators;
pub use super::painters::Entity as Painters;
pub use super::producers::Entity as Producers;
pub use super::rating_counts::Entity as RatingCounts;
pub use super::ratings_mpaa::Entity as RatingsMpaa;
pub use super::screenwriters::Entity as Screenwriters;
pub use super::stage_directors::Entity as StageDirectors;
pub use super::tests::Entity as Tests;
pub use super::users::Entity as Users;
