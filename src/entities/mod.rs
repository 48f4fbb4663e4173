pub mod prelude;

pub mod actors;
pub mod ages;
pub mod composers;
pub mod country;
pub mod editors;
pub mod film_actors;
pub mod film_composers;
pub mod film_country;
pub mod film_editors;
pub mod film_genres;
pub mod film_keywords;
pub mod film_names;
pub mod film_operators;
pub mod film_painters;
pub mod film_producers;
pub mod film_ratings;
pub mod film_screenwriters;
pub mod film_stage_directors;
pub mod films;
pub mod films_with_index_sites;
pub mod genres;
pub mod keywords;
pub mod operators;
pub mod painters;
pub mod producers;
pub mod rating_counts;
pub mod ratings_mpaa;
pub mod screenwriters;
pub mod stage_directors;
pub mod users;
