//! Show film command handler

use crate::config::Config;
use crate::db::{Catalog, FilmRepository};
use crate::schema::JoinTable;

pub async fn cmd_show_film(config: &Config, film_id: i32) -> anyhow::Result<()> {
    let catalog = Catalog::connect(config).await?;
    let details = FilmRepository::new(&catalog).details(film_id).await?;
    let film = &details.film;

    let title = details
        .names
        .first()
        .and_then(|name| name.name_en.clone().or_else(|| name.name_ru.clone()))
        .unwrap_or_else(|| "(untitled)".to_string());

    println!("{} [ID: {}]", title, film.id);
    println!("{:-<60}", "");
    println!("Runtime: {}", film.time);

    let unknown = || "?".to_string();
    println!(
        "Year: {} | Budget: {} | World fees: {}",
        film.year_create.map_or_else(unknown, |d| d.to_string()),
        film.budget.map_or_else(unknown, |v| v.to_string()),
        film.fees_world.map_or_else(unknown, |v| v.to_string()),
    );

    if let Some(age) = details.age.as_ref().and_then(|a| a.age) {
        println!("Age rating: {age}+");
    }
    if let Some(mpaa) = details.rating_mpaa.as_ref().and_then(|r| r.rating_mpaa.clone()) {
        println!("MPAA: {mpaa}");
    }

    let kinopoisk = details.kinopoisk_ids();
    if !kinopoisk.is_empty() {
        println!("Kinopoisk: {kinopoisk:?}");
    }

    for entry in &details.ratings {
        let votes = entry
            .counts
            .last()
            .and_then(|c| c.count_kinopoisk)
            .map_or_else(unknown, |v| v.to_string());
        println!(
            "Rating: {} ({} votes)",
            entry
                .rating
                .rating_kinopoisk
                .map_or_else(unknown, |v| v.to_string()),
            votes
        );
    }

    for join in JoinTable::ALL {
        let linked = details.linked(join);
        if linked.is_empty() {
            continue;
        }
        let labels: Vec<&str> = linked
            .iter()
            .map(|entry| entry.label.as_deref().unwrap_or("?"))
            .collect();
        println!("{}: {}", join.lookup().name(), labels.join(", "));
    }

    Ok(())
}
