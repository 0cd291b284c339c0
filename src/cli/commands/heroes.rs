//! CRUD command handlers

use crate::api::{CallOutcome, Hero, HeroService};
use anyhow::Result;
use colored::*;

pub async fn handle_list(service: &HeroService) -> Result<bool> {
    let outcome = service.list().await;
    print_heroes(outcome.value());
    Ok(outcome.is_success())
}

pub async fn handle_get(service: &HeroService, id: i64) -> Result<bool> {
    let outcome = service.get(id).await;
    match outcome.value() {
        Some(hero) => print_heroes(std::slice::from_ref(hero)),
        None => println!("{}", format!("No hero with id {}", id).dimmed()),
    }
    Ok(outcome.is_success())
}

pub async fn handle_create(service: &HeroService, name: String) -> Result<bool> {
    let outcome = service.create(&Hero::new(name)).await;
    if let CallOutcome::Success(hero) = &outcome {
        println!("{} {}", "Created".bright_green(), hero);
    }
    Ok(outcome.is_success())
}

pub async fn handle_update(service: &HeroService, id: i64, name: String) -> Result<bool> {
    let outcome = service.update(&Hero::with_id(id, name)).await?;
    if outcome.is_success() {
        println!("{} hero {}", "Updated".bright_green(), id);
    }
    Ok(outcome.is_success())
}

pub async fn handle_delete(service: &HeroService, id: i64) -> Result<bool> {
    let outcome = service.delete(id).await?;
    if outcome.is_success() {
        println!("{} hero {}", "Deleted".bright_green(), id);
    }
    Ok(outcome.is_success())
}

pub(crate) fn print_heroes(heroes: &[Hero]) {
    if heroes.is_empty() {
        println!("{}", "No heroes".dimmed());
        return;
    }
    for hero in heroes {
        let id = hero
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>5}  {}", id.bright_yellow(), hero.name);
    }
}
