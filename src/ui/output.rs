use crate::output::is_quiet;
use crate::pokemon::{Pokemon, PokemonType};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Type tags joined with `/`, colored when the terminal allows it
pub fn type_badges(types: &[PokemonType]) -> String {
    types
        .iter()
        .map(|t| t.as_str().style(theme().type_style(*t)).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Multi-line view of one record
pub fn pokemon_card(pokemon: &Pokemon) {
    println!(
        "{} #{} {} [{}]",
        Icons::BOLT,
        pokemon.id,
        pokemon.name.english.style(theme().header.clone()),
        type_badges(&pokemon.types)
    );
    summary_row("japanese:", &pokemon.name.japanese);
    summary_row("chinese: ", &pokemon.name.chinese);
    summary_row("french:  ", &pokemon.name.french);

    let b = &pokemon.base;
    summary_row(
        "base:    ",
        &format!(
            "HP {} / Atk {} / Def {} / SpA {} / SpD {} / Spe {} (total {})",
            b.hp, b.attack, b.defense, b.sp_attack, b.sp_defense, b.speed, b.total()
        ),
    );
}
