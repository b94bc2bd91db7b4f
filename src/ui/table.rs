use crate::pokemon::Pokemon;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct PokemonRow {
    #[tabled(rename = "#")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Types")]
    pub types: String,
    #[tabled(rename = "HP")]
    pub hp: i64,
    #[tabled(rename = "Atk")]
    pub attack: i64,
    #[tabled(rename = "Def")]
    pub defense: i64,
    #[tabled(rename = "SpA")]
    pub sp_attack: i64,
    #[tabled(rename = "SpD")]
    pub sp_defense: i64,
    #[tabled(rename = "Spe")]
    pub speed: i64,
}

impl From<&Pokemon> for PokemonRow {
    fn from(p: &Pokemon) -> Self {
        Self {
            id: p.id,
            name: p.name.english.clone(),
            types: p
                .types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join("/"),
            hp: p.base.hp,
            attack: p.base.attack,
            defense: p.base.defense,
            sp_attack: p.base.sp_attack,
            sp_defense: p.base.sp_defense,
            speed: p.base.speed,
        }
    }
}

pub struct PokemonTable {
    rows: Vec<PokemonRow>,
}

impl PokemonTable {
    pub fn new(records: &[Pokemon]) -> Self {
        Self {
            rows: records.iter().map(PokemonRow::from).collect(),
        }
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn stats_table(stats: &[(String, String)]) -> String {
    let rows: Vec<StatRow> = stats
        .iter()
        .map(|(metric, value)| StatRow {
            metric: metric.clone(),
            value: value.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::fixtures;

    #[test]
    fn test_pokemon_table_lists_every_record() {
        let table = PokemonTable::new(&fixtures::seed()).build();

        assert!(table.contains("Bulbasaur"));
        assert!(table.contains("Grass/Poison"));
        assert!(table.contains("Gyarados"));
        assert!(PokemonTable::new(&[]).build().is_empty());
    }

    #[test]
    fn test_stats_table() {
        let table = stats_table(&[("Records".to_string(), "5".to_string())]);
        assert!(table.contains("Records"));
        assert!(table.contains("Metric"));
    }
}
