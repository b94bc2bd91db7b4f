pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, pokemon_card, success, summary_row, warn};
pub use table::{PokemonTable, stats_table};
pub use theme::theme;
