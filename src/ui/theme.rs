use crate::pokemon::PokemonType;
use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    colored: bool,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            colored: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            colored: false,
        }
    }

    /// Badge color for a type tag
    pub fn type_style(&self, kind: PokemonType) -> Style {
        if !self.colored {
            return Style::new();
        }

        use crate::pokemon::PokemonType::*;
        let style = Style::new().bold();
        match kind {
            Fire | Fighting => style.red(),
            Water | Ice => style.blue(),
            Grass | Bug => style.green(),
            Electric | Ground => style.yellow(),
            Psychic | Fairy | Poison => style.magenta(),
            Ghost | Dragon | Flying => style.cyan(),
            Normal | Rock | Steel | Dark => style.white(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
