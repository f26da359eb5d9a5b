use std::io::{Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use vs_core::traits::DisplaySink;

/// Sink terminal crossterm.
///
/// Le repositionnement curseur est queué sans flush ; le write qui suit
/// queue le texte puis flush une seule fois — la paire reset/write part
/// dos à dos, aucune frame partielle n'est visible. Réécriture pleine
/// frame à chaque tick, pas de diff ligne à ligne.
pub struct TermSink {
    out: Stdout,
}

impl TermSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }

    /// Efface l'écran une fois, avant le début de la lecture.
    ///
    /// # Errors
    /// Erreur I/O du terminal.
    pub fn clear(&mut self) -> std::io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }
}

impl Default for TermSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TermSink {
    fn reset_cursor(&mut self) -> std::io::Result<()> {
        queue!(self.out, MoveTo(0, 0))
    }

    fn write(&mut self, text: &str) -> std::io::Result<()> {
        queue!(self.out, Print(text))?;
        self.out.flush()
    }
}
