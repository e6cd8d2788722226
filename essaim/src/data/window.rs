use super::reader::DelimitedTextReader;
use super::table::{DataSource, DataTable, Pattern};
use crate::utils::prelude::*;
use std::path::{Path, PathBuf};

/// Fenêtre glissante sur un jeu de données complet.
///
/// La fenêtre couvre `window_size` motifs consécutifs et avance de
/// `window_size` motifs à chaque glissement. `tick` est appelé une fois par
/// itération et déclenche un glissement toutes les `slide_frequency` itérations.
#[derive(Clone, Debug)]
pub struct SlidingWindow {
    source: Option<PathBuf>,
    reader: DelimitedTextReader,
    window_size: usize,
    slide_frequency: usize,
    start: usize,
    ticks: usize,
    complete: DataTable,
    current: DataTable,
}

impl SlidingWindow {
    pub fn new(window_size: usize, slide_frequency: usize) -> Self {
        Self {
            source: None,
            reader: DelimitedTextReader::new(),
            window_size,
            slide_frequency,
            start: 0,
            ticks: 0,
            complete: DataTable::new(),
            current: DataTable::new(),
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn set_reader(&mut self, reader: DelimitedTextReader) {
        self.reader = reader;
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn slide_frequency(&self) -> usize {
        self.slide_frequency
    }

    /// Charge la source et positionne la fenêtre sur les premiers motifs.
    pub fn initialise_window(&mut self) -> Result<()> {
        let path = self.source.clone().ok_or_else(|| {
            EngineError::Config("Fenêtre glissante sans fichier source".to_string())
        })?;
        let table = self.reader.read_file(&path)?;
        self.initialise_from(table)
    }

    /// Variante sans fichier : la table complète est fournie directement.
    pub fn initialise_from(&mut self, table: DataTable) -> Result<()> {
        if self.window_size == 0 {
            return Err(EngineError::Config(
                "La taille de fenêtre doit être strictement positive".to_string(),
            ));
        }
        self.complete = table;
        self.start = 0;
        self.ticks = 0;
        self.refresh();
        debug!(
            total = self.complete.len(),
            window = self.window_size,
            "fenêtre initialisée"
        );
        Ok(())
    }

    /// Avance la fenêtre ; renvoie `false` si la fin des données est atteinte.
    pub fn slide_window(&mut self) -> bool {
        let next = self.start + self.window_size;
        if next >= self.complete.len() {
            return false;
        }
        self.start = next;
        self.refresh();
        trace!(start = self.start, "fenêtre déplacée");
        true
    }

    /// Compte une itération et fait glisser la fenêtre si la fréquence l'exige.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        self.slide_frequency > 0 && self.ticks % self.slide_frequency == 0 && self.slide_window()
    }

    pub fn current_dataset(&self) -> &DataTable {
        &self.current
    }

    pub fn complete_dataset(&self) -> &DataTable {
        &self.complete
    }

    fn refresh(&mut self) {
        self.current = self.complete.slice(self.start, self.start + self.window_size);
    }
}

impl DataSource for SlidingWindow {
    fn len(&self) -> usize {
        self.current.len()
    }

    fn row(&self, index: usize) -> Option<&Pattern> {
        self.current.row(index)
    }
}
