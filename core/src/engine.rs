use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Idle,
    Running,
    Succeeded,
    OutOfMoves,
}

impl RunStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::OutOfMoves)
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Token identifying one script run. Any reset, variant switch, or new run
/// invalidates the previous token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(u32);

/// Owned copy of everything the presentation layer renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub variant_index: usize,
    pub variant_id: u8,
    pub player: Coord2,
    pub target: Coord2,
    pub tiles: Array2<Tile>,
    pub moves_used: u16,
    pub max_moves: u16,
    pub output: Vec<String>,
    pub status: RunStatus,
    pub score: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleEngine {
    catalog: &'static [PuzzleVariant],
    variant_index: usize,
    layout: PuzzleLayout,
    player: Coord2,
    moves_used: u16,
    output: Vec<String>,
    status: RunStatus,
    score: Option<u32>,
    generation: u32,
    revision: u64,
}

impl PuzzleEngine {
    /// Engine over the built-in catalog, starting at the first variant.
    pub fn new() -> Result<Self> {
        Self::with_catalog(CATALOG, 0)
    }

    pub fn with_catalog(catalog: &'static [PuzzleVariant], index: usize) -> Result<Self> {
        let variant = catalog.get(index).ok_or(GameError::InvalidVariant(index))?;
        let layout = PuzzleLayout::from_variant(variant)?;
        Ok(Self {
            catalog,
            variant_index: index,
            player: layout.start(),
            layout,
            moves_used: 0,
            output: Vec::new(),
            status: RunStatus::default(),
            score: None,
            generation: 0,
            revision: 0,
        })
    }

    pub fn catalog(&self) -> &'static [PuzzleVariant] {
        self.catalog
    }

    pub fn variant(&self) -> &'static PuzzleVariant {
        &self.catalog[self.variant_index]
    }

    pub fn variant_index(&self) -> usize {
        self.variant_index
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn moves_used(&self) -> u16 {
        self.moves_used
    }

    pub fn moves_left(&self) -> u16 {
        self.variant().max_moves.saturating_sub(self.moves_used)
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.layout[coords])
    }

    /// Increases on every observable change; re-read [`Self::snapshot`] when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let variant = self.variant();
        EngineSnapshot {
            variant_index: self.variant_index,
            variant_id: variant.id,
            player: self.player,
            target: self.layout.target(),
            tiles: self.layout.tiles().clone(),
            moves_used: self.moves_used,
            max_moves: variant.max_moves,
            output: self.output.clone(),
            status: self.status,
            score: self.score,
        }
    }

    pub fn has_next_variant(&self) -> bool {
        self.variant_index + 1 < self.catalog.len()
    }

    pub fn select_variant(&mut self, index: usize) -> Result<()> {
        let variant = self
            .catalog
            .get(index)
            .ok_or(GameError::InvalidVariant(index))?;
        self.layout = PuzzleLayout::from_variant(variant)?;
        self.variant_index = index;
        log::debug!("selected variant {} ({})", variant.id, variant.name);
        self.reset();
        Ok(())
    }

    /// Moves on to the following variant. Past the last one this fails and
    /// nothing changes.
    pub fn next_variant(&mut self) -> Result<usize> {
        let index = self.variant_index + 1;
        self.select_variant(index)?;
        Ok(index)
    }

    pub fn reset(&mut self) {
        self.player = self.layout.start();
        self.moves_used = 0;
        self.output.clear();
        self.status = RunStatus::Idle;
        self.score = None;
        self.generation = self.generation.wrapping_add(1);
        self.touch();
    }

    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        use MoveOutcome::*;

        if self.status.is_finished() {
            return Blocked;
        }

        if self.moves_used >= self.variant().max_moves {
            self.status = RunStatus::OutOfMoves;
            self.output.push(format!(
                "Out of moves! All {} moves used.",
                self.variant().max_moves
            ));
            log::debug!("out of moves at {:?}", self.player);
            self.touch();
            return Blocked;
        }

        let Some(candidate) = self.layout.step_from(self.player, direction) else {
            log::trace!("move {} from {:?} leaves the grid", direction, self.player);
            return Rejected;
        };

        let outcome = match self.layout.obstacle_at(candidate) {
            Some(ObstacleKind::Wall) => {
                self.output.push(format!(
                    "Hit a wall at ({}, {})! Back to the start.",
                    candidate.0, candidate.1
                ));
                self.player = self.layout.start();
                Reset
            }
            Some(ObstacleKind::Trap) => {
                self.output.push(format!(
                    "Stepped on a trap at ({}, {})! Back to the start.",
                    candidate.0, candidate.1
                ));
                self.player = self.layout.start();
                Reset
            }
            None => {
                self.player = candidate;
                self.moves_used += 1;
                Accepted
            }
        };
        log::trace!("move {} -> {:?} ({:?})", direction, self.player, outcome);

        self.check_success();
        self.touch();
        outcome
    }

    pub fn begin_run(&mut self) -> Result<RunId> {
        match self.status {
            RunStatus::Running => return Err(GameError::RunInProgress),
            RunStatus::Succeeded | RunStatus::OutOfMoves => return Err(GameError::AlreadyEnded),
            RunStatus::Idle => {}
        }

        self.generation = self.generation.wrapping_add(1);
        self.output.clear();
        self.status = RunStatus::Running;
        self.touch();
        Ok(self.current_run())
    }

    /// Appends the console echo for a script line.
    pub fn echo(&mut self, run: RunId, line: &str) -> Result<()> {
        self.check_run(run)?;
        self.output.push(format!("Running: {line}"));
        self.touch();
        Ok(())
    }

    pub fn step(&mut self, run: RunId, direction: Direction) -> Result<MoveOutcome> {
        self.check_run(run)?;
        Ok(self.attempt_move(direction))
    }

    pub fn finish_run(&mut self, run: RunId) -> Result<()> {
        self.check_run(run)?;
        if self.status.is_running() {
            self.status = RunStatus::Idle;
            self.touch();
        }
        Ok(())
    }

    pub fn is_current_run(&self, run: RunId) -> bool {
        run == self.current_run()
    }

    fn current_run(&self) -> RunId {
        RunId(self.generation)
    }

    fn check_run(&self, run: RunId) -> Result<()> {
        if self.is_current_run(run) {
            Ok(())
        } else {
            Err(GameError::StaleRun)
        }
    }

    fn check_success(&mut self) {
        if self.player != self.layout.target() || self.status.is_finished() {
            return;
        }

        let score = score_for(self.moves_used, self.variant_index);
        self.score = Some(score);
        self.status = RunStatus::Succeeded;
        self.output
            .push(format!("Reached the target! Score: {score}"));
        log::debug!(
            "variant {} solved in {} moves, score {}",
            self.variant().id,
            self.moves_used,
            score
        );
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
