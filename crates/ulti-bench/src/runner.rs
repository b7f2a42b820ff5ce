use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{Level, event};
use ulti_bot::{BotDifficulty, HeuristicPolicy, RandomPolicy};
use ulti_core::game::collaborator::Collaborator;
use ulti_core::game::error::{ConfigurationError, EngineError};
use ulti_core::game::events::{GameEvent, GameLog};
use ulti_core::game::match_state::MatchState;
use ulti_core::game::orchestrator::{Orchestrator, OrchestratorConfig};
use ulti_core::model::player::Seat;

use crate::config::{BenchConfig, ResolvedOutputs, SeatConfig, SeatKind, ValidationError};

/// Plays a seeded run of hands between the two configured seats.
pub struct SelfPlayRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    seats: Vec<SeatBlueprint>,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub hands_played: usize,
    pub events_written: usize,
    pub seat_names: [String; 2],
    pub totals: [i64; 2],
    pub hands_won: [u32; 2],
    /// Hex SHA-256 of the events file as written.
    pub digest: String,
    pub events_path: PathBuf,
    pub summary_path: PathBuf,
}

impl SelfPlayRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let seats = config
            .seats
            .iter()
            .map(SeatBlueprint::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        if seats.len() != 2 {
            return Err(RunnerError::SeatCount { found: seats.len() });
        }
        Ok(Self {
            config,
            outputs,
            seats,
        })
    }

    /// Execute the run, streaming every game event to the JSONL file.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.events_jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let seed = self.config.deals.seed.unwrap_or(0);
        let mut log = JsonlLog::new(File::create(&self.outputs.events_jsonl)?);
        let mut orchestrator = Orchestrator::new(
            OrchestratorConfig {
                players: 2,
                max_attempts: self.config.retries,
            },
            [self.seats[0].spawn(seed, 0), self.seats[1].spawn(seed, 1)],
        )?;
        let mut state = MatchState::with_seed(Seat::First, seed);

        for hand_index in 0..self.config.deals.hands {
            let hand = state.hand_number();
            let result = state
                .play_next(&mut orchestrator, &mut log)
                .map_err(|source| RunnerError::Engine { hand, source })?;
            log.check()?;
            event!(
                target: "ulti_bench::runner",
                Level::INFO,
                run_id = %self.config.run_id,
                hand_index,
                contract = %result.contract,
                winner = ?result.outcome.winner(),
                first = result.match_points(Seat::First),
                second = result.match_points(Seat::Second),
            );
        }

        let (events_written, digest) = log.finish()?;
        let summary = RunSummary {
            hands_played: self.config.deals.hands,
            events_written,
            seat_names: [self.seats[0].name.clone(), self.seats[1].name.clone()],
            totals: *state.scores().standings(),
            hands_won: *state.scores().wins(),
            digest,
            events_path: self.outputs.events_jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        };
        write_summary(&self.outputs.summary_md, &self.config, &self.seats, &summary)?;
        Ok(summary)
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_summary(
    path: &Path,
    config: &BenchConfig,
    seats: &[SeatBlueprint],
    summary: &RunSummary,
) -> Result<(), RunnerError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# Self-play run `{}`", config.run_id)?;
    writeln!(out)?;
    writeln!(
        out,
        "Seed {} · {} hands · {} events",
        config.deals.seed.unwrap_or(0),
        summary.hands_played,
        summary.events_written
    )?;
    writeln!(out)?;
    writeln!(out, "| Seat | Name | Kind | Total | Hands won |")?;
    writeln!(out, "|---|---|---|---:|---:|")?;
    for (index, seat) in seats.iter().enumerate() {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            index + 1,
            seat.name,
            seat.label(),
            summary.totals[index],
            summary.hands_won[index]
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Event stream SHA-256: `{}`", summary.digest)?;
    out.flush()?;
    Ok(())
}

/// Event sink writing one JSON object per line and hashing exactly the bytes written.
struct JsonlLog<W: Write> {
    writer: BufWriter<W>,
    hasher: Sha256,
    written: usize,
    error: Option<RunnerError>,
}

impl<W: Write> JsonlLog<W> {
    fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            hasher: Sha256::new(),
            written: 0,
            error: None,
        }
    }

    fn write_event(&mut self, event: &GameEvent) -> Result<(), RunnerError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.hasher.update(line.as_bytes());
        self.written += 1;
        Ok(())
    }

    /// Surfaces the first write failure since the sink cannot fail mid-hand.
    fn check(&mut self) -> Result<(), RunnerError> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Result<(usize, String), RunnerError> {
        self.check()?;
        self.writer.flush()?;
        Ok((self.written, hex::encode(self.hasher.finalize())))
    }
}

impl<W: Write> GameLog for JsonlLog<W> {
    fn record(&mut self, event: GameEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_event(&event) {
            self.error = Some(err);
        }
    }
}

struct SeatBlueprint {
    name: String,
    implementation: SeatImplementation,
}

enum SeatImplementation {
    Heuristic(BotDifficulty),
    Random(Option<u64>),
}

impl SeatBlueprint {
    fn from_config(config: &SeatConfig) -> Result<Self, RunnerError> {
        let implementation = match config.kind {
            SeatKind::Heuristic => SeatImplementation::Heuristic(config.difficulty()?),
            SeatKind::Random => {
                SeatImplementation::Random(config.params.get("seed").and_then(|v| v.as_u64()))
            }
        };
        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    /// Random seats without an explicit seed derive one from the deal seed and seat index.
    fn spawn(&self, deal_seed: u64, index: u64) -> Box<dyn Collaborator> {
        match self.implementation {
            SeatImplementation::Heuristic(difficulty) => Box::new(HeuristicPolicy::new(difficulty)),
            SeatImplementation::Random(seed) => Box::new(RandomPolicy::new(
                seed.unwrap_or_else(|| deal_seed.wrapping_add(index + 1)),
            )),
        }
    }

    fn label(&self) -> String {
        match self.implementation {
            SeatImplementation::Heuristic(difficulty) => format!("heuristic ({difficulty:?})"),
            SeatImplementation::Random(_) => "random".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O failure: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize event: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("hand {hand} aborted: {source}")]
    Engine { hand: u32, source: EngineError },
    #[error("table configuration rejected: {0}")]
    Table(#[from] ConfigurationError),
    #[error("invalid seat: {0}")]
    Seat(#[from] ValidationError),
    #[error("configuration requires exactly 2 seats but found {found}")]
    SeatCount { found: usize },
}
